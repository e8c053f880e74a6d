//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy type with its own input, dispatched
//! statically from `main`.

use bugtrail_config::Config;
use bugtrail_conversation::{ExtractionService, RoleplayService};
use bugtrail_core::LLMProvider;
use bugtrail_providers::OpenAiProvider;
use bugtrail_session::{FileStore, StateManager};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

mod chat;
mod export;
mod extract;
mod info;
mod init;
mod persona;
mod reset;
mod scenarios;
mod serve;
mod version;

pub use chat::{ChatInput, ChatStrategy};
pub use export::{ExportInput, ExportStrategy};
pub use extract::{ExtractInput, ExtractStrategy, ReportFormat};
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use persona::{PersonaInput, PersonaStrategy};
pub use reset::ResetStrategy;
pub use scenarios::ScenariosStrategy;
pub use serve::{ServeInput, ServeStrategy};
pub use version::VersionStrategy;

/// Contract for all command strategies.
///
/// Each strategy defines its own input type, so parameters are passed
/// without runtime casting or boxing.
pub trait CommandStrategy: Send + Sync + 'static {
    type Input;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

/// Hosted-model client, or `None` when no usable key is configured.
fn build_provider(config: &Config) -> anyhow::Result<Option<Arc<dyn LLMProvider>>> {
    let Some(api_key) = config.api_key() else {
        info!("No API key configured, running offline");
        return Ok(None);
    };
    let openai = &config.providers.openai;
    let provider =
        OpenAiProvider::new(api_key.to_string(), Duration::from_secs(openai.timeout_secs))?
            .with_base_url(openai.base_url.clone())
            .with_default_model(openai.model.clone());
    Ok(Some(Arc::new(provider)))
}

fn build_services(config: &Config) -> anyhow::Result<(RoleplayService, ExtractionService)> {
    let provider = build_provider(config)?;
    let roleplay = config.agents.roleplay;
    let extractor = config.agents.extractor;
    Ok((
        RoleplayService::new(provider.clone())
            .with_sampling(roleplay.max_tokens, roleplay.temperature),
        ExtractionService::new(provider)
            .with_sampling(extractor.max_tokens, extractor.temperature),
    ))
}

/// Components shared by the commands that touch client state.
struct Common {
    config: Config,
    state: StateManager<FileStore>,
}

async fn init_common_components() -> anyhow::Result<Common> {
    let config = Config::load()?;
    let state_dir = config.state_dir()?;
    info!("Client state directory: {}", state_dir.display());
    let state = StateManager::new(FileStore::open(state_dir).await?);
    Ok(Common { config, state })
}
