use bugtrail_config::Config;
use bugtrail_server::AppState;
use std::net::SocketAddr;
use tracing::info;

use super::build_services;

#[derive(Debug, Clone)]
pub struct ServeInput {
    /// Overrides the configured bind address.
    pub bind: Option<String>,
}

/// Run the HTTP API until interrupted.
#[derive(Debug, Clone, Copy)]
pub struct ServeStrategy;

impl super::CommandStrategy for ServeStrategy {
    type Input = ServeInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let mut config = Config::load()?;
        if let Some(bind) = input.bind {
            config.server.bind_address = bind;
        }

        let addr: SocketAddr = config.server.bind_address.parse().map_err(|e| {
            anyhow::anyhow!("Invalid bind address {}: {e}", config.server.bind_address)
        })?;

        let (roleplay, extraction) = build_services(&config)?;
        info!(
            online = roleplay.is_online(),
            model = %config.providers.openai.model,
            "Starting BugTrail server"
        );

        let state = AppState::new(config.server, roleplay, extraction);
        bugtrail_server::serve(state, addr).await
    }
}
