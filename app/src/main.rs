#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

mod command;

use bugtrail_config::Config;
use bugtrail_core::{ExportFormat, Industry, Level, ScenarioId, Timezone, ToneArc};
use clap::{Parser, Subcommand};
use command::{
    ChatInput, ChatStrategy, CommandStrategy, ExportInput, ExportStrategy, ExtractInput,
    ExtractStrategy, InfoStrategy, InitStrategy, PersonaInput, PersonaStrategy, ReportFormat,
    ResetStrategy, ScenariosStrategy, ServeInput, ServeStrategy, VersionStrategy,
};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Parser)]
#[command(name = "bugtrail")]
#[command(about = "Practice support conversations and turn them into bug reports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Address to bind, e.g. 127.0.0.1:3000
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Play the support agent against the simulated customer
    Chat {
        /// Scenario id (switching clears the saved chat and report)
        #[arg(short, long)]
        scenario: Option<ScenarioId>,

        /// Never call the hosted model
        #[arg(long)]
        offline: bool,

        /// Single agent message to send
        #[arg(short = 'm', long)]
        message: Option<String>,
    },
    /// Extract a BugTrail from the saved conversation
    Extract {
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Json)]
        format: ReportFormat,
    },
    /// Print the saved BugTrail as Markdown or Jira markup
    Export {
        /// markdown | md | jira | wiki
        #[arg(short, long, default_value = "markdown")]
        format: ExportFormat,
    },
    /// List scenarios
    Scenarios,
    /// Show or update the customer persona
    Persona {
        /// saas | ecommerce | fintech | gaming
        #[arg(long)]
        industry: Option<Industry>,

        /// low | medium | high
        #[arg(long)]
        tech_savvy: Option<Level>,

        /// low | medium | high
        #[arg(long)]
        patience: Option<Level>,

        /// calm_to_frustrated | steady_calm
        #[arg(long)]
        tone_arc: Option<ToneArc>,

        /// IANA timezone name
        #[arg(long)]
        timezone: Option<Timezone>,
    },
    /// Clear all saved client state
    Reset,
    /// Initialize configuration
    Init,
    /// Show configuration
    Info,
    /// Show version
    Version,
}

/// `RUST_LOG` wins; otherwise the configured level (`BUGTRAIL_LOG` or
/// `server.log_level`).
fn init_tracing(configured: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(configured).unwrap_or_else(|e| {
            eprintln!(
                "WARN: log level '{configured}' is not a valid tracing filter ({e}); \
                 falling back to '{DEFAULT_LOG_LEVEL}'"
            );
            EnvFilter::new(DEFAULT_LOG_LEVEL)
        })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A broken config file is reported by the command itself.
    let log_level = Config::load()
        .map(|config| config.server.log_level)
        .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());
    init_tracing(&log_level);

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { bind } => ServeStrategy.execute(ServeInput { bind }).await,
        Commands::Chat {
            scenario,
            offline,
            message,
        } => {
            ChatStrategy
                .execute(ChatInput {
                    scenario,
                    offline,
                    message,
                })
                .await
        }
        Commands::Extract { format } => ExtractStrategy.execute(ExtractInput { format }).await,
        Commands::Export { format } => ExportStrategy.execute(ExportInput { format }).await,
        Commands::Scenarios => ScenariosStrategy.execute(()).await,
        Commands::Persona {
            industry,
            tech_savvy,
            patience,
            tone_arc,
            timezone,
        } => {
            PersonaStrategy
                .execute(PersonaInput {
                    industry,
                    tech_savvy,
                    patience,
                    tone_arc,
                    timezone,
                })
                .await
        }
        Commands::Reset => ResetStrategy.execute(()).await,
        Commands::Init => InitStrategy.execute(()).await,
        Commands::Info => InfoStrategy.execute(()).await,
        Commands::Version => VersionStrategy.execute(()).await,
    }
}
