use bugtrail_config::{AgentDefaults, Config};

/// Print the effective configuration with the API key masked.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;

        println!("=== BugTrail Configuration ===\n");

        println!("Config file: {}", Config::config_path()?.display());
        println!();

        println!("Provider:");
        let openai = &config.providers.openai;
        println!("  API Key: {}", mask_key(config.api_key()));
        println!("  Base URL: {}", openai.base_url);
        println!("  Model: {}", openai.model);
        println!("  Timeout: {}s", openai.timeout_secs);
        println!(
            "  Mode: {}",
            if config.api_key().is_some() {
                "online (offline fallback on failure)"
            } else {
                "offline"
            }
        );
        println!();

        println!("Agents:");
        print_agent("Roleplay", config.agents.roleplay);
        print_agent("Extractor", config.agents.extractor);
        println!();

        println!("Server:");
        println!("  Bind Address: {}", config.server.bind_address);
        println!(
            "  CORS Origins: {}",
            config
                .server
                .cors_allowed_origins
                .as_deref()
                .unwrap_or("(any)")
        );
        println!("  Log Level: {}", config.server.log_level);
        println!();

        println!("Storage:");
        println!("  State Dir: {}", config.state_dir()?.display());

        Ok(())
    }
}

fn print_agent(name: &str, defaults: AgentDefaults) {
    println!(
        "  {name}: max_tokens={}, temperature={}",
        defaults.max_tokens, defaults.temperature
    );
}

fn mask_key(key: Option<&str>) -> String {
    match key {
        None => "(not set)".to_string(),
        Some(key) if key.chars().count() > 8 => {
            let head: String = key.chars().take(4).collect();
            let tail: String = key
                .chars()
                .rev()
                .take(4)
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            format!("{head}...{tail}")
        }
        Some(_) => "***".to_string(),
    }
}
