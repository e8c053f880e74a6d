use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const CONFIG_DIR_NAME: &str = "bugtrail";
const CONFIG_FILE_NAME: &str = "config.json";
const API_KEY_PLACEHOLDER: &str = "your-openai-api-key-here";

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub agents: AgentsConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub openai: ProviderConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProviderConfig {
    /// Empty means no credential: every request runs offline.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "ProviderConfig::default_base_url")]
    pub base_url: String,
    #[serde(default = "ProviderConfig::default_model")]
    pub model: String,
    /// Upper bound on one completion request, connect included.
    #[serde(default = "ProviderConfig::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: Self::default_base_url(),
            model: Self::default_model(),
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}

impl ProviderConfig {
    fn default_base_url() -> String {
        "https://api.openai.com/v1".to_string()
    }

    fn default_model() -> String {
        "gpt-4o-mini".to_string()
    }

    const fn default_timeout_secs() -> u64 {
        30
    }
}

/// Sampling settings for one kind of model call.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct AgentDefaults {
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AgentsConfig {
    #[serde(default = "AgentsConfig::default_roleplay")]
    pub roleplay: AgentDefaults,
    #[serde(default = "AgentsConfig::default_extractor")]
    pub extractor: AgentDefaults,
}

impl Default for AgentsConfig {
    fn default() -> Self {
        Self {
            roleplay: Self::default_roleplay(),
            extractor: Self::default_extractor(),
        }
    }
}

impl AgentsConfig {
    const fn default_roleplay() -> AgentDefaults {
        AgentDefaults {
            max_tokens: 400,
            temperature: 0.3,
        }
    }

    const fn default_extractor() -> AgentDefaults {
        AgentDefaults {
            max_tokens: 600,
            temperature: 0.2,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "ServerConfig::default_bind_address")]
    pub bind_address: String,
    /// Comma-separated origins; `None` allows any origin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cors_allowed_origins: Option<String>,
    /// `tracing` filter, e.g. `"info"` or `"debug,tower_http=warn"`.
    #[serde(default = "ServerConfig::default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: Self::default_bind_address(),
            cors_allowed_origins: None,
            log_level: Self::default_log_level(),
        }
    }
}

impl ServerConfig {
    fn default_bind_address() -> String {
        "127.0.0.1:3000".to_string()
    }

    fn default_log_level() -> String {
        "info".to_string()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct StorageConfig {
    /// Directory for the client-local state slots. Defaults to
    /// `~/bugtrail/state`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_dir: Option<PathBuf>,
}

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join(CONFIG_DIR_NAME))
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load `~/bugtrail/config.json` if present, otherwise defaults, then
    /// apply environment overrides.
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;
        let config = if config_path.exists() {
            info!("Loading config from {}", config_path.display());
            Self::load_from(&config_path)?
        } else {
            debug!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            Self::default()
        };
        Ok(config.with_env_overrides(|key| std::env::var(key).ok()))
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Apply `OPENAI_API_KEY`, `OPENAI_MODEL`, `OPENAI_BASE_URL`,
    /// `BUGTRAIL_BIND`, `BUGTRAIL_LOG`, `BUGTRAIL_CORS_ORIGINS` and
    /// `BUGTRAIL_STATE_DIR` as returned by `lookup`.
    #[must_use]
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = lookup("OPENAI_API_KEY") {
            self.providers.openai.api_key = key;
        }
        if let Some(model) = lookup("OPENAI_MODEL") {
            self.providers.openai.model = model;
        }
        if let Some(url) = lookup("OPENAI_BASE_URL") {
            self.providers.openai.base_url = url;
        }
        if let Some(bind) = lookup("BUGTRAIL_BIND") {
            self.server.bind_address = bind;
        }
        if let Some(level) = lookup("BUGTRAIL_LOG") {
            self.server.log_level = level;
        }
        if let Some(origins) = lookup("BUGTRAIL_CORS_ORIGINS") {
            self.server.cors_allowed_origins = Some(origins);
        }
        if let Some(dir) = lookup("BUGTRAIL_STATE_DIR") {
            self.storage.state_dir = Some(PathBuf::from(dir));
        }
        self
    }

    /// The usable API key, if any. Blank keys and the template placeholder
    /// count as absent.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        let key = self.providers.openai.api_key.trim();
        (!key.is_empty() && key != API_KEY_PLACEHOLDER).then_some(key)
    }

    pub fn state_dir(&self) -> anyhow::Result<PathBuf> {
        match &self.storage.state_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(Self::config_dir()?.join("state")),
        }
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        std::fs::write(&config_path, CONFIG_TEMPLATE)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Add your OpenAI API key (or set OPENAI_API_KEY)");
        println!("   2. Run 'bugtrail serve' to start the HTTP API");
        println!("   3. Or run 'bugtrail chat --scenario auth_reset_expired' in the terminal");
        println!();
        println!("🔧 Without an API key everything runs in offline mode.");
        println!();
        Ok(())
    }
}

const CONFIG_TEMPLATE: &str = r#"{
  "providers": {
    "openai": {
      "api_key": "your-openai-api-key-here",
      "base_url": "https://api.openai.com/v1",
      "model": "gpt-4o-mini",
      "timeout_secs": 30
    }
  },
  "agents": {
    "roleplay": {
      "max_tokens": 400,
      "temperature": 0.3
    },
    "extractor": {
      "max_tokens": 600,
      "temperature": 0.2
    }
  },
  "server": {
    "bind_address": "127.0.0.1:3000",
    "log_level": "info"
  }
}"#;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn template_parses_and_has_no_usable_key() {
        let config: Config = serde_json::from_str(CONFIG_TEMPLATE).expect("template is valid");

        assert_eq!(config.providers.openai.model, "gpt-4o-mini");
        assert_eq!(config.agents.roleplay.max_tokens, 400);
        assert_eq!(config.agents.extractor.max_tokens, 600);
        assert!(config.api_key().is_none());
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn empty_object_uses_defaults() {
        let config: Config = serde_json::from_str("{}").expect("empty config is valid");

        assert_eq!(config.server.bind_address, "127.0.0.1:3000");
        assert_eq!(config.server.log_level, "info");
        assert!((config.agents.roleplay.temperature - 0.3).abs() < f32::EPSILON);
        assert!(config.api_key().is_none());
    }

    #[test]
    fn env_overrides_apply() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("OPENAI_API_KEY", "sk-live"),
            ("OPENAI_MODEL", "gpt-4o"),
            ("BUGTRAIL_BIND", "0.0.0.0:8080"),
            ("BUGTRAIL_STATE_DIR", "/tmp/bt"),
            ("BUGTRAIL_LOG", "  "),
        ]);
        let config =
            Config::default().with_env_overrides(|k| env.get(k).map(|v| (*v).to_string()));

        assert_eq!(config.api_key(), Some("sk-live"));
        assert_eq!(config.providers.openai.model, "gpt-4o");
        assert_eq!(config.server.bind_address, "0.0.0.0:8080");
        assert_eq!(config.server.log_level, "info");
        assert_eq!(config.storage.state_dir, Some(PathBuf::from("/tmp/bt")));
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn load_from_reads_partial_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"providers":{"openai":{"api_key":"sk-file"}}}"#)
            .expect("write config");

        let config = Config::load_from(&path).expect("partial config loads");
        assert_eq!(config.api_key(), Some("sk-file"));
        assert_eq!(config.providers.openai.base_url, "https://api.openai.com/v1");
        assert_eq!(config.providers.openai.timeout_secs, 30);
    }

    #[test]
    fn explicit_state_dir_wins() {
        let mut config = Config::default();
        config.storage.state_dir = Some(PathBuf::from("/var/lib/bugtrail"));
        assert_eq!(
            config.state_dir().ok(),
            Some(PathBuf::from("/var/lib/bugtrail"))
        );
    }
}
