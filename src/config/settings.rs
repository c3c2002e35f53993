use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "https://router.huggingface.co/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "Qwen/Qwen3-0.6B:fireworks-ai";
pub const DEFAULT_API_KEY_ENV: &str = "HF_API_TOKEN";

/// Environment variables read once at startup
pub const ENV_ENDPOINT: &str = "HF_API_URL";
pub const ENV_MODEL: &str = "HF_MODEL_ID";
pub const ENV_LOG_PATH: &str = "AI_CLI_LOG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Config directory not found")]
    DirectoryNotFound,

    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub execution: ExecutionConfig,
    #[serde(default)]
    pub audit: AuditConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct GatewayConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key_env: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ExecutionConfig {
    pub timeout_seconds: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct AuditConfig {
    pub log_path: PathBuf,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            api_key: None,
            timeout_seconds: 120,
        }
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 300,
            working_dir: None,
        }
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            log_path: home.join(".ai-cli").join("logs.txt"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl GatewayConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl ExecutionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Config {
    /// Get the config directory path: ~/.config/hostai
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::DirectoryNotFound)?;
        Ok(home.join(".config").join("hostai"))
    }

    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load the default config file, falling back to defaults when it is absent
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default_config());
        }

        Self::load_from(&path)
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;

        config.validate()?;

        Ok(config)
    }

    /// Create default configuration
    pub fn default_config() -> Self {
        Config {
            gateway: GatewayConfig::default(),
            execution: ExecutionConfig::default(),
            audit: AuditConfig::default(),
        }
    }

    /// Apply environment overrides through a lookup function
    ///
    /// `main` passes `std::env::var`; tests pass a map. The credential itself
    /// is resolved the same way, so nothing else reads the environment.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(endpoint) = non_empty(ENV_ENDPOINT) {
            self.gateway.endpoint = endpoint;
        }
        if let Some(model) = non_empty(ENV_MODEL) {
            self.gateway.model = model;
        }
        if let Some(log_path) = non_empty(ENV_LOG_PATH) {
            self.audit.log_path = PathBuf::from(log_path);
        }
        if let Some(key) = non_empty(&self.gateway.api_key_env) {
            self.gateway.api_key = Some(key);
        }

        self.validate()
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gateway.endpoint.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "gateway.endpoint must not be empty".to_string(),
            ));
        }

        if self.gateway.model.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "gateway.model must not be empty".to_string(),
            ));
        }

        if self.gateway.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue(
                "gateway.timeout_seconds must be greater than 0".to_string(),
            ));
        }

        if self.execution.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue(
                "execution.timeout_seconds must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the backend credential, if one was configured
    pub fn api_key(&self) -> Option<&str> {
        self.gateway.api_key.as_deref().filter(|k| !k.is_empty())
    }
}
