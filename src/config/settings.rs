use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Config directory not found")]
    DirectoryNotFound,

    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub llm: LLMConfig,
    pub behavior: BehaviorConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LLMConfig {
    pub provider: String,
    pub model: String,
    pub api_key_env: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub enrichment_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BehaviorConfig {
    pub log_suggestions: bool,
    pub max_commits_display: usize,
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        let home = std::env::var("HOME").map_err(|_| ConfigError::DirectoryNotFound)?;
        Ok(PathBuf::from(home).join(".config").join("gitpilot"))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from file, falling back to defaults when the file
    /// does not exist
    pub fn load_or_default() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default_config());
        }

        let contents = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<(), ConfigError> {
        self.validate()?;

        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)?;

        let path = Self::config_path()?;
        let contents = toml::to_string_pretty(self)?;

        fs::write(&path, contents)?;

        // Set permissions to 600 (owner read/write only)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// Create default configuration
    pub fn default_config() -> Self {
        Config {
            llm: LLMConfig {
                provider: "anthropic".to_string(),
                model: "claude-sonnet-4-5-20250929".to_string(),
                api_key_env: "ANTHROPIC_API_KEY".to_string(),
                api_key: None,
                enrichment_timeout_secs: 15,
            },
            behavior: BehaviorConfig {
                log_suggestions: true,
                max_commits_display: 5,
            },
        }
    }

    /// Validate configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        if self.llm.provider != "anthropic" {
            return Err(ConfigError::InvalidValue(format!(
                "Unsupported LLM provider: {}. Only 'anthropic' is supported in v1",
                self.llm.provider
            )));
        }

        if !self.llm.model.starts_with("claude-") {
            return Err(ConfigError::InvalidValue(format!(
                "Invalid model name: {}. Must be a Claude model",
                self.llm.model
            )));
        }

        if self.llm.enrichment_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "enrichment_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.behavior.max_commits_display == 0 {
            return Err(ConfigError::InvalidValue(
                "max_commits_display must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Get API key from environment variable or config
    pub fn get_api_key(&self) -> Option<String> {
        if let Ok(key) = std::env::var(&self.llm.api_key_env) {
            if !key.is_empty() {
                return Some(key);
            }
        }

        self.llm.api_key.clone()
    }

    /// Check if API key is available
    pub fn has_api_key(&self) -> bool {
        self.get_api_key().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_config();
        assert_eq!(config.llm.provider, "anthropic");
        assert!(config.llm.model.starts_with("claude-"));
        assert_eq!(config.llm.api_key_env, "ANTHROPIC_API_KEY");
        assert!(config.behavior.log_suggestions);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_provider() {
        let mut config = Config::default_config();
        config.llm.provider = "openai".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_invalid_model() {
        let mut config = Config::default_config();
        config.llm.model = "gpt-4".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = Config::default_config();
        config.llm.enrichment_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_api_key_from_env() {
        unsafe {
            std::env::set_var("GITPILOT_TEST_API_KEY", "test-key-123");
        }
        let mut config = Config::default_config();
        config.llm.api_key_env = "GITPILOT_TEST_API_KEY".to_string();

        assert_eq!(config.get_api_key(), Some("test-key-123".to_string()));
        assert!(config.has_api_key());

        unsafe {
            std::env::remove_var("GITPILOT_TEST_API_KEY");
        }
    }

    #[test]
    fn test_api_key_from_config() {
        let mut config = Config::default_config();
        config.llm.api_key_env = "NONEXISTENT_VAR".to_string();
        config.llm.api_key = Some("config-key-456".to_string());

        assert_eq!(config.get_api_key(), Some("config-key-456".to_string()));
        assert!(config.has_api_key());
    }

    #[test]
    fn test_serialize_deserialize() {
        let config = Config::default_config();
        let toml = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();

        assert_eq!(config.llm.provider, parsed.llm.provider);
        assert_eq!(config.llm.model, parsed.llm.model);
    }
}
