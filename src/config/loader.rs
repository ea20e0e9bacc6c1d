//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::AgentConfig;

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(msg) => write!(f, "Validation failed: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AgentConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: AgentConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    validate_config(&config)?;

    Ok(config)
}

/// Semantic checks beyond what serde enforces.
fn validate_config(config: &AgentConfig) -> Result<(), ConfigError> {
    if let Some(host) = &config.haproxy.host {
        if host.is_empty() {
            return Err(ConfigError::Validation(
                "haproxy.host must not be empty".to_string(),
            ));
        }
    }
    if let Some(backend) = &config.backend {
        if backend.is_empty() {
            return Err(ConfigError::Validation(
                "backend must not be empty".to_string(),
            ));
        }
    }
    if config.haproxy.port == 0 {
        return Err(ConfigError::Validation(
            "haproxy.port must be non-zero".to_string(),
        ));
    }
    if config.daemon.interval_secs == 0 {
        return Err(ConfigError::Validation(
            "daemon.interval_secs must be at least 1".to_string(),
        ));
    }
    Ok(())
}
