use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE: &str = "parity.toml";

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error occurred while reading config file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error occurred
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Main configuration structure for Parity
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Remote-application platform settings
    #[serde(default)]
    pub platform: PlatformConfig,
    /// Application conventions used by deploys and shells
    #[serde(default)]
    pub app: AppConfig,
    /// Local development settings
    #[serde(default)]
    pub development: DevelopmentConfig,
}

/// Remote-application platform settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct PlatformConfig {
    /// CLI executable used for every remote command
    pub cli: String,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            cli: "heroku".to_string(),
        }
    }
}

/// Application conventions
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Command run remotely by `console`
    pub console: String,
    /// Task run remotely when migrations are pending
    pub migrate_task: String,
    /// Build/task manifest that marks a migration-capable app
    pub manifest: String,
    /// Directory holding schema migrations
    pub migrations_dir: String,
    /// Remote config variable holding the cache connection string
    pub cache_url_var: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            console: "rails console".to_string(),
            migrate_task: "rake db:migrate".to_string(),
            manifest: "Rakefile".to_string(),
            migrations_dir: "db/migrate".to_string(),
            cache_url_var: "REDIS_URL".to_string(),
        }
    }
}

/// Local development settings
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct DevelopmentConfig {
    /// Local database that receives restored backups
    pub database: Option<String>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            tracing::debug!("Loading configuration from {}", path.display());
            Self::from_file(path)
        } else {
            tracing::debug!("No {} found, using defaults", path.display());
            Ok(Self::default())
        }
    }
}
