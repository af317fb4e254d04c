use anyhow::{anyhow, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::errors::AppError;
use crate::language_utils::{is_auto_detect, validate_language_code};
use crate::providers::mymemory::DEFAULT_ENDPOINT;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// External translation service settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Fallback dictionary settings
    #[serde(default)]
    pub dictionary: DictionaryConfig,

    /// Source language used by the CLI when none is given
    #[serde(default = "default_source_language")]
    pub default_source_language: String,

    /// Target language used by the CLI when none is given
    #[serde(default = "default_target_language")]
    pub default_target_language: String,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// HTTP server configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    /// Address to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// External provider configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: When false the relay answers from the dictionary only
    #[serde(default = "default_true")]
    pub enabled: bool,

    // @field: MyMemory `get` endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    // @field: Request timeout; none means the HTTP client default
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            endpoint: default_endpoint(),
            timeout_secs: None,
        }
    }
}

/// Dictionary configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct DictionaryConfig {
    /// Optional JSON file merged over the built-in entries
    #[serde(default)]
    pub extension_path: Option<String>,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching filter for the log crate
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_true() -> bool {
    true
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_source_language() -> String {
    "auto".to_string()
}

fn default_target_language() -> String {
    "fr".to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(anyhow!("Server port must not be 0"));
        }

        if self.provider.enabled {
            url::Url::parse(&self.provider.endpoint)
                .map_err(|e| anyhow!("Invalid provider endpoint '{}': {}", self.provider.endpoint, e))?;
        }

        if self.provider.timeout_secs == Some(0) {
            return Err(anyhow!("Provider timeout must be at least 1 second"));
        }

        if !is_auto_detect(&self.default_source_language) {
            validate_language_code(&self.default_source_language)?;
        }
        validate_language_code(&self.default_target_language)?;

        Ok(())
    }

    /// Load the configuration file, or write a default one when it does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path)
                .map_err(|e| AppError::File(format!("Failed to open config file {}: {}", path.display(), e)))?;
            let config: Config = serde_json::from_reader(BufReader::new(file))
                .map_err(|e| AppError::Config(format!("Failed to parse config file {}: {}", path.display(), e)))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)?;
        std::fs::write(path, config_json)?;

        Ok(config)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig::default(),
            provider: ProviderConfig::default(),
            dictionary: DictionaryConfig::default(),
            default_source_language: default_source_language(),
            default_target_language: default_target_language(),
            log_level: LogLevel::default(),
        }
    }
}
