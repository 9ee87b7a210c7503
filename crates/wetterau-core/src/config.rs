use crate::error::{Result, WetterauError};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for the geocoding pipeline
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    /// Base URL of the geocoding service
    pub geocoder_url: ConfigValue<String>,
    /// User-Agent header sent with every lookup (required by Nominatim's
    /// usage policy)
    pub user_agent: ConfigValue<String>,
    /// Pause after each external request, in milliseconds
    pub request_delay_ms: ConfigValue<u64>,
    /// Maximum lookup attempts per address on timeout
    pub max_retries: ConfigValue<u32>,
    /// Location of the persistent geocode cache
    pub cache_path: ConfigValue<PathBuf>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            geocoder_url: ConfigValue::new(
                "https://nominatim.openstreetmap.org".to_string(),
                ConfigSource::Default,
            ),
            user_agent: ConfigValue::new("wetterau-mapper".to_string(), ConfigSource::Default),
            request_delay_ms: ConfigValue::new(1000, ConfigSource::Default),
            max_retries: ConfigValue::new(3, ConfigSource::Default),
            cache_path: ConfigValue::new(
                PathBuf::from("geocode_cache.json"),
                ConfigSource::Default,
            ),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| WetterauError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| WetterauError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        // Update values from file
        if let Some(url) = file_config.geocoder_url {
            self.geocoder_url.update(url, ConfigSource::File);
        }

        if let Some(agent) = file_config.user_agent {
            self.user_agent.update(agent, ConfigSource::File);
        }

        if let Some(delay) = file_config.request_delay_ms {
            self.request_delay_ms.update(delay, ConfigSource::File);
        }

        if let Some(retries) = file_config.max_retries {
            self.max_retries.update(retries, ConfigSource::File);
        }

        if let Some(path) = file_config.cache_path {
            self.cache_path.update(path, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        if let Ok(url) = env::var("WETTERAU_GEOCODER_URL") {
            self.geocoder_url.update(url, ConfigSource::Environment);
        }

        if let Ok(agent) = env::var("WETTERAU_USER_AGENT") {
            self.user_agent.update(agent, ConfigSource::Environment);
        }

        if let Ok(delay_str) = env::var("WETTERAU_REQUEST_DELAY_MS") {
            match delay_str.parse::<u64>() {
                Ok(delay) => self.request_delay_ms.update(delay, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid WETTERAU_REQUEST_DELAY_MS value '{}': expected milliseconds",
                    delay_str
                ),
            }
        }

        if let Ok(retries_str) = env::var("WETTERAU_MAX_RETRIES") {
            match retries_str.parse::<u32>() {
                Ok(retries) => self.max_retries.update(retries, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid WETTERAU_MAX_RETRIES value '{}': expected attempt count",
                    retries_str
                ),
            }
        }

        if let Ok(path) = env::var("WETTERAU_CACHE_PATH") {
            self.cache_path.update(PathBuf::from(path), ConfigSource::Environment);
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(url) = overrides.geocoder_url {
            self.geocoder_url.update(url, ConfigSource::Cli);
        }

        if let Some(agent) = overrides.user_agent {
            self.user_agent.update(agent, ConfigSource::Cli);
        }

        if let Some(delay) = overrides.request_delay_ms {
            self.request_delay_ms.update(delay, ConfigSource::Cli);
        }

        if let Some(retries) = overrides.max_retries {
            self.max_retries.update(retries, ConfigSource::Cli);
        }

        if let Some(path) = overrides.cache_path {
            self.cache_path.update(path, ConfigSource::Cli);
        }
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    geocoder_url: Option<String>,
    user_agent: Option<String>,
    request_delay_ms: Option<u64>,
    max_retries: Option<u32>,
    cache_path: Option<PathBuf>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub geocoder_url: Option<String>,
    pub user_agent: Option<String>,
    pub request_delay_ms: Option<u64>,
    pub max_retries: Option<u32>,
    pub cache_path: Option<PathBuf>,
}
