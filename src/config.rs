//! Configuration management for the Skycast core
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings. The provider
//! API key always comes from configuration, never from source.

use crate::SkycastError;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the Skycast core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkycastConfig {
    /// Weather provider API configuration
    pub api: ApiConfig,
    /// Snapshot cache configuration
    pub cache: CacheConfig,
    /// City search configuration
    pub search: SearchConfig,
    /// Geolocation configuration
    pub location: LocationConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Weather provider API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// OpenWeatherMap API key (env: `SKYCAST_API__KEY`)
    pub key: Option<String>,
    /// Base URL for weather endpoints
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
    /// Base URL for geocoding endpoints
    #[serde(default = "default_geo_base_url")]
    pub geo_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_api_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of automatic retries for transient failures
    #[serde(default = "default_api_max_retries")]
    pub max_retries: u32,
}

/// Snapshot cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Freshness window in minutes; cached snapshots younger than this
    /// are served without a network round trip
    #[serde(default = "default_cache_freshness")]
    pub freshness_minutes: u64,
}

/// City search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum number of search results to request
    #[serde(default = "default_search_limit")]
    pub limit: u32,
    /// Quiet period before a typed query is submitted, in milliseconds
    #[serde(default = "default_search_debounce")]
    pub debounce_ms: u64,
}

/// Geolocation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Bounded wait for a one-shot position fix, in seconds
    #[serde(default = "default_location_timeout")]
    pub timeout_seconds: u64,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_api_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_geo_base_url() -> String {
    "https://api.openweathermap.org/geo/1.0".to_string()
}

fn default_api_timeout() -> u32 {
    10
}

fn default_api_max_retries() -> u32 {
    2
}

fn default_cache_freshness() -> u64 {
    5
}

fn default_search_limit() -> u32 {
    5
}

fn default_search_debounce() -> u64 {
    300
}

fn default_location_timeout() -> u64 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for SkycastConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                key: None,
                base_url: default_api_base_url(),
                geo_url: default_geo_base_url(),
                timeout_seconds: default_api_timeout(),
                max_retries: default_api_max_retries(),
            },
            cache: CacheConfig {
                freshness_minutes: default_cache_freshness(),
            },
            search: SearchConfig {
                limit: default_search_limit(),
                debounce_ms: default_search_debounce(),
            },
            location: LocationConfig {
                timeout_seconds: default_location_timeout(),
            },
            logging: LoggingConfig {
                level: default_log_level(),
                format: default_log_format(),
            },
        }
    }
}

impl SkycastConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self, SkycastError> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self, SkycastError> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides with SKYCAST_ prefix, e.g. SKYCAST_API__KEY
        builder = builder.add_source(
            Environment::with_prefix("SKYCAST")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| SkycastError::config(format!("Failed to build configuration: {e}")))?;

        let config: SkycastConfig = settings
            .try_deserialize()
            .map_err(|e| SkycastError::config(format!("Failed to deserialize configuration: {e}")))?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("skycast").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<(), SkycastError> {
        self.validate_api()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate the API key and endpoint URLs
    fn validate_api(&self) -> Result<(), SkycastError> {
        let key = self.api.key.as_deref().unwrap_or_default();

        if key.is_empty() {
            return Err(SkycastError::config(
                "Weather API key is required. Set SKYCAST_API__KEY or add it to the config file.",
            ));
        }

        if key.len() < 8 {
            return Err(SkycastError::config(
                "Weather API key appears to be invalid (too short). Please check your API key.",
            ));
        }

        if key.len() > 100 {
            return Err(SkycastError::config(
                "Weather API key appears to be invalid (too long). Please check your API key.",
            ));
        }

        for url in [&self.api.base_url, &self.api.geo_url] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(SkycastError::config(
                    "API base URLs must be valid HTTP or HTTPS URLs",
                ));
            }
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<(), SkycastError> {
        if self.api.timeout_seconds == 0 || self.api.timeout_seconds > 300 {
            return Err(SkycastError::config(
                "API timeout must be between 1 and 300 seconds",
            ));
        }

        if self.api.max_retries > 10 {
            return Err(SkycastError::config("API max retries cannot exceed 10"));
        }

        if self.cache.freshness_minutes > 1440 {
            return Err(SkycastError::config(
                "Cache freshness window cannot exceed 1440 minutes (1 day)",
            ));
        }

        if self.search.limit == 0 || self.search.limit > 10 {
            return Err(SkycastError::config(
                "Search result limit must be between 1 and 10",
            ));
        }

        if self.location.timeout_seconds == 0 || self.location.timeout_seconds > 60 {
            return Err(SkycastError::config(
                "Geolocation timeout must be between 1 and 60 seconds",
            ));
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<(), SkycastError> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(SkycastError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            )));
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(SkycastError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            )));
        }

        Ok(())
    }
}
