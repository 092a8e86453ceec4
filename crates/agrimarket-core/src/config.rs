//! Configuration management for the `AgriMarket` admin console

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Remote API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Console behavior configuration
    #[serde(default)]
    pub console: ConsoleConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the marketplace API, including the /api prefix
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// API token from a previous login, if one should be reused
    #[serde(default)]
    pub token: Option<String>,
}

/// Console behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Rows shown per table page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Default dashboard date range in days
    #[serde(default = "default_date_range_days")]
    pub default_date_range_days: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json or text)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_base_url() -> String {
    "http://127.0.0.1:8000/api".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_page_size() -> usize {
    50
}

const fn default_date_range_days() -> u32 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            token: None,
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            default_date_range_days: default_date_range_days(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        // Base URL may be injected through the environment outside of a
        // full config file
        let base_url =
            std::env::var("AGRIMARKET_API_BASE_URL").unwrap_or_else(|_| default_base_url());

        Self {
            api: ApiConfig {
                base_url,
                ..ApiConfig::default()
            },
            console: ConsoleConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from an optional `config` file plus
    /// `AGRIMARKET_`-prefixed environment variables
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the sources cannot be read or
    /// do not deserialize into [`Config`].
    pub fn load() -> crate::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("AGRIMARKET").separator("_"))
            .build()
            .map_err(|e| crate::Error::Configuration {
                message: e.to_string(),
            })?;

        config
            .try_deserialize()
            .map_err(|e| crate::Error::Configuration {
                message: e.to_string(),
            })
    }
}
