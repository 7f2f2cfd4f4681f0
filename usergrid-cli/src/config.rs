//! Front-end configuration from the environment.
//!
//! A `.env` file in the working directory is loaded first, so every variable
//! can also live there.

use std::time::Duration;

use simplelog::LevelFilter;

/// Base URL used when `USERGRID_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "https://dummyjson.com";

const API_URL: &str = "USERGRID_API_URL";
const LOG_LEVEL: &str = "USERGRID_LOG_LEVEL";
const ENDPOINT_FILTERS: &str = "USERGRID_ENDPOINT_FILTERS";
const TIMEOUT_SECS: &str = "USERGRID_TIMEOUT_SECS";

/// Invalid configuration value.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name}: invalid log level {value:?} (expected off, error, warn, info, debug or trace)")]
    LogLevel { name: &'static str, value: String },

    #[error("{name}: invalid flag {value:?} (expected true or false)")]
    Flag { name: &'static str, value: String },

    #[error("{name}: invalid number {value:?}")]
    Number { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    pub api_url: String,
    pub log_level: LevelFilter,
    pub endpoint_filters: bool,
    pub timeout: Duration,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            log_level: LevelFilter::Info,
            endpoint_filters: false,
            timeout: Duration::from_secs(30),
        }
    }
}

impl CliConfig {
    /// Reads `.env` and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source. Unset or blank variables keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get(API_URL) {
            config.api_url = url.trim().to_string();
        }
        if let Some(level) = get(LOG_LEVEL) {
            config.log_level = level
                .trim()
                .parse()
                .map_err(|_| ConfigError::LogLevel {
                    name: LOG_LEVEL,
                    value: level,
                })?;
        }
        if let Some(flag) = get(ENDPOINT_FILTERS) {
            config.endpoint_filters = parse_flag(&flag).ok_or(ConfigError::Flag {
                name: ENDPOINT_FILTERS,
                value: flag,
            })?;
        }
        if let Some(secs) = get(TIMEOUT_SECS) {
            let parsed = secs.trim().parse::<u64>().map_err(|_| ConfigError::Number {
                name: TIMEOUT_SECS,
                value: secs.clone(),
            })?;
            config.timeout = Duration::from_secs(parsed);
        }

        Ok(config)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
