//! Configuration management for the EduSync client.
//!
//! This module handles loading and validating configuration from environment variables.
//! A `.env` file in the working directory is honored when present.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default freshness window of the fetch cache in milliseconds.
pub const DEFAULT_CACHE_TTL_MS: u64 = 30_000;

/// Configuration for the EduSync client.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL, e.g. `https://host/api`
    pub api_base_url: String,

    /// Fetch cache freshness window in milliseconds (default: 30000)
    pub cache_ttl_ms: u64,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Where to persist the bearer token; in-memory only when unset
    pub token_file: Option<PathBuf>,

    /// Log level used when `RUST_LOG` is not set (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `EDUSYNC_API_BASE_URL`: Base URL for the backend API
    ///
    /// Optional environment variables:
    /// - `EDUSYNC_CACHE_TTL_MS`: Fetch cache window in milliseconds (default: 30000)
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `EDUSYNC_TOKEN_FILE`: Path of the persisted bearer token
    /// - `LOG_LEVEL`: Logging level (default: "info")
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        let api_base_url = env::var("EDUSYNC_API_BASE_URL")
            .map_err(|_| ConfigError::MissingVar("EDUSYNC_API_BASE_URL".to_string()))?;

        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "EDUSYNC_API_BASE_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        let cache_ttl_ms = Self::parse_env_u64("EDUSYNC_CACHE_TTL_MS", DEFAULT_CACHE_TTL_MS)?;
        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;

        if request_timeout == 0 {
            return Err(ConfigError::InvalidValue {
                var: "REQUEST_TIMEOUT".to_string(),
                reason: "Must be greater than zero".to_string(),
            });
        }

        let token_file = env::var("EDUSYNC_TOKEN_FILE")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            api_base_url,
            cache_ttl_ms,
            request_timeout,
            token_file,
            log_level,
        })
    }

    /// Build a config for the given base URL with every other field defaulted.
    pub fn with_base_url(api_base_url: impl Into<String>) -> Self {
        Config {
            api_base_url: api_base_url.into(),
            ..Config::default()
        }
    }

    /// The fetch cache window as a `Duration`.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.cache_ttl_ms)
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: String::new(),
            cache_ttl_ms: DEFAULT_CACHE_TTL_MS,
            request_timeout: 10,
            token_file: None,
            log_level: "info".to_string(),
        }
    }
}
