//! Runtime configuration.
//!
//! Values come from the environment first and can be overridden by CLI
//! flags through the builder methods.
//!
//! # Example
//!
//! ```ignore
//! use resume_chat::config::ChatConfig;
//!
//! let config = ChatConfig::from_env()?.with_base_url("http://10.0.0.5:8000");
//! ```

use std::time::Duration;

use thiserror::Error;

use crate::client::DEFAULT_BASE_URL;

pub const URL_ENV: &str = "RESUME_CHAT_URL";
pub const HEALTH_INTERVAL_ENV: &str = "RESUME_CHAT_HEALTH_INTERVAL_SECS";
pub const LOG_ENV: &str = "RESUME_CHAT_LOG";

pub const DEFAULT_HEALTH_INTERVAL_SECS: u64 = 30;
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Invalid configuration value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a positive number of seconds, got {value:?}")]
    InvalidInterval { var: &'static str, value: String },

    #[error("{var} must be an http(s) URL, got {value:?}")]
    InvalidUrl { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Base URL of the chat server
    pub base_url: String,
    /// How often the health monitor polls
    pub health_interval: Duration,
    /// `tracing` filter directive
    pub log_filter: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            health_interval: Duration::from_secs(DEFAULT_HEALTH_INTERVAL_SECS),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ChatConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_health_interval(mut self, interval: Duration) -> Self {
        self.health_interval = interval;
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`; unset or blank values keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get(URL_ENV) {
            config.base_url = validate_url(URL_ENV, url.trim())?;
        }

        if let Some(raw) = get(HEALTH_INTERVAL_ENV) {
            config.health_interval = parse_interval(HEALTH_INTERVAL_ENV, &raw)?;
        }

        if let Some(filter) = get(LOG_ENV) {
            config.log_filter = filter;
        }

        Ok(config)
    }
}

/// Accept only absolute http(s) URLs.
pub fn validate_url(var: &'static str, value: &str) -> Result<String, ConfigError> {
    let ok = ["http://", "https://"]
        .iter()
        .any(|scheme| value.starts_with(scheme) && value.len() > scheme.len());
    if ok {
        Ok(value.to_string())
    } else {
        Err(ConfigError::InvalidUrl {
            var,
            value: value.to_string(),
        })
    }
}

fn parse_interval(var: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidInterval {
            var,
            value: raw.to_string(),
        }),
    }
}
