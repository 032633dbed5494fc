//! Bot configuration
//!
//! Defines all configurable parameters for the bot: credentials for the
//! review API and the messenger, the polling interval, and error
//! reporting options. Loaded once at startup; a missing credential stops
//! the process before the first poll.

use std::time::Duration;

use homework_client::DEFAULT_ENDPOINT;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Default seconds between poll cycles
pub const DEFAULT_RETRY_SECS: u64 = 600;

/// Default per-request HTTP timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Startup configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    MissingVar(&'static str),

    #[error("environment variable {var} has invalid value '{value}': {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("{0}")]
    Invalid(String),
}

/// Bot configuration
///
/// Secrets are wrapped in [`SecretString`] so `Debug` output and logs
/// never show them.
#[derive(Debug)]
pub struct Config {
    /// OAuth token for the review API
    pub practicum_token: SecretString,

    /// Telegram bot token (`<bot id>:<secret>`)
    pub telegram_token: SecretString,

    /// Chat that receives notifications
    pub telegram_chat_id: String,

    /// Review API statuses endpoint
    pub endpoint: String,

    /// Pause between poll cycles; also how far back each query reaches
    pub retry_interval: Duration,

    /// Timeout for every HTTP request
    pub request_timeout: Duration,

    /// Also send cycle failures to the chat
    pub notify_on_error: bool,

    /// Maximum number of remembered messages (`None` = unbounded)
    pub dedup_history_limit: Option<usize>,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new(
        practicum_token: impl Into<String>,
        telegram_token: impl Into<String>,
        telegram_chat_id: impl Into<String>,
    ) -> Self {
        Self {
            practicum_token: SecretString::from(practicum_token.into()),
            telegram_token: SecretString::from(telegram_token.into()),
            telegram_chat_id: telegram_chat_id.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            retry_interval: Duration::from_secs(DEFAULT_RETRY_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            notify_on_error: false,
            dedup_history_limit: None,
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - PRACTICUM_TOKEN (required)
    /// - TELEGRAM_TOKEN (required)
    /// - TELEGRAM_CHAT_ID (required)
    /// - RETRY_TIME (optional, seconds, default: 600)
    /// - REQUEST_TIMEOUT (optional, seconds, default: 30)
    /// - NOTIFY_ON_ERROR (optional, bool, default: false)
    /// - DEDUP_HISTORY_LIMIT (optional, default: unbounded)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup
    ///
    /// Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::MissingVar(key));

        let mut config = Self::new(
            require("PRACTICUM_TOKEN")?,
            require("TELEGRAM_TOKEN")?,
            require("TELEGRAM_CHAT_ID")?,
        );

        if let Some(value) = get("RETRY_TIME") {
            config.retry_interval = Duration::from_secs(parse_var("RETRY_TIME", &value)?);
        }

        if let Some(value) = get("REQUEST_TIMEOUT") {
            config.request_timeout = Duration::from_secs(parse_var("REQUEST_TIMEOUT", &value)?);
        }

        if let Some(value) = get("NOTIFY_ON_ERROR") {
            config.notify_on_error = parse_bool("NOTIFY_ON_ERROR", &value)?;
        }

        if let Some(value) = get("DEDUP_HISTORY_LIMIT") {
            config.dedup_history_limit = Some(parse_var("DEDUP_HISTORY_LIMIT", &value)?);
        }

        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.practicum_token.expose_secret().is_empty() {
            return Err(ConfigError::Invalid("practicum_token cannot be empty".into()));
        }

        if self.telegram_token.expose_secret().is_empty() {
            return Err(ConfigError::Invalid("telegram_token cannot be empty".into()));
        }

        if self.telegram_chat_id.is_empty() {
            return Err(ConfigError::Invalid("telegram_chat_id cannot be empty".into()));
        }

        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(ConfigError::Invalid(
                "endpoint must start with http:// or https://".into(),
            ));
        }

        if self.retry_interval.as_secs() == 0 {
            return Err(ConfigError::Invalid("retry_interval must be greater than 0".into()));
        }

        // The interval is subtracted from a Unix timestamp
        if i64::try_from(self.retry_interval.as_secs()).is_err() {
            return Err(ConfigError::Invalid("retry_interval is too large".into()));
        }

        if self.request_timeout.as_secs() == 0 {
            return Err(ConfigError::Invalid("request_timeout must be greater than 0".into()));
        }

        if self.dedup_history_limit == Some(0) {
            return Err(ConfigError::Invalid(
                "dedup_history_limit must be greater than 0".into(),
            ));
        }

        Ok(())
    }
}

fn parse_var<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidValue {
            var,
            value: value.to_string(),
            reason: e.to_string(),
        })
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var,
            value: value.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}
