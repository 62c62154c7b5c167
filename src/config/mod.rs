//! Configuration module for the VoiceNest Gateway.
//!
//! Configuration is environment-variable driven, with `.env` files loaded by
//! `dotenvy` before `ServerConfig::from_env()` runs. The two required values
//! (Cohere API key, transcription staging bucket) produce explicit errors when
//! absent; a missing credential is never silently defaulted.
//!
//! # Example
//! ```rust,no_run
//! use voicenest_gateway::config::ServerConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! println!("Server listening on {}", config.address());
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use thiserror::Error;

/// Default polling interval for the transcription job controller (seconds).
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// Default overall wait budget for a transcription job (seconds).
pub const DEFAULT_WAIT_BUDGET_SECS: u64 = 300;

/// Default per-call timeout for outbound HTTP requests (seconds).
///
/// Applies to the Cohere call and the transcript-document fetch so a single
/// stalled network call cannot consume the whole polling budget.
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVariable(&'static str),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Server configuration.
///
/// Everything here is read once at startup and treated as immutable for the
/// lifetime of the process; concurrent requests share it read-only.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    // Server settings
    pub host: String,
    pub port: u16,

    /// Cohere API key for the reply-generation service (required).
    pub cohere_api_key: String,

    /// S3 bucket used for staging audio uploads and transcription job output
    /// (required).
    pub transcribe_bucket: String,

    /// Interval between transcription job status checks.
    pub poll_interval: Duration,

    /// Maximum total wait for a transcription job before giving up.
    pub wait_budget: Duration,

    /// Per-call timeout for outbound HTTP requests to collaborators.
    pub upstream_timeout: Duration,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default | Notes |
    /// |---|---|---|
    /// | `VOICENEST_HOST` | `0.0.0.0` | |
    /// | `VOICENEST_PORT` | `8080` | |
    /// | `PROD_COHERE_API_KEY` | (none) | required |
    /// | `PROD_TRANSCRIBE_BUCKET` | (none) | required |
    /// | `VOICENEST_POLL_INTERVAL_SECS` | `5` | |
    /// | `VOICENEST_WAIT_BUDGET_SECS` | `300` | |
    /// | `VOICENEST_UPSTREAM_TIMEOUT_SECS` | `30` | |
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("VOICENEST_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = parse_var("VOICENEST_PORT", 8080u16)?;

        let cohere_api_key = require_var("PROD_COHERE_API_KEY")?;
        let transcribe_bucket = require_var("PROD_TRANSCRIBE_BUCKET")?;

        let poll_interval_secs =
            parse_var("VOICENEST_POLL_INTERVAL_SECS", DEFAULT_POLL_INTERVAL_SECS)?;
        let wait_budget_secs = parse_var("VOICENEST_WAIT_BUDGET_SECS", DEFAULT_WAIT_BUDGET_SECS)?;
        let upstream_timeout_secs = parse_var(
            "VOICENEST_UPSTREAM_TIMEOUT_SECS",
            DEFAULT_UPSTREAM_TIMEOUT_SECS,
        )?;

        Ok(Self {
            host,
            port,
            cohere_api_key,
            transcribe_bucket,
            poll_interval: Duration::from_secs(poll_interval_secs),
            wait_budget: Duration::from_secs(wait_budget_secs),
            upstream_timeout: Duration::from_secs(upstream_timeout_secs),
        })
    }

    /// Socket address string for the HTTP listener.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn require_var(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVariable(name)),
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
            name,
            value: value.clone(),
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for name in [
            "VOICENEST_HOST",
            "VOICENEST_PORT",
            "PROD_COHERE_API_KEY",
            "PROD_TRANSCRIBE_BUCKET",
            "VOICENEST_POLL_INTERVAL_SECS",
            "VOICENEST_WAIT_BUDGET_SECS",
            "VOICENEST_UPSTREAM_TIMEOUT_SECS",
        ] {
            unsafe { std::env::remove_var(name) };
        }
    }

    #[test]
    #[serial]
    fn missing_cohere_key_is_an_error() {
        clear_env();
        unsafe { std::env::set_var("PROD_TRANSCRIBE_BUCKET", "bucket") };

        let err = ServerConfig::from_env().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingVariable("PROD_COHERE_API_KEY")
        ));
    }

    #[test]
    #[serial]
    fn missing_bucket_is_an_error() {
        clear_env();
        unsafe { std::env::set_var("PROD_COHERE_API_KEY", "key") };

        let err = ServerConfig::from_env().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingVariable("PROD_TRANSCRIBE_BUCKET")
        ));
    }

    #[test]
    #[serial]
    fn defaults_apply_when_optional_vars_are_absent() {
        clear_env();
        unsafe {
            std::env::set_var("PROD_COHERE_API_KEY", "key");
            std::env::set_var("PROD_TRANSCRIBE_BUCKET", "bucket");
        }

        let config = ServerConfig::from_env().unwrap();
        assert_eq!(config.address(), "0.0.0.0:8080");
        assert_eq!(config.poll_interval, Duration::from_secs(5));
        assert_eq!(config.wait_budget, Duration::from_secs(300));
        assert_eq!(config.upstream_timeout, Duration::from_secs(30));
    }

    #[test]
    #[serial]
    fn invalid_port_is_an_error() {
        clear_env();
        unsafe {
            std::env::set_var("PROD_COHERE_API_KEY", "key");
            std::env::set_var("PROD_TRANSCRIBE_BUCKET", "bucket");
            std::env::set_var("VOICENEST_PORT", "not-a-port");
        }

        let err = ServerConfig::from_env().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                name: "VOICENEST_PORT",
                ..
            }
        ));
    }
}
