//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development. Scoring constants are intentionally not
//! here: they live as fixed constants in `reminder_core::domain`, because
//! retuning them between runs would corrupt the meaning of persisted XP.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    /// Where the user-progress snapshot is written after every mutation.
    pub progress_path: PathBuf,
    pub openai_api_key: Option<String>,
    pub suggestion_model: String,
    /// Bounded wait for a remote suggestion before falling back locally.
    pub suggestion_timeout: Duration,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let progress_path = std::env::var("PROGRESS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./user_progress.json"));

        // The API key is optional: without it the suggestion endpoints still
        // answer, using their local fallbacks.
        let openai_api_key = std::env::var("OPENAI_API_KEY").ok();

        let suggestion_model =
            std::env::var("SUGGESTION_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

        let timeout_str =
            std::env::var("SUGGESTION_TIMEOUT_SECS").unwrap_or_else(|_| "10".to_string());
        let timeout_secs = timeout_str.parse::<u64>().map_err(|e| {
            ConfigError::InvalidValue("SUGGESTION_TIMEOUT_SECS".to_string(), e.to_string())
        })?;

        Ok(Self {
            bind_address,
            log_level,
            progress_path,
            openai_api_key,
            suggestion_model,
            suggestion_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
