//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
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
    pub database_url: String,
    pub log_level: Level,
    /// Whether the in-process notification facility reports its permission as
    /// granted. Flipping this off models a user revoking the platform
    /// permission without touching any code path.
    pub notifications_enabled: bool,
    /// Fallback lead time applied when a client omits notification prefs.
    pub default_reminder_minutes: u32,
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

        // --- Load Server and Database Settings ---
        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingVar("DATABASE_URL".to_string()))?;

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Load Notification Settings ---
        let notifications_enabled_str =
            std::env::var("NOTIFICATIONS_ENABLED").unwrap_or_else(|_| "true".to_string());
        let notifications_enabled =
            notifications_enabled_str.parse::<bool>().map_err(|_| {
                ConfigError::InvalidValue(
                    "NOTIFICATIONS_ENABLED".to_string(),
                    format!("'{}' is not a valid boolean", notifications_enabled_str),
                )
            })?;

        let default_reminder_minutes_str =
            std::env::var("DEFAULT_REMINDER_MINUTES").unwrap_or_else(|_| "15".to_string());
        let default_reminder_minutes =
            default_reminder_minutes_str.parse::<u32>().map_err(|_| {
                ConfigError::InvalidValue(
                    "DEFAULT_REMINDER_MINUTES".to_string(),
                    format!("'{}' is not a valid minute count", default_reminder_minutes_str),
                )
            })?;

        Ok(Self {
            bind_address,
            database_url,
            log_level,
            notifications_enabled,
            default_reminder_minutes,
        })
    }
}
