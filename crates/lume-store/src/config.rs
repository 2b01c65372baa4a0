//! Application configuration.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults, so a plain `cargo run` works with zero setup.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use thiserror::Error;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the SQLite database file
    pub database_path: PathBuf,

    /// Maximum connections in the SQLite pool
    pub max_connections: u32,

    /// Session lifetime in seconds
    pub session_lifetime_secs: i64,

    /// Log filter directive (e.g. "lume_store=debug,info")
    pub log_filter: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// ## Environment Variables
    /// - `LUME_DATABASE_PATH` - database file location (default: `lume.db`)
    /// - `LUME_MAX_CONNECTIONS` - pool size (default: 5)
    /// - `LUME_SESSION_LIFETIME_SECS` - session TTL (default: 30 days)
    /// - `LUME_LOG` - tracing filter directive (default: `info`)
    pub fn load() -> Result<Self, ConfigError> {
        let config = AppConfig {
            database_path: env::var("LUME_DATABASE_PATH")
                .unwrap_or_else(|_| "lume.db".to_string())
                .into(),

            max_connections: env::var("LUME_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("LUME_MAX_CONNECTIONS".to_string()))?,

            session_lifetime_secs: env::var("LUME_SESSION_LIFETIME_SECS")
                .unwrap_or_else(|_| "2592000".to_string()) // 30 days
                .parse()
                .map_err(|_| {
                    ConfigError::InvalidValue("LUME_SESSION_LIFETIME_SECS".to_string())
                })?,

            log_filter: env::var("LUME_LOG").unwrap_or_else(|_| "info".to_string()),
        };

        if config.session_lifetime_secs <= 0 {
            return Err(ConfigError::InvalidValue(
                "LUME_SESSION_LIFETIME_SECS".to_string(),
            ));
        }

        Ok(config)
    }

    /// Session lifetime as a chrono duration.
    pub fn session_lifetime(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.session_lifetime_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_path: PathBuf::from("lume.db"),
            max_connections: 5,
            session_lifetime_secs: 2_592_000,
            log_filter: "info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable held a value that failed to parse or validate.
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.session_lifetime().num_days(), 30);
    }
}
