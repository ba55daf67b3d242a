//! Server configuration.
//!
//! Loaded from environment variables with fallback to defaults.

use std::env;

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port.
    pub http_port: u16,

    /// Path to the SQLite database file.
    pub database_path: String,
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// * `HTTP_PORT` - listen port (default 3000)
    /// * `DATABASE_PATH` - SQLite file path (default ./atrium.db)
    pub fn load() -> Result<Self, ConfigError> {
        let http_port = env::var("HTTP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("HTTP_PORT".to_string()))?;

        let database_path =
            env::var("DATABASE_PATH").unwrap_or_else(|_| "./atrium.db".to_string());

        Ok(ServerConfig {
            http_port,
            database_path,
        })
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
