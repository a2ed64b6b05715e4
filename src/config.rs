use crate::constants::*;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: String,
    pub data_path: String,
    pub session_secret: String,
    /// Browser origin allowed to call the API with credentials, if any.
    pub cors_origin: Option<String>,
    pub log_filter: String,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("SESSION_SECRET environment variable is required")]
    MissingSessionSecret,

    #[error("Invalid session secret: {0}")]
    InvalidSessionSecret(String),

    #[error("Invalid port number: {0}")]
    InvalidPort(String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests do not have to
    /// mutate the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("SERVER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = lookup("SERVER_PORT").unwrap_or_else(|| DEFAULT_PORT.to_string());
        let data_path = lookup("DATABASE_PATH").unwrap_or_else(|| DEFAULT_DATA_PATH.to_string());
        let log_filter = lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        let cors_origin = lookup("CORS_ORIGIN").filter(|origin| !origin.trim().is_empty());

        if port.parse::<u16>().is_err() {
            return Err(ConfigError::InvalidPort(port));
        }

        let session_secret = lookup("SESSION_SECRET").ok_or(ConfigError::MissingSessionSecret)?;

        if session_secret.len() < MIN_SESSION_SECRET_LENGTH {
            return Err(ConfigError::InvalidSessionSecret(format!(
                "must be at least {} bytes long",
                MIN_SESSION_SECRET_LENGTH
            )));
        }

        Ok(Config {
            host,
            port,
            data_path,
            session_secret,
            cors_origin,
            log_filter,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
