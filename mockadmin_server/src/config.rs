//! Relay configuration loaded from environment variables

use mockadmin_common::defaults;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,

    /// Port the relay and dashboard listen on
    pub port: u16,

    /// Host of the MockServer instance being administered
    pub mockserver_host: String,

    /// Port of the MockServer instance being administered
    pub mockserver_port: u16,

    /// Timeout for each call to MockServer
    pub mockserver_timeout: Duration,

    /// Log entries per page in the dashboard's log view
    pub logs_page_size: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: var("PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidPort("PORT"))?,
            mockserver_host: var("MOCKSERVER_HOST").unwrap_or_else(|| "localhost".to_string()),
            mockserver_port: var("MOCKSERVER_PORT")
                .unwrap_or_else(|| "1080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidPort("MOCKSERVER_PORT"))?,
            mockserver_timeout: Duration::from_secs(
                var("MOCKSERVER_TIMEOUT_SECS")
                    .unwrap_or_else(|| "10".to_string())
                    .parse()
                    .map_err(|_| ConfigError::InvalidNumber("MOCKSERVER_TIMEOUT_SECS"))?,
            ),
            logs_page_size: match var("LOGS_PAGE_SIZE") {
                Some(raw) => match raw.parse::<usize>() {
                    Ok(size) if size > 0 => size,
                    _ => return Err(ConfigError::InvalidNumber("LOGS_PAGE_SIZE")),
                },
                None => defaults::PAGE_SIZE,
            },
        })
    }

    /// Base URL of the MockServer instance (e.g., "http://localhost:1080")
    pub fn mockserver_url(&self) -> String {
        format!("http://{}:{}", self.mockserver_host, self.mockserver_port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number in {0}")]
    InvalidPort(&'static str),

    #[error("Invalid number in {0}")]
    InvalidNumber(&'static str),
}
