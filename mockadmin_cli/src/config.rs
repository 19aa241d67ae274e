//! CLI configuration management

use anyhow::{Context, Result};
use mockadmin_common::defaults;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Get the configuration directory path
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".mockadmin")
}

/// Get the config file path
pub fn config_file() -> PathBuf {
    config_dir().join("config.yml")
}

/// Main configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Relay URL (default: http://localhost:3000)
    #[serde(default = "default_relay_url")]
    pub relay_url: String,

    /// Log entries per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_relay_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_page_size() -> usize {
    defaults::PAGE_SIZE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            relay_url: default_relay_url(),
            page_size: default_page_size(),
        }
    }
}

impl Config {
    /// Load config from file
    pub fn load() -> Result<Self> {
        let path = config_file();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        Self::parse(&content)
    }

    /// Load config, falling back to defaults when the file is unreadable
    ///
    /// Used by `connect`, which rewrites the file anyway.
    pub fn load_or_default() -> Self {
        let path = config_file();
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => Self::parse_or_default(&content),
            Err(e) => {
                tracing::warn!("Ignoring unreadable config file: {}", e);
                Self::default()
            }
        }
    }

    fn parse_or_default(content: &str) -> Self {
        Self::parse(content).unwrap_or_else(|e| {
            tracing::warn!("Ignoring invalid config file: {:#}", e);
            Self::default()
        })
    }

    fn parse(content: &str) -> Result<Self> {
        let config: Config =
            serde_yaml::from_str(content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        fs::create_dir_all(config_dir()).context("Failed to create config directory")?;
        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        fs::write(config_file(), content).context("Failed to write config file")?;
        Ok(())
    }

    /// Set the relay URL, normalizing away a trailing slash
    pub fn set_relay_url(&mut self, url: &str) -> Result<()> {
        let url = url.trim().trim_end_matches('/');
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            anyhow::bail!("Relay URL must start with http:// or https://");
        }
        self.relay_url = url.to_string();
        Ok(())
    }
}
