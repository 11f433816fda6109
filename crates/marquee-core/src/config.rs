//! TOML-based application configuration.
//!
//! Stores operator preferences:
//! - Path of the record store file
//! - Poll interval for the calendar view
//! - Default viewing role and dense display flag
//!
//! Configuration is stored at `~/.config/marquee/config.toml`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::projector::Role;

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/marquee/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Record store file. Defaults to `records.json` in the data dir.
    #[serde(default)]
    pub store_path: Option<PathBuf>,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_role")]
    pub role: Role,
    #[serde(default)]
    pub dense: bool,
}

fn default_poll_interval_secs() -> u64 {
    5
}

fn default_role() -> Role {
    Role::Staff
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: None,
            poll_interval_secs: default_poll_interval_secs(),
            role: default_role(),
            dense: false,
        }
    }
}

impl Config {
    /// Load the config file, falling back to defaults if it is missing
    /// or unreadable.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path()?;
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::LoadFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
            path,
            message: e.to_string(),
        })
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let path = config_path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// The record store path, configured or defaulted.
    pub fn store_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.store_path {
            Some(path) => Ok(path.clone()),
            None => Ok(data_dir()?.join("records.json")),
        }
    }
}

fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(data_dir()?.join("config.toml"))
}

/// Returns `~/.config/marquee[-dev]/` based on MARQUEE_ENV.
///
/// Set MARQUEE_ENV=dev to use a development data directory.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("MARQUEE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("marquee-dev")
    } else {
        base_dir.join("marquee")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DataDir(e.to_string()))?;
    Ok(dir)
}
