use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

/// Overrides the backend URL from the config file.
pub const API_URL_ENV: &str = "PROJECTUST_API_URL";
/// Overrides the location of the config file.
pub const CONFIG_PATH_ENV: &str = "PROJECTUST_CONFIG";

#[derive(Serialize, Deserialize, ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the backend, e.g. "http://localhost:8000"
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub theme: Theme,
}

fn default_api_url() -> String {
    "http://localhost:8000".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            theme: Theme::default(),
        }
    }
}

impl Config {
    /// Returns the path of `config.toml`.
    ///
    /// The path is determined in the following order:
    /// 1. `PROJECTUST_CONFIG` environment variable.
    /// 2. `<config dir>/projectust/config.toml`.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            if !path.trim().is_empty() {
                return Ok(PathBuf::from(path));
            }
        }
        Ok(dirs::config_dir()
            .ok_or(ConfigError::NoConfigDir)?
            .join("projectust")
            .join("config.toml"))
    }

    /// Loads the config file and applies `PROJECTUST_API_URL`.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config.api_url = url;
            }
        }
        Ok(config)
    }

    /// Load config from `path`. Returns the default config if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let raw = toml::to_string_pretty(self)?;
        fs::write(path, raw).map_err(write_err)
    }

    /// Stores the theme in the config file, leaving other settings as written on disk.
    pub fn persist_theme(theme: Theme) -> Result<PathBuf, ConfigError> {
        let path = Self::config_path()?;
        let mut on_disk = Self::load_from(&path)?;
        on_disk.theme = theme;
        on_disk.save_to(&path)?;
        Ok(path)
    }
}
