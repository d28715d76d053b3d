// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::browse::PAGE_SIZE;
use crate::debounce::SEARCH_DEBOUNCE;
use crate::source::DEFAULT_LOCALE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowseConfig {
    pub page_size: usize,
    pub debounce_ms: u64,
    /// Root holding `<locale>/airports.json` and `<locale>/airlines.json`.
    pub data_dir: Option<PathBuf>,
    pub locale: String,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
            debounce_ms: SEARCH_DEBOUNCE.as_millis() as u64,
            data_dir: None,
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl BrowseConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// `<config root>/config.json`
    pub fn default_path() -> PathBuf {
        crate::get_config_root().join("config.json")
    }

    /// Reads the config file; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be at least 1".into()));
        }
        Ok(())
    }
}
