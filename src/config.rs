//! Runtime configuration
//!
//! Read from an optional JSON file; every key falls back to its default.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::fs;

use crate::error::{BoardError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How long the event loop waits for input before redrawing
    pub tick_rate_ms: u64,
    /// Capture the mouse for drag and drop
    pub mouse: bool,
    /// Default log level when TASKBOARD_LOG is not set
    pub log_level: String,
    /// Directory for log files; platform data dir when unset
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            mouse: true,
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("taskboard").join("config.json"))
    }

    /// Load `path`, or defaults if it does not exist.
    pub fn load(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(path)?;
        serde_json::from_str(&data).map_err(|source| BoardError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the given file, falling back to the platform config location.
    pub fn resolve(path: Option<&Path>) -> Result<Config> {
        match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => Self::load(&path),
            None => Ok(Config::default()),
        }
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }

    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("taskboard")
                .join("logs")
        })
    }
}
