//! Configuration handling for the TUI

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::wizard::debounce::DEFAULT_FLUSH_INTERVAL;

/// Environment variable overriding the backend base URL
pub const ENV_BACKEND_URL: &str = "RECRUIT_BACKEND_URL";
/// Environment variable overriding the backend API key
pub const ENV_API_KEY: &str = "RECRUIT_API_KEY";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the backend, e.g. `https://xyz.example.co`
    pub backend_url: Option<String>,
    /// Public API key sent with every backend request
    pub api_key: Option<String>,
    /// Idle time before typed text is written through, in milliseconds
    pub flush_interval_ms: Option<u64>,
    /// Profile row created by the last CV export
    pub profile_id: Option<String>,
    /// Company the job postings belong to
    pub company_id: Option<String>,
    /// Directory for drafts and the log file
    pub data_dir: Option<PathBuf>,
}

impl AppConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("io", "recruit", "recruit-tui")
    }

    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file and apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Load from an explicit path; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Override connection settings from the environment. Empty values are
    /// ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        if let Some(url) = non_empty(ENV_BACKEND_URL) {
            self.backend_url = Some(url);
        }
        if let Some(key) = non_empty(ENV_API_KEY) {
            self.api_key = Some(key);
        }
    }

    pub fn flush_interval(&self) -> Duration {
        self.flush_interval_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_FLUSH_INTERVAL)
    }

    /// Resolved data directory: the configured one, else the platform default
    pub fn data_dir(&self) -> Option<PathBuf> {
        self.data_dir
            .clone()
            .or_else(|| Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf()))
    }

    pub fn drafts_dir(&self) -> Option<PathBuf> {
        self.data_dir().map(|dir| dir.join("drafts"))
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        self.data_dir().map(|dir| dir.join("recruit-tui.log"))
    }
}
