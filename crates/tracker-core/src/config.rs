//! Tracker configuration
//!
//! Configuration lives in a TOML file under the platform config directory
//! (`~/.config/activity-tracker/config.toml` on Linux). Command-line flags and
//! environment variables are applied on top through [`ConfigOverrides`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracker_fs::ConfigStore;

use crate::{Error, Result};

pub const DEFAULT_FLUSH_INTERVAL_MINUTES: u64 = 30;
/// One year
pub const MAX_FLUSH_INTERVAL_MINUTES: u64 = 365 * 24 * 60;
pub const DEFAULT_LOG_FILE: &str = "logs.txt";
pub const DEFAULT_API_BASE_URL: &str = tracker_remote::github::DEFAULT_API_BASE_URL;

fn default_flush_interval_minutes() -> u64 {
    DEFAULT_FLUSH_INTERVAL_MINUTES
}

fn default_log_file() -> String {
    DEFAULT_LOG_FILE.to_string()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

/// Tracker settings persisted in `config.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Repository holding the log, e.g. `https://github.com/user/repo.git`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub repository_url: String,

    /// Personal access token used as the bearer credential
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub access_token: String,

    /// Minutes between flushes
    #[serde(default = "default_flush_interval_minutes")]
    pub flush_interval_minutes: u64,

    /// Name of the log resource inside the repository
    #[serde(default = "default_log_file")]
    pub log_file: String,

    /// Base URL of the contents API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            repository_url: String::new(),
            access_token: String::new(),
            flush_interval_minutes: default_flush_interval_minutes(),
            log_file: default_log_file(),
            api_base_url: default_api_base_url(),
        }
    }
}

/// Values that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub repository_url: Option<String>,
    pub access_token: Option<String>,
    pub flush_interval_minutes: Option<u64>,
    pub log_file: Option<String>,
    pub api_base_url: Option<String>,
}

impl TrackerConfig {
    /// Default config file location
    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("activity-tracker").join("config.toml"))
            .ok_or(Error::NoConfigDir)
    }

    /// Load configuration from a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        Ok(ConfigStore::new().load(path)?)
    }

    /// Load configuration, falling back to defaults when the file is absent
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save configuration atomically
    pub fn save(&self, path: &Path) -> Result<()> {
        Ok(ConfigStore::new().save(path, self)?)
    }

    /// Apply overrides; set values replace file values
    pub fn merge(&mut self, overrides: &ConfigOverrides) {
        if let Some(url) = &overrides.repository_url {
            self.repository_url = url.clone();
        }
        if let Some(token) = &overrides.access_token {
            self.access_token = token.clone();
        }
        if let Some(minutes) = overrides.flush_interval_minutes {
            self.flush_interval_minutes = minutes;
        }
        if let Some(log_file) = &overrides.log_file {
            self.log_file = log_file.clone();
        }
        if let Some(base_url) = &overrides.api_base_url {
            self.api_base_url = base_url.clone();
        }
    }

    /// Check that the tracker can run with this configuration
    ///
    /// The repository URL is only checked for presence here. Its shape is
    /// checked when a flush parses it.
    pub fn validate(&self) -> Result<()> {
        if self.repository_url.trim().is_empty() {
            return Err(Error::invalid_config("repository URL is not set"));
        }
        if self.access_token.trim().is_empty() {
            return Err(Error::invalid_config("access token is not set"));
        }
        if self.flush_interval_minutes == 0 {
            return Err(Error::invalid_config(
                "flush interval must be at least one minute",
            ));
        }
        if self.flush_interval_minutes > MAX_FLUSH_INTERVAL_MINUTES {
            return Err(Error::invalid_config(format!(
                "flush interval must be at most {} minutes (one year)",
                MAX_FLUSH_INTERVAL_MINUTES
            )));
        }
        if self.log_file.trim().is_empty() {
            return Err(Error::invalid_config("log file name is empty"));
        }
        Ok(())
    }

    /// Saturates instead of overflowing for unvalidated values
    pub fn flush_interval(&self) -> Duration {
        Duration::from_secs(self.flush_interval_minutes.saturating_mul(60))
    }
}
