//! Configuration management for autocommit.
//!
//! Every field is optional. Lookup order: an explicit `--config` file, then
//! `<repo>/.autocommit.toml`, then `~/.autocommit/config.toml`, then the
//! built-in defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Error;

/// Project config file name, looked up in the repository root.
pub const PROJECT_CONFIG_FILE: &str = ".autocommit.toml";

/// Author identity stamped on every automatic commit.
pub const DEFAULT_AUTHOR: &str = "Geltrax69 <10lalitsingh01@gmail.com>";

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub watch: WatchConfig,

    #[serde(default)]
    pub git: GitConfig,
}

/// Polling behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Extension of the files to track, without the leading dot.
    #[serde(default = "default_extension")]
    pub extension: String,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Pause between detecting a change and reading the file.
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            poll_interval_ms: default_poll_interval_ms(),
            settle_delay_ms: default_settle_delay_ms(),
        }
    }
}

/// How commits are made and where they are pushed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitConfig {
    #[serde(default = "default_author")]
    pub author: String,

    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default = "default_branch")]
    pub branch: String,

    #[serde(default = "default_true")]
    pub push: bool,

    #[serde(default = "default_stage_timeout_secs")]
    pub stage_timeout_secs: u64,

    #[serde(default = "default_diff_timeout_secs")]
    pub diff_timeout_secs: u64,

    #[serde(default = "default_push_timeout_secs")]
    pub push_timeout_secs: u64,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            author: default_author(),
            remote: default_remote(),
            branch: default_branch(),
            push: true,
            stage_timeout_secs: default_stage_timeout_secs(),
            diff_timeout_secs: default_diff_timeout_secs(),
            push_timeout_secs: default_push_timeout_secs(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_extension() -> String {
    "go".to_string()
}

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_settle_delay_ms() -> u64 {
    500
}

fn default_author() -> String {
    DEFAULT_AUTHOR.to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_stage_timeout_secs() -> u64 {
    5
}

fn default_diff_timeout_secs() -> u64 {
    5
}

fn default_push_timeout_secs() -> u64 {
    10
}

impl Config {
    /// Resolve and load the config for a repository.
    pub fn load(repo_root: &Path, explicit: Option<&Path>) -> Result<Self, Error> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        let project = Self::project_path(repo_root);
        if project.exists() {
            return Self::load_from(&project);
        }

        if let Some(global) = Self::global_path().filter(|p| p.exists()) {
            return Self::load_from(&global);
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load config from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Path to the per-repository config file.
    pub fn project_path(repo_root: &Path) -> PathBuf {
        repo_root.join(PROJECT_CONFIG_FILE)
    }

    /// Path to the per-user config file (~/.autocommit/config.toml).
    pub fn global_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".autocommit").join("config.toml"))
    }
}

impl WatchConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

impl GitConfig {
    pub fn stage_timeout(&self) -> Duration {
        Duration::from_secs(self.stage_timeout_secs)
    }

    pub fn diff_timeout(&self) -> Duration {
        Duration::from_secs(self.diff_timeout_secs)
    }

    pub fn push_timeout(&self) -> Duration {
        Duration::from_secs(self.push_timeout_secs)
    }
}
