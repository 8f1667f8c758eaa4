//! Configuration loading.
//!
//! Configuration is a single TOML file with three sections:
//!
//! ```toml
//! [upstream]
//! base_url = "http://localhost:11434"
//! model = "deepseek-coder"
//! timeout_secs = 60
//!
//! [cache]
//! enabled = true
//! max_entries = 1000
//! ttl_secs = 86400
//!
//! [fields]
//! status = ["statusDisplay", "status"]
//! ```
//!
//! Every field has a default, so an empty file (or no file at all, via
//! [`Config::default`]) yields a working configuration.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::cache::CacheConfig;
use crate::types::TaskFieldMap;
use crate::{MuninnError, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub fields: TaskFieldMap,
}

/// Upstream completion endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the completion endpoint (default: http://localhost:11434).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model identifier sent with every request (default: deepseek-coder).
    #[serde(default = "default_model")]
    pub model: String,
    /// Per-call timeout in seconds (default: 60).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl UpstreamConfig {
    /// The per-call timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "deepseek-coder".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

/// Response cache configuration as it appears on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    /// Whether caching is enabled at all (default: true).
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,
    /// Maximum number of cached entries (default: 1000).
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
    /// Time-to-live per entry in seconds (default: 86400, one day).
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            max_entries: default_max_entries(),
            ttl_secs: default_ttl_secs(),
        }
    }
}

impl From<&CacheSettings> for CacheConfig {
    fn from(settings: &CacheSettings) -> Self {
        let config = CacheConfig::new()
            .max_entries(settings.max_entries)
            .ttl(Duration::from_secs(settings.ttl_secs));
        if settings.enabled {
            config
        } else {
            config.disabled()
        }
    }
}

fn default_cache_enabled() -> bool {
    true
}

fn default_max_entries() -> usize {
    1000
}

fn default_ttl_secs() -> u64 {
    86_400
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// [`MuninnError::Configuration`] when the file cannot be read or
    /// parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            MuninnError::Configuration(format!("failed to read config file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            MuninnError::Configuration(format!("failed to parse config file {path:?}: {e}"))
        })
    }
}
