//! Builder for configuring gateway instances.

use std::time::Duration;

use super::Gateway;
use crate::cache::{CacheConfig, ResponseCache};
use crate::client::CompletionClient;
use crate::config::Config;
use crate::{MuninnError, Result};

const DEFAULT_MODEL: &str = "deepseek-coder";

/// Main entry point for creating gateway instances.
pub struct Muninn;

impl Muninn {
    /// Create a new builder for configuring the gateway.
    pub fn builder() -> MuninnBuilder {
        MuninnBuilder::new()
    }

    /// Create a gateway straight from loaded configuration.
    ///
    /// The `[fields]` section is not consumed here — it belongs to request
    /// ingestion ([`Task::from_value`](crate::types::Task::from_value)),
    /// which happens before the gateway is involved.
    pub fn from_config(config: &Config) -> Result<Gateway> {
        Self::builder()
            .endpoint(&config.upstream.base_url)
            .model(&config.upstream.model)
            .timeout(config.upstream.timeout())
            .cache(CacheConfig::from(&config.cache))
            .build()
    }
}

/// Builder for configuring gateway instances.
pub struct MuninnBuilder {
    endpoint: Option<String>,
    model: Option<String>,
    timeout: Option<Duration>,
    cache: Option<CacheConfig>,
}

impl MuninnBuilder {
    pub fn new() -> Self {
        Self {
            endpoint: None,
            model: None,
            timeout: None,
            cache: None,
        }
    }

    /// Set the completion endpoint base URL (required).
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = Some(url.into());
        self
    }

    /// Set the model identifier (default: deepseek-coder).
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the per-call timeout (default: 60 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Configure the response cache (default: enabled, 1000 entries,
    /// 24-hour TTL).
    pub fn cache(mut self, config: CacheConfig) -> Self {
        self.cache = Some(config);
        self
    }

    /// Build the gateway.
    ///
    /// # Errors
    ///
    /// [`MuninnError::Configuration`] when no endpoint was set.
    pub fn build(self) -> Result<Gateway> {
        let endpoint = self.endpoint.ok_or_else(|| {
            MuninnError::Configuration("no completion endpoint configured".to_string())
        })?;
        let model = self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let client = match self.timeout {
            Some(timeout) => CompletionClient::with_timeout(endpoint, model, timeout),
            None => CompletionClient::new(endpoint, model),
        };
        let cache = ResponseCache::new(&self.cache.unwrap_or_default());
        Ok(Gateway::new(client, cache))
    }
}

impl Default for MuninnBuilder {
    fn default() -> Self {
        Self::new()
    }
}
