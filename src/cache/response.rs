//! Bounded, time-expiring response cache for AI completions.
//!
//! [`ResponseCache`] deduplicates upstream completion calls: one instance
//! is constructed at process startup and shared by every handler in the
//! process (see [`Gateway`](crate::gateway::Gateway)). Entries are evicted
//! least-recently-used at capacity and never returned past their TTL. A
//! read hit refreshes an entry's recency, not its expiry.
//!
//! # Disabled mode
//!
//! When caching is turned off by configuration the cache is constructed
//! with [`ResponseCache::disabled`]: every `get` is a miss and every
//! mutation is ignored. Callers never branch on whether caching is on.
//!
//! # Future extensibility: shared/distributed caching
//!
//! Keys are stable SHA-256 hex (see [`key`](crate::cache::key)), so a
//! cross-process backend (e.g. redis) can replace the in-memory store
//! without a key migration. Extract a `CacheBackend` trait and inject it
//! through [`MuninnBuilder`](crate::MuninnBuilder) when that becomes
//! necessary; all interactions already go through this type.

use std::num::NonZeroUsize;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use lru::LruCache;
use serde_json::Value;

use crate::telemetry;

/// Configuration for the response cache.
///
/// ```rust
/// # use muninn::CacheConfig;
/// # use std::time::Duration;
/// let config = CacheConfig::new()
///     .max_entries(1_000)
///     .ttl(Duration::from_secs(86_400));
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Whether caching is active at all. Default: true.
    pub enabled: bool,
    /// Maximum number of cached entries. Default: 1,000.
    pub max_entries: usize,
    /// Default time-to-live for cached entries. Default: 24 hours.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: 1_000,
            ttl: Duration::from_secs(86_400),
        }
    }
}

impl CacheConfig {
    /// Create a new config with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of cached entries.
    pub fn max_entries(mut self, n: usize) -> Self {
        self.max_entries = n;
        self
    }

    /// Set the default time-to-live for cached entries.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Turn caching off; the resulting cache is a no-op.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Cache introspection snapshot. Reading it never mutates the cache.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheStats {
    pub enabled: bool,
    /// Current number of entries (expired-but-unevicted entries included).
    pub size: usize,
    pub capacity: usize,
    /// Default TTL applied when `set` receives no override.
    pub ttl: Duration,
}

#[derive(Debug)]
struct CacheEntry {
    value: Value,
    inserted_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn expired(&self) -> bool {
        self.inserted_at.elapsed() >= self.ttl
    }
}

/// In-memory LRU + TTL store for completion responses.
///
/// Values are `serde_json::Value`: raw completion text is stored as a JSON
/// string, structured results as objects. All operations take `&self`; the
/// store is `Send + Sync` and safe under concurrent use (same-key races
/// resolve last-write-wins).
#[derive(Debug)]
pub struct ResponseCache {
    // None when caching is disabled.
    inner: Option<Mutex<LruCache<String, CacheEntry>>>,
    default_ttl: Duration,
    capacity: usize,
}

impl ResponseCache {
    /// Create a cache from configuration. A config with `enabled: false`
    /// yields the same no-op cache as [`ResponseCache::disabled`].
    pub fn new(config: &CacheConfig) -> Self {
        if !config.enabled {
            return Self::disabled();
        }
        let capacity = NonZeroUsize::new(config.max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Some(Mutex::new(LruCache::new(capacity))),
            default_ttl: config.ttl,
            capacity: capacity.get(),
        }
    }

    /// Create a no-op cache: every `get` misses, every mutation is ignored.
    pub fn disabled() -> Self {
        Self {
            inner: None,
            default_ttl: Duration::ZERO,
            capacity: 0,
        }
    }

    /// Look up a cached value.
    ///
    /// Returns `None` if the key is unknown or the entry has outlived its
    /// TTL (expired entries are dropped on the spot). A hit promotes the
    /// entry's recency without refreshing its expiry. Emits cache hit/miss
    /// metrics.
    pub fn get(&self, key: &str) -> Option<Value> {
        let Some(inner) = &self.inner else {
            metrics::counter!(telemetry::CACHE_MISSES_TOTAL).increment(1);
            return None;
        };
        let mut cache = inner.lock().unwrap_or_else(PoisonError::into_inner);

        let expired = match cache.peek(key) {
            Some(entry) => entry.expired(),
            None => {
                metrics::counter!(telemetry::CACHE_MISSES_TOTAL).increment(1);
                tracing::debug!(key = %key_prefix(key), "cache miss");
                return None;
            }
        };
        if expired {
            cache.pop(key);
            metrics::counter!(telemetry::CACHE_MISSES_TOTAL).increment(1);
            tracing::debug!(key = %key_prefix(key), "cache entry expired");
            return None;
        }

        // get (unlike peek) marks the entry most-recently-used.
        let value = cache.get(key).map(|entry| entry.value.clone());
        metrics::counter!(telemetry::CACHE_HITS_TOTAL).increment(1);
        tracing::debug!(key = %key_prefix(key), "cache hit");
        value
    }

    /// Insert or replace a value.
    ///
    /// At capacity, the least-recently-accessed entry is evicted first.
    /// `ttl_override` replaces the default TTL for this entry only.
    pub fn set(&self, key: &str, value: Value, ttl_override: Option<Duration>) {
        let Some(inner) = &self.inner else { return };
        let mut cache = inner.lock().unwrap_or_else(PoisonError::into_inner);
        cache.put(
            key.to_string(),
            CacheEntry {
                value,
                inserted_at: Instant::now(),
                ttl: ttl_override.unwrap_or(self.default_ttl),
            },
        );
        tracing::debug!(key = %key_prefix(key), "cache set");
    }

    /// Remove an entry if present; absent keys are not an error.
    pub fn delete(&self, key: &str) {
        let Some(inner) = &self.inner else { return };
        let mut cache = inner.lock().unwrap_or_else(PoisonError::into_inner);
        cache.pop(key);
        tracing::debug!(key = %key_prefix(key), "cache delete");
    }

    /// Empty the store.
    pub fn clear(&self) {
        let Some(inner) = &self.inner else { return };
        let mut cache = inner.lock().unwrap_or_else(PoisonError::into_inner);
        cache.clear();
        tracing::info!("response cache cleared");
    }

    /// Introspection for operability endpoints. Does not touch recency.
    pub fn stats(&self) -> CacheStats {
        let size = match &self.inner {
            Some(inner) => inner
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .len(),
            None => 0,
        };
        CacheStats {
            enabled: self.inner.is_some(),
            size,
            capacity: self.capacity,
            ttl: self.default_ttl,
        }
    }

    /// Whether this cache stores anything at all.
    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }
}

/// First few characters of a key, for log lines. Truncates on a char
/// boundary; derived keys are hex but callers may pass arbitrary strings.
fn key_prefix(key: &str) -> &str {
    key.char_indices().nth(8).map_or(key, |(i, _)| &key[..i])
}
