//! Caching subsystem.
//!
//! Two pieces:
//!
//! - [`key`] — deterministic derivation of fixed-length cache keys from
//!   request identities (raw strings or canonicalized structures).
//!
//! - [`response::ResponseCache`] — the bounded LRU + TTL store for
//!   completion responses, shared across all handlers in the process.
//!   Constructed once by [`MuninnBuilder`](crate::MuninnBuilder); opt-out
//!   via [`CacheConfig::disabled`], which degrades every operation to a
//!   no-op rather than an error.

pub mod key;
pub mod response;

pub use key::{RequestIdentity, derive_key};
pub use response::{CacheConfig, CacheStats, ResponseCache};
