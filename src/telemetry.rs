//! Telemetry metric name constants.
//!
//! Centralised metric names for muninn operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `muninn_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `operation` — gateway/client operation (e.g. "complete", "task_analysis")
//! - `status` — outcome: "ok" or "error"

/// Total completion requests sent upstream.
///
/// Labels: `operation`, `status` ("ok" | "error").
pub const REQUESTS_TOTAL: &str = "muninn_requests_total";

/// Upstream request duration in seconds.
///
/// Labels: `operation`.
pub const REQUEST_DURATION_SECONDS: &str = "muninn_request_duration_seconds";

/// Total response-cache hits.
pub const CACHE_HITS_TOTAL: &str = "muninn_cache_hits_total";

/// Total response-cache misses.
///
/// A disabled cache counts every lookup as a miss.
pub const CACHE_MISSES_TOTAL: &str = "muninn_cache_misses_total";

/// Total fields filled in by domain defaulting.
///
/// Labels: `contract`, `field`.
pub const DEFAULTED_FIELDS_TOTAL: &str = "muninn_defaulted_fields_total";
