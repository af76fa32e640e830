//! Telemetry metric name constants.
//!
//! Centralised metric names for rtags operations. The daemon (or an
//! embedding application) installs its own `metrics` recorder; without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `rtags_`. Counters end in `_total`.
//!
//! # Common labels
//!
//! - `backend`: cache or translation backend name (e.g. "redis", "google")
//! - `status`: outcome: "ok" or "error"

/// Total tag-cache hits.
///
/// Labels: `backend`.
pub const CACHE_HITS_TOTAL: &str = "rtags_cache_hits_total";

/// Total tag-cache misses.
///
/// Labels: `backend`.
pub const CACHE_MISSES_TOTAL: &str = "rtags_cache_misses_total";

/// Total cache store failures (lookups and writes). The request still
/// proceeds uncached.
///
/// Labels: `backend`, `operation` ("get" | "set").
pub const CACHE_ERRORS_TOTAL: &str = "rtags_cache_errors_total";

/// Total completion API calls issued by the tagging service.
///
/// Labels: `status`.
pub const COMPLETION_REQUESTS_TOTAL: &str = "rtags_completion_requests_total";

/// Total subtitle batches sent to a translation backend.
///
/// Labels: `backend`, `status`.
pub const TRANSLATION_BATCHES_TOTAL: &str = "rtags_translation_batches_total";
