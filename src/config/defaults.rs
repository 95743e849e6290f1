//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Default API listen port.
pub const API_PORT: u16 = 8888;

/// Default interval between periodic syncs, in seconds (1 hour).
pub const SYNC_INTERVAL_SECS: u64 = 3600;

/// Default maximum random start delay per sync attempt, in seconds.
pub const SYNC_JITTER_MAX_SECS: u64 = 20;

/// Default interval between IP detection probes, in seconds (10 minutes).
pub const DETECT_INTERVAL_SECS: u64 = 600;

/// Total timeout for one outbound HTTP request, in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 15;

/// Connect timeout for outbound HTTP requests, in seconds.
pub const HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default sync interval as a Duration.
#[must_use]
pub const fn sync_interval() -> Duration {
    Duration::from_secs(SYNC_INTERVAL_SECS)
}

/// Default sync jitter as a Duration.
#[must_use]
pub const fn sync_jitter_max() -> Duration {
    Duration::from_secs(SYNC_JITTER_MAX_SECS)
}

/// Default detection interval as a Duration.
#[must_use]
pub const fn detect_interval() -> Duration {
    Duration::from_secs(DETECT_INTERVAL_SECS)
}

/// Outbound HTTP request timeout as a Duration.
#[must_use]
pub const fn http_timeout() -> Duration {
    Duration::from_secs(HTTP_TIMEOUT_SECS)
}

/// Outbound HTTP connect timeout as a Duration.
#[must_use]
pub const fn http_connect_timeout() -> Duration {
    Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS)
}
