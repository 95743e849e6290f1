//! Prometheus metrics for dzsa-sync observability.
//!
//! Exposes metrics compatible with Prometheus/OpenMetrics format:
//! - `dzsa_sync_request_count{host,status_code,error}` - Counter of outbound requests
//! - `dzsa_sync_request_latency_seconds{host,status_code}` - Histogram of request durations
//! - `dzsa_sync_server_player_count{server}` - Gauge of players per synced server
//!
//! The recorder is installed once at startup via [`install`]; the returned
//! handle renders the exposition text for the `/metrics` route. When no
//! recorder is installed (unit tests), the recording macros are no-ops.

use std::time::Duration;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

use crate::transport::HttpError;

/// Host tag for requests against the DZSA launcher directory.
pub const HOST_DZSA: &str = "dzsa";

/// Host tag for requests against the ifconfig.net detection service.
pub const HOST_IFCONFIG: &str = "ifconfig";

const REQUEST_COUNT: &str = "dzsa_sync_request_count";
const REQUEST_LATENCY: &str = "dzsa_sync_request_latency_seconds";
const SERVER_PLAYER_COUNT: &str = "dzsa_sync_server_player_count";

/// Installs the global Prometheus recorder and registers metric descriptions.
///
/// Must be called once at application startup, before any metrics are
/// recorded.
///
/// # Errors
///
/// Returns a [`BuildError`] if a recorder is already installed.
pub fn install() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    describe_counter!(
        REQUEST_COUNT,
        "Outbound HTTP requests by host, status code, and error class"
    );
    describe_histogram!(
        REQUEST_LATENCY,
        "Outbound HTTP request duration in seconds"
    );
    describe_gauge!(
        SERVER_PLAYER_COUNT,
        "Players currently connected to each synced server"
    );

    Ok(handle)
}

/// Error classification attached to request metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Request completed successfully.
    None,
    /// Request timed out before a response arrived.
    Timeout,
    /// The remote host refused the connection.
    ConnectionRefused,
    /// The response carried a 4xx status code.
    Status4xx,
    /// The response carried a 5xx status code.
    Status5xx,
    /// The response body could not be decoded.
    Decode,
    /// Anything else.
    Unknown,
}

impl ErrorClass {
    /// Returns the label value recorded for this class.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Timeout => "timeout",
            Self::ConnectionRefused => "connection_refused",
            Self::Status4xx => "status_4xx",
            Self::Status5xx => "status_5xx",
            Self::Decode => "decode_error",
            Self::Unknown => "unknown",
        }
    }

    /// Classifies a response that arrived with the given status code.
    #[must_use]
    pub fn from_status(status: http::StatusCode) -> Self {
        if status.is_success() {
            Self::None
        } else if status.is_client_error() {
            Self::Status4xx
        } else if status.is_server_error() {
            Self::Status5xx
        } else {
            Self::Unknown
        }
    }

    /// Classifies a transport-level failure (no response received).
    #[must_use]
    pub fn from_transport(error: &HttpError) -> Self {
        match error {
            HttpError::Timeout => Self::Timeout,
            e if e.is_connection_refused() => Self::ConnectionRefused,
            HttpError::Connection(_) | HttpError::InvalidUrl(_) => Self::Unknown,
        }
    }
}

/// Records one outbound request outcome.
///
/// `status` is `None` when the request failed before a response arrived;
/// the status code label is recorded as `0` in that case.
pub fn record_request(
    host: &'static str,
    status: Option<http::StatusCode>,
    error: ErrorClass,
    elapsed: Duration,
) {
    let status_code = status.map_or_else(|| "0".to_string(), |s| s.as_u16().to_string());

    counter!(
        REQUEST_COUNT,
        "host" => host,
        "status_code" => status_code.clone(),
        "error" => error.as_str()
    )
    .increment(1);

    histogram!(
        REQUEST_LATENCY,
        "host" => host,
        "status_code" => status_code
    )
    .record(elapsed.as_secs_f64());
}

/// Updates the player-count gauge for a synced server.
pub fn record_player_count(server: &str, players: i64) {
    #[allow(clippy::cast_precision_loss)] // player counts are tiny
    gauge!(SERVER_PLAYER_COUNT, "server" => server.to_string()).set(players as f64);
}

#[cfg(test)]
#[path = "metrics_tests.rs"]
mod tests;
