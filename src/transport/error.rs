//! Error types for HTTP transport operations.

use thiserror::Error;

/// Error type for HTTP transport operations.
///
/// Describes what went wrong without dictating recovery strategy.
/// Callers skip the failed attempt and try again on their next tick.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    ///
    /// The server did not respond within the configured timeout period.
    #[error("Request timed out")]
    Timeout,

    /// The provided URL is invalid.
    ///
    /// This typically indicates a configuration error rather than
    /// a transient failure.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl HttpError {
    /// Returns true if the underlying failure looks like a refused connection.
    ///
    /// Used only for metrics classification; the error message heuristic
    /// mirrors what the OS reports for `ECONNREFUSED`.
    #[must_use]
    pub fn is_connection_refused(&self) -> bool {
        match self {
            Self::Connection(source) => source.to_string().contains("connection refused"),
            Self::Timeout | Self::InvalidUrl(_) => false,
        }
    }
}
