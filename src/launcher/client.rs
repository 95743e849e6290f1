//! Launcher directory client trait and production implementation.

use std::time::Instant;

use http::header::{ACCEPT, USER_AGENT};
use http::{HeaderValue, StatusCode};
use thiserror::Error;
use url::Url;

use crate::metrics::{self, ErrorClass, HOST_DZSA};
use crate::transport::{HttpClient, HttpError, HttpRequest};

use super::QueryResponse;

/// Default base URL of the launcher query API.
pub const BASE_URL: &str = "https://dayzsalauncher.com/api/v1/query";

const USER_AGENT_VALUE: &str = concat!("dzsa-sync/", env!("CARGO_PKG_VERSION"));

/// Error type for launcher directory queries.
///
/// All variants are transient from the scheduler's point of view: the
/// attempt is logged and skipped, and the next tick tries again.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The request failed at the transport level.
    #[error("request failed: {0}")]
    Transport(#[from] HttpError),

    /// The directory answered with a non-200 status code.
    #[error("unexpected status code: {0}")]
    Status(StatusCode),

    /// The directory answered 200 but reported an error in the body.
    ///
    /// The launcher API signals lookup failures this way rather than
    /// with HTTP status codes.
    #[error("launcher api error: {0}")]
    Api(String),

    /// The response body could not be decoded.
    #[error("failed to decode launcher response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The (address, port) pair produced an invalid query URL.
    #[error("invalid query endpoint '{endpoint}': {reason}")]
    Endpoint {
        /// The URL that failed to parse.
        endpoint: String,
        /// Parser message.
        reason: String,
    },
}

/// Trait for querying the launcher directory.
///
/// One call per (address, port) pair; the call itself performs the
/// registration side effect. Implementations must not retry internally;
/// retry cadence belongs to the sync scheduler.
pub trait LauncherClient: Send + Sync {
    /// Queries (and thereby re-registers) the server at `address:port`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError`] when the request fails, the directory
    /// reports an error, or the response cannot be decoded.
    fn query(
        &self,
        address: &str,
        port: u16,
    ) -> impl std::future::Future<Output = Result<QueryResponse, QueryError>> + Send;
}

/// Production launcher client over an [`HttpClient`].
#[derive(Debug, Clone)]
pub struct DzsaLauncherClient<H> {
    http: H,
    base_url: String,
}

impl<H> DzsaLauncherClient<H> {
    /// Creates a client against the public launcher API.
    #[must_use]
    pub fn new(http: H) -> Self {
        Self {
            http,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Overrides the base URL (tests and self-hosted mirrors).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Returns a reference to the underlying HTTP client.
    #[must_use]
    pub const fn http(&self) -> &H {
        &self.http
    }
}

impl<H: HttpClient> LauncherClient for DzsaLauncherClient<H> {
    async fn query(&self, address: &str, port: u16) -> Result<QueryResponse, QueryError> {
        let start = Instant::now();
        let record = |status: Option<StatusCode>, class: ErrorClass| {
            metrics::record_request(HOST_DZSA, status, class, start.elapsed());
        };

        let endpoint = format!(
            "{}/{address}:{port}",
            self.base_url.trim_end_matches('/')
        );
        let url = Url::parse(&endpoint).map_err(|e| {
            record(None, ErrorClass::Unknown);
            QueryError::Endpoint {
                endpoint: endpoint.clone(),
                reason: e.to_string(),
            }
        })?;

        let request = HttpRequest::get(url)
            .with_header(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE))
            .with_header(ACCEPT, HeaderValue::from_static("application/json"));

        let response = self.http.request(request).await.map_err(|e| {
            record(None, ErrorClass::from_transport(&e));
            QueryError::Transport(e)
        })?;

        let status = response.status;
        if status != StatusCode::OK {
            record(Some(status), ErrorClass::from_status(status));
            return Err(QueryError::Status(status));
        }

        // The API reports lookup failures as 200 with an "error" key, so
        // the body is inspected before decoding the full payload.
        let value: serde_json::Value = serde_json::from_slice(&response.body).map_err(|e| {
            record(Some(status), ErrorClass::Decode);
            QueryError::Decode(e)
        })?;

        if let Some(error) = value.get("error") {
            record(Some(status), ErrorClass::Status4xx);
            let message = error
                .as_str()
                .map_or_else(|| error.to_string(), ToString::to_string);
            return Err(QueryError::Api(message));
        }

        let parsed: QueryResponse = serde_json::from_value(value).map_err(|e| {
            record(Some(status), ErrorClass::Decode);
            QueryError::Decode(e)
        })?;

        record(Some(status), ErrorClass::None);
        Ok(parsed)
    }
}
