//! Public IP detection via ifconfig.net.

use std::time::Instant;

use http::header::{ACCEPT, USER_AGENT};
use http::{HeaderValue, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::metrics::{self, ErrorClass, HOST_IFCONFIG};
use crate::transport::{HttpClient, HttpError, HttpRequest};

/// Default detection endpoint.
pub const ENDPOINT: &str = "https://ifconfig.net/json";

const USER_AGENT_VALUE: &str = concat!("dzsa-sync/", env!("CARGO_PKG_VERSION"));

/// Error type for IP detection probes.
///
/// Probe failures are never fatal: the watcher logs them and keeps the
/// previously cached address.
#[derive(Debug, Error)]
pub enum DetectError {
    /// The request failed at the transport level.
    #[error("request failed: {0}")]
    Transport(#[from] HttpError),

    /// The detection service answered with a non-200 status code.
    #[error("unexpected status code: {0}")]
    Status(StatusCode),

    /// The response body could not be decoded.
    #[error("failed to decode detection response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The configured endpoint is not a valid URL.
    #[error("invalid detection endpoint '{endpoint}': {reason}")]
    Endpoint {
        /// The URL that failed to parse.
        endpoint: String,
        /// Parser message.
        reason: String,
    },
}

/// Response payload from the ifconfig.net service.
///
/// Only `ip` participates in the sync logic; the rest is decoded for
/// debug logging.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IfconfigResponse {
    pub ip: String,
    pub ip_decimal: u64,
    pub country: String,
    pub country_iso: String,
    pub latitude: f64,
    pub longitude: f64,
    pub time_zone: String,
    pub asn: String,
    pub asn_org: String,
    pub hostname: String,
}

/// Trait for learning the host's current public IP.
pub trait IpDetector: Send + Sync {
    /// Performs one detection probe and returns the observed address.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError`] when the probe fails; the caller keeps the
    /// last-known address in that case.
    fn detect(&self) -> impl std::future::Future<Output = Result<String, DetectError>> + Send;
}

impl<D: IpDetector> IpDetector for std::sync::Arc<D> {
    async fn detect(&self) -> Result<String, DetectError> {
        D::detect(self).await
    }
}

/// Production detector backed by ifconfig.net.
#[derive(Debug, Clone)]
pub struct IfconfigClient<H> {
    http: H,
    endpoint: String,
}

impl<H> IfconfigClient<H> {
    /// Creates a detector against the public ifconfig.net endpoint.
    #[must_use]
    pub fn new(http: H) -> Self {
        Self {
            http,
            endpoint: ENDPOINT.to_string(),
        }
    }

    /// Overrides the endpoint (tests and self-hosted mirrors).
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Returns a reference to the underlying HTTP client.
    #[must_use]
    pub const fn http(&self) -> &H {
        &self.http
    }
}

impl<H: HttpClient> IfconfigClient<H> {
    /// Performs one probe and returns the full response payload.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError`] when the request fails or the payload
    /// cannot be decoded.
    pub async fn fetch(&self) -> Result<IfconfigResponse, DetectError> {
        let start = Instant::now();
        let record = |status: Option<StatusCode>, class: ErrorClass| {
            metrics::record_request(HOST_IFCONFIG, status, class, start.elapsed());
        };

        let url = Url::parse(&self.endpoint).map_err(|e| {
            record(None, ErrorClass::Unknown);
            DetectError::Endpoint {
                endpoint: self.endpoint.clone(),
                reason: e.to_string(),
            }
        })?;

        let request = HttpRequest::get(url)
            .with_header(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE))
            .with_header(ACCEPT, HeaderValue::from_static("application/json"));

        let response = self.http.request(request).await.map_err(|e| {
            record(None, ErrorClass::from_transport(&e));
            DetectError::Transport(e)
        })?;

        let status = response.status;
        if status != StatusCode::OK {
            record(Some(status), ErrorClass::from_status(status));
            return Err(DetectError::Status(status));
        }

        let parsed: IfconfigResponse = serde_json::from_slice(&response.body).map_err(|e| {
            record(Some(status), ErrorClass::Decode);
            DetectError::Decode(e)
        })?;

        record(Some(status), ErrorClass::None);
        Ok(parsed)
    }
}

impl<H: HttpClient> IpDetector for IfconfigClient<H> {
    async fn detect(&self) -> Result<String, DetectError> {
        let response = self.fetch().await?;
        tracing::debug!(
            ip = %response.ip,
            country = %response.country,
            asn_org = %response.asn_org,
            "detection probe completed"
        );
        Ok(response.ip)
    }
}
