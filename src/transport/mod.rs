//! HTTP transport layer shared by the outbound clients.
//!
//! This module provides:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])

mod client;
mod error;
mod http;

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;

pub use client::ReqwestClient;
pub use error::HttpError;
pub use http::{HttpClient, HttpRequest, HttpResponse};

/// Scripted HTTP client for testing.
///
/// Allows tests to enqueue responses and inspect the requests that were sent.
#[cfg(test)]
pub mod mock {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

    /// A mock implementation of [`HttpClient`] for testing.
    ///
    /// Responses are served in FIFO order; once the script is exhausted,
    /// further requests get an empty `200 {}`.
    #[derive(Debug, Default)]
    pub struct MockHttpClient {
        script: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl MockHttpClient {
        /// Creates a mock with an empty script.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Enqueues a response with the given status and body.
        ///
        /// # Panics
        ///
        /// Panics if `status` is not a valid HTTP status code (test code only).
        pub fn push_body(&self, status: u16, body: &str) {
            let status = http::StatusCode::from_u16(status).unwrap();
            self.script.lock().unwrap().push_back(Ok(HttpResponse::new(
                status,
                http::HeaderMap::new(),
                body.as_bytes().to_vec(),
            )));
        }

        /// Enqueues a transport-level error.
        pub fn push_error(&self, error: HttpError) {
            self.script.lock().unwrap().push_back(Err(error));
        }

        /// Returns copies of every request sent so far.
        #[must_use]
        pub fn requests(&self) -> Vec<HttpRequest> {
            self.requests.lock().unwrap().clone()
        }

        /// Returns the number of requests sent so far.
        #[must_use]
        pub fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    impl HttpClient for MockHttpClient {
        async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
            self.requests.lock().unwrap().push(req);
            self.script.lock().unwrap().pop_front().unwrap_or_else(|| {
                Ok(HttpResponse::new(
                    http::StatusCode::OK,
                    http::HeaderMap::new(),
                    b"{}".to_vec(),
                ))
            })
        }
    }
}
