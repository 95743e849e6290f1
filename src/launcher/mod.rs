//! Client for the DZSA launcher directory API.
//!
//! Querying `https://dayzsalauncher.com/api/v1/query/<ip>:<port>` both
//! re-registers the server with the launcher's directory and returns its
//! current listing. This module provides:
//! - Wire payload types ([`QueryResponse`], [`ServerInfo`])
//! - The client abstraction ([`LauncherClient`])
//! - Production implementation ([`DzsaLauncherClient`])

mod client;
mod model;

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;

pub use client::{DzsaLauncherClient, LauncherClient, QueryError};
pub use model::{QueryResponse, ServerEndpoint, ServerInfo, ServerMod};

/// Scripted launcher client for testing the sync scheduler.
#[cfg(test)]
pub mod mock {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::{LauncherClient, QueryError, QueryResponse, ServerEndpoint, ServerInfo};

    /// Builds a successful listing that echoes the queried endpoint.
    ///
    /// The listing name is the port in decimal, which makes assertions on
    /// "which endpoint produced this entry" trivial.
    #[must_use]
    pub fn echo_response(address: &str, port: u16) -> QueryResponse {
        QueryResponse {
            status: 200,
            result: ServerInfo {
                name: port.to_string(),
                endpoint: ServerEndpoint {
                    ip: address.to_string(),
                    port,
                },
                players: 3,
                max_players: 60,
                map: "chernarusplus".to_string(),
                version: "1.26.158551".to_string(),
                ..ServerInfo::default()
            },
        }
    }

    /// A mock implementation of [`LauncherClient`] for testing.
    ///
    /// Scripted results are served in FIFO order; once exhausted, queries
    /// succeed with [`echo_response`].
    #[derive(Debug, Default)]
    pub struct MockLauncherClient {
        script: Mutex<VecDeque<Result<QueryResponse, QueryError>>>,
        calls: Mutex<Vec<(String, u16)>>,
    }

    impl MockLauncherClient {
        /// Creates a mock that always succeeds with [`echo_response`].
        #[must_use]
        pub fn echo() -> Self {
            Self::default()
        }

        /// Enqueues a successful response.
        pub fn push_ok(&self, response: QueryResponse) {
            self.script.lock().unwrap().push_back(Ok(response));
        }

        /// Enqueues a failure.
        pub fn push_err(&self, error: QueryError) {
            self.script.lock().unwrap().push_back(Err(error));
        }

        /// Returns every (address, port) queried so far.
        #[must_use]
        pub fn calls(&self) -> Vec<(String, u16)> {
            self.calls.lock().unwrap().clone()
        }

        /// Returns the number of queries made so far.
        #[must_use]
        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl LauncherClient for MockLauncherClient {
        async fn query(&self, address: &str, port: u16) -> Result<QueryResponse, QueryError> {
            self.calls.lock().unwrap().push((address.to_string(), port));
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(echo_response(address, port)))
        }
    }
}
