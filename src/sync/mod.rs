//! Per-server sync scheduling.
//!
//! One [`SyncWorker`] runs per configured server, re-registering it with
//! the launcher directory on a fixed interval. The [`Coordinator`] owns
//! every worker plus the IP watcher, fans IP-change notifications out as
//! triggers, and joins everything on shutdown.

mod coordinator;
mod worker;


pub use coordinator::{Coordinator, WorkerSettings};
pub use worker::{
    trigger_channel, SyncWorker, DEFAULT_JITTER_MAX, DEFAULT_SYNC_INTERVAL,
};

/// One server to keep registered: a display name plus its query port.
///
/// The name labels metrics and logs; the port is the identity everywhere
/// else (store key, API path).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncTarget {
    /// Display name from configuration.
    pub name: String,
    /// Query port, unique across the configured set.
    pub port: u16,
}

impl SyncTarget {
    /// Creates a target.
    pub fn new(name: impl Into<String>, port: u16) -> Self {
        Self {
            name: name.into(),
            port,
        }
    }
}
