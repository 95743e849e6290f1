//! Thread-safe store for the latest launcher sync result per port.
//!
//! Each sync worker writes its most recent successful listing here; the
//! HTTP API reads from it. The store only ever holds data for the ports
//! fixed at startup, and entries are never removed: a stale listing is a
//! legitimate state that readers must be able to observe.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::RwLock;

use serde::Serialize;

use crate::launcher::ServerInfo;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

/// A single server in the list response (port + latest listing).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerEntry {
    /// The server's query port.
    pub port: u16,
    /// The most recent successful listing for that port.
    pub result: ServerInfo,
}

/// Holds the latest launcher query result per configured port.
///
/// Safe for concurrent use: writers (one per sync worker) take the
/// exclusive path, readers (API handlers) the shared path. Values are
/// stored and returned by value, so no alias to the guarded data ever
/// escapes the lock.
#[derive(Debug)]
pub struct ServerStore {
    results: RwLock<BTreeMap<u16, ServerInfo>>,
    ports: BTreeSet<u16>,
}

impl ServerStore {
    /// Creates a store that only accepts and returns data for the given ports.
    #[must_use]
    pub fn new(ports: impl IntoIterator<Item = u16>) -> Self {
        Self {
            results: RwLock::new(BTreeMap::new()),
            ports: ports.into_iter().collect(),
        }
    }

    /// Stores the result for the given port.
    ///
    /// A port outside the set passed to [`ServerStore::new`] makes this a
    /// no-op: the port set is closed at startup, so such a call is a caller
    /// bug rather than a runtime condition worth surfacing.
    pub fn set(&self, port: u16, result: ServerInfo) {
        if !self.ports.contains(&port) {
            return;
        }
        self.results
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(port, result);
    }

    /// Returns the stored result for the port, or `None` if the port is
    /// not configured or has no data yet.
    #[must_use]
    pub fn get(&self, port: u16) -> Option<ServerInfo> {
        self.results
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(&port)
            .cloned()
    }

    /// Returns all stored results, one entry per port that has data,
    /// in ascending port order.
    ///
    /// The ordering is deterministic so that repeated calls with no
    /// intervening writes serialize byte-identically, since clients diff the
    /// JSON listing.
    #[must_use]
    pub fn get_all(&self) -> Vec<ServerEntry> {
        self.results
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .iter()
            .map(|(&port, result)| ServerEntry {
                port,
                result: result.clone(),
            })
            .collect()
    }

    /// Returns the configured ports in ascending order.
    #[must_use]
    pub fn ports(&self) -> Vec<u16> {
        self.ports.iter().copied().collect()
    }
}
