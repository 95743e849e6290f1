//! Shared cell holding the current external address.

use std::sync::{Mutex, PoisonError};

/// Lock-guarded cache of the current external address.
///
/// An empty string means "unknown"; dependents treat that as not ready
/// and skip syncing rather than register an empty address. The cell is
/// written by the IP watcher (detect-IP mode) or seeded once from
/// configuration (fixed-IP mode), and read by every sync worker.
///
/// Critical sections are pure memory accesses; no I/O happens under
/// the lock.
#[derive(Debug, Default)]
pub struct AddressCache {
    address: Mutex<String>,
}

impl AddressCache {
    /// Creates an empty cache (address unknown).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cache seeded with a known address.
    #[must_use]
    pub fn with_address(address: impl Into<String>) -> Self {
        Self {
            address: Mutex::new(address.into()),
        }
    }

    /// Returns the last-known address, possibly empty.
    ///
    /// Never blocks on I/O.
    #[must_use]
    pub fn get(&self) -> String {
        self.address
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Overwrites the address, returning the previous value.
    ///
    /// Returning the previous value lets the caller detect a change
    /// without a second lock acquisition.
    pub fn set(&self, address: impl Into<String>) -> String {
        let mut guard = self
            .address
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, address.into())
    }

    /// Returns true if no address is known yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.address
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}
