//! External address tracking.
//!
//! This module provides:
//! - The shared current-address cell ([`AddressCache`])
//! - Public IP detection via ifconfig.net ([`IpDetector`], [`IfconfigClient`])
//! - The periodic detection loop ([`IpWatcher`])
//!
//! In fixed-IP mode only the cache is used, seeded from configuration.
//! In detect-IP mode the watcher owns all writes to the cache and reports
//! address changes to a callback so the sync workers can re-register
//! immediately instead of waiting out their interval.

mod cache;
mod detect;
mod watcher;


pub use cache::AddressCache;
pub use detect::{DetectError, IfconfigClient, IfconfigResponse, IpDetector};
pub use watcher::IpWatcher;
