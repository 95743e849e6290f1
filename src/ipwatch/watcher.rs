//! Periodic IP detection loop.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::{AddressCache, IpDetector};

/// Maintains the [`AddressCache`] when running in detect-IP mode.
///
/// The watcher probes immediately on start (best effort; a failure is
/// logged and ignored, since a later probe may succeed and workers fall
/// back to the configured static address if one exists), then on a fixed
/// interval. When a probe observes a different address than the cache
/// previously held, the change callback fires with `(old, new)` before
/// the loop returns to waiting. First population (empty previous value)
/// is not a change.
pub struct IpWatcher<D> {
    detector: D,
    cache: Arc<AddressCache>,
    interval: Duration,
}

impl<D: IpDetector> IpWatcher<D> {
    /// Creates a watcher that refreshes `cache` through `detector`.
    pub fn new(detector: D, cache: Arc<AddressCache>, interval: Duration) -> Self {
        Self {
            detector,
            cache,
            interval,
        }
    }

    /// Runs the detection loop until `cancel` fires.
    ///
    /// `on_change` is invoked with `(old, new)` whenever a probe observes
    /// an address different from the non-empty previous value. The
    /// callback runs on the watcher task; it must not block.
    pub async fn run<F>(self, cancel: CancellationToken, on_change: F)
    where
        F: Fn(&str, &str) + Send + Sync,
    {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                () = cancel.cancelled() => {
                    tracing::info!("ip watcher shutting down");
                    return;
                }
                // First tick completes immediately: the startup probe.
                _ = ticker.tick() => {
                    // Cancellation also aborts a probe that is still
                    // waiting on its request timeout.
                    tokio::select! {
                        () = cancel.cancelled() => {
                            tracing::info!("ip watcher shutting down");
                            return;
                        }
                        () = self.probe(&on_change) => {}
                    }
                }
            }
        }
    }

    async fn probe<F>(&self, on_change: &F)
    where
        F: Fn(&str, &str) + Send + Sync,
    {
        match self.detector.detect().await {
            Err(error) => {
                tracing::error!(%error, "ip detection failed");
            }
            Ok(address) if address.is_empty() => {
                tracing::warn!("ip detection returned an empty address");
            }
            Ok(address) => {
                let previous = self.cache.set(address.clone());
                tracing::info!(detected_ip = %address, "external address refreshed");
                if !previous.is_empty() && previous != address {
                    on_change(&previous, &address);
                }
            }
        }
    }
}
