//! The per-server sync loop.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::ipwatch::AddressCache;
use crate::launcher::LauncherClient;
use crate::metrics;
use crate::store::ServerStore;

/// At most one trigger is ever pending per worker. An immediate resync is
/// idempotent, so additional triggers while one is queued carry no
/// information and are dropped by the sender.
const TRIGGER_CAPACITY: usize = 1;

/// Creates the coalescing trigger mailbox for one worker.
#[must_use]
pub fn trigger_channel() -> (mpsc::Sender<()>, mpsc::Receiver<()>) {
    mpsc::channel(TRIGGER_CAPACITY)
}

/// Default interval between periodic syncs (1 hour).
pub const DEFAULT_SYNC_INTERVAL: Duration = Duration::from_secs(3600);

/// Default maximum random start delay per attempt (20 seconds).
///
/// Servers sharing a host would otherwise hit the directory in lockstep
/// on every tick.
pub const DEFAULT_JITTER_MAX: Duration = Duration::from_secs(20);

/// What woke the worker up.
enum Wake {
    Tick,
    Trigger,
}

/// One server's independent periodic sync loop.
///
/// The worker alternates between waiting (on whichever of interval tick,
/// trigger, or cancellation fires first) and performing exactly one sync
/// attempt; attempts never overlap within a worker. A trigger-initiated
/// sync restarts the interval from zero, so an IP change costs at most
/// one extra sync per server and the old timer cannot fire a second sync
/// shortly after.
pub struct SyncWorker<C> {
    name: String,
    port: u16,
    client: Arc<C>,
    cache: Arc<AddressCache>,
    store: Arc<ServerStore>,
    trigger: mpsc::Receiver<()>,
    fallback_address: Option<String>,
    interval: Duration,
    jitter_max: Duration,
}

impl<C> SyncWorker<C> {
    /// Creates a worker for one server.
    pub fn new(
        name: impl Into<String>,
        port: u16,
        client: Arc<C>,
        cache: Arc<AddressCache>,
        store: Arc<ServerStore>,
        trigger: mpsc::Receiver<()>,
    ) -> Self {
        Self {
            name: name.into(),
            port,
            client,
            cache,
            store,
            trigger,
            fallback_address: None,
            interval: DEFAULT_SYNC_INTERVAL,
            jitter_max: DEFAULT_JITTER_MAX,
        }
    }

    /// Sets the address used when the cache is empty (fixed-IP mode).
    #[must_use]
    pub fn with_fallback_address(mut self, address: Option<String>) -> Self {
        self.fallback_address = address.filter(|a| !a.is_empty());
        self
    }

    /// Sets the periodic sync interval.
    #[must_use]
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Sets the maximum random start delay per attempt. Zero disables jitter.
    #[must_use]
    pub const fn with_jitter_max(mut self, jitter_max: Duration) -> Self {
        self.jitter_max = jitter_max;
        self
    }
}

impl<C: LauncherClient> SyncWorker<C> {
    /// Runs the sync loop until `cancel` fires.
    ///
    /// The first sync happens immediately on startup; failures are logged
    /// and never terminate the loop.
    pub async fn run(mut self, cancel: CancellationToken) {
        tracing::info!(port = self.port, server = %self.name, "sync worker started");

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            let wake = tokio::select! {
                () = cancel.cancelled() => {
                    tracing::info!(port = self.port, "sync worker shutting down");
                    return;
                }
                // The first tick completes immediately: the startup sync.
                _ = ticker.tick() => Wake::Tick,
                Some(()) = self.trigger.recv() => Wake::Trigger,
            };

            // Cancellation also aborts an attempt that is mid-jitter or
            // still waiting on its request timeout.
            tokio::select! {
                () = cancel.cancelled() => {
                    tracing::info!(port = self.port, "sync worker shutting down");
                    return;
                }
                () = self.sync_once() => {}
            }
            if matches!(wake, Wake::Trigger) {
                ticker.reset();
            }
        }
    }

    /// Performs one sync attempt: resolve the address, query the
    /// directory, store the listing on success.
    async fn sync_once(&self) {
        if let Some(delay) = self.start_jitter() {
            tokio::time::sleep(delay).await;
        }

        let Some(address) = self.resolve_address() else {
            tracing::warn!(port = self.port, "no external address available, skipping sync");
            return;
        };

        match self.client.query(&address, self.port).await {
            Err(error) => {
                tracing::error!(
                    address = %address,
                    port = self.port,
                    %error,
                    "server sync failed"
                );
            }
            Ok(response) => {
                let result = response.result;
                metrics::record_player_count(&self.name, i64::from(result.players));
                tracing::info!(
                    endpoint = %result.endpoint,
                    name = %result.name,
                    players = result.players,
                    max_players = result.max_players,
                    version = %result.version,
                    map = %result.map,
                    "server synced with dzsa launcher"
                );
                self.store.set(self.port, result);
            }
        }
    }

    /// The cached address wins; the configured static address is the
    /// fallback. `None` means not ready (detect-IP mode, nothing
    /// detected yet), which is an expected transient state rather than
    /// an error.
    fn resolve_address(&self) -> Option<String> {
        let cached = self.cache.get();
        if !cached.is_empty() {
            return Some(cached);
        }
        self.fallback_address.clone()
    }

    fn start_jitter(&self) -> Option<Duration> {
        if self.jitter_max.is_zero() {
            return None;
        }
        let secs = rand::thread_rng().gen_range(0..=self.jitter_max.as_secs());
        (secs > 0).then(|| Duration::from_secs(secs))
    }
}
