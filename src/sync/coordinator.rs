//! Lifecycle wiring: owns the watcher and every sync worker.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::ipwatch::{AddressCache, IpDetector, IpWatcher};
use crate::launcher::LauncherClient;
use crate::store::ServerStore;

use super::worker::{
    trigger_channel, SyncWorker, DEFAULT_JITTER_MAX, DEFAULT_SYNC_INTERVAL,
};
use super::SyncTarget;

/// Settings shared by every spawned worker.
#[derive(Debug, Clone)]
pub struct WorkerSettings {
    /// Interval between periodic syncs.
    pub interval: Duration,
    /// Maximum random start delay per attempt. Zero disables jitter.
    pub jitter_max: Duration,
    /// Static address used when the cache is empty.
    pub fallback_address: Option<String>,
    /// Head start given to the watcher before workers spawn, so the
    /// first sync can already use a detected address.
    pub startup_grace: Duration,
}

impl Default for WorkerSettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_SYNC_INTERVAL,
            jitter_max: DEFAULT_JITTER_MAX,
            fallback_address: None,
            startup_grace: Duration::from_secs(2),
        }
    }
}

/// Owns one sync worker per configured server plus the optional IP
/// watcher, and manages their shared lifecycle.
///
/// The watcher's change callback fans a trigger out to every worker with
/// a non-blocking send; a worker that already has a trigger pending
/// simply keeps the one it has. [`Coordinator::shutdown`] cancels every
/// owned task and waits for all of them to return, so no sync activity
/// survives the call.
pub struct Coordinator {
    cancel: CancellationToken,
    triggers: Vec<mpsc::Sender<()>>,
    tasks: Vec<JoinHandle<()>>,
}

impl Coordinator {
    /// Spawns the watcher (when a detector loop is supplied) and one
    /// worker per target.
    ///
    /// In detect-IP mode the watcher gets `settings.startup_grace` to
    /// populate the address cache before the workers perform their
    /// startup sync.
    pub async fn start<C, D>(
        client: Arc<C>,
        cache: Arc<AddressCache>,
        store: Arc<ServerStore>,
        targets: Vec<SyncTarget>,
        watcher: Option<IpWatcher<D>>,
        settings: WorkerSettings,
    ) -> Self
    where
        C: LauncherClient + 'static,
        D: IpDetector + 'static,
    {
        let cancel = CancellationToken::new();
        let mut triggers = Vec::with_capacity(targets.len());
        let mut receivers = Vec::with_capacity(targets.len());
        for _ in &targets {
            let (tx, rx) = trigger_channel();
            triggers.push(tx);
            receivers.push(rx);
        }

        let mut tasks = Vec::with_capacity(targets.len() + 1);

        if let Some(watcher) = watcher {
            let senders = triggers.clone();
            let on_change = move |old: &str, new: &str| {
                tracing::info!(
                    old_ip = old,
                    new_ip = new,
                    "external IP changed, triggering sync for all servers"
                );
                for sender in &senders {
                    // A full mailbox means a trigger is already pending.
                    let _ = sender.try_send(());
                }
            };
            tasks.push(tokio::spawn(watcher.run(cancel.clone(), on_change)));

            if !settings.startup_grace.is_zero() {
                tokio::time::sleep(settings.startup_grace).await;
            }
        }

        for (target, trigger) in targets.into_iter().zip(receivers) {
            let worker = SyncWorker::new(
                target.name,
                target.port,
                Arc::clone(&client),
                Arc::clone(&cache),
                Arc::clone(&store),
                trigger,
            )
            .with_interval(settings.interval)
            .with_jitter_max(settings.jitter_max)
            .with_fallback_address(settings.fallback_address.clone());

            tasks.push(tokio::spawn(worker.run(cancel.clone())));
        }

        Self {
            cancel,
            triggers,
            tasks,
        }
    }

    /// Sends a coalescing trigger to every worker.
    ///
    /// Never blocks; a worker with a trigger already pending keeps the
    /// one it has.
    pub fn trigger_all(&self) {
        for sender in &self.triggers {
            let _ = sender.try_send(());
        }
    }

    /// Cancels every owned task and waits for all of them to terminate.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        for task in self.tasks {
            let _ = task.await;
        }
    }
}
