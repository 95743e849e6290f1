//! Application execution logic.
//!
//! This module wires the clients, store, API server, and coordinator
//! together and runs them until a shutdown signal arrives.

use std::sync::Arc;

use thiserror::Error;
use tokio::signal;
use tokio_util::sync::CancellationToken;

use dzsa_sync::api::{self, ApiState};
use dzsa_sync::config::{defaults, ValidatedConfig};
use dzsa_sync::ipwatch::{AddressCache, IfconfigClient, IpWatcher};
use dzsa_sync::launcher::DzsaLauncherClient;
use dzsa_sync::metrics;
use dzsa_sync::store::ServerStore;
use dzsa_sync::sync::{Coordinator, WorkerSettings};
use dzsa_sync::transport::ReqwestClient;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to install the Prometheus recorder.
    #[error("Failed to install metrics recorder: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    /// Failed to build the outbound HTTP client.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Failed to bind the API listener.
    #[error("Failed to bind API listener on {addr}: {source}")]
    ApiBind {
        /// The configured listen address.
        addr: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Builds the per-worker settings from the validated configuration.
fn worker_settings(config: &ValidatedConfig) -> WorkerSettings {
    WorkerSettings {
        interval: config.sync_interval,
        jitter_max: config.jitter_max,
        fallback_address: config.external_ip.clone(),
        ..WorkerSettings::default()
    }
}

/// Executes the main application loop.
///
/// This function:
/// 1. Installs the Prometheus recorder
/// 2. Builds the shared HTTP client and the launcher client
/// 3. Seeds the address cache (static address in fixed-IP mode)
/// 4. Binds and spawns the API server
/// 5. Starts the coordinator (IP watcher + one worker per server)
/// 6. Runs until shutdown signal (Ctrl+C / SIGTERM), then joins everything
///
/// # Errors
///
/// Returns an error if the metrics recorder, the HTTP client, or the API
/// listener cannot be set up. Everything after startup is non-fatal.
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    let metrics_handle = metrics::install()?;

    let http = ReqwestClient::with_timeouts(
        defaults::http_timeout(),
        defaults::http_connect_timeout(),
    )?;
    let launcher = Arc::new(DzsaLauncherClient::new(http.clone()));

    let cache = if config.detect_ip {
        Arc::new(AddressCache::new())
    } else {
        // Validation guarantees external_ip is present in fixed-IP mode.
        Arc::new(AddressCache::with_address(
            config.external_ip.clone().unwrap_or_default(),
        ))
    };
    let store = Arc::new(ServerStore::new(config.ports()));

    // The root token links the API server and the shutdown path: an API
    // failure cancels the process, a shutdown signal stops the server.
    let root_cancel = CancellationToken::new();

    let addr = config.api_addr();
    let listener = tokio::net::TcpListener::bind(addr.as_str()).await.map_err(|e| {
        RunError::ApiBind {
            addr: addr.clone(),
            source: e,
        }
    })?;
    let router = api::router(ApiState::new(Arc::clone(&store), Some(metrics_handle)));
    let api_cancel = root_cancel.clone();
    let api_task = tokio::spawn(async move {
        tracing::info!(addr = %addr, metrics = api::METRICS_PATH, "API server listening");
        let served = axum::serve(listener, router)
            .with_graceful_shutdown(api_cancel.clone().cancelled_owned())
            .await;
        if let Err(error) = served {
            tracing::error!(%error, "API server failed");
            api_cancel.cancel();
        }
    });

    let watcher = config.detect_ip.then(|| {
        IpWatcher::new(
            IfconfigClient::new(http.clone()),
            Arc::clone(&cache),
            config.detect_interval,
        )
    });

    tracing::info!(ports = ?config.ports(), "server ports from config, starting sync workers");
    let coordinator = Coordinator::start(
        launcher,
        cache,
        store,
        config.servers.clone(),
        watcher,
        worker_settings(&config),
    )
    .await;

    shutdown_signal(&root_cancel).await;
    tracing::info!("shutdown signal received, stopping workers");

    coordinator.shutdown().await;
    root_cancel.cancel();
    let _ = api_task.await;

    tracing::info!("shutdown complete");
    Ok(())
}

/// Returns when a shutdown signal is received or the root token fires.
async fn shutdown_signal(cancel: &CancellationToken) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
        () = cancel.cancelled() => {}
    }
}
