//! HTTP API server: synced-servers listing and Prometheus metrics.
//!
//! Read-only: handlers never touch the sync path, they only
//! read copies out of the [`ServerStore`]. Consumers cannot distinguish
//! "unconfigured port" from "configured but never synced"; both are 404.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;

use crate::store::{ServerEntry, ServerStore};

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

/// Path for the Prometheus metrics handler.
pub const METRICS_PATH: &str = "/metrics";

/// Path for the synced-servers listing.
pub const SERVERS_PATH: &str = "/api/v1/servers";

/// Shared state for the API handlers.
#[derive(Clone)]
pub struct ApiState {
    store: Arc<ServerStore>,
    metrics: Option<PrometheusHandle>,
}

impl ApiState {
    /// Creates the handler state.
    ///
    /// `metrics` is `None` only in tests; production wiring always
    /// passes the installed recorder handle.
    #[must_use]
    pub const fn new(store: Arc<ServerStore>, metrics: Option<PrometheusHandle>) -> Self {
        Self { store, metrics }
    }
}

/// Response shape of the listing route.
#[derive(Debug, Serialize)]
struct ListResponse {
    servers: Vec<ServerEntry>,
}

/// Builds the API router.
#[must_use]
pub fn router(state: ApiState) -> Router {
    Router::new()
        .route(METRICS_PATH, get(render_metrics))
        .route(SERVERS_PATH, get(list_servers))
        .route("/api/v1/servers/:port", get(get_server))
        .with_state(state)
}

async fn list_servers(State(state): State<ApiState>) -> Json<ListResponse> {
    Json(ListResponse {
        servers: state.store.get_all(),
    })
}

async fn get_server(State(state): State<ApiState>, Path(port): Path<String>) -> Response {
    // Parse first, look up second: any numeric value that is not a
    // configured port with data is a plain 404.
    let Ok(port) = port.parse::<i64>() else {
        return (StatusCode::BAD_REQUEST, "invalid port").into_response();
    };

    let listing = u16::try_from(port).ok().and_then(|p| state.store.get(p));
    match listing {
        Some(result) => Json(result).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn render_metrics(State(state): State<ApiState>) -> String {
    state
        .metrics
        .as_ref()
        .map_or_else(String::new, PrometheusHandle::render)
}
