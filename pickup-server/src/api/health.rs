//! Liveness and collection status

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
    /// Where refreshes fetch from
    pub source: String,
    /// Counts for the currently published collection
    pub categories: usize,
    pub tracks: usize,
}

/// GET /health
///
/// Never contacts the daemon; an empty collection is still healthy.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let collection = state.snapshot().await;
    Json(HealthResponse {
        status: "ok",
        module: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        source: state.source.describe(),
        categories: collection.categories.len(),
        tracks: collection.track_count(),
    })
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
