//! Refresh trigger endpoint

use axum::{extract::State, Json};

use super::ApiError;
use crate::refresh::{refresh_state, RefreshReport};
use crate::AppState;

/// POST /api/refresh
///
/// Rebuilds the collection from the source. A fetch failure answers 502
/// and leaves the previous collection published.
pub async fn trigger_refresh(State(state): State<AppState>) -> Result<Json<RefreshReport>, ApiError> {
    let report = refresh_state(&state).await?;
    Ok(Json(report))
}
