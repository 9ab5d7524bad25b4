//! Collection browsing endpoints
//!
//! Listing endpoints return summaries (no track lists); the album endpoint
//! returns the full album with its tracks.

use axum::{
    extract::{Path, State},
    Json,
};
use pickup_common::model::{ArtistSummary, CategorySummary, CollectionSummary};
use pickup_common::Album;

use super::ApiError;
use crate::AppState;

/// GET /api/categories
pub async fn list_categories(State(state): State<AppState>) -> Json<CollectionSummary> {
    let collection = state.snapshot().await;
    Json(collection.summary())
}

/// GET /api/categories/:category
pub async fn get_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<CategorySummary>, ApiError> {
    let collection = state.snapshot().await;
    collection
        .category(&category)
        .map(|c| Json(CategorySummary::from(c)))
        .ok_or(ApiError::CategoryNotFound(category))
}

/// GET /api/artists/:category/:artist
pub async fn get_artist(
    State(state): State<AppState>,
    Path((category, artist)): Path<(String, String)>,
) -> Result<Json<ArtistSummary>, ApiError> {
    let collection = state.snapshot().await;
    let found = collection
        .category(&category)
        .ok_or_else(|| ApiError::CategoryNotFound(category.clone()))?
        .artist(&artist)
        .map(ArtistSummary::from);

    found
        .map(Json)
        .ok_or(ApiError::ArtistNotFound { category, artist })
}

/// GET /api/albums/:category/:album
///
/// Bare album, filed directly under its category.
pub async fn get_bare_album(
    State(state): State<AppState>,
    Path((category, album)): Path<(String, String)>,
) -> Result<Json<Album>, ApiError> {
    let collection = state.snapshot().await;
    let found = collection
        .category(&category)
        .ok_or_else(|| ApiError::CategoryNotFound(category.clone()))?
        .album(&album)
        .cloned();

    found
        .map(Json)
        .ok_or(ApiError::BareAlbumNotFound { category, album })
}

/// GET /api/albums/:category/:artist/:album
pub async fn get_album(
    State(state): State<AppState>,
    Path((category, artist, album)): Path<(String, String, String)>,
) -> Result<Json<Album>, ApiError> {
    let collection = state.snapshot().await;
    let found = collection
        .category(&category)
        .ok_or_else(|| ApiError::CategoryNotFound(category.clone()))?
        .artist(&artist)
        .and_then(|a| a.album(&album))
        .cloned();

    found.map(Json).ok_or(ApiError::AlbumNotFound {
        category,
        artist,
        album,
    })
}
