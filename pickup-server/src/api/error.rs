//! API error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pickup_common::Error;
use serde_json::json;

/// Errors returned by the collection endpoints
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Artist not found: {category}/{artist}")]
    ArtistNotFound { category: String, artist: String },

    #[error("Album not found: {category}/{artist}/{album}")]
    AlbumNotFound {
        category: String,
        artist: String,
        album: String,
    },

    #[error("Album not found: {category}/{album}")]
    BareAlbumNotFound { category: String, album: String },

    /// The music daemon could not be read
    #[error("{0}")]
    Source(#[from] Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::CategoryNotFound(_)
            | ApiError::ArtistNotFound { .. }
            | ApiError::AlbumNotFound { .. }
            | ApiError::BareAlbumNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Source(Error::SourceFetch(_)) => StatusCode::BAD_GATEWAY,
            ApiError::Source(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
