//! pickup-server library - collection browsing service
//!
//! Rebuilds the music collection from an MPD daemon and serves it as JSON.

use std::sync::Arc;

use axum::Router;
use pickup_common::{Collection, RefreshObserver};
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod mpd;
pub mod refresh;
pub mod source;

use source::MusicSource;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Last successfully built collection
    ///
    /// A refresh builds a new collection off to the side and swaps the
    /// inner `Arc`; readers hold their snapshot as long as they need.
    pub collection: Arc<RwLock<Arc<Collection>>>,
    /// Where refreshes fetch paths from
    pub source: Arc<dyn MusicSource>,
    /// Receives refresh events and timings
    pub observer: Arc<dyn RefreshObserver>,
}

impl AppState {
    /// Create new application state with an empty collection
    pub fn new(source: Arc<dyn MusicSource>, observer: Arc<dyn RefreshObserver>) -> Self {
        Self {
            collection: Arc::new(RwLock::new(Arc::new(Collection::default()))),
            source,
            observer,
        }
    }

    /// Current published collection
    pub async fn snapshot(&self) -> Arc<Collection> {
        self.collection.read().await.clone()
    }

    /// Replace the published collection
    pub async fn publish(&self, collection: Collection) {
        *self.collection.write().await = Arc::new(collection);
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    let api = Router::new()
        .route("/api/categories", get(api::list_categories))
        .route("/api/categories/:category", get(api::get_category))
        .route("/api/artists/:category/:artist", get(api::get_artist))
        .route("/api/albums/:category/:album", get(api::get_bare_album))
        .route("/api/albums/:category/:artist/:album", get(api::get_album))
        .route("/api/refresh", post(api::trigger_refresh));

    Router::new()
        .merge(api)
        .merge(api::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
