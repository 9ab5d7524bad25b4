//! HTTP API handlers for pickup-server

pub mod collection;
pub mod error;
pub mod health;
pub mod refresh;

pub use collection::{get_album, get_artist, get_bare_album, get_category, list_categories};
pub use error::ApiError;
pub use health::health_routes;
pub use refresh::trigger_refresh;
