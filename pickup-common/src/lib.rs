//! # pickup common library
//!
//! Shared code for the pickup service:
//! - Collection model (categories, artists, albums, tracks) and summaries
//! - Path decomposition and the streaming collection builder
//! - Refresh events and the observer side channel
//! - Configuration loading
//! - Error types

pub mod builder;
pub mod config;
pub mod error;
pub mod events;
pub mod model;
pub mod observer;
pub mod parts;

pub use builder::{build_collection, CollectionBuilder};
pub use error::{Error, Result};
pub use events::RefreshEvent;
pub use model::{Album, Artist, Category, Collection, Track, ROOT_CATEGORY};
pub use observer::{NoopObserver, RecordingObserver, RefreshObserver, TracingObserver};
