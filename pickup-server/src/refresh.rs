//! Collection refresh
//!
//! One refresh = one fetch from the source + one pass of the builder.
//! A failed fetch aborts before anything is built; the caller keeps
//! serving whatever it published last.

use std::sync::Arc;
use std::time::{Duration, Instant};

use pickup_common::observer::timed;
use pickup_common::{build_collection, Collection, Error, RefreshEvent, RefreshObserver, Result};
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::source::MusicSource;
use crate::AppState;

/// Outcome of a successful refresh
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RefreshReport {
    pub categories: usize,
    pub tracks: usize,
    pub elapsed_ms: u64,
}

/// Fetch the path list and rebuild the collection.
pub async fn refresh(source: &dyn MusicSource, observer: &dyn RefreshObserver) -> Result<Collection> {
    debug!(source = %source.describe(), "Fetching files");
    let started = Instant::now();
    let files = match source.list_files().await {
        Ok(files) => files,
        Err(e) => {
            observer.record_event(RefreshEvent::RefreshFailed {
                error: e.to_string(),
            });
            return Err(e);
        }
    };
    observer.record_duration("fetch", started.elapsed());
    observer.record_event(RefreshEvent::FilesFetched { count: files.len() });

    let collection = timed(observer, "build", || build_collection(&files, observer));
    observer.record_event(RefreshEvent::CollectionBuilt {
        categories: collection.categories.len(),
        tracks: collection.track_count(),
    });
    Ok(collection)
}

/// Like [`refresh`], but a fatal error yields an empty collection alongside it.
pub async fn refresh_or_empty(
    source: &dyn MusicSource,
    observer: &dyn RefreshObserver,
) -> (Collection, Option<Error>) {
    match refresh(source, observer).await {
        Ok(collection) => (collection, None),
        Err(e) => (Collection::default(), Some(e)),
    }
}

/// Refresh the published collection, then publish the result.
///
/// On failure the previous collection stays published.
pub async fn refresh_state(state: &AppState) -> Result<RefreshReport> {
    let started = Instant::now();
    let collection = refresh(state.source.as_ref(), state.observer.as_ref()).await?;
    let report = RefreshReport {
        categories: collection.categories.len(),
        tracks: collection.track_count(),
        elapsed_ms: started.elapsed().as_millis() as u64,
    };
    state.publish(collection).await;
    Ok(report)
}

/// Refresh every `interval` until the task is aborted.
pub fn spawn_periodic_refresh(state: AppState, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // First tick fires immediately; startup already refreshed
        ticker.tick().await;
        loop {
            ticker.tick().await;
            match refresh_state(&state).await {
                Ok(report) => info!(
                    categories = report.categories,
                    tracks = report.tracks,
                    "Periodic refresh complete"
                ),
                Err(e) => warn!(
                    source = %state.source.describe(),
                    "Periodic refresh failed, keeping previous collection: {}",
                    e
                ),
            }
        }
    })
}

/// Wrap a source for [`AppState`]
pub fn shared_source<S: MusicSource + 'static>(source: S) -> Arc<dyn MusicSource> {
    Arc::new(source)
}
