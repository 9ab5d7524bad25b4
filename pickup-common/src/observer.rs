//! Side channel for refresh diagnostics
//!
//! The builder never logs or times anything itself. It reports to a
//! [`RefreshObserver`], so the grouping logic stays deterministic in tests
//! while the server wires in [`TracingObserver`].

use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::events::RefreshEvent;

/// Receives events and stage durations from a refresh.
pub trait RefreshObserver: Send + Sync {
    fn record_event(&self, event: RefreshEvent);

    fn record_duration(&self, stage: &'static str, elapsed: Duration);
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl RefreshObserver for NoopObserver {
    fn record_event(&self, _event: RefreshEvent) {}

    fn record_duration(&self, _stage: &'static str, _elapsed: Duration) {}
}

/// Forwards to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl RefreshObserver for TracingObserver {
    fn record_event(&self, event: RefreshEvent) {
        let kind = event.event_type();
        match &event {
            RefreshEvent::MalformedPath { path, reason } => {
                warn!(event = kind, path = %path, reason = %reason, "Skipping malformed path");
            }
            RefreshEvent::IgnoredPath { path } => {
                debug!(event = kind, path = %path, "Ignoring album");
            }
            RefreshEvent::CategoryWrapped { name } => {
                debug!(event = kind, category = %name, "Wrapping up category");
            }
            RefreshEvent::FilesFetched { count } => {
                info!(event = kind, count, "Fetched files from source");
            }
            RefreshEvent::CollectionBuilt { categories, tracks } => {
                info!(event = kind, categories, tracks, "Collection rebuilt");
            }
            RefreshEvent::RefreshFailed { error } => {
                warn!(event = kind, error = %error, "Refresh failed");
            }
        }
    }

    fn record_duration(&self, stage: &'static str, elapsed: Duration) {
        info!(stage, elapsed_ms = elapsed.as_millis() as u64, "Refresh stage finished");
    }
}

/// Keeps everything in memory, for tests and the refresh report.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<RefreshEvent>>,
    durations: Mutex<Vec<(&'static str, Duration)>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<RefreshEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn durations(&self) -> Vec<(&'static str, Duration)> {
        self.durations.lock().map(|d| d.clone()).unwrap_or_default()
    }
}

impl RefreshObserver for RecordingObserver {
    fn record_event(&self, event: RefreshEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }

    fn record_duration(&self, stage: &'static str, elapsed: Duration) {
        if let Ok(mut durations) = self.durations.lock() {
            durations.push((stage, elapsed));
        }
    }
}

/// Run `f` and report how long it took under `stage`.
pub fn timed<T>(observer: &dyn RefreshObserver, stage: &'static str, f: impl FnOnce() -> T) -> T {
    let started = Instant::now();
    let value = f();
    observer.record_duration(stage, started.elapsed());
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_observer_keeps_order() {
        let observer = RecordingObserver::new();
        observer.record_event(RefreshEvent::FilesFetched { count: 3 });
        observer.record_event(RefreshEvent::IgnoredPath {
            path: "x/_y/z".to_string(),
        });

        let events = observer.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], RefreshEvent::FilesFetched { count: 3 });
    }

    #[test]
    fn test_timed_records_stage() {
        let observer = RecordingObserver::new();
        let value = timed(&observer, "build", || 42);
        assert_eq!(value, 42);

        let durations = observer.durations();
        assert_eq!(durations.len(), 1);
        assert_eq!(durations[0].0, "build");
    }
}
