//! Event types emitted while rebuilding the collection

use serde::{Deserialize, Serialize};

/// Refresh event types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RefreshEvent {
    /// A path could not be decomposed and was skipped
    MalformedPath { path: String, reason: String },

    /// A path inside an ignorable pseudo-folder was skipped
    IgnoredPath { path: String },

    /// A category was closed and added to the collection
    CategoryWrapped { name: String },

    /// The source returned its file list
    FilesFetched { count: usize },

    /// A refresh finished building
    CollectionBuilt { categories: usize, tracks: usize },

    /// A refresh was aborted before building
    RefreshFailed { error: String },
}

impl RefreshEvent {
    /// Short name used as a log field
    pub fn event_type(&self) -> &'static str {
        match self {
            RefreshEvent::MalformedPath { .. } => "MalformedPath",
            RefreshEvent::IgnoredPath { .. } => "IgnoredPath",
            RefreshEvent::CategoryWrapped { .. } => "CategoryWrapped",
            RefreshEvent::FilesFetched { .. } => "FilesFetched",
            RefreshEvent::CollectionBuilt { .. } => "CollectionBuilt",
            RefreshEvent::RefreshFailed { .. } => "RefreshFailed",
        }
    }
}
