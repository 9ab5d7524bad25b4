//! Music sources
//!
//! A source hands the refresh a sorted list of library paths. The daemon
//! client lives in [`crate::mpd`]; [`StaticSource`] serves a fixed list.

use async_trait::async_trait;
use pickup_common::Result;

/// Supplies the sorted path list for one refresh.
#[async_trait]
pub trait MusicSource: Send + Sync {
    /// Fetch every file path, in the order the library sorts them.
    async fn list_files(&self) -> Result<Vec<String>>;

    /// Human-readable origin for log lines
    fn describe(&self) -> String;
}

/// Fixed in-memory path list
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    files: Vec<String>,
}

impl StaticSource {
    pub fn new<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            files: files.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl MusicSource for StaticSource {
    async fn list_files(&self) -> Result<Vec<String>> {
        Ok(self.files.clone())
    }

    fn describe(&self) -> String {
        format!("static list ({} files)", self.files.len())
    }
}
