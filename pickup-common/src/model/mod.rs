//! Collection entity model
//!
//! The tree rebuilt on every refresh: a [`Collection`] owns its
//! [`Category`] list, categories own [`Artist`]s and bare [`Album`]s,
//! artists own albums and albums own [`Track`]s.
//!
//! The `category` and `artist` strings stored on an album are display
//! annotations stamped at wrap-up time. Ownership is the only relation.

use serde::{Deserialize, Serialize};

pub mod summary;

pub use summary::{AlbumSummary, ArtistSummary, CategorySummary, CollectionSummary};

/// Name of the category holding everything outside a `_`-prefixed folder.
pub const ROOT_CATEGORY: &str = "Music";

/// One playable file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// File name as found in the library (last path segment)
    pub title: String,
    /// Full path relative to the daemon's music directory
    pub path: String,
    /// Name of the owning album
    pub album: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub name: String,
    /// Owning category name, stamped on wrap-up
    pub category: String,
    /// Owning artist name, empty for a bare album
    pub artist: String,
    /// Directory holding the tracks
    pub path: String,
    pub tracks: Vec<Track>,
}

impl Album {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    /// True when the album hangs directly off its category.
    pub fn is_bare(&self) -> bool {
        self.artist.is_empty()
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub name: String,
    pub albums: Vec<Album>,
}

impl Artist {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            albums: Vec::new(),
        }
    }

    pub fn album(&self, name: &str) -> Option<&Album> {
        self.albums.iter().find(|a| a.name == name)
    }

    pub fn track_count(&self) -> usize {
        self.albums.iter().map(Album::track_count).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub artists: Vec<Artist>,
    /// Albums with no artist folder
    pub albums: Vec<Album>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            artists: Vec::new(),
            albums: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.artists.is_empty() && self.albums.is_empty()
    }

    pub fn artist(&self, name: &str) -> Option<&Artist> {
        self.artists.iter().find(|a| a.name == name)
    }

    /// Look up a bare album by name.
    pub fn album(&self, name: &str) -> Option<&Album> {
        self.albums.iter().find(|a| a.name == name)
    }

    pub fn track_count(&self) -> usize {
        self.artists.iter().map(Artist::track_count).sum::<usize>()
            + self.albums.iter().map(Album::track_count).sum::<usize>()
    }
}

/// The whole library as of one refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub categories: Vec<Category>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a wrapped-up category, keyed by name.
    ///
    /// A category whose name is already present is merged into the
    /// existing entry: its artists and bare albums are appended in order
    /// and the entry keeps its original position.
    pub fn add_category(&mut self, category: Category) {
        match self.categories.iter_mut().find(|c| c.name == category.name) {
            Some(existing) => {
                existing.artists.extend(category.artists);
                existing.albums.extend(category.albums);
            }
            None => self.categories.push(category),
        }
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn root(&self) -> Option<&Category> {
        self.category(ROOT_CATEGORY)
    }

    pub fn track_count(&self) -> usize {
        self.categories.iter().map(Category::track_count).sum()
    }

    /// Lighter-weight view of the tree for listing endpoints.
    pub fn summary(&self) -> CollectionSummary {
        CollectionSummary::from(self)
    }
}
