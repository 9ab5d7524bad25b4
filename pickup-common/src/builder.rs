//! Collection builder
//!
//! Streams a sorted list of library paths into a [`Collection`]. Paths
//! sharing a category, artist or album must be contiguous (the daemon
//! returns them sorted); the builder keeps only the album, artist and
//! category currently being accumulated and wraps each one up into its
//! parent as soon as the grouping key changes.
//!
//! Transitions are applied per path in a fixed order: album, then artist,
//! then category. Wrapping up an album therefore still sees the artist and
//! category it belonged to.

use std::mem;

use crate::error::Error;
use crate::events::RefreshEvent;
use crate::model::{Album, Artist, Category, Collection, Track, ROOT_CATEGORY};
use crate::observer::RefreshObserver;
use crate::parts::{album_dir, decompose, PathParts};

/// One level of the accumulation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot<T> {
    Empty,
    Accumulating(T),
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Slot::Empty
    }
}

impl<T> Slot<T> {
    pub fn as_ref(&self) -> Option<&T> {
        match self {
            Slot::Empty => None,
            Slot::Accumulating(value) => Some(value),
        }
    }

    /// Close the slot, returning what was in it.
    fn take(&mut self) -> Option<T> {
        match mem::take(self) {
            Slot::Empty => None,
            Slot::Accumulating(value) => Some(value),
        }
    }
}

/// The category level never goes empty: it falls back to the root.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategorySlot {
    #[default]
    Root,
    Named(Category),
}

/// Streaming reducer from sorted paths to a [`Collection`].
pub struct CollectionBuilder<'a> {
    observer: &'a dyn RefreshObserver,
    collection: Collection,
    root: Category,
    category: CategorySlot,
    artist: Slot<Artist>,
    album: Slot<Album>,
}

impl<'a> CollectionBuilder<'a> {
    pub fn new(observer: &'a dyn RefreshObserver) -> Self {
        // Root is registered up front so it always comes first; its
        // wrap-up in `finish` merges into this entry.
        let mut collection = Collection::new();
        collection.add_category(Category::new(ROOT_CATEGORY));

        Self {
            observer,
            collection,
            root: Category::new(ROOT_CATEGORY),
            category: CategorySlot::Root,
            artist: Slot::Empty,
            album: Slot::Empty,
        }
    }

    /// Feed the next path in sorted order.
    pub fn push(&mut self, path: &str) {
        let parts = match decompose(path) {
            Ok(parts) => parts,
            Err(e) => {
                let reason = match e {
                    Error::MalformedPath { reason, .. } => reason,
                    other => other.to_string(),
                };
                self.observer.record_event(RefreshEvent::MalformedPath {
                    path: path.to_string(),
                    reason,
                });
                return;
            }
        };

        if parts.is_ignorable() {
            self.observer.record_event(RefreshEvent::IgnoredPath {
                path: path.to_string(),
            });
            return;
        }

        self.transition_album(&parts, path);
        self.transition_artist(&parts);
        self.transition_category(&parts);

        if let Slot::Accumulating(album) = &mut self.album {
            album.tracks.push(Track {
                title: parts.track,
                path: path.to_string(),
                album: album.name.clone(),
            });
        }
    }

    /// Wrap up everything still open and return the collection.
    pub fn finish(mut self) -> Collection {
        self.wrap_up_album();
        self.wrap_up_artist();
        self.wrap_up_category();

        let root = mem::take(&mut self.root);
        self.observer.record_event(RefreshEvent::CategoryWrapped {
            name: root.name.clone(),
        });
        self.collection.add_category(root);
        self.collection
    }

    pub fn current_album(&self) -> Option<&Album> {
        self.album.as_ref()
    }

    pub fn current_artist(&self) -> Option<&Artist> {
        self.artist.as_ref()
    }

    /// Name of the open subcategory, `None` while at the root.
    pub fn current_category(&self) -> Option<&str> {
        match &self.category {
            CategorySlot::Root => None,
            CategorySlot::Named(category) => Some(&category.name),
        }
    }

    fn current_artist_name(&self) -> Option<&str> {
        self.artist.as_ref().map(|a| a.name.as_str())
    }

    fn transition_album(&mut self, parts: &PathParts, path: &str) {
        let same = match &self.album {
            Slot::Accumulating(album) => {
                album.name == parts.album
                    && self.current_artist_name() == parts.artist.as_deref()
                    && self.current_category() == parts.category.as_deref()
            }
            Slot::Empty => false,
        };

        if !same {
            self.wrap_up_album();
            self.album = Slot::Accumulating(Album::new(&parts.album, album_dir(path)));
        }
    }

    fn transition_artist(&mut self, parts: &PathParts) {
        match &parts.artist {
            Some(name) => {
                let same = self.current_artist_name() == Some(name.as_str())
                    && self.current_category() == parts.category.as_deref();
                if !same {
                    self.wrap_up_artist();
                    self.artist = Slot::Accumulating(Artist::new(name));
                }
            }
            // Bare album: no artist accumulates across it
            None => self.wrap_up_artist(),
        }
    }

    fn transition_category(&mut self, parts: &PathParts) {
        match &parts.category {
            Some(name) => {
                if self.current_category() != Some(name.as_str()) {
                    self.wrap_up_category();
                    self.category = CategorySlot::Named(Category::new(name));
                }
            }
            None => self.wrap_up_category(),
        }
    }

    fn wrap_up_album(&mut self) {
        let Some(mut album) = self.album.take() else {
            return;
        };

        let category = active_category(&mut self.category, &mut self.root);
        album.category = category.name.clone();
        match &mut self.artist {
            Slot::Accumulating(artist) => {
                album.artist = artist.name.clone();
                artist.albums.push(album);
            }
            Slot::Empty => category.albums.push(album),
        }
    }

    fn wrap_up_artist(&mut self) {
        if let Some(artist) = self.artist.take() {
            active_category(&mut self.category, &mut self.root)
                .artists
                .push(artist);
        }
    }

    /// Close a named category; the root is only wrapped up in `finish`.
    fn wrap_up_category(&mut self) {
        if let CategorySlot::Named(category) = mem::take(&mut self.category) {
            self.observer.record_event(RefreshEvent::CategoryWrapped {
                name: category.name.clone(),
            });
            self.collection.add_category(category);
        }
    }
}

fn active_category<'c>(slot: &'c mut CategorySlot, root: &'c mut Category) -> &'c mut Category {
    match slot {
        CategorySlot::Root => root,
        CategorySlot::Named(category) => category,
    }
}

/// Build a collection from sorted paths in one pass.
pub fn build_collection<I, S>(paths: I, observer: &dyn RefreshObserver) -> Collection
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut builder = CollectionBuilder::new(observer);
    for path in paths {
        builder.push(path.as_ref());
    }
    builder.finish()
}
