//! Path decomposition
//!
//! Splits one library path into the names the collection is grouped by.
//! The library layout is one of:
//!
//! ```text
//! Artist/Album/Track
//! Album/Track                        (bare album)
//! _Category/Artist/Album/Track
//! _Category/Album/Track              (bare album in a subcategory)
//! ```
//!
//! An album folder starting with `_` (e.g. `_mp3`) marks a pseudo-folder
//! the collection ignores.

use crate::error::{Error, Result};

/// Path segment delimiter used by the music daemon.
pub const DELIMITER: char = '/';

/// Prefix of album folders that are skipped entirely.
pub const IGNORE_PREFIX: char = '_';

/// Prefix of a first path segment naming a subcategory.
pub const SUBCATEGORY_PREFIX: char = '_';

/// Names derived from one library path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathParts {
    pub category: Option<String>,
    pub artist: Option<String>,
    pub album: String,
    pub track: String,
}

impl PathParts {
    /// True when the album folder is an ignorable pseudo-folder.
    pub fn is_ignorable(&self) -> bool {
        self.album.starts_with(IGNORE_PREFIX)
    }
}

/// Decompose a path into category, artist, album and track.
///
/// Ignorable paths are returned without category or artist and without
/// error; the caller decides to skip them.
pub fn decompose(path: &str) -> Result<PathParts> {
    let parts: Vec<&str> = path.split(DELIMITER).collect();
    let nparts = parts.len();
    if nparts < 2 {
        return Err(Error::malformed(path, "too few parts"));
    }

    let track = parts[nparts - 1].to_string();
    let album = parts[nparts - 2].to_string();

    if album.starts_with(IGNORE_PREFIX) {
        return Ok(PathParts {
            category: None,
            artist: None,
            album,
            track,
        });
    }

    let in_subcategory = path.starts_with(SUBCATEGORY_PREFIX);
    let parts_with_artist = if in_subcategory { 4 } else { 3 };

    // One part short of the full layout is a bare album
    if nparts < parts_with_artist - 1 || nparts > parts_with_artist {
        return Err(Error::malformed(path, "wrong number of parts"));
    }

    let artist = (nparts == parts_with_artist).then(|| parts[nparts - 3].to_string());
    let category = in_subcategory.then(|| parts[0].to_string());

    Ok(PathParts {
        category,
        artist,
        album,
        track,
    })
}

/// Directory of a path: everything before the last delimiter.
pub fn album_dir(path: &str) -> &str {
    match path.rfind(DELIMITER) {
        Some(idx) => &path[..idx],
        None => ".",
    }
}
