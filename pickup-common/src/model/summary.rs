//! Summary views of the collection
//!
//! Same hierarchy as the full model but without track lists, so the
//! listing endpoint stays small for large libraries.

use serde::{Deserialize, Serialize};

use super::{Album, Artist, Category, Collection};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumSummary {
    pub name: String,
    pub category: String,
    pub artist: String,
    pub path: String,
    pub track_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistSummary {
    pub name: String,
    pub albums: Vec<AlbumSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub name: String,
    pub artists: Vec<ArtistSummary>,
    pub albums: Vec<AlbumSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSummary {
    pub categories: Vec<CategorySummary>,
}

impl From<&Album> for AlbumSummary {
    fn from(album: &Album) -> Self {
        Self {
            name: album.name.clone(),
            category: album.category.clone(),
            artist: album.artist.clone(),
            path: album.path.clone(),
            track_count: album.track_count(),
        }
    }
}

impl From<&Artist> for ArtistSummary {
    fn from(artist: &Artist) -> Self {
        Self {
            name: artist.name.clone(),
            albums: artist.albums.iter().map(AlbumSummary::from).collect(),
        }
    }
}

impl From<&Category> for CategorySummary {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            artists: category.artists.iter().map(ArtistSummary::from).collect(),
            albums: category.albums.iter().map(AlbumSummary::from).collect(),
        }
    }
}

impl From<&Collection> for CollectionSummary {
    fn from(collection: &Collection) -> Self {
        Self {
            categories: collection
                .categories
                .iter()
                .map(CategorySummary::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Track;

    #[test]
    fn test_summary_mirrors_hierarchy_without_tracks() {
        let mut album = Album::new("Arrival", "Abba/Arrival");
        album.artist = "Abba".to_string();
        album.category = "Music".to_string();
        album.tracks.push(Track {
            title: "01.mp3".to_string(),
            path: "Abba/Arrival/01.mp3".to_string(),
            album: "Arrival".to_string(),
        });
        let mut artist = Artist::new("Abba");
        artist.albums.push(album);
        let mut category = Category::new("Music");
        category.artists.push(artist);
        let collection = Collection {
            categories: vec![category],
        };

        let summary = collection.summary();
        assert_eq!(summary.categories.len(), 1);
        let album = &summary.categories[0].artists[0].albums[0];
        assert_eq!(album.name, "Arrival");
        assert_eq!(album.track_count, 1);

        let json = serde_json::to_value(&summary).unwrap();
        assert!(json["categories"][0]["artists"][0]["albums"][0]
            .get("tracks")
            .is_none());
    }
}
