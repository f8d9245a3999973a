//! Song entity and the identifier-unique collection built by ingestion

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single song from the user's library
///
/// Constructed once from a catalog detail record and never mutated.
/// Identity is the catalog identifier: two `Song` values with the same `id`
/// compare equal and hash identically regardless of their metadata, which is
/// what gives [`SongCollection`] its set semantics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Song {
    /// Stable catalog identifier
    pub id: String,
    /// Display title
    pub name: String,
    /// Display artist
    pub artist: String,
    /// Broad genre names from the song's catalog attributes
    pub genre_names: Vec<String>,
    /// Specific subgenre names from the song's genre relationships
    pub subgenre_names: Vec<String>,
    /// Preview clip URL, when the catalog provides one
    pub preview_url: Option<String>,
    /// Artwork URL, when the catalog provides one
    pub artwork_url: Option<String>,
}

impl PartialEq for Song {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Song {}

impl std::hash::Hash for Song {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Song {
    /// Whether any of this song's subgenres appears in `filters`
    pub fn matches_any_subgenre(&self, filters: &[String]) -> bool {
        self.subgenre_names.iter().any(|s| filters.contains(s))
    }
}

/// Identifier-unique set of songs produced by one ingestion run
///
/// Insertion order carries no meaning. Reinserting an already-seen
/// identifier is a no-op, so duplicate identifiers coming back from the
/// remote service cannot produce duplicate entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Song>", into = "Vec<Song>")]
pub struct SongCollection {
    songs: HashMap<String, Song>,
}

impl SongCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a song; returns false (and keeps the existing entry) if a song
    /// with the same identifier is already present.
    pub fn insert(&mut self, song: Song) -> bool {
        if self.songs.contains_key(&song.id) {
            return false;
        }
        self.songs.insert(song.id.clone(), song);
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.songs.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Song> {
        self.songs.get(id)
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Song> {
        self.songs.values()
    }
}

impl From<Vec<Song>> for SongCollection {
    fn from(songs: Vec<Song>) -> Self {
        let mut collection = Self::new();
        for song in songs {
            collection.insert(song);
        }
        collection
    }
}

impl From<SongCollection> for Vec<Song> {
    fn from(collection: SongCollection) -> Self {
        collection.songs.into_values().collect()
    }
}

impl FromIterator<Song> for SongCollection {
    fn from_iter<I: IntoIterator<Item = Song>>(iter: I) -> Self {
        let mut collection = Self::new();
        for song in iter {
            collection.insert(song);
        }
        collection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(id: &str, subgenres: &[&str]) -> Song {
        Song {
            id: id.to_string(),
            name: format!("Song {id}"),
            artist: "Test Artist".to_string(),
            genre_names: vec!["Rock".to_string()],
            subgenre_names: subgenres.iter().map(|s| s.to_string()).collect(),
            preview_url: None,
            artwork_url: None,
        }
    }

    #[test]
    fn equality_is_by_identifier_only() {
        let a = song("1", &["Indie"]);
        let mut b = song("1", &["Dance"]);
        b.name = "Different Name".to_string();
        assert_eq!(a, b);
    }

    #[test]
    fn reinsertion_of_seen_identifier_is_a_noop() {
        let mut collection = SongCollection::new();
        assert!(collection.insert(song("1", &["Indie"])));
        assert!(!collection.insert(song("1", &["Dance"])));
        assert_eq!(collection.len(), 1);
        // first write wins
        assert_eq!(collection.get("1").unwrap().subgenre_names, vec!["Indie"]);
    }

    #[test]
    fn matches_any_subgenre_is_logical_or() {
        let s = song("1", &["Indie", "Dance"]);
        assert!(s.matches_any_subgenre(&["Dance".to_string()]));
        assert!(s.matches_any_subgenre(&["Jazz".to_string(), "Indie".to_string()]));
        assert!(!s.matches_any_subgenre(&["Jazz".to_string()]));
    }

    #[test]
    fn serde_round_trip_preserves_the_set() {
        let collection: SongCollection =
            vec![song("1", &["Indie"]), song("2", &["Dance"]), song("1", &["Dup"])]
                .into_iter()
                .collect();
        let json = serde_json::to_string(&collection).unwrap();
        let restored: SongCollection = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.len(), 2);
        assert!(restored.contains("1"));
        assert!(restored.contains("2"));
    }
}
