//! Generated playlists and the per-session playlist history

use super::Song;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of songs retained in a generated playlist
pub const PLAYLIST_MAX_SONGS: usize = 100;

/// A generated playlist
///
/// Immutable once created: the generator builds the full value and the
/// history only ever appends. The description is derived from the filters
/// at creation time (names joined with `", "` in supply order).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    id: Uuid,
    name: String,
    description: String,
    filters: Vec<String>,
    songs: Vec<Song>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl Playlist {
    /// Assemble a playlist from an already shuffled, already capped song
    /// sequence. Callers uphold the size cap; this constructor enforces it
    /// defensively by truncation.
    pub fn new(name: impl Into<String>, filters: Vec<String>, mut songs: Vec<Song>) -> Self {
        songs.truncate(PLAYLIST_MAX_SONGS);
        let description = filters.join(", ");
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description,
            filters,
            songs,
            created_at: chrono::Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn filters(&self) -> &[String] {
        &self.filters
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn created_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.created_at
    }
}

/// Append-only ordered sequence of playlists for one user session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaylistHistory {
    playlists: Vec<Playlist>,
}

impl PlaylistHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a playlist and return a reference to the stored entry
    pub fn push(&mut self, playlist: Playlist) -> &Playlist {
        self.playlists.push(playlist);
        self.playlists.last().unwrap()
    }

    /// Playlist at a history index, if any
    pub fn get(&self, index: usize) -> Option<&Playlist> {
        self.playlists.get(index)
    }

    pub fn last(&self) -> Option<&Playlist> {
        self.playlists.last()
    }

    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Playlist> {
        self.playlists.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(id: &str) -> Song {
        Song {
            id: id.to_string(),
            name: format!("Song {id}"),
            artist: "Artist".to_string(),
            genre_names: vec![],
            subgenre_names: vec![],
            preview_url: None,
            artwork_url: None,
        }
    }

    #[test]
    fn description_joins_filters_in_supply_order() {
        let playlist = Playlist::new(
            "Test",
            vec!["Indie".to_string(), "Dance".to_string(), "Dub".to_string()],
            vec![song("1")],
        );
        assert_eq!(playlist.description(), "Indie, Dance, Dub");
    }

    #[test]
    fn single_filter_description_has_no_separator() {
        let playlist = Playlist::new("Test", vec!["rock".to_string()], vec![song("1")]);
        assert_eq!(playlist.description(), "rock");
    }

    #[test]
    fn constructor_enforces_the_size_cap() {
        let songs: Vec<Song> = (0..150).map(|i| song(&i.to_string())).collect();
        let playlist = Playlist::new("Big", vec!["x".to_string()], songs);
        assert_eq!(playlist.len(), PLAYLIST_MAX_SONGS);
    }

    #[test]
    fn history_is_append_only_and_indexable() {
        let mut history = PlaylistHistory::new();
        assert!(history.get(0).is_none());

        history.push(Playlist::new("First", vec!["a".to_string()], vec![song("1")]));
        history.push(Playlist::new("Second", vec!["b".to_string()], vec![song("2")]));

        assert_eq!(history.len(), 2);
        assert_eq!(history.get(0).unwrap().name(), "First");
        assert_eq!(history.get(1).unwrap().name(), "Second");
        assert!(history.get(2).is_none());
    }
}
