//! Per-user session state
//!
//! One `UserSession` is created per onboarded user from one ingestion run.
//! The song set and dictionaries are read-only after construction; the only
//! growth is the append-only playlist history, and the only mutation is the
//! presentation-side subgenre hide/unhide toggle.

use crate::error::GenerateError;
use crate::generator;
use mixcue_common::model::{
    GenreDictionary, Playlist, PlaylistHistory, SongCollection, SubgenreDictionary,
};
use mixcue_common::Credentials;
use mixcue_ingest::IngestOutcome;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Counts shown to the user after onboarding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCounts {
    pub songs: usize,
    pub genres: usize,
    pub subgenres: usize,
}

/// Everything mixcue knows about one onboarded user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSession {
    credentials: Credentials,
    songs: SongCollection,
    genres: GenreDictionary,
    subgenres: SubgenreDictionary,
    history: PlaylistHistory,
    /// Detail batches that failed during ingestion (their songs are absent)
    incomplete_batches: usize,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl UserSession {
    /// Build a session from a finished ingestion run
    pub fn from_outcome(credentials: Credentials, outcome: IngestOutcome) -> Self {
        let genres = outcome.genres;
        let mut subgenres = outcome.subgenres;
        // A name observed both as a genre and a subgenre is a genre.
        let genre_names = genres.names();
        subgenres.clean(genre_names.iter().map(String::as_str));

        Self {
            credentials,
            songs: outcome.songs,
            genres,
            subgenres,
            history: PlaylistHistory::new(),
            incomplete_batches: outcome.failed_batches.len(),
            created_at: chrono::Utc::now(),
        }
    }

    /// Generate a playlist with fresh randomness and append it to history
    pub fn create_playlist(
        &mut self,
        name: &str,
        filters: &[String],
    ) -> Result<&Playlist, GenerateError> {
        self.create_playlist_with_rng(name, filters, &mut rand::thread_rng())
    }

    /// Generate a playlist with a caller-supplied rng (tests seed this)
    pub fn create_playlist_with_rng<R: Rng>(
        &mut self,
        name: &str,
        filters: &[String],
        rng: &mut R,
    ) -> Result<&Playlist, GenerateError> {
        let playlist = generator::generate(&self.songs, filters, name, rng)?;
        tracing::info!(
            name = %playlist.name(),
            songs = playlist.len(),
            "playlist generated"
        );
        Ok(self.history.push(playlist))
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn songs(&self) -> &SongCollection {
        &self.songs
    }

    /// Genre names, sorted, for presentation
    pub fn genre_names(&self) -> Vec<String> {
        self.genres.names()
    }

    /// Visible subgenre names, sorted, for presentation
    pub fn subgenre_names(&self) -> Vec<String> {
        self.subgenres.names()
    }

    pub fn genre_id(&self, name: &str) -> Option<&str> {
        self.genres.get_id(name)
    }

    pub fn counts(&self) -> SessionCounts {
        SessionCounts {
            songs: self.songs.len(),
            genres: self.genres.len(),
            subgenres: self.subgenres.len(),
        }
    }

    /// Hide rarely occurring subgenres from presentation
    pub fn hide_subgenres_below(&mut self, threshold: u64) {
        self.subgenres.hide_below(threshold);
    }

    /// Restore all hidden subgenres
    pub fn unhide_subgenres(&mut self) {
        self.subgenres.unhide_all();
    }

    pub fn history(&self) -> &PlaylistHistory {
        &self.history
    }

    /// Playlist at a history index, if any
    pub fn playlist(&self, index: usize) -> Option<&Playlist> {
        self.history.get(index)
    }

    /// Whether ingestion completed without dropping any detail batch
    pub fn library_complete(&self) -> bool {
        self.incomplete_batches == 0
    }

    pub fn created_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.created_at
    }
}
