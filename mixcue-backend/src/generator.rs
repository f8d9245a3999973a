//! Playlist generation: filter, shuffle, cap
//!
//! A song is included iff any of its subgenres appears in the filter set
//! (logical OR). The included set is shuffled uniformly and truncated to
//! [`PLAYLIST_MAX_SONGS`]. The rng is injected so tests can seed it;
//! production passes `thread_rng()`, which is why two identical calls
//! produce different orderings.

use crate::error::GenerateError;
use mixcue_common::model::{Playlist, Song, SongCollection, PLAYLIST_MAX_SONGS};
use rand::seq::SliceRandom;
use rand::Rng;

/// Generate a playlist from the ingested song set
///
/// Fails with [`GenerateError::EmptyResult`] when nothing matches — an
/// empty playlist never masquerades as success.
pub fn generate<R: Rng>(
    songs: &SongCollection,
    filters: &[String],
    name: &str,
    rng: &mut R,
) -> Result<Playlist, GenerateError> {
    if filters.is_empty() {
        return Err(GenerateError::NoFilters);
    }

    let mut included: Vec<Song> = songs
        .iter()
        .filter(|song| song.matches_any_subgenre(filters))
        .cloned()
        .collect();

    if included.is_empty() {
        tracing::info!(?filters, "no songs fit the requested filters");
        return Err(GenerateError::EmptyResult {
            filters: filters.to_vec(),
        });
    }

    // Canonical order before shuffling: the collection iterates in
    // arbitrary order, and a seeded rng must reproduce exact playlists.
    included.sort_by(|a, b| a.id.cmp(&b.id));
    included.shuffle(rng);
    included.truncate(PLAYLIST_MAX_SONGS);

    Ok(Playlist::new(name, filters.to_vec(), included))
}
