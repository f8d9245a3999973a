//! Domain model shared by ingestion and playlist generation

mod dictionary;
mod playlist;
mod song;

pub use dictionary::{GenreDictionary, SubgenreDictionary};
pub use playlist::{Playlist, PlaylistHistory, PLAYLIST_MAX_SONGS};
pub use song::{Song, SongCollection};
