//! Trait seam between mixcue and the remote catalog service
//!
//! The pipeline and backend only ever talk to this trait; production wires
//! in [`super::CatalogClient`], tests wire in an in-memory fake.

use super::types::{RemotePlaylist, SongDetail};
use crate::error::TransportError;
use async_trait::async_trait;
use mixcue_common::Credentials;

/// One page of library song identifiers
#[derive(Debug, Clone)]
pub struct IdPage {
    pub ids: Vec<String>,
    /// Offset of the next page, `None` once the listing is exhausted
    pub next_offset: Option<usize>,
}

/// Access to a user's remote song library
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch one page of the user's library song identifiers.
    async fn fetch_id_page(
        &self,
        credentials: &Credentials,
        offset: usize,
    ) -> Result<IdPage, TransportError>;

    /// Fetch detail records (with genre relationships) for a batch of
    /// identifiers. The batch never exceeds the configured detail batch
    /// limit. May fail independently of other batches.
    async fn fetch_details(
        &self,
        credentials: &Credentials,
        ids: &[String],
    ) -> Result<Vec<SongDetail>, TransportError>;

    /// Create a playlist on the remote service; returns its remote id.
    async fn create_playlist(
        &self,
        credentials: &Credentials,
        name: &str,
        description: &str,
        song_ids: &[String],
    ) -> Result<String, TransportError>;

    /// List up to `limit` of the user's existing remote playlists.
    async fn list_playlists(
        &self,
        credentials: &Credentials,
        limit: usize,
    ) -> Result<Vec<RemotePlaylist>, TransportError>;
}
