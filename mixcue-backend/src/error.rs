//! Error types for sessions and playlist generation

use mixcue_ingest::{IngestError, TransportError};
use thiserror::Error;

/// Playlist generation failed
///
/// Both variants are user-actionable conditions, not crashes: the caller
/// reports them and the session stays usable.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// No song's subgenres intersected the requested filters
    #[error("no songs matched the requested filters")]
    EmptyResult { filters: Vec<String> },

    /// Generation requires at least one filter
    #[error("at least one filter is required")]
    NoFilters,
}

/// A backend operation failed
#[derive(Debug, Error)]
pub enum BackendError {
    /// No session exists for the given user token
    #[error("unknown user")]
    UnknownUser,

    /// Onboarding failed because ingestion failed
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// Playlist generation failed
    #[error(transparent)]
    Generate(#[from] GenerateError),

    /// A remote playlist operation failed
    #[error("remote playlist operation failed: {0}")]
    Remote(#[from] TransportError),

    /// The session has no playlist at the requested history index
    #[error("no playlist at history index {0}")]
    NoSuchPlaylist(usize),
}
