//! Remote catalog service integration
//!
//! `types` holds the wire shapes the service returns, `source` the trait
//! seam the pipeline consumes, `client` the HTTP implementation.

mod client;
mod source;
mod types;

pub use client::CatalogClient;
pub use source::{CatalogSource, IdPage};
pub use types::{GenreRef, RemotePlaylist, SongDetail};
