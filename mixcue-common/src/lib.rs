//! # Mixcue Common Library
//!
//! Shared code for the mixcue crates including:
//! - Domain model (songs, dictionaries, playlists)
//! - Event types (MixcueEvent enum) and EventBus
//! - Credentials for the remote catalog service
//! - Configuration loading

pub mod auth;
pub mod config;
pub mod error;
pub mod events;
pub mod model;

pub use auth::Credentials;
pub use error::{Error, Result};
