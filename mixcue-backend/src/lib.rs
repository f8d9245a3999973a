//! # mixcue-backend — sessions and playlist generation
//!
//! Consumes what ingestion produced: holds one [`session::UserSession`] per
//! onboarded user (their song set, dictionaries, and playlist history) and
//! generates filtered, shuffled, capped playlists from it. The
//! [`registry::Backend`] serializes user onboarding and is the surface the
//! (external) HTTP layer talks to.

pub mod error;
pub mod generator;
pub mod registry;
pub mod session;

pub use error::{BackendError, GenerateError};
pub use registry::Backend;
pub use session::{SessionCounts, UserSession};
