//! # mixcue-ingest — library ingestion
//!
//! Pulls a user's song library out of the remote catalog service and turns
//! it into the in-memory model the playlist generator consumes:
//!
//! 1. Page through the library listing until exhausted, dedup identifiers
//! 2. Partition identifiers into batches the detail endpoint accepts
//! 3. Fetch batches in parallel, bounded by the configured worker cap
//! 4. Aggregate songs and genre/subgenre dictionaries on a single writer
//!
//! A failed detail batch degrades the result instead of failing the run;
//! only a failed listing is fatal.

pub mod aggregate;
pub mod catalog;
pub mod error;
pub mod fetcher;
pub mod partition;
pub mod pipeline;
pub mod workers;

pub use error::{IngestError, TransportError};
pub use fetcher::{BatchFailure, FetchOutcome};
pub use pipeline::{IngestOutcome, IngestionPipeline};
