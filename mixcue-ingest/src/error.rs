//! Error types for library ingestion

use thiserror::Error;

/// A single remote call failed
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network-level failure (connect, timeout, TLS, ...)
    #[error("Network error: {0}")]
    Network(String),

    /// The service answered with a non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// The caller's cancellation signal tripped before the call finished
    #[error("request cancelled")]
    Cancelled,
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            TransportError::Parse(err.to_string())
        } else {
            TransportError::Network(err.to_string())
        }
    }
}

/// An ingestion run failed outright
///
/// Detail-batch failures are not represented here — they degrade the
/// result (see `IngestOutcome::failed_batches`) rather than failing it.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The mandatory library ID listing could not be completed
    #[error("library listing failed: {0}")]
    Listing(#[source] TransportError),

    /// Cancellation tripped before any results were aggregated
    #[error("ingestion cancelled")]
    Cancelled,

    /// An internal task failed (aggregation task panicked or was aborted)
    #[error("internal ingestion failure: {0}")]
    Internal(String),
}
