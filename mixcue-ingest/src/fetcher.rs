//! Bounded-parallel batch fetching
//!
//! Runs one fetch future per batch through a `buffer_unordered` stream so
//! at most `max_concurrent` requests are in flight. Batch completion order
//! carries no meaning. A failed batch never aborts its siblings — it is
//! recorded and the rest keep going.

use crate::error::TransportError;
use futures::stream::{self, StreamExt};
use std::future::Future;

/// A detail batch that could not be fetched
#[derive(Debug)]
pub struct BatchFailure {
    /// Index of the batch in partition order
    pub batch_index: usize,
    pub error: TransportError,
}

/// Result of fetching all batches: whatever succeeded, plus bookkeeping
/// for whatever did not
#[derive(Debug)]
pub struct FetchOutcome<P> {
    pub pages: Vec<P>,
    pub failures: Vec<BatchFailure>,
}

impl<P> FetchOutcome<P> {
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Fetch every batch with bounded concurrency
///
/// `fetch_one` receives the batch index and the batch itself; futures are
/// created lazily as concurrency slots free up, so no more than
/// `max_concurrent` invocations are ever in flight.
pub async fn fetch_all<T, P, F, Fut>(
    batches: Vec<Vec<T>>,
    max_concurrent: usize,
    fetch_one: F,
) -> FetchOutcome<P>
where
    F: Fn(usize, Vec<T>) -> Fut,
    Fut: Future<Output = Result<P, TransportError>>,
{
    if batches.is_empty() {
        return FetchOutcome {
            pages: Vec::new(),
            failures: Vec::new(),
        };
    }

    let max_concurrent = max_concurrent.max(1);
    let results: Vec<(usize, Result<P, TransportError>)> = stream::iter(
        batches
            .into_iter()
            .enumerate()
            .map(|(index, batch)| {
                let fut = fetch_one(index, batch);
                async move { (index, fut.await) }
            }),
    )
    .buffer_unordered(max_concurrent)
    .collect()
    .await;

    let mut pages = Vec::new();
    let mut failures = Vec::new();
    for (batch_index, result) in results {
        match result {
            Ok(page) => pages.push(page),
            Err(error) => failures.push(BatchFailure { batch_index, error }),
        }
    }
    FetchOutcome { pages, failures }
}
