//! Ingestion pipeline orchestrator
//!
//! Drives one ingestion run end to end:
//!
//! 1. **LISTING** — page through the library ID listing until exhausted,
//!    dedup identifiers (first-seen order preserved)
//! 2. **PARTITION** — chunk identifiers to the detail batch limit
//! 3. **FETCHING** — bounded-parallel detail fetch; each worker streams
//!    fetched records into the aggregation channel
//! 4. **AGGREGATING** — single-writer task builds the song set and the
//!    genre/subgenre dictionaries
//!
//! Only a failed listing fails the run. Failed detail batches are logged,
//! recorded in the outcome, and their songs omitted. All per-run state is
//! created inside `ingest`; nothing is shared across runs or users.

use crate::aggregate::spawn_aggregator;
use crate::catalog::CatalogSource;
use crate::error::{IngestError, TransportError};
use crate::fetcher::{self, BatchFailure};
use crate::partition::partition;
use crate::workers::worker_count;
use mixcue_common::events::{EventBus, MixcueEvent};
use mixcue_common::model::{GenreDictionary, SongCollection, SubgenreDictionary};
use mixcue_common::{config::CatalogConfig, Credentials};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Capacity of the fetch-worker → aggregator channel
const AGGREGATION_CHANNEL_CAPACITY: usize = 256;

/// Result of one ingestion run
///
/// `failed_batches` is partial-failure bookkeeping: the run still counts
/// as successful when the listing completed, but songs from these batches
/// are missing from `songs`.
#[derive(Debug)]
pub struct IngestOutcome {
    pub songs: SongCollection,
    pub genres: GenreDictionary,
    pub subgenres: SubgenreDictionary,
    pub failed_batches: Vec<BatchFailure>,
    /// Unique identifiers the listing produced
    pub total_ids: usize,
    /// Identifiers dropped because the listing repeated them across pages
    pub duplicate_ids: usize,
}

impl IngestOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed_batches.is_empty()
    }
}

/// Orchestrates ingestion runs against a catalog source
pub struct IngestionPipeline<S> {
    source: Arc<S>,
    config: CatalogConfig,
    event_bus: EventBus,
}

impl<S: CatalogSource + 'static> IngestionPipeline<S> {
    pub fn new(source: Arc<S>, config: CatalogConfig, event_bus: EventBus) -> Self {
        Self {
            source,
            config,
            event_bus,
        }
    }

    /// Run one full ingestion for the given credentials
    ///
    /// Cancellation: tripping `cancel` during the listing phase aborts the
    /// run; during the detail phase it stops issuing batches and the
    /// unfinished ones are recorded as failed, returning a partial result.
    pub async fn ingest(
        &self,
        credentials: &Credentials,
        cancel: CancellationToken,
    ) -> Result<IngestOutcome, IngestError> {
        let started = std::time::Instant::now();
        self.event_bus.emit_lossy(MixcueEvent::IngestStarted {
            timestamp: chrono::Utc::now(),
        });

        // Phase 1: LISTING
        let (ids, duplicate_ids) = self.fetch_all_ids(credentials, &cancel).await?;
        let total_ids = ids.len();
        tracing::info!(
            total_ids,
            duplicate_ids,
            "library listing complete"
        );

        // Phase 2: PARTITION
        let batches = partition(&ids, self.config.detail_batch_limit);
        let concurrency = worker_count(batches.len(), 1, self.config.max_concurrent_fetches);
        tracing::info!(
            batches = batches.len(),
            concurrency,
            "fetching song details"
        );

        // Phases 3+4: FETCHING feeds AGGREGATING through a channel; the
        // aggregator task is the only writer of the run's shared state.
        let (tx, rx) = mpsc::channel(AGGREGATION_CHANNEL_CAPACITY);
        let aggregation = spawn_aggregator(rx);

        let outcome = fetcher::fetch_all(batches, concurrency, |batch_index, batch| {
            let source = Arc::clone(&self.source);
            let credentials = credentials.clone();
            let cancel = cancel.clone();
            let tx = tx.clone();
            let event_bus = self.event_bus.clone();
            async move {
                let details = tokio::select! {
                    _ = cancel.cancelled() => return Err(TransportError::Cancelled),
                    result = source.fetch_details(&credentials, &batch) => result?,
                };
                let fetched = details.len();
                for detail in details {
                    if tx.send(detail).await.is_err() {
                        // aggregator gone; nothing left to do for this batch
                        break;
                    }
                }
                event_bus.emit_lossy(MixcueEvent::BatchCompleted {
                    batch_index,
                    songs: fetched,
                    timestamp: chrono::Utc::now(),
                });
                Ok(fetched)
            }
        })
        .await;
        // Close the channel so the aggregator can finish draining.
        drop(tx);

        for failure in &outcome.failures {
            tracing::warn!(
                batch_index = failure.batch_index,
                error = %failure.error,
                "detail batch failed; its songs are omitted"
            );
            self.event_bus.emit_lossy(MixcueEvent::BatchFailed {
                batch_index: failure.batch_index,
                error: failure.error.to_string(),
                timestamp: chrono::Utc::now(),
            });
        }

        let library = aggregation
            .await
            .map_err(|e| IngestError::Internal(e.to_string()))?;

        let result = IngestOutcome {
            songs: library.songs,
            genres: library.genres,
            subgenres: library.subgenres,
            failed_batches: outcome.failures,
            total_ids,
            duplicate_ids,
        };

        tracing::info!(
            songs = result.songs.len(),
            genres = result.genres.len(),
            subgenres = result.subgenres.len(),
            failed_batches = result.failed_batches.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "ingestion complete"
        );
        self.event_bus.emit_lossy(MixcueEvent::IngestCompleted {
            songs: result.songs.len(),
            genres: result.genres.len(),
            subgenres: result.subgenres.len(),
            failed_batches: result.failed_batches.len(),
            timestamp: chrono::Utc::now(),
        });

        Ok(result)
    }

    /// Page through the listing until exhausted, dropping repeated
    /// identifiers while preserving first-seen order
    async fn fetch_all_ids(
        &self,
        credentials: &Credentials,
        cancel: &CancellationToken,
    ) -> Result<(Vec<String>, usize), IngestError> {
        let mut ids: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut duplicates = 0usize;
        let mut offset = 0usize;

        loop {
            if cancel.is_cancelled() {
                return Err(IngestError::Cancelled);
            }

            let page = self
                .source
                .fetch_id_page(credentials, offset)
                .await
                .map_err(IngestError::Listing)?;

            for id in page.ids {
                if seen.insert(id.clone()) {
                    ids.push(id);
                } else {
                    duplicates += 1;
                }
            }

            self.event_bus.emit_lossy(MixcueEvent::ListingProgress {
                fetched: ids.len(),
                timestamp: chrono::Utc::now(),
            });
            tracing::debug!(offset, fetched = ids.len(), "library page fetched");

            match page.next_offset {
                Some(next) => offset = next,
                None => break,
            }
        }

        Ok((ids, duplicates))
    }
}
