//! Event types for the mixcue event system
//!
//! Provides the shared event enum and EventBus used by the ingestion
//! pipeline and its observers. Events are broadcast; subscribers are
//! optional and slow subscribers drop old events rather than blocking the
//! pipeline.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Mixcue event types
///
/// Serialized with a `type` tag so the (external) presentation layer can
/// forward them to clients untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MixcueEvent {
    /// An ingestion run started
    IngestStarted {
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Library listing progress (identifiers fetched so far)
    ListingProgress {
        fetched: usize,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// One detail batch aggregated successfully
    BatchCompleted {
        batch_index: usize,
        songs: usize,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// One detail batch failed; its songs are omitted from the result
    BatchFailed {
        batch_index: usize,
        error: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// An ingestion run finished (possibly with failed batches)
    IngestCompleted {
        songs: usize,
        genres: usize,
        subgenres: usize,
        failed_batches: usize,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A playlist was generated and appended to a session's history
    PlaylistCreated {
        playlist_id: Uuid,
        name: String,
        songs: usize,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

/// Broadcast bus for mixcue events
///
/// Cheap to clone; all clones share the same channel.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<MixcueEvent>,
}

impl EventBus {
    /// Creates a new EventBus with the given channel capacity
    ///
    /// Old events are dropped once `capacity` unconsumed events are queued.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to all future events
    ///
    /// Events emitted before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<MixcueEvent> {
        self.tx.subscribe()
    }

    /// Emit an event, ignoring the case where nobody is listening
    ///
    /// Subscribers are optional for every pipeline event, so a send failure
    /// is logged at debug level and otherwise ignored.
    pub fn emit_lossy(&self, event: MixcueEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("event emitted with no subscribers");
        }
    }

    /// Number of live subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(100)
    }
}
