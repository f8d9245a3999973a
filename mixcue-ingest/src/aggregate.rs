//! Dictionary and song-set aggregation
//!
//! Fetch workers complete in arbitrary order, so aggregation runs on a
//! single writer task fed over an mpsc channel. The task owns the
//! dictionaries and the song collection outright — no locks, no shared
//! mutable state — and returns them only after the channel has drained,
//! which is what makes the final snapshot happen-after every update.

use crate::catalog::{GenreRef, SongDetail};
use mixcue_common::model::{GenreDictionary, SongCollection, SubgenreDictionary};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Accumulates the two lookup dictionaries from per-song metadata
///
/// Genre insertion is last-write-wins per name; subgenre insertion
/// increments a per-name counter. Updates are serialized by the owning
/// aggregation task, so completion order across songs carries no meaning.
#[derive(Debug, Default)]
pub struct DictionaryAggregator {
    genres: GenreDictionary,
    subgenres: SubgenreDictionary,
}

impl DictionaryAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_genres(&mut self, genres: &[GenreRef]) {
        for genre in genres {
            self.genres.insert(genre.name.as_str(), genre.id.as_str());
        }
    }

    pub fn add_subgenres(&mut self, names: &[String]) {
        for name in names {
            self.subgenres.record(name.as_str());
        }
    }

    /// Current dictionary contents, cloned
    pub fn snapshot(&self) -> (GenreDictionary, SubgenreDictionary) {
        (self.genres.clone(), self.subgenres.clone())
    }

    pub fn into_dictionaries(self) -> (GenreDictionary, SubgenreDictionary) {
        (self.genres, self.subgenres)
    }
}

/// Everything one ingestion run aggregates
#[derive(Debug)]
pub struct AggregatedLibrary {
    pub songs: SongCollection,
    pub genres: GenreDictionary,
    pub subgenres: SubgenreDictionary,
}

/// Spawn the single-writer aggregation task
///
/// Receives fetched song records until every sender is dropped, then
/// returns the assembled collection and dictionary snapshots. Duplicate
/// identifiers are dropped without touching the dictionaries, keeping
/// counts consistent with the set.
pub fn spawn_aggregator(mut rx: mpsc::Receiver<SongDetail>) -> JoinHandle<AggregatedLibrary> {
    tokio::spawn(async move {
        let mut songs = SongCollection::new();
        let mut aggregator = DictionaryAggregator::new();

        while let Some(detail) = rx.recv().await {
            if songs.contains(&detail.id) {
                tracing::debug!(song_id = %detail.id, "duplicate song record skipped");
                continue;
            }
            aggregator.add_genres(&detail.genres);
            aggregator.add_subgenres(&detail.subgenres);
            songs.insert(detail.into_song());
        }

        let (genres, subgenres) = aggregator.into_dictionaries();
        AggregatedLibrary {
            songs,
            genres,
            subgenres,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(id: &str, genres: &[(&str, &str)], subgenres: &[&str]) -> SongDetail {
        SongDetail {
            id: id.to_string(),
            name: format!("Song {id}"),
            artist: "Artist".to_string(),
            genre_names: vec![],
            genres: genres
                .iter()
                .map(|(gid, name)| GenreRef {
                    id: gid.to_string(),
                    name: name.to_string(),
                })
                .collect(),
            subgenres: subgenres.iter().map(|s| s.to_string()).collect(),
            preview_url: None,
            artwork_url: None,
        }
    }

    #[test]
    fn genre_insertion_is_last_write_wins() {
        let mut aggregator = DictionaryAggregator::new();
        aggregator.add_genres(&[GenreRef { id: "g1".into(), name: "Rock".into() }]);
        aggregator.add_genres(&[GenreRef { id: "g2".into(), name: "Rock".into() }]);

        let (genres, _) = aggregator.into_dictionaries();
        assert_eq!(genres.get_id("Rock"), Some("g2"));
    }

    #[test]
    fn subgenre_counters_start_at_one_and_increment() {
        let mut aggregator = DictionaryAggregator::new();
        aggregator.add_subgenres(&["Indie".to_string()]);
        aggregator.add_subgenres(&["Indie".to_string(), "Dub".to_string()]);

        let (_, subgenres) = aggregator.into_dictionaries();
        assert_eq!(subgenres.count("Indie"), 2);
        assert_eq!(subgenres.count("Dub"), 1);
        assert_eq!(subgenres.count("Jazz"), 0);
    }

    #[tokio::test]
    async fn aggregation_task_drains_concurrent_senders() {
        let (tx, rx) = mpsc::channel(16);
        let handle = spawn_aggregator(rx);

        let mut senders = Vec::new();
        for worker in 0..4 {
            let tx = tx.clone();
            senders.push(tokio::spawn(async move {
                for i in 0..10 {
                    let id = format!("w{worker}-s{i}");
                    tx.send(detail(&id, &[("g1", "Rock")], &["Indie"])).await.unwrap();
                }
            }));
        }
        drop(tx);
        for sender in senders {
            sender.await.unwrap();
        }

        let library = handle.await.unwrap();
        assert_eq!(library.songs.len(), 40);
        assert_eq!(library.subgenres.count("Indie"), 40);
        assert_eq!(library.genres.get_id("Rock"), Some("g1"));
    }

    #[tokio::test]
    async fn duplicate_records_do_not_skew_counts() {
        let (tx, rx) = mpsc::channel(4);
        let handle = spawn_aggregator(rx);

        tx.send(detail("dup", &[], &["Indie"])).await.unwrap();
        tx.send(detail("dup", &[], &["Indie"])).await.unwrap();
        drop(tx);

        let library = handle.await.unwrap();
        assert_eq!(library.songs.len(), 1);
        assert_eq!(library.subgenres.count("Indie"), 1);
    }
}
