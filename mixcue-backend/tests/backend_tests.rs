//! Backend integration tests
//!
//! Onboarding, playlist generation, and remote push against an in-memory
//! catalog source.

use async_trait::async_trait;
use mixcue_backend::{Backend, BackendError, GenerateError};
use mixcue_common::config::CatalogConfig;
use mixcue_common::events::EventBus;
use mixcue_common::Credentials;
use mixcue_ingest::catalog::{CatalogSource, GenreRef, IdPage, RemotePlaylist, SongDetail};
use mixcue_ingest::TransportError;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

/// Fixed three-song library: A=[indie], B=[dance], C=[indie, dance]
struct FakeCatalog {
    listing_calls: AtomicUsize,
    pushed: Mutex<Vec<(String, Vec<String>)>>,
}

impl FakeCatalog {
    fn new() -> Self {
        Self {
            listing_calls: AtomicUsize::new(0),
            pushed: Mutex::new(Vec::new()),
        }
    }

    fn subgenres_for(id: &str) -> Vec<String> {
        match id {
            "A" => vec!["indie".to_string()],
            "B" => vec!["dance".to_string()],
            "C" => vec!["indie".to_string(), "dance".to_string()],
            _ => Vec::new(),
        }
    }
}

#[async_trait]
impl CatalogSource for FakeCatalog {
    async fn fetch_id_page(
        &self,
        _credentials: &Credentials,
        offset: usize,
    ) -> Result<IdPage, TransportError> {
        self.listing_calls.fetch_add(1, Ordering::SeqCst);
        match offset {
            0 => Ok(IdPage {
                ids: vec!["A".to_string(), "B".to_string()],
                next_offset: Some(2),
            }),
            _ => Ok(IdPage {
                ids: vec!["C".to_string()],
                next_offset: None,
            }),
        }
    }

    async fn fetch_details(
        &self,
        _credentials: &Credentials,
        ids: &[String],
    ) -> Result<Vec<SongDetail>, TransportError> {
        Ok(ids
            .iter()
            .map(|id| SongDetail {
                id: id.clone(),
                name: format!("Title {id}"),
                artist: "Artist".to_string(),
                genre_names: vec!["Rock".to_string()],
                genres: vec![GenreRef {
                    id: "g-rock".to_string(),
                    name: "Rock".to_string(),
                }],
                subgenres: Self::subgenres_for(id),
                preview_url: None,
                artwork_url: None,
            })
            .collect())
    }

    async fn create_playlist(
        &self,
        _credentials: &Credentials,
        name: &str,
        _description: &str,
        song_ids: &[String],
    ) -> Result<String, TransportError> {
        self.pushed
            .lock()
            .unwrap()
            .push((name.to_string(), song_ids.to_vec()));
        Ok("remote-42".to_string())
    }

    async fn list_playlists(
        &self,
        _credentials: &Credentials,
        limit: usize,
    ) -> Result<Vec<RemotePlaylist>, TransportError> {
        Ok(vec![RemotePlaylist {
            id: "p1".to_string(),
            name: "Existing".to_string(),
        }]
        .into_iter()
        .take(limit)
        .collect())
    }
}

fn backend() -> (Backend<FakeCatalog>, Arc<FakeCatalog>) {
    let source = Arc::new(FakeCatalog::new());
    let backend = Backend::new(
        Arc::clone(&source),
        CatalogConfig::default(),
        EventBus::new(100),
    );
    (backend, source)
}

fn credentials() -> Credentials {
    Credentials::new("dev-token", "user-token")
}

async fn onboarded() -> (Backend<FakeCatalog>, Arc<FakeCatalog>) {
    let (backend, source) = backend();
    backend
        .onboard_user(credentials(), CancellationToken::new())
        .await
        .unwrap();
    (backend, source)
}

#[tokio::test]
async fn onboarding_ingests_the_library() {
    let (backend, _) = backend();
    let counts = backend
        .onboard_user(credentials(), CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(counts.songs, 3);
    assert_eq!(counts.genres, 1);
    assert_eq!(counts.subgenres, 2);
    assert!(backend.is_onboarded("user-token").await);

    assert_eq!(backend.genre_names("user-token").await.unwrap(), vec!["Rock"]);
    assert_eq!(
        backend.subgenre_names("user-token").await.unwrap(),
        vec!["dance", "indie"]
    );
}

#[tokio::test]
async fn repeated_onboarding_reuses_the_session() {
    let (backend, source) = onboarded().await;
    let calls_after_first = source.listing_calls.load(Ordering::SeqCst);

    let counts = backend
        .onboard_user(credentials(), CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(counts.songs, 3);
    assert_eq!(source.listing_calls.load(Ordering::SeqCst), calls_after_first);
}

#[tokio::test]
async fn playlist_filters_are_a_logical_or_over_subgenres() {
    let (backend, _) = onboarded().await;

    let playlist = backend
        .create_playlist("user-token", "Indie Mix", &["indie".to_string()])
        .await
        .unwrap();

    assert_eq!(playlist.len(), 2);
    let ids: HashSet<&str> = playlist.songs().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, HashSet::from(["A", "C"]));
    assert_eq!(playlist.description(), "indie");
}

#[tokio::test]
async fn unmatched_filters_surface_empty_result() {
    let (backend, _) = onboarded().await;

    let err = backend
        .create_playlist("user-token", "Jazz Mix", &["jazz".to_string()])
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        BackendError::Generate(GenerateError::EmptyResult { .. })
    ));
    // no playlist was recorded
    let err = backend.push_playlist("user-token", 0).await.unwrap_err();
    assert!(matches!(err, BackendError::NoSuchPlaylist(0)));
}

#[tokio::test]
async fn operations_for_unknown_users_are_rejected() {
    let (backend, _) = backend();
    let err = backend
        .create_playlist("nobody", "Mix", &["indie".to_string()])
        .await
        .unwrap_err();
    assert!(matches!(err, BackendError::UnknownUser));

    let err = backend.counts("nobody").await.unwrap_err();
    assert!(matches!(err, BackendError::UnknownUser));
}

#[tokio::test]
async fn push_sends_the_generated_playlist_to_the_remote_service() {
    let (backend, source) = onboarded().await;
    backend
        .create_playlist("user-token", "Dance Mix", &["dance".to_string()])
        .await
        .unwrap();

    let remote_id = backend.push_playlist("user-token", 0).await.unwrap();
    assert_eq!(remote_id, "remote-42");

    let pushed = source.pushed.lock().unwrap();
    assert_eq!(pushed.len(), 1);
    let (name, ids) = &pushed[0];
    assert_eq!(name, "Dance Mix");
    let ids: HashSet<&str> = ids.iter().map(String::as_str).collect();
    assert_eq!(ids, HashSet::from(["B", "C"]));
}

#[tokio::test]
async fn remote_playlists_are_listed_through_the_session() {
    let (backend, _) = onboarded().await;
    let playlists = backend.remote_playlists("user-token", 10).await.unwrap();
    assert_eq!(playlists.len(), 1);
    assert_eq!(playlists[0].name, "Existing");
}

#[tokio::test]
async fn logout_removes_the_session() {
    let (backend, _) = onboarded().await;
    assert!(backend.remove_user("user-token").await);
    assert!(!backend.is_onboarded("user-token").await);
    assert!(!backend.remove_user("user-token").await);

    let err = backend.counts("user-token").await.unwrap_err();
    assert!(matches!(err, BackendError::UnknownUser));
}
