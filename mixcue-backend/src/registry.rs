//! User registry and onboarding
//!
//! The `Backend` owns every in-memory user session on this instance and is
//! the surface the (external) HTTP layer calls. Onboarding runs are
//! serialized by a dedicated mutex so two near-simultaneous requests for
//! the same user cannot both ingest; each run still owns its own
//! accumulators (the pipeline creates them per call), so there is no
//! cross-user locking anywhere else.

use crate::error::BackendError;
use crate::session::{SessionCounts, UserSession};
use mixcue_common::config::CatalogConfig;
use mixcue_common::events::{EventBus, MixcueEvent};
use mixcue_common::model::Playlist;
use mixcue_common::Credentials;
use mixcue_ingest::catalog::{CatalogSource, RemotePlaylist};
use mixcue_ingest::IngestionPipeline;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tokio_util::sync::CancellationToken;

/// Per-instance user registry
pub struct Backend<S> {
    source: Arc<S>,
    config: CatalogConfig,
    event_bus: EventBus,
    /// Serializes onboarding: check, ingest, and insert happen atomically
    /// with respect to other onboarding calls
    onboarding: Mutex<()>,
    sessions: RwLock<HashMap<String, UserSession>>,
}

impl<S: CatalogSource + 'static> Backend<S> {
    pub fn new(source: Arc<S>, config: CatalogConfig, event_bus: EventBus) -> Self {
        Self {
            source,
            config,
            event_bus,
            onboarding: Mutex::new(()),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Onboard a user: ingest their library and store the session
    ///
    /// Returns the stored session's counts. Calling again for an already
    /// onboarded user returns the existing session's counts without
    /// re-ingesting.
    pub async fn onboard_user(
        &self,
        credentials: Credentials,
        cancel: CancellationToken,
    ) -> Result<SessionCounts, BackendError> {
        let _guard = self.onboarding.lock().await;

        if let Some(existing) = self.sessions.read().await.get(&credentials.user_token) {
            tracing::info!("user already onboarded; reusing session");
            return Ok(existing.counts());
        }

        let pipeline = IngestionPipeline::new(
            Arc::clone(&self.source),
            self.config.clone(),
            self.event_bus.clone(),
        );
        let outcome = pipeline.ingest(&credentials, cancel).await?;

        let user_token = credentials.user_token.clone();
        let session = UserSession::from_outcome(credentials, outcome);
        let counts = session.counts();
        self.sessions.write().await.insert(user_token, session);
        Ok(counts)
    }

    /// Drop a user's session (logout)
    pub async fn remove_user(&self, user_token: &str) -> bool {
        self.sessions.write().await.remove(user_token).is_some()
    }

    pub async fn is_onboarded(&self, user_token: &str) -> bool {
        self.sessions.read().await.contains_key(user_token)
    }

    /// Generate a playlist for an onboarded user and append it to their
    /// history; returns a clone of the stored playlist
    pub async fn create_playlist(
        &self,
        user_token: &str,
        name: &str,
        filters: &[String],
    ) -> Result<Playlist, BackendError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(user_token)
            .ok_or(BackendError::UnknownUser)?;

        let playlist = session.create_playlist(name, filters)?.clone();
        self.event_bus.emit_lossy(MixcueEvent::PlaylistCreated {
            playlist_id: playlist.id(),
            name: playlist.name().to_string(),
            songs: playlist.len(),
            timestamp: chrono::Utc::now(),
        });
        Ok(playlist)
    }

    /// Push a playlist from a user's history to the remote service
    ///
    /// Returns the remote playlist identifier.
    pub async fn push_playlist(
        &self,
        user_token: &str,
        history_index: usize,
    ) -> Result<String, BackendError> {
        let sessions = self.sessions.read().await;
        let session = sessions.get(user_token).ok_or(BackendError::UnknownUser)?;
        let playlist = session
            .playlist(history_index)
            .ok_or(BackendError::NoSuchPlaylist(history_index))?;

        let song_ids: Vec<String> = playlist.songs().iter().map(|s| s.id.clone()).collect();
        let remote_id = self
            .source
            .create_playlist(
                session.credentials(),
                playlist.name(),
                playlist.description(),
                &song_ids,
            )
            .await?;

        tracing::info!(
            playlist = %playlist.name(),
            %remote_id,
            songs = song_ids.len(),
            "playlist pushed to remote service"
        );
        Ok(remote_id)
    }

    /// List a user's existing playlists on the remote service
    pub async fn remote_playlists(
        &self,
        user_token: &str,
        limit: usize,
    ) -> Result<Vec<RemotePlaylist>, BackendError> {
        let sessions = self.sessions.read().await;
        let session = sessions.get(user_token).ok_or(BackendError::UnknownUser)?;
        Ok(self
            .source
            .list_playlists(session.credentials(), limit)
            .await?)
    }

    /// Genre names for presentation
    pub async fn genre_names(&self, user_token: &str) -> Result<Vec<String>, BackendError> {
        let sessions = self.sessions.read().await;
        let session = sessions.get(user_token).ok_or(BackendError::UnknownUser)?;
        Ok(session.genre_names())
    }

    /// Visible subgenre names for presentation
    pub async fn subgenre_names(&self, user_token: &str) -> Result<Vec<String>, BackendError> {
        let sessions = self.sessions.read().await;
        let session = sessions.get(user_token).ok_or(BackendError::UnknownUser)?;
        Ok(session.subgenre_names())
    }

    /// Library counts for presentation
    pub async fn counts(&self, user_token: &str) -> Result<SessionCounts, BackendError> {
        let sessions = self.sessions.read().await;
        let session = sessions.get(user_token).ok_or(BackendError::UnknownUser)?;
        Ok(session.counts())
    }
}
