//! HTTP client for the remote catalog service
//!
//! All calls go through one rate limiter so parallel detail fetches stay
//! inside the service's request budget, and all calls carry the opaque
//! credential pair: the developer token as a bearer and the user token in
//! the `Music-User-Token` header.

use super::source::{CatalogSource, IdPage};
use super::types::{
    DetailResponse, LibraryPage, RemotePlaylist, SongDetail,
};
use crate::error::TransportError;
use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use mixcue_common::config::CatalogConfig;
use mixcue_common::{Credentials, Error};
use serde_json::json;
use std::num::NonZeroU32;
use std::time::Duration;

const USER_TOKEN_HEADER: &str = "Music-User-Token";

/// Catalog service client
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
    storefront: String,
    listing_page_limit: usize,
    rate_limiter: DefaultDirectRateLimiter,
}

impl CatalogClient {
    /// Build a client from configuration
    pub fn new(config: &CatalogConfig) -> mixcue_common::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| Error::Internal(format!("cannot build HTTP client: {e}")))?;

        let per_second = NonZeroU32::new(config.requests_per_second)
            .ok_or_else(|| Error::Config("requests_per_second must be positive".into()))?;
        let rate_limiter = RateLimiter::direct(Quota::per_second(per_second));

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            storefront: config.storefront.clone(),
            listing_page_limit: config.listing_page_limit,
            rate_limiter,
        })
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        credentials: &Credentials,
    ) -> Result<reqwest::Response, TransportError> {
        self.rate_limiter.until_ready().await;

        let response = request
            .bearer_auth(&credentials.developer_token)
            .header(USER_TOKEN_HEADER, &credentials.user_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TransportError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: String,
        credentials: &Credentials,
    ) -> Result<T, TransportError> {
        let response = self.send(self.http.get(&url), credentials).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| TransportError::Parse(e.to_string()))
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn fetch_id_page(
        &self,
        credentials: &Credentials,
        offset: usize,
    ) -> Result<IdPage, TransportError> {
        let url = format!(
            "{}/v1/me/library/songs?limit={}&offset={}",
            self.base_url, self.listing_page_limit, offset
        );
        let page: LibraryPage = self.get_json(url, credentials).await?;

        let ids: Vec<String> = page.data.into_iter().map(|entry| entry.id).collect();
        // An empty page with a dangling `next` link would loop forever;
        // treat it as exhausted.
        let next_offset = match (page.next, ids.len()) {
            (Some(_), fetched) if fetched > 0 => Some(offset + fetched),
            _ => None,
        };

        Ok(IdPage { ids, next_offset })
    }

    async fn fetch_details(
        &self,
        credentials: &Credentials,
        ids: &[String],
    ) -> Result<Vec<SongDetail>, TransportError> {
        let url = format!(
            "{}/v1/catalog/{}/songs?ids={}&include=genres",
            self.base_url,
            self.storefront,
            ids.join(",")
        );
        let response: DetailResponse = self.get_json(url, credentials).await?;
        Ok(response.data.into_iter().map(SongDetail::from).collect())
    }

    async fn create_playlist(
        &self,
        credentials: &Credentials,
        name: &str,
        description: &str,
        song_ids: &[String],
    ) -> Result<String, TransportError> {
        let url = format!("{}/v1/me/library/playlists", self.base_url);
        let tracks: Vec<serde_json::Value> = song_ids
            .iter()
            .map(|id| json!({ "id": id, "type": "songs" }))
            .collect();
        let body = json!({
            "attributes": { "name": name, "description": description },
            "relationships": { "tracks": { "data": tracks } },
        });

        let response = self
            .send(self.http.post(&url).json(&body), credentials)
            .await?;
        let created: serde_json::Value = response
            .json()
            .await
            .map_err(|e| TransportError::Parse(e.to_string()))?;

        created
            .pointer("/data/0/id")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| TransportError::Parse("no playlist id in response".into()))
    }

    async fn list_playlists(
        &self,
        credentials: &Credentials,
        limit: usize,
    ) -> Result<Vec<RemotePlaylist>, TransportError> {
        #[derive(serde::Deserialize)]
        struct PlaylistPage {
            #[serde(default)]
            data: Vec<PlaylistResource>,
        }
        #[derive(serde::Deserialize)]
        struct PlaylistResource {
            id: String,
            attributes: PlaylistAttributes,
        }
        #[derive(serde::Deserialize)]
        struct PlaylistAttributes {
            name: String,
        }

        let url = format!(
            "{}/v1/me/library/playlists?limit={}",
            self.base_url, limit
        );
        let page: PlaylistPage = self.get_json(url, credentials).await?;
        Ok(page
            .data
            .into_iter()
            .map(|p| RemotePlaylist {
                id: p.id,
                name: p.attributes.name,
            })
            .collect())
    }
}
