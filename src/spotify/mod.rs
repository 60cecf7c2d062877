//! # Spotify Integration Module
//!
//! Thin, typed wrappers around the Spotify Web API endpoints the discovery
//! pipeline needs, plus the OAuth helpers used by the callers that obtain a
//! credential.
//!
//! ## Architecture
//!
//! ```text
//! Discovery Pipeline / CLI / HTTP handlers
//!          ↓
//! Spotify Integration Layer
//!     ├── SpotifyClient (authenticated GET/POST, status mapping)
//!     ├── Artist Operations (followed artists, related artists)
//!     ├── Release Operations (artist albums, album tracks)
//!     ├── Playlist Operations (create, add tracks)
//!     ├── User Operations (current profile)
//!     └── Authentication (PKCE code exchange, refresh)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ## Status Handling
//!
//! Every endpoint wrapper returns `Result<Option<T>, DiscoveryError>`:
//!
//! - `Ok(Some(value))` - 2xx response, decoded with missing fields defaulted
//! - `Ok(None)` - 401 Unauthorized; the credential expired or was revoked
//! - `Err(DiscoveryError::Api { .. })` - any other non-success status
//! - `Err(DiscoveryError::Request(_))` / `Err(DiscoveryError::Parse(_))` -
//!   transport or decoding failure
//!
//! Nothing is retried here. Whether a `None` is skippable or fatal is decided
//! by the pipeline stage that made the call.
//!
//! ## API Coverage
//!
//! - `GET /me/following` - followed artists, cursor pagination
//! - `GET /artists/{id}/related-artists` - "fans also like"
//! - `GET /artists/{id}/albums` - albums and singles for one market
//! - `GET /albums/{id}/tracks` - album track listing
//! - `GET /me` - current user profile
//! - `POST /users/{user_id}/playlists` - create a playlist
//! - `POST /playlists/{playlist_id}/tracks` - append up to 100 tracks

pub mod artists;
pub mod auth;
pub mod playlist;
pub mod releases;
pub mod user;

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    config,
    error::{DiscoveryError, Result},
    types::Credential,
};

/// Authenticated access to the Spotify Web API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    base_url: String,
}

impl SpotifyClient {
    /// Creates a client rooted at `base_url`, e.g. `https://api.spotify.com/v1`.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!(
                "{}/{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Creates a client for the configured `SPOTIFY_API_URL`.
    pub fn from_env() -> Result<Self> {
        Self::new(config::spotify_apiurl())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        credential: &Credential,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Option<T>> {
        let request = self.http.get(self.url(path)).query(query);
        self.send(credential, request).await
    }

    pub(crate) async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        credential: &Credential,
        path: &str,
        body: &B,
    ) -> Result<Option<T>> {
        let request = self.http.post(self.url(path)).json(body);
        self.send(credential, request).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        credential: &Credential,
        request: RequestBuilder,
    ) -> Result<Option<T>> {
        let response = request.bearer_auth(&credential.access_token).send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<Option<T>> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return Ok(None);
    }

    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(DiscoveryError::Api {
            status: status.as_u16(),
            message,
        });
    }

    let body = response.text().await?;
    // an empty body still means "no data", not a parse failure
    let body: &str = if body.trim().is_empty() {
        "{}"
    } else {
        body.as_str()
    };
    Ok(Some(serde_json::from_str(body)?))
}
