//! # Spotify Integration Module
//!
//! Thin client for the two Spotify services the proxy talks to:
//!
//! ```text
//! Route handlers (api)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (authorize URL, code exchange, refresh)
//!     ├── Artist Operations (followed artists, artist top tracks)
//!     ├── Track Operations (the user's top tracks)
//!     └── Player Operations (play, pause, currently playing)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify accounts service / Web API
//! ```
//!
//! Every Web API call goes through [`SpotifyClient::authorized`], which reads
//! the current access token from the [`TokenStore`] and attaches it as a bearer
//! credential. Failures come back as [`UpstreamError`] so handlers can match on
//! the kind of failure.
//!
//! There is no retry of any kind. An expired access token surfaces as a
//! rejected call; renewing it is an explicit [`TokenStore::refresh`].

pub mod artists;
pub mod auth;
pub mod player;
pub mod tracks;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use reqwest::{Client, Method, Response, header::CONTENT_LENGTH};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{config::Config, error::UpstreamError, management::TokenStore};

/// Bytes escaped inside a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// HTTP client bound to one set of Spotify endpoints and app credentials.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    config: Config,
}

impl SpotifyClient {
    pub fn new(config: Config) -> Self {
        Self::with_http(Client::new(), config)
    }

    pub fn with_http(http: Client, config: Config) -> Self {
        SpotifyClient { http, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Sends `method {api_url}{path}` with the current access token.
    ///
    /// Fails with [`UpstreamError::NotAuthenticated`] before touching the
    /// network when no access token is stored. Any non-2xx answer becomes
    /// [`UpstreamError::Rejected`] carrying the upstream error body.
    pub async fn authorized(
        &self,
        tokens: &TokenStore,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Response, UpstreamError> {
        let token = tokens.access_token().await;
        if token.is_empty() {
            return Err(UpstreamError::NotAuthenticated);
        }
        if tokens.is_expired().await {
            tracing::warn!("access token is about to expire, call /refresh_token to renew it");
        }

        let url = format!("{}{}", self.config.api_url, path);
        let is_get = method == Method::GET;
        tracing::debug!(%method, %url, "calling Spotify Web API");

        let mut request = self.http.request(method, &url).bearer_auth(&token);
        request = match body {
            Some(json) => request.json(json),
            // the player endpoints refuse body-less writes without a length
            None if !is_get => request.header(CONTENT_LENGTH, 0),
            None => request,
        };

        let response = request.send().await?;
        ensure_success(response).await
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }
}

/// Turns a non-2xx response into [`UpstreamError::Rejected`].
pub(crate) async fn ensure_success(response: Response) -> Result<Response, UpstreamError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let details = serde_json::from_str::<Value>(&text).unwrap_or(Value::String(text));
    Err(UpstreamError::Rejected { status, details })
}

/// Percent-encodes caller input for use as one segment of an API path.
pub(crate) fn path_segment(raw: &str) -> String {
    utf8_percent_encode(raw, PATH_SEGMENT).to_string()
}

pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, UpstreamError> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| UpstreamError::Decode(e.to_string()))
}
