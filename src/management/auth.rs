use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;

use crate::{
    error::RefreshError,
    spotify::{self, SpotifyClient},
    types::{DEFAULT_EXPIRES_IN, TokenGrant, TokenPair},
};

/// Seconds before the nominal expiry at which a token is treated as stale.
const EXPIRY_MARGIN_SECS: u64 = 240;

/// Holds the process-wide OAuth session.
///
/// Cloning the store hands out another handle to the same token pair. Writes
/// replace whole values and the lock is never held across an upstream call,
/// so concurrent writers resolve as last-write-wins.
#[derive(Debug, Clone, Default)]
pub struct TokenStore {
    inner: Arc<Mutex<TokenPair>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that is already authorized.
    pub fn with_tokens(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        TokenStore {
            inner: Arc::new(Mutex::new(TokenPair {
                access_token: access_token.into(),
                refresh_token: refresh_token.into(),
                scope: String::new(),
                expires_in: DEFAULT_EXPIRES_IN,
                obtained_at: now(),
            })),
        }
    }

    /// Replaces both tokens unconditionally.
    pub async fn set_tokens(
        &self,
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
    ) {
        let mut pair = self.inner.lock().await;
        *pair = TokenPair {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            scope: String::new(),
            expires_in: DEFAULT_EXPIRES_IN,
            obtained_at: now(),
        };
    }

    /// Stores the result of an authorization-code exchange.
    pub async fn set_grant(&self, grant: TokenGrant) {
        let mut pair = self.inner.lock().await;
        *pair = TokenPair {
            access_token: grant.access_token,
            refresh_token: grant.refresh_token.unwrap_or_default(),
            scope: grant.scope.unwrap_or_default(),
            expires_in: grant.expires_in.unwrap_or(DEFAULT_EXPIRES_IN),
            obtained_at: now(),
        };
    }

    pub async fn access_token(&self) -> String {
        self.inner.lock().await.access_token.clone()
    }

    pub async fn is_authorized(&self) -> bool {
        !self.inner.lock().await.access_token.is_empty()
    }

    pub async fn snapshot(&self) -> TokenPair {
        self.inner.lock().await.clone()
    }

    /// Whether the access token is at or past its expiry margin.
    ///
    /// Only informs callers; nothing refreshes automatically.
    pub async fn is_expired(&self) -> bool {
        let pair = self.inner.lock().await;
        !pair.access_token.is_empty()
            && now().saturating_add(EXPIRY_MARGIN_SECS)
                >= pair.obtained_at.saturating_add(pair.expires_in)
    }

    /// Trades the stored refresh token for a new access token.
    ///
    /// The refresh token is only replaced when the accounts service rotates it.
    /// On failure the stored pair is left untouched.
    pub async fn refresh(&self, client: &SpotifyClient) -> Result<(), RefreshError> {
        let refresh_token = self.inner.lock().await.refresh_token.clone();
        if refresh_token.is_empty() {
            return Err(RefreshError::NoRefreshToken);
        }

        let grant = spotify::auth::refresh_token(client, &refresh_token)
            .await
            .map_err(RefreshError::UpstreamRejected)?;

        let mut pair = self.inner.lock().await;
        pair.access_token = grant.access_token;
        if let Some(rotated) = grant.refresh_token.filter(|t| !t.is_empty()) {
            pair.refresh_token = rotated;
        }
        if let Some(scope) = grant.scope {
            pair.scope = scope;
        }
        pair.expires_in = grant.expires_in.unwrap_or(DEFAULT_EXPIRES_IN);
        pair.obtained_at = now();

        Ok(())
    }
}

fn now() -> u64 {
    Utc::now().timestamp().max(0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn starts_unauthorized() {
        let store = TokenStore::new();
        assert!(!store.is_authorized().await);
        assert_eq!(store.access_token().await, "");
        assert!(!store.is_expired().await);
    }

    #[tokio::test]
    async fn set_tokens_authorizes() {
        let store = TokenStore::new();
        store.set_tokens("A1", "R1").await;

        assert!(store.is_authorized().await);
        assert_eq!(store.access_token().await, "A1");
        assert_eq!(store.snapshot().await.refresh_token, "R1");
    }

    #[tokio::test]
    async fn set_tokens_replaces_both() {
        let store = TokenStore::with_tokens("A1", "R1");
        store.set_tokens("A2", "").await;

        let pair = store.snapshot().await;
        assert_eq!(pair.access_token, "A2");
        assert_eq!(pair.refresh_token, "");
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = TokenStore::new();
        let handle = store.clone();
        handle.set_tokens("A1", "R1").await;

        assert_eq!(store.access_token().await, "A1");
    }

    #[tokio::test]
    async fn grant_records_metadata() {
        let store = TokenStore::new();
        store
            .set_grant(TokenGrant {
                access_token: "A1".into(),
                refresh_token: Some("R1".into()),
                scope: Some("user-top-read".into()),
                expires_in: Some(60),
                token_type: Some("Bearer".into()),
            })
            .await;

        let pair = store.snapshot().await;
        assert_eq!(pair.scope, "user-top-read");
        assert_eq!(pair.expires_in, 60);
        // 60 seconds is inside the expiry margin
        assert!(store.is_expired().await);
    }

    #[tokio::test]
    async fn huge_expires_in_never_expires() {
        let store = TokenStore::new();
        store
            .set_grant(TokenGrant {
                access_token: "A1".into(),
                refresh_token: None,
                scope: None,
                expires_in: Some(u64::MAX),
                token_type: None,
            })
            .await;

        assert!(!store.is_expired().await);
        assert!(store.is_authorized().await);
    }
}
