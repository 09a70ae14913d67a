use crate::{
    config::SPOTIFY_SCOPE,
    error::UpstreamError,
    spotify::{SpotifyClient, decode, ensure_success},
    types::TokenGrant,
};

/// Builds the accounts-service URL the browser is redirected to on login.
///
/// `state` is echoed back by Spotify on the callback.
pub fn authorize_url(client: &SpotifyClient, state: &str) -> String {
    let config = client.config();
    let mut url = config.auth_url.clone();
    url.query_pairs_mut()
        .append_pair("response_type", "code")
        .append_pair("client_id", &config.client_id)
        .append_pair("scope", SPOTIFY_SCOPE)
        .append_pair("redirect_uri", &config.redirect_uri)
        .append_pair("state", state);
    url.into()
}

/// Exchanges an authorization code for a token pair.
///
/// The code is single-use and short-lived, so the exchange must happen as
/// soon as the callback arrives.
pub async fn exchange_code(client: &SpotifyClient, code: &str) -> Result<TokenGrant, UpstreamError> {
    let redirect_uri = client.config().redirect_uri.as_str();
    token_request(
        client,
        &[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri),
        ],
    )
    .await
}

/// Requests a new access token with the `refresh_token` grant.
///
/// The response may or may not carry a rotated refresh token.
pub async fn refresh_token(
    client: &SpotifyClient,
    refresh_token: &str,
) -> Result<TokenGrant, UpstreamError> {
    token_request(
        client,
        &[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ],
    )
    .await
}

async fn token_request(
    client: &SpotifyClient,
    form: &[(&str, &str)],
) -> Result<TokenGrant, UpstreamError> {
    let config = client.config();
    let res = client
        .http()
        .post(&config.token_url)
        .basic_auth(&config.client_id, Some(&config.client_secret))
        .form(form)
        .send()
        .await?;

    let grant: TokenGrant = decode(ensure_success(res).await?).await?;
    if grant.access_token.is_empty() {
        return Err(UpstreamError::Decode(
            "token response without access_token".to_string(),
        ));
    }
    Ok(grant)
}
