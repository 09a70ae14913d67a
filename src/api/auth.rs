use axum::{
    extract::{Query, State},
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{error::ApiError, server::AppState, spotify, utils};

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    code: Option<String>,
    error: Option<String>,
}

/// `GET /login`: sends the browser to the Spotify consent screen.
pub async fn login(State(state): State<AppState>) -> impl IntoResponse {
    let url = spotify::auth::authorize_url(&state.spotify, &utils::generate_state());
    (StatusCode::FOUND, [(LOCATION, url)])
}

/// `GET /spotify/callback`: completes the authorization-code flow.
pub async fn callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Result<&'static str, ApiError> {
    if let Some(reason) = params.error {
        tracing::warn!(%reason, "authorization was not granted");
    }
    let code = params
        .code
        .filter(|code| !code.is_empty())
        .ok_or(ApiError::MissingInput("Authorization code is required"))?;

    let grant = spotify::auth::exchange_code(&state.spotify, &code)
        .await
        .map_err(|e| ApiError::upstream("Failed to get tokens", e))?;
    state.tokens.set_grant(grant).await;
    tracing::info!("authorized with Spotify");

    Ok("Authorization successful. You can now use the API endpoints.")
}

/// `GET /refresh_token`: renews the access token on demand.
pub async fn refresh_token(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    state.tokens.refresh(&state.spotify).await?;
    tracing::info!("access token refreshed");

    Ok(Json(json!({ "message": "Token refreshed successfully" })))
}
