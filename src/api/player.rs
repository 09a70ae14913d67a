use axum::{
    body::Bytes,
    extract::{Query, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{error::ApiError, server::AppState, spotify};

const URI_REQUIRED: &str = "URI is required";

#[derive(Debug, Default, Deserialize)]
pub struct PlayParams {
    uri: Option<String>,
}

/// `PUT /pause`
pub async fn pause(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    spotify::player::pause(&state.spotify, &state.tokens)
        .await
        .map_err(|e| ApiError::upstream("Failed to pause playback", e))?;

    Ok(Json(json!({ "message": "Playback paused." })))
}

/// `PUT /play` with a `{"uri": "..."}` body.
///
/// A missing or empty `uri` is answered with 400 before Spotify is contacted.
/// So is a body that is not JSON or whose `uri` is not a string.
pub async fn play(State(state): State<AppState>, body: Bytes) -> Result<Json<Value>, ApiError> {
    let params: PlayParams = serde_json::from_slice(&body).unwrap_or_default();
    start_playback(&state, params.uri).await
}

/// `GET /play?uri=...`, used by the links in the `/spotify` overview.
pub async fn play_link(
    State(state): State<AppState>,
    Query(params): Query<PlayParams>,
) -> Result<Json<Value>, ApiError> {
    start_playback(&state, params.uri).await
}

async fn start_playback(state: &AppState, uri: Option<String>) -> Result<Json<Value>, ApiError> {
    let uri = uri
        .filter(|uri| !uri.is_empty())
        .ok_or(ApiError::MissingInput(URI_REQUIRED))?;

    spotify::player::play(&state.spotify, &state.tokens, &uri)
        .await
        .map_err(|e| ApiError::upstream("Failed to play track", e))?;

    Ok(Json(json!({ "message": format!("Started playing track: {uri}") })))
}

/// `GET /me/now-playing`
pub async fn now_playing(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let current = spotify::player::now_playing(&state.spotify, &state.tokens)
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch currently playing track", e))?;

    Ok(Json(match current {
        Some(track) => json!({ "now_playing": track }),
        None => json!({
            "now_playing": null,
            "message": "No track currently playing",
        }),
    }))
}
