use axum::{
    extract::{Path, State},
    response::Json,
};
use serde_json::{Value, json};

use crate::{error::ApiError, server::AppState, spotify, utils};

/// `GET /me/following`: names of the artists the user follows.
pub async fn following(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let artists = spotify::artists::followed(&state.spotify, &state.tokens)
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch followed artists", e))?;
    let names: Vec<String> = artists.into_iter().map(|artist| artist.name).collect();

    Ok(Json(json!({ "followed_artists": names })))
}

/// `GET /top-tracks/{artist_id}`
pub async fn top_tracks(
    State(state): State<AppState>,
    Path(artist_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let tracks = spotify::artists::top_tracks(&state.spotify, &state.tokens, &artist_id)
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch top tracks", e))?;
    let tracks: Vec<_> = tracks.into_iter().map(utils::to_track_ref).collect();

    Ok(Json(json!({ "top_tracks": tracks })))
}
