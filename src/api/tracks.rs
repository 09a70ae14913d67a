use axum::{extract::State, response::Json};
use serde_json::{Value, json};

use crate::{error::ApiError, server::AppState, spotify, utils};

/// `GET /me/top-tracks`
pub async fn my_top_tracks(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let tracks = spotify::tracks::my_top_tracks(&state.spotify, &state.tokens)
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch your top tracks", e))?;
    let tracks: Vec<_> = tracks.into_iter().map(utils::to_top_track).collect();

    Ok(Json(json!({ "top_tracks": tracks })))
}
