use axum::{extract::State, response::Json};
use serde::Serialize;

use crate::{
    error::ApiError,
    server::AppState,
    spotify,
    types::{Artist, NowPlaying, PlayableTrack},
    utils,
};

const CONTEXT: &str = "Failed to fetch Spotify data";

#[derive(Debug, Serialize)]
pub struct Overview {
    pub now_playing: Option<NowPlaying>,
    pub stop_playback_url: &'static str,
    pub followed_artists: Vec<Artist>,
    pub top_tracks: Vec<PlayableTrack>,
}

/// `GET /spotify`: followed artists, top tracks and the current track in one
/// response.
///
/// Only the first two calls are required. A failing now-playing lookup is
/// logged and reported as `null`.
pub async fn overview(State(state): State<AppState>) -> Result<Json<Overview>, ApiError> {
    if !state.tokens.is_authorized().await {
        return Err(ApiError::NotAuthenticated);
    }

    let followed_artists = spotify::artists::followed(&state.spotify, &state.tokens)
        .await
        .map_err(|e| ApiError::upstream(CONTEXT, e))?;

    let top_tracks: Vec<PlayableTrack> = spotify::tracks::my_top_tracks(&state.spotify, &state.tokens)
        .await
        .map_err(|e| ApiError::upstream(CONTEXT, e))?
        .into_iter()
        .map(utils::to_playable_track)
        .collect();

    let now_playing = match spotify::player::now_playing(&state.spotify, &state.tokens).await {
        Ok(current) => current,
        Err(e) => {
            tracing::warn!(error = %e, "Error fetching now playing");
            None
        }
    };

    Ok(Json(Overview {
        now_playing,
        stop_playback_url: "/pause",
        followed_artists,
        top_tracks,
    }))
}
