use reqwest::{Method, StatusCode};
use serde_json::json;

use crate::{
    error::UpstreamError,
    management::TokenStore,
    spotify::{SpotifyClient, decode},
    types::{CurrentlyPlayingResponse, NowPlaying},
};

pub async fn pause(client: &SpotifyClient, tokens: &TokenStore) -> Result<(), UpstreamError> {
    client
        .authorized(tokens, Method::PUT, "/me/player/pause", None)
        .await?;
    Ok(())
}

/// Starts playback of a single track URI on the user's active device.
pub async fn play(
    client: &SpotifyClient,
    tokens: &TokenStore,
    uri: &str,
) -> Result<(), UpstreamError> {
    let body = json!({ "uris": [uri] });
    client
        .authorized(tokens, Method::PUT, "/me/player/play", Some(&body))
        .await?;
    Ok(())
}

/// Returns the track on the user's player, or `None` when nothing is playing.
///
/// Spotify answers 204 when the player is idle, and a null `item` while an ad
/// or an unavailable episode is on.
pub async fn now_playing(
    client: &SpotifyClient,
    tokens: &TokenStore,
) -> Result<Option<NowPlaying>, UpstreamError> {
    let res = client
        .authorized(tokens, Method::GET, "/me/player/currently-playing", None)
        .await?;
    if res.status() == StatusCode::NO_CONTENT {
        return Ok(None);
    }

    let body: CurrentlyPlayingResponse = decode(res).await?;
    let progress_ms = body.progress_ms;
    Ok(body.item.map(|track| NowPlaying {
        artist: track.artist_name(),
        album: track.album_name(),
        name: track.name,
        uri: track.uri,
        progress_ms,
        duration_ms: track.duration_ms,
    }))
}
