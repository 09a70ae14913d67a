use reqwest::Method;

use crate::{
    error::UpstreamError,
    management::TokenStore,
    spotify::{SpotifyClient, decode, path_segment},
    types::{Artist, ArtistTopTracksResponse, FollowedArtistsResponse, Track},
};

const FOLLOWED_LIMIT: u32 = 20;
const TOP_TRACKS_MARKET: &str = "US";
const TOP_TRACKS_LIMIT: usize = 10;

/// Returns the first page of artists the authorized user follows.
pub async fn followed(
    client: &SpotifyClient,
    tokens: &TokenStore,
) -> Result<Vec<Artist>, UpstreamError> {
    let path = format!("/me/following?type=artist&limit={FOLLOWED_LIMIT}");
    let res = client.authorized(tokens, Method::GET, &path, None).await?;
    let body: FollowedArtistsResponse = decode(res).await?;
    Ok(body.artists.items)
}

/// Returns at most ten of an artist's most popular tracks in the US market.
pub async fn top_tracks(
    client: &SpotifyClient,
    tokens: &TokenStore,
    artist_id: &str,
) -> Result<Vec<Track>, UpstreamError> {
    let path = format!(
        "/artists/{}/top-tracks?market={TOP_TRACKS_MARKET}",
        path_segment(artist_id)
    );
    let res = client.authorized(tokens, Method::GET, &path, None).await?;
    let body: ArtistTopTracksResponse = decode(res).await?;
    Ok(body.tracks.into_iter().take(TOP_TRACKS_LIMIT).collect())
}
