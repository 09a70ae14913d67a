use reqwest::Method;

use crate::{
    error::UpstreamError,
    management::TokenStore,
    spotify::{SpotifyClient, decode},
    types::{Track, UserTopTracksResponse},
};

/// The authorized user's ten most played tracks over roughly the last month.
pub async fn my_top_tracks(
    client: &SpotifyClient,
    tokens: &TokenStore,
) -> Result<Vec<Track>, UpstreamError> {
    let res = client
        .authorized(
            tokens,
            Method::GET,
            "/me/top/tracks?limit=10&time_range=short_term",
            None,
        )
        .await?;
    let body: UserTopTracksResponse = decode(res).await?;
    Ok(body.items)
}
