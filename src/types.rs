use serde::{Deserialize, Serialize};

/// Lifetime assumed for an access token when the token endpoint omits `expires_in`.
pub const DEFAULT_EXPIRES_IN: u64 = 3600;

/// The single OAuth session held by the process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// Body returned by the accounts service token endpoint, for both the
/// authorization-code and the refresh-token grant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub name: String,
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FollowedArtistsResponse {
    pub artists: ArtistsContainer,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistsContainer {
    pub items: Vec<Artist>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackArtist {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackAlbum {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Track {
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub artists: Vec<TrackArtist>,
    #[serde(default)]
    pub album: Option<TrackAlbum>,
    #[serde(default)]
    pub duration_ms: Option<u64>,
}

impl Track {
    /// Name of the first credited artist, empty when the track lists none.
    pub fn artist_name(&self) -> String {
        self.artists
            .first()
            .map(|artist| artist.name.clone())
            .unwrap_or_default()
    }

    pub fn album_name(&self) -> String {
        self.album
            .as_ref()
            .map(|album| album.name.clone())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistTopTracksResponse {
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserTopTracksResponse {
    pub items: Vec<Track>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentlyPlayingResponse {
    #[serde(default)]
    pub item: Option<Track>,
    #[serde(default)]
    pub progress_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackRef {
    pub name: String,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopTrack {
    pub name: String,
    pub artist: String,
    pub album: String,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayableTrack {
    pub name: String,
    pub artist: String,
    pub uri: String,
    pub play_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NowPlaying {
    pub name: String,
    pub artist: String,
    pub album: String,
    pub uri: String,
    pub progress_ms: Option<u64>,
    pub duration_ms: Option<u64>,
}
