use rand::{Rng, distr::Alphanumeric};

use crate::types::{PlayableTrack, TopTrack, Track, TrackRef};

/// Length of the `state` value sent on the authorize redirect.
pub const STATE_LENGTH: usize = 16;

pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(STATE_LENGTH)
        .map(|c| char::from(c).to_ascii_lowercase())
        .collect()
}

/// Relative link that starts playback of `uri` through `GET /play`.
pub fn play_url(uri: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(uri.as_bytes()).collect();
    format!("/play?uri={encoded}")
}

pub fn to_track_ref(track: Track) -> TrackRef {
    TrackRef {
        name: track.name,
        uri: track.uri,
    }
}

pub fn to_top_track(track: Track) -> TopTrack {
    TopTrack {
        artist: track.artist_name(),
        album: track.album_name(),
        name: track.name,
        uri: track.uri,
    }
}

pub fn to_playable_track(track: Track) -> PlayableTrack {
    PlayableTrack {
        artist: track.artist_name(),
        play_url: play_url(&track.uri),
        name: track.name,
        uri: track.uri,
    }
}
