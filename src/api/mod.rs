//! # API Module
//!
//! HTTP handlers exposed by the proxy. Each handler reads the session from the
//! injected [`AppState`](crate::server::AppState), performs one to three calls
//! through [`crate::spotify`], reshapes the answer and writes JSON.
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`login`] - `GET /login`, 302 to the Spotify consent screen
//! - [`callback`] - `GET /spotify/callback`, exchanges the code for tokens
//! - [`refresh_token`] - `GET /refresh_token`, renews the access token
//!
//! ### Library and player
//!
//! - [`following`] - `GET /me/following`
//! - [`top_tracks`] - `GET /top-tracks/{artist_id}`
//! - [`my_top_tracks`] - `GET /me/top-tracks`
//! - [`pause`] - `PUT /pause`
//! - [`play`] / [`play_link`] - `PUT /play`, `GET /play?uri=`
//! - [`now_playing`] - `GET /me/now-playing`
//! - [`overview`] - `GET /spotify`, the aggregate view
//!
//! ### Monitoring
//!
//! - [`health`] - `GET /health`
//!
//! Failures are returned as [`ApiError`](crate::error::ApiError), which renders
//! the `{error, details}` bodies and status codes.

mod artists;
mod auth;
mod health;
mod overview;
mod player;
mod tracks;

pub use artists::{following, top_tracks};
pub use auth::{callback, login, refresh_token};
pub use health::health;
pub use overview::{Overview, overview};
pub use player::{now_playing, pause, play, play_link};
pub use tracks::my_top_tracks;
