use axum::{
    Router,
    routing::{get, put},
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{Res, api, config::Config, management::TokenStore, spotify::SpotifyClient};

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub spotify: SpotifyClient,
    pub tokens: TokenStore,
}

impl AppState {
    /// Fresh, unauthenticated state for the given configuration.
    pub fn new(config: Config) -> Self {
        AppState {
            spotify: SpotifyClient::new(config),
            tokens: TokenStore::new(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(api::health))
        .route("/login", get(api::login))
        .route("/spotify/callback", get(api::callback))
        .route("/me/following", get(api::following))
        .route("/pause", put(api::pause))
        .route("/top-tracks/{artist_id}", get(api::top_tracks))
        .route("/play", put(api::play).get(api::play_link))
        .route("/me/top-tracks", get(api::my_top_tracks))
        .route("/me/now-playing", get(api::now_playing))
        .route("/spotify", get(api::overview))
        .route("/refresh_token", get(api::refresh_token))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Serves the proxy on an already bound listener.
pub async fn serve(listener: TcpListener, state: AppState) -> Res<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "serving Spotify proxy");
    }
    axum::serve(listener, router(state)).await?;
    Ok(())
}
