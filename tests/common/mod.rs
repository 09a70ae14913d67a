#![allow(dead_code)]

use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use axum::{
    Form, Json, Router,
    extract::{Path, Request},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde_json::{Value, json};
use spotproxy::{
    config::Config,
    management::TokenStore,
    server::{self, AppState},
    spotify::SpotifyClient,
};
use tokio::net::TcpListener;

/// base64 of `client-id:client-secret`
pub const BASIC_CREDENTIALS: &str = "Basic Y2xpZW50LWlkOmNsaWVudC1zZWNyZXQ=";
pub const VALID_ACCESS: &str = "A1";

/// How the stub answers `GET /me/player/currently-playing`.
#[derive(Debug, Clone, Copy)]
pub enum Player {
    Playing,
    Idle,
    /// 200 with a null `item`, as sent while an ad is on
    Ad,
    Broken,
}

/// How the stub answers `GET /me/following`.
#[derive(Debug, Clone, Copy)]
pub enum Library {
    Healthy,
    Broken,
}

pub struct Upstream {
    pub addr: SocketAddr,
    hits: Arc<Mutex<Vec<String>>>,
}

impl Upstream {
    /// Requests seen so far, as `METHOD /path`.
    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }

    pub fn config(&self) -> Config {
        let base = format!("http://{}", self.addr);
        Config::from_lookup(|name| match name {
            "SPOTIFY_CLIENT_ID" => Some("client-id".into()),
            "SPOTIFY_CLIENT_SECRET" => Some("client-secret".into()),
            "REDIRECT_URI" => Some("http://localhost:8888/spotify/callback".into()),
            "SPOTIFY_API_URL" => Some(format!("{base}/v1")),
            "SPOTIFY_API_AUTH_URL" => Some(format!("{base}/authorize")),
            "SPOTIFY_API_TOKEN_URL" => Some(format!("{base}/api/token")),
            _ => None,
        })
        .unwrap()
    }

    pub fn client(&self) -> SpotifyClient {
        SpotifyClient::new(self.config())
    }
}

/// Starts a fake accounts service and Web API on a loopback port.
pub async fn spawn_upstream(player: Player) -> Upstream {
    spawn_upstream_with(player, Library::Healthy).await
}

pub async fn spawn_upstream_with(player: Player, library: Library) -> Upstream {
    let hits = Arc::new(Mutex::new(Vec::new()));
    let recorder = hits.clone();

    let app = spotify_stub(player, library).layer(middleware::from_fn(
        move |req: Request, next: Next| {
            let recorder = recorder.clone();
            async move {
                recorder
                    .lock()
                    .unwrap()
                    .push(format!("{} {}", req.method(), req.uri().path()));
                next.run(req).await
            }
        },
    ));

    let addr = spawn(app).await;
    Upstream { addr, hits }
}

/// Serves the proxy with the given session against `upstream`.
pub async fn spawn_proxy(upstream: &Upstream, tokens: TokenStore) -> String {
    let state = AppState {
        spotify: upstream.client(),
        tokens,
    };
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { server::serve(listener, state).await.unwrap() });
    format!("http://{addr}")
}

pub fn http() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

async fn spawn(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    addr
}

fn spotify_stub(player: Player, library: Library) -> Router {
    Router::new()
        .route("/api/token", post(token))
        .route(
            "/v1/me/following",
            get(move |headers: HeaderMap| following(headers, library)),
        )
        .route("/v1/me/top/tracks", get(my_top_tracks))
        .route("/v1/artists/{id}/top-tracks", get(artist_top_tracks))
        .route("/v1/me/player/pause", put(pause))
        .route("/v1/me/player/play", put(play))
        .route(
            "/v1/me/player/currently-playing",
            get(move |headers: HeaderMap| currently_playing(headers, player)),
        )
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": { "status": 401, "message": "Invalid access token" } })),
    )
        .into_response()
}

fn bearer_ok(headers: &HeaderMap) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {VALID_ACCESS}"))
}

fn track(n: usize) -> Value {
    json!({
        "name": format!("Track {n}"),
        "uri": format!("spotify:track:{n:022}"),
        "duration_ms": 200_000 + n,
        "artists": [{ "name": "Radiohead" }, { "name": "Guest" }],
        "album": { "name": "OK Computer" },
    })
}

async fn token(headers: HeaderMap, Form(form): Form<HashMap<String, String>>) -> Response {
    let authorized = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == BASIC_CREDENTIALS);
    if !authorized {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_client" })),
        )
            .into_response();
    }

    let grant = form.get("grant_type").map(String::as_str);
    match (grant, form.get("code"), form.get("refresh_token")) {
        (Some("authorization_code"), Some(code), _) if code == "good-code" => Json(json!({
            "access_token": VALID_ACCESS,
            "token_type": "Bearer",
            "scope": "user-follow-read user-top-read",
            "expires_in": 3600,
            "refresh_token": "R1",
        }))
        .into_response(),
        (Some("refresh_token"), _, Some(refresh)) if refresh == "R1" => Json(json!({
            "access_token": "A2",
            "token_type": "Bearer",
            "expires_in": 3600,
        }))
        .into_response(),
        (Some("refresh_token"), _, Some(refresh)) if refresh == "ROTATING" => Json(json!({
            "access_token": "A3",
            "token_type": "Bearer",
            "expires_in": 3600,
            "refresh_token": "R2",
        }))
        .into_response(),
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_grant", "error_description": "Invalid refresh token" })),
        )
            .into_response(),
    }
}

async fn following(headers: HeaderMap, library: Library) -> Response {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    if let Library::Broken = library {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": { "status": 503, "message": "Service unavailable" } })),
        )
            .into_response();
    }
    Json(json!({
        "artists": {
            "items": [
                { "name": "Radiohead", "id": "4Z8W4fKeB5YxbusRsdQVPb", "genres": ["rock"] },
                { "name": "Björk", "id": "7w29UYBi0qsHi5RTcHeWyf", "genres": [] },
            ],
            "next": null,
            "cursors": { "after": null },
            "total": 2,
        }
    }))
    .into_response()
}

async fn my_top_tracks(headers: HeaderMap) -> Response {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    Json(json!({ "items": (1..=3).map(track).collect::<Vec<_>>() })).into_response()
}

async fn artist_top_tracks(headers: HeaderMap, Path(id): Path<String>) -> Response {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    if id != "4Z8W4fKeB5YxbusRsdQVPb" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": { "status": 400, "message": "invalid id" } })),
        )
            .into_response();
    }
    Json(json!({ "tracks": (1..=12).map(track).collect::<Vec<_>>() })).into_response()
}

async fn pause(headers: HeaderMap) -> Response {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn play(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    if body["uris"].as_array().is_none_or(|uris| uris.len() != 1) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": { "status": 400, "message": "Malformed json" } })),
        )
            .into_response();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn currently_playing(headers: HeaderMap, player: Player) -> Response {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    match player {
        Player::Playing => Json(json!({
            "is_playing": true,
            "progress_ms": 42_000,
            "item": track(7),
        }))
        .into_response(),
        Player::Idle => StatusCode::NO_CONTENT.into_response(),
        Player::Ad => Json(json!({
            "is_playing": true,
            "progress_ms": 5_000,
            "currently_playing_type": "ad",
            "item": null,
        }))
        .into_response(),
        Player::Broken => (
            StatusCode::BAD_GATEWAY,
            Json(json!({ "error": { "status": 502, "message": "Bad gateway" } })),
        )
            .into_response(),
    }
}
