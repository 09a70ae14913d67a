//! Configuration management for the proxy.
//!
//! Values come from environment variables. Before they are read, [`load_env`]
//! pulls in a `.env` file from the working directory and then from the local
//! data directory, so variables set in the real environment always win:
//!
//! 1. Environment variables (highest priority)
//! 2. `.env` in the current working directory
//! 3. `.env` in the local data directory (`spotproxy/.env`)
//! 4. Defaults for the optional values

use std::{env, path::PathBuf};

use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_PORT: u16 = 8888;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Permissions requested on the authorize redirect.
pub const SPOTIFY_SCOPE: &str = "user-follow-read user-modify-playback-state user-read-playback-state user-top-read streaming app-remote-control";

/// Runtime settings shared by the server and the Spotify client.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    /// Base URL of the Web API, without trailing slash.
    pub api_url: String,
    pub auth_url: Url,
    pub token_url: String,
}

impl Config {
    /// Builds the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let required = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let port = match get("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
                name: "PORT",
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: get("SERVER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            client_id: required("SPOTIFY_CLIENT_ID")?,
            client_secret: required("SPOTIFY_CLIENT_SECRET")?,
            redirect_uri: required("REDIRECT_URI")?,
            api_url: trim_base(get("SPOTIFY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into())),
            auth_url: parse_url(
                "SPOTIFY_API_AUTH_URL",
                &get("SPOTIFY_API_AUTH_URL").unwrap_or_else(|| DEFAULT_AUTH_URL.into()),
            )?,
            token_url: get("SPOTIFY_API_TOKEN_URL").unwrap_or_else(|| DEFAULT_TOKEN_URL.into()),
        })
    }

    /// Address the HTTP listener binds to, e.g. `0.0.0.0:8888`.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_url(name: &'static str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::Invalid {
        name,
        reason: e.to_string(),
    })
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

/// Location of the `.env` file in the platform data directory.
///
/// - Linux: `~/.local/share/spotproxy/.env`
/// - macOS: `~/Library/Application Support/spotproxy/.env`
/// - Windows: `%LOCALAPPDATA%/spotproxy/.env`
pub fn env_file_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotproxy/.env");
    path
}

/// Loads `.env` files into the process environment.
///
/// Missing files are not an error; a file that exists but cannot be parsed is.
pub async fn load_env() -> Result<(), String> {
    if let Err(e) = dotenv::dotenv() {
        if !e.not_found() {
            return Err(e.to_string());
        }
    }

    let path = env_file_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}
