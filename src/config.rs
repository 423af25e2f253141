//! Credential and configuration loading for the Release Radar tool.
//!
//! Configuration lives in the platform-specific local data directory under
//! `radarcli/`:
//!
//! - `credentials.json` with the Spotify `client_id` and `client_secret`,
//!   overridable through the `SPOTIFY_CLIENT_ID` / `SPOTIFY_CLIENT_SECRET`
//!   environment variables (an optional `.env` in the same directory is
//!   loaded first)
//! - `config.json` with the target `user_id`, an optional
//!   `source_playlist_id` and the `host` used in server mode
//!
//! Values are loaded once at startup and passed into the components that
//! need them; there is no process-wide configuration state.

use std::{env, path::PathBuf};

use serde::Deserialize;

use crate::{Res, error::Error};

/// Base URL of the Spotify Web API.
pub const SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
/// OAuth authorization endpoint.
pub const SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
/// OAuth token exchange endpoint.
pub const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Port the local callback listener binds to.
pub const CALLBACK_PORT: u16 = 6660;
/// Path the one-shot OAuth redirect lands on.
pub const CALLBACK_ENDPOINT: &str = "/callback";
/// Path the server-mode OAuth redirect lands on.
pub const REDIRECT_ENDPOINT: &str = "/redirect";

/// Scopes requested during authorization.
pub const OAUTH_SCOPES: &[&str] = &[
    "ugc-image-upload",
    "user-read-recently-played",
    "user-top-read",
    "user-read-playback-position",
    "user-read-playback-state",
    "user-modify-playback-state",
    "user-read-currently-playing",
    "app-remote-control",
    "streaming",
    "playlist-modify-public",
    "playlist-modify-private",
    "playlist-read-private",
    "playlist-read-collaborative",
    "user-follow-modify",
    "user-follow-read",
    "user-library-modify",
    "user-library-read",
    "user-read-email",
    "user-read-private",
];

/// Spotify application credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Application configuration from `config.json`.
///
/// `user_id` and `source_playlist_id` drive the one-shot `run` command;
/// `host` is the externally reachable base URL for server mode.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    pub user_id: Option<String>,
    pub source_playlist_id: Option<String>,
    pub host: Option<String>,
}

impl AppConfig {
    pub fn require_user_id(&self) -> Res<&str> {
        self.user_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| Error::Config("\"user_id\" missing from config.json".to_string()))
    }

    pub fn require_host(&self) -> Res<&str> {
        self.host
            .as_deref()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| Error::Config("\"host\" missing from config.json".to_string()))
    }
}

/// Returns the data directory all configuration and caches live in.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("radarcli");
    path
}

/// Redirect URI for the one-shot flow, pointing at the local listener.
pub fn local_redirect_uri() -> String {
    format!(
        "http://127.0.0.1:{}{}",
        CALLBACK_PORT, CALLBACK_ENDPOINT
    )
}

/// Redirect URI for server mode, built from the configured host.
pub fn serve_redirect_uri(host: &str) -> String {
    format!("{}:{}{}", host, CALLBACK_PORT, REDIRECT_ENDPOINT)
}

/// Loads environment variables from an optional `.env` file in the data
/// directory.
///
/// Creates the directory if it does not exist yet. A missing `.env` file is
/// not an error; credentials may come from `credentials.json` instead.
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
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

/// Loads the Spotify application credentials.
///
/// Environment variables win over `credentials.json`; both the id and the
/// secret must be non-empty.
pub async fn load_credentials() -> Res<Credentials> {
    let id = env::var("SPOTIFY_CLIENT_ID").ok().filter(|v| !v.is_empty());
    let secret = env::var("SPOTIFY_CLIENT_SECRET")
        .ok()
        .filter(|v| !v.is_empty());
    if let (Some(client_id), Some(client_secret)) = (id, secret) {
        return Ok(Credentials {
            client_id,
            client_secret,
        });
    }

    let path = data_dir().join("credentials.json");
    let content = async_fs::read_to_string(&path).await.map_err(|e| {
        Error::Config(format!("cannot read {}: {}", path.display(), e))
    })?;
    let credentials: Credentials = serde_json::from_str(&content)
        .map_err(|e| Error::Config(format!("cannot parse {}: {}", path.display(), e)))?;

    if credentials.client_id.is_empty() || credentials.client_secret.is_empty() {
        return Err(Error::Config(
            "client_id and client_secret must both be set".to_string(),
        ));
    }
    Ok(credentials)
}

/// Loads `config.json` from the data directory.
pub async fn load_config() -> Res<AppConfig> {
    let path = data_dir().join("config.json");
    let content = async_fs::read_to_string(&path).await.map_err(|e| {
        Error::Config(format!("cannot read {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&content)
        .map_err(|e| Error::Config(format!("cannot parse {}: {}", path.display(), e)))
}
