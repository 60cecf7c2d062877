//! Configuration management for Weekly Discoveries.
//!
//! Values come from environment variables, optionally seeded from a `.env` file
//! in the local data directory. Variables already present in the process
//! environment take precedence over the file.
//!
//! Everything except the client ID has a default matching the public Spotify
//! endpoints, so a minimal `.env` only needs `SPOTIFY_API_AUTH_CLIENT_ID`.

use std::{env, path::PathBuf};

use crate::discovery::DiscoveryOptions;

/// Directory name under the platform data directory.
pub const APP_DIR: &str = "weekly-discoveries";

/// Loads environment variables from `<data_local_dir>/weekly-discoveries/.env`.
///
/// Creates the directory if needed. A missing `.env` file is fine; the
/// defaults and the process environment are used instead.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/weekly-discoveries/.env`
/// - macOS: `~/Library/Application Support/weekly-discoveries/.env`
/// - Windows: `%LOCALAPPDATA%/weekly-discoveries/.env`
///
/// # Errors
///
/// Returns an error if the directory cannot be created or if an existing
/// `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = data_path(".env");
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

/// Resolves `relative` inside the application's local data directory.
pub fn data_path(relative: &str) -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path.push(relative);
    path
}

/// Address the local HTTP server binds to, e.g. `127.0.0.1:5000`.
pub fn server_addr() -> String {
    env_or_string("SERVER_ADDRESS", "127.0.0.1:5000")
}

/// Spotify application client ID.
///
/// # Panics
///
/// Panics if `SPOTIFY_API_AUTH_CLIENT_ID` is not set.
pub fn spotify_client_id() -> String {
    env::var("SPOTIFY_API_AUTH_CLIENT_ID").expect("SPOTIFY_API_AUTH_CLIENT_ID must be set")
}

/// Spotify application client secret, if the app uses one.
///
/// The secret should never be logged.
pub fn spotify_client_secret() -> Option<String> {
    env::var("SPOTIFY_API_AUTH_CLIENT_SECRET")
        .ok()
        .filter(|s| !s.trim().is_empty())
}

/// OAuth redirect URI. Must match the one registered with Spotify.
pub fn spotify_redirect_uri() -> String {
    env_or_string(
        "SPOTIFY_API_REDIRECT_URI",
        "http://127.0.0.1:5000/callback",
    )
}

/// Scopes requested during authorization.
pub fn spotify_scope() -> String {
    env_or_string(
        "SPOTIFY_API_AUTH_SCOPE",
        "user-follow-read playlist-modify-public playlist-modify-private user-read-private",
    )
}

/// Spotify OAuth authorization URL.
pub fn spotify_apiauth_url() -> String {
    env_or_string(
        "SPOTIFY_API_AUTH_URL",
        "https://accounts.spotify.com/authorize",
    )
}

/// Spotify Web API base URL.
pub fn spotify_apiurl() -> String {
    env_or_string("SPOTIFY_API_URL", "https://api.spotify.com/v1")
}

/// Spotify OAuth token exchange URL.
pub fn spotify_apitoken_url() -> String {
    env_or_string(
        "SPOTIFY_API_TOKEN_URL",
        "https://accounts.spotify.com/api/token",
    )
}

/// Longest accepted lookback window in days.
pub const MAX_LOOKBACK_DAYS: i64 = 3650;

/// Discovery tuning knobs, falling back to [`DiscoveryOptions::default`] for
/// anything unset or unparseable.
pub fn discovery_options() -> DiscoveryOptions {
    discovery_options_from(|key| env::var(key).ok())
}

/// Builds [`DiscoveryOptions`] from `lookup`, which maps a `DISCOVERY_*` key to
/// its raw value.
///
/// A lookback outside `1..=MAX_LOOKBACK_DAYS` falls back to the default.
pub fn discovery_options_from<F>(lookup: F) -> DiscoveryOptions
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = DiscoveryOptions::default();
    let parsed = |key: &str| lookup(key).and_then(|v| v.trim().parse::<usize>().ok());

    let lookback_days = lookup("DISCOVERY_LOOKBACK_DAYS")
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|days| (1..=MAX_LOOKBACK_DAYS).contains(days))
        .unwrap_or(defaults.lookback_days);

    DiscoveryOptions {
        per_seed_cap: parsed("DISCOVERY_PER_SEED_CAP").unwrap_or(defaults.per_seed_cap),
        total_cap: parsed("DISCOVERY_ARTIST_CAP").unwrap_or(defaults.total_cap),
        lookback_days,
        market: lookup("DISCOVERY_MARKET")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.market),
        album_limit: lookup("DISCOVERY_ALBUM_LIMIT")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.album_limit),
        concurrency: parsed("DISCOVERY_CONCURRENCY")
            .unwrap_or(defaults.concurrency)
            .max(1),
    }
}

fn env_or_string(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
