//! Configuration management for the playlist migrator.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and `.env` files. It provides a centralized way to
//! access Spotify and YouTube API credentials, endpoint URLs, the local
//! callback server address and migration pacing.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use dotenv;
use std::{env, path::PathBuf};

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from a `.env` file located in the platform-specific
/// local data directory under `spymcli/.env`. This allows users to store
/// credentials outside the repository.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/spymcli/.env`
/// - macOS: `~/Library/Application Support/spymcli/.env`
/// - Windows: `%LOCALAPPDATA%/spymcli/.env`
///
/// # Errors
///
/// Returns an error string if the parent directory cannot be created or the
/// `.env` file cannot be read or parsed.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spymcli/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    dotenv::from_path(path).map_err(|e| e.to_string())?;
    Ok(())
}

/// Returns the server address for the local OAuth callback server.
///
/// Both the Spotify and the YouTube authorization flows redirect to this
/// address, so it must match the redirect URIs registered with both services.
///
/// # Panics
///
/// Panics if the `SERVER_ADDRESS` environment variable is not set.
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").expect("SERVER_ADDRESS must be set")
}

/// Returns the Spotify API client ID for authentication.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_CLIENT_ID` environment variable is not set.
pub fn spotify_client_id() -> String {
    env::var("SPOTIFY_API_AUTH_CLIENT_ID").expect("SPOTIFY_API_AUTH_CLIENT_ID must be set")
}

/// Returns the Spotify OAuth redirect URI.
///
/// Must match the redirect URI registered in the Spotify application
/// settings.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_REDIRECT_URI` environment variable is not set.
pub fn spotify_redirect_uri() -> String {
    env::var("SPOTIFY_API_REDIRECT_URI").expect("SPOTIFY_API_REDIRECT_URI must be set")
}

/// Returns the Spotify API scope permissions.
///
/// Reading private and collaborative playlists requires the
/// `playlist-read-private playlist-read-collaborative` scopes.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_SCOPE` environment variable is not set.
pub fn spotify_scope() -> String {
    env::var("SPOTIFY_API_AUTH_SCOPE").expect("SPOTIFY_API_AUTH_SCOPE must be set")
}

/// Returns the Spotify OAuth authorization URL.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_URL` environment variable is not set.
pub fn spotify_apiauth_url() -> String {
    env::var("SPOTIFY_API_AUTH_URL").expect("SPOTIFY_API_AUTH_URL must be set")
}

/// Returns the Spotify Web API base URL.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_URL` environment variable is not set.
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").expect("SPOTIFY_API_URL must be set")
}

/// Returns the Spotify OAuth token exchange URL.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_TOKEN_URL` environment variable is not set.
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL").expect("SPOTIFY_API_TOKEN_URL must be set")
}

/// Returns the YouTube API client ID for authentication.
///
/// # Panics
///
/// Panics if the `YOUTUBE_API_AUTH_CLIENT_ID` environment variable is not set.
pub fn youtube_client_id() -> String {
    env::var("YOUTUBE_API_AUTH_CLIENT_ID").expect("YOUTUBE_API_AUTH_CLIENT_ID must be set")
}

/// Returns the YouTube API client secret for authentication.
///
/// Google's authorization-code flow for installed applications requires the
/// client secret on token exchange and refresh.
///
/// # Panics
///
/// Panics if the `YOUTUBE_API_AUTH_CLIENT_SECRET` environment variable is not
/// set.
pub fn youtube_client_secret() -> String {
    env::var("YOUTUBE_API_AUTH_CLIENT_SECRET").expect("YOUTUBE_API_AUTH_CLIENT_SECRET must be set")
}

/// Returns the YouTube OAuth redirect URI.
///
/// # Panics
///
/// Panics if the `YOUTUBE_API_REDIRECT_URI` environment variable is not set.
pub fn youtube_redirect_uri() -> String {
    env::var("YOUTUBE_API_REDIRECT_URI").expect("YOUTUBE_API_REDIRECT_URI must be set")
}

/// Returns the YouTube API scope permissions.
///
/// Creating playlists and adding items requires the
/// `https://www.googleapis.com/auth/youtube` scope.
///
/// # Panics
///
/// Panics if the `YOUTUBE_API_AUTH_SCOPE` environment variable is not set.
pub fn youtube_scope() -> String {
    env::var("YOUTUBE_API_AUTH_SCOPE").expect("YOUTUBE_API_AUTH_SCOPE must be set")
}

/// Returns the Google OAuth authorization URL.
///
/// # Panics
///
/// Panics if the `YOUTUBE_API_AUTH_URL` environment variable is not set.
pub fn youtube_apiauth_url() -> String {
    env::var("YOUTUBE_API_AUTH_URL").expect("YOUTUBE_API_AUTH_URL must be set")
}

/// Returns the YouTube Data API base URL.
///
/// # Panics
///
/// Panics if the `YOUTUBE_API_URL` environment variable is not set.
pub fn youtube_apiurl() -> String {
    env::var("YOUTUBE_API_URL").expect("YOUTUBE_API_URL must be set")
}

/// Returns the Google OAuth token exchange URL.
///
/// # Panics
///
/// Panics if the `YOUTUBE_API_TOKEN_URL` environment variable is not set.
pub fn youtube_apitoken_url() -> String {
    env::var("YOUTUBE_API_TOKEN_URL").expect("YOUTUBE_API_TOKEN_URL must be set")
}

/// Returns the minimum delay between destination API calls in milliseconds.
///
/// Defaults to 1000 ms when `REQUEST_DELAY_MS` is unset or unparseable. The
/// destination quota is the scarce resource during a migration, so searches
/// and playlist mutations are paced by this interval.
pub fn request_delay_ms() -> u64 {
    env::var("REQUEST_DELAY_MS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(1000)
}
