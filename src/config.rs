//! Configuration management for Discography Diary.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage application
//! configuration including Spotify API credentials, server settings, and the
//! location of the collection file.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf};

use thiserror::Error;

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:3001";
pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_API_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

const APP_DIR: &str = "discodiary";
const COLLECTION_FILE: &str = "my-albums.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("cannot prepare config directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot read .env file: {0}")]
    Dotenv(#[from] dotenv::Error),
}

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the application directory if it doesn't exist and loads variables
/// from `discodiary/.env` under the platform-specific local data directory:
/// - Linux: `~/.local/share/discodiary/.env`
/// - macOS: `~/Library/Application Support/discodiary/.env`
/// - Windows: `%LOCALAPPDATA%/discodiary/.env`
///
/// A missing `.env` file is not an error; all values may come from the
/// process environment instead. Variables already present in the environment
/// are never overridden.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or an existing `.env`
/// file cannot be parsed.
pub async fn load_env() -> Result<(), ConfigError> {
    let path = app_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if async_fs::metadata(&path).await.is_err() {
        return Ok(());
    }

    dotenv::from_path(&path)?;
    Ok(())
}

/// Returns the bind address of the catalog proxy server.
///
/// Reads `SERVER_ADDRESS`, falling back to `127.0.0.1:3001`.
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").unwrap_or_else(|_| DEFAULT_SERVER_ADDRESS.to_string())
}

/// Returns the Spotify API client ID used for the client-credentials exchange.
///
/// # Errors
///
/// Fails when `SPOTIFY_CLIENT_ID` is not set.
pub fn spotify_client_id() -> Result<String, ConfigError> {
    env::var("SPOTIFY_CLIENT_ID").map_err(|_| ConfigError::Missing("SPOTIFY_CLIENT_ID"))
}

/// Returns the Spotify API client secret.
///
/// The client secret should be kept confidential and never exposed in logs
/// or version control.
///
/// # Errors
///
/// Fails when `SPOTIFY_CLIENT_SECRET` is not set.
pub fn spotify_client_secret() -> Result<String, ConfigError> {
    env::var("SPOTIFY_CLIENT_SECRET").map_err(|_| ConfigError::Missing("SPOTIFY_CLIENT_SECRET"))
}

/// Returns the Spotify Web API base URL (`SPOTIFY_API_URL`).
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| DEFAULT_SPOTIFY_API_URL.to_string())
}

/// Returns the Spotify token endpoint (`SPOTIFY_API_TOKEN_URL`).
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL").unwrap_or_else(|_| DEFAULT_SPOTIFY_API_TOKEN_URL.to_string())
}

/// Returns the base URL of a running catalog proxy, if one is configured.
///
/// When `DISCODIARY_API_URL` is set (for example `http://127.0.0.1:3001`),
/// the CLI sends catalog lookups through that proxy instead of talking to
/// Spotify directly.
pub fn proxy_url() -> Option<String> {
    env::var("DISCODIARY_API_URL")
        .ok()
        .map(|url| url.trim_end_matches('/').to_string())
        .filter(|url| !url.is_empty())
}

/// Returns the path of the collection file.
///
/// `DISCODIARY_COLLECTION_PATH` overrides the default
/// `<local data dir>/discodiary/my-albums.json`.
///
/// # Returns
///
/// The configured path, or the default one. When no local data directory
/// can be determined the default falls back to the working directory.
///
/// # Example
///
/// ```no_run
/// let store = discodiary::management::FileStorage::new(discodiary::config::collection_path());
/// println!("collection at {}", store.path().display());
/// ```
pub fn collection_path() -> PathBuf {
    match env::var_os("DISCODIARY_COLLECTION_PATH") {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => app_dir().join(COLLECTION_FILE),
    }
}

fn app_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}
