//! # Catalog Integration Module
//!
//! This module is the read-only bridge between Discography Diary and the
//! Spotify catalog. It answers exactly two questions: "which albums match this
//! search?" and "what are the details of this album?". The collection itself
//! is never touched from here; the results only feed the "add to collection"
//! flow.
//!
//! ## Architecture
//!
//! ```text
//! CLI / Proxy handlers
//!          ↓
//!     Catalog trait
//!     ├── SpotifyCatalog  (Spotify Web API + cached client-credentials token)
//!     └── ProxyCatalog    (a running `discodiary serve` instance)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ## Core Modules
//!
//! ### Authentication Module
//!
//! [`auth`] - Client-credentials token exchange and caching:
//! - **Basic Auth Exchange**: `client_id:client_secret` traded for an app token
//! - **TTL Cache**: the token is reused until five minutes before it expires
//! - **No De-duplication**: concurrent callers holding an expired token may
//!   each fetch a new one; the provider hands out a valid token either way
//!
//! ### Catalog Module
//!
//! [`catalog`] - Direct Spotify Web API access (`/search`, `/albums/{id}`).
//! Raw JSON is available for the proxy to forward unchanged.
//!
//! ### Proxy Module
//!
//! [`proxy`] - The same lookups routed through the HTTP proxy, so the CLI can
//! run on a machine without Spotify credentials.
//!
//! ## Error Handling
//!
//! All lookups return [`CatalogError`]:
//! - **Missing parameters** are rejected before any request is made (400)
//! - **Upstream failures** keep the provider's status code and body text
//! - **Credential failures** and transport problems map to 500
//!
//! There is no retry policy. A failed search is simply submitted again.
//!
//! ## API Coverage
//!
//! - `GET /search?q=&type=&limit=` - Catalog search
//! - `GET /albums/{id}` - Album details
//! - `POST /api/token` - Client-credentials exchange

pub mod auth;
pub mod catalog;
pub mod proxy;

use std::future::Future;

use thiserror::Error;

use crate::{
    config,
    types::{CatalogAlbum, CatalogSearchResult},
};

pub use auth::TokenCache;
pub use catalog::SpotifyCatalog;
pub use proxy::ProxyCatalog;

pub const DEFAULT_SEARCH_TYPE: &str = "album";
pub const DEFAULT_SEARCH_LIMIT: u32 = 20;
pub const MAX_SEARCH_LIMIT: u32 = 50;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{0}")]
    MissingParameter(String),
    #[error("Spotify API error ({status}): {body}")]
    Upstream { status: u16, body: String },
    #[error("Failed to retrieve access token: {0}")]
    Credentials(String),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("cannot decode catalog response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl CatalogError {
    /// HTTP status the proxy answers with for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            CatalogError::MissingParameter(_) => 400,
            CatalogError::Upstream { status, .. } => *status,
            _ => 500,
        }
    }
}

impl From<config::ConfigError> for CatalogError {
    fn from(err: config::ConfigError) -> Self {
        CatalogError::Credentials(err.to_string())
    }
}

/// Read-only access to the music catalog.
pub trait Catalog {
    /// Searches the catalog. An empty item list is a normal result.
    fn search(
        &self,
        query: &str,
        kind: &str,
        limit: u32,
    ) -> impl Future<Output = Result<CatalogSearchResult, CatalogError>> + Send;

    fn get_album(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<CatalogAlbum, CatalogError>> + Send;
}

/// The catalog the CLI talks to: the proxy when `DISCODIARY_API_URL` is set,
/// Spotify itself otherwise.
pub enum CatalogBackend {
    Spotify(SpotifyCatalog),
    Proxy(ProxyCatalog),
}

impl CatalogBackend {
    pub fn from_env() -> Result<Self, CatalogError> {
        match config::proxy_url() {
            Some(url) => Ok(CatalogBackend::Proxy(ProxyCatalog::new(url))),
            None => Ok(CatalogBackend::Spotify(SpotifyCatalog::from_env()?)),
        }
    }
}

impl Catalog for CatalogBackend {
    async fn search(
        &self,
        query: &str,
        kind: &str,
        limit: u32,
    ) -> Result<CatalogSearchResult, CatalogError> {
        match self {
            CatalogBackend::Spotify(catalog) => catalog.search(query, kind, limit).await,
            CatalogBackend::Proxy(catalog) => catalog.search(query, kind, limit).await,
        }
    }

    async fn get_album(&self, id: &str) -> Result<CatalogAlbum, CatalogError> {
        match self {
            CatalogBackend::Spotify(catalog) => catalog.get_album(id).await,
            CatalogBackend::Proxy(catalog) => catalog.get_album(id).await,
        }
    }
}

/// Trims a search query and rejects a blank one.
pub fn validate_query(query: &str) -> Result<&str, CatalogError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(CatalogError::MissingParameter(
            "Please provide a search query (q)".to_string(),
        ));
    }
    Ok(query)
}

pub fn validate_album_id(id: &str) -> Result<&str, CatalogError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(CatalogError::MissingParameter("Missing album ID".to_string()));
    }
    Ok(id)
}

/// Search type, defaulting to `album` when blank.
pub fn normalize_kind(kind: &str) -> &str {
    let kind = kind.trim();
    if kind.is_empty() { DEFAULT_SEARCH_TYPE } else { kind }
}

/// Clamps a result limit into the range Spotify accepts.
pub fn clamp_limit(limit: u32) -> u32 {
    limit.clamp(1, MAX_SEARCH_LIMIT)
}
