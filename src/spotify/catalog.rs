use std::sync::Arc;

use reqwest::Client;
use serde_json::Value;

use crate::{
    config,
    spotify::{self, Catalog, CatalogError, TokenCache},
    types::{CatalogAlbum, CatalogSearchResult},
    warning,
};

/// Spotify Web API client for catalog lookups.
///
/// Cloning is cheap and clones share the token cache.
#[derive(Clone)]
pub struct SpotifyCatalog {
    client: Client,
    api_url: String,
    tokens: Arc<TokenCache>,
}

impl SpotifyCatalog {
    pub fn new(client: Client, api_url: impl Into<String>, tokens: TokenCache) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            tokens: Arc::new(tokens),
        }
    }

    pub fn from_env() -> Result<Self, CatalogError> {
        let client = Client::new();
        let tokens = TokenCache::from_env(client.clone())?;
        Ok(Self::new(client, config::spotify_apiurl(), tokens))
    }

    pub async fn access_token(&self) -> Result<String, CatalogError> {
        self.tokens.access_token().await
    }

    /// Searches the catalog and returns the provider's JSON untouched.
    pub async fn search_json(
        &self,
        query: &str,
        kind: &str,
        limit: u32,
    ) -> Result<Value, CatalogError> {
        let query = spotify::validate_query(query)?;
        let url = format!("{uri}/search", uri = self.api_url);
        let params = [
            ("q", query.to_string()),
            ("type", spotify::normalize_kind(kind).to_string()),
            ("limit", spotify::clamp_limit(limit).to_string()),
        ];

        self.get_json(&url, &params).await
    }

    /// Fetches one album and returns the provider's JSON untouched.
    pub async fn album_json(&self, id: &str) -> Result<Value, CatalogError> {
        let id = spotify::validate_album_id(id)?;
        let url = format!("{uri}/albums/{id}", uri = self.api_url, id = id);
        self.get_json(&url, &[]).await
    }

    async fn get_json(&self, url: &str, params: &[(&str, String)]) -> Result<Value, CatalogError> {
        let token = self.tokens.access_token().await?;
        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warning!("Spotify API error ({}): {}", status.as_u16(), body);
            return Err(CatalogError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<Value>().await?)
    }
}

impl Catalog for SpotifyCatalog {
    async fn search(
        &self,
        query: &str,
        kind: &str,
        limit: u32,
    ) -> Result<CatalogSearchResult, CatalogError> {
        let json = self.search_json(query, kind, limit).await?;
        Ok(serde_json::from_value(json)?)
    }

    async fn get_album(&self, id: &str) -> Result<CatalogAlbum, CatalogError> {
        let json = self.album_json(id).await?;
        Ok(serde_json::from_value(json)?)
    }
}
