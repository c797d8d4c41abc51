use reqwest::Client;
use serde_json::Value;

use crate::{
    spotify::{self, Catalog, CatalogError},
    types::{CatalogAlbum, CatalogSearchResult},
};

/// Catalog lookups through a running `discodiary serve` proxy.
#[derive(Clone)]
pub struct ProxyCatalog {
    client: Client,
    base_url: String,
}

impl ProxyCatalog {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Asks the proxy for its current access token.
    pub async fn access_token(&self) -> Result<String, CatalogError> {
        let url = format!("{}/api/getAccessToken", self.base_url);
        let json = self.get_json(&url, &[]).await?;
        json["accessToken"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| CatalogError::Credentials("proxy returned no access token".to_string()))
    }

    async fn get_json(&self, url: &str, params: &[(&str, String)]) -> Result<Value, CatalogError> {
        let response = self.client.get(url).query(params).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or_default();
            return Err(CatalogError::Upstream {
                status: status.as_u16(),
                body: error_message(&body),
            });
        }

        Ok(response.json::<Value>().await?)
    }
}

impl Catalog for ProxyCatalog {
    async fn search(
        &self,
        query: &str,
        kind: &str,
        limit: u32,
    ) -> Result<CatalogSearchResult, CatalogError> {
        let query = spotify::validate_query(query)?;
        let url = format!("{}/api/search", self.base_url);
        let params = [
            ("q", query.to_string()),
            ("type", spotify::normalize_kind(kind).to_string()),
            ("limit", spotify::clamp_limit(limit).to_string()),
        ];

        let json = self.get_json(&url, &params).await?;
        Ok(serde_json::from_value(json)?)
    }

    async fn get_album(&self, id: &str) -> Result<CatalogAlbum, CatalogError> {
        let id = spotify::validate_album_id(id)?;
        let url = format!("{}/api/album/{}", self.base_url, id);
        let json = self.get_json(&url, &[]).await?;
        Ok(serde_json::from_value(json)?)
    }
}

/// Human-readable message of a proxy error body: `error`, then `message`,
/// then a generic fallback.
pub fn error_message(body: &Value) -> String {
    body["error"]
        .as_str()
        .or_else(|| body["message"].as_str())
        .unwrap_or("Request failed")
        .to_string()
}
