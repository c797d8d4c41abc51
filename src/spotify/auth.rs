use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::Utc;
use reqwest::{Client, header::AUTHORIZATION};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{
    config,
    spotify::CatalogError,
    types::{ClientToken, TokenResponse},
    warning,
};

/// Seconds subtracted from the declared token lifetime before it is
/// considered expired.
pub const EXPIRY_MARGIN_SECS: u64 = 300;

/// Client-credentials token with a single-entry TTL cache.
///
/// The cache lock is only held to read or store the token, never across the
/// credential exchange itself. Two callers that both find an expired token
/// will both request a new one.
pub struct TokenCache {
    client: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    cached: Mutex<Option<ClientToken>>,
}

impl TokenCache {
    pub fn new(
        client: Client,
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            client,
            token_url: token_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            cached: Mutex::new(None),
        }
    }

    /// Builds the cache from `SPOTIFY_CLIENT_ID`, `SPOTIFY_CLIENT_SECRET` and
    /// `SPOTIFY_API_TOKEN_URL`.
    pub fn from_env(client: Client) -> Result<Self, CatalogError> {
        Ok(Self::new(
            client,
            config::spotify_apitoken_url(),
            config::spotify_client_id()?,
            config::spotify_client_secret()?,
        ))
    }

    /// Returns a valid access token, exchanging credentials on a cache miss
    /// or after expiry.
    pub async fn access_token(&self) -> Result<String, CatalogError> {
        {
            let cached = self.cached.lock().await;
            if let Some(token) = cached.as_ref()
                && !is_expired(token, Utc::now().timestamp())
            {
                return Ok(token.access_token.clone());
            }
        }

        let token = self.request_token().await?;
        let access_token = token.access_token.clone();
        *self.cached.lock().await = Some(token);
        Ok(access_token)
    }

    /// Seeds the cache, e.g. with a token obtained elsewhere.
    pub async fn store(&self, token: ClientToken) {
        *self.cached.lock().await = Some(token);
    }

    pub async fn cached(&self) -> Option<ClientToken> {
        self.cached.lock().await.clone()
    }

    async fn request_token(&self) -> Result<ClientToken, CatalogError> {
        let credentials = STANDARD.encode(format!("{}:{}", self.client_id, self.client_secret));

        let response = self
            .client
            .post(&self.token_url)
            .header(AUTHORIZATION, format!("Basic {}", credentials))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| CatalogError::Credentials(e.to_string()))?;

        if !response.status().is_success() {
            let body: Value = response.json().await.unwrap_or_default();
            let message = body["error_description"]
                .as_str()
                .unwrap_or("Failed to retrieve access token")
                .to_string();
            warning!("Failed to get access token: {}", message);
            return Err(CatalogError::Credentials(message));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| CatalogError::Credentials(e.to_string()))?;

        Ok(ClientToken {
            access_token: body.access_token,
            expires_in: body.expires_in,
            obtained_at: Utc::now().timestamp(),
        })
    }
}

/// Whether `token` must be replaced at unix time `now`.
///
/// A token is usable until [`EXPIRY_MARGIN_SECS`] before its declared expiry.
pub fn is_expired(token: &ClientToken, now: i64) -> bool {
    let lifetime = token.expires_in.saturating_sub(EXPIRY_MARGIN_SECS) as i64;
    now >= token.obtained_at + lifetime
}
