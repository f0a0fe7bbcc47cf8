//! Amadeus self-service API client.
//!
//! # Responsibilities
//! - Obtain and cache an OAuth bearer token (client-credentials grant)
//! - Issue one-way flight-offer searches
//! - Surface non-success responses with their raw body

use std::time::Instant;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::config::AmadeusConfig;
use crate::normalize::{self, NormalizeParams};
use crate::observability::metrics;
use crate::providers::token::{unix_now, CachedToken, TokenCache};
use crate::providers::types::{ConfigurationError, ProviderError, ProviderKind, ProviderResult};
use crate::providers::{endpoint, FlightProvider, RawDocument};
use crate::search::{FlightRecord, SearchQuery};

const KIND: ProviderKind = ProviderKind::Amadeus;
const TOKEN_PATH: &str = "v1/security/oauth2/token";
const OFFERS_PATH: &str = "v2/shopping/flight-offers";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

/// Amadeus flight-offers client with its own token cache.
pub struct AmadeusClient {
    http: reqwest::Client,
    token_url: Url,
    offers_url: Url,
    client_id: String,
    client_secret: String,
    tokens: TokenCache,
}

impl AmadeusClient {
    /// Build a client from configuration.
    ///
    /// Fails when either credential is absent or the base URL is unusable.
    pub fn from_config(
        config: &AmadeusConfig,
        http: reqwest::Client,
    ) -> Result<Self, ConfigurationError> {
        let (client_id, client_secret) = match (&config.client_id, &config.client_secret) {
            (Some(id), Some(secret)) => (id.clone(), secret.clone()),
            (id, secret) => {
                return Err(ConfigurationError::missing_amadeus(
                    id.is_some(),
                    secret.is_some(),
                ))
            }
        };

        let invalid = || ConfigurationError::InvalidBaseUrl {
            provider: KIND,
            url: config.base_url.clone(),
        };
        let base = Url::parse(&config.base_url).map_err(|_| invalid())?;
        let token_url = endpoint(&base, TOKEN_PATH).map_err(|_| invalid())?;
        let offers_url = endpoint(&base, OFFERS_PATH).map_err(|_| invalid())?;

        Ok(Self {
            http,
            token_url,
            offers_url,
            client_id,
            client_secret,
            tokens: TokenCache::new(),
        })
    }

    /// A bearer token valid for at least the refresh margin.
    ///
    /// Served from the cache when possible; otherwise a fresh grant is
    /// requested and stored. A rejected grant leaves the cache untouched.
    pub async fn access_token(&self) -> ProviderResult<String> {
        if let Some(token) = self.tokens.current(unix_now()) {
            return Ok(token.access_token.clone());
        }

        let fresh = self.fetch_token().await?;
        let token = self.tokens.store(fresh);
        Ok(token.access_token.clone())
    }

    async fn fetch_token(&self) -> ProviderResult<CachedToken> {
        tracing::debug!(url = %self.token_url, "Requesting Amadeus access token");

        let response = self
            .http
            .post(self.token_url.clone())
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(|source| {
                metrics::record_token_fetch("error");
                ProviderError::Transport { provider: KIND, source }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            metrics::record_token_fetch("rejected");
            tracing::warn!(status = %status, "Amadeus token grant rejected");
            return Err(ProviderError::Authentication {
                provider: KIND,
                status: status.as_u16(),
                body,
            });
        }

        let grant: TokenResponse = response.json().await.map_err(|source| {
            metrics::record_token_fetch("error");
            ProviderError::Transport { provider: KIND, source }
        })?;

        metrics::record_token_fetch("success");
        tracing::info!(expires_in = grant.expires_in, "Amadeus access token refreshed");

        Ok(CachedToken::issued_at(
            grant.access_token,
            unix_now(),
            grant.expires_in,
        ))
    }

    fn search_params(query: &SearchQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("originLocationCode", query.origin.clone()),
            ("destinationLocationCode", query.destination.clone()),
            ("departureDate", query.date.clone()),
            ("adults", "1".to_string()),
            ("max", query.max.to_string()),
            ("currencyCode", query.currency.clone()),
        ];
        if let Some(airlines) = query.include_csv() {
            params.push(("includedAirlineCodes", airlines));
        }
        params
    }
}

#[async_trait]
impl FlightProvider for AmadeusClient {
    fn kind(&self) -> ProviderKind {
        KIND
    }

    async fn search(&self, query: &SearchQuery) -> ProviderResult<RawDocument> {
        let token = self.access_token().await?;

        if let Some(return_date) = &query.return_date {
            tracing::debug!(
                return_date = %return_date,
                "Amadeus searches are one-way; return date not forwarded"
            );
        }

        let start = Instant::now();
        let response = self
            .http
            .get(self.offers_url.clone())
            .bearer_auth(token)
            .query(&Self::search_params(query))
            .send()
            .await
            .map_err(|source| {
                metrics::record_upstream(KIND.as_str(), None, start);
                ProviderError::Transport { provider: KIND, source }
            })?;

        let status = response.status();
        metrics::record_upstream(KIND.as_str(), Some(status.as_u16()), start);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "Amadeus flight-offers request failed");
            return Err(ProviderError::Upstream {
                provider: KIND,
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|source| ProviderError::Transport { provider: KIND, source })
    }

    fn normalize(&self, raw: &RawDocument, params: &NormalizeParams<'_>) -> Vec<FlightRecord> {
        normalize::amadeus::normalize(raw, params)
    }
}

impl std::fmt::Debug for AmadeusClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AmadeusClient")
            .field("token_url", &self.token_url.as_str())
            .field("offers_url", &self.offers_url.as_str())
            .field("client_id", &"<redacted>")
            .finish()
    }
}
