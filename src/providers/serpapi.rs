//! SerpApi Google Flights client.

use std::time::Instant;

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use crate::config::SerpApiConfig;
use crate::normalize::{self, NormalizeParams};
use crate::observability::metrics;
use crate::providers::types::{ConfigurationError, ProviderError, ProviderKind, ProviderResult};
use crate::providers::{endpoint, FlightProvider, RawDocument};
use crate::search::{FlightRecord, SearchQuery};

const KIND: ProviderKind = ProviderKind::SerpApi;
const SEARCH_PATH: &str = "search.json";
const ENGINE: &str = "google_flights";

/// Google Flights trip type as SerpApi encodes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripType {
    RoundTrip,
    OneWay,
}

impl TripType {
    /// Round trip exactly when a return date was supplied.
    pub fn for_query(query: &SearchQuery) -> Self {
        if query.return_date.is_some() {
            TripType::RoundTrip
        } else {
            TripType::OneWay
        }
    }

    fn code(self) -> &'static str {
        match self {
            TripType::RoundTrip => "1",
            TripType::OneWay => "2",
        }
    }
}

/// SerpApi client authenticated by API key.
pub struct SerpApiClient {
    http: reqwest::Client,
    search_url: Url,
    api_key: String,
    hl: String,
    gl: String,
}

impl SerpApiClient {
    /// Build a client from configuration.
    pub fn from_config(
        config: &SerpApiConfig,
        http: reqwest::Client,
    ) -> Result<Self, ConfigurationError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(ConfigurationError::missing_serpapi)?;

        let search_url = Url::parse(&config.base_url)
            .and_then(|base| endpoint(&base, SEARCH_PATH))
            .map_err(|_| ConfigurationError::InvalidBaseUrl {
                provider: KIND,
                url: config.base_url.clone(),
            })?;

        Ok(Self {
            http,
            search_url,
            api_key,
            hl: config.hl.clone(),
            gl: config.gl.clone(),
        })
    }

    /// Query parameters, excluding the API key.
    fn search_params(&self, query: &SearchQuery) -> Vec<(&'static str, String)> {
        let trip = TripType::for_query(query);
        let mut params = vec![
            ("engine", ENGINE.to_string()),
            ("departure_id", query.origin.clone()),
            ("arrival_id", query.destination.clone()),
            ("outbound_date", query.date.clone()),
            ("type", trip.code().to_string()),
            ("currency", query.currency.clone()),
            ("hl", self.hl.clone()),
            ("gl", self.gl.clone()),
        ];
        if let Some(return_date) = &query.return_date {
            params.push(("return_date", return_date.clone()));
        }
        params
    }
}

#[async_trait]
impl FlightProvider for SerpApiClient {
    fn kind(&self) -> ProviderKind {
        KIND
    }

    async fn search(&self, query: &SearchQuery) -> ProviderResult<RawDocument> {
        let params = self.search_params(query);
        tracing::debug!(
            trip = ?TripType::for_query(query),
            origin = %query.origin,
            destination = %query.destination,
            "Querying SerpApi"
        );

        let start = Instant::now();
        let response = self
            .http
            .get(self.search_url.clone())
            .query(&params)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|source| {
                metrics::record_upstream(KIND.as_str(), None, start);
                ProviderError::Transport { provider: KIND, source }
            })?;

        let status = response.status();
        metrics::record_upstream(KIND.as_str(), Some(status.as_u16()), start);

        if !status.is_success() {
            // Best effort: an unreadable body must not hide the status.
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "SerpApi request failed");
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
        normalize::serpapi::normalize(raw, params)
    }
}

impl std::fmt::Debug for SerpApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerpApiClient")
            .field("search_url", &self.search_url.as_str())
            .field("hl", &self.hl)
            .field("gl", &self.gl)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchConfig;
    use crate::search::FlightSearchParams;

    fn client() -> SerpApiClient {
        let config = SerpApiConfig {
            api_key: Some("key".into()),
            ..Default::default()
        };
        SerpApiClient::from_config(&config, reqwest::Client::new()).unwrap()
    }

    fn query(return_date: Option<&str>) -> SearchQuery {
        SearchQuery::from_params(
            FlightSearchParams {
                origin: Some("JFK".into()),
                destination: Some("LAX".into()),
                date: Some("2025-06-01".into()),
                return_date: return_date.map(str::to_string),
                ..Default::default()
            },
            &SearchConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_missing_key() {
        let err = SerpApiClient::from_config(&SerpApiConfig::default(), reqwest::Client::new())
            .unwrap_err();
        assert_eq!(err, ConfigurationError::missing_serpapi());
    }

    #[test]
    fn test_search_url() {
        assert_eq!(client().search_url.as_str(), "https://serpapi.com/search.json");
    }

    #[test]
    fn test_one_way_params() {
        let params = client().search_params(&query(None));
        assert!(params.contains(&("type", "2".to_string())));
        assert!(params.contains(&("engine", "google_flights".to_string())));
        assert!(!params.iter().any(|(k, _)| *k == "return_date"));
        assert!(!params.iter().any(|(k, _)| *k == "api_key"));
    }

    #[test]
    fn test_round_trip_params() {
        let params = client().search_params(&query(Some("2025-06-08")));
        assert!(params.contains(&("type", "1".to_string())));
        assert!(params.contains(&("return_date", "2025-06-08".to_string())));
    }

    #[test]
    fn test_debug_hides_key() {
        assert!(!format!("{:?}", client()).contains("key\""));
    }
}
