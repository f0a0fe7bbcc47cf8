//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the flight gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (host, port).
    pub listener: ListenerConfig,

    /// Which upstream provider serves flight searches.
    pub provider: ProviderConfig,

    /// Amadeus (structured API) settings.
    pub amadeus: AmadeusConfig,

    /// SerpApi (aggregator API) settings.
    pub serpapi: SerpApiConfig,

    /// Search parameter defaults and limits.
    pub search: SearchConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// TCP port to bind.
    pub port: u16,
}

impl ListenerConfig {
    /// Socket address string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Provider selection.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Provider identifier ("amadeus" or "serpapi").
    ///
    /// Kept as a raw string: an unknown value is reported per request rather
    /// than refusing to start.
    pub name: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: "amadeus".to_string(),
        }
    }
}

/// Amadeus self-service API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AmadeusConfig {
    /// API host, without trailing path.
    pub base_url: String,

    /// OAuth client id.
    pub client_id: Option<String>,

    /// OAuth client secret.
    pub client_secret: Option<String>,
}

impl Default for AmadeusConfig {
    fn default() -> Self {
        Self {
            base_url: "https://test.api.amadeus.com".to_string(),
            client_id: None,
            client_secret: None,
        }
    }
}

/// SerpApi Google Flights configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SerpApiConfig {
    /// API host, without trailing path.
    pub base_url: String,

    /// API key sent as `api_key`.
    pub api_key: Option<String>,

    /// Interface language (`hl`).
    pub hl: String,

    /// Search region (`gl`).
    pub gl: String,
}

impl Default for SerpApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://serpapi.com".to_string(),
            api_key: None,
            hl: "en".to_string(),
            gl: "us".to_string(),
        }
    }
}

/// Defaults applied to incoming search queries.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Currency used when the request does not name one.
    pub default_currency: String,

    /// Result count used when `max` is absent or unparsable.
    pub default_max: usize,

    /// Hard ceiling on returned results.
    pub max_ceiling: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_currency: "USD".to_string(),
            default_max: 20,
            max_ceiling: 50,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
