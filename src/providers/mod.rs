//! Upstream flight-search providers.
//!
//! # Data Flow
//! ```text
//! GatewayConfig.provider.name
//!     → select() at startup
//!     → Arc<dyn FlightProvider> (AmadeusClient | SerpApiClient)
//!        or the ConfigurationError every search will report
//!
//! per request:
//!     SearchQuery → search() → RawDocument → normalize() → Vec<FlightRecord>
//! ```
//!
//! # Design Decisions
//! - One provider per process, chosen once; no fan-out or merging
//! - No retries and no caller-imposed timeout on upstream calls
//! - Each client owns its HTTP handle; the Amadeus client also owns its
//!   token cache

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use crate::config::GatewayConfig;
use crate::normalize::NormalizeParams;
use crate::search::{FlightRecord, SearchQuery};

pub mod amadeus;
pub mod serpapi;
pub mod token;
pub mod types;

pub use amadeus::AmadeusClient;
pub use serpapi::SerpApiClient;
pub use token::{CachedToken, TokenCache};
pub use types::{ConfigurationError, ProviderError, ProviderKind, ProviderResult};

/// Provider response body, exactly as received.
pub type RawDocument = Value;

/// A flight-search backend and the mapping for its response shape.
#[async_trait]
pub trait FlightProvider: Send + Sync + std::fmt::Debug {
    /// Which provider this is.
    fn kind(&self) -> ProviderKind;

    /// Run a search upstream and return the raw document.
    ///
    /// # Errors
    /// - `ProviderError::Authentication` - token grant rejected
    /// - `ProviderError::Upstream` - non-success search response
    /// - `ProviderError::Transport` - connection or decoding failure
    async fn search(&self, query: &SearchQuery) -> ProviderResult<RawDocument>;

    /// Flatten a raw document into records. Never fails.
    fn normalize(&self, raw: &RawDocument, params: &NormalizeParams<'_>) -> Vec<FlightRecord>;
}

/// Build the provider named in configuration.
pub fn select(
    config: &GatewayConfig,
    http: reqwest::Client,
) -> Result<Arc<dyn FlightProvider>, ConfigurationError> {
    let kind: ProviderKind = config.provider.name.parse()?;

    let provider: Arc<dyn FlightProvider> = match kind {
        ProviderKind::Amadeus => Arc::new(AmadeusClient::from_config(&config.amadeus, http)?),
        ProviderKind::SerpApi => Arc::new(SerpApiClient::from_config(&config.serpapi, http)?),
    };
    Ok(provider)
}

/// Resolve `path` under `base`, keeping any path prefix `base` carries.
pub(crate) fn endpoint(base: &Url, path: &str) -> Result<Url, url::ParseError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }
    base.join(path.trim_start_matches('/'))
}
