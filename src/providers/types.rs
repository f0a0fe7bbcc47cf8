//! Provider identifiers and error definitions.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::config::loader::{
    ENV_AMADEUS_CLIENT_ID, ENV_AMADEUS_CLIENT_SECRET, ENV_PROVIDER, ENV_SERPAPI_KEY,
};

/// The upstream flight-search APIs this gateway can front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// Amadeus self-service flight offers (structured, OAuth protected).
    Amadeus,
    /// SerpApi Google Flights engine (aggregator, API key).
    SerpApi,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 2] = [ProviderKind::Amadeus, ProviderKind::SerpApi];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Amadeus => "amadeus",
            ProviderKind::SerpApi => "serpapi",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "amadeus" => Ok(ProviderKind::Amadeus),
            "serpapi" => Ok(ProviderKind::SerpApi),
            _ => Err(ConfigurationError::UnknownProvider(s.to_string())),
        }
    }
}

/// The selected provider cannot serve requests as configured.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// Credentials for the active provider are absent.
    #[error("Missing credentials for provider '{provider}'")]
    MissingCredentials {
        provider: ProviderKind,
        variables: Vec<&'static str>,
    },

    /// The provider identifier is not recognised.
    #[error("Unknown flight provider '{0}'")]
    UnknownProvider(String),

    /// The provider's base URL cannot be used to build endpoints.
    ///
    /// Loaded configuration is validated before this point; a config built
    /// in code and handed to `select` is not.
    #[error("Invalid base URL for provider '{provider}': '{url}'")]
    InvalidBaseUrl { provider: ProviderKind, url: String },
}

impl ConfigurationError {
    /// Remediation hint returned to clients as the `detail` field.
    pub fn detail(&self) -> String {
        match self {
            ConfigurationError::MissingCredentials { variables, .. } => {
                format!("Set {} in the environment", variables.join(" and "))
            }
            ConfigurationError::UnknownProvider(value) => {
                let known: Vec<&str> = ProviderKind::ALL.iter().map(|k| k.as_str()).collect();
                format!(
                    "{}='{}' is not one of: {}",
                    ENV_PROVIDER,
                    value,
                    known.join(", ")
                )
            }
            ConfigurationError::InvalidBaseUrl { url, .. } => {
                format!("'{}' cannot be used as a base URL", url)
            }
        }
    }

    pub(crate) fn missing_amadeus(client_id: bool, client_secret: bool) -> Self {
        let mut variables = Vec::new();
        if !client_id {
            variables.push(ENV_AMADEUS_CLIENT_ID);
        }
        if !client_secret {
            variables.push(ENV_AMADEUS_CLIENT_SECRET);
        }
        ConfigurationError::MissingCredentials {
            provider: ProviderKind::Amadeus,
            variables,
        }
    }

    pub(crate) fn missing_serpapi() -> Self {
        ConfigurationError::MissingCredentials {
            provider: ProviderKind::SerpApi,
            variables: vec![ENV_SERPAPI_KEY],
        }
    }
}

/// Errors raised while talking to an upstream provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The token grant was rejected.
    #[error("{provider} authentication failed with status {status}")]
    Authentication {
        provider: ProviderKind,
        status: u16,
        body: String,
    },

    /// The search call returned a non-success status.
    #[error("{provider} returned status {status}")]
    Upstream {
        provider: ProviderKind,
        status: u16,
        body: String,
    },

    /// Connection, I/O, or body decoding failure.
    #[error("{provider} request failed: {source}")]
    Transport {
        provider: ProviderKind,
        #[source]
        source: reqwest::Error,
    },
}

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;
