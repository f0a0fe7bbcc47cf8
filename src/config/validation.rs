//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (limits > 0, port valid)
//! - Check provider URLs are absolute http(s) URLs
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Missing credentials are NOT a validation failure; they surface per
//!   request as configuration errors so the health endpoint stays reachable

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;
use crate::search::MAX_RESULTS;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is not a valid URL: '{value}'")]
    InvalidUrl { field: &'static str, value: String },

    #[error("search.default_currency must be a 3-letter code, got '{0}'")]
    InvalidCurrency(String),

    #[error(
        "search.default_max ({default_max}) must be between 1 and search.max_ceiling ({ceiling})"
    )]
    InvalidMax { default_max: usize, ceiling: usize },

    #[error("search.max_ceiling ({0}) must not exceed {max}", max = MAX_RESULTS)]
    CeilingTooHigh(usize),

    #[error("listener.port must be non-zero")]
    ZeroPort,

    #[error("observability.metrics_address is not a socket address: '{0}'")]
    InvalidMetricsAddress(String),
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (field, value) in [
        ("amadeus.base_url", &config.amadeus.base_url),
        ("serpapi.base_url", &config.serpapi.base_url),
    ] {
        if !is_http_url(value) {
            errors.push(ValidationError::InvalidUrl {
                field,
                value: value.clone(),
            });
        }
    }

    let currency = &config.search.default_currency;
    if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
        errors.push(ValidationError::InvalidCurrency(currency.clone()));
    }

    let search = &config.search;
    if search.default_max == 0 || search.default_max > search.max_ceiling {
        errors.push(ValidationError::InvalidMax {
            default_max: search.default_max,
            ceiling: search.max_ceiling,
        });
    }
    if search.max_ceiling > MAX_RESULTS {
        errors.push(ValidationError::CeilingTooHigh(search.max_ceiling));
    }

    if config.listener.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }

    let obs = &config.observability;
    if obs.metrics_enabled && obs.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidMetricsAddress(
            obs.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_http_url(value: &str) -> bool {
    Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false)
}
