//! Error responses.
//!
//! # Responsibilities
//! - Map every failure to a status code and a JSON body
//! - Mirror upstream status codes and bodies for provider failures
//!
//! # Status Mapping
//! - malformed query string → 400 `{ error }`
//! - validation → 400 `{ error }`
//! - configuration → 500 `{ error, detail }`
//! - token grant rejected → 500 `{ error, detail }`
//! - upstream non-success → upstream status `{ error, detail }`
//! - anything else → 500 `{ error, detail }`

use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::providers::{ConfigurationError, ProviderError};
use crate::search::ValidationError;

/// Every way a flight search can fail.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The query string could not be decoded at all.
    #[error("{0}")]
    MalformedQuery(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl ApiError {
    /// Status code this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedQuery(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Provider(ProviderError::Upstream { status, .. }) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ApiError::Provider(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> Value {
        match self {
            ApiError::MalformedQuery(_) | ApiError::Validation(_) => {
                json!({ "error": self.to_string() })
            }
            ApiError::Configuration(e) => json!({
                "error": e.to_string(),
                "detail": e.detail(),
            }),
            ApiError::Provider(ProviderError::Upstream { provider, body, .. }) => json!({
                "error": format!("{} request failed", provider),
                "detail": upstream_detail(body),
            }),
            ApiError::Provider(ProviderError::Authentication {
                provider,
                status,
                body,
            }) => json!({
                "error": format!("{} authentication failed", provider),
                "detail": {
                    "status": status,
                    "body": upstream_detail(body),
                },
            }),
            ApiError::Provider(e @ ProviderError::Transport { .. }) => json!({
                "error": "Unexpected error",
                "detail": e.to_string(),
            }),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::MalformedQuery(_) | ApiError::Validation(_) => {
                tracing::debug!(error = %self, "Rejected search request")
            }
            ApiError::Provider(ProviderError::Upstream { .. }) => {
                tracing::warn!(status = %status, error = %self, "Forwarding upstream failure")
            }
            _ => tracing::error!(error = %self, "Flight search failed"),
        }

        (status, Json(self.body())).into_response()
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::MalformedQuery(rejection.body_text())
    }
}

/// Upstream bodies are passed through verbatim: parsed when they are JSON,
/// as a string otherwise.
fn upstream_detail(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ProviderKind;

    #[test]
    fn test_status_mapping() {
        let validation = ApiError::from(ValidationError {
            missing: vec!["origin"],
        });
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);

        let config = ApiError::from(ConfigurationError::missing_serpapi());
        assert_eq!(config.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let upstream = ApiError::from(ProviderError::Upstream {
            provider: ProviderKind::SerpApi,
            status: 429,
            body: String::new(),
        });
        assert_eq!(upstream.status(), StatusCode::TOO_MANY_REQUESTS);

        let auth = ApiError::from(ProviderError::Authentication {
            provider: ProviderKind::Amadeus,
            status: 401,
            body: String::new(),
        });
        assert_eq!(auth.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_upstream_body_passthrough() {
        let err = ApiError::from(ProviderError::Upstream {
            provider: ProviderKind::Amadeus,
            status: 400,
            body: r#"{"errors":[{"code":477,"title":"INVALID FORMAT"}]}"#.into(),
        });
        let body = err.body();
        assert_eq!(body["error"], "amadeus request failed");
        assert_eq!(body["detail"]["errors"][0]["code"], 477);

        let err = ApiError::from(ProviderError::Upstream {
            provider: ProviderKind::SerpApi,
            status: 503,
            body: "down for maintenance".into(),
        });
        assert_eq!(err.body()["detail"], "down for maintenance");
    }

    #[test]
    fn test_malformed_query_is_json_bad_request() {
        let err = ApiError::MalformedQuery(
            "Failed to deserialize query string: duplicate field `origin`".into(),
        );
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        let body = err.body();
        assert_eq!(
            body["error"],
            "Failed to deserialize query string: duplicate field `origin`"
        );
        assert!(body.get("detail").is_none());
    }

    #[test]
    fn test_validation_body_has_no_detail() {
        let err = ApiError::from(ValidationError {
            missing: vec!["date"],
        });
        let body = err.body();
        assert_eq!(body["error"], "Missing required query parameters: date");
        assert!(body.get("detail").is_none());
    }
}
