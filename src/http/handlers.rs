//! Route handlers.

use std::collections::BTreeMap;
use std::time::Instant;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::config::loader::{ENV_AMADEUS_CLIENT_ID, ENV_AMADEUS_CLIENT_SECRET, ENV_SERPAPI_KEY};
use crate::http::request::request_id;
use crate::http::response::ApiError;
use crate::http::server::{AppState, FLIGHTS_PATH};
use crate::normalize::NormalizeParams;
use crate::observability::metrics;
use crate::search::{FlightSearchParams, FlightsResponse, SearchQuery};

/// Body of `GET /`.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub ok: bool,
    pub provider: String,
    pub endpoint: &'static str,
    pub env: BTreeMap<String, bool>,
}

/// Health and configuration introspection. No side effects.
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    let config = &state.config;
    let presence = [
        (ENV_AMADEUS_CLIENT_ID, config.amadeus.client_id.is_some()),
        (ENV_AMADEUS_CLIENT_SECRET, config.amadeus.client_secret.is_some()),
        (ENV_SERPAPI_KEY, config.serpapi.api_key.is_some()),
    ];

    Json(HealthStatus {
        ok: true,
        provider: config.provider.name.clone(),
        endpoint: FLIGHTS_PATH,
        env: presence
            .into_iter()
            .map(|(var, present)| (format!("{}_present", var), present))
            .collect(),
    })
}

/// `GET /amadeus/flights`: validate, dispatch, normalize.
pub async fn search_flights(
    State(state): State<AppState>,
    headers: HeaderMap,
    params: Result<Query<FlightSearchParams>, QueryRejection>,
) -> Response {
    let start = Instant::now();
    let request_id = request_id(&headers).to_string();

    let result = match params {
        Ok(Query(params)) => run_search(&state, params, &request_id).await,
        Err(rejection) => Err(ApiError::from(rejection)),
    };
    let response = match result {
        Ok(body) => Json(body).into_response(),
        Err(e) => e.into_response(),
    };

    metrics::record_request(&state.config.provider.name, response.status().as_u16(), start);
    response
}

async fn run_search(
    state: &AppState,
    params: FlightSearchParams,
    request_id: &str,
) -> Result<FlightsResponse, ApiError> {
    let query = SearchQuery::from_params(params, &state.config.search)?;

    let provider = state.provider.as_ref().map_err(|e| e.clone())?;

    tracing::info!(
        request_id = %request_id,
        provider = %provider.kind(),
        origin = %query.origin,
        destination = %query.destination,
        date = %query.date,
        max = query.max,
        "Searching flights"
    );

    let raw = provider.search(&query).await?;
    let flights = provider.normalize(&raw, &NormalizeParams::from(&query));

    tracing::debug!(request_id = %request_id, count = flights.len(), "Normalized flights");
    Ok(FlightsResponse::from(flights))
}
