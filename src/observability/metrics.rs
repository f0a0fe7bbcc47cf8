//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): flight searches by provider, status
//! - `gateway_request_duration_seconds` (histogram): end-to-end latency
//! - `gateway_upstream_duration_seconds` (histogram): provider round trips
//! - `gateway_token_fetches_total` (counter): token grants by outcome
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   recorder every call is a no-op
//! - The Prometheus exporter is opt-in via configuration

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(
            address = %addr,
            error = %e,
            "Failed to install metrics exporter"
        ),
    }
}

/// Record a completed flight search request.
pub fn record_request(provider: &str, status: u16, start: Instant) {
    let status = status.to_string();
    counter!(
        "gateway_requests_total",
        "provider" => provider.to_string(),
        "status" => status.clone()
    )
    .increment(1);
    histogram!(
        "gateway_request_duration_seconds",
        "provider" => provider.to_string(),
        "status" => status
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record one upstream provider call.
pub fn record_upstream(provider: &str, status: Option<u16>, start: Instant) {
    let status = status.map_or_else(|| "error".to_string(), |s| s.to_string());
    histogram!(
        "gateway_upstream_duration_seconds",
        "provider" => provider.to_string(),
        "status" => status
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record a token grant attempt ("success", "rejected", "error").
pub fn record_token_fetch(outcome: &'static str) {
    counter!("gateway_token_fetches_total", "outcome" => outcome).increment(1);
}
