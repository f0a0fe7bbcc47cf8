//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Select the flight provider once, at construction
//! - Create the Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, CORS)
//! - Serve until the shutdown signal fires

use std::sync::Arc;

use axum::{
    extract::Request,
    http::Method,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::http::handlers;
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::lifecycle::ShutdownSignal;
use crate::providers::{self, ConfigurationError, FlightProvider};

/// Path of the flight search endpoint.
pub const FLIGHTS_PATH: &str = "/amadeus/flights";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    /// The provider chosen at startup, or why none could be built.
    pub provider: Result<Arc<dyn FlightProvider>, ConfigurationError>,
}

/// HTTP server for the flight gateway.
pub struct HttpServer {
    router: Router,
    config: Arc<GatewayConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("flight-gateway/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_http_client(config, http))
    }

    /// Create a server whose provider uses the given outbound HTTP client.
    pub fn with_http_client(config: GatewayConfig, http: reqwest::Client) -> Self {
        let provider = providers::select(&config, http);
        match &provider {
            Ok(p) => tracing::info!(provider = %p.kind(), "Flight provider ready"),
            Err(e) => tracing::warn!(
                provider = %config.provider.name,
                error = %e,
                detail = %e.detail(),
                "Flight provider unavailable; searches will fail until configured"
            ),
        }

        let config = Arc::new(config);
        let state = AppState {
            config: Arc::clone(&config),
            provider,
        };

        Self {
            router: Self::build_router(state),
            config,
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET])
            .allow_headers(Any);

        let middleware = ServiceBuilder::new()
            .layer(set_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id(request.headers()),
                )
            }))
            .layer(propagate_request_id_layer())
            .layer(cors);

        Router::new()
            .route("/", get(handlers::health))
            .route(FLIGHTS_PATH, get(handlers::search_flights))
            .with_state(state)
            .layer(middleware)
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.recv().await;
                tracing::info!("HTTP server draining");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}
