//! Flight search gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌──────────────────────────────────────────────────┐
//!                 │                  FLIGHT GATEWAY                   │
//!                 │                                                   │
//!  GET /amadeus/  │  ┌────────────┐   ┌────────────┐   ┌───────────┐ │
//!  flights ───────┼─▶│  handlers  │──▶│  provider  │──▶│ amadeus / │─┼──▶ Upstream
//!                 │  │ (validate) │   │ (selected  │   │ serpapi   │ │    API
//!                 │  └────────────┘   │ at startup)│   └─────┬─────┘ │
//!                 │                   └────────────┘         │ raw   │
//!                 │                                          ▼ JSON  │
//!  { count,       │  ┌────────────┐   ┌────────────────────────────┐ │
//!    flights } ◀──┼──│  response  │◀──│ normalize (map → filter →  │ │
//!                 │  └────────────┘   │            truncate)       │ │
//!                 │                   └────────────────────────────┘ │
//!                 │                                                   │
//!                 │  config · observability · lifecycle               │
//!                 └──────────────────────────────────────────────────┘
//! ```

use tokio::net::TcpListener;

use flight_gateway::config::loader;
use flight_gateway::lifecycle::{signals, Shutdown};
use flight_gateway::observability::{self, metrics};
use flight_gateway::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match loader::from_env() {
        Ok(config) => config,
        Err(e) => {
            observability::init_logging("info");
            tracing::error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };

    observability::init_logging(&config.observability.log_level);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        provider = %config.provider.name,
        bind_address = %config.listener.bind_address(),
        "flight-gateway starting"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(&shutdown);

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.signal()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
