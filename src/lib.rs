//! Flight search gateway library.
//!
//! Normalizes flight offers from one of two upstream providers (Amadeus or
//! SerpApi Google Flights) into a single flat record shape.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod normalize;
pub mod observability;
pub mod providers;
pub mod search;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use search::{FlightRecord, FlightsResponse, SearchQuery};
