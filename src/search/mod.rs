//! Search domain types shared by providers, normalizers, and the HTTP layer.

pub mod query;
pub mod record;

pub use query::{FlightSearchParams, SearchQuery, ValidationError, MAX_RESULTS};
pub use record::{FlightRecord, FlightsResponse};
