//! The unified flight shape returned to clients.

use serde::{Deserialize, Serialize};

/// One flattened flight option, identical regardless of provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightRecord {
    pub id: String,
    pub airline: String,
    pub airline_name: String,
    pub flight_number: String,
    #[serde(rename = "departureIATA")]
    pub departure_iata: String,
    #[serde(rename = "arrivalIATA")]
    pub arrival_iata: String,
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
    pub price: Option<String>,
}

/// Body of a successful search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightsResponse {
    pub count: usize,
    pub flights: Vec<FlightRecord>,
}

impl From<Vec<FlightRecord>> for FlightsResponse {
    fn from(flights: Vec<FlightRecord>) -> Self {
        Self {
            count: flights.len(),
            flights,
        }
    }
}
