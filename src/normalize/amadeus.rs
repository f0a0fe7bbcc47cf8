//! Amadeus flight-offers mapping.
//!
//! Only the first itinerary of each offer is represented: its first segment
//! gives the departure, its last segment the arrival. Return itineraries are
//! dropped.

use serde_json::Value;

use super::{airlines, array, composite_id, finalize, format_price, text, NormalizeParams};
use crate::search::FlightRecord;

/// Map an Amadeus `flight-offers` document into flight records.
pub fn normalize(raw: &Value, params: &NormalizeParams<'_>) -> Vec<FlightRecord> {
    let carriers = raw.pointer("/dictionaries/carriers");

    let records = array(raw, "/data")
        .iter()
        .enumerate()
        .map(|(index, offer)| map_offer(index, offer, carriers, params.currency))
        .collect();

    finalize(records, params)
}

fn map_offer(
    index: usize,
    offer: &Value,
    carriers: Option<&Value>,
    currency: &str,
) -> FlightRecord {
    let segments = array(offer, "/itineraries/0/segments");
    let first = segments.first();
    let last = segments.last();
    let from_first = |pointer: &str| first.and_then(|s| text(s, pointer));
    let from_last = |pointer: &str| last.and_then(|s| text(s, pointer));

    let airline = from_first("/carrierCode")
        .or_else(|| text(offer, "/validatingAirlineCodes/0"))
        .unwrap_or_default()
        .to_uppercase();

    let flight_number = from_first("/number")
        .map(|number| format!("{}{}", airline, number))
        .unwrap_or_default();

    let airline_name = carriers
        .and_then(|dict| dict.get(airline.as_str()))
        .and_then(Value::as_str)
        .filter(|name| !name.trim().is_empty())
        .map(str::to_string)
        .or_else(|| airlines::display_name(&airline).map(str::to_string))
        .unwrap_or_else(|| airline.clone());

    let departure_iata = from_first("/departure/iataCode").unwrap_or_default();
    let arrival_iata = from_last("/arrival/iataCode").unwrap_or_default();

    let amount = text(offer, "/price/grandTotal").or_else(|| text(offer, "/price/total"));
    let price_currency = text(offer, "/price/currency").unwrap_or_else(|| currency.to_string());

    let id = text(offer, "/id").unwrap_or_else(|| {
        composite_id(&flight_number, &departure_iata, &arrival_iata, index)
    });

    FlightRecord {
        id,
        airline,
        airline_name,
        flight_number,
        departure_iata,
        arrival_iata,
        departure_time: from_first("/departure/at"),
        arrival_time: from_last("/arrival/at"),
        price: format_price(&price_currency, amount),
    }
}
