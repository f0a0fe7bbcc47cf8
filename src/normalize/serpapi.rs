//! SerpApi Google Flights mapping.

use serde_json::Value;

use super::{airlines, array, composite_id, finalize, format_price, text, NormalizeParams};
use crate::search::FlightRecord;

/// Map a SerpApi `google_flights` document into flight records.
///
/// `best_flights` come first, then `other_flights`; the position in that
/// combined list feeds synthesized ids.
pub fn normalize(raw: &Value, params: &NormalizeParams<'_>) -> Vec<FlightRecord> {
    let records = array(raw, "/best_flights")
        .iter()
        .chain(array(raw, "/other_flights"))
        .enumerate()
        .map(|(index, result)| map_result(index, result, params.currency))
        .collect();

    finalize(records, params)
}

fn map_result(index: usize, result: &Value, currency: &str) -> FlightRecord {
    let legs = array(result, "/flights");
    let first = legs.first();
    let last = legs.last();
    let from_first = |pointer: &str| first.and_then(|leg| text(leg, pointer));
    let from_last = |pointer: &str| last.and_then(|leg| text(leg, pointer));

    let (airline, number) = from_first("/flight_number")
        .map(|raw| split_flight_number(&raw))
        .unwrap_or_default();
    let flight_number = format!("{}{}", airline, number);

    let airline_name = from_first("/airline")
        .or_else(|| airlines::display_name(&airline).map(str::to_string))
        .unwrap_or_else(|| airline.clone());

    let departure_iata = from_first("/departure_airport/id").unwrap_or_default();
    let arrival_iata = from_last("/arrival_airport/id").unwrap_or_default();

    let id = text(result, "/booking_token").unwrap_or_else(|| {
        composite_id(&flight_number, &departure_iata, &arrival_iata, index)
    });

    FlightRecord {
        id,
        airline,
        airline_name,
        flight_number,
        departure_iata,
        arrival_iata,
        departure_time: from_first("/departure_airport/time"),
        arrival_time: from_last("/arrival_airport/time"),
        price: format_price(currency, text(result, "/price")),
    }
}

/// Split `"DL 100"` or `"DL100"` into carrier and number.
///
/// Anything without a recognisable two-character carrier prefix is kept
/// whole as the number with an empty carrier.
fn split_flight_number(raw: &str) -> (String, String) {
    let raw = raw.trim();

    if let Some((carrier, number)) = raw.split_once(char::is_whitespace) {
        let number: String = number.split_whitespace().collect();
        return (carrier.to_uppercase(), number);
    }

    let prefix: String = raw.chars().take(2).collect();
    let rest = &raw[prefix.len()..];
    let is_carrier = prefix.chars().count() == 2
        && prefix.chars().all(|c| c.is_ascii_alphanumeric())
        && prefix.chars().any(|c| c.is_ascii_alphabetic());

    if is_carrier && !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()) {
        (prefix.to_uppercase(), rest.to_string())
    } else {
        (String::new(), raw.to_string())
    }
}
