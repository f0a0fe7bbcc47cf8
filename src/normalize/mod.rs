//! Response normalization.
//!
//! # Data Flow
//! ```text
//! raw provider JSON
//!     → amadeus.rs / serpapi.rs (field-by-field mapping)
//!     → finalize (allow-list filter, then truncate)
//!     → Vec<FlightRecord>
//! ```
//!
//! # Design Decisions
//! - Raw documents are walked as `serde_json::Value`; a missing or oddly
//!   typed field degrades to `""`/`None` instead of failing the record
//! - The allow-list is re-applied here even when the upstream was asked to
//!   filter, so both providers behave identically

use std::collections::BTreeSet;

use serde_json::Value;

use crate::search::{FlightRecord, SearchQuery};

pub mod airlines;
pub mod amadeus;
pub mod serpapi;

/// Per-request knobs shared by every mapping function.
#[derive(Debug, Clone, Copy)]
pub struct NormalizeParams<'a> {
    /// Currency used when the provider does not state one.
    pub currency: &'a str,
    /// Maximum number of records to keep.
    pub max: usize,
    /// Airline allow-list; `None` keeps everything.
    pub include: Option<&'a BTreeSet<String>>,
}

impl<'a> From<&'a SearchQuery> for NormalizeParams<'a> {
    fn from(query: &'a SearchQuery) -> Self {
        Self {
            currency: &query.currency,
            max: query.max,
            include: query.include.as_ref(),
        }
    }
}

/// Apply the allow-list filter, then cap the result count, preserving order.
pub fn finalize(records: Vec<FlightRecord>, params: &NormalizeParams<'_>) -> Vec<FlightRecord> {
    let allowed = params.include.filter(|set| !set.is_empty());

    records
        .into_iter()
        .filter(|record| match allowed {
            Some(set) => set
                .iter()
                .any(|code| code.eq_ignore_ascii_case(&record.airline)),
            None => true,
        })
        .take(params.max)
        .collect()
}

/// Read a scalar at a JSON pointer as text. Blank strings count as missing.
pub(crate) fn text(value: &Value, pointer: &str) -> Option<String> {
    match value.pointer(pointer)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Array at a JSON pointer, or an empty slice.
pub(crate) fn array<'v>(value: &'v Value, pointer: &str) -> &'v [Value] {
    value
        .pointer(pointer)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Identifier used when the provider offers none.
pub(crate) fn composite_id(flight_number: &str, from: &str, to: &str, index: usize) -> String {
    format!("{}-{}-{}-{}", flight_number, from, to, index)
}

/// `"<CURRENCY> <amount>"`, or `None` without an amount.
pub(crate) fn format_price(currency: &str, amount: Option<String>) -> Option<String> {
    amount.map(|amount| format!("{} {}", currency.to_uppercase(), amount))
}
