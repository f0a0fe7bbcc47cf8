//! Incoming search parameters and their validated form.

use std::collections::BTreeSet;

use serde::Deserialize;
use thiserror::Error;

use crate::config::SearchConfig;

/// Upper bound on returned flights, whatever the configured ceiling says.
pub const MAX_RESULTS: usize = 50;

/// Raw query-string parameters as sent by the client.
///
/// Every field is optional text so that extraction never rejects a request;
/// `SearchQuery::from_params` decides what is acceptable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlightSearchParams {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub date: Option<String>,
    #[serde(rename = "returnDate")]
    pub return_date: Option<String>,
    pub currency: Option<String>,
    pub max: Option<String>,
    pub include: Option<String>,
}

/// Required parameters were absent or blank.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Missing required query parameters: {}", missing.join(", "))]
pub struct ValidationError {
    pub missing: Vec<&'static str>,
}

/// A validated flight search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Origin IATA code, uppercase.
    pub origin: String,
    /// Destination IATA code, uppercase.
    pub destination: String,
    /// Outbound date, passed through untouched.
    pub date: String,
    pub return_date: Option<String>,
    /// Currency code, uppercase.
    pub currency: String,
    /// Result cap, already clamped to the ceiling.
    pub max: usize,
    /// Airline allow-list. `None` when absent or empty.
    pub include: Option<BTreeSet<String>>,
}

impl SearchQuery {
    /// Validate raw parameters against the configured search defaults.
    pub fn from_params(
        params: FlightSearchParams,
        defaults: &SearchConfig,
    ) -> Result<Self, ValidationError> {
        let origin = non_blank(params.origin);
        let destination = non_blank(params.destination);
        let date = non_blank(params.date);

        let (origin, destination, date) = match (origin, destination, date) {
            (Some(o), Some(d), Some(t)) => (o, d, t),
            (o, d, t) => {
                let missing = [
                    ("origin", o.is_none()),
                    ("destination", d.is_none()),
                    ("date", t.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, absent)| absent.then_some(name))
                .collect();
                return Err(ValidationError { missing });
            }
        };

        Ok(Self {
            origin: origin.to_uppercase(),
            destination: destination.to_uppercase(),
            date,
            return_date: non_blank(params.return_date),
            currency: non_blank(params.currency)
                .unwrap_or_else(|| defaults.default_currency.clone())
                .to_uppercase(),
            max: parse_max(params.max.as_deref(), defaults.default_max, defaults.max_ceiling),
            include: params.include.as_deref().and_then(parse_include),
        })
    }

    /// Allow-list as a comma-joined string, for providers that filter upstream.
    pub fn include_csv(&self) -> Option<String> {
        self.include
            .as_ref()
            .map(|set| set.iter().cloned().collect::<Vec<_>>().join(","))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse the `max` parameter.
///
/// Absent, non-numeric, and non-positive values fall back to `default`.
/// The result never exceeds `ceiling` or [`MAX_RESULTS`].
pub fn parse_max(raw: Option<&str>, default: usize, ceiling: usize) -> usize {
    let requested = raw
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|n| *n > 0)
        .map(|n| usize::try_from(n).unwrap_or(usize::MAX))
        .unwrap_or(default);
    requested.min(ceiling).min(MAX_RESULTS)
}

/// Parse a comma-separated airline list into an uppercase set.
pub fn parse_include(raw: &str) -> Option<BTreeSet<String>> {
    let codes: BTreeSet<String> = raw
        .split(',')
        .map(|code| code.trim().to_uppercase())
        .filter(|code| !code.is_empty())
        .collect();
    (!codes.is_empty()).then_some(codes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(origin: &str, destination: &str, date: &str) -> FlightSearchParams {
        FlightSearchParams {
            origin: Some(origin.into()),
            destination: Some(destination.into()),
            date: Some(date.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_normalizes_codes_and_defaults() {
        let query =
            SearchQuery::from_params(params("jfk", " lax ", "2025-06-01"), &SearchConfig::default())
                .unwrap();

        assert_eq!(query.origin, "JFK");
        assert_eq!(query.destination, "LAX");
        assert_eq!(query.date, "2025-06-01");
        assert_eq!(query.currency, "USD");
        assert_eq!(query.max, 20);
        assert!(query.include.is_none());
        assert!(query.return_date.is_none());
    }

    #[test]
    fn test_reports_every_missing_parameter() {
        let err = SearchQuery::from_params(
            FlightSearchParams {
                destination: Some("LAX".into()),
                date: Some("   ".into()),
                ..Default::default()
            },
            &SearchConfig::default(),
        )
        .unwrap_err();

        assert_eq!(err.missing, vec!["origin", "date"]);
        assert_eq!(
            err.to_string(),
            "Missing required query parameters: origin, date"
        );
    }

    #[test]
    fn test_parse_max() {
        assert_eq!(parse_max(None, 20, 50), 20);
        assert_eq!(parse_max(Some("5"), 20, 50), 5);
        assert_eq!(parse_max(Some("500"), 20, 50), 50);
        assert_eq!(parse_max(Some("ten"), 20, 50), 20);
        assert_eq!(parse_max(Some("0"), 20, 50), 20);
        assert_eq!(parse_max(Some("-3"), 20, 50), 20);
        assert_eq!(parse_max(Some(" 7 "), 20, 50), 7);
    }

    #[test]
    fn test_max_never_exceeds_hard_limit() {
        assert_eq!(parse_max(Some("120"), 20, 200), MAX_RESULTS);
        assert_eq!(parse_max(None, 80, 200), MAX_RESULTS);
        assert_eq!(parse_max(Some("30"), 20, 10), 10);

        let defaults = SearchConfig {
            max_ceiling: 200,
            ..SearchConfig::default()
        };
        let mut raw = params("JFK", "LAX", "2025-06-01");
        raw.max = Some("120".into());
        let query = SearchQuery::from_params(raw, &defaults).unwrap();
        assert_eq!(query.max, 50);
    }

    #[test]
    fn test_parse_include() {
        let set = parse_include("dl, aa,,UA ").unwrap();
        assert_eq!(
            set.into_iter().collect::<Vec<_>>(),
            vec!["AA".to_string(), "DL".to_string(), "UA".to_string()]
        );
        assert!(parse_include(" , ").is_none());
    }

    #[test]
    fn test_explicit_currency_and_include() {
        let mut raw = params("JFK", "LAX", "2025-06-01");
        raw.currency = Some("eur".into());
        raw.include = Some("ua,dl".into());
        raw.return_date = Some("2025-06-08".into());

        let query = SearchQuery::from_params(raw, &SearchConfig::default()).unwrap();
        assert_eq!(query.currency, "EUR");
        assert_eq!(query.include_csv().as_deref(), Some("DL,UA"));
        assert_eq!(query.return_date.as_deref(), Some("2025-06-08"));
    }
}
