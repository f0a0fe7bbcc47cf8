//! Static carrier display names, consulted only when the provider does not
//! name the airline itself.

const AIRLINE_NAMES: &[(&str, &str)] = &[
    ("AA", "American Airlines"),
    ("AC", "Air Canada"),
    ("AF", "Air France"),
    ("AS", "Alaska Airlines"),
    ("B6", "JetBlue Airways"),
    ("BA", "British Airways"),
    ("DL", "Delta Air Lines"),
    ("EK", "Emirates"),
    ("F9", "Frontier Airlines"),
    ("KL", "KLM Royal Dutch Airlines"),
    ("LH", "Lufthansa"),
    ("NK", "Spirit Airlines"),
    ("QR", "Qatar Airways"),
    ("UA", "United Airlines"),
    ("WN", "Southwest Airlines"),
];

/// Display name for an IATA carrier code, if it is one we know.
pub fn display_name(code: &str) -> Option<&'static str> {
    AIRLINE_NAMES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(code))
        .map(|(_, name)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(display_name("DL"), Some("Delta Air Lines"));
        assert_eq!(display_name("ua"), Some("United Airlines"));
        assert_eq!(display_name("ZZ"), None);
        assert_eq!(display_name(""), None);
    }
}
