//! US state abbreviation tables.
//!
//! Maps full state names (50 states + DC, plus common DC aliases) to their
//! two-letter postal abbreviations, and recognizes postal abbreviations for
//! states, DC, and the inhabited territories.

/// Postal abbreviations accepted as already-normalized state values.
pub const STATE_ABBREVIATIONS: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA", "KS",
    "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ", "NM", "NY",
    "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA", "WV",
    "WI", "WY", "DC", "PR", "GU", "VI", "AS", "MP",
];

/// Whether `value` is exactly an uppercase postal abbreviation.
#[must_use]
pub fn is_state_abbreviation(value: &str) -> bool {
    STATE_ABBREVIATIONS.contains(&value)
}

/// Maps a lowercase full state name to its postal abbreviation.
///
/// Returns `None` for unrecognized names.
#[must_use]
pub fn abbreviation_for_name(name: &str) -> Option<&'static str> {
    match name {
        "alabama" => Some("AL"),
        "alaska" => Some("AK"),
        "arizona" => Some("AZ"),
        "arkansas" => Some("AR"),
        "california" => Some("CA"),
        "colorado" => Some("CO"),
        "connecticut" => Some("CT"),
        "delaware" => Some("DE"),
        "florida" => Some("FL"),
        "georgia" => Some("GA"),
        "hawaii" => Some("HI"),
        "idaho" => Some("ID"),
        "illinois" => Some("IL"),
        "indiana" => Some("IN"),
        "iowa" => Some("IA"),
        "kansas" => Some("KS"),
        "kentucky" => Some("KY"),
        "louisiana" => Some("LA"),
        "maine" => Some("ME"),
        "maryland" => Some("MD"),
        "massachusetts" => Some("MA"),
        "michigan" => Some("MI"),
        "minnesota" => Some("MN"),
        "mississippi" => Some("MS"),
        "missouri" => Some("MO"),
        "montana" => Some("MT"),
        "nebraska" => Some("NE"),
        "nevada" => Some("NV"),
        "new hampshire" => Some("NH"),
        "new jersey" => Some("NJ"),
        "new mexico" => Some("NM"),
        "new york" => Some("NY"),
        "north carolina" => Some("NC"),
        "north dakota" => Some("ND"),
        "ohio" => Some("OH"),
        "oklahoma" => Some("OK"),
        "oregon" => Some("OR"),
        "pennsylvania" => Some("PA"),
        "rhode island" => Some("RI"),
        "south carolina" => Some("SC"),
        "south dakota" => Some("SD"),
        "tennessee" => Some("TN"),
        "texas" => Some("TX"),
        "utah" => Some("UT"),
        "vermont" => Some("VT"),
        "virginia" => Some("VA"),
        "washington" => Some("WA"),
        "west virginia" => Some("WV"),
        "wisconsin" => Some("WI"),
        "wyoming" => Some("WY"),
        "district of columbia" | "washington dc" | "washington d.c." => Some("DC"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abbreviation_count() {
        // 50 states + DC + 5 territories
        assert_eq!(STATE_ABBREVIATIONS.len(), 56);
    }

    #[test]
    fn every_named_state_maps_to_a_known_abbreviation() {
        for name in [
            "alabama",
            "new hampshire",
            "west virginia",
            "wyoming",
            "district of columbia",
        ] {
            let abbr = abbreviation_for_name(name).unwrap();
            assert!(is_state_abbreviation(abbr), "{name} -> {abbr}");
        }
    }

    #[test]
    fn dc_aliases() {
        assert_eq!(abbreviation_for_name("washington dc"), Some("DC"));
        assert_eq!(abbreviation_for_name("washington d.c."), Some("DC"));
        assert_eq!(abbreviation_for_name("washington"), Some("WA"));
    }

    #[test]
    fn abbreviations_are_case_sensitive() {
        assert!(is_state_abbreviation("MA"));
        assert!(!is_state_abbreviation("ma"));
        assert!(!is_state_abbreviation("ZZ"));
    }
}
