//! Normalization of city, state, and address values into location keys.
//!
//! The same pipeline is applied to CSV rows and to coordinate directory
//! keys, so `"St. Louis", "Missouri"` and a directory entry
//! `"Saint Louis, MO"` meet at the same key.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::states;

/// Whole-word city name abbreviations that are expanded by
/// [`normalize_city`].
static CITY_ABBREVIATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(st|ft|mt|jct|centre|boro)\b").expect("valid regex"));

/// Regex to collapse runs of whitespace into a single space.
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("valid regex"));

/// Controls the optional normalization tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Expand `St`, `Ft`, `Mt`, `Jct`, `Centre`, and `Boro` in city names.
    pub expand_city_abbreviations: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            expand_city_abbreviations: true,
        }
    }
}

/// Removes periods and apostrophes and trims surrounding whitespace.
#[must_use]
pub fn strip_punctuation(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '.' | '\''))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Normalizes a state value to its two-letter postal abbreviation.
///
/// Values that are already a postal abbreviation (in any case) are returned
/// uppercased. Full names are looked up case-insensitively. Anything else is
/// returned uppercased with punctuation stripped, so `"Calif."` becomes
/// `"CALIF"`.
#[must_use]
pub fn normalize_state(value: &str) -> String {
    let clean = strip_punctuation(value).to_uppercase();

    if states::is_state_abbreviation(&clean) {
        return clean;
    }

    let lower = WHITESPACE_RE.replace_all(&clean, " ").to_lowercase();
    states::abbreviation_for_name(&lower).map_or(clean, str::to_string)
}

/// Expands common city-name abbreviations as whole words, ignoring case.
///
/// `"St Louis"` becomes `"Saint Louis"` and `"Ft Worth"` becomes
/// `"Fort Worth"`. Substrings such as the `st` in `"Boston"` are untouched.
#[must_use]
pub fn normalize_city(value: &str) -> String {
    CITY_ABBREVIATION_RE
        .replace_all(value, |caps: &Captures<'_>| {
            expand_city_token(&caps[1]).map_or_else(|| caps[1].to_string(), str::to_string)
        })
        .into_owned()
}

/// Returns the expansion for a single city-name abbreviation, if any.
fn expand_city_token(token: &str) -> Option<&'static str> {
    match token.to_ascii_lowercase().as_str() {
        "st" => Some("Saint"),
        "ft" => Some("Fort"),
        "mt" => Some("Mount"),
        "jct" => Some("Junction"),
        "centre" => Some("Center"),
        "boro" => Some("Borough"),
        _ => None,
    }
}

/// Builds the `"{city}, {state}"` key from raw city and state values.
///
/// Returns `None` if either value is empty after stripping punctuation.
#[must_use]
pub fn city_state_key(city: &str, state: &str, options: NormalizeOptions) -> Option<String> {
    let city = strip_punctuation(city);
    let state = normalize_state(state);
    if city.is_empty() || state.is_empty() {
        return None;
    }

    let city = if options.expand_city_abbreviations {
        normalize_city(&city)
    } else {
        city
    };

    Some(format!("{city}, {state}"))
}

/// Normalizes a coordinate directory key the same way row keys are built.
///
/// Keys shaped like `"City, State"` (split at the last comma) go through
/// [`city_state_key`]; anything else is treated as a free-form address and
/// only has its punctuation stripped.
#[must_use]
pub fn canonicalize_key(key: &str, options: NormalizeOptions) -> String {
    key.rsplit_once(',')
        .and_then(|(city, state)| city_state_key(city, state, options))
        .unwrap_or_else(|| strip_punctuation(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_periods_and_apostrophes() {
        assert_eq!(strip_punctuation("  O'Fallon. "), "OFallon");
        assert_eq!(strip_punctuation("St. Paul"), "St Paul");
        assert_eq!(strip_punctuation(""), "");
    }

    #[test]
    fn full_state_names_become_abbreviations() {
        assert_eq!(normalize_state("california"), "CA");
        assert_eq!(normalize_state("New York"), "NY");
        assert_eq!(normalize_state("  north   carolina "), "NC");
        assert_eq!(normalize_state("Washington D.C."), "DC");
    }

    #[test]
    fn abbreviations_pass_through_uppercased() {
        assert_eq!(normalize_state("CA"), "CA");
        assert_eq!(normalize_state("ma"), "MA");
        assert_eq!(normalize_state("D.C."), "DC");
    }

    #[test]
    fn unresolved_states_pass_through() {
        assert_eq!(normalize_state("Calif."), "CALIF");
        assert_eq!(normalize_state("Ontario"), "ONTARIO");
        assert_eq!(normalize_state(""), "");
    }

    #[test]
    fn expands_city_abbreviations() {
        assert_eq!(normalize_city("St Louis"), "Saint Louis");
        assert_eq!(normalize_city("FT WORTH"), "Fort WORTH");
        assert_eq!(normalize_city("Mt Pleasant"), "Mount Pleasant");
        assert_eq!(normalize_city("Oak Jct"), "Oak Junction");
        assert_eq!(normalize_city("Town Centre"), "Town Center");
        assert_eq!(normalize_city("Forest Boro"), "Forest Borough");
    }

    #[test]
    fn city_expansion_is_whole_word_only() {
        assert_eq!(normalize_city("Boston"), "Boston");
        assert_eq!(normalize_city("Stamford"), "Stamford");
        assert_eq!(normalize_city("Fort Mitchell"), "Fort Mitchell");
    }

    #[test]
    fn builds_city_state_key() {
        let options = NormalizeOptions::default();
        assert_eq!(
            city_state_key("St. Louis", "missouri", options).as_deref(),
            Some("Saint Louis, MO")
        );
        assert_eq!(city_state_key("Boston", "", options), None);
        assert_eq!(city_state_key(" . ", "MA", options), None);
    }

    #[test]
    fn city_expansion_can_be_disabled() {
        let options = NormalizeOptions {
            expand_city_abbreviations: false,
        };
        assert_eq!(
            city_state_key("St. Louis", "MO", options).as_deref(),
            Some("St Louis, MO")
        );
    }

    #[test]
    fn canonicalizes_directory_keys() {
        let options = NormalizeOptions::default();
        assert_eq!(
            canonicalize_key("St. Louis, MO", options),
            "Saint Louis, MO"
        );
        assert_eq!(
            canonicalize_key("Boston, Massachusetts", options),
            "Boston, MA"
        );
        assert_eq!(canonicalize_key("Springfield", options), "Springfield");
        assert_eq!(
            canonicalize_key("Ft. Myers, Florida", options),
            "Fort Myers, FL"
        );
        assert_eq!(
            canonicalize_key("Washington, D.C.", options),
            "Washington, DC"
        );
    }
}
