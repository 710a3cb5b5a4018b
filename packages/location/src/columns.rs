//! Detection of the location columns in a CSV header and per-row key
//! derivation.

use thiserror::Error;

use crate::normalize::{NormalizeOptions, city_state_key, strip_punctuation};

/// The header lacks both a `city` + `state` pair and an `address` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("CSV must have either \"city\"/\"state\" columns or an \"address\" column")]
pub struct NoLocationColumnsError;

/// Positions of the location columns within a header row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnMap {
    /// Index of the `city` column.
    pub city: Option<usize>,
    /// Index of the `state` column.
    pub state: Option<usize>,
    /// Index of the `address` column.
    pub address: Option<usize>,
}

impl ColumnMap {
    /// Locates the `city`, `state`, and `address` columns by name, ignoring
    /// case and surrounding whitespace. The first match wins for each.
    ///
    /// # Errors
    ///
    /// Returns [`NoLocationColumnsError`] unless both `city` and `state`, or
    /// `address`, are present.
    pub fn detect(headers: &[String]) -> Result<Self, NoLocationColumnsError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };

        let columns = Self {
            city: find("city"),
            state: find("state"),
            address: find("address"),
        };

        if columns.has_city_state() || columns.address.is_some() {
            Ok(columns)
        } else {
            Err(NoLocationColumnsError)
        }
    }

    /// Whether both the `city` and `state` columns were found.
    #[must_use]
    pub const fn has_city_state(&self) -> bool {
        self.city.is_some() && self.state.is_some()
    }

    /// Derives the location key for one row.
    ///
    /// Prefers `"{city}, {state}"` when both values are non-empty after
    /// normalization, then falls back to the stripped address. Returns an
    /// empty string when neither yields a value; such rows are kept as
    /// candidates but never match.
    #[must_use]
    pub fn location_key(&self, row: &[String], options: NormalizeOptions) -> String {
        let field = |idx: Option<usize>| idx.and_then(|i| row.get(i)).map_or("", String::as_str);

        if self.has_city_state()
            && let Some(key) = city_state_key(field(self.city), field(self.state), options)
        {
            return key;
        }

        if self.address.is_some() {
            return strip_punctuation(field(self.address));
        }

        String::new()
    }
}
