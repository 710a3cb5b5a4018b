#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Coordinate directory for resolving location keys.
//!
//! The directory is a static JSON object mapping location names to
//! `[latitude, longitude]` pairs:
//!
//! ```json
//! { "Boston, MA": [42.36, -71.06], "Chicago, IL": [41.88, -87.63] }
//! ```
//!
//! It is loaded once and never mutated. Lookups are case-insensitive exact
//! matches served from a lowercase index built at load time. When two keys
//! differ only by case, the one earlier in the file wins. Each entry is
//! indexed under its raw key and under its normalized form, so a directory
//! written with `"St. Louis, MO"` still answers a row keyed
//! `"Saint Louis, MO"`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use candidate_finder_candidate_models::{Coordinates, InvalidCoordinatesError};
use candidate_finder_location::{NormalizeOptions, canonicalize_key, strip_punctuation};
use thiserror::Error;

/// Errors from loading a coordinate directory.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The resource could not be read.
    #[error("Failed to read coordinate directory {path}: {source}")]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The resource is not a JSON object of `[lat, lon]` pairs.
    #[error("Failed to parse coordinate directory: {0}")]
    Parse(#[from] serde_json::Error),

    /// An entry's coordinates are out of range.
    #[error("Invalid entry \"{key}\": {source}")]
    InvalidEntry {
        /// The offending directory key.
        key: String,
        /// The range violation.
        source: InvalidCoordinatesError,
    },
}

/// Immutable mapping from location name to coordinates.
#[derive(Debug, Clone, Default)]
pub struct CoordinateDirectory {
    /// Entries in resource order.
    entries: Vec<(String, Coordinates)>,
    /// Lowercased raw keys and normalized aliases.
    index: BTreeMap<String, Coordinates>,
}

impl CoordinateDirectory {
    /// Builds a directory from `(key, coordinates)` pairs.
    ///
    /// Earlier pairs take precedence when keys collide after lowercasing.
    #[must_use]
    pub fn from_entries(
        entries: impl IntoIterator<Item = (String, Coordinates)>,
        options: NormalizeOptions,
    ) -> Self {
        let entries: Vec<(String, Coordinates)> = entries.into_iter().collect();
        let mut index: BTreeMap<String, Coordinates> = BTreeMap::new();

        // Raw keys take precedence over any alias derived from another entry.
        for (key, coords) in &entries {
            let lower = key.to_lowercase();
            if index.contains_key(&lower) {
                log::debug!("Directory key \"{key}\" differs only by case from an earlier key");
                continue;
            }
            index.insert(lower, *coords);
        }

        for (key, coords) in &entries {
            for alias in [strip_punctuation(key), canonicalize_key(key, options)] {
                index.entry(alias.to_lowercase()).or_insert(*coords);
            }
        }

        Self { entries, index }
    }

    /// Parses a directory from JSON text, keeping the file's key order.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Parse`] if the text is not an object of
    /// two-element numeric arrays, or [`DirectoryError::InvalidEntry`] if
    /// any pair is outside the valid latitude/longitude ranges.
    pub fn from_json(text: &str, options: NormalizeOptions) -> Result<Self, DirectoryError> {
        let raw: serde_json::Map<String, serde_json::Value> = serde_json::from_str(text)?;

        let entries = raw
            .into_iter()
            .map(|(key, value)| {
                let [lat, lon]: [f64; 2] = serde_json::from_value(value)?;
                match Coordinates::new(lat, lon) {
                    Ok(coords) => Ok((key, coords)),
                    Err(source) => Err(DirectoryError::InvalidEntry { key, source }),
                }
            })
            .collect::<Result<Vec<_>, DirectoryError>>()?;

        Ok(Self::from_entries(entries, options))
    }

    /// Reads and parses a directory from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Read`] if the file cannot be read, or any
    /// error from [`Self::from_json`].
    pub async fn load(path: &Path, options: NormalizeOptions) -> Result<Self, DirectoryError> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| DirectoryError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let directory = Self::from_json(&text, options)?;
        log::info!(
            "Loaded {} coordinate entries ({} index keys) from {}",
            directory.len(),
            directory.index.len(),
            path.display()
        );

        Ok(directory)
    }

    /// Looks up a location key, ignoring case.
    ///
    /// Returns `None` for empty keys and keys with no entry.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<Coordinates> {
        if key.is_empty() {
            return None;
        }
        self.index.get(&key.to_lowercase()).copied()
    }

    /// Whether a location key resolves.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// Number of entries in the resource.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the resource had no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
