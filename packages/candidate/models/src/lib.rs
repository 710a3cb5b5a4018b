#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared types for the candidate-finder pipeline.
//!
//! This crate contains only data types and their status-text rendering. It
//! has no I/O and no heavyweight dependencies, so every other crate in the
//! workspace can depend on it.

use std::fmt;

use thiserror::Error;

/// A latitude/longitude pair in decimal degrees (WGS84).
///
/// Always within `[-90, 90]` / `[-180, 180]` when built through
/// [`Coordinates::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

/// Returned when a latitude is outside `[-90, 90]`, a longitude is outside
/// `[-180, 180]`, or either is not a finite number.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("Coordinates out of range: ({latitude}, {longitude})")]
pub struct InvalidCoordinatesError {
    /// The rejected latitude.
    pub latitude: f64,
    /// The rejected longitude.
    pub longitude: f64,
}

impl Coordinates {
    /// Creates a coordinate pair, validating both ranges.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCoordinatesError`] if either value is non-finite or
    /// out of range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinatesError> {
        if latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude)
        {
            Ok(Self {
                latitude,
                longitude,
            })
        } else {
            Err(InvalidCoordinatesError {
                latitude,
                longitude,
            })
        }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// A parsed CSV document: header names in column order plus data rows.
///
/// Every row has exactly `headers.len()` fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTable {
    /// Column names, in file order.
    pub headers: Vec<String>,
    /// Data rows, positionally aligned to `headers`.
    pub rows: Vec<Vec<String>>,
}

impl ParsedTable {
    /// Number of data rows (excluding the header).
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// One data row from the uploaded CSV, enriched with location metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Zero-based position of the row in the ingested file.
    pub row_index: usize,
    /// The row's fields, aligned to the table headers.
    pub fields: Vec<String>,
    /// Derived location key. Empty when no key could be derived.
    pub location_key: String,
    /// Coordinates resolved from the directory, if the key matched.
    pub coordinates: Option<Coordinates>,
    /// Distance from the most recent run's target, in miles.
    pub distance_miles: Option<f64>,
}

impl Candidate {
    /// Creates an unresolved candidate for the given row.
    #[must_use]
    pub const fn new(row_index: usize, fields: Vec<String>, location_key: String) -> Self {
        Self {
            row_index,
            fields,
            location_key,
            coordinates: None,
            distance_miles: None,
        }
    }

    /// Whether this candidate has coordinates and can take part in a run.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.coordinates.is_some()
    }
}

/// Candidates within a run's radius, sorted ascending by distance.
///
/// Ties keep their original ingestion order. Every candidate in a
/// `RunResult` has `distance_miles` set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunResult {
    /// The retained candidates.
    pub candidates: Vec<Candidate>,
}

impl RunResult {
    /// Number of candidates within the radius.
    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether no candidate fell within the radius.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Iterates over the retained candidates in distance order.
    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.candidates.iter()
    }
}

impl<'a> IntoIterator for &'a RunResult {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Outcome of ingesting a CSV file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestSummary {
    /// Number of data rows ingested.
    pub candidate_count: usize,
    /// Distinct non-empty location keys that resolved, in first-seen order.
    pub matched: Vec<String>,
    /// Distinct non-empty location keys that did not resolve, in first-seen
    /// order.
    pub unmatched: Vec<String>,
}

impl IngestSummary {
    /// Number of distinct non-empty location keys.
    #[must_use]
    pub fn unique_locations(&self) -> usize {
        self.matched.len() + self.unmatched.len()
    }
}

impl fmt::Display for IngestSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File loaded successfully!")?;
        writeln!(f, "Number of candidates: {}", self.candidate_count)?;
        writeln!(f, "Unique locations found: {}", self.unique_locations())?;
        writeln!(f, "Locations matched: {}", self.matched.len())?;
        writeln!(f, "Locations not matched: {}", self.unmatched.len())?;

        if !self.unmatched.is_empty() {
            writeln!(f)?;
            writeln!(f, "Unmatched locations:")?;
            for location in &self.unmatched {
                writeln!(f, "- {location}")?;
            }
        }

        Ok(())
    }
}

/// Outcome of a distance run, suitable for display.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Number of ingested candidates, resolved or not.
    pub total_candidates: usize,
    /// The radius the run filtered by.
    pub max_miles: f64,
    /// Number of candidates within the radius.
    pub within_radius: usize,
    /// The closest candidates as `(location_key, distance_miles)`.
    pub closest: Vec<(String, f64)>,
}

impl RunSummary {
    /// Builds a summary listing at most `preview_limit` of the closest
    /// candidates.
    #[must_use]
    pub fn new(
        total_candidates: usize,
        max_miles: f64,
        result: &RunResult,
        preview_limit: usize,
    ) -> Self {
        let closest = result
            .iter()
            .take(preview_limit)
            .map(|c| (c.location_key.clone(), c.distance_miles.unwrap_or_default()))
            .collect();

        Self {
            total_candidates,
            max_miles,
            within_radius: result.len(),
            closest,
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Processing complete!")?;
        writeln!(f, "Total candidates: {}", self.total_candidates)?;
        writeln!(
            f,
            "Candidates within {} miles: {}",
            self.max_miles, self.within_radius
        )?;

        if !self.closest.is_empty() {
            writeln!(f)?;
            writeln!(f, "Closest candidates:")?;
            for (i, (location, distance)) in self.closest.iter().enumerate() {
                writeln!(f, "{}. {location} - {distance:.2} miles", i + 1)?;
            }

            let remaining = self.within_radius.saturating_sub(self.closest.len());
            if remaining > 0 {
                writeln!(f, "... and {remaining} more")?;
            }
        }

        Ok(())
    }
}
