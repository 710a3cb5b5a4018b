#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Candidate pipeline: ingest a CSV, resolve locations, filter by distance,
//! and export the result.
//!
//! The pipeline is a small state machine owned by the caller:
//!
//! ```text
//! Empty ──ingest──▶ Loaded ──run──▶ Filtered ──export──▶ CSV text
//!   ▲                 │  ▲            │
//!   └──new file / ────┘  └────run─────┘
//!      load error
//! ```
//!
//! [`Session`] wraps a [`CandidatePipeline`] with generation counters so that
//! a slow file read or directory load cannot overwrite newer state.

pub mod config;
pub mod file;
pub mod params;
pub mod pipeline;
pub mod session;

use std::path::PathBuf;

use candidate_finder_csv::CsvError;
use candidate_finder_location::NoLocationColumnsError;
use thiserror::Error;

pub use config::PipelineConfig;
pub use file::{check_file_type, read_candidate_file};
pub use params::RunParameters;
pub use pipeline::{CandidatePipeline, ExportedCsv, LoadedTable, PipelineState};
pub use session::{Completion, Generation, Session};

/// Errors surfaced to the user as status messages.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The CSV had no non-blank lines.
    #[error("CSV file is empty")]
    EmptyInput,

    /// The selected file is not a `.csv` file.
    #[error("Please select a .csv file (got \"{file_name}\")")]
    WrongFileType {
        /// The rejected file name.
        file_name: String,
    },

    /// The header has neither `city` + `state` nor `address`.
    #[error(transparent)]
    NoLocationColumns(#[from] NoLocationColumnsError),

    /// The coordinate directory failed to load or has not loaded yet.
    #[error("Coordinates database not available: {reason}")]
    DirectoryUnavailable {
        /// Why the directory is unavailable.
        reason: String,
    },

    /// A run was requested before any file was ingested.
    #[error("Please upload a CSV file first")]
    NoDataIngested,

    /// Target coordinates or maximum distance are invalid.
    #[error("Invalid parameters: {message}")]
    InvalidParameters {
        /// What was wrong with the input.
        message: String,
    },

    /// Export was requested without a non-empty run result.
    #[error("No processed data to save. Please run the distance calculation first.")]
    NoRunResults,

    /// The candidate file could not be read.
    #[error("Could not read {path}: {source}")]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The exported CSV could not be saved.
    #[error("Could not write {path}: {source}")]
    Write {
        /// Path that was written.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The CSV could not be parsed or written.
    #[error("Could not process the CSV file: {0}")]
    Csv(CsvError),

    /// A configuration file could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

impl From<CsvError> for PipelineError {
    fn from(value: CsvError) -> Self {
        match value {
            CsvError::EmptyInput => Self::EmptyInput,
            other => Self::Csv(other),
        }
    }
}

impl PipelineError {
    pub(crate) fn invalid_parameters(message: impl Into<String>) -> Self {
        Self::InvalidParameters {
            message: message.into(),
        }
    }
}
