#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CSV codec for candidate files.
//!
//! [`parse`] turns raw upload text into a [`ParsedTable`] (first non-blank
//! line is the header, short rows are padded) and [`serialize`] writes a
//! header plus rows back out with every field double-quoted.
//!
//! Both directions go through the `csv` crate, so quoted fields may contain
//! commas, embedded quotes are written as `""`, and `\r\n` and `\n` line
//! endings are both accepted.

mod parse;
mod write;

pub use candidate_finder_candidate_models::ParsedTable;
pub use parse::parse;
pub use write::serialize;

use thiserror::Error;

/// Errors from CSV parsing or serialization.
#[derive(Debug, Error)]
pub enum CsvError {
    /// The input contained no non-blank lines.
    #[error("CSV file is empty")]
    EmptyInput,

    /// The `csv` reader or writer rejected the data.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Flushing the serialized output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialized output was not valid UTF-8.
    #[error("Serialized CSV is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
