#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Location key normalization for candidate records.
//!
//! Candidate files describe locations either as separate `city` / `state`
//! columns or as a single free-form `address` column, in many spellings:
//! - Full state names: `"Boston", "Massachusetts"`
//! - Punctuated abbreviations: `"St. Louis", "Mo."`
//! - Free-form addresses: `"Austin, TX"`
//!
//! This crate canonicalizes these into the lookup keys used by the
//! coordinate directory (`"Boston, MA"`, `"Saint Louis, MO"`).

pub mod columns;
pub mod normalize;
pub mod states;

pub use columns::{ColumnMap, NoLocationColumnsError};
pub use normalize::{
    NormalizeOptions, canonicalize_key, city_state_key, normalize_city, normalize_state,
    strip_punctuation,
};
