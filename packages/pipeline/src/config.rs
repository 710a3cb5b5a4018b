//! Pipeline configuration loaded from TOML.
//!
//! Defaults are embedded at compile time from `config/default.toml`; a
//! user-supplied file only needs to set the keys it changes.

use std::path::Path;

use candidate_finder_location::NormalizeOptions;
use serde::Deserialize;

use crate::PipelineError;

/// The embedded default configuration.
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../config/default.toml");

/// Settings for ingestion, run summaries, and export.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PipelineConfig {
    /// Expand `St`, `Ft`, `Mt`, `Jct`, `Centre`, and `Boro` in city names.
    pub expand_city_abbreviations: bool,
    /// Header of the distance column appended on export.
    pub distance_column: String,
    /// Suggested file name for exported results.
    pub export_file_name: String,
    /// Number of closest candidates listed in a run summary.
    pub preview_limit: usize,
}

impl Default for PipelineConfig {
    /// The embedded `config/default.toml`.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed (a compile-time guarantee
    /// since the file is embedded and covered by tests).
    fn default() -> Self {
        toml::de::from_str(DEFAULT_CONFIG_TOML)
            .unwrap_or_else(|e| panic!("Failed to parse embedded default config: {e}"))
    }
}

impl PipelineConfig {
    /// Parses a configuration from TOML text, layered over the embedded
    /// defaults so missing keys keep their default values.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Config`] if the TOML is malformed or a key
    /// has the wrong type.
    pub fn from_toml(text: &str) -> Result<Self, PipelineError> {
        let mut table: toml::Table = toml::de::from_str(DEFAULT_CONFIG_TOML)?;
        table.extend(toml::de::from_str::<toml::Table>(text)?);
        Ok(toml::Value::Table(table).try_into()?)
    }

    /// Reads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Read`] if the file cannot be read, or
    /// [`PipelineError::Config`] if it does not parse.
    pub async fn load(path: &Path) -> Result<Self, PipelineError> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| PipelineError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let config = Self::from_toml(&text)?;
        log::debug!("Loaded pipeline config from {}: {config:?}", path.display());
        Ok(config)
    }

    /// Normalizer settings derived from this configuration.
    #[must_use]
    pub const fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            expand_city_abbreviations: self.expand_city_abbreviations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_come_from_embedded_file() {
        let config = PipelineConfig::default();
        assert!(config.expand_city_abbreviations);
        assert_eq!(config.distance_column, "Distance (miles)");
        assert_eq!(config.export_file_name, "filtered_candidates.csv");
        assert_eq!(config.preview_limit, 10);
        assert_eq!(PipelineConfig::from_toml("").unwrap(), config);
    }

    #[test]
    fn embedded_file_sets_every_key() {
        let table: toml::Table = toml::de::from_str(DEFAULT_CONFIG_TOML).unwrap();
        for key in [
            "expand_city_abbreviations",
            "distance_column",
            "export_file_name",
            "preview_limit",
        ] {
            assert!(table.contains_key(key), "missing {key}");
        }
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let config = PipelineConfig::from_toml("preview_limit = 3\n").unwrap();
        assert_eq!(config.preview_limit, 3);
        assert_eq!(config.distance_column, "Distance (miles)");
        assert!(config.expand_city_abbreviations);
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(matches!(
            PipelineConfig::from_toml("preview_limit = \"ten\"\n"),
            Err(PipelineError::Config(_))
        ));
    }

    #[test]
    fn maps_to_normalize_options() {
        let config = PipelineConfig::from_toml("expand_city_abbreviations = false\n").unwrap();
        assert!(!config.normalize_options().expand_city_abbreviations);
    }
}
