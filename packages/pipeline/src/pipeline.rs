//! The candidate pipeline state machine.

use std::collections::BTreeSet;
use std::sync::Arc;

use candidate_finder_candidate_models::{
    Candidate, IngestSummary, ParsedTable, RunResult, RunSummary,
};
use candidate_finder_directory::CoordinateDirectory;
use candidate_finder_location::ColumnMap;

use crate::{PipelineConfig, PipelineError, RunParameters};

/// An ingested file with its resolved candidates.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    /// The parsed file.
    pub table: ParsedTable,
    /// Where the location columns are.
    pub columns: ColumnMap,
    /// One candidate per data row, in file order.
    pub candidates: Vec<Candidate>,
    /// Match statistics from ingestion.
    pub summary: IngestSummary,
}

/// Where the pipeline is in its lifecycle.
#[derive(Debug, Clone, Default)]
pub enum PipelineState {
    /// Nothing ingested.
    #[default]
    Empty,
    /// A file is ingested and ready to run.
    Loaded(Box<LoadedTable>),
    /// A run has completed against the ingested file.
    Filtered {
        /// The ingested file.
        loaded: Box<LoadedTable>,
        /// The parameters of the run.
        params: RunParameters,
        /// Candidates within the radius.
        result: RunResult,
    },
}

/// Rows ready to be saved as a CSV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedCsv {
    /// Suggested file name.
    pub file_name: String,
    /// Serialized CSV text.
    pub contents: String,
    /// Number of data rows written.
    pub row_count: usize,
}

impl ExportedCsv {
    /// Status text for a completed export.
    #[must_use]
    pub fn status(&self) -> String {
        format!(
            "File saved successfully!\nExported {} candidates to {}",
            self.row_count, self.file_name
        )
    }
}

/// Ingests candidate files, runs distance filters, and exports results.
///
/// Owns its coordinate directory handle; nothing is process-global.
#[derive(Debug, Default)]
pub struct CandidatePipeline {
    config: PipelineConfig,
    directory: Option<Arc<CoordinateDirectory>>,
    directory_error: Option<String>,
    state: PipelineState,
}

impl CandidatePipeline {
    /// Creates a pipeline with no directory loaded yet.
    #[must_use]
    pub const fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            directory: None,
            directory_error: None,
            state: PipelineState::Empty,
        }
    }

    /// Creates a pipeline with a directory already available.
    #[must_use]
    pub fn with_directory(config: PipelineConfig, directory: Arc<CoordinateDirectory>) -> Self {
        let mut pipeline = Self::new(config);
        pipeline.set_directory(directory);
        pipeline
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// The current state.
    #[must_use]
    pub const fn state(&self) -> &PipelineState {
        &self.state
    }

    /// Whether a coordinate directory is available for matching.
    #[must_use]
    pub const fn is_directory_ready(&self) -> bool {
        self.directory.is_some()
    }

    /// The ingested candidates, if any.
    #[must_use]
    pub fn candidates(&self) -> Option<&[Candidate]> {
        self.loaded().map(|loaded| loaded.candidates.as_slice())
    }

    /// The most recent run result, if the pipeline is filtered.
    #[must_use]
    pub const fn run_result(&self) -> Option<&RunResult> {
        match &self.state {
            PipelineState::Filtered { result, .. } => Some(result),
            _ => None,
        }
    }

    fn loaded(&self) -> Option<&LoadedTable> {
        match &self.state {
            PipelineState::Empty => None,
            PipelineState::Loaded(loaded) | PipelineState::Filtered { loaded, .. } => {
                Some(&**loaded)
            }
        }
    }

    /// Drops any ingested file and run result.
    pub fn reset(&mut self) {
        self.state = PipelineState::Empty;
    }

    /// Installs a freshly loaded directory.
    ///
    /// An already-ingested file is re-matched against it and any previous
    /// run result is discarded.
    pub fn set_directory(&mut self, directory: Arc<CoordinateDirectory>) {
        self.directory = Some(directory);
        self.directory_error = None;

        let state = std::mem::take(&mut self.state);
        self.state = match state {
            PipelineState::Empty => PipelineState::Empty,
            PipelineState::Loaded(loaded) | PipelineState::Filtered { loaded, .. } => {
                let LoadedTable { table, columns, .. } = *loaded;
                log::info!(
                    "Re-matching {} candidates against new directory",
                    table.row_count()
                );
                PipelineState::Loaded(Box::new(self.resolve(table, columns)))
            }
        };
    }

    /// Records a directory load failure. Matching stays disabled and any
    /// ingested state is dropped until a directory is installed again.
    pub fn set_directory_unavailable(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        log::error!("Coordinate directory unavailable: {reason}");
        self.directory = None;
        self.directory_error = Some(reason);
        self.reset();
    }

    /// Parses CSV text and resolves every row against the directory.
    ///
    /// Any previous state is discarded first, so a failed ingest leaves the
    /// pipeline [`PipelineState::Empty`].
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::DirectoryUnavailable`] if no directory is
    /// loaded, [`PipelineError::EmptyInput`] for blank input, or
    /// [`PipelineError::NoLocationColumns`] if the header has no usable
    /// location columns.
    pub fn ingest(&mut self, csv_text: &str) -> Result<IngestSummary, PipelineError> {
        self.reset();

        if self.directory.is_none() {
            return Err(PipelineError::DirectoryUnavailable {
                reason: self
                    .directory_error
                    .clone()
                    .unwrap_or_else(|| "not loaded yet. Please try again.".to_string()),
            });
        }

        let table = candidate_finder_csv::parse(csv_text)?;
        let columns = ColumnMap::detect(&table.headers)?;

        let loaded = self.resolve(table, columns);
        let summary = loaded.summary.clone();

        log::info!(
            "Ingested {} candidates: {} unique locations, {} matched, {} unmatched",
            summary.candidate_count,
            summary.unique_locations(),
            summary.matched.len(),
            summary.unmatched.len()
        );

        self.state = PipelineState::Loaded(Box::new(loaded));
        Ok(summary)
    }

    /// Derives keys and coordinates for every row.
    fn resolve(&self, table: ParsedTable, columns: ColumnMap) -> LoadedTable {
        let options = self.config.normalize_options();
        let mut seen: BTreeSet<String> = BTreeSet::new();
        let mut summary = IngestSummary {
            candidate_count: table.row_count(),
            ..IngestSummary::default()
        };

        let candidates: Vec<Candidate> = table
            .rows
            .iter()
            .enumerate()
            .map(|(row_index, row)| {
                let key = columns.location_key(row, options);
                let coordinates = self.directory.as_ref().and_then(|d| d.lookup(&key));

                if !key.is_empty() && seen.insert(key.clone()) {
                    if coordinates.is_some() {
                        summary.matched.push(key.clone());
                    } else {
                        summary.unmatched.push(key.clone());
                    }
                }

                let mut candidate = Candidate::new(row_index, row.clone(), key);
                candidate.coordinates = coordinates;
                candidate
            })
            .collect();

        LoadedTable {
            table,
            columns,
            candidates,
            summary,
        }
    }

    /// Computes distances from the target and keeps candidates within the
    /// radius. Unmatched candidates are excluded, never an error.
    ///
    /// May be repeated; each run replaces the previous result.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::NoDataIngested`] if no file is ingested.
    pub fn run(&mut self, params: RunParameters) -> Result<RunSummary, PipelineError> {
        let state = std::mem::take(&mut self.state);
        let mut loaded = match state {
            PipelineState::Empty => return Err(PipelineError::NoDataIngested),
            PipelineState::Loaded(loaded) | PipelineState::Filtered { loaded, .. } => loaded,
        };

        candidate_finder_distance::annotate_distances(&mut loaded.candidates, params.target);
        let result = candidate_finder_distance::filter_within_radius(
            &loaded.candidates,
            params.target,
            params.max_miles,
        );

        log::info!(
            "Run from ({}) within {} miles: {} of {} candidates",
            params.target,
            params.max_miles,
            result.len(),
            loaded.candidates.len()
        );

        let summary = RunSummary::new(
            loaded.candidates.len(),
            params.max_miles,
            &result,
            self.config.preview_limit,
        );

        self.state = PipelineState::Filtered {
            loaded,
            params,
            result,
        };

        Ok(summary)
    }

    /// Parses free-text run parameters, then [`Self::run`]s.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::NoDataIngested`] before any ingest, or
    /// [`PipelineError::InvalidParameters`] for unparseable input.
    pub fn run_text(&mut self, target: &str, max_miles: &str) -> Result<RunSummary, PipelineError> {
        if matches!(self.state, PipelineState::Empty) {
            return Err(PipelineError::NoDataIngested);
        }
        self.run(RunParameters::parse(target, max_miles)?)
    }

    /// Serializes the latest run result with the original columns plus a
    /// distance column formatted to two decimals.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::NoRunResults`] unless the last run kept at
    /// least one candidate.
    pub fn export(&self) -> Result<ExportedCsv, PipelineError> {
        let PipelineState::Filtered { loaded, result, .. } = &self.state else {
            return Err(PipelineError::NoRunResults);
        };
        if result.is_empty() {
            return Err(PipelineError::NoRunResults);
        }

        let mut headers = loaded.table.headers.clone();
        headers.push(self.config.distance_column.clone());

        let rows: Vec<Vec<String>> = result
            .iter()
            .map(|candidate| {
                let mut row = candidate.fields.clone();
                row.push(format!("{:.2}", candidate.distance_miles.unwrap_or_default()));
                row
            })
            .collect();

        let contents = candidate_finder_csv::serialize(&headers, &rows)?;
        log::info!(
            "Exported {} candidates to {}",
            rows.len(),
            self.config.export_file_name
        );

        Ok(ExportedCsv {
            file_name: self.config.export_file_name.clone(),
            contents,
            row_count: rows.len(),
        })
    }
}
