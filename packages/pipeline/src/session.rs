//! Generation-guarded access to a [`CandidatePipeline`].
//!
//! Reading a file and loading the directory are the two asynchronous steps.
//! A host starts either with a `begin_*` call, which hands out a
//! [`Generation`] ticket, and finishes with the matching `complete_*` call.
//! Only the most recent ticket commits; older completions are discarded as
//! [`Completion::Stale`].

use std::path::Path;
use std::sync::Arc;

use candidate_finder_candidate_models::IngestSummary;
use candidate_finder_directory::{CoordinateDirectory, DirectoryError};

use crate::{CandidatePipeline, PipelineError, read_candidate_file};

/// Ticket identifying one asynchronous operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    /// The raw counter value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// Outcome of completing an asynchronous operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion<T> {
    /// The ticket was current and the result was applied.
    Committed(T),
    /// A newer operation started since this ticket was issued; the result
    /// was discarded.
    Stale,
}

impl<T> Completion<T> {
    /// The committed value, if any.
    pub fn committed(self) -> Option<T> {
        match self {
            Self::Committed(value) => Some(value),
            Self::Stale => None,
        }
    }
}

/// One interactive session: a pipeline plus its generation counters.
#[derive(Debug, Default)]
pub struct Session {
    pipeline: CandidatePipeline,
    file_generation: u64,
    directory_generation: u64,
}

impl Session {
    /// Wraps an existing pipeline.
    #[must_use]
    pub const fn new(pipeline: CandidatePipeline) -> Self {
        Self {
            pipeline,
            file_generation: 0,
            directory_generation: 0,
        }
    }

    /// The wrapped pipeline.
    #[must_use]
    pub const fn pipeline(&self) -> &CandidatePipeline {
        &self.pipeline
    }

    /// Mutable access for synchronous operations (`run`, `export`).
    pub fn pipeline_mut(&mut self) -> &mut CandidatePipeline {
        &mut self.pipeline
    }

    /// Starts a directory load, superseding any load still in flight.
    pub fn begin_directory_load(&mut self) -> Generation {
        self.directory_generation += 1;
        Generation(self.directory_generation)
    }

    /// Applies a finished directory load if `ticket` is still current.
    ///
    /// Returns the number of directory entries on success.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::DirectoryUnavailable`] if the load failed;
    /// matching is disabled until a later load succeeds.
    pub fn complete_directory_load(
        &mut self,
        ticket: Generation,
        result: Result<CoordinateDirectory, DirectoryError>,
    ) -> Result<Completion<usize>, PipelineError> {
        if ticket.0 != self.directory_generation {
            log::debug!(
                "Discarding stale directory load (generation {} < {})",
                ticket.0,
                self.directory_generation
            );
            return Ok(Completion::Stale);
        }

        match result {
            Ok(directory) => {
                let entries = directory.len();
                self.pipeline.set_directory(Arc::new(directory));
                Ok(Completion::Committed(entries))
            }
            Err(e) => {
                let reason = e.to_string();
                self.pipeline.set_directory_unavailable(reason.clone());
                Err(PipelineError::DirectoryUnavailable { reason })
            }
        }
    }

    /// Starts reading a new file. Any previously ingested file and run
    /// result are dropped immediately.
    pub fn begin_file(&mut self) -> Generation {
        self.file_generation += 1;
        self.pipeline.reset();
        Generation(self.file_generation)
    }

    /// Ingests a finished file read if `ticket` is still current.
    ///
    /// # Errors
    ///
    /// Returns the read error, or any error from
    /// [`CandidatePipeline::ingest`]. The pipeline is left empty in either
    /// case.
    pub fn complete_file(
        &mut self,
        ticket: Generation,
        text: Result<String, PipelineError>,
    ) -> Result<Completion<IngestSummary>, PipelineError> {
        if ticket.0 != self.file_generation {
            log::debug!(
                "Discarding stale file read (generation {} < {})",
                ticket.0,
                self.file_generation
            );
            return Ok(Completion::Stale);
        }

        match text {
            Ok(text) => self.pipeline.ingest(&text).map(Completion::Committed),
            Err(e) => {
                self.pipeline.reset();
                Err(e)
            }
        }
    }

    /// Loads the directory at `path` and installs it.
    ///
    /// # Errors
    ///
    /// See [`Self::complete_directory_load`].
    pub async fn load_directory(
        &mut self,
        path: &Path,
    ) -> Result<Completion<usize>, PipelineError> {
        let ticket = self.begin_directory_load();
        let options = self.pipeline.config().normalize_options();
        let result = CoordinateDirectory::load(path, options).await;
        self.complete_directory_load(ticket, result)
    }

    /// Reads and ingests the candidate file at `path`.
    ///
    /// # Errors
    ///
    /// See [`Self::complete_file`].
    pub async fn open_file(
        &mut self,
        path: &Path,
    ) -> Result<Completion<IngestSummary>, PipelineError> {
        let ticket = self.begin_file();
        let text = read_candidate_file(path).await;
        self.complete_file(ticket, text)
    }
}

#[cfg(test)]
mod tests {
    use candidate_finder_location::NormalizeOptions;

    use super::*;
    use crate::{PipelineConfig, PipelineState, RunParameters};

    const DIRECTORY: &str = r#"{ "Boston, MA": [42.36, -71.06], "Chicago, IL": [41.88, -87.63] }"#;

    fn directory() -> CoordinateDirectory {
        CoordinateDirectory::from_json(DIRECTORY, NormalizeOptions::default()).unwrap()
    }

    fn ready_session() -> Session {
        let mut session = Session::new(CandidatePipeline::new(PipelineConfig::default()));
        let ticket = session.begin_directory_load();
        session
            .complete_directory_load(ticket, Ok(directory()))
            .unwrap();
        session
    }

    #[test]
    fn generations_increase() {
        let mut session = Session::default();
        let first = session.begin_file();
        let second = session.begin_file();
        assert!(second > first);
        assert_eq!(second.value(), 2);
    }

    #[test]
    fn stale_file_read_does_not_overwrite_newer_ingest() {
        let mut session = ready_session();

        let slow = session.begin_file();
        let fast = session.begin_file();

        let summary = session
            .complete_file(fast, Ok("city,state\nChicago,IL\n".to_string()))
            .unwrap()
            .committed()
            .unwrap();
        assert_eq!(summary.matched, vec!["Chicago, IL"]);

        let late = session
            .complete_file(slow, Ok("city,state\nBoston,MA\nBoston,MA\n".to_string()))
            .unwrap();
        assert_eq!(late, Completion::Stale);

        let candidates = session.pipeline().candidates().unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].location_key, "Chicago, IL");
    }

    #[test]
    fn stale_read_error_is_ignored() {
        let mut session = ready_session();
        let slow = session.begin_file();
        let fast = session.begin_file();
        session
            .complete_file(fast, Ok("city,state\nBoston,MA\n".to_string()))
            .unwrap();

        let late = session
            .complete_file(slow, Err(PipelineError::EmptyInput))
            .unwrap();
        assert_eq!(late, Completion::Stale);
        assert!(session.pipeline().candidates().is_some());
    }

    #[test]
    fn new_file_selection_drops_previous_results() {
        let mut session = ready_session();
        let ticket = session.begin_file();
        session
            .complete_file(ticket, Ok("city,state\nBoston,MA\n".to_string()))
            .unwrap();
        session
            .pipeline_mut()
            .run(RunParameters::new(42.36, -71.06, 10.0).unwrap())
            .unwrap();
        assert!(session.pipeline().run_result().is_some());

        let _ticket = session.begin_file();
        assert!(matches!(session.pipeline().state(), PipelineState::Empty));
    }

    #[test]
    fn stale_directory_load_is_discarded() {
        let mut session = Session::default();
        let slow = session.begin_directory_load();
        let fast = session.begin_directory_load();

        session
            .complete_directory_load(fast, Ok(CoordinateDirectory::default()))
            .unwrap();
        let late = session
            .complete_directory_load(slow, Ok(directory()))
            .unwrap();
        assert_eq!(late, Completion::Stale);

        let ticket = session.begin_file();
        let summary = session
            .complete_file(ticket, Ok("city,state\nBoston,MA\n".to_string()))
            .unwrap()
            .committed()
            .unwrap();
        assert_eq!(summary.unmatched, vec!["Boston, MA"]);
    }

    #[test]
    fn failed_directory_load_blocks_ingest() {
        let mut session = Session::default();
        let ticket = session.begin_directory_load();
        let failure = CoordinateDirectory::from_json("not json", NormalizeOptions::default());
        let err = session
            .complete_directory_load(ticket, failure)
            .unwrap_err();
        assert!(matches!(err, PipelineError::DirectoryUnavailable { .. }));

        let ticket = session.begin_file();
        let err = session
            .complete_file(ticket, Ok("city,state\nBoston,MA\n".to_string()))
            .unwrap_err();
        assert!(matches!(err, PipelineError::DirectoryUnavailable { .. }));
    }

    #[tokio::test]
    async fn loads_directory_and_file_from_disk() {
        let dir = std::env::temp_dir();
        let id = std::process::id();
        let directory_path = dir.join(format!("candidate_finder_session_{id}.json"));
        let csv_path = dir.join(format!("candidate_finder_session_{id}.csv"));
        tokio::fs::write(&directory_path, DIRECTORY).await.unwrap();
        tokio::fs::write(&csv_path, "name,city,state\nAda,Boston,MA\nBo,Denver,CO\n")
            .await
            .unwrap();

        let mut session = Session::default();
        let entries = session.load_directory(&directory_path).await.unwrap();
        assert_eq!(entries, Completion::Committed(2));

        let summary = session
            .open_file(&csv_path)
            .await
            .unwrap()
            .committed()
            .unwrap();
        assert_eq!(summary.candidate_count, 2);
        assert_eq!(summary.unmatched, vec!["Denver, CO"]);

        tokio::fs::remove_file(&directory_path).await.unwrap();
        tokio::fs::remove_file(&csv_path).await.unwrap();
    }

    #[tokio::test]
    async fn wrong_file_type_leaves_session_empty() {
        let mut session = ready_session();
        let err = session
            .open_file(Path::new("candidates.xlsx"))
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::WrongFileType { .. }));
        assert!(session.pipeline().candidates().is_none());
    }
}
