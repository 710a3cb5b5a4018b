//! Reading user-selected candidate files.

use std::path::Path;

use crate::PipelineError;

/// Rejects files whose name does not end in `.csv` (any case).
///
/// # Errors
///
/// Returns [`PipelineError::WrongFileType`] for non-CSV file names.
pub fn check_file_type(path: &Path) -> Result<(), PipelineError> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    if file_name.to_lowercase().ends_with(".csv") {
        Ok(())
    } else {
        Err(PipelineError::WrongFileType { file_name })
    }
}

/// Validates the file type and reads the file as UTF-8 text.
///
/// # Errors
///
/// Returns [`PipelineError::WrongFileType`] for non-CSV names, or
/// [`PipelineError::Read`] if the file cannot be read.
pub async fn read_candidate_file(path: &Path) -> Result<String, PipelineError> {
    check_file_type(path)?;

    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| PipelineError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    log::debug!("Read {} bytes from {}", text.len(), path.display());
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_csv_extension_in_any_case() {
        assert!(check_file_type(Path::new("candidates.csv")).is_ok());
        assert!(check_file_type(Path::new("/tmp/Candidates.CSV")).is_ok());
    }

    #[test]
    fn rejects_other_extensions() {
        let err = check_file_type(Path::new("candidates.xlsx")).unwrap_err();
        let PipelineError::WrongFileType { file_name } = &err else {
            panic!("expected a file type error, got {err:?}");
        };
        assert_eq!(file_name, "candidates.xlsx");
        assert!(check_file_type(Path::new("csv")).is_err());
    }

    #[tokio::test]
    async fn wrong_type_is_reported_before_reading() {
        let err = read_candidate_file(Path::new("/definitely/missing/file.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::WrongFileType { .. }));
    }

    #[tokio::test]
    async fn missing_file_is_a_read_error() {
        let err = read_candidate_file(Path::new("/definitely/missing/file.csv"))
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::Read { .. }));
    }
}
