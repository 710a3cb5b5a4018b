//! Serializing rows back to CSV text.

use crate::CsvError;

/// Writes the header row followed by every data row, double-quoting every
/// field and terminating each line with `\n`.
///
/// Embedded double quotes are escaped as `""`.
///
/// # Errors
///
/// Returns [`CsvError`] if the writer fails to flush.
pub fn serialize(headers: &[String], rows: &[Vec<String>]) -> Result<String, CsvError> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CsvError::Io(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}
