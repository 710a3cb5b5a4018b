//! Parsing raw CSV text into a [`ParsedTable`].

use candidate_finder_candidate_models::ParsedTable;

use crate::CsvError;

/// Byte-order mark some spreadsheet exports prepend to UTF-8 files.
const BOM: char = '\u{feff}';

/// Parses CSV text into headers and rows.
///
/// Lines whose text is blank or whitespace-only are dropped; a quoted empty
/// field such as `""` is a record, not a blank line. The first remaining
/// line is the header row. Rows shorter than the header are padded with empty
/// strings; fields beyond the header width are dropped.
///
/// # Errors
///
/// Returns [`CsvError::EmptyInput`] if no non-blank line remains, or
/// [`CsvError::Csv`] if the reader rejects the input.
pub fn parse(text: &str) -> Result<ParsedTable, CsvError> {
    let text = text.strip_prefix(BOM).unwrap_or(text);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut lines: Vec<Vec<String>> = Vec::new();
    for result in reader.records() {
        let record = result?;
        if is_blank_line(text, &record) {
            continue;
        }
        lines.push(record.iter().map(str::to_owned).collect());
    }

    let mut lines = lines.into_iter();
    let Some(headers) = lines.next() else {
        return Err(CsvError::EmptyInput);
    };

    let width = headers.len();
    let rows: Vec<Vec<String>> = lines
        .enumerate()
        .map(|(i, mut row)| {
            if row.len() > width {
                log::warn!(
                    "Row {} has {} fields but the header has {width}; extra fields dropped",
                    i + 1,
                    row.len()
                );
                row.truncate(width);
            }
            row.resize(width, String::new());
            row
        })
        .collect();

    log::debug!("Parsed CSV with {width} columns and {} rows", rows.len());

    Ok(ParsedTable { headers, rows })
}

/// Whether `record` came from a line whose raw text is whitespace only.
fn is_blank_line(text: &str, record: &csv::StringRecord) -> bool {
    if record.len() > 1 || record.iter().any(|field| !field.trim().is_empty()) {
        return false;
    }

    // The reported position can sit on line terminators skipped before the
    // record starts.
    record
        .position()
        .and_then(|pos| usize::try_from(pos.byte()).ok())
        .and_then(|start| text.get(start..))
        .and_then(|rest| rest.trim_start_matches(['\r', '\n']).lines().next())
        .is_none_or(|line| line.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn parses_header_and_rows() {
        let table = parse("name,city,state\nAda,Boston,MA\nBob,Chicago,IL\n").unwrap();
        assert_eq!(table.headers, strings(&["name", "city", "state"]));
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1], strings(&["Bob", "Chicago", "IL"]));
    }

    #[test]
    fn quoted_fields_keep_commas() {
        let table = parse("name,address\n\"Smith, Jane\",\"Austin, TX\"\n").unwrap();
        assert_eq!(table.rows[0], strings(&["Smith, Jane", "Austin, TX"]));
    }

    #[test]
    fn accepts_crlf_and_drops_blank_lines() {
        let text = "\r\n  \r\nname,city\r\n\r\nAda,Boston\r\n   \r\nBob,Denver\r\n";
        let table = parse(text).unwrap();
        assert_eq!(table.headers, strings(&["name", "city"]));
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1], strings(&["Bob", "Denver"]));
    }

    #[test]
    fn pads_short_rows() {
        let table = parse("name,city,state\nAda\n").unwrap();
        assert_eq!(table.rows[0], strings(&["Ada", "", ""]));
    }

    #[test]
    fn truncates_long_rows() {
        let table = parse("name,city\nAda,Boston,extra\n").unwrap();
        assert_eq!(table.rows[0], strings(&["Ada", "Boston"]));
    }

    #[test]
    fn header_only_yields_no_rows() {
        let table = parse("city,state\n").unwrap();
        assert_eq!(table.headers, strings(&["city", "state"]));
        assert!(table.rows.is_empty());
    }

    #[test]
    fn strips_byte_order_mark() {
        let table = parse("\u{feff}city,state\nBoston,MA\n").unwrap();
        assert_eq!(table.headers[0], "city");
    }

    #[test]
    fn quoted_empty_field_is_a_row() {
        let table = parse("address\n\"\"\nBoston\n").unwrap();
        assert_eq!(table.rows, vec![strings(&[""]), strings(&["Boston"])]);
    }

    #[test]
    fn quoted_empty_field_after_blank_line_is_a_row() {
        let table = parse("address\r\n\r\n\"\"\r\n").unwrap();
        assert_eq!(table.rows, vec![strings(&[""])]);
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(matches!(parse(""), Err(CsvError::EmptyInput)));
        assert!(matches!(parse("\n\r\n   \n"), Err(CsvError::EmptyInput)));
    }
}
