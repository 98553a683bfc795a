//! CSV reader producing a [`Document`].
//!
//! The first non-blank row is the header. Every following non-blank row
//! becomes one [`Record`] whose values are the row's fields, untouched.
//! Rows whose width differs from the header are accepted and logged.

use std::io::Read;
use std::path::Path;

use crate::config::DELIMITER;
use crate::error::{CsvError, CsvResult};
use crate::logs::log_warning;
use crate::models::{Document, Record};

/// Parse CSV text into a document.
///
/// # Example
/// ```
/// use convertor::csv_to_document;
///
/// let doc = csv_to_document("name,age\nAlice,30\nBob,25\n").unwrap();
///
/// assert_eq!(doc.len(), 2);
/// assert_eq!(doc.headers(), ["name", "age"]);
/// assert_eq!(doc.records()[1].get("age").and_then(|v| v.as_str()), Some("25"));
/// ```
pub fn csv_to_document(csv: &str) -> CsvResult<Document> {
    parse_csv(csv.as_bytes())
}

/// Parse CSV from a reader into a document.
///
/// The reader is consumed completely before returning.
pub fn parse_csv<R: Read>(reader: R) -> CsvResult<Document> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .map_err(CsvError::from_csv)?
        .iter()
        .map(String::from)
        .collect();

    let mut document = Document::new(headers);

    if document.headers().is_empty() {
        log_warning("Input has no header row; writing an empty array");
        return Ok(document);
    }

    for result in rdr.records() {
        let row = result.map_err(CsvError::from_csv)?;
        let fields: Vec<&str> = row.iter().collect();
        let record = Record::from_row(document.headers(), &fields);

        if fields.len() != document.headers().len() {
            let line = row.position().map(|p| p.line()).unwrap_or(0);
            log_warning(format!(
                "Line {}: {} fields, header has {}",
                line,
                fields.len(),
                document.headers().len()
            ));
            document.push_ragged(record);
        } else {
            document.push(record);
        }
    }

    Ok(document)
}

/// Read and parse a CSV file.
///
/// The file handle is closed before this returns, on success or error.
pub fn read_document<P: AsRef<Path>>(path: P) -> CsvResult<Document> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => CsvError::NotFound {
            path: path.to_path_buf(),
        },
        _ => CsvError::Io(e),
    })?;
    parse_csv(file)
}
