//! End-to-end conversion: read the CSV, build the document, write the JSON.
//!
//! # Example
//!
//! ```rust,no_run
//! use convertor::{convert, ConvertConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let summary = convert(&ConvertConfig::default())?;
//!     println!("{}", summary.confirmation());
//!     Ok(())
//! }
//! ```

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::ConvertConfig;
use crate::error::ConvertResult;
use crate::logs::{log_info, log_info_indent, log_success};
use crate::parser::read_document;
use crate::writer::write_document;

/// Outcome of a successful conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertSummary {
    /// File that was written
    pub output_path: PathBuf,
    /// Records in the output array
    pub records: usize,
    /// Header columns
    pub columns: Vec<String>,
    /// Rows whose width differed from the header
    pub ragged_rows: usize,
}

impl ConvertSummary {
    /// One-line message reported on success.
    pub fn confirmation(&self) -> String {
        format!(
            "CSV file has been converted to JSON and saved to {}",
            self.output_path.display()
        )
    }
}

/// Convert `config.input_path` into `config.output_path`.
///
/// The input is parsed completely and its handle closed before the
/// output is created. On any error the output is left untouched.
pub fn convert(config: &ConvertConfig) -> ConvertResult<ConvertSummary> {
    log_info(format!("Reading {}", config.input_path.display()));
    let document = read_document(&config.input_path)?;
    log_success(format!(
        "Read {} records with {} columns",
        document.len(),
        document.headers().len()
    ));
    for (i, col) in document.headers().iter().enumerate() {
        log_info_indent(format!("[{:2}] {}", i + 1, col), 1);
    }

    log_info(format!("Writing {}", config.output_path.display()));
    write_document(&document, &config.output_path, config)?;
    log_success(format!("Wrote {}", config.output_path.display()));

    Ok(ConvertSummary {
        output_path: config.output_path.clone(),
        records: document.len(),
        columns: document.headers().to_vec(),
        ragged_rows: document.ragged_rows(),
    })
}

/// [`convert`] with explicit paths and default formatting.
pub fn convert_files(input: &Path, output: &Path) -> ConvertResult<ConvertSummary> {
    convert(&ConvertConfig::with_paths(input, output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConvertError, CsvError, WriteError};
    use proptest::prelude::*;
    use serde_json::Value;
    use std::fs;
    use tempfile::tempdir;

    fn run(csv: &str) -> (ConvertSummary, String) {
        let dir = tempdir().unwrap();
        let input = dir.path().join("output_hhi_cpi.csv");
        let output = dir.path().join("output_hhi_cpi.json");
        fs::write(&input, csv).unwrap();

        let summary = convert_files(&input, &output).unwrap();
        let json = fs::read_to_string(&output).unwrap();
        (summary, json)
    }

    #[test]
    fn test_name_age_scenario() {
        let (summary, json) = run("name,age\nAlice,30\nBob,25\n");

        let expected = "[\n    {\n        \"name\": \"Alice\",\n        \"age\": \"30\"\n    },\n    {\n        \"name\": \"Bob\",\n        \"age\": \"25\"\n    }\n]";
        assert_eq!(json, expected);
        assert_eq!(summary.records, 2);
        assert_eq!(summary.columns, vec!["name", "age"]);
        assert_eq!(summary.ragged_rows, 0);
    }

    #[test]
    fn test_header_only_writes_empty_array() {
        let (summary, json) = run("date,hhi,cpi\n");
        assert_eq!(json, "[]");
        assert_eq!(summary.records, 0);
    }

    #[test]
    fn test_missing_input_writes_nothing() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("output_hhi_cpi.csv");
        let output = dir.path().join("output_hhi_cpi.json");

        let err = convert_files(&input, &output).unwrap_err();

        assert!(err.is_not_found());
        assert!(!output.exists());
    }

    #[test]
    fn test_parse_error_keeps_previous_output() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.json");
        fs::write(&input, b"name\n\xff\n").unwrap();
        fs::write(&output, "previous").unwrap();

        let err = convert_files(&input, &output).unwrap_err();

        assert!(matches!(err, ConvertError::Csv(CsvError::Parse { .. })));
        assert_eq!(fs::read_to_string(&output).unwrap(), "previous");
    }

    #[test]
    fn test_unwritable_destination() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.csv");
        fs::write(&input, "a\n1\n").unwrap();
        let output = dir.path().join("missing-dir").join("out.json");

        let err = convert_files(&input, &output).unwrap_err();
        assert!(matches!(err, ConvertError::Write(WriteError::Io { .. })));
    }

    #[test]
    fn test_idempotent_output() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.json");
        fs::write(&input, "date,hhi,cpi\n2024-01-01,1520.4,308.4\n2024-02-01,1498.0,309.7\n").unwrap();

        convert_files(&input, &output).unwrap();
        let first = fs::read(&output).unwrap();
        convert_files(&input, &output).unwrap();
        let second = fs::read(&output).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_confirmation_line() {
        let summary = ConvertSummary {
            output_path: PathBuf::from("output_hhi_cpi.json"),
            records: 0,
            columns: vec![],
            ragged_rows: 0,
        };
        assert_eq!(
            summary.confirmation(),
            "CSV file has been converted to JSON and saved to output_hhi_cpi.json"
        );
    }

    #[test]
    fn test_ragged_rows_counted() {
        let (summary, json) = run("a,b\n1\n1,2\n");

        assert_eq!(summary.records, 2);
        assert_eq!(summary.ragged_rows, 1);
        assert!(json.contains("\"b\": null"));
    }

    fn field() -> impl Strategy<Value = String> {
        prop_oneof![
            "[a-zA-Z0-9 .-]{0,12}",
            "[a-z]{1,5},[a-z]{1,5}",
            "[a-z]{1,5}\"[a-z]{1,5}",
            "[a-z]{1,5}\n[a-z]{1,5}",
            "[à-ÿ]{1,6}",
        ]
    }

    fn table() -> impl Strategy<Value = (Vec<String>, Vec<Vec<String>>)> {
        (1usize..6).prop_flat_map(|width| {
            (
                prop::collection::hash_set("[a-z]{1,8}", width)
                    .prop_map(|set| set.into_iter().collect::<Vec<_>>()),
                prop::collection::vec(prop::collection::vec(field(), width), 0..8),
            )
        })
    }

    fn to_csv(headers: &[String], rows: &[Vec<String>]) -> String {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        wtr.write_record(headers).unwrap();
        for row in rows {
            wtr.write_record(row).unwrap();
        }
        String::from_utf8(wtr.into_inner().unwrap()).unwrap()
    }

    proptest! {
        #[test]
        fn prop_one_object_per_row_with_header_keys((headers, rows) in table()) {
            let (summary, json) = run(&to_csv(&headers, &rows));
            let value: Value = serde_json::from_str(&json).unwrap();
            let array = value.as_array().unwrap();

            prop_assert_eq!(array.len(), rows.len());
            prop_assert_eq!(summary.records, rows.len());
            for obj in array {
                let obj = obj.as_object().unwrap();
                prop_assert_eq!(obj.len(), headers.len());
                for h in &headers {
                    prop_assert!(obj.contains_key(h));
                }
            }
        }

        #[test]
        fn prop_round_trip_by_header_order((headers, rows) in table()) {
            let (_, json) = run(&to_csv(&headers, &rows));
            let value: Value = serde_json::from_str(&json).unwrap();

            let back: Vec<Vec<String>> = value
                .as_array()
                .unwrap()
                .iter()
                .map(|obj| {
                    headers
                        .iter()
                        .map(|h| obj[h].as_str().unwrap().to_string())
                        .collect()
                })
                .collect();

            prop_assert_eq!(to_csv(&headers, &back), to_csv(&headers, &rows));
        }
    }
}
