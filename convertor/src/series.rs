//! Plottable CPI-over-time series.
//!
//! The HHI/CPI export is charted as CPI against date. Columns are taken by
//! position, not name: the first column is the date and the third is CPI.
//! Rows with an empty date or CPI are left out, as are rows whose CPI does
//! not read as a number.

use serde::Serialize;

use crate::logs::log_warning;
use crate::models::{Document, FieldValue, Record};

/// Position of the date column.
pub const DATE_COLUMN: usize = 0;

/// Position of the CPI column.
pub const CPI_COLUMN: usize = 2;

/// One point of a time series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    /// Date label, as written in the file
    pub date: String,
    /// Value at that date
    pub value: f64,
}

/// CPI against date, in file order.
///
/// # Example
/// ```
/// use convertor::{csv_to_document, series::cpi_points};
///
/// let doc = csv_to_document("date,hhi,cpi\n2024-01-01,1520.4,308.4\n2024-02-01,1498.0,\n").unwrap();
/// let points = cpi_points(&doc);
///
/// assert_eq!(points.len(), 1);
/// assert_eq!(points[0].date, "2024-01-01");
/// assert_eq!(points[0].value, 308.4);
/// ```
pub fn cpi_points(document: &Document) -> Vec<SeriesPoint> {
    column_points(document, DATE_COLUMN, CPI_COLUMN)
}

/// Values of column `value_col` against column `date_col`, both by position.
///
/// Empty if the header has fewer columns than either position.
pub fn column_points(document: &Document, date_col: usize, value_col: usize) -> Vec<SeriesPoint> {
    let headers = document.headers();
    let (date_key, value_key) = match (headers.get(date_col), headers.get(value_col)) {
        (Some(d), Some(v)) => (d.as_str(), v.as_str()),
        _ => return Vec::new(),
    };

    document
        .records()
        .iter()
        .enumerate()
        .filter_map(|(i, record)| {
            let date = non_empty(record, date_key)?;
            let raw = non_empty(record, value_key)?;
            match raw.trim().parse::<f64>() {
                Ok(value) => Some(SeriesPoint {
                    date: date.to_string(),
                    value,
                }),
                Err(_) => {
                    log_warning(format!("Record {}: '{}' is not a number, skipped", i + 1, raw));
                    None
                }
            }
        })
        .collect()
}

fn non_empty<'a>(record: &'a Record, key: &str) -> Option<&'a str> {
    record
        .get(key)
        .and_then(FieldValue::as_str)
        .filter(|s| !s.is_empty())
}
