//! Error types for the CSV to JSON conversion.
//!
//! - [`CsvError`] - Read phase (missing file, unreadable file, malformed CSV)
//! - [`WriteError`] - Write phase (destination not writable, serialization)
//! - [`ConvertError`] - Top-level error returned by [`crate::pipeline::convert`]
//!
//! Conversion between levels goes through `From`, so `?` works across
//! the read and write phases.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Read Errors
// =============================================================================

/// Errors while reading and parsing the source CSV.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Source file does not exist.
    #[error("No such file: {}", path.display())]
    NotFound { path: PathBuf },

    /// Source exists but could not be read.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Source is not valid CSV (or not valid UTF-8).
    #[error("Invalid CSV at line {line}: {message}")]
    Parse { line: u64, message: String },
}

impl CsvError {
    /// Build a parse error at a 1-based line number.
    pub fn parse(line: u64, message: impl Into<String>) -> Self {
        CsvError::Parse {
            line,
            message: message.into(),
        }
    }

    /// Map a `csv` crate error, keeping the line it was raised at.
    pub(crate) fn from_csv(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        match err.into_kind() {
            csv::ErrorKind::Io(io) => CsvError::Io(io),
            csv::ErrorKind::Utf8 { err, .. } => CsvError::parse(line, err.to_string()),
            other => CsvError::parse(line, format!("{:?}", other)),
        }
    }
}

// =============================================================================
// Write Errors
// =============================================================================

/// Errors while serializing and persisting the JSON document.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Destination could not be created, written or renamed into place.
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl WriteError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        WriteError::Io {
            path: path.into(),
            source,
        }
    }
}

// =============================================================================
// Conversion Errors (top-level)
// =============================================================================

/// Top-level conversion error.
///
/// Every variant is terminal: nothing is retried and no partial output
/// is left behind.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Reading or parsing the source failed.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Writing the destination failed.
    #[error("Write error: {0}")]
    Write(#[from] WriteError),
}

impl ConvertError {
    /// True when the source file was missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConvertError::Csv(CsvError::NotFound { .. }))
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for the read phase.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for the write phase.
pub type WriteResult<T> = Result<T, WriteError>;

/// Result type for a full conversion.
pub type ConvertResult<T> = Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        let csv_err = CsvError::NotFound {
            path: PathBuf::from("missing.csv"),
        };
        let err: ConvertError = csv_err.into();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("missing.csv"));

        let write_err = WriteError::io(
            "out.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let err: ConvertError = write_err.into();
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("out.json"));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_parse_error_format() {
        let err = CsvError::parse(7, "invalid utf-8");
        let msg = err.to_string();
        assert!(msg.contains("line 7"));
        assert!(msg.contains("invalid utf-8"));
    }
}
