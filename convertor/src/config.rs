//! Conversion configuration.
//!
//! The convertor always reads and writes the same two files. These values
//! are fixed; [`ConvertConfig::with_paths`] exists so the library can be
//! pointed at scratch files.

use std::path::{Path, PathBuf};

/// Source CSV file, relative to the working directory.
pub const DEFAULT_INPUT_PATH: &str = "output_hhi_cpi.csv";

/// Destination JSON file, relative to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "output_hhi_cpi.json";

/// Field delimiter of the source file.
pub const DELIMITER: u8 = b',';

/// Indentation unit of the JSON output.
pub const INDENT: &[u8] = b"    ";

/// Key under which fields beyond the header width are collected.
pub const OVERFLOW_KEY: &str = "null";

/// Settings for one conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertConfig {
    /// CSV file to read
    pub input_path: PathBuf,
    /// JSON file to create or replace
    pub output_path: PathBuf,
    /// Escape every non-ASCII character as `\uXXXX`
    pub ascii_only: bool,
}

impl ConvertConfig {
    /// Same settings, different source and destination.
    pub fn with_paths(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Self {
        Self {
            input_path: input.as_ref().to_path_buf(),
            output_path: output.as_ref().to_path_buf(),
            ..Self::default()
        }
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            ascii_only: true,
        }
    }
}
