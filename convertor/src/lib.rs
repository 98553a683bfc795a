//! # Convertor - CSV to JSON
//!
//! Reads a CSV file whose first row is a header and writes it back out as
//! a pretty-printed JSON array with one object per data row.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   CSV File  │────▶│   Parser    │────▶│  Document   │────▶│  JSON File  │
//! │   (UTF-8)   │     │  (csv crate)│     │  (records)  │     │  (atomic)   │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! Every value stays a string, keys follow header order and rows follow
//! input order.
//!
//! ## Modules
//!
//! - [`error`] - Error types for both phases
//! - [`config`] - Fixed paths and output settings
//! - [`models`] - Record and Document
//! - [`parser`] - CSV reading
//! - [`writer`] - JSON output
//! - [`pipeline`] - The full conversion
//! - [`series`] - CPI-over-time series for charting
//! - [`logs`] - Progress log broadcasting

// Core modules
pub mod config;
pub mod error;
pub mod models;

// Phases
pub mod parser;
pub mod writer;

// Orchestration
pub mod pipeline;

// Charting
pub mod series;

// Logging
pub mod logs;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{ConvertConfig, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH, OVERFLOW_KEY};

pub use error::{ConvertError, ConvertResult, CsvError, CsvResult, WriteError, WriteResult};

pub use models::{Document, FieldValue, Record};

pub use parser::{csv_to_document, parse_csv, read_document};

pub use writer::{to_json_string, write_document, write_json};

pub use pipeline::{convert, convert_files, ConvertSummary};

pub use series::{cpi_points, SeriesPoint};
