//! In-memory data model of a converted file.
//!
//! - [`Record`] - One data row as an ordered column → value mapping
//! - [`FieldValue`] - A single cell (text, absent, or surplus fields)
//! - [`Document`] - Every record of one input file, plus its header

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::config::OVERFLOW_KEY;

// =============================================================================
// Field Value
// =============================================================================

/// Value stored under one key of a [`Record`].
///
/// Cells are never coerced: a CSV `30` stays the JSON string `"30"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Field present in the row.
    Text(String),
    /// Row ended before this column (serialized as `null`).
    Missing,
    /// Fields past the last header column, in row order.
    Overflow(Vec<String>),
}

impl FieldValue {
    /// Text of the cell, if the row had one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

// =============================================================================
// Record
// =============================================================================

/// One data row keyed by header name.
///
/// Keys keep header order. A repeated header name keeps the slot of its
/// first occurrence and the value of its last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from a header and the raw fields of one row.
    ///
    /// Columns the row does not reach are [`FieldValue::Missing`]; fields
    /// past the header are gathered under [`OVERFLOW_KEY`]. The overflow
    /// entry is always appended as its own key, even when a header column
    /// has the same name.
    pub fn from_row<S: AsRef<str>>(headers: &[String], row: &[S]) -> Self {
        let mut record = Record::new();

        for (i, header) in headers.iter().enumerate() {
            let value = match row.get(i) {
                Some(field) => FieldValue::Text(field.as_ref().to_string()),
                None => FieldValue::Missing,
            };
            record.insert(header.clone(), value);
        }

        if row.len() > headers.len() {
            let extra = row[headers.len()..]
                .iter()
                .map(|f| f.as_ref().to_string())
                .collect();
            record
                .fields
                .push((OVERFLOW_KEY.to_string(), FieldValue::Overflow(extra)));
        }

        record
    }

    /// Insert or replace a value. Replacing keeps the original position.
    pub fn insert(&mut self, key: impl Into<String>, value: FieldValue) {
        let key = key.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Fields past the header width, if the row had any.
    pub fn overflow(&self) -> Option<&[String]> {
        self.fields.iter().find_map(|(_, v)| match v {
            FieldValue::Overflow(extra) => Some(extra.as_slice()),
            _ => None,
        })
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Keys in output order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

// =============================================================================
// Document
// =============================================================================

/// All records read from one CSV file.
///
/// Serializes as a bare JSON array of records; the header and the ragged
/// row count are kept for reporting only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    headers: Vec<String>,
    records: Vec<Record>,
    ragged_rows: usize,
}

impl Document {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            records: Vec::new(),
            ragged_rows: 0,
        }
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Push a record whose row width differed from the header.
    pub fn push_ragged(&mut self, record: Record) {
        self.ragged_rows += 1;
        self.records.push(record);
    }

    /// Rows that were shorter or longer than the header.
    pub fn ragged_rows(&self) -> usize {
        self.ragged_rows
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.records.serialize(serializer)
    }
}
