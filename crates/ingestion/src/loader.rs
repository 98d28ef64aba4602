//! Delimited-file loading with header canonicalization.

use csv::StringRecord;
use sentiment_core::{Error, Result};
use std::path::Path;

/// Canonicalize a header name: trim, lowercase, spaces to underscores.
pub fn canonical_header(raw: &str) -> String {
    raw.trim().to_lowercase().replace(' ', "_")
}

/// An in-memory table parsed from a headered CSV file.
///
/// Headers are canonicalized on load so column lookup is insensitive to the
/// source file's casing and spacing ("Timestamp IST" -> "timestamp_ist").
#[derive(Debug, Clone)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<StringRecord>,
}

impl RawTable {
    /// Load a table from a CSV file. Missing or malformed files are fatal.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = csv::Reader::from_path(path)
            .map_err(|e| Error::input(format!("cannot open {}: {e}", path.display())))?;

        let headers = reader
            .headers()
            .map_err(|e| Error::input(format!("cannot read header of {}: {e}", path.display())))?
            .iter()
            .map(canonical_header)
            .collect();

        let rows = reader
            .records()
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self { headers, rows })
    }

    /// Build a table from already-parsed parts. Used by tests.
    pub fn from_parts(headers: Vec<String>, rows: Vec<StringRecord>) -> Self {
        Self { headers, rows }
    }

    /// Index of a canonicalized column name, if present.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Field value for a row, by canonicalized column name.
    ///
    /// Returns `None` for a missing column, a short row, or an empty field.
    pub fn get<'a>(&self, row: &'a StringRecord, name: &str) -> Option<&'a str> {
        let idx = self.column(name)?;
        let value = row.get(idx)?.trim();
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over data rows.
    pub fn rows(&self) -> impl Iterator<Item = &StringRecord> {
        self.rows.iter()
    }
}
