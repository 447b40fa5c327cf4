//! Typed access to a single source row
//!
//! Fields are fetched by column name; a missing column is a row-level error,
//! while numeric fields use a parse-or-skip helper that never fails the row.

use csv::StringRecord;
use std::sync::Arc;

use super::column_index::ColumnIndex;
use crate::{Error, Result};

/// One data row addressable by column name
#[derive(Debug, Clone)]
pub struct SourceRow {
    header: Arc<ColumnIndex>,
    record: StringRecord,
    line: u64,
}

impl SourceRow {
    pub fn new(header: Arc<ColumnIndex>, record: StringRecord, line: u64) -> Self {
        Self {
            header,
            record,
            line,
        }
    }

    /// Line number of the row within its source
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Raw (trimmed) value of a column that must be present
    ///
    /// An empty value is returned as `""`; only a column absent from the
    /// header or from this record is an error.
    pub fn get(&self, column_name: &str) -> Result<&str> {
        let index = self.header.get_index(column_name).ok_or_else(|| {
            Error::row_processing(self.line, format!("Column '{}' not found", column_name))
        })?;

        self.get_at(index).ok_or_else(|| {
            Error::row_processing(
                self.line,
                format!("No value for column '{}'", column_name),
            )
        })
    }

    /// Non-empty value of a column, `None` when absent or blank
    pub fn get_optional(&self, column_name: &str) -> Option<&str> {
        self.header
            .get_index(column_name)
            .and_then(|index| self.get_at(index))
            .filter(|value| !value.is_empty())
    }

    /// Raw (trimmed) value at a column position
    pub fn get_at(&self, index: usize) -> Option<&str> {
        self.record.get(index).map(str::trim)
    }

    /// Non-negative count in a column, `None` when absent or unparsable
    pub fn parse_count(&self, column_name: &str) -> Option<u64> {
        self.header
            .get_index(column_name)
            .and_then(|index| self.parse_count_at(index))
    }

    /// Non-negative count at a column position, `None` when absent or unparsable
    pub fn parse_count_at(&self, index: usize) -> Option<u64> {
        self.get_at(index).and_then(parse_count)
    }
}

/// Parse a non-negative integer count; an explicit `+` sign is accepted
pub fn parse_count(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok()
}
