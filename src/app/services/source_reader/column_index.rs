//! Header analysis for wide-format sources
//!
//! Maps column names to their positions so rows can be addressed by name.

use csv::StringRecord;
use std::collections::HashMap;

/// Column name to position mapping for a source header
#[derive(Debug, Clone, Default)]
pub struct ColumnIndex {
    /// Column names in header order
    names: Vec<String>,

    /// Column name to index mapping (first occurrence wins)
    name_to_index: HashMap<String, usize>,
}

impl ColumnIndex {
    /// Build the index from a header record
    pub fn from_record(headers: &StringRecord) -> Self {
        let names: Vec<String> = headers.iter().map(|h| h.trim().to_string()).collect();

        let mut name_to_index = HashMap::with_capacity(names.len());
        for (index, name) in names.iter().enumerate() {
            name_to_index.entry(name.clone()).or_insert(index);
        }

        Self {
            names,
            name_to_index,
        }
    }

    /// Column names in header order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Get the index for a given column name
    pub fn get_index(&self, column_name: &str) -> Option<usize> {
        self.name_to_index.get(column_name).copied()
    }

    /// Check if a column exists in the header
    pub fn has_column(&self, column_name: &str) -> bool {
        self.name_to_index.contains_key(column_name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.iter().all(|name| name.is_empty())
    }
}
