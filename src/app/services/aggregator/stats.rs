//! Row-level statistics for a single aggregated source

use serde::{Deserialize, Serialize};

/// Number of row error messages retained for reporting
const MAX_RECORDED_ERRORS: usize = 50;

/// Counts of what happened to the rows of a source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationStats {
    /// Data rows encountered
    pub rows_read: usize,

    /// Rows attributed to a canonical country
    pub rows_attributed: usize,

    /// Rows excluded by the province policy or a blank country label
    pub rows_skipped: usize,

    /// Rows that failed to decode or lacked a required field
    pub row_errors: usize,

    /// Date values that were not non-negative integers
    pub values_skipped: usize,

    /// First row error messages, for debugging
    pub errors: Vec<String>,
}

impl AggregationStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a row error, keeping its message while under the cap
    pub fn add_error(&mut self, message: String) {
        self.row_errors += 1;
        if self.errors.len() < MAX_RECORDED_ERRORS {
            self.errors.push(message);
        }
    }

    /// Whether no row was attributed to any country
    pub fn is_empty(&self) -> bool {
        self.rows_attributed == 0
    }

    pub fn summary(&self) -> String {
        format!(
            "{} rows read, {} attributed, {} skipped, {} errors, {} values skipped",
            self.rows_read,
            self.rows_attributed,
            self.rows_skipped,
            self.row_errors,
            self.values_skipped
        )
    }
}
