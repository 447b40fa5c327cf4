//! Import summaries

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::app::models::MetricKind;
use crate::app::services::aggregator::MetricAggregation;

/// Outcome of importing one metric source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricReport {
    pub kind: MetricKind,
    pub locator: String,
    pub success: bool,
    pub rows_read: usize,
    pub rows_attributed: usize,
    pub rows_skipped: usize,
    pub row_errors: usize,
    pub values_skipped: usize,
    /// Date columns selected from the source
    pub dates: usize,
    /// Countries the source contributed values for
    pub countries: usize,
    pub error: Option<String>,
}

impl MetricReport {
    /// Report for a source that was aggregated
    pub fn succeeded(locator: &str, aggregation: &MetricAggregation) -> Self {
        let stats = &aggregation.stats;
        Self {
            kind: aggregation.kind,
            locator: locator.to_string(),
            success: true,
            rows_read: stats.rows_read,
            rows_attributed: stats.rows_attributed,
            rows_skipped: stats.rows_skipped,
            row_errors: stats.row_errors,
            values_skipped: stats.values_skipped,
            dates: aggregation.dates.len(),
            countries: aggregation.country_count(),
            error: None,
        }
    }

    /// Report for a source that could not be fetched or read
    pub fn failed(kind: MetricKind, locator: &str, error: impl ToString) -> Self {
        Self {
            kind,
            locator: locator.to_string(),
            success: false,
            rows_read: 0,
            rows_attributed: 0,
            rows_skipped: 0,
            row_errors: 0,
            values_skipped: 0,
            dates: 0,
            countries: 0,
            error: Some(error.to_string()),
        }
    }

    pub fn summary(&self) -> String {
        if self.success {
            format!(
                "{}: {} countries, {} dates, {} rows read ({} skipped, {} errors)",
                self.kind,
                self.countries,
                self.dates,
                self.rows_read,
                self.rows_skipped,
                self.row_errors
            )
        } else {
            format!(
                "{}: failed ({})",
                self.kind,
                self.error.as_deref().unwrap_or("unknown error")
            )
        }
    }
}

/// Outcome of a complete import run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportSummary {
    /// True when at least one metric imported successfully
    pub success: bool,
    pub metrics: Vec<MetricReport>,
    /// Countries in the dataset after the run
    pub countries: usize,
    /// Case records in the dataset after the run
    pub cases: usize,
    pub elapsed: Duration,
}

impl ImportSummary {
    pub fn new(metrics: Vec<MetricReport>, countries: usize, cases: usize, elapsed: Duration) -> Self {
        Self {
            success: metrics.iter().any(|report| report.success),
            metrics,
            countries,
            cases,
            elapsed,
        }
    }

    pub fn succeeded_count(&self) -> usize {
        self.metrics.iter().filter(|report| report.success).count()
    }

    pub fn metric(&self, kind: MetricKind) -> Option<&MetricReport> {
        self.metrics.iter().find(|report| report.kind == kind)
    }

    pub fn summary(&self) -> String {
        format!(
            "{} of {} metrics imported, {} countries, {} case records in {:.2}s",
            self.succeeded_count(),
            self.metrics.len(),
            self.countries,
            self.cases,
            self.elapsed.as_secs_f64()
        )
    }
}
