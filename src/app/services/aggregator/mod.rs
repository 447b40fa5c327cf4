//! Per-metric aggregation of wide-format sources
//!
//! For one metric and one source, sums every row attributed to the same
//! canonical country for each selected date. Several raw rows (US states, or
//! all provinces under the aggregate-all policy) can feed a single
//! (country, date) pair.
//!
//! # Failure isolation
//!
//! - A missing header or a header without the country column aborts the file
//!   with `Error::MalformedSource`.
//! - A row that cannot be decoded or lacks the country field is logged,
//!   counted and skipped.
//! - A value that is not a non-negative integer contributes zero.

pub mod stats;

#[cfg(test)]
pub mod tests;

use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::io;
use tracing::{debug, info, warn};

use crate::app::models::MetricKind;
use crate::app::services::country_resolver::{Attribution, CountryResolver};
use crate::app::services::date_columns::DateColumnSet;
use crate::app::services::source_reader::{SourceReader, SourceRow};
use crate::constants::{COUNTRY_COLUMN, PROVINCE_COLUMN};
use crate::{Error, Result};

pub use stats::AggregationStats;

/// Summed values by canonical country name, then by report date
pub type MetricTable = BTreeMap<String, BTreeMap<NaiveDate, u64>>;

/// Aggregated values of one metric from one source
#[derive(Debug, Clone)]
pub struct MetricAggregation {
    pub kind: MetricKind,

    /// Resolved date set, most recent first
    pub dates: Vec<NaiveDate>,

    /// Every attributed country carries a value for every resolved date
    pub values: MetricTable,

    pub stats: AggregationStats,
}

impl MetricAggregation {
    /// Summed value for a country and date
    pub fn value(&self, country: &str, date: NaiveDate) -> Option<u64> {
        self.values.get(country).and_then(|by_date| by_date.get(&date).copied())
    }

    pub fn country_count(&self) -> usize {
        self.values.len()
    }

    /// Number of (country, date) values
    pub fn value_count(&self) -> usize {
        self.values.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// What happened to a single row
enum RowOutcome {
    Attributed { values_skipped: usize },
    Skipped,
}

/// Aggregates one metric source into per-country, per-date sums
#[derive(Debug)]
pub struct Aggregator<'a> {
    resolver: &'a CountryResolver,
    max_days: usize,
    max_rows: Option<usize>,
}

impl<'a> Aggregator<'a> {
    /// Create an aggregator keeping the `max_days` most recent dates
    pub fn new(resolver: &'a CountryResolver, max_days: usize) -> Self {
        Self {
            resolver,
            max_days,
            max_rows: None,
        }
    }

    /// Stop after this many attributed rows
    pub fn with_max_rows(mut self, max_rows: Option<usize>) -> Self {
        self.max_rows = max_rows;
        self
    }

    /// Aggregate in-memory source text
    pub fn aggregate_text(
        &self,
        kind: MetricKind,
        source_name: &str,
        text: &str,
    ) -> Result<MetricAggregation> {
        let reader = SourceReader::from_text(source_name, text)?;
        self.aggregate(kind, reader)
    }

    /// Aggregate every row of a source
    pub fn aggregate<R: io::Read>(
        &self,
        kind: MetricKind,
        reader: SourceReader<R>,
    ) -> Result<MetricAggregation> {
        if !reader.header().has_column(COUNTRY_COLUMN) {
            return Err(Error::malformed_source(
                reader.source_name(),
                format!("Header has no '{}' column", COUNTRY_COLUMN),
            ));
        }

        let source_name = reader.source_name().to_string();
        let date_set = DateColumnSet::resolve(reader.header(), self.max_days);
        if date_set.is_empty() {
            warn!("No date columns found in {} source {}", kind, source_name);
        }

        let mut values = MetricTable::new();
        let mut stats = AggregationStats::new();

        let mut rows = reader;
        loop {
            if self
                .max_rows
                .is_some_and(|max_rows| stats.rows_attributed >= max_rows)
            {
                info!(
                    "Reached row cap of {} attributed rows for {}",
                    stats.rows_attributed, kind
                );
                break;
            }

            let Some(result) = rows.next() else {
                break;
            };
            stats.rows_read += 1;

            let outcome = result.and_then(|row| self.process_row(&row, &date_set, &mut values));
            match outcome {
                Ok(RowOutcome::Attributed { values_skipped }) => {
                    stats.rows_attributed += 1;
                    stats.values_skipped += values_skipped;
                }
                Ok(RowOutcome::Skipped) => {
                    stats.rows_skipped += 1;
                }
                Err(e) => {
                    warn!("Error processing record in {}: {}", kind, e);
                    stats.add_error(e.to_string());
                }
            }
        }

        info!(
            "Aggregated {}: {} countries across {} dates ({})",
            kind,
            values.len(),
            date_set.len(),
            stats.summary()
        );

        Ok(MetricAggregation {
            kind,
            dates: date_set.dates(),
            values,
            stats,
        })
    }

    /// Attribute a row and add its date values to the running sums
    fn process_row(
        &self,
        row: &SourceRow,
        date_set: &DateColumnSet,
        values: &mut MetricTable,
    ) -> Result<RowOutcome> {
        let country_label = row.get(COUNTRY_COLUMN)?;
        let province_label = row.get_optional(PROVINCE_COLUMN);

        let name = match self.resolver.attribute(country_label, province_label) {
            Attribution::Country(name) => name,
            Attribution::Skipped(reason) => {
                debug!(
                    "Skipped row {} ({:?}): {} / {:?}",
                    row.line(),
                    reason,
                    country_label,
                    province_label
                );
                return Ok(RowOutcome::Skipped);
            }
        };

        let by_date = values.entry(name).or_default();
        let mut values_skipped = 0;

        for column in date_set.columns() {
            let sum = by_date.entry(column.date).or_insert(0);
            match row.parse_count_at(column.index) {
                Some(value) => *sum = sum.saturating_add(value),
                None => values_skipped += 1,
            }
        }

        Ok(RowOutcome::Attributed { values_skipped })
    }
}
