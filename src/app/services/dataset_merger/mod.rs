//! Dataset merging for aggregated metrics
//!
//! Folds per-metric aggregations into the dataset's per-country, per-date
//! case records, then derives the day-over-day deltas.
//!
//! # Merge rules
//!
//! 1. The first metric to observe a canonical name creates its country.
//! 2. A (country, date) record is created with zero counters if absent.
//! 3. The metric's counter is overwritten, never added to, so merging the
//!    same aggregation twice leaves the dataset unchanged.
//! 4. `active` is recomputed after every counter write.
//!
//! The [`delta`] pass runs once after every metric is merged and always
//! recomputes every record.

pub mod delta;

#[cfg(test)]
pub mod tests;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::app::services::aggregator::MetricAggregation;
use crate::app::services::country_resolver::CountryResolver;
use crate::app::services::dataset_store::Dataset;

pub use delta::recompute_daily_deltas;

/// Counts of what a merge changed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeStats {
    pub countries_created: usize,
    pub cases_created: usize,
    pub values_written: usize,
}

impl MergeStats {
    pub fn absorb(&mut self, other: &MergeStats) {
        self.countries_created += other.countries_created;
        self.cases_created += other.cases_created;
        self.values_written += other.values_written;
    }

    pub fn summary(&self) -> String {
        format!(
            "{} countries created, {} case records created, {} values written",
            self.countries_created, self.cases_created, self.values_written
        )
    }
}

/// Merge one metric's aggregation into the dataset
///
/// Deltas are left untouched; call [`recompute_daily_deltas`] once all
/// metrics are merged.
pub fn merge_metric(
    dataset: &mut Dataset,
    aggregation: &MetricAggregation,
    resolver: &CountryResolver,
) -> MergeStats {
    let mut stats = MergeStats::default();
    let kind = aggregation.kind;

    for (name, by_date) in &aggregation.values {
        let (country_id, created) = dataset.upsert_country(name, || resolver.profile(name));
        if created {
            debug!("Created country {} '{}'", country_id, name);
            stats.countries_created += 1;
        }

        for (&date, &value) in by_date {
            let (record, created) = dataset.upsert_case(country_id, date);
            record.set_counter(kind, value);
            if created {
                stats.cases_created += 1;
            }
            stats.values_written += 1;
        }
    }

    debug!("Merged {}: {}", kind, stats.summary());
    stats
}

/// Merge every aggregation in metric order, then run the delta pass
pub fn merge_all(
    dataset: &mut Dataset,
    aggregations: &[MetricAggregation],
    resolver: &CountryResolver,
) -> MergeStats {
    let mut ordered: Vec<&MetricAggregation> = aggregations.iter().collect();
    ordered.sort_by_key(|aggregation| aggregation.kind);

    let mut stats = MergeStats::default();
    for aggregation in ordered {
        stats.absorb(&merge_metric(dataset, aggregation, resolver));
    }

    let updated = recompute_daily_deltas(dataset);
    info!(
        "Merged {} metrics: {}, deltas recomputed for {} records",
        aggregations.len(),
        stats.summary(),
        updated
    );
    stats
}
