//! Tests for the dataset merger

pub mod merge_tests;

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::app::models::MetricKind;
use crate::app::services::aggregator::{AggregationStats, MetricAggregation};

pub fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 3, day).unwrap()
}

/// Build an aggregation from (country, [(day, value)]) entries
pub fn aggregation(kind: MetricKind, entries: &[(&str, &[(u32, u64)])]) -> MetricAggregation {
    let mut values = BTreeMap::new();
    let mut dates = Vec::new();
    for (name, points) in entries {
        let by_date: BTreeMap<NaiveDate, u64> =
            points.iter().map(|&(day, value)| (date(day), value)).collect();
        dates.extend(by_date.keys().copied());
        values.insert(name.to_string(), by_date);
    }
    dates.sort_unstable_by(|a, b| b.cmp(a));
    dates.dedup();

    MetricAggregation {
        kind,
        dates,
        values,
        stats: AggregationStats::new(),
    }
}
