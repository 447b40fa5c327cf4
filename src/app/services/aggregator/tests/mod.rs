//! Tests for per-metric aggregation


use crate::app::models::MetricKind;
use crate::app::services::aggregator::{Aggregator, MetricAggregation};
use crate::app::services::country_resolver::CountryResolver;
use crate::config::ProvincePolicy;
use chrono::NaiveDate;

pub const HEADER: &str = "Province/State,Country/Region,Lat,Long,3/7/23,3/8/23,3/9/23";

pub fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, month, day).unwrap()
}

pub fn source(rows: &[&str]) -> String {
    let mut text = String::from(HEADER);
    for row in rows {
        text.push('\n');
        text.push_str(row);
    }
    text
}

/// Aggregate rows under the given policy and window
pub fn aggregate_with(
    policy: ProvincePolicy,
    max_days: usize,
    rows: &[&str],
) -> MetricAggregation {
    let resolver = CountryResolver::new(policy);
    Aggregator::new(&resolver, max_days)
        .aggregate_text(MetricKind::Confirmed, "confirmed", &source(rows))
        .unwrap()
}

/// Aggregate rows under the default policy and window
pub fn aggregate(rows: &[&str]) -> MetricAggregation {
    aggregate_with(ProvincePolicy::UsOnly, 10, rows)
}
