//! Tests for upsert-and-overwrite merging

use super::*;
use crate::app::services::country_resolver::CountryResolver;
use crate::app::services::dataset_merger::{merge_all, merge_metric};
use crate::app::services::dataset_store::Dataset;
use crate::config::ProvincePolicy;
use chrono::NaiveDate;

fn resolver() -> CountryResolver {
    CountryResolver::new(ProvincePolicy::UsOnly)
}

#[test]
fn test_metrics_fill_the_same_record() {
    let mut dataset = Dataset::new();
    merge_all(
        &mut dataset,
        &[
            aggregation(MetricKind::Confirmed, &[("France", &[(9, 1000)])]),
            aggregation(MetricKind::Deaths, &[("France", &[(9, 100)])]),
            aggregation(MetricKind::Recovered, &[("France", &[(9, 400)])]),
        ],
        &resolver(),
    );

    assert_eq!(dataset.case_count(), 1);
    let case = dataset.case(1).unwrap();
    assert_eq!(
        (case.confirmed, case.deaths, case.recovered, case.active),
        (1000, 100, 400, 500)
    );
}

#[test]
fn test_reimport_is_idempotent() {
    let confirmed = aggregation(
        MetricKind::Confirmed,
        &[("France", &[(8, 90), (9, 100)]), ("Spain", &[(9, 50)])],
    );
    let resolver = resolver();

    let mut once = Dataset::new();
    merge_all(&mut once, std::slice::from_ref(&confirmed), &resolver);

    let mut twice = Dataset::new();
    merge_all(&mut twice, std::slice::from_ref(&confirmed), &resolver);
    let stats = merge_all(&mut twice, std::slice::from_ref(&confirmed), &resolver);

    assert_eq!(stats.cases_created, 0);
    assert_eq!(stats.countries_created, 0);
    assert_eq!(once.cases(), twice.cases());
    assert_eq!(twice.case(2).unwrap().confirmed, 100);
}

#[test]
fn test_counter_is_overwritten_not_summed() {
    let mut dataset = Dataset::new();
    let resolver = resolver();
    merge_metric(
        &mut dataset,
        &aggregation(MetricKind::Confirmed, &[("Italy", &[(9, 300)])]),
        &resolver,
    );
    merge_metric(
        &mut dataset,
        &aggregation(MetricKind::Confirmed, &[("Italy", &[(9, 320)])]),
        &resolver,
    );
    assert_eq!(dataset.case(1).unwrap().confirmed, 320);
}

#[test]
fn test_active_floored_at_zero() {
    let mut dataset = Dataset::new();
    merge_all(
        &mut dataset,
        &[
            aggregation(MetricKind::Confirmed, &[("Peru", &[(9, 100)])]),
            aggregation(MetricKind::Deaths, &[("Peru", &[(9, 80)])]),
            aggregation(MetricKind::Recovered, &[("Peru", &[(9, 50)])]),
        ],
        &resolver(),
    );
    assert_eq!(dataset.case(1).unwrap().active, 0);
}

#[test]
fn test_missing_recovered_leaves_zero() {
    let mut dataset = Dataset::new();
    merge_all(
        &mut dataset,
        &[
            aggregation(MetricKind::Deaths, &[("Japan", &[(9, 5)])]),
            aggregation(MetricKind::Confirmed, &[("Japan", &[(9, 70)])]),
        ],
        &resolver(),
    );
    let case = dataset.case(1).unwrap();
    assert_eq!(case.recovered, 0);
    assert_eq!(case.active, 65);
}

#[test]
fn test_country_created_once_with_profile() {
    let mut dataset = Dataset::new();
    let stats = merge_all(
        &mut dataset,
        &[
            aggregation(MetricKind::Confirmed, &[("United States", &[(8, 1), (9, 2)])]),
            aggregation(MetricKind::Deaths, &[("United States", &[(8, 0), (9, 1)])]),
        ],
        &resolver(),
    );

    assert_eq!(stats.countries_created, 1);
    assert_eq!(stats.cases_created, 2);
    assert_eq!(stats.values_written, 4);

    let us = dataset.country_by_name("United States").unwrap();
    assert_eq!(us.id, 1);
    assert_eq!(us.code, "US");
    assert_eq!(us.region, crate::Region::Americas);
    assert!(dataset.check_invariants().is_ok());
}

#[test]
fn test_out_of_window_dates_persist() {
    let mut dataset = Dataset::new();
    let resolver = resolver();
    merge_all(
        &mut dataset,
        &[aggregation(MetricKind::Confirmed, &[("Chile", &[(1, 10), (2, 20)])])],
        &resolver,
    );
    merge_all(
        &mut dataset,
        &[aggregation(MetricKind::Confirmed, &[("Chile", &[(2, 20), (3, 30)])])],
        &resolver,
    );

    assert_eq!(dataset.case_count(), 3);
    let dates: Vec<NaiveDate> = dataset.cases().iter().map(|case| case.report_date).collect();
    assert_eq!(dates, vec![date(1), date(2), date(3)]);
}
