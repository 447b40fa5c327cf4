//! Tests for loading, re-import and failure tolerance

use super::*;
use std::sync::Arc;
use std::time::Duration;

use crate::app::models::MetricKind;
use crate::app::services::dataset_store::GatePhase;
use crate::app::services::importer::tests::{CONFIRMED, DEATHS, RECOVERED};
use crate::config::{GatePolicy, ProvincePolicy};

#[tokio::test]
async fn test_reads_before_load_are_empty() {
    let store = standard_store();
    assert!(store.list_countries().is_empty());
    assert!(store.list_cases(0, 50).is_empty());
    assert!(store.get_case(1).is_none());
    assert!(store.summary_for_date(mar(9)).is_none());
    assert_eq!(store.gate_phase(), GatePhase::NotStarted);
}

#[tokio::test]
async fn test_ensure_loaded_merges_all_metrics() {
    let store = standard_store();
    assert!(store.ensure_loaded().await);

    let us = store.get_country_by_code("US").unwrap();
    assert_eq!(us.name, "United States");

    let latest = &store.list_cases_by_country_code("us")[0];
    assert_eq!(latest.report_date, mar(9));
    assert_eq!(latest.confirmed, 350);
    assert_eq!(latest.deaths, 5);
    assert_eq!(latest.recovered, 0);
    assert_eq!(latest.active, 345);

    let france = &store.list_cases_by_country_code("FR")[0];
    assert_eq!(
        (france.confirmed, france.deaths, france.recovered),
        (1200, 15, 300)
    );
    assert_eq!(france.daily_confirmed, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_ensure_loaded_runs_pipeline_once() {
    let fetcher = MemoryFetcher::standard().with_delay(Duration::from_millis(50));
    let calls = fetcher.call_counter();
    let store = Arc::new(store_with(fetcher, memory_config()));

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.ensure_loaded().await })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap());
    }

    // One fetch per metric source
    assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 3);
    assert_eq!(store.case_count(), 9);
}

#[tokio::test]
async fn test_missing_recovered_still_succeeds() {
    let fetcher = MemoryFetcher::standard().without_source(RECOVERED);
    let store = store_with(fetcher, memory_config());

    let summary = store.import().await;
    assert!(summary.success);
    assert!(!summary.metric(MetricKind::Recovered).unwrap().success);
    assert!(store.list_cases(0, 100).iter().all(|case| case.recovered == 0));
}

#[tokio::test]
async fn test_all_sources_failing_is_failure() {
    let store = store_with(MemoryFetcher::new(), memory_config());
    assert!(!store.ensure_loaded().await);
    assert_eq!(store.gate_phase(), GatePhase::NotStarted);
    assert!(store.list_countries().is_empty());
}

#[tokio::test]
async fn test_sticky_gate_keeps_failure() {
    let config = memory_config().with_gate_policy(GatePolicy::Sticky);
    let store = store_with(MemoryFetcher::new(), config);

    assert!(!store.ensure_loaded().await);
    assert_eq!(store.gate_phase(), GatePhase::Done(false));
    assert!(!store.ensure_loaded().await);
}

#[tokio::test]
async fn test_reimport_is_idempotent() {
    let store = standard_store();
    assert!(store.ensure_loaded().await);
    let before = store.list_cases(0, 100);

    let summary = store.reimport(None).await;
    assert!(summary.success);
    assert_eq!(store.list_cases(0, 100), before);
}

#[tokio::test]
async fn test_reimport_with_wider_window_backfills() {
    let config = memory_config().with_max_days(1);
    let store = store_with(MemoryFetcher::standard(), config);

    assert!(store.ensure_loaded().await);
    assert_eq!(store.list_cases_by_country_code("FR").len(), 1);
    // A single-date series has no predecessor
    assert_eq!(store.list_cases_by_country_code("FR")[0].daily_confirmed, 1200);

    store.reimport(Some(3)).await;
    let france = store.list_cases_by_country_code("FR");
    assert_eq!(france.len(), 3);
    assert_eq!(france[0].daily_confirmed, 0);
    assert_eq!(france[1].daily_confirmed, 500);
    assert_eq!(france[2].daily_confirmed, 1000);
}

#[tokio::test]
async fn test_aggregate_all_policy_includes_provinces() {
    let config = memory_config().with_province_policy(ProvincePolicy::AggregateAll);
    let store = store_with(MemoryFetcher::standard(), config);

    assert!(store.ensure_loaded().await);
    let france = &store.list_cases_by_country_code("FR")[0];
    assert_eq!(france.confirmed, 1205);
}

#[tokio::test]
async fn test_load_synthetic_dataset() {
    let store = standard_store();
    let cases = store.load_synthetic(5, 42, mar(9)).await;

    assert_eq!(cases, crate::constants::DEMO_COUNTRIES.len() * 5);
    assert_eq!(store.get_country(1).unwrap().name, "United States");
    assert_eq!(store.latest_report_date(), Some(mar(9)));

    let series = store.list_cases_by_country_code("JP");
    assert_eq!(series.len(), 5);
    let first = series.last().unwrap();
    assert_eq!(first.daily_confirmed, first.confirmed);
}

#[tokio::test]
async fn test_source_list_follows_config() {
    let config = memory_config().with_sources(Some(CONFIRMED), Some(DEATHS), None);
    let store = store_with(MemoryFetcher::standard(), config);

    let summary = store.import().await;
    assert_eq!(summary.metrics.len(), 2);
    assert!(store.list_cases(0, 100).iter().all(|case| case.recovered == 0));
}
