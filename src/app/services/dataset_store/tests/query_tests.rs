//! Tests for the read views

use super::*;
use std::collections::HashSet;

async fn loaded_store() -> crate::app::services::dataset_store::DatasetStore<MemoryFetcher> {
    let store = standard_store();
    assert!(store.ensure_loaded().await);
    store
}

#[tokio::test]
async fn test_list_countries_in_identity_order() {
    let store = loaded_store().await;
    let ids: Vec<u32> = store.list_countries().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(store.get_country(2).unwrap().id, 2);
    assert!(store.get_country(99).is_none());
}

#[tokio::test]
async fn test_cases_ordered_by_date_then_confirmed() {
    let store = loaded_store().await;
    let cases = store.list_cases(0, 100);
    assert_eq!(cases.len(), 9);

    for pair in cases.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            a.report_date > b.report_date
                || (a.report_date == b.report_date && a.confirmed >= b.confirmed)
        );
    }
    assert_eq!(cases[0].confirmed, 1200);
}

#[tokio::test]
async fn test_pages_do_not_overlap() {
    let store = standard_store();
    store.load_synthetic(5, 42, mar(9)).await;

    let first: HashSet<u64> = store.list_cases(0, 50).iter().map(|c| c.id).collect();
    let second: HashSet<u64> = store.list_cases(50, 50).iter().map(|c| c.id).collect();
    let third = store.list_cases(100, 50);

    assert_eq!(first.len(), 50);
    assert_eq!(second.len(), 50);
    assert!(first.is_disjoint(&second));
    assert_eq!(third.len(), 40);
    assert!(store.list_cases(500, 50).is_empty());
}

#[tokio::test]
async fn test_get_case_by_id() {
    let store = loaded_store().await;
    let case = store.get_case(1).unwrap();
    assert_eq!(case.id, 1);
    assert!(store.get_case(0).is_none());
    assert!(store.get_case(1000).is_none());
}

#[tokio::test]
async fn test_cases_by_unknown_code_is_empty() {
    let store = loaded_store().await;
    assert!(store.list_cases_by_country_code("ZZ").is_empty());
    assert!(store.get_country_by_code("zz").is_none());
}

#[tokio::test]
async fn test_cases_by_date() {
    let store = loaded_store().await;
    let cases = store.list_cases_by_date(mar(8));
    assert_eq!(cases.len(), 3);
    assert!(cases.iter().all(|case| case.report_date == mar(8)));
    assert!(store.list_cases_by_date(mar(1)).is_empty());
}

#[tokio::test]
async fn test_summary_for_date() {
    let store = loaded_store().await;
    let summary = store.summary_for_date(mar(9)).unwrap();

    assert_eq!(summary.total_confirmed, 350 + 1200 + 9);
    assert_eq!(summary.total_deaths, 5 + 15);
    assert_eq!(summary.total_recovered, 300);
    assert_eq!(summary.countries_reporting, 3);
    assert!((summary.mortality_rate - 20.0 / 1559.0 * 100.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_top_countries_share() {
    let store = loaded_store().await;
    let top = store.top_countries(mar(9), 2);

    assert_eq!(top.len(), 2);
    assert_eq!(top[0].country_name, "France");
    assert_eq!(top[1].country_name, "United States");
    assert!((top[0].percent_of_global - 1200.0 / 1559.0 * 100.0).abs() < 1e-9);
    assert!(store.top_countries(mar(1), 10).is_empty());
}

#[tokio::test]
async fn test_latest_report_date() {
    let store = standard_store();
    assert_eq!(store.latest_report_date(), None);
    assert!(store.ensure_loaded().await);
    assert_eq!(store.latest_report_date(), Some(mar(9)));
}
