//! Tests for the dataset store, its load gate and read views

pub mod query_tests;
pub mod store_tests;

use chrono::NaiveDate;

use crate::app::services::dataset_store::DatasetStore;
use crate::app::services::importer::tests::{MemoryFetcher, memory_config};
use crate::config::Config;

pub fn mar(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 3, day).unwrap()
}

pub fn store_with(fetcher: MemoryFetcher, config: Config) -> DatasetStore<MemoryFetcher> {
    DatasetStore::new(config, fetcher)
}

/// Store over the three standard in-memory sources
pub fn standard_store() -> DatasetStore<MemoryFetcher> {
    store_with(MemoryFetcher::standard(), memory_config())
}
