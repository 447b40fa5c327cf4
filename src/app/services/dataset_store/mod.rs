//! In-memory dataset store
//!
//! The store exclusively owns the canonical countries and case records and is
//! the only component that mutates them. It exposes:
//!
//! - [`DatasetStore::ensure_loaded`] - the single-flight initial import
//! - [`DatasetStore::reimport`] - an explicit re-run, optionally with a wider window
//! - [`DatasetStore::load_synthetic`] - installs the deterministic demo dataset
//! - Read queries that return owned snapshots
//!
//! # Concurrency
//!
//! Collections sit behind a `RwLock`. Fetch and aggregation run without it;
//! the merge and delta pass of a run happen under one write guard, so
//! readers see the dataset either before or after a run, never a partial
//! record. Runs are serialised by a separate async merge lock.
//!
//! Reads before any load simply observe an empty dataset.

pub mod dataset;
pub mod load_gate;
pub mod query;

#[cfg(test)]
pub mod tests;

use chrono::NaiveDate;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;
use tracing::{error, info};

use crate::app::models::{CaseId, CaseRecord, Country, CountryId, CountryShare, DailySummary};
use crate::app::services::country_resolver::CountryResolver;
use crate::app::services::dataset_merger::merge_all;
use crate::app::services::importer::{ImportPipeline, ImportSummary, SourceClient, SourceFetcher};
use crate::app::services::synthetic;
use crate::config::Config;
use crate::Result;

pub use dataset::Dataset;
pub use load_gate::{GatePhase, LoadGate};

/// Concurrency-safe owner of the imported dataset
pub struct DatasetStore<F: SourceFetcher = SourceClient> {
    config: Config,
    resolver: CountryResolver,
    fetcher: F,
    dataset: RwLock<Dataset>,
    gate: LoadGate,
    merge_lock: tokio::sync::Mutex<()>,
}

impl DatasetStore<SourceClient> {
    /// Create a store fetching sources over HTTP(S) or from local files
    pub fn from_config(config: Config) -> Result<Self> {
        config.validate()?;
        let fetcher = SourceClient::new(config.import.fetch_timeout())?;
        Ok(Self::new(config, fetcher))
    }
}

impl<F: SourceFetcher> DatasetStore<F> {
    /// Create an empty store with a caller-supplied fetcher
    pub fn new(config: Config, fetcher: F) -> Self {
        let resolver = CountryResolver::new(config.import.province_policy);
        Self::with_resolver(config, fetcher, resolver)
    }

    pub fn with_resolver(config: Config, fetcher: F, resolver: CountryResolver) -> Self {
        let gate = LoadGate::new(config.import.gate_policy);
        Self {
            config,
            resolver,
            fetcher,
            dataset: RwLock::new(Dataset::new()),
            gate,
            merge_lock: tokio::sync::Mutex::new(()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn gate_phase(&self) -> GatePhase {
        self.gate.phase()
    }

    fn read(&self) -> RwLockReadGuard<'_, Dataset> {
        self.dataset.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Dataset> {
        self.dataset.write().unwrap_or_else(PoisonError::into_inner)
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Run the import pipeline once for the process lifetime
    ///
    /// Concurrent callers share a single run and all receive its outcome.
    /// Whether a failed run is retried by the next call depends on the
    /// configured gate policy.
    pub async fn ensure_loaded(&self) -> bool {
        self.gate
            .run(|| async {
                let summary = self.run_import(self.config.import.max_days_to_import).await;
                summary.success
            })
            .await
    }

    /// Run the import pipeline again regardless of the load gate
    ///
    /// A larger `max_days` backfills older dates; dates already stored are
    /// kept even when they fall outside the new window.
    pub async fn reimport(&self, max_days: Option<usize>) -> ImportSummary {
        let max_days = max_days.unwrap_or(self.config.import.max_days_to_import);
        self.run_import(max_days).await
    }

    /// Fetch, aggregate and merge every configured source, bypassing the gate
    ///
    /// Returns the full per-metric summary rather than just the outcome.
    pub async fn import(&self) -> ImportSummary {
        self.run_import(self.config.import.max_days_to_import).await
    }

    async fn run_import(&self, max_days: usize) -> ImportSummary {
        let _merge = self.merge_lock.lock().await;
        let started = Instant::now();

        let collected = ImportPipeline::new(
            &self.fetcher,
            &self.resolver,
            self.config.sources.configured(),
            max_days,
        )
        .with_max_rows(self.config.import.max_rows_per_source)
        .collect()
        .await;

        let (countries, cases) = {
            let mut dataset = self.write();
            if !collected.aggregations.is_empty() {
                merge_all(&mut dataset, &collected.aggregations, &self.resolver);
            }
            self.verify(&dataset);
            (dataset.country_count(), dataset.case_count())
        };

        let summary = ImportSummary::new(collected.reports, countries, cases, started.elapsed());
        if summary.success {
            info!("Import finished: {}", summary.summary());
        } else {
            error!("Import failed: {}", summary.summary());
        }
        summary
    }

    /// Merge the synthetic demo dataset ending at `anchor`
    pub async fn load_synthetic(&self, days: usize, seed: u64, anchor: NaiveDate) -> usize {
        let _merge = self.merge_lock.lock().await;
        let aggregations = synthetic::generate(days, seed, &self.resolver, anchor);

        let mut dataset = self.write();
        synthetic::register_countries(&mut dataset, &self.resolver);
        merge_all(&mut dataset, &aggregations, &self.resolver);
        self.verify(&dataset);
        info!(
            "Loaded synthetic dataset: {} countries, {} case records",
            dataset.country_count(),
            dataset.case_count()
        );
        dataset.case_count()
    }

    fn verify(&self, dataset: &Dataset) {
        let checked = dataset.check_invariants();
        if let Err(e) = &checked {
            error!("{}", e);
        }
        debug_assert!(checked.is_ok(), "merged dataset is inconsistent");
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// All countries in identity order
    pub fn list_countries(&self) -> Vec<Country> {
        self.read().countries().to_vec()
    }

    pub fn get_country(&self, id: CountryId) -> Option<Country> {
        self.read().country(id).cloned()
    }

    /// Country by code, ignoring ASCII case
    pub fn get_country_by_code(&self, code: &str) -> Option<Country> {
        self.read().country_by_code(code).cloned()
    }

    /// One page of records, date descending then confirmed descending
    pub fn list_cases(&self, skip: usize, limit: usize) -> Vec<CaseRecord> {
        self.read().list_cases(skip, limit)
    }

    pub fn get_case(&self, id: CaseId) -> Option<CaseRecord> {
        self.read().case(id).cloned()
    }

    /// All records of a country, most recent first
    pub fn list_cases_by_country_code(&self, code: &str) -> Vec<CaseRecord> {
        self.read().cases_by_country_code(code)
    }

    pub fn list_cases_by_date(&self, date: NaiveDate) -> Vec<CaseRecord> {
        self.read().cases_by_date(date)
    }

    pub fn summary_for_date(&self, date: NaiveDate) -> Option<DailySummary> {
        self.read().summary_for_date(date)
    }

    pub fn top_countries(&self, date: NaiveDate, limit: usize) -> Vec<CountryShare> {
        self.read().top_countries(date, limit)
    }

    pub fn latest_report_date(&self) -> Option<NaiveDate> {
        self.read().latest_report_date()
    }

    pub fn country_count(&self) -> usize {
        self.read().country_count()
    }

    pub fn case_count(&self) -> usize {
        self.read().case_count()
    }
}
