//! Concurrent fetch and aggregation of every configured metric

use futures::future::join_all;
use std::io;
use tracing::{error, info, warn};

use super::fetcher::SourceFetcher;
use super::report::MetricReport;
use crate::app::models::MetricKind;
use crate::app::services::aggregator::{Aggregator, MetricAggregation};
use crate::app::services::country_resolver::CountryResolver;
use crate::{Error, Result};

/// Aggregations ready to merge plus a report for every configured metric
#[derive(Debug, Default)]
pub struct CollectedMetrics {
    /// Successful aggregations in merge order
    pub aggregations: Vec<MetricAggregation>,
    /// One report per configured metric, in merge order
    pub reports: Vec<MetricReport>,
}

/// Fetches and aggregates the metric sources of one import run
pub struct ImportPipeline<'a, F: SourceFetcher> {
    fetcher: &'a F,
    resolver: &'a CountryResolver,
    sources: Vec<(MetricKind, String)>,
    max_days: usize,
    max_rows: Option<usize>,
}

impl<'a, F: SourceFetcher> ImportPipeline<'a, F> {
    pub fn new(
        fetcher: &'a F,
        resolver: &'a CountryResolver,
        sources: Vec<(MetricKind, String)>,
        max_days: usize,
    ) -> Self {
        Self {
            fetcher,
            resolver,
            sources,
            max_days,
            max_rows: None,
        }
    }

    pub fn with_max_rows(mut self, max_rows: Option<usize>) -> Self {
        self.max_rows = max_rows;
        self
    }

    /// Fetch and aggregate every source concurrently
    pub async fn collect(&self) -> CollectedMetrics {
        info!(
            "Importing {} metric sources (window {} days)",
            self.sources.len(),
            self.max_days
        );

        let runs = self
            .sources
            .iter()
            .map(|(kind, locator)| self.import_metric(*kind, locator));
        let results = join_all(runs).await;

        let mut collected = CollectedMetrics::default();
        for ((kind, locator), result) in self.sources.iter().zip(results) {
            match result {
                Ok(aggregation) => {
                    if aggregation.is_empty() {
                        warn!("{} source {} produced no values", kind, locator);
                    }
                    collected
                        .reports
                        .push(MetricReport::succeeded(locator, &aggregation));
                    collected.aggregations.push(aggregation);
                }
                Err(e) => {
                    error!("Failed to import {} from {}: {}", kind, locator, e);
                    collected
                        .reports
                        .push(MetricReport::failed(*kind, locator, &e));
                }
            }
        }

        collected.aggregations.sort_by_key(|aggregation| aggregation.kind);
        collected.reports.sort_by_key(|report| report.kind);
        collected
    }

    async fn import_metric(&self, kind: MetricKind, locator: &str) -> Result<MetricAggregation> {
        info!("Fetching {} source {}", kind, locator);
        let text = self.fetcher.fetch(locator).await?;

        let resolver = self.resolver.clone();
        let source_name = locator.to_string();
        let max_days = self.max_days;
        let max_rows = self.max_rows;

        tokio::task::spawn_blocking(move || {
            Aggregator::new(&resolver, max_days)
                .with_max_rows(max_rows)
                .aggregate_text(kind, &source_name, &text)
        })
        .await
        .map_err(|e| Error::io(format!("Aggregation task for {} failed", kind), io::Error::other(e)))?
    }
}
