//! Import pipeline for the metric sources
//!
//! Fetches every configured metric source concurrently, aggregates each one
//! on the blocking pool and reports per-metric outcomes. Merging is left to
//! the dataset store, which owns the single-writer merge phase.
//!
//! - [`fetcher`] - Source fetching over HTTP or the local filesystem
//! - [`pipeline`] - Concurrent fetch and aggregation of all metrics
//! - [`report`] - Per-metric and overall import summaries
//!
//! A failed metric never aborts the others; only a run in which no metric
//! succeeded is an overall failure.

pub mod fetcher;
pub mod pipeline;
pub mod report;

#[cfg(test)]
pub mod tests;

pub use fetcher::{SourceClient, SourceFetcher};
pub use pipeline::{CollectedMetrics, ImportPipeline};
pub use report::{ImportSummary, MetricReport};
