//! COVID-19 Time-Series Library
//!
//! A Rust library for ingesting the wide-format COVID-19 time-series CSV files
//! (one row per geographic unit, one column per report date) into a normalized,
//! queryable in-memory dataset keyed by country and report date.
//!
//! This library provides tools for:
//! - Reading wide-format sources with per-row failure isolation
//! - Selecting a bounded window of the most recent date columns
//! - Resolving province/state rows into canonical countries
//! - Aggregating confirmed, deaths and recovered metrics per country and date
//! - Merging metrics into per-country-per-date case records with derived fields
//! - Serving the dataset to concurrent readers behind a single-flight load gate

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod aggregator;
        pub mod country_resolver;
        pub mod dataset_merger;
        pub mod dataset_store;
        pub mod date_columns;
        pub mod importer;
        pub mod source_reader;
        pub mod synthetic;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{CaseRecord, Country, MetricKind, Region};
pub use app::services::dataset_store::DatasetStore;
pub use config::Config;

/// Result type alias for the time-series library
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for ingestion and dataset operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Network or I/O failure while fetching a metric source
    #[error("Failed to fetch source '{locator}': {message}")]
    SourceFetch {
        locator: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Source without a usable header row
    #[error("Malformed source '{source_name}': {message}")]
    MalformedSource {
        source_name: String,
        message: String,
    },

    /// A single data row could not be processed
    #[error("Row {line}: {message}")]
    RowProcessing { line: u64, message: String },

    /// The merged dataset broke one of its own invariants
    #[error("Dataset invariant violated: {message}")]
    DatasetInvariant { message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Output serialization error
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Create a source fetch error without an underlying cause
    pub fn source_fetch(locator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SourceFetch {
            locator: locator.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a source fetch error wrapping the underlying cause
    pub fn source_fetch_with(
        locator: impl Into<String>,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::SourceFetch {
            locator: locator.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a malformed source error
    pub fn malformed_source(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedSource {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Create a row processing error
    pub fn row_processing(line: u64, message: impl Into<String>) -> Self {
        Self::RowProcessing {
            line,
            message: message.into(),
        }
    }

    /// Create a dataset invariant error
    pub fn dataset_invariant(message: impl Into<String>) -> Self {
        Self::DatasetInvariant {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON serialization failed".to_string(),
            source: error,
        }
    }
}

impl From<::config::ConfigError> for Error {
    fn from(error: ::config::ConfigError) -> Self {
        Self::Configuration {
            message: error.to_string(),
        }
    }
}
