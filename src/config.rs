//! Configuration management and validation.
//!
//! Provides the source locators and import parameters for the ingestion
//! pipeline. Values are layered: built-in defaults, then an optional TOML
//! file, then `COVID__`-prefixed environment variables.

use crate::app::models::MetricKind;
use crate::constants::{DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_MAX_DAYS_TO_IMPORT, sources};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// How sub-national rows are attributed to countries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProvincePolicy {
    /// Roll up US states into the national total, drop every other province row
    #[default]
    UsOnly,
    /// Roll every province row up into its country total
    AggregateAll,
}

/// What the load gate does after a failed load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatePolicy {
    /// A failed load re-arms the gate; the next `ensure_loaded` runs again
    #[default]
    RetryOnFailure,
    /// The first outcome is final for the process lifetime
    Sticky,
}

/// Locators (URL or file path) of the metric sources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub confirmed: Option<String>,
    pub deaths: Option<String>,
    pub recovered: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            confirmed: Some(sources::CONFIRMED_URL.to_string()),
            deaths: Some(sources::DEATHS_URL.to_string()),
            recovered: Some(sources::RECOVERED_URL.to_string()),
        }
    }
}

impl SourceConfig {
    /// Locator configured for a metric
    pub fn locator(&self, kind: MetricKind) -> Option<&str> {
        match kind {
            MetricKind::Confirmed => self.confirmed.as_deref(),
            MetricKind::Deaths => self.deaths.as_deref(),
            MetricKind::Recovered => self.recovered.as_deref(),
        }
    }

    /// Configured metrics in merge order
    pub fn configured(&self) -> Vec<(MetricKind, String)> {
        MetricKind::ALL
            .iter()
            .filter_map(|&kind| {
                self.locator(kind)
                    .filter(|locator| !locator.trim().is_empty())
                    .map(|locator| (kind, locator.to_string()))
            })
            .collect()
    }
}

/// Parameters of a single import run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Number of most recent date columns taken from each source
    pub max_days_to_import: usize,

    /// Stop reading a source after this many attributed rows
    pub max_rows_per_source: Option<usize>,

    /// Sub-national roll-up policy
    pub province_policy: ProvincePolicy,

    /// Timeout applied to each source fetch
    pub fetch_timeout_secs: u64,

    /// Whether the binary loads the dataset before serving commands
    pub auto_import_on_startup: bool,

    /// Behaviour of the load gate after a failure
    pub gate_policy: GatePolicy,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_days_to_import: DEFAULT_MAX_DAYS_TO_IMPORT,
            max_rows_per_source: None,
            province_policy: ProvincePolicy::default(),
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            auto_import_on_startup: true,
            gate_policy: GatePolicy::default(),
        }
    }
}

impl ImportConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

/// Global configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sources: SourceConfig,
    pub import: ImportConfig,
}

impl Config {
    /// Load configuration from defaults, an optional TOML file and the environment
    ///
    /// Environment variables use the `COVID` prefix and `__` as the section
    /// separator, e.g. `COVID__IMPORT__MAX_DAYS_TO_IMPORT=30`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = path {
            debug!("Reading configuration file {}", path.display());
            builder = builder.add_source(::config::File::from(path).required(true));
        }

        let settings = builder
            .add_source(::config::Environment::with_prefix("COVID").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.import.max_days_to_import == 0 {
            return Err(Error::configuration(
                "max_days_to_import must be at least 1",
            ));
        }

        if self.import.fetch_timeout_secs == 0 {
            return Err(Error::configuration(
                "fetch_timeout_secs must be at least 1",
            ));
        }

        if self.sources.configured().is_empty() {
            return Err(Error::configuration("no metric sources configured"));
        }

        Ok(())
    }

    /// Override the date window
    pub fn with_max_days(mut self, max_days: usize) -> Self {
        self.import.max_days_to_import = max_days;
        self
    }

    /// Override the province roll-up policy
    pub fn with_province_policy(mut self, policy: ProvincePolicy) -> Self {
        self.import.province_policy = policy;
        self
    }

    /// Override the load gate policy
    pub fn with_gate_policy(mut self, policy: GatePolicy) -> Self {
        self.import.gate_policy = policy;
        self
    }

    /// Cap the number of attributed rows read per source
    pub fn with_max_rows_per_source(mut self, max_rows: usize) -> Self {
        self.import.max_rows_per_source = Some(max_rows);
        self
    }

    /// Replace all source locators
    pub fn with_sources(
        mut self,
        confirmed: Option<&str>,
        deaths: Option<&str>,
        recovered: Option<&str>,
    ) -> Self {
        self.sources = SourceConfig {
            confirmed: confirmed.map(str::to_string),
            deaths: deaths.map(str::to_string),
            recovered: recovered.map(str::to_string),
        };
        self
    }
}
