//! Data models for the COVID-19 time-series dataset
//!
//! This module contains the canonical country entity, the per-country,
//! per-date case record and the derived summary views served to readers.

use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identity of a canonical country, assigned on first observation
pub type CountryId = u32;

/// Identity of a case record, assigned on first creation
pub type CaseId = u64;

// =============================================================================
// Classification Enums
// =============================================================================

/// Fixed region classification used for grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    Asia,
    Europe,
    Americas,
    Africa,
    Other,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Asia => "Asia",
            Region::Europe => "Europe",
            Region::Americas => "Americas",
            Region::Africa => "Africa",
            Region::Other => "Other",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The cumulative metric carried by a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MetricKind {
    Confirmed,
    Deaths,
    Recovered,
}

impl MetricKind {
    /// All metrics in merge order
    pub const ALL: [MetricKind; 3] = [
        MetricKind::Confirmed,
        MetricKind::Deaths,
        MetricKind::Recovered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Confirmed => "confirmed",
            MetricKind::Deaths => "deaths",
            MetricKind::Recovered => "recovered",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "confirmed" => Ok(MetricKind::Confirmed),
            "deaths" => Ok(MetricKind::Deaths),
            "recovered" => Ok(MetricKind::Recovered),
            other => Err(Error::configuration(format!(
                "Unknown metric '{}' (expected confirmed, deaths or recovered)",
                other
            ))),
        }
    }
}

// =============================================================================
// Country
// =============================================================================

/// Canonical geographic entity after alias resolution and province roll-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    /// Stable identity, monotonically assigned within a process lifetime
    pub id: CountryId,

    /// ISO-like code; not guaranteed unique for fallback-derived codes
    pub code: String,

    /// Canonical display name, unique within a dataset
    pub name: String,

    pub region: Region,

    /// Only used to scale the synthetic demo dataset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population: Option<u64>,

    /// When the country was first observed
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Case Record
// =============================================================================

/// One country's epidemiological snapshot for one report date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub id: CaseId,
    pub country_id: CountryId,
    pub report_date: NaiveDate,
    pub confirmed: u64,
    pub deaths: u64,
    pub recovered: u64,

    /// `confirmed - deaths - recovered`, floored at zero
    pub active: u64,

    /// Change in `confirmed` against the previous date of the same country
    pub daily_confirmed: u64,

    /// Change in `deaths` against the previous date of the same country
    pub daily_deaths: u64,
}

impl CaseRecord {
    /// Create a record with all counters at zero
    pub fn new(id: CaseId, country_id: CountryId, report_date: NaiveDate) -> Self {
        Self {
            id,
            country_id,
            report_date,
            confirmed: 0,
            deaths: 0,
            recovered: 0,
            active: 0,
            daily_confirmed: 0,
            daily_deaths: 0,
        }
    }

    /// Current value of the counter a metric writes to
    pub fn counter(&self, kind: MetricKind) -> u64 {
        match kind {
            MetricKind::Confirmed => self.confirmed,
            MetricKind::Deaths => self.deaths,
            MetricKind::Recovered => self.recovered,
        }
    }

    /// Overwrite the counter a metric writes to and recompute `active`
    pub fn set_counter(&mut self, kind: MetricKind, value: u64) {
        match kind {
            MetricKind::Confirmed => self.confirmed = value,
            MetricKind::Deaths => self.deaths = value,
            MetricKind::Recovered => self.recovered = value,
        }
        self.recompute_active();
    }

    pub fn recompute_active(&mut self) {
        self.active = self
            .confirmed
            .saturating_sub(self.deaths)
            .saturating_sub(self.recovered);
    }
}

// =============================================================================
// Derived Views
// =============================================================================

/// Global totals across every country reporting on one date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub report_date: NaiveDate,
    pub total_confirmed: u64,
    pub total_deaths: u64,
    pub total_recovered: u64,
    pub total_active: u64,
    pub countries_reporting: usize,

    /// Deaths as a percentage of confirmed
    pub mortality_rate: f64,

    /// Recovered as a percentage of confirmed
    pub recovery_rate: f64,
}

/// One country's share of the global confirmed total on a date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryShare {
    pub country_name: String,
    pub country_code: String,
    pub region: Region,
    pub confirmed: u64,
    pub deaths: u64,
    pub recovered: u64,
    pub active: u64,
    pub percent_of_global: f64,
    pub mortality_rate: f64,
}

/// Percentage of `part` in `whole`, zero when `whole` is zero
pub fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
