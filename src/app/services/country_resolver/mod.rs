//! Country resolution for raw geographic labels
//!
//! Decides whether a source row is attributed to a country at all and under
//! which canonical name, then derives the code, region and population of a
//! canonical name from fixed lookup tables.
//!
//! - [`naming`] - Alias table, code derivation and region classification
//! - [`lookup`] - Population lookup consumed when a country is first created
//!
//! The tables are a display and grouping aid: two-letter fallback codes can
//! collide and unmapped names land in [`Region::Other`].

pub mod lookup;
pub mod naming;

#[cfg(test)]
pub mod tests;

use std::sync::Arc;

use crate::app::models::Region;
use crate::config::ProvincePolicy;
use crate::constants::ROLL_UP_COUNTRY_LABEL;

pub use lookup::{PopulationLookup, StaticPopulationTable};
pub use naming::{canonical_name, classify_region, country_code};

/// Why a row was not attributed to any country
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The country label is blank
    MissingCountry,
    /// A sub-national row excluded by the province policy
    Province,
}

/// Outcome of resolving a row's geographic labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribution {
    /// Attribute the row to this canonical country name
    Country(String),
    Skipped(SkipReason),
}

/// Derived attributes of a canonical country
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryProfile {
    pub code: String,
    pub region: Region,
    pub population: Option<u64>,
}

/// Maps raw country/province labels to canonical countries
#[derive(Clone)]
pub struct CountryResolver {
    policy: ProvincePolicy,
    lookup: Arc<dyn PopulationLookup>,
}

impl std::fmt::Debug for CountryResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountryResolver")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl CountryResolver {
    /// Create a resolver backed by the built-in population table
    pub fn new(policy: ProvincePolicy) -> Self {
        Self::with_lookup(policy, Arc::new(StaticPopulationTable))
    }

    /// Create a resolver with a caller-supplied population lookup
    pub fn with_lookup(policy: ProvincePolicy, lookup: Arc<dyn PopulationLookup>) -> Self {
        Self { policy, lookup }
    }

    /// Decide whether and to which canonical country a row is attributed
    ///
    /// Under [`ProvincePolicy::UsOnly`] a row with a non-empty province label
    /// is skipped unless its country label is `US` (case-insensitive), whose
    /// state rows are rolled up into the national total.
    pub fn attribute(&self, country_label: &str, province_label: Option<&str>) -> Attribution {
        let country_label = country_label.trim();
        if country_label.is_empty() {
            return Attribution::Skipped(SkipReason::MissingCountry);
        }

        let has_province = province_label.is_some_and(|p| !p.trim().is_empty());
        if has_province
            && self.policy == ProvincePolicy::UsOnly
            && !country_label.eq_ignore_ascii_case(ROLL_UP_COUNTRY_LABEL)
        {
            return Attribution::Skipped(SkipReason::Province);
        }

        Attribution::Country(canonical_name(country_label))
    }

    /// Code, region and population of a canonical name
    pub fn profile(&self, canonical_name: &str) -> CountryProfile {
        CountryProfile {
            code: country_code(canonical_name),
            region: classify_region(canonical_name),
            population: self.lookup.population(canonical_name),
        }
    }
}
