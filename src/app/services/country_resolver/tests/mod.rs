//! Tests for country resolution


use crate::app::services::country_resolver::PopulationLookup;

/// Lookup that knows no populations at all
pub struct EmptyLookup;

impl PopulationLookup for EmptyLookup {
    fn population(&self, _canonical_name: &str) -> Option<u64> {
        None
    }
}
