//! Population lookup consumed by the resolver

use crate::constants::{COUNTRY_POPULATIONS, DEFAULT_POPULATION};

/// Pure lookup from canonical country name to population
pub trait PopulationLookup: Send + Sync {
    fn population(&self, canonical_name: &str) -> Option<u64>;
}

/// Built-in population table
///
/// Names missing from the table get [`DEFAULT_POPULATION`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticPopulationTable;

impl PopulationLookup for StaticPopulationTable {
    fn population(&self, canonical_name: &str) -> Option<u64> {
        let population = COUNTRY_POPULATIONS
            .iter()
            .find(|(name, _)| *name == canonical_name)
            .map(|&(_, population)| population)
            .unwrap_or(DEFAULT_POPULATION);
        Some(population)
    }
}
