//! Deterministic demo dataset
//!
//! Generates confirmed, deaths and recovered aggregations for the known demo
//! countries over a window of days ending at an anchor date. Counts scale with
//! population and come from a seeded `StdRng`, so the same seed and anchor
//! always produce the same dataset. The aggregations go through the normal
//! merger, which assigns identities and derives `active` and the deltas.

use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;

use crate::app::models::MetricKind;
use crate::app::services::aggregator::{AggregationStats, MetricAggregation, MetricTable};
use crate::app::services::country_resolver::CountryResolver;
use crate::app::services::dataset_store::Dataset;
use crate::constants::{DEFAULT_POPULATION, DEMO_COUNTRIES};

/// Seed used by the demo command
pub const DEFAULT_SEED: u64 = 42;

/// Days of history generated by the demo command
pub const DEFAULT_DAYS: usize = 30;

/// Create the demo countries in their listed order
///
/// Merging assigns identities alphabetically; registering first keeps the
/// listed order instead.
pub fn register_countries(dataset: &mut Dataset, resolver: &CountryResolver) {
    for &name in DEMO_COUNTRIES {
        dataset.upsert_country(name, || resolver.profile(name));
    }
}

/// Build one aggregation per metric for the demo countries
pub fn generate(
    days: usize,
    seed: u64,
    resolver: &CountryResolver,
    anchor: NaiveDate,
) -> Vec<MetricAggregation> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut confirmed = MetricTable::new();
    let mut deaths = MetricTable::new();
    let mut recovered = MetricTable::new();

    let dates: Vec<NaiveDate> = (0..days)
        .map(|offset| anchor - Duration::days(offset as i64))
        .collect();

    if !dates.is_empty() {
        for &name in DEMO_COUNTRIES {
            let population = resolver.profile(name).population.unwrap_or(DEFAULT_POPULATION);
            let factor = population as f64 / 1_000_000.0;

            let mut confirmed_by_date = BTreeMap::new();
            let mut deaths_by_date = BTreeMap::new();
            let mut recovered_by_date = BTreeMap::new();

            // Oldest first so the random stream does not depend on the window end
            for &date in dates.iter().rev() {
                let base_cases = (factor * rng.gen_range(50_000..500_000) as f64) as u64;
                let base_deaths = (base_cases as f64 * rng.gen_range(0.005..0.025)) as u64;
                let base_recovered = (base_cases as f64 * rng.gen_range(0.7..1.0)) as u64;

                let variation = rng.gen_range(0.9..1.1);
                let day_confirmed = (base_cases as f64 * variation) as u64;
                let day_deaths = (base_deaths as f64 * variation) as u64;
                let mut day_recovered = (base_recovered as f64 * variation) as u64;
                if day_recovered > day_confirmed {
                    day_recovered = (day_confirmed as f64 * 0.9) as u64;
                }

                confirmed_by_date.insert(date, day_confirmed);
                deaths_by_date.insert(date, day_deaths);
                recovered_by_date.insert(date, day_recovered);
            }

            confirmed.insert(name.to_string(), confirmed_by_date);
            deaths.insert(name.to_string(), deaths_by_date);
            recovered.insert(name.to_string(), recovered_by_date);
        }
    }

    [
        (MetricKind::Confirmed, confirmed),
        (MetricKind::Deaths, deaths),
        (MetricKind::Recovered, recovered),
    ]
    .into_iter()
    .map(|(kind, values)| MetricAggregation {
        kind,
        dates: dates.clone(),
        values,
        stats: AggregationStats::new(),
    })
    .collect()
}
