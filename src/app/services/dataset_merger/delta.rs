//! Day-over-day delta derivation
//!
//! Records are grouped by country and walked in ascending date order. The
//! first record of a country has no predecessor, so its deltas equal its own
//! counters. Later deltas are floored at zero.

use std::collections::HashMap;

use crate::app::models::CountryId;
use crate::app::services::dataset_store::Dataset;

/// Recompute `daily_confirmed` and `daily_deaths` for every record
///
/// Returns the number of records visited.
pub fn recompute_daily_deltas(dataset: &mut Dataset) -> usize {
    let cases = dataset.cases_mut();

    let mut groups: HashMap<CountryId, Vec<usize>> = HashMap::new();
    for (index, case) in cases.iter().enumerate() {
        groups.entry(case.country_id).or_default().push(index);
    }

    for indices in groups.values_mut() {
        indices.sort_by_key(|&index| cases[index].report_date);

        let mut previous: Option<(u64, u64)> = None;
        for &index in indices.iter() {
            let case = &mut cases[index];
            match previous {
                None => {
                    case.daily_confirmed = case.confirmed;
                    case.daily_deaths = case.deaths;
                }
                Some((confirmed, deaths)) => {
                    case.daily_confirmed = case.confirmed.saturating_sub(confirmed);
                    case.daily_deaths = case.deaths.saturating_sub(deaths);
                }
            }
            previous = Some((case.confirmed, case.deaths));
        }
    }

    cases.len()
}
