//! Read views over a dataset
//!
//! Every view returns owned values so callers never hold the store's lock.
//! "Not found" is an empty result, never an error.

use chrono::NaiveDate;
use std::cmp::Ordering;

use super::dataset::Dataset;
use crate::app::models::{CaseRecord, CountryShare, DailySummary, percentage};

/// Date descending, then confirmed descending, then identity for a total order
fn listing_order(a: &CaseRecord, b: &CaseRecord) -> Ordering {
    b.report_date
        .cmp(&a.report_date)
        .then_with(|| b.confirmed.cmp(&a.confirmed))
        .then_with(|| a.id.cmp(&b.id))
}

impl Dataset {
    /// One page of case records in listing order
    pub fn list_cases(&self, skip: usize, limit: usize) -> Vec<CaseRecord> {
        let mut ordered: Vec<&CaseRecord> = self.cases().iter().collect();
        ordered.sort_by(|a, b| listing_order(a, b));
        ordered
            .into_iter()
            .skip(skip)
            .take(limit)
            .cloned()
            .collect()
    }

    /// Records of the country with this code, most recent first
    pub fn cases_by_country_code(&self, code: &str) -> Vec<CaseRecord> {
        let Some(country) = self.country_by_code(code) else {
            return Vec::new();
        };

        let mut cases: Vec<CaseRecord> = self
            .cases()
            .iter()
            .filter(|case| case.country_id == country.id)
            .cloned()
            .collect();
        cases.sort_by(|a, b| b.report_date.cmp(&a.report_date));
        cases
    }

    /// Records reported on a calendar date, in listing order
    pub fn cases_by_date(&self, date: NaiveDate) -> Vec<CaseRecord> {
        let mut cases: Vec<CaseRecord> = self
            .cases()
            .iter()
            .filter(|case| case.report_date == date)
            .cloned()
            .collect();
        cases.sort_by(listing_order);
        cases
    }

    pub fn latest_report_date(&self) -> Option<NaiveDate> {
        self.cases().iter().map(|case| case.report_date).max()
    }

    /// Global totals for a date, `None` when nothing was reported on it
    pub fn summary_for_date(&self, date: NaiveDate) -> Option<DailySummary> {
        let mut summary = DailySummary {
            report_date: date,
            total_confirmed: 0,
            total_deaths: 0,
            total_recovered: 0,
            total_active: 0,
            countries_reporting: 0,
            mortality_rate: 0.0,
            recovery_rate: 0.0,
        };

        for case in self.cases().iter().filter(|case| case.report_date == date) {
            summary.total_confirmed += case.confirmed;
            summary.total_deaths += case.deaths;
            summary.total_recovered += case.recovered;
            summary.total_active += case.active;
            summary.countries_reporting += 1;
        }

        if summary.countries_reporting == 0 {
            return None;
        }

        summary.mortality_rate = percentage(summary.total_deaths, summary.total_confirmed);
        summary.recovery_rate = percentage(summary.total_recovered, summary.total_confirmed);
        Some(summary)
    }

    /// Countries with confirmed cases on a date, largest first
    pub fn top_countries(&self, date: NaiveDate, limit: usize) -> Vec<CountryShare> {
        let mut reporting: Vec<&CaseRecord> = self
            .cases()
            .iter()
            .filter(|case| case.report_date == date && case.confirmed > 0)
            .collect();
        let global: u64 = reporting.iter().map(|case| case.confirmed).sum();
        reporting.sort_by(|a, b| listing_order(a, b));

        reporting
            .into_iter()
            .take(limit)
            .filter_map(|case| {
                let country = self.country(case.country_id)?;
                Some(CountryShare {
                    country_name: country.name.clone(),
                    country_code: country.code.clone(),
                    region: country.region,
                    confirmed: case.confirmed,
                    deaths: case.deaths,
                    recovered: case.recovered,
                    active: case.active,
                    percent_of_global: percentage(case.confirmed, global),
                    mortality_rate: percentage(case.deaths, case.confirmed),
                })
            })
            .collect()
    }
}
