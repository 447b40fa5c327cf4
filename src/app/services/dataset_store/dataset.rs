//! The owned collections behind the dataset store
//!
//! Countries and case records are stored densely with identities assigned
//! sequentially from 1, so lookup by identity is a direct index. Two hash
//! indexes enforce canonical-name uniqueness and the one-record-per-
//! (country, date) constraint.

use chrono::{NaiveDate, Utc};
use std::collections::{HashMap, HashSet};

use crate::app::models::{CaseId, CaseRecord, Country, CountryId};
use crate::app::services::country_resolver::CountryProfile;
use crate::{Error, Result};

/// Canonical countries and merged case records
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    countries: Vec<Country>,
    by_name: HashMap<String, CountryId>,
    cases: Vec<CaseRecord>,
    case_index: HashMap<(CountryId, NaiveDate), usize>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Countries in identity order
    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    /// Case records in identity order
    pub fn cases(&self) -> &[CaseRecord] {
        &self.cases
    }

    pub fn country_count(&self) -> usize {
        self.countries.len()
    }

    pub fn case_count(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty() && self.countries.is_empty()
    }

    pub fn country(&self, id: CountryId) -> Option<&Country> {
        let index = (id as usize).checked_sub(1)?;
        self.countries.get(index)
    }

    pub fn country_by_name(&self, name: &str) -> Option<&Country> {
        self.by_name.get(name).and_then(|&id| self.country(id))
    }

    /// First country whose code matches, ignoring ASCII case
    pub fn country_by_code(&self, code: &str) -> Option<&Country> {
        let code = code.trim();
        self.countries
            .iter()
            .find(|country| country.code.eq_ignore_ascii_case(code))
    }

    pub fn case(&self, id: CaseId) -> Option<&CaseRecord> {
        let index = usize::try_from(id).ok()?.checked_sub(1)?;
        self.cases.get(index)
    }

    /// Identity of a canonical name, creating the country on first sight
    ///
    /// The profile is only consulted when the country is created; an
    /// existing identity is never modified.
    pub fn upsert_country(
        &mut self,
        name: &str,
        profile: impl FnOnce() -> CountryProfile,
    ) -> (CountryId, bool) {
        if let Some(&id) = self.by_name.get(name) {
            return (id, false);
        }

        let id = self.countries.len() as CountryId + 1;
        let profile = profile();
        self.countries.push(Country {
            id,
            code: profile.code,
            name: name.to_string(),
            region: profile.region,
            population: profile.population,
            created_at: Utc::now(),
        });
        self.by_name.insert(name.to_string(), id);
        (id, true)
    }

    /// The record for (country, date), created with zero counters if absent
    pub fn upsert_case(
        &mut self,
        country_id: CountryId,
        date: NaiveDate,
    ) -> (&mut CaseRecord, bool) {
        let (index, created) = match self.case_index.get(&(country_id, date)).copied() {
            Some(index) => (index, false),
            None => {
                let index = self.cases.len();
                let id = index as CaseId + 1;
                self.cases.push(CaseRecord::new(id, country_id, date));
                self.case_index.insert((country_id, date), index);
                (index, true)
            }
        };
        (&mut self.cases[index], created)
    }

    pub(crate) fn cases_mut(&mut self) -> &mut [CaseRecord] {
        &mut self.cases
    }

    /// Verify identity density, name uniqueness and (country, date) uniqueness
    pub fn check_invariants(&self) -> Result<()> {
        for (index, country) in self.countries.iter().enumerate() {
            if country.id as usize != index + 1 {
                return Err(Error::dataset_invariant(format!(
                    "country '{}' has id {} at position {}",
                    country.name,
                    country.id,
                    index + 1
                )));
            }
        }

        if self.by_name.len() != self.countries.len() {
            return Err(Error::dataset_invariant(format!(
                "{} countries but {} distinct names",
                self.countries.len(),
                self.by_name.len()
            )));
        }

        let mut seen = HashSet::with_capacity(self.cases.len());
        for (index, case) in self.cases.iter().enumerate() {
            if case.id as usize != index + 1 {
                return Err(Error::dataset_invariant(format!(
                    "case record has id {} at position {}",
                    case.id,
                    index + 1
                )));
            }
            if self.country(case.country_id).is_none() {
                return Err(Error::dataset_invariant(format!(
                    "case record {} references unknown country {}",
                    case.id, case.country_id
                )));
            }
            if !seen.insert((case.country_id, case.report_date)) {
                return Err(Error::dataset_invariant(format!(
                    "duplicate case record for country {} on {}",
                    case.country_id, case.report_date
                )));
            }
        }

        Ok(())
    }
}
