//! Date-column resolution for wide-format headers
//!
//! Identifies the header columns that are report dates (`M/d/yy`), orders them
//! most recent first and keeps a bounded window. Geographic metadata columns
//! never match the date shape and are ignored.

use chrono::NaiveDate;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::debug;

use crate::app::services::source_reader::ColumnIndex;
use crate::constants::{DATE_COLUMN_FORMAT, DATE_COLUMN_PATTERN};

static DATE_COLUMN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DATE_COLUMN_PATTERN).expect("Invalid date column pattern"));

/// A header column that carries a report date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateColumn {
    pub name: String,
    pub index: usize,
    pub date: NaiveDate,
}

/// Parse a header name as a report date, `None` for non-date columns
pub fn parse_date_column(name: &str) -> Option<NaiveDate> {
    let trimmed = name.trim();
    if !DATE_COLUMN_RE.is_match(trimmed) {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, DATE_COLUMN_FORMAT).ok()
}

/// The bounded, most-recent-first set of date columns selected for import
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateColumnSet {
    columns: Vec<DateColumn>,
}

impl DateColumnSet {
    /// Select at most `max_days` date columns, most recent first
    ///
    /// When two headers parse to the same calendar date only the leftmost one
    /// is kept.
    pub fn resolve(header: &ColumnIndex, max_days: usize) -> Self {
        let mut seen = HashSet::new();
        let mut columns: Vec<DateColumn> = header
            .names()
            .iter()
            .enumerate()
            .filter_map(|(index, name)| {
                parse_date_column(name).map(|date| DateColumn {
                    name: name.clone(),
                    index,
                    date,
                })
            })
            .filter(|column| {
                let first = seen.insert(column.date);
                if !first {
                    debug!("Ignoring duplicate date column '{}'", column.name);
                }
                first
            })
            .collect();

        let available = columns.len();
        columns.sort_by(|a, b| b.date.cmp(&a.date));
        columns.truncate(max_days);

        debug!(
            "Selected {} of {} date columns (window {})",
            columns.len(),
            available,
            max_days
        );

        Self { columns }
    }

    /// Selected columns, most recent first
    pub fn columns(&self) -> &[DateColumn] {
        &self.columns
    }

    /// Selected dates, most recent first
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.columns.iter().map(|column| column.date).collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn most_recent(&self) -> Option<NaiveDate> {
        self.columns.first().map(|column| column.date)
    }

    pub fn oldest(&self) -> Option<NaiveDate> {
        self.columns.last().map(|column| column.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csv::StringRecord;

    fn header(names: &[&str]) -> ColumnIndex {
        ColumnIndex::from_record(&StringRecord::from(names.to_vec()))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date_column_shapes() {
        assert_eq!(parse_date_column("3/14/23"), Some(date(2023, 3, 14)));
        assert_eq!(parse_date_column("12/1/20"), Some(date(2020, 12, 1)));
        assert_eq!(parse_date_column("03/09/23"), Some(date(2023, 3, 9)));
        assert_eq!(parse_date_column("3/14/2023"), None);
        assert_eq!(parse_date_column("2023-03-14"), None);
        assert_eq!(parse_date_column("13/1/23"), None);
        assert_eq!(parse_date_column("Lat"), None);
        assert_eq!(parse_date_column("Province/State"), None);
    }

    #[test]
    fn test_metadata_columns_ignored() {
        let set = DateColumnSet::resolve(
            &header(&["Province/State", "Country/Region", "Lat", "Long", "1/22/20"]),
            10,
        );
        assert_eq!(set.len(), 1);
        assert_eq!(set.columns()[0].index, 4);
        assert_eq!(set.columns()[0].name, "1/22/20");
    }

    #[test]
    fn test_orders_most_recent_first_and_truncates() {
        let set = DateColumnSet::resolve(
            &header(&[
                "Province/State",
                "Country/Region",
                "Lat",
                "Long",
                "12/30/22",
                "12/31/22",
                "1/1/23",
                "1/2/23",
            ]),
            3,
        );

        assert_eq!(
            set.dates(),
            vec![date(2023, 1, 2), date(2023, 1, 1), date(2022, 12, 31)]
        );
        assert_eq!(set.most_recent(), Some(date(2023, 1, 2)));
        assert_eq!(set.oldest(), Some(date(2022, 12, 31)));
    }

    #[test]
    fn test_window_larger_than_available() {
        let set = DateColumnSet::resolve(&header(&["Country/Region", "3/8/23", "3/9/23"]), 10);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_duplicate_dates_keep_leftmost() {
        let set = DateColumnSet::resolve(&header(&["Country/Region", "3/9/23", "03/09/23"]), 10);
        assert_eq!(set.len(), 1);
        assert_eq!(set.columns()[0].index, 1);
    }

    #[test]
    fn test_no_date_columns() {
        let set = DateColumnSet::resolve(&header(&["Province/State", "Country/Region"]), 10);
        assert!(set.is_empty());
        assert_eq!(set.most_recent(), None);
    }
}
