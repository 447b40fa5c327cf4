//! Application constants for the time-series importer
//!
//! This module contains the upstream source contract, default values and the
//! fixed country lookup tables used by the country resolver.

// =============================================================================
// Upstream Source Contract
// =============================================================================

/// Column holding the sub-national label
pub const PROVINCE_COLUMN: &str = "Province/State";

/// Column holding the country label
pub const COUNTRY_COLUMN: &str = "Country/Region";

/// chrono format of the date column headers (`M/d/yy`, e.g. `3/14/23`)
pub const DATE_COLUMN_FORMAT: &str = "%m/%d/%y";

/// Shape of a date column header before it is handed to chrono
pub const DATE_COLUMN_PATTERN: &str = r"^\d{1,2}/\d{1,2}/\d{2}$";

/// Country label whose sub-national rows are rolled up instead of dropped
pub const ROLL_UP_COUNTRY_LABEL: &str = "US";

/// Default global time-series sources
pub mod sources {
    pub const CONFIRMED_URL: &str = "https://raw.githubusercontent.com/CSSEGISandData/COVID-19/master/csse_covid_19_data/csse_covid_19_time_series/time_series_covid19_confirmed_global.csv";
    pub const DEATHS_URL: &str = "https://raw.githubusercontent.com/CSSEGISandData/COVID-19/master/csse_covid_19_data/csse_covid_19_time_series/time_series_covid19_deaths_global.csv";
    pub const RECOVERED_URL: &str = "https://raw.githubusercontent.com/CSSEGISandData/COVID-19/master/csse_covid_19_data/csse_covid_19_time_series/time_series_covid19_recovered_global.csv";
}

// =============================================================================
// Import Defaults
// =============================================================================

/// Number of most recent date columns imported per source
pub const DEFAULT_MAX_DAYS_TO_IMPORT: usize = 10;

/// Fetch timeout for a single source
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 300;

/// Default page size for case listings
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Default number of entries in the top-countries view
pub const DEFAULT_TOP_COUNTRIES: usize = 20;

/// Population assumed for countries missing from the lookup table
pub const DEFAULT_POPULATION: u64 = 10_000_000;

/// Code used when a name is too short for the two-letter fallback
pub const UNKNOWN_COUNTRY_CODE: &str = "UN";

// =============================================================================
// Country Lookup Tables
// =============================================================================

/// Upstream labels rewritten before aggregation (raw label, canonical name)
pub const COUNTRY_ALIASES: &[(&str, &str)] = &[
    ("US", "United States"),
    ("Korea, South", "South Korea"),
    ("Korea, North", "North Korea"),
    ("Taiwan*", "Taiwan"),
    ("Burma", "Myanmar"),
    ("Czechia", "Czech Republic"),
    ("Cote d'Ivoire", "Ivory Coast"),
    ("Holy See", "Vatican City"),
    ("West Bank and Gaza", "Palestine"),
];

/// Known ISO codes by canonical name
pub const COUNTRY_CODES: &[(&str, &str)] = &[
    ("United States", "US"),
    ("China", "CN"),
    ("India", "IN"),
    ("Brazil", "BR"),
    ("Russia", "RU"),
    ("France", "FR"),
    ("United Kingdom", "GB"),
    ("Turkey", "TR"),
    ("Iran", "IR"),
    ("Germany", "DE"),
    ("Italy", "IT"),
    ("Indonesia", "ID"),
    ("Pakistan", "PK"),
    ("Ukraine", "UA"),
    ("Poland", "PL"),
    ("South Africa", "ZA"),
    ("Netherlands", "NL"),
    ("Morocco", "MA"),
    ("Saudi Arabia", "SA"),
    ("Spain", "ES"),
    ("Canada", "CA"),
    ("Argentina", "AR"),
    ("Mexico", "MX"),
    ("Philippines", "PH"),
    ("Malaysia", "MY"),
    ("Vietnam", "VN"),
    ("Thailand", "TH"),
    ("Japan", "JP"),
    ("South Korea", "KR"),
    ("Switzerland", "CH"),
    ("Belgium", "BE"),
    ("Austria", "AT"),
    ("Portugal", "PT"),
    ("Australia", "AU"),
    ("Peru", "PE"),
    ("Colombia", "CO"),
];

/// Region membership lists
pub mod regions {
    pub const ASIA: &[&str] = &[
        "China",
        "India",
        "Indonesia",
        "Pakistan",
        "Turkey",
        "Iran",
        "Philippines",
        "Malaysia",
        "Vietnam",
        "Thailand",
        "Japan",
        "Saudi Arabia",
        "South Korea",
    ];

    pub const EUROPE: &[&str] = &[
        "Russia",
        "France",
        "United Kingdom",
        "Germany",
        "Italy",
        "Ukraine",
        "Poland",
        "Netherlands",
        "Spain",
        "Switzerland",
        "Belgium",
        "Austria",
        "Portugal",
    ];

    pub const AMERICAS: &[&str] = &[
        "United States",
        "Brazil",
        "Canada",
        "Argentina",
        "Mexico",
        "Peru",
        "Colombia",
    ];

    pub const AFRICA: &[&str] = &["South Africa", "Morocco"];
}

/// Approximate populations by canonical name
pub const COUNTRY_POPULATIONS: &[(&str, u64)] = &[
    ("China", 1_400_000_000),
    ("India", 1_380_000_000),
    ("United States", 331_000_000),
    ("Indonesia", 274_000_000),
    ("Pakistan", 221_000_000),
    ("Brazil", 212_000_000),
    ("Russia", 146_000_000),
    ("Mexico", 129_000_000),
    ("Japan", 125_000_000),
    ("Philippines", 110_000_000),
    ("Vietnam", 97_000_000),
    ("Turkey", 84_000_000),
    ("Iran", 84_000_000),
    ("Germany", 83_000_000),
    ("Thailand", 70_000_000),
    ("United Kingdom", 67_000_000),
    ("France", 65_000_000),
    ("Italy", 60_000_000),
    ("South Africa", 59_000_000),
    ("Spain", 47_000_000),
    ("Argentina", 45_000_000),
    ("Ukraine", 44_000_000),
    ("Poland", 38_000_000),
    ("Canada", 38_000_000),
    ("Morocco", 37_000_000),
    ("Saudi Arabia", 35_000_000),
    ("Malaysia", 32_000_000),
    ("Netherlands", 17_000_000),
];

/// Countries included in the synthetic demo dataset, in identity order
pub const DEMO_COUNTRIES: &[&str] = &[
    "United States",
    "China",
    "India",
    "Brazil",
    "Russia",
    "France",
    "United Kingdom",
    "Turkey",
    "Iran",
    "Germany",
    "Italy",
    "Indonesia",
    "Pakistan",
    "Ukraine",
    "Poland",
    "South Africa",
    "Netherlands",
    "Morocco",
    "Saudi Arabia",
    "Spain",
    "Canada",
    "Argentina",
    "Mexico",
    "Philippines",
    "Malaysia",
    "Vietnam",
    "Thailand",
    "Japan",
];
