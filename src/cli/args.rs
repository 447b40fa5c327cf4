//! Command-line argument definitions for the time-series importer
//!
//! This module defines the CLI interface using the clap derive API. Options
//! that shape the import (configuration file, date window, province policy)
//! and output options are global so they can follow any subcommand.

use crate::config::{Config, ProvincePolicy};
use crate::constants::{DEFAULT_PAGE_SIZE, DEFAULT_TOP_COUNTRIES};
use crate::app::services::synthetic::{DEFAULT_DAYS, DEFAULT_SEED};
use crate::{Error, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the COVID-19 time-series importer
///
/// Imports the wide-format confirmed, deaths and recovered time-series files
/// into a per-country, per-date dataset and queries it.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "covid-timeseries",
    version,
    about = "Import and query wide-format COVID-19 time-series data",
    long_about = "Fetches the confirmed, deaths and recovered time-series CSV files \
                  (one row per region, one column per date), rolls provinces up into \
                  countries, merges the metrics into per-country, per-date records with \
                  active cases and daily deltas, and answers queries over the result."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    ///
    /// TOML file with `[sources]` and `[import]` sections. Environment
    /// variables prefixed with `COVID__` override it.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        global = true,
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Number of most recent date columns to import
    #[arg(
        long = "max-days",
        value_name = "DAYS",
        global = true,
        help = "Number of most recent dates to import from each source"
    )]
    pub max_days: Option<usize>,

    /// Roll every province up into its country instead of only US states
    #[arg(
        long = "aggregate-all-provinces",
        global = true,
        help = "Aggregate all provinces into country totals (default: US states only)"
    )]
    pub aggregate_all_provinces: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output format for results
    #[arg(
        long = "format",
        value_enum,
        default_value = "text",
        global = true,
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Run the import pipeline and print a per-metric summary
    Import,
    /// List all countries
    Countries,
    /// List case records
    Cases(CasesArgs),
    /// Global totals for one date
    Summary(SummaryArgs),
    /// Countries with the most confirmed cases on one date
    Top(TopArgs),
    /// Load the synthetic demo dataset instead of importing
    Demo(DemoArgs),
}

/// Arguments for the cases command
#[derive(Debug, Clone, Parser)]
pub struct CasesArgs {
    /// Only records of the country with this code (case-insensitive)
    #[arg(long = "country", value_name = "CODE", conflicts_with = "date")]
    pub country: Option<String>,

    /// Only records reported on this date (YYYY-MM-DD)
    #[arg(long = "date", value_name = "DATE")]
    pub date: Option<NaiveDate>,

    /// Records to skip
    #[arg(long = "skip", value_name = "N", default_value_t = 0)]
    pub skip: usize,

    /// Maximum records to return
    #[arg(long = "limit", value_name = "N", default_value_t = DEFAULT_PAGE_SIZE)]
    pub limit: usize,
}

/// Arguments for the summary command
#[derive(Debug, Clone, Parser)]
pub struct SummaryArgs {
    /// Report date (YYYY-MM-DD); defaults to the most recent date
    #[arg(long = "date", value_name = "DATE")]
    pub date: Option<NaiveDate>,
}

/// Arguments for the top command
#[derive(Debug, Clone, Parser)]
pub struct TopArgs {
    /// Report date (YYYY-MM-DD); defaults to the most recent date
    #[arg(long = "date", value_name = "DATE")]
    pub date: Option<NaiveDate>,

    /// Number of countries to show
    #[arg(long = "limit", value_name = "N", default_value_t = DEFAULT_TOP_COUNTRIES)]
    pub limit: usize,
}

/// Arguments for the demo command
#[derive(Debug, Clone, Parser)]
pub struct DemoArgs {
    /// Days of history ending today
    #[arg(long = "days", value_name = "N", default_value_t = DEFAULT_DAYS)]
    pub days: usize,

    /// Random seed
    #[arg(long = "seed", value_name = "SEED", default_value_t = DEFAULT_SEED)]
    pub seed: u64,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Text,
    /// JSON format for scripting
    Json,
}

impl Args {
    /// Validate the arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if self.max_days == Some(0) {
            return Err(Error::configuration("--max-days must be at least 1"));
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Spinners only make sense for interactive text output
    pub fn show_progress(&self) -> bool {
        !self.quiet && self.output_format == OutputFormat::Text
    }

    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply_overrides(&self, mut config: Config) -> Config {
        if let Some(max_days) = self.max_days {
            config = config.with_max_days(max_days);
        }
        if self.aggregate_all_provinces {
            config = config.with_province_policy(ProvincePolicy::AggregateAll);
        }
        config
    }
}
