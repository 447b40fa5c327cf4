//! Command implementations for the time-series CLI
//!
//! This module contains the command execution logic, logging setup and
//! result rendering. Every command builds a [`DatasetStore`] from the layered
//! configuration; query commands load it through the single-flight gate
//! first when `auto_import_on_startup` is set.

use crate::app::models::{CaseRecord, Country, CountryShare, DailySummary};
use crate::app::services::dataset_store::DatasetStore;
use crate::app::services::importer::ImportSummary;
use crate::cli::args::{Args, CasesArgs, Commands, DemoArgs, OutputFormat, SummaryArgs, TopArgs};
use crate::config::Config;
use crate::Result;
use chrono::{NaiveDate, Utc};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Main command runner
///
/// Returns whether the command succeeded; an import in which no metric
/// could be loaded counts as a failure.
pub async fn run(args: Args) -> Result<bool> {
    setup_logging(&args)?;
    debug!("Command line arguments: {:?}", args);

    args.validate()?;
    let config = load_configuration(&args)?;
    debug!("Loaded configuration: {:?}", config);

    let Some(command) = args.command.clone() else {
        return Ok(true);
    };

    let store = DatasetStore::from_config(config)?;

    match command {
        Commands::Import => run_import(&args, &store).await,
        Commands::Demo(demo) => run_demo(&args, &store, &demo).await,
        query => {
            if !prepare_store(&args, &store).await {
                return Ok(false);
            }
            match query {
                Commands::Countries => run_countries(&args, &store),
                Commands::Cases(cases) => run_cases(&args, &store, &cases),
                Commands::Summary(summary) => run_summary(&args, &store, &summary),
                Commands::Top(top) => run_top(&args, &store, &top),
                Commands::Import | Commands::Demo(_) => Ok(true),
            }
        }
    }
}

/// Set up structured logging to stderr
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("covid_timeseries={}", log_level)));

    // A second initialisation (e.g. from tests) is not an error worth failing on
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .try_init();

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Layer the configuration file, environment and command-line overrides
pub fn load_configuration(args: &Args) -> Result<Config> {
    let config = args.apply_overrides(Config::load(args.config_file.as_deref())?);
    config.validate()?;
    Ok(config)
}

fn spinner(args: &Args, message: &str) -> Option<ProgressBar> {
    if !args.show_progress() {
        return None;
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed}] {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}

/// Load the dataset for a query command
async fn prepare_store(args: &Args, store: &DatasetStore) -> bool {
    if !store.config().import.auto_import_on_startup {
        warn!("auto_import_on_startup is disabled; querying an empty dataset");
        return true;
    }

    let pb = spinner(args, "Importing time-series sources...");
    let loaded = store.ensure_loaded().await;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    if !loaded {
        eprintln!("{} no metric source could be imported", "Error:".red().bold());
    }
    loaded
}

async fn run_import(args: &Args, store: &DatasetStore) -> Result<bool> {
    let pb = spinner(args, "Importing time-series sources...");
    let summary = store.import().await;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    emit(args, &summary, || print_import_summary(&summary))?;
    Ok(summary.success)
}

async fn run_demo(args: &Args, store: &DatasetStore, demo: &DemoArgs) -> Result<bool> {
    let anchor = Utc::now().date_naive();
    info!(
        "Generating {} days of synthetic data ending {} (seed {})",
        demo.days, anchor, demo.seed
    );
    let cases = store.load_synthetic(demo.days, demo.seed, anchor).await;

    let summary = store.summary_for_date(anchor);
    emit(args, &summary, || {
        println!(
            "{} {} countries, {} case records",
            "Demo dataset:".bold(),
            store.country_count(),
            cases
        );
        if let Some(summary) = &summary {
            print_daily_summary(summary);
        }
    })?;
    Ok(true)
}

fn run_countries(args: &Args, store: &DatasetStore) -> Result<bool> {
    let countries = store.list_countries();
    emit(args, &countries, || print_countries(&countries))?;
    Ok(true)
}

fn run_cases(args: &Args, store: &DatasetStore, cases_args: &CasesArgs) -> Result<bool> {
    let cases = match (&cases_args.country, cases_args.date) {
        (Some(code), _) => store.list_cases_by_country_code(code),
        (None, Some(date)) => store.list_cases_by_date(date),
        (None, None) => store.list_cases(cases_args.skip, cases_args.limit),
    };

    let countries = store.list_countries();
    emit(args, &cases, || print_cases(&cases, &countries))?;
    Ok(true)
}

fn run_summary(args: &Args, store: &DatasetStore, summary_args: &SummaryArgs) -> Result<bool> {
    let Some(date) = resolve_date(store, summary_args.date) else {
        return Ok(true);
    };

    let summary = store.summary_for_date(date);
    emit(args, &summary, || match &summary {
        Some(summary) => print_daily_summary(summary),
        None => println!("No records for {}", date),
    })?;
    Ok(true)
}

fn run_top(args: &Args, store: &DatasetStore, top_args: &TopArgs) -> Result<bool> {
    let Some(date) = resolve_date(store, top_args.date) else {
        return Ok(true);
    };

    let top = store.top_countries(date, top_args.limit);
    emit(args, &top, || print_top(date, &top))?;
    Ok(true)
}

/// Requested date, or the most recent date in the dataset
fn resolve_date(store: &DatasetStore, requested: Option<NaiveDate>) -> Option<NaiveDate> {
    let date = requested.or_else(|| store.latest_report_date());
    if date.is_none() {
        println!("Dataset is empty");
    }
    date
}

/// Print `value` as JSON, or run the text renderer
fn emit<T: Serialize>(args: &Args, value: &T, text: impl FnOnce()) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => text(),
    }
    Ok(())
}

// =============================================================================
// Text Rendering
// =============================================================================

fn print_import_summary(summary: &ImportSummary) {
    println!("{}", "Import Summary".bold());
    for report in &summary.metrics {
        let status = if report.success {
            "ok".green()
        } else {
            "failed".red()
        };
        println!("  [{}] {}", status, report.summary());
    }

    let overall = if summary.success {
        "SUCCESS".green().bold()
    } else {
        "FAILED".red().bold()
    };
    println!("{} {}", overall, summary.summary());
}

fn print_countries(countries: &[Country]) {
    println!(
        "{}",
        format!("{:>4}  {:<4} {:<28} {:<10}", "ID", "CODE", "NAME", "REGION").bold()
    );
    for country in countries {
        println!(
            "{:>4}  {:<4} {:<28} {:<10}",
            country.id,
            country.code,
            country.name,
            country.region.as_str()
        );
    }
}

fn print_cases(cases: &[CaseRecord], countries: &[Country]) {
    if cases.is_empty() {
        println!("No case records");
        return;
    }

    println!(
        "{}",
        format!(
            "{:>6}  {:<10}  {:<20} {:>12} {:>10} {:>12} {:>12} {:>10}",
            "ID", "DATE", "COUNTRY", "CONFIRMED", "DEATHS", "RECOVERED", "ACTIVE", "NEW"
        )
        .bold()
    );
    for case in cases {
        let name = countries
            .iter()
            .find(|country| country.id == case.country_id)
            .map(|country| country.name.as_str())
            .unwrap_or("?");
        println!(
            "{:>6}  {:<10}  {:<20} {:>12} {:>10} {:>12} {:>12} {:>10}",
            case.id,
            case.report_date.to_string(),
            name,
            case.confirmed,
            case.deaths,
            case.recovered,
            case.active,
            case.daily_confirmed
        );
    }
}

fn print_daily_summary(summary: &DailySummary) {
    println!("{} {}", "Global summary for".bold(), summary.report_date);
    println!("  Countries reporting: {}", summary.countries_reporting);
    println!("  Confirmed:           {}", summary.total_confirmed);
    println!(
        "  Deaths:              {} ({:.2}%)",
        summary.total_deaths, summary.mortality_rate
    );
    println!(
        "  Recovered:           {} ({:.2}%)",
        summary.total_recovered, summary.recovery_rate
    );
    println!("  Active:              {}", summary.total_active);
}

fn print_top(date: NaiveDate, top: &[CountryShare]) {
    if top.is_empty() {
        println!("No confirmed cases reported on {}", date);
        return;
    }

    println!("{} {}", "Top countries on".bold(), date);
    for (rank, share) in top.iter().enumerate() {
        println!(
            "{:>3}. {:<24} {:<4} {:<9} {:>12} {:>6.2}%  mortality {:.2}%",
            rank + 1,
            share.country_name,
            share.country_code,
            share.region.as_str(),
            share.confirmed,
            share.percent_of_global,
            share.mortality_rate
        );
    }
}
