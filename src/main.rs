use clap::Parser;
use covid_timeseries::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        let shutdown_signal = async {
            if tokio::signal::ctrl_c().await.is_err() {
                // Without a signal handler, wait for the command instead
                std::future::pending::<()>().await;
            }
        };

        tokio::select! {
            result = commands::run(args) => Some(result),
            _ = shutdown_signal => None,
        }
    });

    match result {
        Some(Ok(true)) => process::exit(0),
        Some(Ok(false)) => process::exit(1),
        Some(Err(error)) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
        None => {
            eprintln!("\nReceived CTRL+C, shutting down...");
            process::exit(130);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("COVID-19 Time-Series Importer");
    println!("=============================");
    println!();
    println!("Import the wide-format confirmed, deaths and recovered time-series CSV");
    println!("files into a per-country, per-date dataset and query it.");
    println!();
    println!("USAGE:");
    println!("    covid-timeseries <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    import      Run the import pipeline and print a per-metric summary");
    println!("    countries   List all countries");
    println!("    cases       List case records (paged, by country or by date)");
    println!("    summary     Global totals for one date");
    println!("    top         Countries with the most confirmed cases on one date");
    println!("    demo        Load a synthetic demo dataset");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <FILE>          Configuration file (TOML)");
    println!("        --max-days <DAYS>        Most recent dates to import (default 10)");
    println!("        --aggregate-all-provinces");
    println!("                                 Roll all provinces up, not only US states");
    println!("        --format <text|json>     Output format");
    println!("    -v, --verbose                Increase logging verbosity");
    println!("    -q, --quiet                  Only print errors");
    println!();
    println!("EXAMPLES:");
    println!("    # Import the default upstream sources:");
    println!("    covid-timeseries import");
    println!();
    println!("    # Cases for one country over the last 30 days, as JSON:");
    println!("    covid-timeseries cases --country US --max-days 30 --format json");
    println!();
    println!("    # Top 10 countries on a given date:");
    println!("    covid-timeseries top --date 2023-03-09 --limit 10");
    println!();
    println!("For detailed help on any command, use:");
    println!("    covid-timeseries <COMMAND> --help");
}
