//! Bascula - synthetic weigh-ticket reports for waste disposal
//!
//! Generates ticket sequences over a date range and renders them as a
//! spreadsheet, text slips, a zip of slips or CSV.

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
