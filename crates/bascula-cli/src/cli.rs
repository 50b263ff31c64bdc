//! CLI definition using clap

use std::path::PathBuf;

use bascula_types::{FileKind, OutputFormat};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bascula")]
#[command(author = "verdemex")]
#[command(version)]
#[command(about = "Synthetic weigh-ticket reports for waste disposal")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(long, short = 'f', global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Verbose logging (RUST_LOG overrides)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    pub config_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate ticket records and write report files
    Generate {
        /// First date of the range (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,

        /// Last date of the range, inclusive (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,

        /// Last ticket number already issued
        #[arg(long)]
        last_ticket: i64,

        /// Date the last ticket was issued (YYYY-MM-DD)
        #[arg(long)]
        last_date: NaiveDate,

        /// Nominal increment between tickets. Uses config value if not specified.
        #[arg(long)]
        spacing: Option<i64>,

        /// ± band around the spacing
        #[arg(long)]
        spacing_range: Option<i64>,

        /// Tickets the station issues per full day
        #[arg(long)]
        daily: Option<i64>,

        /// ± band around the daily count
        #[arg(long)]
        daily_range: Option<i64>,

        /// Price per ton. Uses config value if not specified.
        #[arg(long)]
        price: Option<f64>,

        /// Leave Sundays out of the range
        #[arg(long)]
        skip_sundays: Option<bool>,

        /// Report kind to write; repeat for several
        #[arg(long = "kind", short = 'k', value_enum, default_values_t = [FileKind::Excel])]
        kinds: Vec<FileKind>,

        /// Output directory. Uses config value if not specified.
        #[arg(long, short = 'o')]
        output_dir: Option<PathBuf>,

        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Print the records instead of writing files
        #[arg(long)]
        preview: bool,
    },

    /// Manage the driver roster
    Driver {
        #[command(subcommand)]
        action: DriverAction,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,

        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set price per ton
        #[arg(long)]
        set_price: Option<f64>,

        /// Set the certified scale label
        #[arg(long)]
        set_scale: Option<String>,

        /// Skip Sundays by default
        #[arg(long)]
        set_skip_sundays: Option<bool>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },

    /// Browse generated files
    Files {
        #[command(subcommand)]
        action: FilesAction,
    },
}

#[derive(Subcommand)]
pub enum DriverAction {
    /// List drivers
    List,

    /// Add a driver
    Add {
        /// Driver name
        name: String,

        /// License plate
        #[arg(long, short = 'p', default_value = "")]
        plate: String,

        /// Empty truck mass in tons
        #[arg(long)]
        tare: f64,

        /// Expected product mass per trip in tons
        #[arg(long)]
        baseline: f64,

        /// ± tolerance in percent
        #[arg(long, default_value_t = 0.0)]
        variance: f64,

        /// Tickets per day
        #[arg(long, default_value_t = 1)]
        per_day: i32,

        /// Time slots, comma separated (e.g. "6-8,10-12")
        #[arg(long, value_delimiter = ',')]
        schedule: Vec<String>,

        /// Register the driver as inactive
        #[arg(long)]
        inactive: bool,
    },

    /// Remove a driver
    Remove {
        name: String,
    },

    /// Enable a driver
    Enable {
        name: String,
    },

    /// Disable a driver
    Disable {
        name: String,
    },

    /// Merge drivers from a TOML roster file
    Import {
        path: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Import settings from the old web app's config.json
    Import {
        path: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum FilesAction {
    /// List generated files, newest first
    List {
        /// Only files of this kind
        #[arg(long, value_enum)]
        kind: Option<FileKind>,
    },

    /// Show one registry entry
    Show {
        id: u64,
    },

    /// Remove a registry entry
    Delete {
        id: u64,

        /// Also delete the file from disk
        #[arg(long)]
        purge: bool,
    },
}
