//! Command handlers

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::debug;

use bascula_app::config::Config;
use bascula_app::generation::{make_rng, GenerationRequest};
use bascula_app::report_service::ReportService;
use bascula_app::repository::{delete_file, find_file, open_registry};
use bascula_app::roster::{add_driver, import_roster, remove_driver, set_driver_active};
use bascula_domain::model::Driver;
use bascula_domain::repository::GeneratedFileRepository;
use bascula_infra::legacy_importer::LegacyConfig;
use bascula_types::{FileKind, OutputFormat, Result, ValidationError};

use crate::cli::{Cli, Commands, ConfigAction, DriverAction, FilesAction};
use crate::output::{output_drivers, output_file, output_files, output_generation, output_records};

/// Options of the `generate` command
struct GenerateOptions {
    start: NaiveDate,
    end: NaiveDate,
    last_ticket: i64,
    last_date: NaiveDate,
    spacing: Option<i64>,
    spacing_range: Option<i64>,
    daily: Option<i64>,
    daily_range: Option<i64>,
    price: Option<f64>,
    skip_sundays: Option<bool>,
    kinds: Vec<FileKind>,
    output_dir: Option<PathBuf>,
    seed: Option<u64>,
    preview: bool,
}

pub fn execute(cli: Cli) -> Result<()> {
    let config_path = match cli.config_file {
        Some(path) => path,
        None => Config::config_path()?,
    };
    let format = cli.format;
    debug!(config = %config_path.display(), "using config file");

    match cli.command {
        Commands::Generate {
            start,
            end,
            last_ticket,
            last_date,
            spacing,
            spacing_range,
            daily,
            daily_range,
            price,
            skip_sundays,
            kinds,
            output_dir,
            seed,
            preview,
        } => cmd_generate(
            &config_path,
            format,
            GenerateOptions {
                start,
                end,
                last_ticket,
                last_date,
                spacing,
                spacing_range,
                daily,
                daily_range,
                price,
                skip_sundays,
                kinds,
                output_dir,
                seed,
                preview,
            },
        ),

        Commands::Driver { action } => cmd_driver(&config_path, format, action),

        Commands::Config {
            action,
            show,
            set_price,
            set_scale,
            set_skip_sundays,
            reset,
        } => match action {
            Some(ConfigAction::Import { path }) => cmd_config_import(&config_path, &path),
            None => cmd_config(
                &config_path,
                format,
                show,
                set_price,
                set_scale,
                set_skip_sundays,
                reset,
            ),
        },

        Commands::Files { action } => cmd_files(&config_path, format, action),
    }
}

fn cmd_generate(config_path: &Path, format: OutputFormat, opts: GenerateOptions) -> Result<()> {
    let config = Config::load_from(config_path)?;

    let mut request =
        GenerationRequest::from_config(&config, opts.start, opts.end, opts.last_ticket, opts.last_date);
    if let Some(spacing) = opts.spacing {
        request.spacing_variance = spacing;
    }
    if let Some(range) = opts.spacing_range {
        request.spacing_variance_range = range;
    }
    if let Some(daily) = opts.daily {
        request.daily_ticket_count = daily;
    }
    if let Some(range) = opts.daily_range {
        request.daily_ticket_count_range = range;
    }
    if let Some(price) = opts.price {
        request.price_per_ton = price;
    }
    if let Some(skip) = opts.skip_sundays {
        request.skip_sundays = skip;
    }

    let output_dir = match opts.output_dir {
        Some(dir) => dir,
        None => config.output_dir()?,
    };
    let registry = open_registry(&config)?;
    let service = ReportService::new(&config, &registry, output_dir);
    let mut rng = make_rng(opts.seed);

    if opts.preview {
        let records = service.preview(&request, &mut rng)?;
        output_records(format, &records)
    } else {
        let output = service.generate(&request, &opts.kinds, &mut rng)?;
        output_generation(format, &output)
    }
}

fn cmd_driver(config_path: &Path, format: OutputFormat, action: DriverAction) -> Result<()> {
    let mut config = Config::load_from(config_path)?;

    match action {
        DriverAction::List => return output_drivers(format, &config.drivers),

        DriverAction::Add {
            name,
            plate,
            tare,
            baseline,
            variance,
            per_day,
            schedule,
            inactive,
        } => {
            let driver = Driver {
                name: name.trim().to_string(),
                plate: plate.trim().to_string(),
                active: !inactive,
                tare_tons: tare,
                baseline_gross_ton: baseline,
                variance_pct: variance,
                tickets_per_day: per_day,
                schedule: schedule
                    .into_iter()
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            };
            let label = driver.name.clone();
            add_driver(&mut config, driver)?;
            println!("Driver added: {}", label);
        }

        DriverAction::Remove { name } => {
            let removed = remove_driver(&mut config, &name)?;
            println!("Driver removed: {}", removed.name);
        }

        DriverAction::Enable { name } => {
            set_driver_active(&mut config, &name, true)?;
            println!("Driver enabled: {}", name);
        }

        DriverAction::Disable { name } => {
            set_driver_active(&mut config, &name, false)?;
            println!("Driver disabled: {}", name);
        }

        DriverAction::Import { path } => {
            let (added, replaced) = import_roster(&mut config, &path)?;
            println!("Roster imported: {} added, {} replaced", added, replaced);
        }
    }

    config.save_to(config_path)
}

#[allow(clippy::too_many_arguments)]
fn cmd_config(
    config_path: &Path,
    format: OutputFormat,
    show: bool,
    set_price: Option<f64>,
    set_scale: Option<String>,
    set_skip_sundays: Option<bool>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save_to(config_path)?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        println!("Config file:      {}", config_path.display());
        return Ok(());
    }

    let mut config = Config::load_from(config_path)?;
    let mut modified = false;

    if let Some(price) = set_price {
        if !price.is_finite() || price < 0.0 {
            return Err(ValidationError::InvalidPrice(price).into());
        }
        config.company.price_per_ton = price;
        modified = true;
    }

    if let Some(scale) = set_scale {
        config.company.certified_scale = scale;
        modified = true;
    }

    if let Some(skip) = set_skip_sundays {
        config.rules.skip_sundays = skip;
        modified = true;
    }

    if modified {
        config.save_to(config_path)?;
        println!("Configuration updated");
    }

    if show || !modified {
        if format == OutputFormat::Json {
            println!("{}", serde_json::to_string_pretty(&config)?);
        } else {
            println!("{}", config);
            println!("Config file:      {}", config_path.display());
        }
    }

    Ok(())
}

fn cmd_config_import(config_path: &Path, legacy_path: &Path) -> Result<()> {
    let legacy = LegacyConfig::load_from_file(legacy_path)?;
    let mut config = Config::load_from(config_path)?;
    config.apply_legacy(&legacy);
    config.save_to(config_path)?;

    println!(
        "Imported {} with {} drivers",
        legacy_path.display(),
        config.drivers.len()
    );
    Ok(())
}

fn cmd_files(config_path: &Path, format: OutputFormat, action: FilesAction) -> Result<()> {
    let config = Config::load_from(config_path)?;
    let registry = open_registry(&config)?;

    match action {
        FilesAction::List { kind } => {
            let files = match kind {
                Some(kind) => registry.list_by_kind(kind)?,
                None => registry.list_all()?,
            };
            output_files(format, &files)
        }
        FilesAction::Show { id } => {
            let file = find_file(&registry, id)?;
            output_file(format, &file)
        }
        FilesAction::Delete { id, purge } => {
            let removed = delete_file(&registry, id, purge)?;
            if purge {
                println!("Deleted {} ({})", removed.name, removed.path);
            } else {
                println!("Removed {} from the registry", removed.name);
            }
            Ok(())
        }
    }
}
