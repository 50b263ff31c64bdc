//! Driver roster maintenance on the configuration

use std::path::Path;

use tracing::info;

use bascula_domain::model::Driver;
use bascula_infra::roster_loader::{load_roster_from_file, merge_roster};
use bascula_types::{Result, ValidationError};

use crate::config::Config;

fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_uppercase() == b.trim().to_uppercase()
}

fn not_found(name: &str) -> ValidationError {
    ValidationError::InvalidDriver {
        name: name.to_string(),
        reason: "no such driver".to_string(),
    }
}

/// Append a driver; names must be unique
pub fn add_driver(config: &mut Config, driver: Driver) -> Result<()> {
    if config.drivers.iter().any(|d| same_name(&d.name, &driver.name)) {
        return Err(ValidationError::InvalidDriver {
            name: driver.name,
            reason: "already registered".to_string(),
        }
        .into());
    }
    info!(name = %driver.name, "driver added");
    config.drivers.push(driver);
    Ok(())
}

/// Remove a driver by name
pub fn remove_driver(config: &mut Config, name: &str) -> Result<Driver> {
    let idx = config
        .drivers
        .iter()
        .position(|d| same_name(&d.name, name))
        .ok_or_else(|| not_found(name))?;
    let removed = config.drivers.remove(idx);
    info!(name = %removed.name, "driver removed");
    Ok(removed)
}

/// Switch a driver on or off without losing its settings
pub fn set_driver_active(config: &mut Config, name: &str, active: bool) -> Result<()> {
    let driver = config
        .drivers
        .iter_mut()
        .find(|d| same_name(&d.name, name))
        .ok_or_else(|| not_found(name))?;
    driver.active = active;
    info!(name = %driver.name, active, "driver updated");
    Ok(())
}

/// Merge a TOML roster into the config, replacing drivers by name
///
/// Returns `(added, replaced)`.
pub fn import_roster(config: &mut Config, path: &Path) -> Result<(usize, usize)> {
    let incoming = load_roster_from_file(path)?;
    let total = incoming.len();
    let replaced = merge_roster(&mut config.drivers, incoming);
    info!(path = %path.display(), added = total - replaced, replaced, "roster imported");
    Ok((total - replaced, replaced))
}
