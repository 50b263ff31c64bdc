//! Driver roster loader from TOML
//!
//! ```toml
//! [[drivers]]
//! name = "JUAN PEREZ"
//! plate = "JAL-12-34"
//! tare_tons = 9.5
//! baseline_gross_ton = 14.0
//! variance_pct = 8.0
//! tickets_per_day = 2
//! schedule = ["6-8", "10-12"]
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use bascula_domain::model::Driver;
use bascula_types::{ConfigError, Error, Result};

/// Container for parsing a roster file
#[derive(Debug, Deserialize)]
struct RosterFile {
    #[serde(default)]
    drivers: Vec<Driver>,
}

/// Load drivers from a TOML roster file
pub fn load_roster_from_file(path: &Path) -> Result<Vec<Driver>> {
    let content = fs::read_to_string(path).map_err(|e| {
        Error::Config(ConfigError::ParseError(format!(
            "Failed to read roster file {}: {}",
            path.display(),
            e
        )))
    })?;

    load_roster_from_str(&content)
}

/// Load drivers from a TOML string
pub fn load_roster_from_str(toml_content: &str) -> Result<Vec<Driver>> {
    let roster: RosterFile = toml::from_str(toml_content).map_err(|e| {
        Error::Config(ConfigError::ParseError(format!(
            "Failed to parse roster TOML: {}",
            e
        )))
    })?;

    Ok(roster.drivers)
}

/// Merge `incoming` into `roster`, replacing drivers with the same name
///
/// Names compare case-insensitively after trimming. Returns how many drivers
/// were replaced.
pub fn merge_roster(roster: &mut Vec<Driver>, incoming: Vec<Driver>) -> usize {
    let mut replaced = 0;
    for driver in incoming {
        let key = driver.name.trim().to_uppercase();
        match roster
            .iter_mut()
            .find(|d| d.name.trim().to_uppercase() == key)
        {
            Some(existing) => {
                *existing = driver;
                replaced += 1;
            }
            None => roster.push(driver),
        }
    }
    replaced
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_TOML: &str = r#"
[[drivers]]
name = "JUAN PEREZ"
plate = "JAL-12-34"
tare_tons = 9.5
baseline_gross_ton = 14.0
variance_pct = 8.0
tickets_per_day = 2
schedule = ["6-8", "10-12"]

[[drivers]]
name = "PEDRO LOPEZ"
plate = "JAL-99-00"
active = false
tare_tons = 8.0
baseline_gross_ton = 12.5
"#;

    #[test]
    fn test_load_from_str() {
        let drivers = load_roster_from_str(TEST_TOML).unwrap();
        assert_eq!(drivers.len(), 2);
        assert_eq!(drivers[0].schedule, vec!["6-8", "10-12"]);
        assert_eq!(drivers[0].tickets_per_day, 2);
    }

    #[test]
    fn test_defaults_applied() {
        let drivers = load_roster_from_str(TEST_TOML).unwrap();
        let pedro = &drivers[1];
        assert!(!pedro.active);
        assert_eq!(pedro.tickets_per_day, 1);
        assert_eq!(pedro.variance_pct, 0.0);
        assert!(pedro.schedule.is_empty());
    }

    #[test]
    fn test_empty_roster() {
        assert!(load_roster_from_str("").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_toml() {
        let result = load_roster_from_str("[[drivers]]\nname = 3");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::ParseError(_)))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = load_roster_from_file(Path::new("/nonexistent/roster.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_merge_replaces_by_name() {
        let mut roster = load_roster_from_str(TEST_TOML).unwrap();
        let mut update = roster[0].clone();
        update.name = " juan perez ".to_string();
        update.plate = "NEW-001".to_string();
        let mut newcomer = roster[1].clone();
        newcomer.name = "LUIS".to_string();

        let replaced = merge_roster(&mut roster, vec![update, newcomer]);
        assert_eq!(replaced, 1);
        assert_eq!(roster.len(), 3);
        assert_eq!(roster[0].plate, "NEW-001");
        assert_eq!(roster[2].name, "LUIS");
    }
}
