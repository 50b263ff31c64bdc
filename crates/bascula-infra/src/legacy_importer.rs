//! Import settings from the former web app
//!
//! Reads the `config.json` the web backend kept next to its database: the
//! company block, generation rules and the driver list.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use bascula_domain::model::Driver;
use bascula_types::{ConfigError, Error, Result};

/// Legacy config.json layout
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyConfig {
    #[serde(default)]
    pub company: LegacyCompany,
    #[serde(default)]
    pub rules: LegacyRules,
    #[serde(default)]
    pub drivers: Vec<LegacyDriver>,
}

/// Company block (empresa)
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyCompany {
    pub title: Option<String>,
    pub report_title: Option<String>,
    pub bascula_certificada: Option<String>,
    pub precio_por_ton: Option<f64>,
}

/// Generation rules
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyRules {
    pub skip_sundays: Option<bool>,
}

/// Legacy driver entry
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyDriver {
    pub nombre: String,
    #[serde(default)]
    pub placas: String,
    /// Named kg in the web app but always held tons
    #[serde(default)]
    pub tara_kg: f64,
    #[serde(default)]
    pub horarios: Vec<String>,
    pub tickets_por_dia: Option<i32>,
    #[serde(default)]
    pub peso_base_ton: f64,
    #[serde(default)]
    pub variacion_pct: f64,
    pub activo: Option<bool>,
}

impl From<LegacyDriver> for Driver {
    fn from(legacy: LegacyDriver) -> Self {
        Driver {
            name: legacy.nombre.trim().to_string(),
            plate: legacy.placas.trim().to_string(),
            active: legacy.activo.unwrap_or(true),
            tare_tons: legacy.tara_kg,
            baseline_gross_ton: legacy.peso_base_ton,
            variance_pct: legacy.variacion_pct,
            tickets_per_day: legacy.tickets_por_dia.unwrap_or(1),
            schedule: legacy.horarios,
        }
    }
}

impl LegacyConfig {
    /// Parse a legacy config file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(ConfigError::ParseError(format!(
                "Failed to read legacy config {}: {}",
                path.display(),
                e
            )))
        })?;
        Self::load_from_str(&content)
    }

    /// Parse a legacy config JSON string
    pub fn load_from_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            Error::Config(ConfigError::ParseError(format!(
                "Failed to parse legacy config: {}",
                e
            )))
        })
    }

    /// Drivers converted to the current model
    pub fn drivers(&self) -> Vec<Driver> {
        self.drivers.iter().cloned().map(Driver::from).collect()
    }
}
