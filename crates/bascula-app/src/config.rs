//! Configuration management for bascula
//!
//! Config stored at: ~/.config/bascula/config.json

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use bascula_domain::model::Driver;
use bascula_infra::export::SlipHeader;
use bascula_infra::legacy_importer::LegacyConfig;
use bascula_types::{ConfigError, Result};

/// Company settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanySettings {
    /// Company name; informational, carried over from the web app
    #[serde(default = "default_company_title")]
    pub title: String,
    /// Report heading of the web app; informational, the spreadsheet title
    /// is always the date-range `CONTROL DE RESIDUOS` line
    #[serde(default = "default_report_title")]
    pub report_title: String,
    /// Certification label written into every record (BASCULA CERTIFICADA)
    #[serde(default = "default_certified_scale")]
    pub certified_scale: String,
    #[serde(default = "default_price_per_ton")]
    pub price_per_ton: f64,
}

fn default_company_title() -> String {
    "GRUPO VerdeMex".to_string()
}

fn default_report_title() -> String {
    "REPORTE MENSUAL".to_string()
}

fn default_certified_scale() -> String {
    "U202303Z0003992".to_string()
}

fn default_price_per_ton() -> f64 {
    520.33
}

impl Default for CompanySettings {
    fn default() -> Self {
        Self {
            title: default_company_title(),
            report_title: default_report_title(),
            certified_scale: default_certified_scale(),
            price_per_ton: default_price_per_ton(),
        }
    }
}

/// Calendar rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSettings {
    #[serde(default = "default_true")]
    pub skip_sundays: bool,
}

fn default_true() -> bool {
    true
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self { skip_sundays: true }
    }
}

/// Band defaults used when a request leaves them out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationDefaults {
    #[serde(default = "default_spacing_base")]
    pub spacing_base: i64,
    #[serde(default = "default_spacing_range")]
    pub spacing_range: i64,
    #[serde(default = "default_daily_count_base")]
    pub daily_count_base: i64,
    #[serde(default = "default_daily_count_range")]
    pub daily_count_range: i64,
}

fn default_spacing_base() -> i64 {
    8
}

fn default_spacing_range() -> i64 {
    2
}

fn default_daily_count_base() -> i64 {
    80
}

fn default_daily_count_range() -> i64 {
    10
}

impl Default for GenerationDefaults {
    fn default() -> Self {
        Self {
            spacing_base: default_spacing_base(),
            spacing_range: default_spacing_range(),
            daily_count_base: default_daily_count_base(),
            daily_count_range: default_daily_count_range(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub company: CompanySettings,

    #[serde(default)]
    pub rules: RuleSettings,

    #[serde(default)]
    pub defaults: GenerationDefaults,

    /// Header lines of the plain-text slips
    #[serde(default)]
    pub slip: SlipHeader,

    /// Driver roster, in emission order
    #[serde(default)]
    pub drivers: Vec<Driver>,

    /// Where reports are written (override)
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Where the file registry lives (override)
    #[serde(default)]
    pub store_dir: Option<PathBuf>,

    /// Upper bound on records produced by one request
    #[serde(default = "default_max_records")]
    pub max_records: u64,
}

fn default_max_records() -> u64 {
    50_000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            company: CompanySettings::default(),
            rules: RuleSettings::default(),
            defaults: GenerationDefaults::default(),
            slip: SlipHeader::default(),
            drivers: Vec::new(),
            output_dir: None,
            store_dir: None,
            max_records: default_max_records(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("bascula");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    fn data_dir() -> Result<PathBuf> {
        Ok(dirs::data_dir().ok_or(ConfigError::NotFound)?.join("bascula"))
    }

    /// Directory reports are written to
    pub fn output_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.output_dir {
            return Ok(dir.clone());
        }
        Ok(Self::data_dir()?.join("output"))
    }

    /// Directory holding the file registry
    pub fn store_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.store_dir {
            return Ok(dir.clone());
        }
        Self::data_dir()
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from an explicit path; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save config to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SaveError(e.to_string()))?;
        fs::write(path, content)?;
        debug!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Take over company, rules and drivers from a legacy web-app config
    ///
    /// Fields the legacy file leaves out keep their current values. The
    /// driver roster is replaced.
    pub fn apply_legacy(&mut self, legacy: &LegacyConfig) {
        if let Some(ref title) = legacy.company.title {
            self.company.title = title.clone();
        }
        if let Some(ref report_title) = legacy.company.report_title {
            self.company.report_title = report_title.clone();
        }
        if let Some(ref scale) = legacy.company.bascula_certificada {
            self.company.certified_scale = scale.clone();
        }
        if let Some(price) = legacy.company.precio_por_ton {
            self.company.price_per_ton = price;
        }
        if let Some(skip) = legacy.rules.skip_sundays {
            self.rules.skip_sundays = skip;
        }
        self.drivers = legacy.drivers();
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Bascula Configuration")?;
        writeln!(f, "=====================")?;
        writeln!(f)?;
        writeln!(f, "Company:          {}", self.company.title)?;
        writeln!(f, "Report title:     {}", self.company.report_title)?;
        writeln!(f, "Certified scale:  {}", self.company.certified_scale)?;
        writeln!(f, "Price per ton:    {:.2}", self.company.price_per_ton)?;
        writeln!(f, "Skip Sundays:     {}", self.rules.skip_sundays)?;
        writeln!(
            f,
            "Spacing:          {} ± {}",
            self.defaults.spacing_base, self.defaults.spacing_range
        )?;
        writeln!(
            f,
            "Daily count:      {} ± {}",
            self.defaults.daily_count_base, self.defaults.daily_count_range
        )?;
        writeln!(
            f,
            "Drivers:          {} ({} active)",
            self.drivers.len(),
            self.drivers.iter().filter(|d| d.active).count()
        )?;
        writeln!(f, "Max records:      {}", self.max_records)?;
        writeln!(
            f,
            "Output dir:       {}",
            self.output_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;
        writeln!(
            f,
            "Store dir:        {}",
            self.store_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;

        Ok(())
    }
}
