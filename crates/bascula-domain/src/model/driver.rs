//! Driver definitions

use serde::{Deserialize, Serialize};

/// A truck driver that takes part in ticket generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    /// Driver name (CHOFER)
    pub name: String,
    /// License plate (PLACAS)
    pub plate: String,
    /// Inactive drivers never produce tickets
    #[serde(default = "default_true")]
    pub active: bool,
    /// Empty vehicle mass in tons
    pub tare_tons: f64,
    /// Expected product mass per trip in tons
    pub baseline_gross_ton: f64,
    /// ± tolerance in percent around `baseline_gross_ton`
    #[serde(default)]
    pub variance_pct: f64,
    /// Tickets generated per included day
    #[serde(default = "default_tickets_per_day")]
    pub tickets_per_day: i32,
    /// Time-slot labels, assigned round-robin
    #[serde(default)]
    pub schedule: Vec<String>,
}

fn default_true() -> bool {
    true
}

fn default_tickets_per_day() -> i32 {
    1
}

impl Driver {
    /// Schedule label for the `index`-th ticket of a day
    ///
    /// Empty when the driver has no schedule configured.
    pub fn slot(&self, index: usize) -> &str {
        if self.schedule.is_empty() {
            return "";
        }
        &self.schedule[index % self.schedule.len()]
    }

    /// Number of tickets this driver contributes per day (0 when inactive)
    pub fn daily_tickets(&self) -> u64 {
        if self.active && self.tickets_per_day > 0 {
            self.tickets_per_day as u64
        } else {
            0
        }
    }

    /// Inclusive `[low, high]` bound for product mass in tons
    pub fn mass_band(&self) -> (f64, f64) {
        let delta = self.baseline_gross_ton * self.variance_pct / 100.0;
        (self.baseline_gross_ton - delta, self.baseline_gross_ton + delta)
    }
}
