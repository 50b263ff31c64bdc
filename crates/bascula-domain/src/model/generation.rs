//! Parameters for one generation run

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Immutable, request-scoped configuration of a generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParameters {
    /// First calendar date of the window (inclusive)
    pub start_date: NaiveDate,
    /// Last calendar date of the window (inclusive)
    pub end_date: NaiveDate,
    /// Drop Sundays from the window
    pub skip_sundays: bool,
    /// Last ticket number already issued
    pub last_ticket_number: i64,
    /// Date on which `last_ticket_number` was issued
    pub last_ticket_date: NaiveDate,
    /// Nominal increment between two consecutive tickets
    pub spacing_base: i64,
    /// ± band around `spacing_base`
    pub spacing_range: i64,
    /// Nominal tickets issued by the station in one full day
    pub daily_count_base: i64,
    /// ± band around `daily_count_base`
    pub daily_count_range: i64,
    /// Unit price per ton
    pub price_per_ton: f64,
    /// Certified scale label (BASCULA CERTIFICADA)
    #[serde(default)]
    pub certification: String,
}
