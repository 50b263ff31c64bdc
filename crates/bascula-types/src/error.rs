//! Error types for bascula

use chrono::NaiveDate;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

/// Rejected generation input, raised before any record is synthesized
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("End date {end} is before start date {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("{field} must be greater than zero (got {value})")]
    NonPositive { field: &'static str, value: i64 },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: i64 },

    #[error("Price per ton must be a finite, non-negative number (got {0})")]
    InvalidPrice(f64),

    #[error("At least one driver is required")]
    NoDrivers,

    #[error("Driver '{name}': {reason}")]
    InvalidDriver { name: String, reason: String },

    #[error("Ticket numbers could reach {projected}, past the exact limit {max}")]
    TicketOverflow { projected: u128, max: i64 },

    #[error("Request would produce {count} records (limit {max})")]
    TooManyRecords { count: u64, max: u64 },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("No active drivers. Enable or add at least one driver.")]
    NoActiveDrivers,

    #[error("Excel export error: {0}")]
    Excel(String),

    #[error("CSV export error: {0}")]
    Csv(String),

    #[error("Archive error: {0}")]
    Archive(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("No generated file with id {0}")]
    RecordNotFound(u64),
}

pub type Result<T> = std::result::Result<T, Error>;
