//! Domain services

pub mod calendar;
pub mod planner;
pub mod rounding;
pub mod synthesizer;

pub use calendar::{build_date_list, count_included_days, format_date_dmy, format_date_title};
pub use planner::{compute_starting_ticket, starting_ticket, MAX_EXACT_TICKET};
pub use rounding::{round2, round_to, ton_to_kg};
pub use synthesizer::{random_daily_count, random_gross_ton, random_spacing, synthesize};
