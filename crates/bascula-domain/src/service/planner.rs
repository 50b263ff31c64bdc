//! Ticket sequence planner
//!
//! Estimates where the station's ticket counter stands at the start of a new
//! reporting window, given the last ticket known to have been issued.

use chrono::{Duration, NaiveDate};

use crate::model::GenerationParameters;
use crate::service::calendar::is_sunday;

/// Largest ticket number the `f64` accumulator still advances by one
pub const MAX_EXACT_TICKET: i64 = 1 << 53;

/// Starting value of the running ticket accumulator.
///
/// When `start_date` does not lie after `last_ticket_date` the counter just
/// advances one nominal spacing step. Otherwise half a day of capacity is
/// added for the remainder of `last_ticket_date`, plus a full
/// `daily_count_base` for every day strictly between the two dates (Sundays
/// contribute nothing when `skip_sundays` is set). `start_date` itself is
/// left to the synthesizer.
///
/// The result is real-valued; callers truncate per emitted ticket.
pub fn compute_starting_ticket(
    last_ticket_number: i64,
    last_ticket_date: NaiveDate,
    start_date: NaiveDate,
    spacing_base: i64,
    daily_count_base: i64,
    skip_sundays: bool,
) -> f64 {
    if start_date <= last_ticket_date {
        return last_ticket_number as f64 + spacing_base as f64;
    }

    let days_between = (start_date - last_ticket_date).num_days();
    let daily = daily_count_base as f64;

    let mut ticket = last_ticket_number as f64 + daily / 2.0;
    for offset in 1..days_between {
        let day = last_ticket_date + Duration::days(offset);
        if skip_sundays && is_sunday(day) {
            continue;
        }
        ticket += daily;
    }
    ticket
}

/// [`compute_starting_ticket`] fed from a parameter set
pub fn starting_ticket(params: &GenerationParameters) -> f64 {
    compute_starting_ticket(
        params.last_ticket_number,
        params.last_ticket_date,
        params.start_date,
        params.spacing_base,
        params.daily_count_base,
        params.skip_sundays,
    )
}
