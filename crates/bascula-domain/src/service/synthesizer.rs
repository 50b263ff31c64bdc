//! Record synthesizer
//!
//! Walks the date window and produces one ticket per active driver and
//! per-day slot. Randomness comes from the caller's `Rng`, so a seeded
//! generator replays the same sequence.

use rand::Rng;

use bascula_types::{Error, Result};

use crate::model::{Driver, GenerationParameters, TicketRecord};
use crate::service::calendar::build_date_list;
use crate::service::planner::starting_ticket;
use crate::service::rounding::{round2, ton_to_kg};

/// Uniform integer in `[max(1, base - range), base + range]`.
///
/// An empty band (e.g. `base + range < 1`) collapses to its lower bound.
fn random_in_band<R: Rng + ?Sized>(rng: &mut R, base: i64, range: i64) -> i64 {
    let low = base.saturating_sub(range).max(1);
    let high = base.saturating_add(range).max(low);
    rng.gen_range(low..=high)
}

/// Ticket-number increment preceding each emitted ticket
pub fn random_spacing<R: Rng + ?Sized>(rng: &mut R, spacing_base: i64, spacing_range: i64) -> i64 {
    random_in_band(rng, spacing_base, spacing_range)
}

/// Tickets issued by the station over one full day
pub fn random_daily_count<R: Rng + ?Sized>(
    rng: &mut R,
    daily_count_base: i64,
    daily_count_range: i64,
) -> i64 {
    random_in_band(rng, daily_count_base, daily_count_range)
}

/// Product mass within ±`variance_pct` of the baseline, two decimals
pub fn random_gross_ton<R: Rng + ?Sized>(rng: &mut R, baseline_ton: f64, variance_pct: f64) -> f64 {
    let u: f64 = rng.gen_range(-1.0..=1.0);
    round2(baseline_ton * (1.0 + u * variance_pct / 100.0))
}

/// Synthesize the full ticket sequence for one generation run.
///
/// Records come out by date, then driver input order, then slot index.
/// Fails with [`Error::NoActiveDrivers`] before emitting anything when no
/// driver is active.
pub fn synthesize<R: Rng + ?Sized>(
    params: &GenerationParameters,
    drivers: &[Driver],
    rng: &mut R,
) -> Result<Vec<TicketRecord>> {
    let active: Vec<&Driver> = drivers.iter().filter(|d| d.active).collect();
    if active.is_empty() {
        return Err(Error::NoActiveDrivers);
    }

    let dates = build_date_list(params.start_date, params.end_date, params.skip_sundays);
    let per_day: u64 = active.iter().map(|d| d.daily_tickets()).sum();
    let mut records = Vec::with_capacity((dates.len() as u64 * per_day) as usize);

    let price = round2(params.price_per_ton);
    let mut ticket = starting_ticket(params);

    for (day_index, date) in dates.iter().enumerate() {
        if day_index > 0 {
            // end of the previous day plus the start of this one
            let daily = random_daily_count(rng, params.daily_count_base, params.daily_count_range);
            ticket += daily as f64 / 2.0;
        }

        for driver in &active {
            if driver.tickets_per_day <= 0 {
                continue;
            }
            let tare_kg = ton_to_kg(driver.tare_tons);

            for i in 0..driver.tickets_per_day as usize {
                ticket += random_spacing(rng, params.spacing_base, params.spacing_range) as f64;

                let gross_ton = random_gross_ton(rng, driver.baseline_gross_ton, driver.variance_pct);
                let net_kg = ton_to_kg(gross_ton);
                let gross_kg = round2(tare_kg + net_kg);

                records.push(TicketRecord {
                    date: *date,
                    driver_name: driver.name.clone(),
                    plate: driver.plate.clone(),
                    slot: driver.slot(i).to_string(),
                    ticket_number: ticket.floor() as i64,
                    certification: params.certification.clone(),
                    gross_ton,
                    tare_kg,
                    net_kg,
                    gross_kg,
                    price_per_ton: price,
                    total: round2(gross_ton * price),
                });
            }
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate, Weekday};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn driver(name: &str, tickets_per_day: i32, schedule: &[&str]) -> Driver {
        Driver {
            name: name.to_string(),
            plate: format!("{}-001", name),
            active: true,
            tare_tons: 2.0,
            baseline_gross_ton: 10.0,
            variance_pct: 0.0,
            tickets_per_day,
            schedule: schedule.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn params() -> GenerationParameters {
        GenerationParameters {
            start_date: date(2025, 12, 1),
            end_date: date(2025, 12, 2),
            skip_sundays: false,
            last_ticket_number: 1000,
            last_ticket_date: date(2025, 11, 30),
            spacing_base: 8,
            spacing_range: 0,
            daily_count_base: 80,
            daily_count_range: 0,
            price_per_ton: 520.33,
            certification: "U202303Z0003992".to_string(),
        }
    }

    #[test]
    fn test_fixed_scenario_without_variance() {
        let drivers = vec![driver("ANA", 2, &["6-8", "12-15"])];
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let records = synthesize(&params(), &drivers, &mut rng).unwrap();

        assert_eq!(records.len(), 4);
        for r in &records {
            assert_eq!(r.gross_ton, 10.0);
            assert_eq!(r.tare_kg, 2000.0);
            assert_eq!(r.net_kg, 10000.0);
            assert_eq!(r.gross_kg, 12000.0);
            assert_eq!(r.price_per_ton, 520.33);
            assert_eq!(r.total, 5203.3);
        }

        let slots: Vec<&str> = records.iter().map(|r| r.slot.as_str()).collect();
        assert_eq!(slots, vec!["6-8", "12-15", "6-8", "12-15"]);

        // start 1000 + 80/2; each ticket +8; day change +80/2
        let tickets: Vec<i64> = records.iter().map(|r| r.ticket_number).collect();
        assert_eq!(tickets, vec![1048, 1056, 1104, 1112]);
        assert_eq!(tickets[1] - tickets[0], 8);
        assert_eq!(tickets[3] - tickets[2], 8);

        assert_eq!(records[0].date, date(2025, 12, 1));
        assert_eq!(records[3].date, date(2025, 12, 2));
    }

    #[test]
    fn test_no_active_drivers() {
        let mut d = driver("ANA", 2, &["6-8"]);
        d.active = false;
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = synthesize(&params(), &[d], &mut rng).unwrap_err();
        assert!(matches!(err, Error::NoActiveDrivers));
    }

    #[test]
    fn test_empty_driver_list_fails() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(matches!(
            synthesize(&params(), &[], &mut rng),
            Err(Error::NoActiveDrivers)
        ));
    }

    #[test]
    fn test_inactive_and_zero_ticket_drivers_skipped() {
        let mut inactive = driver("BETO", 3, &["6-8"]);
        inactive.active = false;
        let drivers = vec![
            driver("ANA", 1, &["6-8"]),
            inactive,
            driver("CARLOS", 0, &["6-8"]),
            driver("DIANA", -1, &["6-8"]),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let records = synthesize(&params(), &drivers, &mut rng).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.driver_name == "ANA"));
    }

    #[test]
    fn test_driver_order_within_day() {
        let drivers = vec![driver("ZOE", 1, &["6-8"]), driver("ANA", 2, &["9-10"])];
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let records = synthesize(&params(), &drivers, &mut rng).unwrap();
        let names: Vec<&str> = records.iter().map(|r| r.driver_name.as_str()).collect();
        assert_eq!(names, vec!["ZOE", "ANA", "ANA", "ZOE", "ANA", "ANA"]);
    }

    #[test]
    fn test_empty_schedule_yields_empty_slot() {
        let drivers = vec![driver("ANA", 2, &[])];
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let records = synthesize(&params(), &drivers, &mut rng).unwrap();
        assert!(records.iter().all(|r| r.slot.is_empty()));
    }

    #[test]
    fn test_skip_sundays_excludes_sunday_records() {
        let mut p = params();
        p.start_date = date(2025, 11, 29);
        p.end_date = date(2025, 12, 1);
        p.last_ticket_date = date(2025, 11, 28);
        p.skip_sundays = true;
        let drivers = vec![driver("ANA", 1, &["6-8"])];
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let records = synthesize(&p, &drivers, &mut rng).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.date.weekday() != Weekday::Sun));
    }

    #[test]
    fn test_same_seed_same_records() {
        let mut p = params();
        p.spacing_range = 3;
        p.daily_count_range = 10;
        let mut d = driver("ANA", 3, &["6-8", "9-10"]);
        d.variance_pct = 12.5;
        let drivers = vec![d];

        let a = synthesize(&p, &drivers, &mut ChaCha8Rng::seed_from_u64(42)).unwrap();
        let b = synthesize(&p, &drivers, &mut ChaCha8Rng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_degenerate_bands_do_not_panic() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(random_spacing(&mut rng, 0, 0), 1);
        assert_eq!(random_spacing(&mut rng, -5, 2), 1);
        let daily = random_daily_count(&mut rng, 3, 10);
        assert!((1..=13).contains(&daily));
    }

    #[test]
    fn test_random_spacing_stays_in_band() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        for _ in 0..500 {
            let s = random_spacing(&mut rng, 8, 2);
            assert!((6..=10).contains(&s));
        }
        for _ in 0..500 {
            let s = random_spacing(&mut rng, 2, 5);
            assert!((1..=7).contains(&s));
        }
    }
}
