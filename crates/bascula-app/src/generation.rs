//! Generation requests and their boundary validation

use chrono::NaiveDate;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use bascula_domain::model::{Driver, GenerationParameters};
use bascula_domain::service::{count_included_days, MAX_EXACT_TICKET};
use bascula_types::ValidationError;

use crate::config::Config;

/// One report request, as submitted by a caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub drivers: Vec<Driver>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub last_ticket_number: i64,
    pub last_ticket_date: NaiveDate,
    pub spacing_variance: i64,
    pub spacing_variance_range: i64,
    pub daily_ticket_count: i64,
    pub daily_ticket_count_range: i64,
    pub price_per_ton: f64,
    #[serde(default = "default_skip_sundays")]
    pub skip_sundays: bool,
    #[serde(default)]
    pub certification: String,
}

fn default_skip_sundays() -> bool {
    true
}

impl GenerationRequest {
    /// Request over `[start_date, end_date]` with everything else taken from config
    pub fn from_config(
        config: &Config,
        start_date: NaiveDate,
        end_date: NaiveDate,
        last_ticket_number: i64,
        last_ticket_date: NaiveDate,
    ) -> Self {
        Self {
            drivers: config.drivers.clone(),
            start_date,
            end_date,
            last_ticket_number,
            last_ticket_date,
            spacing_variance: config.defaults.spacing_base,
            spacing_variance_range: config.defaults.spacing_range,
            daily_ticket_count: config.defaults.daily_count_base,
            daily_ticket_count_range: config.defaults.daily_count_range,
            price_per_ton: config.company.price_per_ton,
            skip_sundays: config.rules.skip_sundays,
            certification: config.company.certified_scale.clone(),
        }
    }

    /// Records the request would produce: included dates × Σ active tickets per day
    pub fn estimated_records(&self) -> u64 {
        if self.end_date < self.start_date {
            return 0;
        }
        let per_day: u64 = self.drivers.iter().map(Driver::daily_tickets).sum();
        count_included_days(self.start_date, self.end_date, self.skip_sundays)
            .saturating_mul(per_day)
    }

    /// Upper bound on the highest ticket number the run can issue
    ///
    /// Every spacing step and day bump is taken at the top of its band,
    /// including the days between `last_ticket_date` and `start_date`.
    pub fn projected_max_ticket(&self) -> u128 {
        let band_top = |base: i64, range: i64| base.max(0) as u128 + range.max(0) as u128;
        let spacing = band_top(self.spacing_variance, self.spacing_variance_range).max(1);
        let daily = band_top(self.daily_ticket_count, self.daily_ticket_count_range);

        let lead_days = if self.start_date > self.last_ticket_date {
            (self.start_date - self.last_ticket_date).num_days() as u128
        } else {
            0
        };
        let days = if self.end_date < self.start_date {
            0
        } else {
            count_included_days(self.start_date, self.end_date, self.skip_sundays) as u128
        };

        self.last_ticket_number.max(0) as u128
            + spacing * (self.estimated_records() as u128 + 1)
            + daily * (days + lead_days)
    }

    /// Check the request and turn it into generation parameters
    ///
    /// An empty roster is rejected here. A roster with no active driver
    /// passes and is left to the synthesizer, which reports it as
    /// `NoActiveDrivers`.
    pub fn validate(&self, max_records: u64) -> Result<GenerationParameters, ValidationError> {
        if self.end_date < self.start_date {
            return Err(ValidationError::InvalidDateRange {
                start: self.start_date,
                end: self.end_date,
            });
        }

        if self.last_ticket_number < 0 {
            return Err(ValidationError::Negative {
                field: "last_ticket_number",
                value: self.last_ticket_number,
            });
        }

        for (field, value) in [
            ("spacing_variance", self.spacing_variance),
            ("daily_ticket_count", self.daily_ticket_count),
        ] {
            if value <= 0 {
                return Err(ValidationError::NonPositive { field, value });
            }
        }

        for (field, value) in [
            ("spacing_variance_range", self.spacing_variance_range),
            ("daily_ticket_count_range", self.daily_ticket_count_range),
        ] {
            if value < 0 {
                return Err(ValidationError::Negative { field, value });
            }
        }

        if !self.price_per_ton.is_finite() || self.price_per_ton < 0.0 {
            return Err(ValidationError::InvalidPrice(self.price_per_ton));
        }

        if self.drivers.is_empty() {
            return Err(ValidationError::NoDrivers);
        }
        for driver in &self.drivers {
            validate_driver(driver)?;
        }

        let count = self.estimated_records();
        if count > max_records {
            return Err(ValidationError::TooManyRecords {
                count,
                max: max_records,
            });
        }

        let projected = self.projected_max_ticket();
        if projected > MAX_EXACT_TICKET as u128 {
            return Err(ValidationError::TicketOverflow {
                projected,
                max: MAX_EXACT_TICKET,
            });
        }

        Ok(GenerationParameters {
            start_date: self.start_date,
            end_date: self.end_date,
            skip_sundays: self.skip_sundays,
            last_ticket_number: self.last_ticket_number,
            last_ticket_date: self.last_ticket_date,
            spacing_base: self.spacing_variance,
            spacing_range: self.spacing_variance_range,
            daily_count_base: self.daily_ticket_count,
            daily_count_range: self.daily_ticket_count_range,
            price_per_ton: self.price_per_ton,
            certification: self.certification.clone(),
        })
    }
}

fn validate_driver(driver: &Driver) -> Result<(), ValidationError> {
    let invalid = |reason: String| ValidationError::InvalidDriver {
        name: driver.name.clone(),
        reason,
    };

    if driver.name.trim().is_empty() {
        return Err(invalid("name is empty".to_string()));
    }
    for (field, value) in [
        ("tare_tons", driver.tare_tons),
        ("baseline_gross_ton", driver.baseline_gross_ton),
        ("variance_pct", driver.variance_pct),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(invalid(format!(
                "{} must be a finite, non-negative number (got {})",
                field, value
            )));
        }
    }
    Ok(())
}

/// Random source for one run; a seed makes the run replayable
pub fn make_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn driver(name: &str, per_day: i32) -> Driver {
        Driver {
            name: name.to_string(),
            plate: "JAL-1".to_string(),
            active: true,
            tare_tons: 9.0,
            baseline_gross_ton: 14.0,
            variance_pct: 5.0,
            tickets_per_day: per_day,
            schedule: vec!["6-8".to_string()],
        }
    }

    fn request() -> GenerationRequest {
        let mut config = Config::default();
        config.drivers = vec![driver("JUAN", 2), driver("PEDRO", 3)];
        // Mon 2025-12-01 .. Sun 2025-12-07
        GenerationRequest::from_config(&config, date(2025, 12, 1), date(2025, 12, 7), 20_000, date(2025, 11, 29))
    }

    #[test]
    fn test_from_config_uses_defaults() {
        let req = request();
        assert_eq!(req.spacing_variance, 8);
        assert_eq!(req.daily_ticket_count, 80);
        assert_eq!(req.price_per_ton, 520.33);
        assert!(req.skip_sundays);
        assert_eq!(req.certification, "U202303Z0003992");
    }

    #[test]
    fn test_valid_request_maps_fields() {
        let params = request().validate(50_000).unwrap();
        assert_eq!(params.spacing_base, 8);
        assert_eq!(params.spacing_range, 2);
        assert_eq!(params.daily_count_base, 80);
        assert_eq!(params.daily_count_range, 10);
        assert_eq!(params.last_ticket_number, 20_000);
        assert_eq!(params.certification, "U202303Z0003992");
    }

    #[test]
    fn test_estimated_records() {
        // 6 days (Sunday skipped) × 5 tickets
        assert_eq!(request().estimated_records(), 30);

        let mut req = request();
        req.drivers[1].active = false;
        assert_eq!(req.estimated_records(), 12);
    }

    #[test]
    fn test_rejects_reversed_dates() {
        let mut req = request();
        req.end_date = date(2025, 11, 30);
        assert!(matches!(
            req.validate(50_000),
            Err(ValidationError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_bands() {
        let mut req = request();
        req.spacing_variance = 0;
        assert_eq!(
            req.validate(50_000),
            Err(ValidationError::NonPositive { field: "spacing_variance", value: 0 })
        );

        let mut req = request();
        req.daily_ticket_count_range = -1;
        assert_eq!(
            req.validate(50_000),
            Err(ValidationError::Negative { field: "daily_ticket_count_range", value: -1 })
        );
    }

    #[test]
    fn test_zero_range_is_accepted() {
        let mut req = request();
        req.spacing_variance_range = 0;
        req.daily_ticket_count_range = 0;
        assert!(req.validate(50_000).is_ok());
    }

    #[test]
    fn test_rejects_negative_ticket_and_price() {
        let mut req = request();
        req.last_ticket_number = -5;
        assert!(matches!(req.validate(50_000), Err(ValidationError::Negative { .. })));

        let mut req = request();
        req.price_per_ton = f64::NAN;
        assert!(matches!(req.validate(50_000), Err(ValidationError::InvalidPrice(_))));
    }

    #[test]
    fn test_rejects_empty_and_invalid_drivers() {
        let mut req = request();
        req.drivers.clear();
        assert_eq!(req.validate(50_000), Err(ValidationError::NoDrivers));

        let mut req = request();
        req.drivers[0].variance_pct = -3.0;
        assert!(matches!(
            req.validate(50_000),
            Err(ValidationError::InvalidDriver { ref name, .. }) if name == "JUAN"
        ));
    }

    #[test]
    fn test_inactive_roster_passes_validation() {
        let mut req = request();
        for d in &mut req.drivers {
            d.active = false;
        }
        assert!(req.validate(50_000).is_ok());
    }

    #[test]
    fn test_record_bound() {
        assert_eq!(
            request().validate(29),
            Err(ValidationError::TooManyRecords { count: 30, max: 29 })
        );
        assert!(request().validate(30).is_ok());
    }

    #[test]
    fn test_rejects_ticket_anchor_past_exact_limit() {
        let mut req = request();
        req.last_ticket_date = req.start_date;
        req.last_ticket_number = 1 << 60;
        assert!(matches!(
            req.validate(50_000),
            Err(ValidationError::TicketOverflow { max: MAX_EXACT_TICKET, .. })
        ));

        // close enough that the run itself would cross the limit
        req.last_ticket_number = MAX_EXACT_TICKET - 100;
        assert!(matches!(
            req.validate(50_000),
            Err(ValidationError::TicketOverflow { .. })
        ));

        req.last_ticket_number = MAX_EXACT_TICKET - 1_000_000;
        assert!(req.validate(50_000).is_ok());
    }

    #[test]
    fn test_projected_max_ticket() {
        // 20_000 + 10 * (30 + 1) + 90 * (6 + 2)
        assert_eq!(request().projected_max_ticket(), 20_000 + 310 + 720);
    }

    #[test]
    fn test_deserialize_wire_shape() {
        let json = r#"{
          "drivers": [{ "name": "ANA", "plate": "X-1", "tare_tons": 7, "baseline_gross_ton": 11 }],
          "startDate": "2025-12-01",
          "endDate": "2025-12-02",
          "lastTicketNumber": 1000,
          "lastTicketDate": "2025-11-30",
          "spacingVariance": 8,
          "spacingVarianceRange": 2,
          "dailyTicketCount": 80,
          "dailyTicketCountRange": 10,
          "pricePerTon": 520.33
        }"#;
        let req: GenerationRequest = serde_json::from_str(json).unwrap();
        assert!(req.skip_sundays);
        assert_eq!(req.estimated_records(), 2);
    }

    #[test]
    fn test_seeded_rng_is_repeatable() {
        use rand::Rng;
        let a: u64 = make_rng(Some(7)).gen();
        let b: u64 = make_rng(Some(7)).gen();
        assert_eq!(a, b);
    }
}
