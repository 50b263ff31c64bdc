//! Fixed rounding policy for mass and currency figures

/// Scaled magnitudes at or beyond this are returned as-is; two-decimal
/// rounding is no longer representable there.
const MAX_SCALED: f64 = 1e12;

/// Round half away from zero to `decimals` places.
///
/// `f64::EPSILON` is added before scaling so values such as `1.005`, stored
/// slightly below their decimal literal, still round up.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let scaled = (value + f64::EPSILON) * factor;
    if !scaled.is_finite() || scaled.abs() >= MAX_SCALED {
        return value;
    }
    scaled.round() / factor
}

/// Round to two decimals
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

/// Tons to kilograms, two decimals
pub fn ton_to_kg(tons: f64) -> f64 {
    round2(tons * 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up_with_epsilon() {
        assert_eq!(round2(1.005), 1.01);
        assert_eq!(round2(10.0), 10.0);
        assert_eq!(round2(3.14159), 3.14);
    }

    #[test]
    fn test_round_negative() {
        assert_eq!(round2(-1.25), -1.25);
        assert_eq!(round2(-2.346), -2.35);
    }

    #[test]
    fn test_round_other_precisions() {
        assert_eq!(round_to(12.3456, 0), 12.0);
        assert_eq!(round_to(12.5, 0), 13.0);
        assert_eq!(round_to(0.0004, 3), 0.0);
    }

    #[test]
    fn test_ton_to_kg() {
        assert_eq!(ton_to_kg(2.0), 2000.0);
        assert_eq!(ton_to_kg(10.37), 10370.0);
        assert_eq!(ton_to_kg(0.0001), 0.1);
    }

    #[test]
    fn test_round_passes_through_non_finite_and_huge() {
        assert!(round2(f64::NAN).is_nan());
        assert_eq!(round2(f64::INFINITY), f64::INFINITY);
        assert_eq!(round2(1e300), 1e300);
    }
}
