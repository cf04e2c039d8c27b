//! Coordinate rounding and well identity.
//!
//! Wells carry no identifier of their own: a well *is* its rounded
//! position. Readings whose coordinates round to the same pair at the
//! configured precision are treated as the same physical well, which
//! absorbs GPS jitter between survey visits.

/// Default number of decimal digits kept when bucketing coordinates.
pub const DEFAULT_PRECISION: u32 = 6;

/// Separator between latitude and longitude in a well id.
pub const WELL_ID_SEPARATOR: char = '_';

/// Round a coordinate to `precision` decimal digits, half away from zero.
///
/// Negative zero is folded into zero so that `-0.0000001` and `0.0000001`
/// produce the same id.
pub fn round_coord(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor + 0.0
}

/// Build the well id for a coordinate pair, e.g. `"12.9716_77.5946"`.
///
/// Both halves use the shortest decimal rendering of the rounded value.
pub fn make_well_id(lat: f64, lon: f64, precision: u32) -> String {
    format!(
        "{}{}{}",
        round_coord(lat, precision),
        WELL_ID_SEPARATOR,
        round_coord(lon, precision)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_coord_half_away_from_zero() {
        assert_eq!(round_coord(1.25, 1), 1.3);
        assert_eq!(round_coord(-1.25, 1), -1.3);
        assert_eq!(round_coord(2.5, 0), 3.0);
        assert_eq!(round_coord(-2.5, 0), -3.0);
    }

    #[test]
    fn test_round_coord_six_digits() {
        assert_eq!(round_coord(12.9716104, DEFAULT_PRECISION), 12.97161);
        assert_eq!(round_coord(77.5946119, DEFAULT_PRECISION), 77.594612);
        assert_eq!(round_coord(12.9716, DEFAULT_PRECISION), 12.9716);
    }

    #[test]
    fn test_round_coord_folds_negative_zero() {
        let rounded = round_coord(-0.0000001, DEFAULT_PRECISION);
        assert_eq!(rounded, 0.0);
        assert!(rounded.is_sign_positive());
    }

    #[test]
    fn test_make_well_id_format() {
        assert_eq!(make_well_id(12.9716, 77.5946, 6), "12.9716_77.5946");
        assert_eq!(make_well_id(28.0, -77.0, 6), "28_-77");
        assert_eq!(make_well_id(-0.0000001, 0.0, 6), "0_0");
    }

    #[test]
    fn test_ids_merge_on_seventh_decimal() {
        let a = make_well_id(12.9716101, 77.5946101, DEFAULT_PRECISION);
        let b = make_well_id(12.9716104, 77.5946104, DEFAULT_PRECISION);
        assert_eq!(a, b);
        assert_eq!(a, "12.97161_77.59461");
    }

    #[test]
    fn test_ids_split_on_sixth_decimal() {
        let a = make_well_id(12.97161, 77.59461, DEFAULT_PRECISION);
        let b = make_well_id(12.971611, 77.594611, DEFAULT_PRECISION);
        assert_ne!(a, b);
    }

    #[test]
    fn test_ids_merge_at_coarser_precision() {
        let a = make_well_id(12.97161, 77.59461, 5);
        let b = make_well_id(12.971611, 77.594611, 5);
        assert_eq!(a, b);
    }
}
