use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

/// Convert a timestamp to a decimal year, e.g. 2024-07-02 00:00 -> ~2024.5.
///
/// The fraction is the share of the calendar year elapsed, measured in
/// milliseconds between January 1 of the year and January 1 of the next,
/// so leap years stretch over 366 days.
pub fn date_to_decimal_year(date: &NaiveDateTime) -> f64 {
    let year = date.year();
    let (Some(start), Some(next)) = (start_of_year(year), start_of_year(year + 1)) else {
        return year as f64;
    };
    let elapsed = (*date - start).num_milliseconds() as f64;
    let length = (next - start).num_milliseconds() as f64;
    year as f64 + elapsed / length
}

fn start_of_year(year: i32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, 1, 1).map(|d| d.and_time(NaiveTime::MIN))
}

#[cfg(test)]
mod tests {
    use super::date_to_decimal_year;
    use chrono::NaiveDate;

    #[test]
    fn test_start_of_year_is_whole() {
        let jan1 = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(date_to_decimal_year(&jan1), 2024.0);
    }

    #[test]
    fn test_mid_year_leap_and_common() {
        // 2024 is a leap year: July 2 00:00 is day 183 of 366.
        let leap = NaiveDate::from_ymd_opt(2024, 7, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert!((date_to_decimal_year(&leap) - (2024.0 + 183.0 / 366.0)).abs() < 1e-9);

        let common = NaiveDate::from_ymd_opt(2023, 7, 2)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        assert!((date_to_decimal_year(&common) - (2023.0 + 182.5 / 365.0)).abs() < 1e-9);
    }

    #[test]
    fn test_monotonic_within_year_and_resets() {
        let dec31 = NaiveDate::from_ymd_opt(2023, 12, 31)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        let jan1 = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let dec31_value = date_to_decimal_year(&dec31);
        assert!(dec31_value < 2024.0);
        assert!(dec31_value > 2023.99);
        assert!(date_to_decimal_year(&jan1) > dec31_value);
    }
}
