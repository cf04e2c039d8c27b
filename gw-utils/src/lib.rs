//! Shared utility functions for groundwater crates.

/// Date utility functions
pub mod dates {
    use chrono::{DateTime, Months, NaiveDate, NaiveDateTime, NaiveTime};

    /// Date format used for prediction requests and chart output: "YYYY-MM-DD"
    pub const YEAR_FORMAT: &str = "%Y-%m-%d";

    /// Timestamp layouts accepted for raw observation rows, tried in order.
    const DATETIME_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y%m%d %H%M",
    ];

    /// Date-only layouts accepted for raw observation rows, tried in order.
    /// Date-only values are read as midnight.
    const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d", "%d-%m-%Y", "%d/%m/%Y"];

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format(YEAR_FORMAT).to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s.trim(), YEAR_FORMAT)?)
    }

    /// Parse an observation timestamp leniently.
    ///
    /// RFC 3339 values keep the wall-clock time they were written in, so the
    /// calendar year of the reading is never shifted by a UTC conversion.
    /// Returns `None` for anything that does not name a real calendar date.
    pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.naive_local());
        }
        for format in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
                return Some(dt);
            }
        }
        DATE_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
            .map(|date| date.and_time(NaiveTime::MIN))
    }

    /// Advance a timestamp by whole calendar years, keeping month and day.
    ///
    /// February 29 lands on February 28 in non-leap target years.
    pub fn add_years(timestamp: &NaiveDateTime, years: u32) -> Option<NaiveDateTime> {
        timestamp.checked_add_months(Months::new(years.checked_mul(12)?))
    }

}
