//! Time utilities

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Get current UTC time
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Current calendar day (UTC); event dates are compared against it
pub fn today() -> NaiveDate {
    now_utc().date_naive()
}

/// Parse a `YYYY-MM-DD` calendar date
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Parse a wall-clock time given as `HH:MM` or `HH:MM:SS`
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-06-15"),
            NaiveDate::from_ymd_opt(2025, 6, 15)
        );
        assert!(parse_date("15/06/2025").is_none());
        assert!(parse_date("2025-02-30").is_none());
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time("18:30"), NaiveTime::from_hms_opt(18, 30, 0));
        assert_eq!(parse_time("09:05:10"), NaiveTime::from_hms_opt(9, 5, 10));
        assert!(parse_time("25:00").is_none());
        assert!(parse_time("noon").is_none());
    }
}
