use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};

pub fn parse_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|e| anyhow::anyhow!("Failed to parse date '{}': {} (expected YYYY-MM-DD)", date_str, e))
}

pub fn parse_time(time_str: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(time_str, "%H:%M")
        .map_err(|e| anyhow::anyhow!("Failed to parse time '{}': {} (expected HH:MM)", time_str, e))
}

/// Parses a `YYYY-MM` month argument into the first day of that month.
pub fn parse_month(month_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{month_str}-01"), "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Failed to parse month '{}' (expected YYYY-MM)", month_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_dates() {
        assert_eq!(
            parse_date("2025-11-07").unwrap(),
            NaiveDate::from_ymd_opt(2025, 11, 7).unwrap()
        );
        assert!(parse_date("11/07/2025").is_err());
        assert!(parse_date("2025-13-01").is_err());
    }

    #[test]
    fn parses_24h_times() {
        assert_eq!(
            parse_time("09:30").unwrap(),
            NaiveTime::from_hms_opt(9, 30, 0).unwrap()
        );
        assert!(parse_time("9:30 AM").is_err());
        assert!(parse_time("25:00").is_err());
    }

    #[test]
    fn parses_months() {
        assert_eq!(
            parse_month("2025-11").unwrap(),
            NaiveDate::from_ymd_opt(2025, 11, 1).unwrap()
        );
        assert!(parse_month("2025").is_err());
    }
}
