use crate::error::{EcoError, Result};
use chrono::{Datelike, Local, NaiveDate};

/// Source of "today" for the few calculations that depend on wall-clock time.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;

    /// Zero-based month (January = 0).
    fn month0(&self) -> u32 {
        self.today().month0()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to one date; used by `--as-of` and in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl FixedClock {
    pub fn ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Parses a `YYYY-MM-DD` date as given to `--as-of`.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| EcoError::InvalidDate(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_reports_pinned_month() {
        let clock = FixedClock::ymd(2024, 6, 15).expect("valid date");
        assert_eq!(clock.month0(), 5);
        assert_eq!(clock.today().to_string(), "2024-06-15");
    }

    #[test]
    fn parse_date_accepts_iso_dates_only() {
        assert_eq!(
            parse_date("2024-02-29").expect("leap day should parse"),
            NaiveDate::from_ymd_opt(2024, 2, 29).expect("valid date")
        );
        assert!(matches!(parse_date("29.02.2024"), Err(EcoError::InvalidDate(_))));
        assert!(parse_date("2023-02-29").is_err());
    }
}
