//! Calendar month used by all budget figures
//!
//! Budgets are monthly. Membership is decided on local calendar fields (the
//! year and month a user would see on their own clock), not on UTC
//! millisecond windows.

use chrono::{DateTime, Datelike, Local, Month, TimeZone};
use std::fmt;
use thiserror::Error;

/// A calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthPeriod {
    year: i32,
    month: u32,
}

impl MonthPeriod {
    /// Create a month; `month` is 1-based and `year` is 1..=9999
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodParseError> {
        if !(1..=9999).contains(&year) {
            return Err(PeriodParseError::InvalidYear(year));
        }
        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    /// The month containing today, in local time
    pub fn current() -> Self {
        Self::containing(&Local::now())
    }

    /// The month a point in time falls in, read in local time
    pub fn containing<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self {
        let local = instant.with_timezone(&Local);
        Self {
            year: local.year(),
            month: local.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Whether an instant falls in this month on the local calendar
    pub fn contains<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> bool {
        Self::containing(instant) == *self
    }

    /// The month before this one
    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Parse a month
    ///
    /// Formats:
    /// - `"2025-01"`
    /// - `"current"` / `"this"`
    /// - `"last"` / `"previous"`
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "current" | "this" => return Ok(Self::current()),
            "last" | "previous" | "prev" => return Ok(Self::current().prev()),
            _ => {}
        }

        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| PeriodParseError::InvalidFormat(s.to_string()))?;
        let year: i32 = year
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;

        Self::new(year, month)
    }

    /// Human friendly label, e.g. "June 2024"
    pub fn friendly(&self) -> String {
        match u8::try_from(self.month).ok().and_then(|m| Month::try_from(m).ok()) {
            Some(month) => format!("{} {}", month.name(), self.year),
            None => self.to_string(),
        }
    }
}

impl fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Error parsing a month
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    #[error("Invalid month format '{0}', expected YYYY-MM, 'current' or 'last'")]
    InvalidFormat(String),

    #[error("Month must be between 1 and 12, got {0}")]
    InvalidMonth(u32),

    #[error("Year must be between 1 and 9999, got {0}")]
    InvalidYear(i32),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let june = MonthPeriod::new(2024, 6).unwrap();
        assert!(june.contains(&local(2024, 6, 1, 0, 0, 0)));
        assert!(june.contains(&local(2024, 6, 30, 23, 59, 59)));
        assert!(!june.contains(&local(2024, 7, 1, 0, 0, 0)));
        assert!(!june.contains(&local(2024, 5, 31, 23, 59, 59)));
    }

    #[test]
    fn test_contains_reads_local_calendar_from_utc() {
        let instant = local(2024, 6, 15, 12, 0, 0).with_timezone(&chrono::Utc);
        assert!(MonthPeriod::new(2024, 6).unwrap().contains(&instant));
    }

    #[test]
    fn test_navigation() {
        let jan = MonthPeriod::new(2025, 1).unwrap();
        assert_eq!(jan.prev(), MonthPeriod::new(2024, 12).unwrap());
        assert_eq!(
            MonthPeriod::new(2024, 7).unwrap().prev(),
            MonthPeriod::new(2024, 6).unwrap()
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            MonthPeriod::parse("2024-06").unwrap(),
            MonthPeriod::new(2024, 6).unwrap()
        );
        assert_eq!(MonthPeriod::parse("current").unwrap(), MonthPeriod::current());
        assert_eq!(
            MonthPeriod::parse("last").unwrap(),
            MonthPeriod::current().prev()
        );
        assert!(matches!(
            MonthPeriod::parse("2024-13"),
            Err(PeriodParseError::InvalidMonth(13))
        ));
        assert!(MonthPeriod::parse("June").is_err());
        assert!(matches!(
            MonthPeriod::parse("2147483647-01"),
            Err(PeriodParseError::InvalidYear(i32::MAX))
        ));
        assert!(matches!(
            MonthPeriod::parse("0-12"),
            Err(PeriodParseError::InvalidYear(0))
        ));
    }

    #[test]
    fn test_display() {
        let period = MonthPeriod::new(2024, 6).unwrap();
        assert_eq!(period.to_string(), "2024-06");
        assert_eq!(period.friendly(), "June 2024");
        assert_eq!(MonthPeriod::new(2025, 12).unwrap().friendly(), "December 2025");
    }
}
