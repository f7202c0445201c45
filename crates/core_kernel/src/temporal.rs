//! Calendar date ranges
//!
//! Billing periods are whole calendar days, so ranges are expressed with
//! `NaiveDate` and both bounds are inclusive.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// ISO date layout used for textual billing dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid period: start {start} is after end {end}")]
    InvalidPeriod {
        start: String,
        end: String,
    },

    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// An inclusive range of calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of the range
    pub start: NaiveDate,
    /// Last day of the range
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a new range; `end` may equal `start` for a single day
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, TemporalError> {
        if start > end {
            return Err(TemporalError::InvalidPeriod {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Parses both bounds from `YYYY-MM-DD` strings
    pub fn parse(start: &str, end: &str) -> Result<Self, TemporalError> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    /// Number of days covered, counting both bounds
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Returns true if the date falls inside the range
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Parses a `YYYY-MM-DD` date
pub fn parse_date(text: &str) -> Result<NaiveDate, TemporalError> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .map_err(|_| TemporalError::InvalidDate(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_january_has_31_days() {
        let range = DateRange::parse("2024-01-01", "2024-01-31").unwrap();
        assert_eq!(range.days(), 31);
    }

    #[test]
    fn test_single_day_range() {
        let range = DateRange::new(date(2024, 2, 29), date(2024, 2, 29)).unwrap();
        assert_eq!(range.days(), 1);
        assert!(range.contains(date(2024, 2, 29)));
    }

    #[test]
    fn test_reversed_range_rejected() {
        let result = DateRange::new(date(2024, 2, 1), date(2024, 1, 1));
        assert!(matches!(result, Err(TemporalError::InvalidPeriod { .. })));
    }

    #[test]
    fn test_bad_date_text() {
        let result = DateRange::parse("01/01/2024", "2024-01-31");
        assert!(matches!(result, Err(TemporalError::InvalidDate(_))));
    }
}
