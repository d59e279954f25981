//! Monthly accounting periods
//!
//! A `Period` is the month-granular bucket used by depreciation schedules
//! and document numbering. Periods are ordered, hashable, and render as
//! `YYYYMM` in document numbers.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors related to period handling
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeriodError {
    #[error("Invalid month: {0} (expected 1-12)")]
    InvalidMonth(u32),
}

/// A calendar month used as an accounting period
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Creates a period, validating the month
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    /// Returns the period containing the given date
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Returns the year
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month (1-12)
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Returns the first day of the period
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).expect("month validated at construction")
    }

    /// Returns the last day of the period
    pub fn last_day(&self) -> NaiveDate {
        self.next()
            .first_day()
            .pred_opt()
            .expect("first day of a month always has a predecessor")
    }

    /// Returns the following period
    pub fn next(&self) -> Period {
        if self.month == 12 {
            Period {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Period {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Renders as `YYYYMM`, the form used in document numbers
    pub fn yyyymm(&self) -> String {
        format!("{:04}{:02}", self.year, self.month)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_new_validates_month() {
        assert!(Period::new(2026, 13).is_err());
        assert!(Period::new(2026, 0).is_err());
        assert!(Period::new(2026, 8).is_ok());
    }

    #[test]
    fn test_period_from_date() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 15).unwrap();
        let period = Period::from_date(date);
        assert_eq!(period.year(), 2026);
        assert_eq!(period.month(), 8);
    }

    #[test]
    fn test_period_next_rolls_year() {
        let december = Period::new(2025, 12).unwrap();
        let january = december.next();
        assert_eq!(january.year(), 2026);
        assert_eq!(january.month(), 1);
    }

    #[test]
    fn test_period_last_day() {
        let feb = Period::new(2024, 2).unwrap();
        assert_eq!(feb.last_day(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn test_period_yyyymm() {
        let period = Period::new(2026, 8).unwrap();
        assert_eq!(period.yyyymm(), "202608");
    }

    #[test]
    fn test_period_ordering() {
        let earlier = Period::new(2026, 7).unwrap();
        let later = Period::new(2026, 8).unwrap();
        assert!(earlier < later);
    }
}
