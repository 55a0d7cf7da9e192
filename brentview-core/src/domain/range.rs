//! DateRange: the analyst's selected window.

use std::fmt;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::date::format_date;

/// Inclusive calendar window `[start, end]`.
///
/// `start <= end` is expected but not enforced: an inverted range is kept as
/// entered and simply matches nothing downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// True when the end date precedes the start date.
    pub fn is_inverted(&self) -> bool {
        self.end < self.start
    }

    /// Inclusive on both ends. Always false for an inverted range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn with_start(self, start: NaiveDate) -> Self {
        Self { start, ..self }
    }

    pub fn with_end(self, end: NaiveDate) -> Self {
        Self { end, ..self }
    }

    /// Query string for `/api/prices`.
    pub fn query(&self) -> String {
        format!("start={}&end={}", format_date(self.start), format_date(self.end))
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", format_date(self.start), format_date(self.end))
    }
}

/// Step a date by whole days, saturating at chrono's representable bounds.
pub fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days)).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn contains_is_inclusive() {
        let r = DateRange::new(d(2020, 1, 1), d(2020, 12, 31));
        assert!(r.contains(d(2020, 1, 1)));
        assert!(r.contains(d(2020, 12, 31)));
        assert!(r.contains(d(2020, 6, 15)));
        assert!(!r.contains(d(2019, 12, 31)));
        assert!(!r.contains(d(2021, 1, 1)));
    }

    #[test]
    fn inverted_range_contains_nothing() {
        let r = DateRange::new(d(2020, 2, 1), d(2020, 1, 1));
        assert!(r.is_inverted());
        assert!(!r.contains(d(2020, 1, 15)));
        assert!(!r.contains(d(2020, 1, 1)));
    }

    #[test]
    fn query_uses_iso_dates() {
        let r = DateRange::new(d(2012, 1, 1), d(2022, 9, 30));
        assert_eq!(r.query(), "start=2012-01-01&end=2022-09-30");
        assert_eq!(r.to_string(), "2012-01-01 .. 2022-09-30");
    }

    #[test]
    fn shift_crosses_month_boundaries() {
        assert_eq!(shift_days(d(2020, 2, 28), 1), d(2020, 2, 29));
        assert_eq!(shift_days(d(2020, 3, 1), -1), d(2020, 2, 29));
        assert_eq!(shift_days(NaiveDate::MAX, 1), NaiveDate::MAX);
    }
}
