//! Calendar dates: strict `YYYY-MM-DD`, timezone-naive.

use chrono::NaiveDate;
use thiserror::Error;

/// The only date format accepted on the wire and in the range inputs.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A date input that is not a valid `YYYY-MM-DD` calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid date '{input}': expected YYYY-MM-DD")]
pub struct DateParseError {
    pub input: String,
}

/// Parse a strict ISO-8601 date-only value.
///
/// chrono accepts unpadded fields (`2020-1-5`), so the shape is checked first.
pub fn parse_date(input: &str) -> Result<NaiveDate, DateParseError> {
    let trimmed = input.trim();
    let bytes = trimmed.as_bytes();
    let shape_ok = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());

    if !shape_ok {
        return Err(DateParseError {
            input: input.to_string(),
        });
    }

    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| DateParseError {
        input: input.to_string(),
    })
}

/// Format a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
