//! Input guards that turn malformed values into labelled errors instead of NaN scores.

use chrono::{DateTime, NaiveDate, Utc};

/// Raised when a record carries a value the scoring code cannot use.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must be a finite, non-negative number (found {value})")]
    InvalidNumber { field: String, value: f64 },
    #[error("{field} day_of_week must be between 0 and 6 (found {value})")]
    InvalidDayOfWeek { field: String, value: u8 },
    #[error("failed to parse '{raw}' as {expected}")]
    InvalidDate { raw: String, expected: &'static str },
}

pub(crate) fn non_negative(field: impl Into<String>, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::InvalidNumber {
            field: field.into(),
            value,
        })
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate {
        raw: raw.to_string(),
        expected: "YYYY-MM-DD",
    })
}

/// Accepts RFC 3339 timestamps or bare dates (interpreted as midnight UTC).
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, ValidationError> {
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }

    parse_date(trimmed)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| ValidationError::InvalidDate {
            raw: raw.to_string(),
            expected: "an RFC 3339 timestamp or YYYY-MM-DD",
        })
}
