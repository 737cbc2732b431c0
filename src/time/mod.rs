//! Time module for epoch arithmetic
//!
//! Every time-dependent calculation in this crate is expressed as elapsed days
//! since J2000.0 (2000-01-01T12:00:00 UTC). Instants are `chrono::DateTime<Utc>`
//! values, so callers never have to think about time zones.

use crate::constants::{DAY_MS, J2000, J2000_UNIX_MS};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

/// Error type for time operations
#[derive(Debug, Error)]
pub enum TimeError {
    #[error("Invalid time format: {0}")]
    InvalidFormat(String),

    #[error("Time out of range: {0}")]
    OutOfRange(String),
}

/// Result type for time operations
pub type Result<T> = std::result::Result<T, TimeError>;

/// The J2000.0 reference epoch as a UTC instant
pub fn j2000() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH + Duration::milliseconds(J2000_UNIX_MS)
}

/// Signed days elapsed between J2000.0 and `instant`
///
/// Negative for instants before the epoch. Resolution is one millisecond,
/// with exactly 86 400 000 ms per day (no leap-second correction).
///
/// ```rust
/// use orrery::time::{days_since_j2000, j2000};
/// use chrono::Duration;
///
/// assert_eq!(days_since_j2000(&j2000()), 0.0);
/// assert_eq!(days_since_j2000(&(j2000() - Duration::hours(36))), -1.5);
/// ```
pub fn days_since_j2000(instant: &DateTime<Utc>) -> f64 {
    (instant.timestamp_millis() - J2000_UNIX_MS) as f64 / DAY_MS
}

/// Julian date of `instant`, on the same day count as [`days_since_j2000`]
pub fn julian_date(instant: &DateTime<Utc>) -> f64 {
    J2000 + days_since_j2000(instant)
}

/// Converts a Julian date back into a UTC instant (millisecond resolution)
pub fn from_julian_date(jd: f64) -> Result<DateTime<Utc>> {
    if !jd.is_finite() {
        return Err(TimeError::OutOfRange(format!("Julian date {}", jd)));
    }
    let offset_ms = ((jd - J2000) * DAY_MS).round();
    if offset_ms.abs() > i64::MAX as f64 / 2.0 {
        return Err(TimeError::OutOfRange(format!("Julian date {}", jd)));
    }
    let millis = J2000_UNIX_MS + offset_ms as i64;
    DateTime::<Utc>::from_timestamp_millis(millis)
        .ok_or_else(|| TimeError::OutOfRange(format!("Julian date {}", jd)))
}

/// Parses an instant from the forms accepted on the command line
///
/// Accepted inputs:
/// - `now`
/// - `J2000` (the reference epoch)
/// - `JD<number>`, e.g. `JD2460000.5`
/// - RFC 3339, e.g. `2024-03-20T03:06:00Z` or `2024-03-20T05:06:00+02:00`
/// - `YYYY-MM-DDTHH:MM:SS` or `YYYY-MM-DD HH:MM:SS`, taken as UTC
/// - `YYYY-MM-DD`, midnight UTC
pub fn parse_instant(input: &str) -> Result<DateTime<Utc>> {
    let trimmed = input.trim();

    if trimmed.eq_ignore_ascii_case("now") {
        return Ok(Utc::now());
    }
    if trimmed.eq_ignore_ascii_case("j2000") {
        return Ok(j2000());
    }

    if let Some(number) = trimmed
        .strip_prefix("JD")
        .or_else(|| trimmed.strip_prefix("jd"))
    {
        let jd: f64 = number
            .trim()
            .parse()
            .map_err(|_| TimeError::InvalidFormat(format!("bad Julian date '{}'", input)))?;
        return from_julian_date(jd);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive| naive.and_utc())
            .ok_or_else(|| TimeError::OutOfRange(input.to_string()));
    }

    Err(TimeError::InvalidFormat(format!(
        "'{}' is not an RFC 3339 timestamp, date, JD value, 'J2000' or 'now'",
        input
    )))
}
