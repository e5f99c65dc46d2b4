//! # Temporal Helpers — UTC Dates
//!
//! Date values in formwork are `chrono::DateTime<Utc>`. This module holds the
//! conversions the value model needs: reading a date out of epoch
//! milliseconds or text, and rendering one back as RFC 3339.
//!
//! Text is accepted in three forms:
//!
//! - RFC 3339 with any offset (`2024-03-01T10:00:00+02:00`), converted to UTC.
//! - A naive date-time (`2024-03-01T10:00:00`), assumed UTC.
//! - A calendar date (`2024-03-01`), midnight UTC.
//!
//! Rendering always uses millisecond precision and the `Z` suffix, so a date
//! survives a render/parse cycle unchanged as long as it carries no
//! sub-millisecond component.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};

use crate::error::DateError;

/// The zero date: the Unix epoch.
pub fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::default()
}

/// Read a date from Unix epoch milliseconds. Fractional milliseconds are
/// truncated toward zero.
pub fn from_epoch_millis(ms: f64) -> Result<DateTime<Utc>, DateError> {
    if !ms.is_finite() {
        return Err(DateError::OutOfRange(ms));
    }
    let truncated = ms.trunc();
    if truncated < i64::MIN as f64 || truncated > i64::MAX as f64 {
        return Err(DateError::OutOfRange(ms));
    }
    DateTime::from_timestamp_millis(truncated as i64).ok_or(DateError::OutOfRange(ms))
}

/// Unix epoch milliseconds of a date.
pub fn epoch_millis(dt: &DateTime<Utc>) -> f64 {
    dt.timestamp_millis() as f64
}

/// Parse a date from text. See the module docs for accepted forms.
pub fn parse_date(s: &str) -> Result<DateTime<Utc>, DateError> {
    let trimmed = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(Utc.from_utc_datetime(&naive));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| DateError::Unparsable(s.to_string()))
}

/// Render as RFC 3339 with millisecond precision and `Z` suffix
/// (e.g., `1976-02-03T00:00:00.000Z`).
pub fn to_iso8601(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_is_zero_millis() {
        assert_eq!(epoch_millis(&epoch()), 0.0);
        assert_eq!(to_iso8601(&epoch()), "1970-01-01T00:00:00.000Z");
    }

    #[test]
    fn epoch_millis_round_trip() {
        let dt = from_epoch_millis(192_153_600_000.0).unwrap();
        assert_eq!(to_iso8601(&dt), "1976-02-03T00:00:00.000Z");
        assert_eq!(epoch_millis(&dt), 192_153_600_000.0);
    }

    #[test]
    fn fractional_millis_truncate() {
        let dt = from_epoch_millis(1_500.9).unwrap();
        assert_eq!(epoch_millis(&dt), 1_500.0);
    }

    #[test]
    fn non_finite_millis_rejected() {
        assert!(matches!(from_epoch_millis(f64::NAN), Err(DateError::OutOfRange(_))));
        assert!(matches!(from_epoch_millis(f64::INFINITY), Err(DateError::OutOfRange(_))));
        assert!(from_epoch_millis(1e300).is_err());
    }

    #[test]
    fn parse_rfc3339_converts_offset_to_utc() {
        let dt = parse_date("2024-03-01T12:00:00+02:00").unwrap();
        assert_eq!(to_iso8601(&dt), "2024-03-01T10:00:00.000Z");
    }

    #[test]
    fn parse_naive_datetime_assumes_utc() {
        let dt = parse_date("2024-03-01T12:30:00").unwrap();
        assert_eq!(to_iso8601(&dt), "2024-03-01T12:30:00.000Z");
    }

    #[test]
    fn parse_calendar_date_is_midnight() {
        let dt = parse_date(" 1976-02-03 ").unwrap();
        assert_eq!(to_iso8601(&dt), "1976-02-03T00:00:00.000Z");
    }

    #[test]
    fn parse_garbage_rejected() {
        let err = parse_date("next tuesday").unwrap_err();
        assert_eq!(err, DateError::Unparsable("next tuesday".to_string()));
    }

    #[test]
    fn render_parse_cycle_is_stable() {
        let dt = from_epoch_millis(1_700_000_000_123.0).unwrap();
        assert_eq!(parse_date(&to_iso8601(&dt)).unwrap(), dt);
    }
}
