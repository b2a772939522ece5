//! Date parsing for values arriving from forms and query strings

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

/// A non-empty date value that could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid date: {0}")]
pub struct InvalidDate(pub String);

/// Parses an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC).
///
/// Returns `None` when the input is neither.
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Like [`parse_date`], but empty input means "no date".
pub fn parse_optional_date(value: Option<&str>) -> Result<Option<DateTime<Utc>>, InvalidDate> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => parse_date(v)
            .map(Some)
            .ok_or_else(|| InvalidDate(v.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_plain_date() {
        assert_eq!(
            parse_date("2001-02-03"),
            Some(Utc.with_ymd_and_hms(2001, 2, 3, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        assert_eq!(
            parse_date("2001-02-03T10:00:00+02:00"),
            Some(Utc.with_ymd_and_hms(2001, 2, 3, 8, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("2001-13-40"), None);
    }

    #[test]
    fn test_optional_date() {
        assert_eq!(parse_optional_date(None), Ok(None));
        assert_eq!(parse_optional_date(Some("  ")), Ok(None));
        assert!(parse_optional_date(Some("2001-02-03")).unwrap().is_some());
        assert_eq!(
            parse_optional_date(Some("yesterday")),
            Err(InvalidDate("yesterday".to_string()))
        );
    }
}
