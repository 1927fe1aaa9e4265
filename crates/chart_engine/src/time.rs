use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Timelike, Utc};
use serde_json::Value;

use crate::error::{ChartError, Result};

const OFFSET_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%:z";
const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Validate the raw `utc_datetime` field and convert it to UTC.
pub fn normalize_datetime(value: Option<&Value>) -> Result<DateTime<Utc>> {
    let text = match value {
        Some(Value::String(text)) if !text.is_empty() => text,
        _ => return Err(ChartError::InvalidDatetime),
    };
    parse_utc_datetime(text).ok_or(ChartError::InvalidDatetime)
}

/// Parse an ISO-8601 timestamp.
///
/// Accepts extended and basic layouts (`1990-05-15T14:30:00`, `19900515T143000`),
/// reduced time precision down to the hour, a `.` or `,` fraction and offsets
/// written `Z`, `+HH`, `+HHMM` or `+HH:MM`. Timestamps without an offset are
/// taken as UTC, never as local time.
pub fn parse_utc_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let text = raw.trim();
    let (date, rest) = split_date(text)?;

    if rest.is_empty() {
        let naive = NaiveDate::parse_from_str(&date, "%Y-%m-%d").ok()?;
        return naive.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    let mut chars = rest.chars();
    if !matches!(chars.next(), Some('T' | 't' | ' ')) {
        return None;
    }
    let (clock, offset) = split_offset(chars.as_str())?;
    let stamp = format!("{date}T{}", extend_clock(clock)?);

    match offset {
        Some(offset) => DateTime::parse_from_str(&format!("{stamp}{offset}"), OFFSET_FORMAT)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        None => NaiveDateTime::parse_from_str(&stamp, NAIVE_FORMAT)
            .ok()
            .map(|naive| naive.and_utc()),
    }
}

// `YYYY-MM-DD` or `YYYYMMDD`, returned in extended form with the remainder.
fn split_date(text: &str) -> Option<(String, &str)> {
    let bytes = text.as_bytes();
    if bytes.len() >= 10 && bytes[4] == b'-' && bytes[7] == b'-' {
        return Some((text.get(..10)?.to_string(), text.get(10..)?));
    }
    if bytes.len() >= 8 && bytes[..8].iter().all(u8::is_ascii_digit) {
        let date = format!("{}-{}-{}", &text[..4], &text[4..6], &text[6..8]);
        return Some((date, &text[8..]));
    }
    None
}

// Peels the UTC offset off a time of day, rewritten as `+HH:MM`.
fn split_offset(text: &str) -> Option<(&str, Option<String>)> {
    if let Some(clock) = text.strip_suffix(['Z', 'z']) {
        return Some((clock, Some("+00:00".to_string())));
    }
    let Some(at) = text.find(['+', '-']) else {
        return Some((text, None));
    };
    let (clock, offset) = text.split_at(at);
    let (sign, digits) = offset.split_at(1);
    let digits = digits.replace(':', "");
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let offset = match digits.len() {
        2 => format!("{sign}{digits}:00"),
        4 => format!("{sign}{}:{}", &digits[..2], &digits[2..]),
        _ => return None,
    };
    Some((clock, Some(offset)))
}

// `HH`, `HHMM`, `HH:MM`, `HHMMSS` or `HH:MM:SS` with an optional fraction,
// widened to `HH:MM:SS[.f]`.
fn extend_clock(clock: &str) -> Option<String> {
    let clock = clock.replace(',', ".");
    let (whole, fraction) = match clock.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (clock.as_str(), None),
    };

    let digits = whole.replace(':', "");
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut out = match digits.len() {
        2 => format!("{digits}:00:00"),
        4 => format!("{}:{}:00", &digits[..2], &digits[2..]),
        6 => format!("{}:{}:{}", &digits[..2], &digits[2..4], &digits[4..]),
        _ => return None,
    };
    if whole.contains(':') && (digits.len() < 4 || !out.starts_with(whole)) {
        return None;
    }

    if let Some(fraction) = fraction {
        if digits.len() != 6 || fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        out.push('.');
        out.push_str(fraction);
    }
    Some(out)
}

/// Hour of day as a fraction, down to microseconds.
pub fn fractional_ut_hour(dt: &DateTime<Utc>) -> f64 {
    let micros = (dt.nanosecond() % 1_000_000_000) / 1_000;
    dt.hour() as f64
        + dt.minute() as f64 / 60.0
        + dt.second() as f64 / 3600.0
        + micros as f64 / 3_600_000_000.0
}

/// RFC 3339 with a `Z` suffix; fractional seconds only when present.
pub fn format_utc(dt: &DateTime<Utc>) -> String {
    let format = if dt.nanosecond() == 0 {
        SecondsFormat::Secs
    } else {
        SecondsFormat::Micros
    };
    dt.to_rfc3339_opts(format, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;

    #[test]
    fn test_z_suffix_matches_explicit_offset() {
        let zulu = parse_utc_datetime("1990-05-15T14:30:00Z").unwrap();
        let offset = parse_utc_datetime("1990-05-15T14:30:00+00:00").unwrap();
        assert_eq!(zulu, offset);
        assert_eq!(format_utc(&zulu), "1990-05-15T14:30:00Z");
    }

    #[test]
    fn test_offset_is_converted_to_utc() {
        let dt = parse_utc_datetime("1990-05-15T16:30:00+02:00").unwrap();
        assert_eq!(format_utc(&dt), "1990-05-15T14:30:00Z");

        let west = parse_utc_datetime("1990-05-15T23:30:00-05:00").unwrap();
        assert_eq!(format_utc(&west), "1990-05-16T04:30:00Z");
    }

    #[test]
    fn test_naive_timestamp_is_utc() {
        let dt = parse_utc_datetime("1990-05-15T14:30:00").unwrap();
        assert_eq!(format_utc(&dt), "1990-05-15T14:30:00Z");

        let spaced = parse_utc_datetime("1990-05-15 14:30").unwrap();
        assert_eq!(dt, spaced);

        let date_only = parse_utc_datetime("1990-05-15").unwrap();
        assert_eq!(format_utc(&date_only), "1990-05-15T00:00:00Z");
    }

    #[test]
    fn test_short_and_basic_offsets() {
        let expected = parse_utc_datetime("1990-05-15T12:30:00Z").unwrap();
        for raw in [
            "1990-05-15T14:30:00+02",
            "1990-05-15T14:30:00+0200",
            "1990-05-15T14:30:00+02:00",
            "1990-05-15T10:30:00-0200",
        ] {
            assert_eq!(parse_utc_datetime(raw), Some(expected), "{raw}");
        }
    }

    #[test]
    fn test_reduced_precision_times() {
        let hour = parse_utc_datetime("1990-05-15T14").unwrap();
        assert_eq!(format_utc(&hour), "1990-05-15T14:00:00Z");

        let hour_zulu = parse_utc_datetime("1990-05-15T14Z").unwrap();
        assert_eq!(hour, hour_zulu);

        let minute = parse_utc_datetime("1990-05-15T1430").unwrap();
        assert_eq!(format_utc(&minute), "1990-05-15T14:30:00Z");
    }

    #[test]
    fn test_basic_layout() {
        let expected = parse_utc_datetime("1990-05-15T14:30:00Z").unwrap();
        assert_eq!(parse_utc_datetime("19900515T143000Z"), Some(expected));
        assert_eq!(parse_utc_datetime("19900515T143000"), Some(expected));
        assert_eq!(parse_utc_datetime("19900515T163000+0200"), Some(expected));

        let date_only = parse_utc_datetime("19900515").unwrap();
        assert_eq!(format_utc(&date_only), "1990-05-15T00:00:00Z");
    }

    #[test]
    fn test_comma_fraction() {
        let comma = parse_utc_datetime("1990-05-15T14:30:00,5Z").unwrap();
        let dot = parse_utc_datetime("1990-05-15T14:30:00.5Z").unwrap();
        assert_eq!(comma, dot);
        assert_eq!(format_utc(&comma), "1990-05-15T14:30:00.500000Z");
    }

    #[test]
    fn test_rejects_malformed_layouts() {
        assert!(parse_utc_datetime("1990-05-15T1:430").is_none());
        assert!(parse_utc_datetime("1990-05-15T14:30:00+2").is_none());
        assert!(parse_utc_datetime("1990-05-15T14.5").is_none());
        assert!(parse_utc_datetime("1990-05-15Z").is_none());
        assert!(parse_utc_datetime("1990-05-15X14:30").is_none());
        assert!(parse_utc_datetime("1990-05-€").is_none());
    }

    #[test]
    fn test_fractional_seconds() {
        let dt = parse_utc_datetime("2000-01-01T12:00:00.250000Z").unwrap();
        assert_eq!(format_utc(&dt), "2000-01-01T12:00:00.250000Z");
        assert_relative_eq!(fractional_ut_hour(&dt), 12.0 + 0.25 / 3600.0, epsilon = 1e-12);
    }

    #[test]
    fn test_fractional_hour() {
        let dt = parse_utc_datetime("1990-05-15T14:30:36Z").unwrap();
        assert_relative_eq!(fractional_ut_hour(&dt), 14.51, epsilon = 1e-12);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_utc_datetime("yesterday").is_none());
        assert!(parse_utc_datetime("1990-13-15T14:30:00Z").is_none());
        assert!(parse_utc_datetime("").is_none());
    }

    #[test]
    fn test_normalize_rejects_non_strings() {
        assert!(matches!(normalize_datetime(None), Err(ChartError::InvalidDatetime)));
        assert!(matches!(
            normalize_datetime(Some(&json!(647_965_800))),
            Err(ChartError::InvalidDatetime)
        ));
        assert!(matches!(normalize_datetime(Some(&json!(""))), Err(ChartError::InvalidDatetime)));
        assert!(normalize_datetime(Some(&json!("2000-01-01T12:00:00Z"))).is_ok());
    }
}
