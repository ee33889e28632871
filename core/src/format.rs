//! pt-BR display formatting for amounts and dates.
//!
//! Amounts follow the browser's `pt-BR`/`BRL` currency style: `R$`, a
//! no-break space, `.` for thousands and `,` for decimals. Dates render as
//! `dd/mm/yyyy`. Offsets in timestamps are kept as written; there is no
//! conversion to a local zone.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::mask::group_thousands;

const NBSP: char = '\u{a0}';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("amount is not a finite number")]
    NonFinite,

    #[error("amount is too large to format")]
    OutOfRange,

    #[error("unrecognized date: {0}")]
    InvalidDate(String),
}

/// Format an exact amount in cents, e.g. `123456` → `R$ 1.234,56`.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let integer = group_thousands(&(abs / 100).to_string());
    format!("{sign}R${NBSP}{integer},{:02}", abs % 100)
}

/// Format a decimal amount in reais, rounding half away from zero to cents.
pub fn format_currency(value: f64) -> Result<String, FormatError> {
    if !value.is_finite() {
        return Err(FormatError::NonFinite);
    }
    let cents = (value * 100.0).round();
    if cents.abs() >= i64::MAX as f64 {
        return Err(FormatError::OutOfRange);
    }
    Ok(format_cents(cents as i64))
}

/// Render an ISO-8601 date or timestamp as `dd/mm/yyyy`.
pub fn format_date(input: &str) -> Result<String, FormatError> {
    Ok(parse_timestamp(input)?.format("%d/%m/%Y").to_string())
}

/// Render an ISO-8601 date or timestamp as `dd/mm/yyyy, HH:MM:SS`.
pub fn format_datetime(input: &str) -> Result<String, FormatError> {
    Ok(parse_timestamp(input)?.format("%d/%m/%Y, %H:%M:%S").to_string())
}

/// Accepts RFC 3339, naive `T`- or space-separated timestamps, and bare
/// dates (midnight).
fn parse_timestamp(input: &str) -> Result<NaiveDateTime, FormatError> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.naive_local());
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, pattern) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| FormatError::InvalidDate(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cents_render_with_separators() {
        assert_eq!(format_cents(0), "R$\u{a0}0,00");
        assert_eq!(format_cents(5), "R$\u{a0}0,05");
        assert_eq!(format_cents(123456), "R$\u{a0}1.234,56");
        assert_eq!(format_cents(100000000), "R$\u{a0}1.000.000,00");
    }

    #[test]
    fn negative_cents_lead_with_sign() {
        assert_eq!(format_cents(-123), "-R$\u{a0}1,23");
        assert_eq!(format_cents(i64::MIN).chars().next(), Some('-'));
    }

    #[test]
    fn currency_rounds_to_cents() {
        assert_eq!(format_currency(1234.5).unwrap(), "R$\u{a0}1.234,50");
        assert_eq!(format_currency(0.005).unwrap(), "R$\u{a0}0,01");
        assert_eq!(format_currency(-2.5).unwrap(), "-R$\u{a0}2,50");
    }

    #[test]
    fn currency_rejects_non_finite() {
        assert_eq!(format_currency(f64::NAN), Err(FormatError::NonFinite));
        assert_eq!(format_currency(f64::INFINITY), Err(FormatError::NonFinite));
        assert_eq!(format_currency(1e300), Err(FormatError::OutOfRange));
    }

    #[test]
    fn date_accepts_common_shapes() {
        assert_eq!(format_date("2024-03-07").unwrap(), "07/03/2024");
        assert_eq!(format_date("2024-03-07T15:04:05").unwrap(), "07/03/2024");
        assert_eq!(format_date("2024-03-07 15:04:05.123").unwrap(), "07/03/2024");
        assert_eq!(format_date("2024-03-07T23:30:00-03:00").unwrap(), "07/03/2024");
    }

    #[test]
    fn datetime_keeps_written_offset() {
        assert_eq!(
            format_datetime("2024-03-07T23:30:00-03:00").unwrap(),
            "07/03/2024, 23:30:00"
        );
        assert_eq!(format_datetime("2024-12-25").unwrap(), "25/12/2024, 00:00:00");
        assert_eq!(format_datetime("2024-12-25T08:15").unwrap(), "25/12/2024, 08:15:00");
    }

    #[test]
    fn date_rejects_garbage() {
        assert!(matches!(format_date("yesterday"), Err(FormatError::InvalidDate(_))));
        assert!(format_date("2024-13-01").is_err());
    }
}
