//! Conversion helpers between SQLite TEXT columns and domain value types.
//!
//! Money is stored as the decimal's canonical string form and timestamps as
//! RFC 3339, so no precision is lost crossing the storage boundary.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crowdfund_core::errors::{Error, Result, ValidationError};

pub(crate) fn parse_decimal(raw: &str) -> Result<Decimal> {
    raw.parse::<Decimal>()
        .map_err(|e| Error::Validation(ValidationError::DecimalParse(e)))
}

pub(crate) fn format_decimal(value: &Decimal) -> String {
    value.to_string()
}

pub(crate) fn parse_datetime(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::Validation(ValidationError::DateTimeParse(e)))
}

pub(crate) fn parse_datetime_opt(raw: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    raw.map(parse_datetime).transpose()
}

pub(crate) fn format_datetime(value: &DateTime<Utc>) -> String {
    value.to_rfc3339()
}

pub(crate) fn format_datetime_opt(value: Option<&DateTime<Utc>>) -> Option<String> {
    value.map(format_datetime)
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_decimal_round_trip_preserves_scale() {
        let original = dec!(1234.5600);
        let parsed = parse_decimal(&format_decimal(&original)).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_datetime_round_trip() {
        let now = Utc::now();
        let parsed = parse_datetime(&format_datetime(&now)).unwrap();
        assert_eq!(parsed, now);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_decimal("not-a-number").is_err());
        assert!(parse_datetime("2026-13-45").is_err());
    }
}
