//! Scalar configuration leaf

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A leaf value in a configuration tree.
///
/// Scalar kinds are interchangeable under override: only the shape of a
/// value (scalar, list, mapping) is checked when merging.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Date(NaiveDate),
}

impl Scalar {
    /// Interpret plain YAML text the way model-spec authors write it.
    ///
    /// `20_000` is an integer and `2020-01-01` is a date, matching YAML 1.1
    /// resolution, which the YAML 1.2 parser leaves as strings.
    pub fn from_plain_str(text: &str) -> Self {
        if let Some(value) = parse_underscored_int(text) {
            return Scalar::Int(value);
        }
        if let Some(date) = parse_iso_date(text) {
            return Scalar::Date(date);
        }
        Scalar::Str(text.to_string())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Str(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => f.write_str("null"),
            Scalar::Bool(value) => write!(f, "{}", value),
            Scalar::Int(value) => write!(f, "{}", value),
            Scalar::Float(value) => write_float(f, *value),
            Scalar::Str(value) => f.write_str(value),
            Scalar::Date(value) => write!(f, "{}", value.format(DATE_FORMAT)),
        }
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Str(value.to_string())
    }
}

pub(crate) fn write_float(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        write!(f, "{:.1}", value)
    } else {
        write!(f, "{}", value)
    }
}

fn parse_underscored_int(text: &str) -> Option<i64> {
    let digits = text
        .strip_prefix('-')
        .or_else(|| text.strip_prefix('+'))
        .unwrap_or(text);

    if !digits.contains('_')
        || digits.starts_with('_')
        || digits.ends_with('_')
        || digits.contains("__")
        || !digits.chars().all(|c| c.is_ascii_digit() || c == '_')
    {
        return None;
    }

    text.replace('_', "").parse().ok()
}

fn parse_iso_date(text: &str) -> Option<NaiveDate> {
    let bytes = text.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn underscored_integers_are_integers() {
        assert_eq!(Scalar::from_plain_str("20_000"), Scalar::Int(20_000));
        assert_eq!(Scalar::from_plain_str("1_000_000"), Scalar::Int(1_000_000));
        assert_eq!(Scalar::from_plain_str("-10_000"), Scalar::Int(-10_000));
    }

    #[test]
    fn malformed_underscores_stay_strings() {
        assert_eq!(Scalar::from_plain_str("_100"), Scalar::from("_100"));
        assert_eq!(Scalar::from_plain_str("100_"), Scalar::from("100_"));
        assert_eq!(Scalar::from_plain_str("1__0"), Scalar::from("1__0"));
        assert_eq!(Scalar::from_plain_str("age_group"), Scalar::from("age_group"));
    }

    #[test]
    fn iso_dates_are_dates() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(Scalar::from_plain_str("2025-01-01"), Scalar::Date(date));
        assert_eq!(Scalar::from_plain_str("2025-13-01"), Scalar::from("2025-13-01"));
        assert_eq!(Scalar::from_plain_str("2025-1-1"), Scalar::from("2025-1-1"));
    }

    #[test]
    fn display_keeps_float_marker() {
        assert_eq!(Scalar::Float(1.0).to_string(), "1.0");
        assert_eq!(Scalar::Float(0.25).to_string(), "0.25");
        assert_eq!(Scalar::Null.to_string(), "null");
    }
}
