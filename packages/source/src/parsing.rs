//! Lenient field parsing for listings API records.
//!
//! The upstream API is loosely typed: numbers sometimes arrive as strings,
//! ZIP codes sometimes as numbers, and "no value" may be `null`, `""`, or
//! `0`. These helpers fold all of that into `Option`s.

use serde_json::Value;

/// Parses a number or numeric string. Returns `None` if missing,
/// unparseable, non-finite, or zero.
#[must_use]
pub fn parse_nonzero_f64(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if n == 0.0 || !n.is_finite() {
        return None;
    }
    Some(n)
}

/// Parses a non-empty string, or a number rendered as a string.
#[must_use]
pub fn parse_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Parses a unit count. Missing, unparseable, and negative values count
/// as zero; fractional values are rounded.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn parse_count(value: Option<&Value>) -> u64 {
    match parse_nonzero_f64(value) {
        Some(n) if n > 0.0 => n.round() as u64,
        _ => 0,
    }
}

/// Parses lat/lng from optional fields. Returns `None` if either is
/// missing, unparseable, or zero.
#[must_use]
pub fn parse_lat_lng(lat: Option<&Value>, lng: Option<&Value>) -> Option<(f64, f64)> {
    let latitude = parse_nonzero_f64(lat)?;
    let longitude = parse_nonzero_f64(lng)?;
    Some((latitude, longitude))
}
