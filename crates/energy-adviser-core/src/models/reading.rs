//! Consumption reading and the normalization boundary
//!
//! Raw payloads are loosely shaped: the value may sit under `consumption` or
//! `value`, the timestamp under `timestamp` or `date`, and numbers sometimes
//! arrive as strings. Everything is coerced here, once, so the analyzers only
//! ever see a finite `f64` and an optional hour-of-day.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};
use serde::Serialize;
use serde_json::Value;

/// Minute-precision layouts with an offset, which RFC 3339 parsing rejects
const ZONED_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M%#z", "%Y-%m-%d %H:%M%#z"];

/// Naive date-time layouts accepted besides RFC 3339
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// One consumption sample
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    /// Timestamp as supplied by the caller
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Consumption in the input's unit (usually kWh), always finite
    pub consumption: f64,
    #[serde(skip)]
    hour: Option<u32>,
}

impl Reading {
    /// Build a reading from an already-typed timestamp and value.
    ///
    /// Non-finite values are stored as 0.
    pub fn new(timestamp: Option<impl Into<String>>, consumption: f64) -> Self {
        let timestamp = timestamp.map(Into::into);
        let hour = timestamp.as_deref().and_then(hour_of_day);
        Self {
            timestamp,
            consumption: finite_or_zero(consumption),
            hour,
        }
    }

    /// Reading without a timestamp (contributes to no hour bucket)
    pub fn untimed(consumption: f64) -> Self {
        Self::new(None::<String>, consumption)
    }

    /// Normalize one raw JSON element.
    ///
    /// Never fails: anything unusable coerces to a reading with no
    /// timestamp and a consumption of 0.
    pub fn from_value(raw: &Value) -> Self {
        let Some(obj) = raw.as_object() else {
            tracing::debug!("Non-object reading coerced to zero");
            return Self::untimed(0.0);
        };

        let consumption = first_truthy(obj.get("consumption"), obj.get("value"))
            .map(coerce_number)
            .unwrap_or(0.0);

        match first_truthy(obj.get("timestamp"), obj.get("date")) {
            Some(Value::String(ts)) => Self::new(Some(ts.as_str()), consumption),
            Some(Value::Number(n)) => {
                // Epoch milliseconds
                let hour = n
                    .as_i64()
                    .and_then(DateTime::<Utc>::from_timestamp_millis)
                    .map(|dt| dt.hour());
                Self {
                    timestamp: Some(n.to_string()),
                    consumption: finite_or_zero(consumption),
                    hour,
                }
            }
            Some(other) => {
                tracing::debug!(timestamp = %other, "Unsupported timestamp type, ignoring");
                Self::untimed(consumption)
            }
            None => Self::untimed(consumption),
        }
    }

    /// Hour of day (0-23) as written in the timestamp, if it could be read
    pub fn hour(&self) -> Option<u32> {
        self.hour
    }
}

/// Extract the wall-clock hour from a timestamp string.
///
/// The hour is taken as written: `2024-01-01T02:00:00+05:00` is hour 2.
/// A bare date is hour 0.
pub fn hour_of_day(ts: &str) -> Option<u32> {
    let ts = ts.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Some(dt.hour());
    }

    let zoned = match ts.strip_suffix('Z').or_else(|| ts.strip_suffix('z')) {
        Some(local) => format!("{local}+00:00"),
        None => ts.to_string(),
    };
    for format in ZONED_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&zoned, format) {
            return Some(dt.hour());
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(ts, format) {
            return Some(ndt.hour());
        }
    }

    if NaiveDate::parse_from_str(ts, "%Y-%m-%d").is_ok() {
        return Some(0);
    }

    tracing::debug!(timestamp = ts, "Unparseable timestamp, no hour bucket");
    None
}

/// Permissive numeric coercion: numbers pass, strings parse by their
/// leading decimal prefix, everything else is 0.
pub fn coerce_number(raw: &Value) -> f64 {
    match raw {
        Value::Number(n) => n.as_f64().map(finite_or_zero).unwrap_or(0.0),
        Value::String(s) => parse_leading_float(s),
        _ => 0.0,
    }
}

/// Parse the longest decimal prefix of `s` ("12.5kWh" -> 12.5, "abc" -> 0)
pub fn parse_leading_float(s: &str) -> f64 {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return 0.0;
    }

    // Exponent only counts when at least one digit follows it
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().map(finite_or_zero).unwrap_or(0.0)
}

fn first_truthy<'a>(primary: Option<&'a Value>, fallback: Option<&'a Value>) -> Option<&'a Value> {
    primary
        .filter(|v| is_truthy(v))
        .or_else(|| fallback.filter(|v| is_truthy(v)))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
