//! InfluxDB line protocol encoding
//!
//! One point becomes one line:
//! `measurement,tag=value field="value" 1465839830100400200`
//! Tag keys are already sorted because points carry ordered maps.

use crate::core::fields::FieldValue;
use crate::core::point::Point;
use std::fmt::Write;

/// Escape a measurement name: commas and spaces.
fn escape_measurement(s: &str) -> String {
    s.replace(',', "\\,").replace(' ', "\\ ")
}

/// Escape a tag key, tag value or field key: commas, equals signs, spaces.
fn escape_key(s: &str) -> String {
    s.replace(',', "\\,").replace('=', "\\=").replace(' ', "\\ ")
}

/// Escape a string field value for its double-quoted form.
fn escape_string_value(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

fn format_field_value(value: &FieldValue) -> Option<String> {
    match value {
        FieldValue::String(s) => Some(format!("\"{}\"", escape_string_value(s))),
        FieldValue::Int(i) => Some(format!("{}i", i)),
        FieldValue::Float(f) => Some(format!("{}", f)),
        FieldValue::Bool(b) => Some(if *b { "true" } else { "false" }.to_string()),
        // Null has no line-protocol form.
        FieldValue::Null => None,
    }
}

/// Scale a point timestamp to the configured write precision.
fn scaled_timestamp(point: &Point, precision: &str) -> i64 {
    let ts = point.timestamp;
    match precision {
        "us" => ts.timestamp_micros(),
        "ms" => ts.timestamp_millis(),
        "s" => ts.timestamp(),
        // Out-of-range dates clamp to the epoch.
        _ => ts.timestamp_nanos_opt().unwrap_or(0),
    }
}

/// Encode one point as a line-protocol line without a trailing newline.
///
/// Returns `None` for a point with no encodable fields, which the protocol
/// cannot represent.
pub fn encode_point(point: &Point, precision: &str) -> Option<String> {
    let mut line = escape_measurement(&point.measurement);

    for (key, value) in &point.tags {
        write!(line, ",{}={}", escape_key(key), escape_key(value)).ok()?;
    }

    let mut first = true;
    for (key, value) in &point.fields {
        let Some(formatted) = format_field_value(value) else {
            continue;
        };
        let sep = if first { ' ' } else { ',' };
        write!(line, "{}{}={}", sep, escape_key(key), formatted).ok()?;
        first = false;
    }
    if first {
        return None;
    }

    write!(line, " {}", scaled_timestamp(point, precision)).ok()?;
    Some(line)
}
