//! Time-series point construction
//!
//! Transforms one [`LogEntry`] plus the hook configuration into one
//! [`Point`], in either the plain or the structured syslog encoding.

use super::config::HookConfig;
use super::error::Result;
use super::fields::{extract_string_field, FieldValue};
use super::log_entry::LogEntry;
use super::severity::parse_severity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reserved field name that overrides the configured measurement.
pub const MEASUREMENT_FIELD: &str = "measurement";
/// Reserved field name promoted to a tag in the plain encoding.
pub const LOGGER_FIELD: &str = "logger";

/// One time-series data record.
///
/// Tag and field maps are ordered so encodings are deterministic. A key
/// promoted to a tag never remains in the field set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub measurement: String,
    pub tags: BTreeMap<String, String>,
    pub fields: BTreeMap<String, FieldValue>,
    pub timestamp: DateTime<Utc>,
}

impl Point {
    pub fn new(measurement: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            measurement: measurement.into(),
            tags: BTreeMap::new(),
            fields: BTreeMap::new(),
            timestamp,
        }
    }

    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

/// Build a point from an entry. Fails only when the syslog encoding cannot
/// resolve the local host name; no point is produced in that case.
pub fn build_point(entry: &LogEntry, config: &HookConfig) -> Result<Point> {
    let mut measurement = config.measurement.clone();
    if let Some(overridden) = extract_string_field(&entry.fields, MEASUREMENT_FIELD) {
        measurement = overridden;
    }

    let mut point = Point::new(measurement, entry.timestamp);

    if config.syslog {
        let hostname = hostname::get()?.to_string_lossy().into_owned();
        let (severity, severity_code) = parse_severity(entry.level.as_str());

        point.tags.insert("appname".to_string(), config.app_name.clone());
        point.tags.insert("facility".to_string(), config.facility.clone());
        point.tags.insert("host".to_string(), hostname.clone());
        point.tags.insert("hostname".to_string(), hostname);
        point.tags.insert("severity".to_string(), severity.to_string());

        point
            .fields
            .insert("facility_code".to_string(), FieldValue::Int(config.facility_code));
        point
            .fields
            .insert("message".to_string(), FieldValue::String(entry.message.clone()));
        point
            .fields
            .insert("procid".to_string(), FieldValue::Int(std::process::id() as i64));
        point
            .fields
            .insert("severity_code".to_string(), FieldValue::Int(severity_code as i64));
        // Dates outside the representable ns range clamp to the epoch.
        point.fields.insert(
            "timestamp".to_string(),
            FieldValue::Int(entry.timestamp.timestamp_nanos_opt().unwrap_or(0)),
        );
        point
            .fields
            .insert("version".to_string(), FieldValue::String(config.version.clone()));
    } else {
        for (key, value) in &entry.fields {
            point.fields.insert(key.clone(), value.clone());
        }
        // The entry message supersedes any entry-supplied `message` field.
        point
            .fields
            .insert("message".to_string(), FieldValue::String(entry.message.clone()));

        point
            .tags
            .insert("level".to_string(), entry.level.as_str().to_string());
        if let Some(logger) = extract_string_field(&entry.fields, LOGGER_FIELD) {
            point.tags.insert(LOGGER_FIELD.to_string(), logger);
            point.fields.remove(LOGGER_FIELD);
        }
        for tag in &config.tags {
            if let Some(value) = extract_string_field(&entry.fields, tag) {
                point.tags.insert(tag.clone(), value);
                point.fields.remove(tag);
            }
        }
    }

    // The override field never reaches the backend.
    point.fields.remove(MEASUREMENT_FIELD);

    Ok(point)
}
