//! Log entry structure

use super::fields::{FieldMap, FieldValue};
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One structured log entry handed to the hook by the logging framework.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub fields: FieldMap,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: Utc::now(),
            fields: FieldMap::new(),
        }
    }

    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_builder() {
        let entry = LogEntry::new(LogLevel::Error, "boom")
            .with_field("logger", "db")
            .with_field("attempt", 2_i64);

        assert_eq!(entry.level, LogLevel::Error);
        assert_eq!(entry.message, "boom");
        assert_eq!(entry.fields.len(), 2);
        assert_eq!(
            entry.fields.get("logger"),
            Some(&FieldValue::from("db"))
        );
    }

    #[test]
    fn test_entry_serde_roundtrip() {
        let entry = LogEntry::new(LogLevel::Warning, "slow query")
            .with_field("duration_ms", 153_i64);

        let json = serde_json::to_string(&entry).unwrap();
        let back: LogEntry = serde_json::from_str(&json).unwrap();

        assert_eq!(back.level, LogLevel::Warning);
        assert_eq!(back.message, "slow query");
        assert_eq!(back.fields.get("duration_ms"), Some(&FieldValue::Int(153)));
    }
}
