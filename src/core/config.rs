//! Hook configuration and default resolution
//!
//! Partially-populated configs are completed by [`HookConfig::resolve`],
//! which applies defaults and environment fallbacks in one place instead of
//! scattering package-level defaults around the crate.

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_URL: &str = "http://localhost:8086";
pub const DEFAULT_MEASUREMENT: &str = "logrus";
pub const DEFAULT_BATCH_COUNT: usize = 200;
pub const DEFAULT_BATCH_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(100);
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;
pub const DEFAULT_MAX_BUFFERED: usize = 4096;

/// Environment variable consulted when no token is configured.
pub const TOKEN_ENV: &str = "INFLUX_TOKEN";

/// Configuration for the InfluxDB hook.
///
/// All fields have workable defaults; an empty config resolves to a hook
/// pointed at a local InfluxDB with the `logrus` measurement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HookConfig {
    /// Base URL of the InfluxDB instance
    pub url: String,
    /// API token; falls back to the `INFLUX_TOKEN` environment variable
    pub token: Option<String>,
    /// HTTP request timeout
    pub timeout: Duration,
    pub org: String,
    pub bucket: String,
    pub database: String,
    /// Write precision ("ns", "us", "ms" or "s")
    pub precision: String,

    /// Default measurement name; an entry field named `measurement` overrides it
    pub measurement: String,
    /// Entry field names promoted from fields to tags, in order
    pub tags: Vec<String>,
    /// Minimum level to ship; unset ships everything, garbage ships nothing
    pub min_level: Option<String>,

    /// Emit points in the structured syslog encoding
    pub syslog: bool,
    pub app_name: String,
    pub facility: String,
    pub facility_code: i64,
    /// Syslog protocol version reported in the `version` field
    pub version: String,

    /// Points accumulated before a flush in batched mode; 0 or 1 flushes eagerly
    pub batch_count: usize,
    /// Maximum time between flushes in batched mode
    pub batch_interval: Duration,

    /// Queue slot capacity; 0 falls back to `max_buffered`
    pub queue_capacity: usize,
    /// Soft cap on buffered points, used to size the queue when capacity is unset
    pub max_buffered: usize,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            token: None,
            timeout: Duration::ZERO,
            org: String::new(),
            bucket: String::new(),
            database: String::new(),
            precision: String::new(),
            measurement: String::new(),
            tags: Vec::new(),
            min_level: None,
            syslog: false,
            app_name: String::new(),
            facility: String::new(),
            facility_code: 0,
            version: String::new(),
            batch_count: DEFAULT_BATCH_COUNT,
            batch_interval: DEFAULT_BATCH_INTERVAL,
            queue_capacity: 0,
            max_buffered: 0,
        }
    }
}

impl HookConfig {
    /// Return a fully-populated config with defaults and environment
    /// fallbacks applied. Explicitly set values always win.
    #[must_use]
    pub fn resolve(self) -> Self {
        self.resolve_with_env(|key| std::env::var(key).ok())
    }

    /// Like [`resolve`](Self::resolve), with an injectable environment
    /// lookup. Lets callers and tests control the token fallback without
    /// touching process-global state.
    #[must_use]
    pub fn resolve_with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if self.url.is_empty() {
            self.url = DEFAULT_URL.to_string();
        }
        if self.token.is_none() {
            self.token = lookup(TOKEN_ENV).filter(|t| !t.is_empty());
        }
        if self.timeout.is_zero() {
            self.timeout = DEFAULT_TIMEOUT;
        }
        if self.precision.is_empty() {
            self.precision = "ns".to_string();
        }
        if self.measurement.is_empty() {
            self.measurement = DEFAULT_MEASUREMENT.to_string();
        }
        if self.batch_interval.is_zero() {
            self.batch_interval = DEFAULT_BATCH_INTERVAL;
        }
        if self.max_buffered == 0 {
            self.max_buffered = DEFAULT_MAX_BUFFERED;
        }
        if self.queue_capacity == 0 {
            // Capacity unknown at construction: size from the soft cap.
            self.queue_capacity = self.max_buffered.min(DEFAULT_QUEUE_CAPACITY).max(1);
        }
        self
    }

    /// Whether the dispatcher should write and flush each point immediately.
    pub fn eager(&self) -> bool {
        self.batch_count <= 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_fills_defaults() {
        let config = HookConfig::default().resolve();

        assert_eq!(config.url, DEFAULT_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.precision, "ns");
        assert_eq!(config.measurement, DEFAULT_MEASUREMENT);
        assert_eq!(config.batch_count, DEFAULT_BATCH_COUNT);
        assert_eq!(config.batch_interval, DEFAULT_BATCH_INTERVAL);
        assert_eq!(config.max_buffered, DEFAULT_MAX_BUFFERED);
        assert!(config.queue_capacity > 0);
        assert!(config.min_level.is_none());
        assert!(config.tags.is_empty());
    }

    #[test]
    fn test_resolve_keeps_explicit_values() {
        let config = HookConfig {
            url: "https://influx.internal:8086".to_string(),
            measurement: "app_logs".to_string(),
            batch_count: 50,
            queue_capacity: 16,
            ..Default::default()
        }
        .resolve();

        assert_eq!(config.url, "https://influx.internal:8086");
        assert_eq!(config.measurement, "app_logs");
        assert_eq!(config.batch_count, 50);
        assert_eq!(config.queue_capacity, 16);
    }

    #[test]
    fn test_queue_capacity_from_soft_cap() {
        let config = HookConfig {
            max_buffered: 64,
            ..Default::default()
        }
        .resolve();

        assert_eq!(config.queue_capacity, 64);
    }

    #[test]
    fn test_token_env_fallback() {
        let env = |key: &str| (key == TOKEN_ENV).then(|| "secret-token".to_string());

        let config = HookConfig::default().resolve_with_env(env);
        assert_eq!(config.token.as_deref(), Some("secret-token"));

        // Explicit tokens win over the environment.
        let explicit = HookConfig {
            token: Some("explicit".to_string()),
            ..Default::default()
        }
        .resolve_with_env(env);
        assert_eq!(explicit.token.as_deref(), Some("explicit"));

        // An empty environment value is treated as unset.
        let empty = HookConfig::default().resolve_with_env(|_| Some(String::new()));
        assert!(empty.token.is_none());
    }

    #[test]
    fn test_eager_mode_threshold() {
        let mut config = HookConfig::default();
        config.batch_count = 0;
        assert!(config.eager());
        config.batch_count = 1;
        assert!(config.eager());
        config.batch_count = 2;
        assert!(!config.eager());
    }
}
