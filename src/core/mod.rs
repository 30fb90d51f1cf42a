//! Core hook types and traits

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod fields;
pub mod hook;
pub mod log_entry;
pub mod log_level;
pub mod metrics;
pub mod point;
pub mod queue;
pub mod severity;
pub mod sink;

pub use config::HookConfig;
pub use dispatcher::{BatchDispatcher, DispatcherState, ErrorCallback};
pub use error::{HookError, Result};
pub use fields::{extract_string_field, FieldMap, FieldValue};
pub use hook::{HookBuilder, InfluxHook, DEFAULT_SHUTDOWN_TIMEOUT};
pub use log_entry::LogEntry;
pub use log_level::LogLevel;
pub use metrics::HookMetrics;
pub use point::{build_point, Point};
pub use queue::BoundedQueue;
pub use severity::{parse_severity, should_ship};
pub use sink::Sink;
