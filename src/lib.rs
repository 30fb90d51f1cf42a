//! # InfluxDB Log Hook
//!
//! An asynchronous logging hook that ships structured log entries to
//! InfluxDB as time-series points.
//!
//! ## Features
//!
//! - **Non-blocking**: `fire` never waits on network I/O
//! - **Bounded memory**: ring-drop queue evicts the oldest point under load
//! - **Batched shipping**: count- and interval-triggered flushes
//! - **Thread Safe**: designed for many concurrent producers

pub mod core;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        build_point, extract_string_field, should_ship, BoundedQueue, DispatcherState,
        ErrorCallback, FieldMap, FieldValue, HookBuilder, HookConfig, HookError, HookMetrics,
        InfluxHook, LogEntry, LogLevel, Point, Result, Sink, DEFAULT_SHUTDOWN_TIMEOUT,
    };
    pub use crate::sinks::InfluxSink;
}

pub use crate::core::{
    build_point, extract_string_field, parse_severity, should_ship, BatchDispatcher, BoundedQueue,
    DispatcherState, ErrorCallback, FieldMap, FieldValue, HookBuilder, HookConfig, HookError,
    HookMetrics, InfluxHook, LogEntry, LogLevel, Point, Result, Sink, DEFAULT_SHUTDOWN_TIMEOUT,
};
pub use crate::sinks::{encode_point, InfluxSink};
