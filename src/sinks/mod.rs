//! Sink implementations

pub mod influx;
pub mod line_protocol;

pub use influx::InfluxSink;
pub use line_protocol::encode_point;

// Re-export the trait for convenience
pub use crate::core::Sink;
