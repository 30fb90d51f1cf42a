//! Sink trait for remote point storage

use super::error::Result;
use super::point::Point;
use std::time::Duration;

/// Destination for time-series points.
///
/// The dispatcher is the only caller of `write`/`flush`; implementations may
/// buffer writes internally and transmit on `flush`.
pub trait Sink: Send {
    /// Readiness check, called once at hook construction.
    fn ready(&mut self) -> Result<bool>;

    /// Hand one point to the sink. May buffer.
    fn write(&mut self, point: &Point) -> Result<()>;

    /// Transmit everything buffered since the last flush.
    fn flush(&mut self) -> Result<()>;

    fn name(&self) -> &str;

    /// Advisory batching configuration for sinks with internal batching.
    /// The default implementation ignores the hints.
    fn set_batch_hints(&mut self, _batch_count: usize, _flush_interval: Duration) {}
}
