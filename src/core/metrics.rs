//! Hook metrics for observability
//!
//! Counters for monitoring pipeline health: overflow drops, points written,
//! sink failures. Overflow losses are silent on the `fire` path, so these
//! counters are the only place they become visible.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for hook observability.
///
/// # Example
///
/// ```
/// use influx_log_hook::HookMetrics;
///
/// let metrics = HookMetrics::new();
/// metrics.record_enqueued();
/// metrics.record_dropped();
/// assert_eq!(metrics.enqueued_count(), 1);
/// assert_eq!(metrics.dropped_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct HookMetrics {
    /// Points accepted into the queue
    enqueued: AtomicU64,

    /// Points evicted by ring-drop overflow
    dropped: AtomicU64,

    /// Points handed to the sink's write operation
    written: AtomicU64,

    /// Sink write or flush failures
    write_errors: AtomicU64,

    /// Completed flush calls
    flushes: AtomicU64,
}

impl HookMetrics {
    pub const fn new() -> Self {
        Self {
            enqueued: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
            written: AtomicU64::new(0),
            write_errors: AtomicU64::new(0),
            flushes: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn enqueued_count(&self) -> u64 {
        self.enqueued.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn written_count(&self) -> u64 {
        self.written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_error_count(&self) -> u64 {
        self.write_errors.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn flush_count(&self) -> u64 {
        self.flushes.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_enqueued(&self) -> u64 {
        self.enqueued.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dropped(&self) -> u64 {
        self.dropped.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_written(&self) -> u64 {
        self.written.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_write_error(&self) -> u64 {
        self.write_errors.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_flush(&self) -> u64 {
        self.flushes.fetch_add(1, Ordering::Relaxed)
    }

    /// Overflow drop rate as a percentage (0.0 - 100.0).
    ///
    /// Returns 0.0 when nothing has been enqueued or dropped.
    pub fn drop_rate(&self) -> f64 {
        let dropped = self.dropped_count() as f64;
        let total = self.enqueued_count() as f64 + dropped;
        if total == 0.0 {
            0.0
        } else {
            (dropped / total) * 100.0
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.enqueued.store(0, Ordering::Relaxed);
        self.dropped.store(0, Ordering::Relaxed);
        self.written.store(0, Ordering::Relaxed);
        self.write_errors.store(0, Ordering::Relaxed);
        self.flushes.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = HookMetrics::new();
        assert_eq!(metrics.enqueued_count(), 0);
        assert_eq!(metrics.dropped_count(), 0);
        assert_eq!(metrics.written_count(), 0);
        assert_eq!(metrics.write_error_count(), 0);
        assert_eq!(metrics.flush_count(), 0);
    }

    #[test]
    fn test_metrics_counters() {
        let metrics = HookMetrics::new();
        assert_eq!(metrics.record_dropped(), 0); // returns previous value
        metrics.record_dropped();
        metrics.record_enqueued();
        metrics.record_written();
        metrics.record_flush();

        assert_eq!(metrics.dropped_count(), 2);
        assert_eq!(metrics.enqueued_count(), 1);
        assert_eq!(metrics.written_count(), 1);
        assert_eq!(metrics.flush_count(), 1);
    }

    #[test]
    fn test_drop_rate() {
        let metrics = HookMetrics::new();
        assert_eq!(metrics.drop_rate(), 0.0);

        for _ in 0..90 {
            metrics.record_enqueued();
        }
        for _ in 0..10 {
            metrics.record_dropped();
        }

        let rate = metrics.drop_rate();
        assert!((9.9..=10.1).contains(&rate), "Drop rate was {}", rate);
    }

    #[test]
    fn test_metrics_reset() {
        let metrics = HookMetrics::new();
        metrics.record_dropped();
        metrics.record_write_error();

        metrics.reset();

        assert_eq!(metrics.dropped_count(), 0);
        assert_eq!(metrics.write_error_count(), 0);
    }
}
