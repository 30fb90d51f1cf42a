//! Bounded ring-drop queue between producers and the dispatcher
//!
//! Producers enqueue points without ever blocking on the consumer: when the
//! queue is full, the oldest buffered point is evicted to make room for the
//! new one. Recency of telemetry wins over completeness, and a full queue
//! never fails the caller.

use super::metrics::HookMetrics;
use super::point::Point;
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TrySendError};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// Outcome of a consumer-side timed receive.
#[derive(Debug)]
pub enum Recv {
    Point(Point),
    TimedOut,
    /// Queue closed and fully drained
    Closed,
}

/// Fixed-capacity conduit with ring-drop overflow.
///
/// Exactly one consumer (the dispatcher) drains in FIFO order; any number of
/// producers may enqueue concurrently. Closing is idempotent and late
/// enqueues after close are silently ignored.
pub struct BoundedQueue {
    /// Taken on close; enqueue holds this lock only for the try-send window.
    sender: Mutex<Option<Sender<Point>>>,
    receiver: Receiver<Point>,
    capacity: usize,
    metrics: Arc<HookMetrics>,
}

impl BoundedQueue {
    pub fn new(capacity: usize, metrics: Arc<HookMetrics>) -> Self {
        let capacity = capacity.max(1);
        let (sender, receiver) = bounded(capacity);
        Self {
            sender: Mutex::new(Some(sender)),
            receiver,
            capacity,
            metrics,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.sender.lock().is_none()
    }

    /// Enqueue a point, evicting the oldest buffered point on overflow.
    ///
    /// Never blocks beyond the short sender lock. A closed queue ignores the
    /// point entirely.
    pub fn enqueue(&self, point: Point) {
        let guard = self.sender.lock();
        let Some(sender) = guard.as_ref() else {
            return;
        };

        let mut point = point;
        loop {
            match sender.try_send(point) {
                Ok(()) => {
                    self.metrics.record_enqueued();
                    return;
                }
                Err(TrySendError::Full(rejected)) => {
                    // Evict the oldest item. The sender lock keeps other
                    // producers out, so this loop can only shrink the queue.
                    if self.receiver.try_recv().is_ok() {
                        self.metrics.record_dropped();
                    }
                    point = rejected;
                }
                Err(TrySendError::Disconnected(_)) => return,
            }
        }
    }

    /// Consumer-side receive with timeout.
    ///
    /// Buffered points are still delivered after close; `Closed` is returned
    /// only once the queue is closed and empty.
    pub fn recv_timeout(&self, timeout: Duration) -> Recv {
        match self.receiver.recv_timeout(timeout) {
            Ok(point) => Recv::Point(point),
            Err(RecvTimeoutError::Timeout) => Recv::TimedOut,
            Err(RecvTimeoutError::Disconnected) => Recv::Closed,
        }
    }

    /// Signal that no more points will be accepted. Idempotent.
    pub fn close(&self) {
        self.sender.lock().take();
    }
}
