//! Background batch dispatcher
//!
//! A single worker thread owns the consumer side of the queue and the sink
//! handle. Producers never touch the sink; all flush state (pending count,
//! last flush time) lives on this thread, so the write path needs no lock.

use super::config::HookConfig;
use super::error::HookError;
use super::metrics::HookMetrics;
use super::queue::{BoundedQueue, Recv};
use super::sink::Sink;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Callback type for asynchronous sink failures.
///
/// Invoked on the dispatcher thread; the original `fire` call has already
/// returned by the time a write or flush fails.
pub type ErrorCallback = Arc<dyn Fn(&HookError) + Send + Sync>;

/// Dispatcher lifecycle. Transitions run strictly forward:
/// Idle → Running → Draining → Stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DispatcherState {
    Idle = 0,
    Running = 1,
    Draining = 2,
    Stopped = 3,
}

/// Shared, lock-free view of the dispatcher state.
#[derive(Debug)]
pub struct StateCell(AtomicU8);

impl StateCell {
    fn new() -> Self {
        Self(AtomicU8::new(DispatcherState::Idle as u8))
    }

    pub fn get(&self) -> DispatcherState {
        match self.0.load(Ordering::Acquire) {
            0 => DispatcherState::Idle,
            1 => DispatcherState::Running,
            2 => DispatcherState::Draining,
            _ => DispatcherState::Stopped,
        }
    }

    fn set(&self, state: DispatcherState) {
        self.0.store(state as u8, Ordering::Release);
    }
}

/// Handle to the running dispatcher thread.
pub struct DispatcherHandle {
    pub(crate) thread: thread::JoinHandle<()>,
    pub(crate) state: Arc<StateCell>,
}

impl DispatcherHandle {
    pub fn state(&self) -> DispatcherState {
        self.state.get()
    }
}

pub struct BatchDispatcher {
    queue: Arc<BoundedQueue>,
    sink: Box<dyn Sink>,
    batch_count: usize,
    batch_interval: Duration,
    eager: bool,
    metrics: Arc<HookMetrics>,
    on_error: Option<ErrorCallback>,
    state: Arc<StateCell>,
    last_flush: Instant,
    pending: usize,
}

impl BatchDispatcher {
    /// Spawn the worker thread and return its handle.
    pub fn spawn(
        queue: Arc<BoundedQueue>,
        mut sink: Box<dyn Sink>,
        config: &HookConfig,
        metrics: Arc<HookMetrics>,
        on_error: Option<ErrorCallback>,
    ) -> DispatcherHandle {
        let state = Arc::new(StateCell::new());

        sink.set_batch_hints(config.batch_count, config.batch_interval);

        let dispatcher = BatchDispatcher {
            queue,
            sink,
            batch_count: config.batch_count.max(1),
            batch_interval: config.batch_interval,
            eager: config.eager(),
            metrics,
            on_error,
            state: Arc::clone(&state),
            last_flush: Instant::now(),
            pending: 0,
        };

        let thread = thread::spawn(move || dispatcher.run());

        DispatcherHandle { thread, state }
    }

    fn run(mut self) {
        self.state.set(DispatcherState::Running);

        loop {
            if self.queue.is_closed() && self.state.get() == DispatcherState::Running {
                self.state.set(DispatcherState::Draining);
            }

            match self.queue.recv_timeout(self.next_timeout()) {
                Recv::Point(point) => {
                    if self.pending == 0 {
                        // A new batch starts its own interval window.
                        self.last_flush = Instant::now();
                    }

                    match self.sink.write(&point) {
                        Ok(()) => {
                            self.metrics.record_written();
                            self.pending += 1;
                        }
                        Err(err) => self.report(&err),
                    }

                    // The interval trigger must fire even when the queue
                    // never drains enough to hit the timeout branch.
                    if self.eager
                        || self.pending >= self.batch_count
                        || self.last_flush.elapsed() >= self.batch_interval
                    {
                        self.flush();
                    }
                }
                Recv::TimedOut => {
                    if self.pending > 0 && self.last_flush.elapsed() >= self.batch_interval {
                        self.flush();
                    }
                }
                Recv::Closed => break,
            }
        }

        // Queue closed and drained; push out whatever is still buffered.
        self.state.set(DispatcherState::Draining);
        if self.pending > 0 {
            self.flush();
        }
        self.state.set(DispatcherState::Stopped);
    }

    /// How long to wait for the next point before checking the flush clock.
    fn next_timeout(&self) -> Duration {
        if self.eager || self.pending == 0 {
            return self.batch_interval;
        }
        let deadline = self.last_flush + self.batch_interval;
        deadline.saturating_duration_since(Instant::now())
    }

    fn flush(&mut self) {
        match self.sink.flush() {
            Ok(()) => {
                self.metrics.record_flush();
            }
            Err(err) => self.report(&err),
        }
        // No retries: a failed batch is gone either way.
        self.pending = 0;
        self.last_flush = Instant::now();
    }

    fn report(&self, err: &HookError) {
        self.metrics.record_write_error();
        if let Some(ref callback) = self.on_error {
            callback(err);
        } else {
            eprintln!("[HOOK ERROR] Sink '{}' failed: {}", self.sink.name(), err);
        }
    }
}
