//! The public hook: entry point for the logging framework
//!
//! Composes severity filtering, point construction, the bounded queue and
//! the batch dispatcher. `fire` returns promptly and never waits on network
//! I/O; only the dispatcher thread talks to the sink.

use super::config::HookConfig;
use super::dispatcher::{BatchDispatcher, DispatcherHandle, DispatcherState, ErrorCallback};
use super::error::{HookError, Result};
use super::log_entry::LogEntry;
use super::metrics::HookMetrics;
use super::point::build_point;
use super::queue::BoundedQueue;
use super::severity::should_ship;
use super::sink::Sink;
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Default shutdown timeout used when the hook is dropped without an
/// explicit `shutdown` call.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Asynchronous InfluxDB logging hook.
///
/// # Example
///
/// ```no_run
/// use influx_log_hook::prelude::*;
///
/// let config = HookConfig {
///     bucket: "logs".to_string(),
///     org: "acme".to_string(),
///     ..Default::default()
/// };
/// let sink = InfluxSink::new(&config.clone().resolve()).unwrap();
/// let hook = InfluxHook::builder().config(config).build(Box::new(sink)).unwrap();
///
/// hook.fire(&LogEntry::new(LogLevel::Error, "disk failing").with_field("device", "sda"))
///     .unwrap();
/// ```
pub struct InfluxHook {
    config: HookConfig,
    queue: Arc<BoundedQueue>,
    dispatcher: Mutex<Option<DispatcherHandle>>,
    metrics: Arc<HookMetrics>,
}

impl InfluxHook {
    /// Create a builder for the hook.
    #[must_use]
    pub fn builder() -> HookBuilder {
        HookBuilder::new()
    }

    /// Filter, transform and enqueue one log entry.
    ///
    /// Returns an error only for synchronous transform failures (hostname
    /// resolution in syslog mode). Entries below the minimum level and
    /// entries arriving after shutdown are dropped without error.
    pub fn fire(&self, entry: &LogEntry) -> Result<()> {
        if !should_ship(entry.level, self.config.min_level.as_deref()) {
            return Ok(());
        }

        let point = build_point(entry, &self.config)?;
        self.queue.enqueue(point);
        Ok(())
    }

    /// Close the queue and wait for the dispatcher to drain and stop.
    ///
    /// Idempotent; repeated calls return `true` immediately. Returns `false`
    /// if the dispatcher did not reach `Stopped` within the timeout.
    pub fn shutdown(&self, timeout: Duration) -> bool {
        self.queue.close();

        let Some(handle) = self.dispatcher.lock().take() else {
            return true;
        };

        let start = std::time::Instant::now();
        while !handle.thread.is_finished() {
            if start.elapsed() >= timeout {
                eprintln!(
                    "[HOOK WARNING] Dispatcher did not finish within {:?}. \
                     Some points may be lost.",
                    timeout
                );
                // The thread is still running; keep the handle so state
                // queries and a later shutdown stay truthful.
                *self.dispatcher.lock() = Some(handle);
                return false;
            }

            thread::sleep(Duration::from_millis(10));
        }

        let DispatcherHandle { thread, state } = handle;
        if let Err(e) = thread.join() {
            eprintln!("[HOOK ERROR] Dispatcher thread panicked during shutdown: {:?}", e);
            return false;
        }
        state.get() == DispatcherState::Stopped
    }

    /// Current dispatcher lifecycle state; `Stopped` after shutdown.
    pub fn dispatcher_state(&self) -> DispatcherState {
        match self.dispatcher.lock().as_ref() {
            Some(handle) => handle.state(),
            None => DispatcherState::Stopped,
        }
    }

    /// Metrics for pipeline observability.
    ///
    /// Overflow drops never surface through `fire`; this is where they show.
    pub fn metrics(&self) -> &HookMetrics {
        &self.metrics
    }

    pub fn config(&self) -> &HookConfig {
        &self.config
    }
}

impl Drop for InfluxHook {
    fn drop(&mut self) {
        self.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);

        let dropped = self.metrics.dropped_count();
        if dropped > 0 {
            eprintln!(
                "[HOOK WARNING] Hook shutting down with {} dropped points (drop rate: {:.2}%)",
                dropped,
                self.metrics.drop_rate()
            );
        }
    }
}

/// Builder for constructing an [`InfluxHook`] with a fluent API.
///
/// # Example
/// ```no_run
/// use influx_log_hook::prelude::*;
/// use std::sync::Arc;
///
/// let sink = InfluxSink::new(&HookConfig::default().resolve()).unwrap();
/// let hook = InfluxHook::builder()
///     .config(HookConfig {
///         min_level: Some("warning".to_string()),
///         ..Default::default()
///     })
///     .on_error(Arc::new(|err| eprintln!("shipping failed: {}", err)))
///     .build(Box::new(sink))
///     .unwrap();
/// ```
pub struct HookBuilder {
    config: HookConfig,
    on_error: Option<ErrorCallback>,
}

impl HookBuilder {
    pub fn new() -> Self {
        Self {
            config: HookConfig::default(),
            on_error: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: HookConfig) -> Self {
        self.config = config;
        self
    }

    /// Set a callback for asynchronous sink failures.
    ///
    /// Without one, failures go to stderr as a log of last resort.
    #[must_use = "builder methods return a new value"]
    pub fn on_error(mut self, callback: ErrorCallback) -> Self {
        self.on_error = Some(callback);
        self
    }

    /// Resolve the configuration, verify the sink is reachable and spawn the
    /// dispatcher. Fails if the sink readiness check does not pass.
    pub fn build(self, mut sink: Box<dyn Sink>) -> Result<InfluxHook> {
        let config = self.config.resolve();

        if !matches!(config.precision.as_str(), "ns" | "us" | "ms" | "s") {
            return Err(HookError::config(
                "HookConfig",
                format!("unknown precision '{}'", config.precision),
            ));
        }

        match sink.ready() {
            Ok(true) => {}
            Ok(false) => {
                return Err(HookError::not_ready(
                    sink.name().to_string(),
                    "readiness check returned false",
                ))
            }
            Err(err) => {
                return Err(HookError::not_ready(sink.name().to_string(), err.to_string()))
            }
        }

        let metrics = Arc::new(HookMetrics::new());
        let queue = Arc::new(BoundedQueue::new(config.queue_capacity, Arc::clone(&metrics)));
        let dispatcher = BatchDispatcher::spawn(
            Arc::clone(&queue),
            sink,
            &config,
            Arc::clone(&metrics),
            self.on_error,
        );

        Ok(InfluxHook {
            config,
            queue,
            dispatcher: Mutex::new(Some(dispatcher)),
            metrics,
        })
    }
}

impl Default for HookBuilder {
    fn default() -> Self {
        Self::new()
    }
}
