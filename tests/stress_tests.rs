//! Stress tests: concurrent producers and shutdown under load

use influx_log_hook::prelude::*;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone, Default)]
struct CountingSink {
    written: Arc<Mutex<Vec<String>>>,
}

impl Sink for CountingSink {
    fn ready(&mut self) -> Result<bool> {
        Ok(true)
    }

    fn write(&mut self, point: &Point) -> Result<()> {
        self.written
            .lock()
            .push(point.fields.get("message").unwrap().to_string());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "counting"
    }
}

#[test]
fn test_concurrent_producers_no_loss_below_capacity() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 250;

    let sink = CountingSink::default();
    let hook = Arc::new(
        InfluxHook::builder()
            .config(HookConfig {
                batch_count: 100,
                queue_capacity: THREADS * PER_THREAD,
                ..Default::default()
            })
            .build(Box::new(sink.clone()))
            .unwrap(),
    );

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let hook = Arc::clone(&hook);
            std::thread::spawn(move || {
                for i in 0..PER_THREAD {
                    hook.fire(&LogEntry::new(LogLevel::Info, format!("t{}-{}", t, i)))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert!(hook.shutdown(Duration::from_secs(10)));

    // Queue was sized for the full load: nothing dropped, everything shipped.
    assert_eq!(hook.metrics().dropped_count(), 0);
    assert_eq!(sink.written.lock().len(), THREADS * PER_THREAD);
}

/// Sink slow enough that producers outrun the dispatcher.
#[derive(Clone, Default)]
struct SlowSink {
    written: Arc<Mutex<Vec<String>>>,
}

impl Sink for SlowSink {
    fn ready(&mut self) -> Result<bool> {
        Ok(true)
    }

    fn write(&mut self, point: &Point) -> Result<()> {
        std::thread::sleep(Duration::from_micros(500));
        self.written
            .lock()
            .push(point.fields.get("message").unwrap().to_string());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "slow"
    }
}

#[test]
fn test_overflow_under_pressure_keeps_newest() {
    let sink = SlowSink::default();
    let hook = InfluxHook::builder()
        .config(HookConfig {
            batch_count: 1000,
            batch_interval: Duration::from_secs(60),
            queue_capacity: 8,
            ..Default::default()
        })
        .build(Box::new(sink.clone()))
        .unwrap();

    // Outrun the dispatcher on purpose; survivors must stay in order.
    for i in 0..1000 {
        hook.fire(&LogEntry::new(LogLevel::Info, format!("{:04}", i)))
            .unwrap();
    }

    assert!(hook.shutdown(Duration::from_secs(10)));

    let written = sink.written.lock().clone();
    let metrics = hook.metrics();
    assert_eq!(
        written.len() as u64 + metrics.dropped_count(),
        metrics.enqueued_count()
    );
    assert!(metrics.dropped_count() > 0);

    let mut sorted = written.clone();
    sorted.sort();
    assert_eq!(written, sorted, "survivors must be delivered in order");
    // The most recent point always survives ring-drop.
    assert_eq!(written.last().map(String::as_str), Some("0999"));
}

#[test]
fn test_shutdown_races_with_fire() {
    let sink = CountingSink::default();
    let hook = Arc::new(
        InfluxHook::builder()
            .config(HookConfig {
                batch_count: 10,
                ..Default::default()
            })
            .build(Box::new(sink))
            .unwrap(),
    );

    let producers: Vec<_> = (0..4)
        .map(|_| {
            let hook = Arc::clone(&hook);
            std::thread::spawn(move || {
                for i in 0..500 {
                    // Late fires after close must drop soft, never panic.
                    hook.fire(&LogEntry::new(LogLevel::Info, format!("m{}", i)))
                        .unwrap();
                }
            })
        })
        .collect();

    std::thread::sleep(Duration::from_millis(5));
    assert!(hook.shutdown(Duration::from_secs(10)));

    for producer in producers {
        producer.join().unwrap();
    }

    assert_eq!(hook.dispatcher_state(), DispatcherState::Stopped);
}
