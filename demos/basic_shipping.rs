//! Basic log shipping example
//!
//! Ships a few structured entries to a local InfluxDB instance.
//! Requires a reachable InfluxDB at http://localhost:8086.
//!
//! Run with: INFLUX_TOKEN=... cargo run --example basic_shipping

use influx_log_hook::prelude::*;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== InfluxDB Log Hook - Basic Shipping Example ===\n");

    let config = HookConfig {
        org: "example-org".to_string(),
        bucket: "logs".to_string(),
        min_level: Some("info".to_string()),
        tags: vec!["region".to_string()],
        batch_count: 10,
        batch_interval: Duration::from_secs(1),
        ..Default::default()
    };

    let sink = InfluxSink::new(&config.clone().resolve())?;
    let hook = InfluxHook::builder().config(config).build(Box::new(sink))?;

    println!("1. Firing entries at different levels:");
    hook.fire(&LogEntry::new(LogLevel::Debug, "not shipped, below min level"))?;
    hook.fire(&LogEntry::new(LogLevel::Info, "service started"))?;
    hook.fire(
        &LogEntry::new(LogLevel::Error, "request failed")
            .with_field("logger", "http")
            .with_field("region", "us-west")
            .with_field("status", 502_i64),
    )?;

    println!("2. Shutting down and draining the queue...");
    hook.shutdown(Duration::from_secs(5));

    let metrics = hook.metrics();
    println!(
        "   enqueued={} written={} dropped={} flushes={}",
        metrics.enqueued_count(),
        metrics.written_count(),
        metrics.dropped_count(),
        metrics.flush_count()
    );

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
