//! Timed Multi-Producer/Multi-Consumer Queue Demo
//!
//! Runs the reference workload (19 writers, 19 readers, capacity 70, 3s)
//! against a bounded blocking queue, shuts it down, and verifies the queue is
//! left empty.
//!
//! Run with: `cargo run -p tsqueue-driver --bin tsqueue-demo [config.json]`
//!
//! Set `RUST_LOG=debug` to see per-worker results.

use anyhow::{ensure, Context};
use tracing_subscriber::EnvFilter;
use tsqueue_driver::{DriverConfig, WorkloadDriver};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => DriverConfig::from_json_file(&path)
            .with_context(|| format!("loading config from {path}"))?,
        None => DriverConfig::default(),
    };

    println!("=== Bounded Blocking Queue Workload ===\n");
    println!("Configuration:");
    println!("  Writers: {}", config.writers);
    println!("  Readers: {}", config.readers);
    println!("  Duration: {:?}", config.run_duration);
    println!("  Queue capacity: {}", config.capacity);
    println!("  Reader strategy: {:?}\n", config.reader_strategy);

    let driver = WorkloadDriver::new(config).context("invalid workload configuration")?;
    let report = driver.run().context("workload run failed")?;

    println!("{}", serde_json::to_string_pretty(&report)?);

    ensure!(
        report.is_clean(),
        "queue not empty after cleanup: {} items remain",
        report.final_size
    );
    println!("\nQueue properly cleaned up");

    Ok(())
}
