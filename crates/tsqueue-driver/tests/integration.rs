//! Integration tests for tsqueue-driver.

use std::time::Duration;
use tsqueue_driver::{DelayRange, DriverConfig, ReaderStrategy, WorkloadDriver};
use tsqueue_rs::BoundedBlockingQueue;

#[test]
fn test_quick_run_leaves_queue_clean() {
    let driver = WorkloadDriver::new(DriverConfig::quick()).expect("valid config");
    let report = driver.run().expect("run failed");

    assert!(report.is_clean());
    assert_eq!(report.writers.workers, 4);
    assert_eq!(report.readers.workers, 4);
    assert_eq!(report.writers.failures, 0);
    assert_eq!(report.readers.failures, 0);
    assert!(report.writers.items > 0);
    assert!(report.readers.items <= report.writers.items);
    assert!(report.duration >= Duration::from_millis(200));
}

#[test]
fn test_blocking_readers_are_released_by_shutdown() {
    // Readers outnumber what writers produce, so some are parked at shutdown
    let config = DriverConfig::quick()
        .with_writers(1)
        .with_readers(4)
        .with_write_attempts(2)
        .with_read_delay(DelayRange::fixed(0))
        .with_reader_strategy(ReaderStrategy::Block);

    let report = WorkloadDriver::new(config).unwrap().run().unwrap();

    assert!(report.is_clean());
    assert_eq!(report.writers.items, 2);
    assert_eq!(report.readers.items, 2);
    assert!(report.readers.interrupted >= 2);
    assert_eq!(report.readers.failures, 0);
}

#[test]
fn test_blocked_writer_is_released_by_shutdown() {
    // No readers: the writer fills the queue and parks in blocking_insert
    let config = DriverConfig::quick()
        .with_writers(1)
        .with_readers(0)
        .with_capacity(3)
        .with_write_attempts(10)
        .with_write_delay(DelayRange::fixed(1));

    let queue = BoundedBlockingQueue::new(config.capacity).unwrap();
    let report = WorkloadDriver::new(config).unwrap().run_on(&queue).unwrap();

    assert_eq!(report.writers.items, 3);
    assert_eq!(report.writers.interrupted, 1);
    assert_eq!(report.discarded(), 3);
    assert!(report.is_clean());
    assert!(!queue.is_active());
    assert!(queue.is_empty());
}

#[test]
fn test_config_file_round_trip() {
    let path = std::env::temp_dir().join(format!("tsqueue-driver-{}.json", std::process::id()));
    std::fs::write(&path, r#"{ "writers": 2, "readers": 1, "capacity": 8 }"#).unwrap();

    let config = DriverConfig::from_json_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(config.writers, 2);
    assert_eq!(config.readers, 1);
    assert_eq!(config.capacity, 8);
    assert_eq!(config.run_duration, DriverConfig::default().run_duration);
}
