//! Error types for workload runs.

use thiserror::Error;
use tsqueue_rs::QueueError;

/// Errors that can occur while configuring or running a workload.
#[derive(Debug, Error)]
pub enum DriverError {
    /// A delay range whose lower bound exceeds its upper bound.
    #[error("invalid delay range: min {min_ms}ms exceeds max {max_ms}ms")]
    InvalidDelayRange {
        /// Lower bound in milliseconds.
        min_ms: u64,
        /// Upper bound in milliseconds.
        max_ms: u64,
    },

    /// The workload has neither writers nor readers.
    #[error("workload needs at least one writer or reader")]
    NoWorkers,

    /// The worker scope itself panicked (a worker panic is counted, not raised).
    #[error("worker scope panicked")]
    ScopePanicked,

    /// The queue rejected the configuration or an operation.
    #[error(transparent)]
    Queue(#[from] QueueError),

    /// A configuration file could not be parsed.
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    /// A configuration file could not be read.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
