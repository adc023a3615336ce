//! Configuration for workload runs.

use crate::{DelayRange, DriverError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tsqueue_rs::QueueError;

/// How reader workers pull items from the queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReaderStrategy {
    /// `try_remove`, sleeping the idle backoff when the queue is empty.
    #[default]
    Poll,
    /// `blocking_remove`, parked until an item arrives or the queue shuts down.
    Block,
}

/// Configuration for a [`WorkloadDriver`](crate::WorkloadDriver) run.
///
/// Deserializes from JSON; missing fields take their [`Default`] values and
/// durations are given in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Number of producer workers.
    ///
    /// Default: 19
    pub writers: usize,

    /// Number of consumer workers.
    ///
    /// Default: 19
    pub readers: usize,

    /// How long workers run before the stop flag is cleared.
    ///
    /// Default: 3s
    #[serde(with = "duration_ms")]
    pub run_duration: Duration,

    /// Maximum inserts per writer.
    ///
    /// Default: 9
    pub write_attempts: usize,

    /// Pause after each insert (sampled once per writer).
    ///
    /// Default: 100-200ms
    pub write_delay: DelayRange,

    /// Pause after each removal (sampled once per reader).
    ///
    /// Default: 200-300ms
    pub read_delay: DelayRange,

    /// Queue capacity.
    ///
    /// Default: 70
    pub capacity: usize,

    /// Pause between clearing the stop flag and shutting the queue down,
    /// so polling readers can observe the flag first.
    ///
    /// Default: 100ms
    #[serde(with = "duration_ms")]
    pub stop_grace: Duration,

    /// Sleep for a polling reader that found the queue empty.
    ///
    /// Default: 10ms
    #[serde(with = "duration_ms")]
    pub idle_backoff: Duration,

    /// Reader removal strategy.
    ///
    /// Default: [`ReaderStrategy::Poll`]
    pub reader_strategy: ReaderStrategy,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            writers: 19,
            readers: 19,
            run_duration: Duration::from_secs(3),
            write_attempts: 9,
            write_delay: DelayRange { min_ms: 100, max_ms: 200 },
            read_delay: DelayRange { min_ms: 200, max_ms: 300 },
            capacity: 70,
            stop_grace: Duration::from_millis(100),
            idle_backoff: Duration::from_millis(10),
            reader_strategy: ReaderStrategy::Poll,
        }
    }
}

impl DriverConfig {
    /// A short, small run suited to tests and smoke checks.
    pub fn quick() -> Self {
        Self {
            writers: 4,
            readers: 4,
            run_duration: Duration::from_millis(200),
            write_attempts: 20,
            write_delay: DelayRange { min_ms: 1, max_ms: 5 },
            read_delay: DelayRange { min_ms: 2, max_ms: 8 },
            capacity: 4,
            stop_grace: Duration::from_millis(20),
            idle_backoff: Duration::from_millis(1),
            reader_strategy: ReaderStrategy::Poll,
        }
    }

    /// Loads a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DriverError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Checks the configuration before a run.
    pub fn validate(&self) -> Result<(), DriverError> {
        if self.writers == 0 && self.readers == 0 {
            return Err(DriverError::NoWorkers);
        }
        if self.capacity == 0 {
            return Err(QueueError::InvalidCapacity { capacity: 0 }.into());
        }
        self.write_delay.validate()?;
        self.read_delay.validate()
    }

    /// Sets the number of writers.
    pub fn with_writers(mut self, writers: usize) -> Self {
        self.writers = writers;
        self
    }

    /// Sets the number of readers.
    pub fn with_readers(mut self, readers: usize) -> Self {
        self.readers = readers;
        self
    }

    /// Sets the run duration.
    pub fn with_run_duration(mut self, duration: Duration) -> Self {
        self.run_duration = duration;
        self
    }

    /// Sets the maximum inserts per writer.
    pub fn with_write_attempts(mut self, attempts: usize) -> Self {
        self.write_attempts = attempts;
        self
    }

    /// Sets the writer delay range.
    pub fn with_write_delay(mut self, delay: DelayRange) -> Self {
        self.write_delay = delay;
        self
    }

    /// Sets the reader delay range.
    pub fn with_read_delay(mut self, delay: DelayRange) -> Self {
        self.read_delay = delay;
        self
    }

    /// Sets the queue capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the reader strategy.
    pub fn with_reader_strategy(mut self, strategy: ReaderStrategy) -> Self {
        self.reader_strategy = strategy;
        self
    }
}

/// Serializes a `Duration` as whole milliseconds.
pub(crate) mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub(crate) fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
