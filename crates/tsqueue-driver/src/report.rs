//! Aggregated results of a workload run.

use serde::Serialize;
use std::time::Duration;

/// What a single worker returns to the driver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerOutcome {
    /// Items inserted (writers) or removed (readers).
    pub items: usize,
    /// The worker stopped because the queue shut down under it.
    pub interrupted: bool,
}

/// Per-role totals over all workers of that role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RoleTally {
    /// Number of workers spawned.
    pub workers: usize,
    /// Items inserted or removed.
    pub items: usize,
    /// Workers stopped by shutdown rather than by the stop flag.
    pub interrupted: usize,
    /// Workers that panicked or returned an unexpected error.
    pub failures: usize,
}

impl RoleTally {
    pub(crate) fn record(&mut self, outcome: WorkerOutcome) {
        self.items += outcome.items;
        if outcome.interrupted {
            self.interrupted += 1;
        }
    }
}

/// Results of one [`WorkloadDriver::run`](crate::WorkloadDriver::run).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Wall time from spawning the workers to joining the last one.
    #[serde(rename = "duration_ms", with = "crate::config::duration_ms")]
    pub duration: Duration,
    /// Producer totals.
    pub writers: RoleTally,
    /// Consumer totals.
    pub readers: RoleTally,
    /// Items still buffered after shutdown and clear.
    pub final_size: usize,
}

impl RunReport {
    /// Returns `true` if the queue was left empty.
    pub fn is_clean(&self) -> bool {
        self.final_size == 0
    }

    /// Items inserted but never removed (discarded by the final clear).
    pub fn discarded(&self) -> usize {
        self.writers.items.saturating_sub(self.readers.items)
    }
}
