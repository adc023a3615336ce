//! Timed producer/consumer workload over a shared queue.

use crate::{DriverConfig, DriverError, ReaderStrategy, RoleTally, RunReport, WorkerOutcome};
use crossbeam_utils::thread::ScopedJoinHandle;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use tsqueue_rs::{BoundedBlockingQueue, QueueError, TryInsert};

/// Runs writers and readers against a [`BoundedBlockingQueue`] for a fixed
/// time, then shuts the queue down and reports what happened.
///
/// Every worker borrows the queue for the duration of a scoped thread and
/// hands its own [`WorkerOutcome`] back through its join handle; there is no
/// shared error list.
#[derive(Debug, Clone)]
pub struct WorkloadDriver {
    config: DriverConfig,
}

impl WorkloadDriver {
    /// Creates a driver after validating `config`.
    pub fn new(config: DriverConfig) -> Result<Self, DriverError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the driver's configuration.
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Runs the workload on a fresh queue of the configured capacity.
    pub fn run(&self) -> Result<RunReport, DriverError> {
        let queue = BoundedBlockingQueue::new(self.config.capacity)?;
        self.run_on(&queue)
    }

    /// Runs the workload on `queue`.
    ///
    /// Sequence: spawn all workers, sleep `run_duration`, clear the stop
    /// flag, sleep `stop_grace`, `shutdown()`, join everyone, `clear()`.
    /// The queue is left shut down and empty.
    pub fn run_on(&self, queue: &BoundedBlockingQueue<i64>) -> Result<RunReport, DriverError> {
        let config = &self.config;
        let running = AtomicBool::new(true);
        let running = &running;

        info!(
            writers = config.writers,
            readers = config.readers,
            capacity = queue.capacity(),
            run_ms = config.run_duration.as_millis() as u64,
            strategy = ?config.reader_strategy,
            "starting workload"
        );
        let start = Instant::now();

        let (writers, readers) = crossbeam_utils::thread::scope(|s| {
            let writer_handles: Vec<_> = (0..config.writers)
                .map(|id| {
                    let delay = config.write_delay.sample();
                    s.spawn(move |_| writer_task(id, queue, running, config.write_attempts, delay))
                })
                .collect();

            let reader_handles: Vec<_> = (0..config.readers)
                .map(|_| {
                    let delay = config.read_delay.sample();
                    s.spawn(move |_| reader_task(queue, running, config, delay))
                })
                .collect();

            thread::sleep(config.run_duration);
            info!("stopping workers");
            running.store(false, Ordering::Release);

            // Polling readers see the flag before the queue goes inactive
            thread::sleep(config.stop_grace);
            queue.shutdown();

            (
                join_role("writer", writer_handles),
                join_role("reader", reader_handles),
            )
        })
        .map_err(|_| DriverError::ScopePanicked)?;

        let duration = start.elapsed();
        queue.clear();

        let report = RunReport {
            duration,
            writers,
            readers,
            final_size: queue.len(),
        };

        info!(
            duration_ms = report.duration.as_millis() as u64,
            written = report.writers.items,
            read = report.readers.items,
            discarded = report.discarded(),
            writer_failures = report.writers.failures,
            reader_failures = report.readers.failures,
            "workload finished"
        );
        if !report.is_clean() {
            warn!(remaining = report.final_size, "queue not empty after cleanup");
        }

        Ok(report)
    }
}

fn join_role(
    role: &'static str,
    handles: Vec<ScopedJoinHandle<'_, Result<WorkerOutcome, QueueError>>>,
) -> RoleTally {
    let mut tally = RoleTally {
        workers: handles.len(),
        ..RoleTally::default()
    };

    for (id, handle) in handles.into_iter().enumerate() {
        match handle.join() {
            Ok(Ok(outcome)) => {
                debug!(role, id, items = outcome.items, interrupted = outcome.interrupted, "worker finished");
                tally.record(outcome);
            }
            Ok(Err(e)) => {
                warn!(role, id, error = %e, "worker failed");
                tally.failures += 1;
            }
            Err(_) => {
                warn!(role, id, "worker panicked");
                tally.failures += 1;
            }
        }
    }

    tally
}

/// Inserts up to `attempts` values while the run flag is set, falling back to
/// a blocking insert under backpressure.
fn writer_task(
    id: usize,
    queue: &BoundedBlockingQueue<i64>,
    running: &AtomicBool,
    attempts: usize,
    delay: Duration,
) -> Result<WorkerOutcome, QueueError> {
    let mut outcome = WorkerOutcome::default();

    for n in 0..attempts {
        if !running.load(Ordering::Acquire) {
            break;
        }

        let value = (id * 1000 + n) as i64;
        let inserted = match queue.try_insert(value) {
            Ok(TryInsert::Inserted) => Ok(()),
            Ok(TryInsert::Full(value)) => queue.blocking_insert(value),
            Err(e) => Err(e),
        };

        match inserted {
            Ok(()) => outcome.items += 1,
            Err(e) if e.is_terminal() => {
                outcome.interrupted = true;
                break;
            }
            Err(e) => return Err(e),
        }
        thread::sleep(delay);
    }

    Ok(outcome)
}

/// Removes items until the run flag clears or the queue shuts down.
fn reader_task(
    queue: &BoundedBlockingQueue<i64>,
    running: &AtomicBool,
    config: &DriverConfig,
    delay: Duration,
) -> Result<WorkerOutcome, QueueError> {
    let mut outcome = WorkerOutcome::default();

    while running.load(Ordering::Acquire) {
        let removed = match config.reader_strategy {
            ReaderStrategy::Poll => queue.try_remove(),
            ReaderStrategy::Block => queue.blocking_remove().map(Some),
        };

        match removed {
            Ok(Some(_)) => {
                outcome.items += 1;
                thread::sleep(delay);
            }
            Ok(None) => thread::sleep(config.idle_backoff),
            Err(e) if e.is_terminal() => {
                outcome.interrupted = true;
                break;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(outcome)
}
