//! Workload driver for tsqueue-rs
//!
//! Spawns a fleet of writer and reader threads against one
//! [`BoundedBlockingQueue`](tsqueue_rs::BoundedBlockingQueue), lets them run
//! for a fixed time with randomized pacing, then shuts the queue down and
//! collects one result per worker into a [`RunReport`].
//!
//! # Example
//!
//! ```no_run
//! use tsqueue_driver::{DriverConfig, WorkloadDriver};
//!
//! let driver = WorkloadDriver::new(DriverConfig::quick()).unwrap();
//! let report = driver.run().unwrap();
//! assert!(report.is_clean());
//! println!("wrote {} / read {}", report.writers.items, report.readers.items);
//! ```

mod config;
mod delay;
mod driver;
mod error;
mod report;

pub use config::{DriverConfig, ReaderStrategy};
pub use delay::DelayRange;
pub use driver::WorkloadDriver;
pub use error::DriverError;
pub use report::{RoleTally, RunReport, WorkerOutcome};
