//! tsqueue - Bounded Blocking FIFO Queue
//!
//! A fixed-capacity, multi-producer multi-consumer FIFO queue built on a
//! single mutex and two condition variables ("space available", "item
//! available").
//!
//! # Key Features
//!
//! - Non-blocking `try_insert` / `try_remove` with backpressure signalled as a
//!   value, not an error
//! - Blocking `blocking_insert` / `blocking_remove` without busy-waiting
//! - One-way `shutdown` that wakes every blocked caller
//! - Items enqueued before shutdown stay drainable until `clear`
//!
//! # Example
//!
//! ```
//! use tsqueue_rs::{BoundedBlockingQueue, QueueError};
//! use std::thread;
//!
//! let queue = BoundedBlockingQueue::<u64>::new(4).unwrap();
//!
//! thread::scope(|s| {
//!     s.spawn(|| {
//!         for i in 0..10 {
//!             queue.blocking_insert(i).unwrap();
//!         }
//!     });
//!
//!     let mut sum = 0;
//!     for _ in 0..10 {
//!         sum += queue.blocking_remove().unwrap();
//!     }
//!     assert_eq!(sum, 45);
//! });
//!
//! queue.shutdown();
//! assert_eq!(queue.blocking_remove(), Err(QueueError::Inactive));
//! ```

mod error;
mod invariants;
mod queue;
mod sync;

pub use error::QueueError;
pub use queue::{BoundedBlockingQueue, TryInsert};
