//! Synchronization primitives used by the queue.
//!
//! Under `--cfg loom` these resolve to loom's instrumented types so the model
//! tests in `tests/loom_tests.rs` explore every interleaving of the real queue.

#[cfg(loom)]
pub(crate) use loom::sync::{Condvar, Mutex, MutexGuard};

#[cfg(not(loom))]
pub(crate) use std::sync::{Condvar, Mutex, MutexGuard};
