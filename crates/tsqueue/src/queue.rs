use crate::invariants::{debug_assert_bounded_len, debug_assert_drained, debug_assert_stays_inactive};
use crate::sync::{Condvar, Mutex, MutexGuard};
use crate::QueueError;
use std::collections::VecDeque;
use std::fmt;
use std::sync::PoisonError;
use tracing::{debug, trace};

// =============================================================================
// LOCKING & WAKEUP PROTOCOL
// =============================================================================
//
// All state (buffer + active flag) lives behind one mutex. Two condition
// variables hang off it:
//
// - `space_available`: producers in `blocking_insert` wait here
// - `item_available`:  consumers in `blocking_remove` wait here
//
// ## Wait Predicates
//
// A blocked call waits on ONE combined predicate, re-evaluated under the lock
// after every wake (spurious or not):
//
// - insert: `len < capacity || !active`
// - remove: `len > 0 || !active`
//
// The inactive check is never done in a separate critical section before the
// wait. Shutdown flips the flag under the same lock, so a waiter either sees
// `!active` before parking or is parked when `notify_all` fires.
//
// ## Wakeups
//
// - empty → non-empty: `item_available.notify_all()`
// - full → not-full:   `space_available.notify_all()`
// - shutdown / clear:  both conditions, `notify_all()`
//
// Waiters only park on an empty (resp. full) buffer, so signalling the
// boundary transitions is sufficient. Every parked waiter is woken and
// re-checks; the losers of the race park again.
//
// ## Poisoning
//
// Every mutation is a single `VecDeque` call or flag store, so a panic while
// the lock is held cannot leave `State` half-updated. Poisoned guards are
// recovered with `PoisonError::into_inner`.
//
// =============================================================================

/// Outcome of [`BoundedBlockingQueue::try_insert`] on an active queue.
///
/// A full queue is backpressure, not an error: the item is handed back so the
/// caller can retry or fall back to [`BoundedBlockingQueue::blocking_insert`].
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TryInsert<T> {
    /// The item was appended to the queue.
    Inserted,
    /// The queue was at capacity; the item is returned to the caller.
    Full(T),
}

impl<T> TryInsert<T> {
    /// Returns `true` if the item was appended.
    #[inline]
    pub fn is_inserted(&self) -> bool {
        matches!(self, Self::Inserted)
    }

    /// Returns the rejected item, if the queue was full.
    #[inline]
    pub fn into_rejected(self) -> Option<T> {
        match self {
            Self::Inserted => None,
            Self::Full(item) => Some(item),
        }
    }
}

struct State<T> {
    buffer: VecDeque<T>,
    active: bool,
}

impl<T> State<T> {
    #[inline]
    fn is_full(&self, capacity: usize) -> bool {
        self.buffer.len() >= capacity
    }

    /// Appends `item`. Returns `true` if the buffer was empty beforehand.
    #[inline]
    fn push(&mut self, item: T, capacity: usize) -> bool {
        let was_empty = self.buffer.is_empty();
        self.buffer.push_back(item);
        debug_assert_bounded_len!(self.buffer.len(), capacity);
        was_empty
    }

    /// Pops the oldest item. The flag is `true` if the buffer was full beforehand.
    #[inline]
    fn pop(&mut self, capacity: usize) -> Option<(T, bool)> {
        let was_full = self.is_full(capacity);
        self.buffer.pop_front().map(|item| (item, was_full))
    }
}

/// Bounded, thread-safe FIFO queue with blocking and non-blocking operations.
///
/// Any number of producers and consumers may share the queue (by reference or
/// through an `Arc`). [`shutdown`](Self::shutdown) is a one-way switch: it
/// wakes every blocked caller and makes further inserts fail with
/// [`QueueError::Inactive`]. Items enqueued before shutdown can still be
/// drained with [`blocking_remove`](Self::blocking_remove) until
/// [`clear`](Self::clear) discards them.
///
/// # Example
///
/// ```
/// use tsqueue_rs::{BoundedBlockingQueue, QueueError, TryInsert};
///
/// let queue = BoundedBlockingQueue::new(2).unwrap();
/// assert_eq!(queue.try_insert(10), Ok(TryInsert::Inserted));
/// assert_eq!(queue.try_insert(20), Ok(TryInsert::Inserted));
/// assert_eq!(queue.try_insert(30), Ok(TryInsert::Full(30)));
///
/// assert_eq!(queue.try_remove(), Ok(Some(10)));
///
/// queue.shutdown();
/// assert_eq!(queue.try_insert(40), Err(QueueError::Inactive));
/// assert_eq!(queue.blocking_remove(), Ok(20));
/// assert_eq!(queue.blocking_remove(), Err(QueueError::Inactive));
/// ```
pub struct BoundedBlockingQueue<T> {
    state: Mutex<State<T>>,
    space_available: Condvar,
    item_available: Condvar,
    capacity: usize,
}

impl<T> BoundedBlockingQueue<T> {
    /// Creates an empty, active queue holding at most `capacity` items.
    ///
    /// Returns [`QueueError::InvalidCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, QueueError> {
        if capacity == 0 {
            return Err(QueueError::InvalidCapacity { capacity });
        }

        Ok(Self {
            state: Mutex::new(State {
                buffer: VecDeque::with_capacity(capacity),
                active: true,
            }),
            space_available: Condvar::new(),
            item_available: Condvar::new(),
            capacity,
        })
    }

    #[inline]
    fn lock(&self) -> MutexGuard<'_, State<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ---------------------------------------------------------------------
    // PRODUCER API
    // ---------------------------------------------------------------------

    /// Appends `item` without blocking.
    ///
    /// Returns [`TryInsert::Full`] with the item if the queue is at capacity,
    /// or [`QueueError::Inactive`] if it has been shut down.
    pub fn try_insert(&self, item: T) -> Result<TryInsert<T>, QueueError> {
        let mut state = self.lock();

        if !state.active {
            return Err(QueueError::Inactive);
        }
        if state.is_full(self.capacity) {
            return Ok(TryInsert::Full(item));
        }

        if state.push(item, self.capacity) {
            self.item_available.notify_all();
        }
        Ok(TryInsert::Inserted)
    }

    /// Appends `item`, blocking while the queue is full.
    ///
    /// Returns [`QueueError::Inactive`] (dropping `item`) if the queue is shut
    /// down before space frees up. There is no timeout: without free space or
    /// a shutdown this call blocks forever.
    pub fn blocking_insert(&self, item: T) -> Result<(), QueueError> {
        let mut state = self.lock();

        while state.active && state.is_full(self.capacity) {
            trace!(capacity = self.capacity, "blocking insert: waiting for space");
            state = self
                .space_available
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }

        if !state.active {
            return Err(QueueError::Inactive);
        }

        if state.push(item, self.capacity) {
            self.item_available.notify_all();
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // CONSUMER API
    // ---------------------------------------------------------------------

    /// Removes the oldest item without blocking.
    ///
    /// Returns `Ok(None)` if the queue is empty, or [`QueueError::Inactive`]
    /// if it has been shut down (even if items remain; use
    /// [`blocking_remove`](Self::blocking_remove) to drain them).
    pub fn try_remove(&self) -> Result<Option<T>, QueueError> {
        let mut state = self.lock();

        if !state.active {
            return Err(QueueError::Inactive);
        }

        Ok(state.pop(self.capacity).map(|(item, was_full)| {
            if was_full {
                self.space_available.notify_all();
            }
            item
        }))
    }

    /// Removes the oldest item, blocking while the queue is empty.
    ///
    /// Items enqueued before [`shutdown`](Self::shutdown) are still returned;
    /// [`QueueError::Inactive`] is reported only once the queue is both shut
    /// down and empty.
    pub fn blocking_remove(&self) -> Result<T, QueueError> {
        let mut state = self.lock();

        while state.active && state.buffer.is_empty() {
            trace!("blocking remove: waiting for an item");
            state = self
                .item_available
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }

        match state.pop(self.capacity) {
            Some((item, was_full)) => {
                if was_full {
                    self.space_available.notify_all();
                }
                Ok(item)
            }
            None => Err(QueueError::Inactive),
        }
    }

    // ---------------------------------------------------------------------
    // LIFECYCLE
    // ---------------------------------------------------------------------

    /// Deactivates the queue and wakes every blocked caller.
    ///
    /// Idempotent: calls after the first have no effect.
    pub fn shutdown(&self) {
        let mut state = self.lock();
        let was_active = state.active;
        state.active = false;
        debug_assert_stays_inactive!(was_active, state.active);

        if was_active {
            debug!(
                pending = state.buffer.len(),
                capacity = self.capacity,
                "queue shut down"
            );
        }

        self.item_available.notify_all();
        self.space_available.notify_all();
    }

    /// Discards every buffered item, but only once the queue is inactive.
    ///
    /// On an active queue this is a no-op, so live traffic is never dropped.
    pub fn clear(&self) {
        let mut state = self.lock();
        let len_before = state.buffer.len();

        if !state.active {
            state.buffer.clear();
            if len_before > 0 {
                debug!(discarded = len_before, "cleared inactive queue");
            }
            self.item_available.notify_all();
            self.space_available.notify_all();
        }

        debug_assert_drained!(state.active, len_before, state.buffer.len());
    }

    // ---------------------------------------------------------------------
    // SNAPSHOTS
    // ---------------------------------------------------------------------

    /// Returns the maximum number of items the queue can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the current number of buffered items.
    pub fn len(&self) -> usize {
        self.lock().buffer.len()
    }

    /// Returns `true` if no items are buffered.
    pub fn is_empty(&self) -> bool {
        self.lock().buffer.is_empty()
    }

    /// Returns `true` if the queue is at capacity.
    pub fn is_full(&self) -> bool {
        self.lock().is_full(self.capacity)
    }

    /// Returns `true` until [`shutdown`](Self::shutdown) is called.
    pub fn is_active(&self) -> bool {
        self.lock().active
    }
}

impl<T> Drop for BoundedBlockingQueue<T> {
    fn drop(&mut self) {
        self.shutdown();
        self.clear();
    }
}

impl<T> fmt::Debug for BoundedBlockingQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("BoundedBlockingQueue")
            .field("capacity", &self.capacity)
            .field("len", &state.buffer.len())
            .field("active", &state.active)
            .finish()
    }
}
