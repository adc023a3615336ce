//! Debug assertion macros for queue invariants.
//!
//! These checks run inside the critical section and are only active in debug
//! builds (`#[cfg(debug_assertions)]`), so release builds pay nothing for them.

// =============================================================================
// Bounded Occupancy
// =============================================================================

/// Assert that the buffer never holds more than `capacity` items.
///
/// **Invariant**: `0 ≤ len(buffer) ≤ capacity`
///
/// Used in: `State::push()` after appending
macro_rules! debug_assert_bounded_len {
    ($len:expr, $capacity:expr) => {
        debug_assert!(
            $len <= $capacity,
            "bounded occupancy violated: len {} exceeds capacity {}",
            $len,
            $capacity
        )
    };
}

// =============================================================================
// One-Way Shutdown
// =============================================================================

/// Assert that an inactive queue is never reactivated.
///
/// **Invariant**: `active` goes `true → false` at most once and never back.
///
/// Used in: `BoundedBlockingQueue::shutdown()` after flipping the flag
macro_rules! debug_assert_stays_inactive {
    ($was_active:expr, $is_active:expr) => {
        debug_assert!(
            !$is_active,
            "one-way shutdown violated: queue active after shutdown (was_active = {})",
            $was_active
        )
    };
}

// =============================================================================
// Drain Only When Inactive
// =============================================================================

/// Assert that `clear` only discards items from an inactive queue and leaves
/// it empty.
///
/// **Invariant**: `clear() ∧ ¬active → len(buffer) = 0`, and an active queue
/// is never drained.
///
/// Used in: `BoundedBlockingQueue::clear()`
macro_rules! debug_assert_drained {
    ($active:expr, $len_before:expr, $len_after:expr) => {
        debug_assert!(
            if $active {
                $len_after == $len_before
            } else {
                $len_after == 0
            },
            "drain violated: active = {}, len {} -> {}",
            $active,
            $len_before,
            $len_after
        )
    };
}

// =============================================================================
// Re-exports for crate-internal use
// =============================================================================

pub(crate) use debug_assert_bounded_len;
pub(crate) use debug_assert_drained;
pub(crate) use debug_assert_stays_inactive;
