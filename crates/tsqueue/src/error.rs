//! Error types for queue operations.

use thiserror::Error;

/// Errors returned by [`BoundedBlockingQueue`](crate::BoundedBlockingQueue).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// The queue has been shut down and accepts no further traffic.
    ///
    /// Removals only report this once nothing is left to drain.
    #[error("queue is inactive")]
    Inactive,

    /// The queue was constructed with a capacity of zero.
    #[error("invalid capacity {capacity}: must be greater than zero")]
    InvalidCapacity {
        /// The rejected capacity.
        capacity: usize,
    },
}

impl QueueError {
    /// Returns `true` if this error means the queue is permanently unusable.
    ///
    /// Workers treat a terminal error as their signal to stop, not as a failure.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Inactive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(QueueError::Inactive.to_string(), "queue is inactive");
        assert_eq!(
            QueueError::InvalidCapacity { capacity: 0 }.to_string(),
            "invalid capacity 0: must be greater than zero"
        );
    }

    #[test]
    fn test_only_inactive_is_terminal() {
        assert!(QueueError::Inactive.is_terminal());
        assert!(!QueueError::InvalidCapacity { capacity: 0 }.is_terminal());
    }
}
