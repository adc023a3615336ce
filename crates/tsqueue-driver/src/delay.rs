//! Uniform random pacing delays for workers.

use crate::DriverError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Inclusive millisecond range from which worker delays are drawn uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayRange {
    /// Lower bound in milliseconds (inclusive).
    pub min_ms: u64,
    /// Upper bound in milliseconds (inclusive).
    pub max_ms: u64,
}

impl DelayRange {
    /// Creates a range, rejecting `min_ms > max_ms`.
    pub fn new(min_ms: u64, max_ms: u64) -> Result<Self, DriverError> {
        let range = Self { min_ms, max_ms };
        range.validate()?;
        Ok(range)
    }

    /// A range that always yields `ms`.
    pub const fn fixed(ms: u64) -> Self {
        Self { min_ms: ms, max_ms: ms }
    }

    pub(crate) fn validate(&self) -> Result<(), DriverError> {
        if self.min_ms > self.max_ms {
            return Err(DriverError::InvalidDelayRange {
                min_ms: self.min_ms,
                max_ms: self.max_ms,
            });
        }
        Ok(())
    }

    /// Draws a delay using the thread-local RNG.
    pub fn sample(&self) -> Duration {
        self.sample_with(&mut rand::thread_rng())
    }

    /// Draws a delay using the given RNG.
    ///
    /// An inverted range (possible only through direct field construction)
    /// yields `min_ms` rather than panicking.
    pub fn sample_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.min_ms >= self.max_ms {
            return Duration::from_millis(self.min_ms);
        }
        Duration::from_millis(rng.gen_range(self.min_ms..=self.max_ms))
    }
}
