//! Bounded exponential backoff for transient failures.

use marquee_error::ErrorKind;
use std::time::Duration;
use tokio_retry2::strategy::ExponentialBackoff;

/// When and how long to wait before re-attempting a failed call.
///
/// Delays double from `base_delay`: attempts 0, 1, 2, … wait 1×, 2×, 4×
/// the base. The loop is bounded by `max_attempts` retries after the
/// initial attempt, so an operation makes at most `max_attempts + 1`
/// calls before the last error is surfaced unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries allowed after the initial attempt.
    pub max_attempts: usize,
    /// Delay before the first retry.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1_000),
        }
    }
}

impl RetryPolicy {
    /// Whether a failure of this kind is worth re-attempting at all.
    pub fn should_retry(&self, kind: ErrorKind) -> bool {
        kind.is_retryable()
    }

    /// The backoff schedule: `base_delay × 2^attempt`, bounded to
    /// `max_attempts` entries.
    pub fn strategy(&self) -> impl Iterator<Item = Duration> {
        // from_millis(2) doubles per step; the factor scales the sequence
        // to base_delay, 2×base_delay, 4×base_delay, …
        ExponentialBackoff::from_millis(2)
            .factor(self.base_delay.as_millis() as u64 / 2)
            .take(self.max_attempts)
    }
}
