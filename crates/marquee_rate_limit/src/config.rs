//! Configuration for the request queue.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Dispatch pacing limits for the catalog provider.
///
/// The provider allows `requests_per_window` calls per rolling `window_ms`
/// window. The queue realizes the ceiling as a fixed `min_gap_ms` spacing
/// between successive dispatches, strict spacing rather than bursting, so
/// no window shorter than the spacing allows can ever be exceeded.
///
/// # Example
///
/// ```
/// use marquee_rate_limit::QueueConfig;
///
/// let config = QueueConfig::default();
/// assert_eq!(config.requests_per_window, 4);
/// assert_eq!(config.min_gap().as_millis(), 200);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Requests allowed per rolling window.
    pub requests_per_window: u32,
    /// Rolling window size in milliseconds.
    pub window_ms: u64,
    /// Minimum spacing between successive dispatches in milliseconds.
    pub min_gap_ms: u64,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            requests_per_window: 4,
            window_ms: 1_000,
            min_gap_ms: 200,
        }
    }
}

impl QueueConfig {
    /// Minimum spacing between successive dispatches.
    pub fn min_gap(&self) -> Duration {
        Duration::from_millis(self.min_gap_ms)
    }

    /// Rolling window size.
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }
}
