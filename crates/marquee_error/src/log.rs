//! Bounded in-memory log of recent classified errors.

use crate::ClassifiedError;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Default number of entries the log retains.
pub const DEFAULT_LOG_CAPACITY: usize = 100;

/// A classified error plus its insertion order.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorLogEntry {
    /// Monotonically increasing insertion counter.
    pub seq: u64,
    /// The recorded error.
    pub error: ClassifiedError,
}

/// Fixed-capacity ring buffer of the most recent classified errors.
///
/// Recording evicts the oldest entry once the buffer is full, so
/// `len() <= capacity` always holds. Reads never mutate. The log is pure
/// bookkeeping for operator diagnostics and has no effect on retry or
/// classification decisions.
///
/// The buffer sits behind a mutex; the handle is cheap to clone and safe
/// to share across tasks and threads.
///
/// # Examples
///
/// ```
/// use marquee_error::{ClassifiedError, ErrorKind, ErrorLog};
///
/// let log = ErrorLog::with_capacity(2);
/// log.record(ClassifiedError::new(ErrorKind::ApiServerError, "first"));
/// log.record(ClassifiedError::new(ErrorKind::ApiNetworkError, "second"));
/// log.record(ClassifiedError::new(ErrorKind::ApiRateLimit, "third"));
///
/// let recent = log.recent(2);
/// assert_eq!(recent.len(), 2);
/// assert_eq!(recent[0].error.message, "third");
/// ```
#[derive(Debug, Clone)]
pub struct ErrorLog {
    inner: Arc<Mutex<Buffer>>,
}

#[derive(Debug)]
struct Buffer {
    entries: VecDeque<ErrorLogEntry>,
    capacity: usize,
    next_seq: u64,
}

impl ErrorLog {
    /// Create a log with [`DEFAULT_LOG_CAPACITY`].
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }

    /// Create a log retaining at most `capacity` entries (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Arc::new(Mutex::new(Buffer {
                entries: VecDeque::with_capacity(capacity),
                capacity,
                next_seq: 0,
            })),
        }
    }

    /// Append an error, evicting the oldest entry once full.
    pub fn record(&self, error: ClassifiedError) {
        let mut buffer = self.inner.lock().unwrap();
        if buffer.entries.len() == buffer.capacity {
            buffer.entries.pop_front();
        }
        let seq = buffer.next_seq;
        buffer.next_seq += 1;
        debug!(seq, kind = %error.kind, "recording classified error");
        buffer.entries.push_back(ErrorLogEntry { seq, error });
    }

    /// The most recent `n` entries, newest first.
    pub fn recent(&self, n: usize) -> Vec<ErrorLogEntry> {
        let buffer = self.inner.lock().unwrap();
        buffer.entries.iter().rev().take(n).cloned().collect()
    }

    /// Discard all entries.
    pub fn clear(&self) {
        self.inner.lock().unwrap().entries.clear();
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().entries.len()
    }

    /// True when no entries are retained.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ErrorLog {
    fn default() -> Self {
        Self::new()
    }
}
