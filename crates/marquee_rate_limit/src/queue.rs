//! A paced, strictly ordered request queue.

use crate::QueueConfig;
use futures::future::BoxFuture;
use marquee_error::{CatalogResult, ClassifiedError, ErrorKind};
use std::future::Future;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{Instant, sleep};
use tracing::debug;

/// A unit of work admitted to the queue.
struct QueuedRequest {
    label: &'static str,
    job: BoxFuture<'static, ()>,
    enqueued_at: Instant,
}

/// The single serialization point for outbound catalog calls.
///
/// All pacing state (the pending queue and the last-dispatch timestamp)
/// is owned by one drain task spawned at construction; `enqueue` is a
/// channel send, so the handle is cheap to clone and safe to share across
/// tasks and threads. Dispatch order is strictly first-in first-out
/// across all callers, with no priority lanes and no per-endpoint budgets.
///
/// Dispatched tasks run concurrently with the drain loop, so completion
/// order is unconstrained and a slow or failing task never delays the
/// tasks queued behind it beyond the configured spacing.
///
/// Each queue is an independent instance; dropping every handle ends the
/// drain task. Must be created from within a Tokio runtime.
///
/// # Example
///
/// ```rust,ignore
/// let queue = RequestQueue::new(QueueConfig::default());
/// let payload = queue
///     .enqueue("search_movies", move || async move { fetch().await })
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct RequestQueue {
    tx: mpsc::UnboundedSender<QueuedRequest>,
}

impl RequestQueue {
    /// Create a queue and spawn its drain task.
    pub fn new(config: QueueConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(drain(rx, config));
        Self { tx }
    }

    /// Admit a task to the queue and return a future for its outcome.
    ///
    /// Admission happens at the call itself, not at the first poll of the
    /// returned future, so program order is queue order. The returned
    /// future settles once the task has been dispatched and has run to
    /// completion.
    pub fn enqueue<F, Fut, T>(
        &self,
        label: &'static str,
        task: F,
    ) -> impl Future<Output = CatalogResult<T>> + Send + 'static
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = CatalogResult<T>> + Send + 'static,
        T: Send + 'static,
    {
        let (done, outcome) = oneshot::channel();
        let job: BoxFuture<'static, ()> = Box::pin(async move {
            let result = task().await;
            // The caller may have stopped waiting; that is its business.
            let _ = done.send(result);
        });
        let admitted = self
            .tx
            .send(QueuedRequest {
                label,
                job,
                enqueued_at: Instant::now(),
            })
            .is_ok();

        async move {
            if !admitted {
                return Err(ClassifiedError::new(
                    ErrorKind::UnknownError,
                    "request queue is no longer accepting work",
                ));
            }
            match outcome.await {
                Ok(result) => result,
                Err(_) => Err(ClassifiedError::new(
                    ErrorKind::UnknownError,
                    "queued request was dropped before completing",
                )),
            }
        }
    }
}

/// The drain loop: sole owner of the pacing state.
async fn drain(mut rx: mpsc::UnboundedReceiver<QueuedRequest>, config: QueueConfig) {
    let min_gap = config.min_gap();
    let mut last_dispatch: Option<Instant> = None;

    // Waiting on the empty channel is the idle state; the loop ends once
    // every queue handle has been dropped.
    while let Some(request) = rx.recv().await {
        if let Some(last) = last_dispatch {
            let elapsed = last.elapsed();
            if elapsed < min_gap {
                sleep(min_gap - elapsed).await;
            }
        }
        last_dispatch = Some(Instant::now());
        debug!(
            label = request.label,
            queued_ms = request.enqueued_at.elapsed().as_millis() as u64,
            "dispatching request"
        );
        // The task's outcome travels through its own completion channel;
        // a failure or panic never reaches this loop.
        tokio::spawn(request.job);
    }
}
