//! Timing utilities for composing with request tasks.
//!
//! **Note**: This module requires the `tokio` runtime (feature `timeout`).
//! The dispatcher never applies a timeout on its own; the `timeout` request
//! option is passed through to providers, and [`with_timeout`] is available
//! for callers that want to bound a task from the outside.

use courier_core::{RequestError, Task};
use std::{future::Future, time::Duration};

/// Error returned when a future does not finish in time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("timed out after {duration:?}")]
pub struct TimeoutError {
    duration: Duration,
}

impl TimeoutError {
    /// Create a new timeout error.
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    /// Get the duration that was exceeded.
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

/// Resolve to `value` after `duration`.
pub async fn delay<T>(duration: Duration, value: T) -> T {
    tokio::time::sleep(duration).await;
    value
}

/// Run `f` after `duration` and resolve to its output.
pub async fn delay_with<F, Fut>(duration: Duration, f: F) -> Fut::Output
where
    F: FnOnce() -> Fut,
    Fut: Future,
{
    tokio::time::sleep(duration).await;
    f().await
}

/// Resolve `future`, or fail with [`TimeoutError`] once `duration` elapses.
pub async fn timeout<F: Future>(duration: Duration, future: F) -> Result<F::Output, TimeoutError> {
    tokio::time::timeout(duration, future)
        .await
        .map_err(|_| TimeoutError::new(duration))
}

/// Fail with `error` after `duration`.
///
/// Useful as the losing side of a race.
pub async fn reject_after<T, E>(duration: Duration, error: E) -> Result<T, E> {
    tokio::time::sleep(duration).await;
    Err(error)
}

/// Bound a task by `duration`.
///
/// The returned task fails with [`RequestError::Timeout`] if `task` has not
/// settled in time; `task` is dropped at that point, which cancels it.
/// Cancelling the returned task cancels `task` as well.
pub fn with_timeout<T: Send + 'static>(task: Task<T>, duration: Duration) -> Task<T> {
    Task::new(async move {
        match tokio::time::timeout(duration, task).await {
            Ok(result) => result,
            Err(_) => {
                tracing::debug!(?duration, "task timed out");
                Err(RequestError::Timeout(duration))
            }
        }
    })
}
