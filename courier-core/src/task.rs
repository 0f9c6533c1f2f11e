//! Cancellable request tasks.
//!
//! A [`Task`] is what a dispatcher hands back for every request: a future that
//! settles with the response or a [`RequestError`], and that can be cancelled
//! from the outside.
//!
//! Cancelling stops the task from polling its inner future again. The inner
//! future (the provider call and any pending filter) is dropped together with
//! the task, so no filter runs after cancellation.

use crate::error::RequestError;
use futures::future::{AbortHandle, Abortable, Aborted, BoxFuture};
use std::{
    fmt,
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

/// A pending request that can be awaited or cancelled.
#[must_use = "tasks do nothing unless awaited"]
pub struct Task<T> {
    inner: Abortable<BoxFuture<'static, Result<T, RequestError>>>,
    handle: AbortHandle,
}

impl<T> Task<T> {
    /// Wrap a future into a cancellable task.
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = Result<T, RequestError>> + Send + 'static,
    {
        let (handle, registration) = AbortHandle::new_pair();
        let future: BoxFuture<'static, Result<T, RequestError>> = Box::pin(future);
        Self {
            inner: Abortable::new(future, registration),
            handle,
        }
    }

    /// A task that has already failed.
    pub fn failed(error: RequestError) -> Self
    where
        T: Send + 'static,
    {
        Self::new(std::future::ready(Err(error)))
    }

    /// Cancel the task.
    ///
    /// A task cancelled before it settles resolves to
    /// [`RequestError::Cancelled`]. Cancelling twice is a no-op.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Returns `true` once [`Task::cancel`] has been called on this task or
    /// one of its [`CancelHandle`]s.
    pub fn is_cancelled(&self) -> bool {
        self.handle.is_aborted()
    }

    /// A handle that cancels this task from elsewhere.
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle(self.handle.clone())
    }
}

impl<T> Future for Task<T> {
    type Output = Result<T, RequestError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.get_mut().inner).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(Aborted)) => Poll::Ready(Err(RequestError::Cancelled)),
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<T> fmt::Debug for Task<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("cancelled", &self.is_cancelled())
            .finish_non_exhaustive()
    }
}

/// Cancels a [`Task`] without owning it.
#[derive(Debug, Clone)]
pub struct CancelHandle(AbortHandle);

impl CancelHandle {
    /// Cancel the associated task.
    pub fn cancel(&self) {
        self.0.abort();
    }

    /// Returns `true` once the associated task has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.0.is_aborted()
    }
}
