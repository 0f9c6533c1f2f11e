//! Testing utilities for Courier.
//!
//! This module provides providers and filters that make dispatch behaviour
//! observable in tests.
//!
//! # Features
//!
//! - [`StaticProvider`]: answers every request with a canned response
//! - [`FailingProvider`]: rejects every request
//! - [`PendingProvider`]: never settles, and reports when it is dropped
//! - [`RecordingFilter`]: a spy filter that records what it was called with

use courier_core::{BoxError, Filter, Filtered, Provider, RequestOptions, Response};
use std::{
    future::Future,
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicUsize, Ordering},
    },
};
use thiserror::Error;

// ============================================================================
// Static Provider
// ============================================================================

/// A provider that answers every request with the same response.
///
/// The response's `url` and `request_options` are filled in from the request.
///
/// # Example
///
/// ```rust,ignore
/// let provider = StaticProvider::new(Response::default().with_status(200).with_data("{}"));
/// let calls = provider.clone();
///
/// let client = Client::new(provider);
/// client.get("http://x/", &RequestOptions::new()).await?;
///
/// assert_eq!(calls.urls(), vec!["http://x/".to_string()]);
/// ```
#[derive(Clone)]
pub struct StaticProvider {
    response: Response,
    urls: Arc<Mutex<Vec<String>>>,
}

impl StaticProvider {
    /// Create a provider answering with `response`.
    pub fn new(response: Response) -> Self {
        Self {
            response,
            urls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A provider answering `200` with a textual body.
    pub fn text(body: impl Into<String>) -> Self {
        Self::new(Response::default().with_status(200).with_data(body.into()))
    }

    /// URLs requested so far, in order.
    pub fn urls(&self) -> Vec<String> {
        self.urls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of requests served.
    pub fn count(&self) -> usize {
        self.urls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl Provider for StaticProvider {
    async fn send(&self, url: &str, options: &RequestOptions) -> Result<Response, BoxError> {
        self.urls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url.to_owned());

        let mut response = self.response.clone();
        response.url = url.to_owned();
        response.request_options = options.clone();
        Ok(response)
    }
}

// ============================================================================
// Failing Provider
// ============================================================================

/// Error produced by [`FailingProvider`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TestError(pub String);

/// A provider that rejects every request with a [`TestError`].
#[derive(Clone)]
pub struct FailingProvider {
    message: String,
    count: Arc<AtomicUsize>,
}

impl FailingProvider {
    /// Create a provider failing with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of requests rejected.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl Provider for FailingProvider {
    async fn send(&self, _url: &str, _options: &RequestOptions) -> Result<Response, BoxError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Err(Box::new(TestError(self.message.clone())))
    }
}

// ============================================================================
// Pending Provider
// ============================================================================

/// A provider whose requests never settle.
///
/// Tracks how many requests were started and how many of their futures
/// have been dropped, which is what cancellation does to them.
#[derive(Clone, Default)]
pub struct PendingProvider {
    started: Arc<AtomicUsize>,
    dropped: Arc<AtomicUsize>,
}

struct DropCounter(Arc<AtomicUsize>);

impl Drop for DropCounter {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

impl PendingProvider {
    /// Create a new pending provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of requests that reached the provider.
    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    /// Number of request futures that have been dropped.
    pub fn dropped(&self) -> usize {
        self.dropped.load(Ordering::SeqCst)
    }
}

impl Provider for PendingProvider {
    fn send(
        &self,
        _url: &str,
        _options: &RequestOptions,
    ) -> impl Future<Output = Result<Response, BoxError>> + Send {
        let started = Arc::clone(&self.started);
        let guard = DropCounter(Arc::clone(&self.dropped));
        async move {
            let _guard = guard;
            started.fetch_add(1, Ordering::SeqCst);
            futures::future::pending::<Result<Response, BoxError>>().await
        }
    }
}

// ============================================================================
// Recording Filter
// ============================================================================

/// A spy filter that records every call and passes the body through.
///
/// # Example
///
/// ```rust,ignore
/// let spy = RecordingFilter::new();
/// client.filters().register(Regex::new(".*")?, spy.clone(), true);
///
/// // ... make requests ...
///
/// assert_eq!(spy.count(), 0);
/// ```
#[derive(Clone, Default)]
pub struct RecordingFilter {
    urls: Arc<Mutex<Vec<String>>>,
}

impl RecordingFilter {
    /// Create a new recording filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// URLs the filter was called for, in order.
    pub fn urls(&self) -> Vec<String> {
        self.urls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of times the filter ran.
    pub fn count(&self) -> usize {
        self.urls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl Filter for RecordingFilter {
    async fn filter(
        &self,
        response: &Response,
        url: &str,
        _options: &RequestOptions,
    ) -> Result<Filtered, BoxError> {
        self.urls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url.to_owned());
        Ok(Filtered::unchanged(response))
    }
}
