//! # Response Filters
//!
//! A filter post-processes a response before it reaches the caller. One
//! filter is selected per response by a filter registry; its output replaces
//! the response's `data` and nothing else.

use crate::{
    error::BoxError, options::RequestOptions, payload::Payload, response::Response,
};
use std::{future::Future, pin::Pin};

/// What a filter hands back to the dispatcher.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filtered {
    /// The body the caller will see.
    pub data: Option<Payload>,
}

impl Filtered {
    /// Wrap a body.
    pub fn new(data: Option<Payload>) -> Self {
        Self { data }
    }

    /// Keep the response's current body.
    pub fn unchanged(response: &Response) -> Self {
        Self::new(response.data.clone())
    }
}

impl From<Payload> for Filtered {
    fn from(data: Payload) -> Self {
        Self::new(Some(data))
    }
}

/// Post-processes a response.
///
/// Filters may finish immediately or await other work; either way the
/// dispatcher awaits the returned future before delivering the response.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a response `Filter`",
    label = "missing `Filter` implementation",
    note = "Filters must implement `filter(response, url, options)` returning `Filtered`."
)]
pub trait Filter: Send + Sync + 'static {
    /// Transform the response body.
    fn filter(
        &self,
        response: &Response,
        url: &str,
        options: &RequestOptions,
    ) -> impl Future<Output = Result<Filtered, BoxError>> + Send;
}

/// Dynamic object-safe version of [`Filter`].
pub trait DynFilter: Send + Sync + 'static {
    /// Transform the response body (dynamic dispatch version).
    fn filter_dyn<'a>(
        &'a self,
        response: &'a Response,
        url: &'a str,
        options: &'a RequestOptions,
    ) -> Pin<Box<dyn Future<Output = Result<Filtered, BoxError>> + Send + 'a>>;
}

impl<T: Filter> DynFilter for T {
    fn filter_dyn<'a>(
        &'a self,
        response: &'a Response,
        url: &'a str,
        options: &'a RequestOptions,
    ) -> Pin<Box<dyn Future<Output = Result<Filtered, BoxError>> + Send + 'a>> {
        Box::pin(self.filter(response, url, options))
    }
}

impl<F, Fut> Filter for F
where
    F: Fn(&Response, &str, &RequestOptions) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Filtered, BoxError>> + Send,
{
    fn filter(
        &self,
        response: &Response,
        url: &str,
        options: &RequestOptions,
    ) -> impl Future<Output = Result<Filtered, BoxError>> + Send {
        (self)(response, url, options)
    }
}

/// The identity filter: returns the response body unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl Filter for PassThrough {
    async fn filter(
        &self,
        response: &Response,
        _url: &str,
        _options: &RequestOptions,
    ) -> Result<Filtered, BoxError> {
        Ok(Filtered::unchanged(response))
    }
}
