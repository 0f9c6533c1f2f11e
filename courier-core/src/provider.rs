//! # Transport Providers
//!
//! A provider is the pluggable piece that actually performs a request and
//! yields a [`Response`] whose `data` holds the raw, unfiltered body.
//!
//! Providers are selected per request by a provider registry. Anything that
//! can fulfil a request can be one: an HTTP client, a fixture table in tests,
//! or an in-process handler.

use crate::{error::BoxError, options::RequestOptions, response::Response};
use std::{future::Future, pin::Pin};

/// A pluggable transport that fulfils requests.
///
/// # Static vs Dynamic Dispatch
///
/// This trait uses native `async fn` for zero-cost static dispatch.
/// Registries store providers as [`DynProvider`] trait objects.
///
/// # Closures
///
/// Any `Fn(&str, &RequestOptions) -> Fut` is a provider, provided the
/// returned future does not borrow its arguments:
///
/// ```rust,ignore
/// let provider = |url: &str, _options: &RequestOptions| {
///     let url = url.to_owned();
///     async move { Ok(Response::new(url).with_status(200)) }
/// };
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a request `Provider`",
    label = "missing `Provider` implementation",
    note = "Providers must implement `send(url, options)` returning a `Response`."
)]
pub trait Provider: Send + Sync + 'static {
    /// Perform the request.
    fn send(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> impl Future<Output = Result<Response, BoxError>> + Send;
}

/// Dynamic object-safe version of [`Provider`].
pub trait DynProvider: Send + Sync + 'static {
    /// Perform the request (dynamic dispatch version).
    fn send_dyn<'a>(
        &'a self,
        url: &'a str,
        options: &'a RequestOptions,
    ) -> Pin<Box<dyn Future<Output = Result<Response, BoxError>> + Send + 'a>>;
}

// Blanket implementation: Any type implementing Provider implements DynProvider automatically.
impl<T: Provider> DynProvider for T {
    fn send_dyn<'a>(
        &'a self,
        url: &'a str,
        options: &'a RequestOptions,
    ) -> Pin<Box<dyn Future<Output = Result<Response, BoxError>> + Send + 'a>> {
        Box::pin(self.send(url, options))
    }
}

// Blanket impl for closures
impl<F, Fut> Provider for F
where
    F: Fn(&str, &RequestOptions) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response, BoxError>> + Send,
{
    fn send(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> impl Future<Output = Result<Response, BoxError>> + Send {
        (self)(url, options)
    }
}
