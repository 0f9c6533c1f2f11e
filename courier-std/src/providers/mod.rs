//! Built-in providers.

use courier_core::{BoxError, Provider, RequestOptions, Response};
use thiserror::Error;

/// Error returned by [`NoTransport`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no transport provider is configured for {url}")]
pub struct NoTransportError {
    /// The URL that was requested.
    pub url: String,
}

/// A provider that rejects every request.
///
/// This is the default provider of the process-wide client until a real
/// transport is installed with `set_default_provider`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTransport;

impl Provider for NoTransport {
    async fn send(&self, url: &str, _options: &RequestOptions) -> Result<Response, BoxError> {
        Err(Box::new(NoTransportError {
            url: url.to_owned(),
        }))
    }
}
