//! Error types for Courier.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`RequestError`] - How a dispatched request fails
//! - [`RegistryError`] - Errors from resolving a registry
//! - [`ResponseError`] - An error carrying the response that caused it
//!
//! Providers and filters report failures as a [`BoxError`]. The dispatcher
//! never translates those errors; it only records which stage produced them.

use crate::response::Response;
use std::time::Duration;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// How a dispatched request settled when it did not produce a response.
#[derive(Error, Debug)]
pub enum RequestError {
    /// The provider rejected the request. No filter was applied.
    #[error(transparent)]
    Provider(BoxError),

    /// The filter selected for the response failed.
    #[error(transparent)]
    Filter(BoxError),

    /// A provider or filter could not be resolved.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The request was cancelled before it settled.
    #[error("request was cancelled")]
    Cancelled,

    /// A timeout decorator gave up waiting on the request.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
}

impl RequestError {
    /// Returns `true` if this is a cancellation signal rather than a failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RequestError::Cancelled)
    }

    /// Returns `true` if a timeout decorator produced this error.
    pub fn is_timeout(&self) -> bool {
        matches!(self, RequestError::Timeout(_))
    }

    /// The untouched error reported by a provider or filter, if any.
    pub fn source_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            RequestError::Provider(err) | RequestError::Filter(err) => Some(err.as_ref()),
            _ => None,
        }
    }

    /// Downcast the provider or filter error to a concrete type.
    pub fn downcast_ref<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source_error()?.downcast_ref::<E>()
    }

    /// Consume the error, returning the provider or filter error.
    pub fn into_source(self) -> Result<BoxError, Self> {
        match self {
            RequestError::Provider(err) | RequestError::Filter(err) => Ok(err),
            other => Err(other),
        }
    }
}

/// Errors that can occur while resolving a registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Nothing matched and the registry has no default value.
    #[error("no registration matched and no default is set")]
    NoMatch,
}

/// An error that carries the response it was raised for.
///
/// Providers return this when a request completed at the transport level but
/// should still be treated as a failure, such as a non-2xx status.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct ResponseError {
    message: String,
    response: Box<Response>,
}

impl ResponseError {
    /// Create a new response error.
    pub fn new(message: impl Into<String>, response: Response) -> Self {
        Self {
            message: message.into(),
            response: Box::new(response),
        }
    }

    /// Create an error describing the response's status.
    pub fn status(response: Response) -> Self {
        let message = match (response.status_code, response.status_text.as_deref()) {
            (Some(code), Some(text)) => format!("request failed with status {code} {text}"),
            (Some(code), None) => format!("request failed with status {code}"),
            _ => "request failed".to_string(),
        };
        Self::new(message, response)
    }

    /// The response that caused this error.
    pub fn response(&self) -> &Response {
        &self.response
    }

    /// Consume the error, returning the response.
    pub fn into_response(self) -> Response {
        *self.response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("connection reset")]
    struct Reset;

    #[test]
    fn provider_error_is_transparent() {
        let err = RequestError::Provider(Box::new(Reset));
        assert_eq!(err.to_string(), "connection reset");
        assert!(err.downcast_ref::<Reset>().is_some());
        assert!(!err.is_cancelled());
    }

    #[test]
    fn into_source_returns_original() {
        let err = RequestError::Filter(Box::new(Reset));
        let source = err.into_source().unwrap();
        assert!(source.downcast_ref::<Reset>().is_some());

        let err = RequestError::Cancelled;
        assert!(err.into_source().unwrap_err().is_cancelled());
    }

    #[test]
    fn response_error_status_message() {
        let mut response = Response::new("http://example.com/missing");
        response.status_code = Some(404);
        response.status_text = Some("Not Found".into());

        let err = ResponseError::status(response);
        assert_eq!(err.to_string(), "request failed with status 404 Not Found");
        assert_eq!(err.response().url, "http://example.com/missing");
    }
}
