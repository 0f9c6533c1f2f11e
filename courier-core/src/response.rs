//! The response produced by a provider and refined by filters.

use crate::{options::RequestOptions, payload::Payload};
use http::{HeaderMap, HeaderValue, header::HeaderName};
use serde::de::DeserializeOwned;
use std::{any::Any, fmt, sync::Arc};

/// The result of a request.
///
/// Providers fill every field. After the filter runs, the dispatcher replaces
/// only `data`; status, headers and url keep the values the provider gave.
#[derive(Clone, Default)]
pub struct Response {
    /// Body, as returned by the provider and then rewritten by the filter.
    pub data: Option<Payload>,
    /// Status code, when the transport has one.
    pub status_code: Option<u16>,
    /// Status text, when the transport has one.
    pub status_text: Option<String>,
    /// The URL that was requested.
    pub url: String,
    /// The options the request was made with.
    pub request_options: RequestOptions,
    /// Response headers.
    pub headers: HeaderMap,
    /// Transport-specific response object.
    pub native: Option<Arc<dyn Any + Send + Sync>>,
}

impl Response {
    /// Create an empty response for `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Set the status code.
    pub fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    /// Set the status text.
    pub fn with_status_text(mut self, status_text: impl Into<String>) -> Self {
        self.status_text = Some(status_text.into());
        self
    }

    /// Set the body.
    pub fn with_data(mut self, data: impl Into<Payload>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Record the options the request was made with.
    pub fn with_request_options(mut self, options: RequestOptions) -> Self {
        self.request_options = options;
        self
    }

    /// Add a header. Invalid names or values are skipped.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            self.headers.append(name, value);
        }
        self
    }

    /// Attach the transport's own response object.
    pub fn with_native<N: Any + Send + Sync>(mut self, native: N) -> Self {
        self.native = Some(Arc::new(native));
        self
    }

    /// Look up a header by name, ignoring case.
    ///
    /// Returns `None` when the header is absent or not valid visible ASCII.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// Downcast the native response object.
    pub fn native<N: Any>(&self) -> Option<&N> {
        self.native.as_deref()?.downcast_ref::<N>()
    }

    /// Returns `true` for a 2xx status.
    pub fn is_success(&self) -> bool {
        self.status_code.is_some_and(|code| (200..300).contains(&code))
    }

    /// Deserialize the body into `T`.
    ///
    /// Returns `Ok(None)` when there is no body.
    pub fn json<T: DeserializeOwned>(&self) -> Result<Option<T>, serde_json::Error> {
        self.data.as_ref().map(Payload::deserialize).transpose()
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("data", &self.data)
            .field("status_code", &self.status_code)
            .field("status_text", &self.status_text)
            .field("url", &self.url)
            .field("request_options", &self.request_options)
            .field("headers", &self.headers)
            .field("native", &self.native.is_some())
            .finish()
    }
}
