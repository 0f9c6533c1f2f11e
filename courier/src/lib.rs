//! # courier - Extensible Request Dispatch
//!
//! `courier` routes outgoing requests to pluggable transport *providers*,
//! then passes each response through a pluggable *filter* before handing it
//! back. Both are chosen by ordered, first-match-wins pattern matching, with
//! a default for everything unmatched.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use courier::{Client, RequestOptions, ResponseType};
//!
//! let client = Client::new(my_transport);
//!
//! // Serve fixtures for one host, ahead of anything registered before.
//! let handle = client.providers().register(Regex::new("^https://api.test/")?, fixtures, true);
//!
//! let options = RequestOptions::new().with_response_type(ResponseType::Json);
//! let response = client.get("https://api.test/items", &options).await?;
//!
//! handle.remove();
//! ```
//!
//! ## Process-wide client
//!
//! The free functions [`request`], [`get`], [`post`], [`put`] and [`delete`]
//! go through a shared [`client()`] whose default provider is
//! [`NoTransport`] until [`set_default_provider`] installs a real one. The
//! built-in JSON filter is registered on it.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

use std::sync::LazyLock;

pub use courier_core::{
    // Errors
    BoxError,
    // Task
    CancelHandle,
    // Filters
    DynFilter,
    // Providers
    DynProvider,
    Filter,
    Filtered,
    Method,
    PassThrough,
    // Values
    Payload,
    Provider,
    Query,
    RegistryError,
    RequestError,
    RequestOptions,
    Response,
    ResponseError,
    ResponseType,
    Task,
    Verdict,
};

pub use courier_std::{
    client::{Client, ClientBuilder},
    filters::JsonFilter,
    providers::{NoTransport, NoTransportError},
    registry::{
        FilterPredicate, FilterRegistry, FilterTest, Handle, MatchRegistry, ProviderPredicate,
        ProviderRegistry, ProviderTest, Test,
    },
};

/// Timing utilities.
#[cfg(feature = "timeout")]
pub mod timing {
    pub use courier_std::timing::{
        TimeoutError, delay, delay_with, reject_after, timeout, with_timeout,
    };
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use courier_std::testing::*;
}

/// Prelude module - common imports for Courier.
///
/// # Usage
///
/// ```rust,ignore
/// use courier::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BoxError, Client, Filter, FilterTest, Filtered, Handle, Payload, Provider, ProviderTest,
        RequestError, RequestOptions, Response, ResponseType, Task, Verdict,
    };
}

static DEFAULT_CLIENT: LazyLock<Client> = LazyLock::new(|| Client::new(NoTransport));

/// The process-wide client used by the free functions.
pub fn client() -> &'static Client {
    &DEFAULT_CLIENT
}

/// Make a request through the process-wide client.
pub fn request(url: impl Into<String>, options: RequestOptions) -> Task<Response> {
    client().request(url, options)
}

/// Make a `GET` request through the process-wide client.
pub fn get(url: impl Into<String>, options: &RequestOptions) -> Task<Response> {
    client().get(url, options)
}

/// Make a `POST` request through the process-wide client.
pub fn post(url: impl Into<String>, options: &RequestOptions) -> Task<Response> {
    client().post(url, options)
}

/// Make a `PUT` request through the process-wide client.
pub fn put(url: impl Into<String>, options: &RequestOptions) -> Task<Response> {
    client().put(url, options)
}

/// Make a `DELETE` request through the process-wide client.
pub fn delete(url: impl Into<String>, options: &RequestOptions) -> Task<Response> {
    client().delete(url, options)
}

/// Replace the default provider of the process-wide client.
pub fn set_default_provider<P: Provider>(provider: P) {
    client().set_default_provider(provider);
}
