//! # courier-core
//!
//! Core types and traits for the Courier request dispatch pipeline.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! transports and filters that don't need the full `courier-std`
//! implementation.
//!
//! # Pipeline
//!
//! A request travels through two pluggable stages:
//!
//! ## Stage 1: Transport ([`Provider`])
//!
//! A provider performs the request and yields a [`Response`] holding the raw
//! body. Which provider runs is decided by ordered pattern matching on the
//! URL and [`RequestOptions`].
//!
//! ## Stage 2: Post-processing ([`Filter`])
//!
//! A filter rewrites the response body before the caller sees it. Filters are
//! selected the same way, against the response, URL and options.
//!
//! Both stages are asynchronous, and the whole request is a cancellable
//! [`Task`].
//!
//! # Error Types
//!
//! - [`RequestError`] - How a request fails
//! - [`RegistryError`] - Resolution errors
//! - [`ResponseError`] - Transport-level failures that carry the response

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod error;
mod filter;
mod options;
mod payload;
mod provider;
mod response;
mod task;
mod verdict;

// Re-exports
pub use error::{BoxError, RegistryError, RequestError, ResponseError};
pub use filter::{DynFilter, Filter, Filtered, PassThrough};
pub use http::Method;
pub use options::{Query, RequestOptions, ResponseType};
pub use payload::Payload;
pub use provider::{DynProvider, Provider};
pub use response::Response;
pub use task::{CancelHandle, Task};
pub use verdict::Verdict;
