//! # courier-std
//!
//! Standard implementations for the Courier request dispatch pipeline.
//!
//! This crate provides:
//! - **Registries**: [`MatchRegistry`], [`ProviderRegistry`], [`FilterRegistry`]
//! - **Dispatch**: [`Client`] and its [`ClientBuilder`]
//! - **Built-in filters**: [`JsonFilter`]
//! - **Built-in providers**: [`NoTransport`]
//! - **Timing utilities**: [`timing`] (feature `timeout`)
//! - **Testing utilities**: [`testing`]
//!
//! [`MatchRegistry`]: registry::MatchRegistry
//! [`ProviderRegistry`]: registry::ProviderRegistry
//! [`FilterRegistry`]: registry::FilterRegistry
//! [`Client`]: client::Client
//! [`ClientBuilder`]: client::ClientBuilder
//! [`JsonFilter`]: filters::JsonFilter
//! [`NoTransport`]: providers::NoTransport

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use courier_core;

// Modules
pub mod client;
pub mod filters;
pub mod providers;
pub mod registry;
pub mod testing;
#[cfg(feature = "timeout")]
pub mod timing;
