#![allow(dead_code)]

use courier::{
    BoxError, Client, Filter, Filtered, Payload, Provider, RequestOptions, Response,
};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Test Providers
// ============================================================================

/// Answers with `{"a":1}` and status 200.
pub struct JsonBodyProvider;

impl Provider for JsonBodyProvider {
    async fn send(&self, url: &str, options: &RequestOptions) -> Result<Response, BoxError> {
        Ok(Response::new(url)
            .with_status(200)
            .with_status_text("OK")
            .with_header("Content-Type", "application/json")
            .with_data(r#"{"a":1}"#)
            .with_request_options(options.clone()))
    }
}

/// Answers with its name as the body and counts calls.
pub struct NamedProvider {
    pub name: &'static str,
    pub calls: Arc<AtomicUsize>,
}

impl NamedProvider {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl Provider for NamedProvider {
    async fn send(&self, url: &str, options: &RequestOptions) -> Result<Response, BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Response::new(url)
            .with_status(200)
            .with_data(self.name)
            .with_request_options(options.clone()))
    }
}

// ============================================================================
// Test Filters
// ============================================================================

/// Records the order filters ran in by id.
pub struct OrderRecordingFilter {
    pub id: usize,
    pub order: Arc<Mutex<Vec<usize>>>,
}

impl Filter for OrderRecordingFilter {
    async fn filter(
        &self,
        response: &Response,
        _url: &str,
        _options: &RequestOptions,
    ) -> Result<Filtered, BoxError> {
        self.order.lock().unwrap().push(self.id);
        Ok(Filtered::unchanged(response))
    }
}

/// Upper-cases textual bodies after yielding once.
pub struct ShoutFilter;

impl Filter for ShoutFilter {
    async fn filter(
        &self,
        response: &Response,
        _url: &str,
        _options: &RequestOptions,
    ) -> Result<Filtered, BoxError> {
        tokio::task::yield_now().await;
        let data = response
            .data
            .as_ref()
            .and_then(Payload::as_text)
            .map(|text| Payload::Text(text.to_uppercase()));
        Ok(Filtered::new(data))
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// The body of a response as text.
pub fn body(response: &Response) -> &str {
    response
        .data
        .as_ref()
        .and_then(Payload::as_text)
        .expect("textual body")
}

/// A client whose default provider is a [`NamedProvider`] called `"default"`.
pub fn named_client() -> Client {
    Client::new(NamedProvider::new("default"))
}
