//! Per-request options.

use crate::payload::Payload;
use http::Method;
use std::{
    collections::BTreeMap,
    time::{Duration, SystemTime, UNIX_EPOCH},
};
use url::form_urlencoded;

/// The shape a caller expects the response body in.
///
/// Only [`ResponseType::Json`] has a built-in meaning: it enables the JSON
/// filter.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ResponseType {
    /// Plain text.
    Text,
    /// A JSON document.
    Json,
    /// Raw bytes.
    Bytes,
}

/// Query parameters for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// An already-encoded query string, without the leading `?`.
    Raw(String),
    /// Parameters in order; encoded when the URL is resolved.
    Params(Vec<(String, String)>),
}

impl Query {
    /// Encode the query without a leading `?`.
    pub fn encode(&self) -> String {
        match self {
            Query::Raw(raw) => raw.trim_start_matches('?').to_string(),
            Query::Params(params) => form_urlencoded::Serializer::new(String::new())
                .extend_pairs(params)
                .finish(),
        }
    }
}

impl From<&str> for Query {
    fn from(raw: &str) -> Self {
        Query::Raw(raw.to_owned())
    }
}

impl From<String> for Query {
    fn from(raw: String) -> Self {
        Query::Raw(raw)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Query {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Query::Params(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Options for a single request.
///
/// The dispatcher never mutates options it is handed. Verb shorthands build a
/// copy through [`RequestOptions::derive`] instead.
///
/// # Example
///
/// ```rust
/// use courier_core::{RequestOptions, ResponseType};
/// use std::time::Duration;
///
/// let options = RequestOptions::new()
///     .with_header("Accept", "application/json")
///     .with_response_type(ResponseType::Json)
///     .with_timeout(Duration::from_secs(5));
///
/// assert!(options.method.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    /// HTTP method. Providers treat `None` as `GET`.
    pub method: Option<Method>,
    /// Request headers.
    pub headers: BTreeMap<String, String>,
    /// Query parameters appended to the URL.
    pub query: Option<Query>,
    /// Pre-encoded authorization value.
    pub auth: Option<String>,
    /// User name for basic authentication.
    pub user: Option<String>,
    /// Password for basic authentication.
    pub password: Option<String>,
    /// Request body.
    pub data: Option<Payload>,
    /// Expected shape of the response body.
    pub response_type: Option<ResponseType>,
    /// Time the provider should allow before giving up.
    pub timeout: Option<Duration>,
    /// Append a unique parameter so caches are bypassed.
    pub cache_bust: bool,
}

impl RequestOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy these options with only the method replaced.
    pub fn derive(&self, method: Method) -> Self {
        Self {
            method: Some(method),
            ..self.clone()
        }
    }

    /// Set the method.
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Add a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set the query.
    pub fn with_query(mut self, query: impl Into<Query>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Set the authorization value.
    pub fn with_auth(mut self, auth: impl Into<String>) -> Self {
        self.auth = Some(auth.into());
        self
    }

    /// Set basic authentication credentials.
    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self.password = Some(password.into());
        self
    }

    /// Set the request body.
    pub fn with_data(mut self, data: impl Into<Payload>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Set the expected response type.
    pub fn with_response_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = Some(response_type);
        self
    }

    /// Set the timeout passed to the provider.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Enable or disable cache busting.
    pub fn with_cache_bust(mut self, cache_bust: bool) -> Self {
        self.cache_bust = cache_bust;
        self
    }

    /// Look up a header by name, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns `true` if the caller asked for a JSON response.
    pub fn wants_json(&self) -> bool {
        self.response_type == Some(ResponseType::Json)
    }

    /// Build the URL a provider should fetch.
    ///
    /// Appends the encoded query and, when `cache_bust` is set, a `_`
    /// parameter holding the current time in milliseconds.
    pub fn resolve_url(&self, base: &str) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis())
            .unwrap_or_default();
        self.resolve_url_at(base, now)
    }

    fn resolve_url_at(&self, base: &str, now_millis: u128) -> String {
        let mut url = base.to_string();
        let mut append = |part: &str| {
            if part.is_empty() {
                return;
            }
            url.push(if url.contains('?') { '&' } else { '?' });
            url.push_str(part);
        };

        if let Some(query) = &self.query {
            append(&query.encode());
        }
        if self.cache_bust {
            append(&format!("_={now_millis}"));
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_does_not_touch_original() {
        let original = RequestOptions::new().with_header("x", "1");
        let derived = original.derive(Method::POST);

        assert_eq!(derived.method, Some(Method::POST));
        assert_eq!(derived.header("x"), Some("1"));
        assert!(original.method.is_none());
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let options = RequestOptions::new().with_header("Content-Type", "text/plain");
        assert_eq!(options.header("content-type"), Some("text/plain"));
        assert_eq!(options.header("accept"), None);
    }

    #[test]
    fn test_query_params_are_encoded() {
        let query: Query = [("q", "a b"), ("page", "2")].into_iter().collect();
        assert_eq!(query.encode(), "q=a+b&page=2");
        assert_eq!(Query::from("?raw=1").encode(), "raw=1");
    }

    #[test]
    fn test_resolve_url() {
        let options = RequestOptions::new().with_query("a=1");
        assert_eq!(options.resolve_url_at("http://x/", 0), "http://x/?a=1");
        assert_eq!(options.resolve_url_at("http://x/?z=0", 0), "http://x/?z=0&a=1");

        let options = options.with_cache_bust(true);
        assert_eq!(options.resolve_url_at("http://x/", 42), "http://x/?a=1&_=42");

        let plain = RequestOptions::new();
        assert_eq!(plain.resolve_url("http://x/"), "http://x/");
    }
}
