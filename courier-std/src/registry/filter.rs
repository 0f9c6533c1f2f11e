//! Registry of response filters.

use super::{
    matcher::{Handle, MatchRegistry},
    test::{Normalized, Test},
};
use courier_core::{
    DynFilter, Filter, PassThrough, RegistryError, RequestOptions, Response, Verdict,
};
use std::{fmt, sync::Arc};

/// The predicate every filter test is normalized to.
pub type FilterPredicate = dyn Fn(&Response, &str, &RequestOptions) -> Verdict + Send + Sync;

/// A filter registration test.
pub type FilterTest = Test<FilterPredicate>;

impl Test<FilterPredicate> {
    /// A test over the response, request URL and options.
    ///
    /// The closure may return `bool`, `Option<bool>` or [`Verdict`].
    pub fn predicate<F, V>(test: F) -> Self
    where
        F: Fn(&Response, &str, &RequestOptions) -> V + Send + Sync + 'static,
        V: Into<Verdict>,
    {
        Test::Predicate(Arc::new(
            move |response: &Response, url: &str, options: &RequestOptions| {
                test(response, url, options).into()
            },
        ))
    }

    fn into_filter_predicate(self) -> Arc<FilterPredicate> {
        match self.normalize() {
            Normalized::Url(check) => Arc::new(
                move |_response: &Response, url: &str, _options: &RequestOptions| {
                    Verdict::from(check(url))
                },
            ),
            Normalized::Predicate(predicate) => predicate,
        }
    }
}

/// Selects the filter a response passes through.
///
/// Exactly one filter runs per response: the first registered filter whose
/// test matches, or the default. [`FilterRegistry::default`] falls back to
/// [`PassThrough`].
pub struct FilterRegistry {
    inner: MatchRegistry<FilterPredicate, Arc<dyn DynFilter>>,
}

impl FilterRegistry {
    /// Create a registry that falls back to `default`.
    pub fn new<F: Filter>(default: F) -> Self {
        let default: Arc<dyn DynFilter> = Arc::new(default);
        Self {
            inner: MatchRegistry::new(default),
        }
    }

    /// Create a pass-through registry with the built-in filters registered.
    pub fn with_builtins() -> Self {
        let registry = Self::default();
        crate::filters::register_builtins(&registry);
        registry
    }

    /// Register a filter.
    ///
    /// `test` may be a URL (`&str`/`String`), a [`regex::Regex`], or a
    /// [`FilterTest::predicate`]. With `first` set the filter is checked
    /// before every filter registered so far.
    pub fn register<F: Filter>(
        &self,
        test: impl Into<FilterTest>,
        filter: F,
        first: bool,
    ) -> Handle {
        self.register_shared(test, Arc::new(filter), first)
    }

    /// Register a filter that is already shared.
    pub fn register_shared(
        &self,
        test: impl Into<FilterTest>,
        filter: Arc<dyn DynFilter>,
        first: bool,
    ) -> Handle {
        let test = test.into();
        tracing::debug!(?test, first, "registering filter");
        self.inner.register(test.into_filter_predicate(), filter, first)
    }

    /// Find the filter for a response.
    pub fn resolve(
        &self,
        response: &Response,
        url: &str,
        options: &RequestOptions,
    ) -> Result<Arc<dyn DynFilter>, RegistryError> {
        self.inner.resolve(|test| test(response, url, options))
    }

    /// Number of registered filters, not counting the default.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if no filter is registered.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::new(PassThrough)
    }
}

impl fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FilterRegistry").field(&self.inner).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_core::{BoxError, Filtered, Payload};
    use regex::Regex;

    /// Replaces the body with a fixed tag.
    struct Tag(&'static str);

    impl Filter for Tag {
        async fn filter(
            &self,
            _response: &Response,
            _url: &str,
            _options: &RequestOptions,
        ) -> Result<Filtered, BoxError> {
            Ok(Payload::from(self.0).into())
        }
    }

    async fn apply(registry: &FilterRegistry, response: &Response) -> Option<Payload> {
        let options = RequestOptions::new();
        let filter = registry.resolve(response, &response.url, &options).unwrap();
        filter
            .filter_dyn(response, &response.url, &options)
            .await
            .unwrap()
            .data
    }

    #[tokio::test]
    async fn test_default_passes_through() {
        let registry = FilterRegistry::default();
        let response = Response::new("http://x/").with_data("raw");
        assert_eq!(apply(&registry, &response).await, Some(Payload::from("raw")));
    }

    #[tokio::test]
    async fn test_url_tests_and_order() {
        let registry = FilterRegistry::default();
        registry.register(Regex::new("/api/").unwrap(), Tag("api"), false);
        registry.register("http://x/api/special", Tag("special"), false);

        let special = Response::new("http://x/api/special");
        assert_eq!(apply(&registry, &special).await, Some(Payload::from("api")));

        registry.register("http://x/api/special", Tag("special"), true);
        assert_eq!(apply(&registry, &special).await, Some(Payload::from("special")));
    }

    #[tokio::test]
    async fn test_predicate_sees_response() {
        let registry = FilterRegistry::default();
        registry.register(
            FilterTest::predicate(|response: &Response, _: &str, _: &RequestOptions| {
                response.status_code == Some(500)
            }),
            Tag("error"),
            false,
        );

        let failed = Response::new("http://x/").with_status(500).with_data("raw");
        let ok = Response::new("http://x/").with_status(200).with_data("raw");
        assert_eq!(apply(&registry, &failed).await, Some(Payload::from("error")));
        assert_eq!(apply(&registry, &ok).await, Some(Payload::from("raw")));
    }

    #[tokio::test]
    async fn test_removed_filter_no_longer_applies() {
        let registry = FilterRegistry::default();
        let handle = registry.register("http://x/", Tag("tagged"), false);
        let response = Response::new("http://x/").with_data("raw");

        assert_eq!(apply(&registry, &response).await, Some(Payload::from("tagged")));
        handle.remove();
        handle.remove();
        assert_eq!(apply(&registry, &response).await, Some(Payload::from("raw")));
        assert!(registry.is_empty());
    }
}
