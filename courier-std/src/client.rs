//! # Request Dispatch
//!
//! [`Client`] ties the two registries together. For every request it:
//!
//! 1. resolves the provider for `(url, options)` at call time,
//! 2. awaits the provider,
//! 3. resolves the filter for `(response, url, options)`,
//! 4. awaits the filter,
//! 5. replaces `response.data` with the filter's output and returns the
//!    provider's response.
//!
//! Errors are never recovered or translated. A provider error skips the
//! filter entirely; either error reaches the caller unchanged inside
//! [`RequestError`].
//!
//! # Example
//!
//! ```rust,ignore
//! let client = Client::new(my_transport);
//! client.providers().register(Regex::new("^mock://")?, fixtures, true);
//!
//! let options = RequestOptions::new().with_response_type(ResponseType::Json);
//! let response = client.get("https://example.com/items", &options).await?;
//! ```

use crate::{
    filters,
    providers::NoTransport,
    registry::{FilterRegistry, ProviderRegistry},
};
use courier_core::{
    DynFilter, DynProvider, Method, Provider, RequestError, RequestOptions, Response, Task,
};
use std::sync::Arc;
use tracing::Instrument;

/// Dispatches requests through a provider registry and a filter registry.
///
/// Cloning a client is cheap; clones share both registries.
#[derive(Clone, Debug)]
pub struct Client {
    providers: Arc<ProviderRegistry>,
    filters: Arc<FilterRegistry>,
}

impl Client {
    /// Create a client that falls back to `default_provider`, with the
    /// built-in filters registered.
    pub fn new<P: Provider>(default_provider: P) -> Self {
        Self::builder().default_provider(default_provider).build()
    }

    /// Start configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create a client over existing registries.
    pub fn from_registries(providers: Arc<ProviderRegistry>, filters: Arc<FilterRegistry>) -> Self {
        Self { providers, filters }
    }

    /// The provider registry.
    pub fn providers(&self) -> &ProviderRegistry {
        &self.providers
    }

    /// The filter registry.
    pub fn filters(&self) -> &FilterRegistry {
        &self.filters
    }

    /// Replace the provider used when no registered provider matches.
    pub fn set_default_provider<P: Provider>(&self, provider: P) {
        self.providers.set_default_provider(provider);
    }

    /// Make a request.
    ///
    /// The returned task settles with the provider's response, its `data`
    /// replaced by the filter's output.
    pub fn request(&self, url: impl Into<String>, options: RequestOptions) -> Task<Response> {
        let url = url.into();
        let span = tracing::debug_span!(
            "courier.request",
            %url,
            method = options.method.as_ref().map_or("GET", Method::as_str),
        );

        let provider = match self.providers.resolve(&url, &options) {
            Ok(provider) => provider,
            Err(err) => {
                tracing::warn!(parent: &span, error = %err, "no provider for request");
                return Task::failed(err.into());
            }
        };

        let filters = Arc::clone(&self.filters);
        Task::new(dispatch(provider, filters, url, options).instrument(span))
    }

    /// Make a `GET` request.
    pub fn get(&self, url: impl Into<String>, options: &RequestOptions) -> Task<Response> {
        self.request(url, options.derive(Method::GET))
    }

    /// Make a `POST` request.
    pub fn post(&self, url: impl Into<String>, options: &RequestOptions) -> Task<Response> {
        self.request(url, options.derive(Method::POST))
    }

    /// Make a `PUT` request.
    pub fn put(&self, url: impl Into<String>, options: &RequestOptions) -> Task<Response> {
        self.request(url, options.derive(Method::PUT))
    }

    /// Make a `DELETE` request.
    pub fn delete(&self, url: impl Into<String>, options: &RequestOptions) -> Task<Response> {
        self.request(url, options.derive(Method::DELETE))
    }
}

async fn dispatch(
    provider: Arc<dyn DynProvider>,
    filters: Arc<FilterRegistry>,
    url: String,
    options: RequestOptions,
) -> Result<Response, RequestError> {
    tracing::debug!("sending request");
    let mut response = provider.send_dyn(&url, &options).await.map_err(|err| {
        tracing::debug!(error = %err, "provider failed");
        RequestError::Provider(err)
    })?;

    let filter: Arc<dyn DynFilter> = filters.resolve(&response, &url, &options)?;
    let filtered = filter
        .filter_dyn(&response, &url, &options)
        .await
        .map_err(|err| {
            tracing::debug!(error = %err, "filter failed");
            RequestError::Filter(err)
        })?;

    response.data = filtered.data;
    tracing::debug!(status = response.status_code, "request settled");
    Ok(response)
}

/// Configures a [`Client`].
///
/// # Example
///
/// ```rust,ignore
/// let client = Client::builder()
///     .default_provider(transport)
///     .builtin_filters(false)
///     .build();
/// ```
pub struct ClientBuilder {
    default_provider: Option<Arc<dyn DynProvider>>,
    providers: Option<Arc<ProviderRegistry>>,
    filters: Option<Arc<FilterRegistry>>,
    builtin_filters: bool,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            default_provider: None,
            providers: None,
            filters: None,
            builtin_filters: true,
        }
    }
}

impl ClientBuilder {
    /// Set the fallback provider.
    ///
    /// Without one, requests nothing matches are rejected by [`NoTransport`].
    /// When combined with [`ClientBuilder::providers`], this replaces the
    /// registry's default.
    pub fn default_provider<P: Provider>(mut self, provider: P) -> Self {
        self.default_provider = Some(Arc::new(provider));
        self
    }

    /// Use an existing provider registry.
    pub fn providers(mut self, providers: Arc<ProviderRegistry>) -> Self {
        self.providers = Some(providers);
        self
    }

    /// Use an existing filter registry. Built-in filters are not added to it.
    pub fn filters(mut self, filters: Arc<FilterRegistry>) -> Self {
        self.filters = Some(filters);
        self
    }

    /// Whether a new filter registry gets the built-in filters. Defaults to `true`.
    pub fn builtin_filters(mut self, enabled: bool) -> Self {
        self.builtin_filters = enabled;
        self
    }

    /// Build the client.
    pub fn build(self) -> Client {
        let providers = match (self.providers, self.default_provider) {
            (Some(providers), Some(default)) => {
                providers.set_default_shared(default);
                providers
            }
            (Some(providers), None) => providers,
            (None, default) => {
                let registry = ProviderRegistry::new(NoTransport);
                if let Some(default) = default {
                    registry.set_default_shared(default);
                }
                Arc::new(registry)
            }
        };

        let filters = self.filters.unwrap_or_else(|| {
            let registry = FilterRegistry::default();
            if self.builtin_filters {
                filters::register_builtins(&registry);
            }
            Arc::new(registry)
        });

        Client { providers, filters }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_core::{BoxError, Payload, ResponseType};

    fn echo_method(
        url: &str,
        options: &RequestOptions,
    ) -> impl Future<Output = Result<Response, BoxError>> + Send + use<> {
        let method = options.method.clone().unwrap_or(Method::GET);
        let response = Response::new(url)
            .with_status(200)
            .with_data(method.as_str())
            .with_request_options(options.clone());
        async move { Ok(response) }
    }

    #[tokio::test]
    async fn test_verbs_set_method() {
        let client = Client::new(echo_method);
        let options = RequestOptions::new();

        for (task, expected) in [
            (client.get("u", &options), "GET"),
            (client.post("u", &options), "POST"),
            (client.put("u", &options), "PUT"),
            (client.delete("u", &options), "DELETE"),
        ] {
            let response = task.await.unwrap();
            assert_eq!(response.data, Some(Payload::from(expected)));
        }
        assert!(options.method.is_none());
    }

    #[tokio::test]
    async fn test_builder_without_builtins_skips_json() {
        let client = Client::builder()
            .default_provider(|url: &str, _: &RequestOptions| {
                let response = Response::new(url).with_data("[1]");
                async move { Ok::<_, BoxError>(response) }
            })
            .builtin_filters(false)
            .build();

        let options = RequestOptions::new().with_response_type(ResponseType::Json);
        let response = client.request("u", options).await.unwrap();
        assert_eq!(response.data, Some(Payload::from("[1]")));
        assert!(client.filters().is_empty());
    }

    #[tokio::test]
    async fn test_default_client_has_no_transport() {
        let client = Client::builder().build();
        let err = client.request("u", RequestOptions::new()).await.unwrap_err();
        assert!(
            err.downcast_ref::<crate::providers::NoTransportError>()
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_shared_registries() {
        let providers = Arc::new(ProviderRegistry::empty());
        let filters = Arc::new(FilterRegistry::default());
        let client = Client::from_registries(providers.clone(), filters);

        let err = client.request("u", RequestOptions::new()).await.unwrap_err();
        assert!(matches!(err, RequestError::Registry(_)));

        providers.set_default_provider(echo_method);
        assert!(client.request("u", RequestOptions::new()).await.is_ok());
    }
}
