//! Registry of transport providers.

use super::{
    matcher::{Handle, MatchRegistry},
    test::{Normalized, Test},
};
use courier_core::{DynProvider, Provider, RegistryError, RequestOptions, Verdict};
use std::{fmt, sync::Arc};

/// The predicate every provider test is normalized to.
pub type ProviderPredicate = dyn Fn(&str, &RequestOptions) -> Verdict + Send + Sync;

/// A provider registration test.
pub type ProviderTest = Test<ProviderPredicate>;

impl Test<ProviderPredicate> {
    /// A test over the request URL and options.
    ///
    /// The closure may return `bool`, `Option<bool>` or [`Verdict`].
    pub fn predicate<F, V>(test: F) -> Self
    where
        F: Fn(&str, &RequestOptions) -> V + Send + Sync + 'static,
        V: Into<Verdict>,
    {
        Test::Predicate(Arc::new(move |url: &str, options: &RequestOptions| {
            test(url, options).into()
        }))
    }

    fn into_provider_predicate(self) -> Arc<ProviderPredicate> {
        match self.normalize() {
            Normalized::Url(check) => {
                Arc::new(move |url: &str, _options: &RequestOptions| Verdict::from(check(url)))
            }
            Normalized::Predicate(predicate) => predicate,
        }
    }
}

/// Selects the provider that fulfils a request.
///
/// Providers are matched against the URL and options in registration order.
/// Requests nothing matches go to the default provider, which can be swapped
/// at runtime with [`ProviderRegistry::set_default_provider`].
pub struct ProviderRegistry {
    inner: MatchRegistry<ProviderPredicate, Arc<dyn DynProvider>>,
}

impl ProviderRegistry {
    /// Create a registry that falls back to `default`.
    pub fn new<P: Provider>(default: P) -> Self {
        let default: Arc<dyn DynProvider> = Arc::new(default);
        Self {
            inner: MatchRegistry::new(default),
        }
    }

    /// Create a registry without a default provider.
    ///
    /// Unmatched requests fail with [`RegistryError::NoMatch`].
    pub fn empty() -> Self {
        Self {
            inner: MatchRegistry::empty(),
        }
    }

    /// Register a provider.
    ///
    /// `test` may be a URL (`&str`/`String`), a [`regex::Regex`], or a
    /// [`ProviderTest::predicate`]. With `first` set the provider is checked
    /// before every provider registered so far.
    pub fn register<P: Provider>(
        &self,
        test: impl Into<ProviderTest>,
        provider: P,
        first: bool,
    ) -> Handle {
        self.register_shared(test, Arc::new(provider), first)
    }

    /// Register a provider that is already shared.
    pub fn register_shared(
        &self,
        test: impl Into<ProviderTest>,
        provider: Arc<dyn DynProvider>,
        first: bool,
    ) -> Handle {
        let test = test.into();
        tracing::debug!(?test, first, "registering provider");
        self.inner
            .register(test.into_provider_predicate(), provider, first)
    }

    /// Find the provider for a request.
    pub fn resolve(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> Result<Arc<dyn DynProvider>, RegistryError> {
        self.inner.resolve(|test| test(url, options))
    }

    /// Replace the default provider.
    pub fn set_default_provider<P: Provider>(&self, provider: P) {
        self.set_default_shared(Arc::new(provider));
    }

    /// Replace the default provider with one that is already shared.
    pub fn set_default_shared(&self, provider: Arc<dyn DynProvider>) {
        tracing::debug!("default provider replaced");
        self.inner.set_default(provider);
    }

    /// Number of registered providers, not counting the default.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if no provider is registered.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ProviderRegistry").field(&self.inner).finish()
    }
}
