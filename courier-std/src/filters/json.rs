//! JSON response parsing.

use crate::registry::FilterTest;
use courier_core::{BoxError, Filter, Filtered, Payload, RequestOptions, Response};

/// Parses textual or binary bodies as JSON.
///
/// Registered by [`FilterRegistry::with_builtins`] under [`JsonFilter::test`],
/// so it runs for requests made with `ResponseType::Json` whose response
/// carries a non-empty text or byte body. Parse failures become the
/// request's error.
///
/// [`FilterRegistry::with_builtins`]: crate::registry::FilterRegistry::with_builtins
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFilter;

impl JsonFilter {
    /// The registration test for this filter.
    pub fn test() -> FilterTest {
        FilterTest::predicate(Self::applies)
    }

    /// Returns `true` if the filter should run for this response.
    pub fn applies(response: &Response, _url: &str, options: &RequestOptions) -> bool {
        options.wants_json()
            && response
                .data
                .as_ref()
                .is_some_and(|data| data.as_bytes().is_some() && !data.is_empty())
    }
}

impl Filter for JsonFilter {
    async fn filter(
        &self,
        response: &Response,
        _url: &str,
        _options: &RequestOptions,
    ) -> Result<Filtered, BoxError> {
        let Some(bytes) = response.data.as_ref().and_then(Payload::as_bytes) else {
            return Ok(Filtered::unchanged(response));
        };
        let value: serde_json::Value = serde_json::from_slice(bytes)?;
        Ok(Payload::Json(value).into())
    }
}
