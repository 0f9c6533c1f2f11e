//! Built-in response filters.

pub mod json;

pub use json::JsonFilter;

use crate::registry::FilterRegistry;

/// Register every built-in filter on `registry`.
pub fn register_builtins(registry: &FilterRegistry) {
    registry.register(JsonFilter::test(), JsonFilter, false);
}
