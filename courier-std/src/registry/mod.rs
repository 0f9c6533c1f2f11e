//! Ordered registries for providers and filters.
//!
//! Both registries are thin specializations of [`MatchRegistry`]: they turn
//! URL strings, regular expressions and predicates into one predicate shape
//! at registration time and delegate ordering, defaults and removal to it.

pub mod filter;
pub mod matcher;
pub mod provider;

pub use filter::{FilterPredicate, FilterRegistry, FilterTest};
pub use matcher::{Handle, MatchRegistry};
pub use provider::{ProviderPredicate, ProviderRegistry, ProviderTest};
pub use test::Test;
