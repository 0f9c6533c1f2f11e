//! Ordered first-match registry with a fallback default.

use courier_core::{RegistryError, Verdict};
use std::{
    fmt,
    sync::{
        Arc, PoisonError, RwLock, Weak,
        atomic::{AtomicU64, Ordering},
    },
};

struct Entry<P: ?Sized, T> {
    id: u64,
    test: Arc<P>,
    value: T,
}

impl<P: ?Sized, T: Clone> Clone for Entry<P, T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            test: Arc::clone(&self.test),
            value: self.value.clone(),
        }
    }
}

struct State<P: ?Sized, T> {
    // Copy-on-write: `resolve` clones the `Arc` and scans without the lock.
    entries: Arc<Vec<Entry<P, T>>>,
    default: Option<T>,
}

struct Shared<P: ?Sized, T> {
    state: RwLock<State<P, T>>,
    next_id: AtomicU64,
}

/// Removes registrations by id on behalf of a [`Handle`].
trait Deregister: Send + Sync {
    fn deregister(&self, id: u64) -> bool;
}

impl<P, T> Deregister for Shared<P, T>
where
    P: ?Sized + Send + Sync,
    T: Clone + Send + Sync,
{
    fn deregister(&self, id: u64) -> bool {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let Some(index) = state.entries.iter().position(|entry| entry.id == id) else {
            return false;
        };
        Arc::make_mut(&mut state.entries).remove(index);
        true
    }
}

/// A token that removes one registration from its registry.
///
/// Removal happens the first time [`Handle::remove`] is called on the handle
/// or any of its clones. Later calls do nothing, as do calls made after the
/// registry itself has been dropped.
#[derive(Clone)]
pub struct Handle {
    id: u64,
    registry: Weak<dyn Deregister>,
}

impl Handle {
    /// Remove the registration.
    pub fn remove(&self) {
        if let Some(registry) = self.registry.upgrade()
            && registry.deregister(self.id)
        {
            tracing::debug!(id = self.id, "registration removed");
        }
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle").field("id", &self.id).finish()
    }
}

/// An ordered registry of `(test, value)` pairs with a fallback default.
///
/// `P` is the predicate type every test has been normalized to (usually a
/// `dyn Fn`), `T` the registered value.
///
/// # First-match-wins
///
/// [`MatchRegistry::resolve`] evaluates tests in sequence order and returns
/// the value of the first one that yields [`Verdict::Match`]. Registering with
/// `first = true` puts the entry ahead of everything already registered.
///
/// # Snapshots
///
/// Each scan runs over the sequence as it was when the scan started, and the
/// lock is released before any test runs. A test may register or remove
/// entries; the change is seen by the next scan only.
pub struct MatchRegistry<P: ?Sized, T> {
    shared: Arc<Shared<P, T>>,
}

impl<P, T> MatchRegistry<P, T>
where
    P: ?Sized + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    /// Create a registry whose unmatched lookups return `default`.
    pub fn new(default: T) -> Self {
        Self::with_default(Some(default))
    }

    /// Create a registry without a default.
    ///
    /// Unmatched lookups fail with [`RegistryError::NoMatch`] until
    /// [`MatchRegistry::set_default`] is called.
    pub fn empty() -> Self {
        Self::with_default(None)
    }

    fn with_default(default: Option<T>) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: RwLock::new(State {
                    entries: Arc::new(Vec::new()),
                    default,
                }),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Register `value` under `test`.
    ///
    /// With `first` set, the entry is checked before all existing entries;
    /// otherwise it is checked after them. Identical registrations are kept
    /// as independent entries.
    pub fn register(&self, test: Arc<P>, value: T, first: bool) -> Handle {
        let id = self.shared.next_id.fetch_add(1, Ordering::Relaxed);
        let entry = Entry { id, test, value };

        let mut state = self.write();
        let entries = Arc::make_mut(&mut state.entries);
        if first {
            entries.insert(0, entry);
        } else {
            entries.push(entry);
        }
        tracing::debug!(id, first, len = entries.len(), "registration added");
        drop(state);

        let shared: Arc<dyn Deregister> = self.shared.clone();
        Handle {
            id,
            registry: Arc::downgrade(&shared),
        }
    }

    /// Resolve the value for one set of call arguments.
    ///
    /// `eval` applies a test to the arguments.
    pub fn resolve(&self, eval: impl Fn(&P) -> Verdict) -> Result<T, RegistryError> {
        let (entries, default) = {
            let state = self.read();
            (Arc::clone(&state.entries), state.default.clone())
        };

        match entries.iter().find(|entry| eval(&*entry.test).is_match()) {
            Some(entry) => {
                tracing::trace!(id = entry.id, "registration matched");
                Ok(entry.value.clone())
            }
            None => default.ok_or(RegistryError::NoMatch),
        }
    }

    /// Replace the default value.
    pub fn set_default(&self, value: T) {
        self.write().default = Some(value);
    }

    /// The current default value.
    pub fn default_value(&self) -> Option<T> {
        self.read().default.clone()
    }

    /// Number of registrations, not counting the default.
    pub fn len(&self) -> usize {
        self.read().entries.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, State<P, T>> {
        self.shared
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, State<P, T>> {
        self.shared
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<P: ?Sized, T> fmt::Debug for MatchRegistry<P, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self
            .shared
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("MatchRegistry")
            .field("len", &state.entries.len())
            .field("has_default", &state.default.is_some())
            .finish()
    }
}
