use std::fmt::Debug;
use tracing::debug;

/// Tracks which fetch a screen is currently waiting for.
///
/// A screen calls `begin` with the key of the data it asks for (for the seat
/// map, the trip id), awaits the fetch without holding any session borrow,
/// then passes the result through `resolve`. Results whose key is no longer
/// active are dropped, so a fetch that loses the race against navigation never
/// lands in the session.
#[derive(Debug, Clone)]
pub struct RequestGuard<K> {
    active: Option<K>,
}

impl<K: PartialEq + Clone + Debug> RequestGuard<K> {
    pub fn new() -> Self {
        Self { active: None }
    }

    /// Make `key` the only request allowed to commit. Replaces any earlier one.
    pub fn begin(&mut self, key: K) -> K {
        if let Some(previous) = self.active.as_ref().filter(|p| **p != key) {
            debug!("Request {:?} superseded by {:?}", previous, key);
        }
        self.active = Some(key.clone());
        key
    }

    /// The screen was left; nothing in flight may commit
    pub fn cancel(&mut self) {
        self.active = None;
    }

    pub fn active(&self) -> Option<&K> {
        self.active.as_ref()
    }

    pub fn accepts(&self, key: &K) -> bool {
        self.active.as_ref() == Some(key)
    }

    /// Hand back `value` if `key` is still active, otherwise drop it
    pub fn resolve<T>(&self, key: &K, value: T) -> Option<T> {
        if self.accepts(key) {
            Some(value)
        } else {
            debug!("Discarding stale result for {:?} (active: {:?})", key, self.active);
            None
        }
    }
}

impl<K: PartialEq + Clone + Debug> Default for RequestGuard<K> {
    fn default() -> Self {
        Self::new()
    }
}
