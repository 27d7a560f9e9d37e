//! Dependency retention sets.

use slotmap::{DefaultKey, SlotMap};
use std::any::Any;
use std::sync::Arc;

/// Identifies an entry of a [`Retention`] set.
pub type RetentionKey = DefaultKey;

/// Host objects a wrapper keeps reachable because its native value may point into their memory.
///
/// Entries are only ever added.
/// Nothing in the set is released by the wrapper; entries are dropped together with the set, after the native value has been released.
#[derive(Default)]
pub struct Retention {
    entries: SlotMap<DefaultKey, Arc<dyn Any + Send + Sync>>,
}

impl Retention {
    /// Creates an empty retention set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps `dependency` alive for as long as this set exists.
    pub fn retain(&mut self, dependency: Arc<dyn Any + Send + Sync>) -> RetentionKey {
        self.entries.insert(dependency)
    }

    /// Returns `true` if `key` was returned by [`Self::retain`] on this set.
    pub fn contains(&self, key: RetentionKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the retained object for `key`, if it has type `T`.
    pub fn get<T: Any + Send + Sync>(&self, key: RetentionKey) -> Option<Arc<T>> {
        let entry = Arc::clone(self.entries.get(key)?);
        entry.downcast::<T>().ok()
    }

    /// Returns the number of retained objects.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is retained.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for Retention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Retention")
            .field("len", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retain_keeps_alive() {
        let dependency = Arc::new(String::from("buffer"));
        let weak = Arc::downgrade(&dependency);

        let mut retention = Retention::new();
        let key = retention.retain(dependency);
        assert!(retention.contains(key));
        assert_eq!(retention.len(), 1);
        assert!(weak.upgrade().is_some());

        drop(retention);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_get_downcasts() {
        let mut retention = Retention::new();
        let key = retention.retain(Arc::new(7u32));

        assert_eq!(retention.get::<u32>(key).as_deref(), Some(&7));
        assert!(retention.get::<String>(key).is_none());
    }

    #[test]
    fn test_foreign_key() {
        let mut other = Retention::new();
        other.retain(Arc::new(()));
        let key = other.retain(Arc::new(()));

        let retention = Retention::new();
        assert!(retention.is_empty());
        assert!(!retention.contains(key));
    }
}
