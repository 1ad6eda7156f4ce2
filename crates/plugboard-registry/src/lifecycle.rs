//! Singleton lifecycle cache
//!
//! Holds the one shared value per (descriptor, instance name) pair for
//! singleton-scoped producers. The cache stores and ejects; it never
//! disposes. Callers decide what to do with ejected values, which is what
//! lets teardown order value disposal explicitly.

use dashmap::DashMap;
use plugboard_domain::{CachedValue, TypeDescriptor};
use std::sync::Arc;

/// Cache key: a plugin type plus the producing instance's name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SingletonKey {
    descriptor: TypeDescriptor,
    instance: String,
}

impl SingletonKey {
    /// Create a key for a (descriptor, instance name) pair
    pub fn new(descriptor: TypeDescriptor, instance: impl Into<String>) -> Self {
        Self {
            descriptor,
            instance: instance.into(),
        }
    }

    /// Plugin type of the cached value
    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    /// Name of the producing instance
    pub fn instance(&self) -> &str {
        &self.instance
    }
}

/// Keyed store of singleton-scoped values
pub struct LifecycleCache {
    entries: DashMap<SingletonKey, Arc<dyn CachedValue>>,
}

impl LifecycleCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Return the cached value for the pair, building and caching on miss
    ///
    /// The builder runs outside the map lock: under a racing first fetch it
    /// may run more than once, but the first inserted value wins and every
    /// caller observes that one value. Losing builds are discarded without
    /// entering the cache, so teardown never sees them.
    pub fn fetch_or_build(
        &self,
        descriptor: &TypeDescriptor,
        instance: &str,
        build: impl FnOnce() -> Arc<dyn CachedValue>,
    ) -> Arc<dyn CachedValue> {
        let key = SingletonKey::new(descriptor.clone(), instance);
        if let Some(existing) = self.entries.get(&key) {
            return existing.clone();
        }
        let built = build();
        self.entries.entry(key).or_insert(built).clone()
    }

    /// Cached value for the pair, if any
    pub fn get(&self, descriptor: &TypeDescriptor, instance: &str) -> Option<Arc<dyn CachedValue>> {
        let key = SingletonKey::new(descriptor.clone(), instance);
        self.entries.get(&key).map(|entry| entry.clone())
    }

    /// Remove and return the cached value for the pair, without disposing it
    pub fn eject(
        &self,
        descriptor: &TypeDescriptor,
        instance: &str,
    ) -> Option<Arc<dyn CachedValue>> {
        let key = SingletonKey::new(descriptor.clone(), instance);
        self.entries.remove(&key).map(|(_, value)| value)
    }

    /// Remove and return every cached value belonging to one plugin type
    pub fn eject_family(
        &self,
        descriptor: &TypeDescriptor,
    ) -> Vec<(String, Arc<dyn CachedValue>)> {
        let keys: Vec<SingletonKey> = self
            .entries
            .iter()
            .filter(|entry| entry.key().descriptor() == descriptor)
            .map(|entry| entry.key().clone())
            .collect();
        keys.into_iter()
            .filter_map(|key| {
                self.entries
                    .remove(&key)
                    .map(|(removed, value)| (removed.instance, value))
            })
            .collect()
    }

    /// Remove and return every cached value
    pub fn drain(&self) -> Vec<(SingletonKey, Arc<dyn CachedValue>)> {
        let keys: Vec<SingletonKey> = self.entries.iter().map(|entry| entry.key().clone()).collect();
        keys.into_iter()
            .filter_map(|key| self.entries.remove(&key))
            .collect()
    }

    /// Number of cached values
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no values
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for LifecycleCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LifecycleCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifecycleCache")
            .field("entries_count", &self.entries.len())
            .finish()
    }
}
