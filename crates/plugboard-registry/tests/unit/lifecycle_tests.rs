//! Unit tests for the singleton lifecycle cache
//!
//! The cache stores one value per (descriptor, instance name) pair, never
//! disposes on its own, and keeps exactly one value visible under racing
//! first fetches.

use plugboard_domain::{CachedValue, Disposable, Result, TypeDescriptor};
use plugboard_registry::LifecycleCache;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

/// Cached value that counts its disposals
struct TrackedValue {
    label: String,
    disposals: AtomicUsize,
}

impl TrackedValue {
    fn new(label: &str) -> Arc<Self> {
        Arc::new(Self {
            label: label.to_string(),
            disposals: AtomicUsize::new(0),
        })
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn disposals(&self) -> usize {
        self.disposals.load(Ordering::SeqCst)
    }
}

impl CachedValue for TrackedValue {
    fn as_disposable(&self) -> Option<&dyn Disposable> {
        Some(self)
    }
}

impl Disposable for TrackedValue {
    fn dispose(&self) -> Result<()> {
        self.disposals.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[test]
fn test_fetch_or_build_caches_first_value() {
    let cache = LifecycleCache::new();
    let descriptor = TypeDescriptor::new("Connection");
    let builds = AtomicUsize::new(0);

    let first = cache.fetch_or_build(&descriptor, "default", || {
        builds.fetch_add(1, Ordering::SeqCst);
        TrackedValue::new("conn")
    });
    let second = cache.fetch_or_build(&descriptor, "default", || {
        builds.fetch_add(1, Ordering::SeqCst);
        TrackedValue::new("conn")
    });

    assert!(
        Arc::ptr_eq(&first, &second),
        "Same pair must yield the cached value"
    );
    assert_eq!(
        builds.load(Ordering::SeqCst),
        1,
        "Builder must not run on a cache hit"
    );
}

#[test]
fn test_keys_distinguish_instance_names_and_types() {
    let cache = LifecycleCache::new();
    let connection = TypeDescriptor::new("Connection");
    let pool = TypeDescriptor::new("Pool");

    let a = cache.fetch_or_build(&connection, "primary", || TrackedValue::new("a"));
    let b = cache.fetch_or_build(&connection, "replica", || TrackedValue::new("b"));
    let c = cache.fetch_or_build(&pool, "primary", || TrackedValue::new("c"));

    assert!(!Arc::ptr_eq(&a, &b), "Instance names are part of the key");
    assert!(!Arc::ptr_eq(&a, &c), "Descriptors are part of the key");
    assert_eq!(cache.len(), 3);
}

#[test]
fn test_get_returns_cached_without_building() {
    let cache = LifecycleCache::new();
    let descriptor = TypeDescriptor::new("Connection");

    assert!(cache.get(&descriptor, "default").is_none());

    let value = cache.fetch_or_build(&descriptor, "default", || TrackedValue::new("conn"));
    let fetched = cache.get(&descriptor, "default").expect("cached");
    assert!(Arc::ptr_eq(&value, &fetched));
}

#[test]
fn test_eject_removes_without_disposing() {
    let cache = LifecycleCache::new();
    let descriptor = TypeDescriptor::new("Connection");
    cache.fetch_or_build(&descriptor, "default", || TrackedValue::new("conn"));

    let ejected = cache.eject(&descriptor, "default").expect("present");
    let tracked = ejected.downcast_ref::<TrackedValue>().expect("tracked value");
    assert_eq!(tracked.disposals(), 0, "Ejection must not dispose");
    assert!(cache.is_empty());
    assert!(
        cache.eject(&descriptor, "default").is_none(),
        "Second ejection finds nothing"
    );
}

#[test]
fn test_eject_family_sweeps_only_matching_descriptor() {
    let cache = LifecycleCache::new();
    let connection = TypeDescriptor::new("Connection");
    let pool = TypeDescriptor::new("Pool");
    cache.fetch_or_build(&connection, "primary", || TrackedValue::new("primary"));
    cache.fetch_or_build(&connection, "replica", || TrackedValue::new("replica"));
    cache.fetch_or_build(&pool, "default", || TrackedValue::new("pool"));

    let mut names: Vec<String> = cache
        .eject_family(&connection)
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    names.sort();
    assert_eq!(names, vec!["primary", "replica"]);
    assert_eq!(cache.len(), 1, "Unrelated descriptors must survive");
    assert!(cache.get(&pool, "default").is_some());
}

#[test]
fn test_drain_empties_cache() {
    let cache = LifecycleCache::new();
    cache.fetch_or_build(&TypeDescriptor::new("Connection"), "default", || {
        TrackedValue::new("conn")
    });
    cache.fetch_or_build(&TypeDescriptor::new("Pool"), "default", || {
        TrackedValue::new("pool")
    });

    let drained = cache.drain();
    assert_eq!(drained.len(), 2);
    assert!(cache.is_empty());

    let mut keys: Vec<(String, String)> = drained
        .iter()
        .map(|(key, _)| (key.descriptor().to_string(), key.instance().to_string()))
        .collect();
    keys.sort();
    assert_eq!(
        keys,
        vec![
            ("Connection".to_string(), "default".to_string()),
            ("Pool".to_string(), "default".to_string()),
        ]
    );

    let mut labels: Vec<String> = drained
        .iter()
        .map(|(_, value)| {
            value
                .downcast_ref::<TrackedValue>()
                .expect("tracked value")
                .label()
                .to_string()
        })
        .collect();
    labels.sort();
    assert_eq!(labels, vec!["conn", "pool"]);
}

#[test]
fn test_concurrent_fetch_observes_single_value() {
    let cache = Arc::new(LifecycleCache::new());
    let descriptor = TypeDescriptor::new("Shared");
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = cache.clone();
            let descriptor = descriptor.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                cache.fetch_or_build(&descriptor, "default", || TrackedValue::new("racer"))
            })
        })
        .collect();

    let values: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().expect("thread panicked"))
        .collect();
    for value in &values {
        assert!(
            Arc::ptr_eq(&values[0], value),
            "Exactly one value must be visible to every caller"
        );
    }
    assert_eq!(cache.len(), 1);
}
