//! Negative-lookup memoization
//!
//! Presence checks that fall through the registry and every
//! presence-eligible policy are memoized so repeated probes for the same
//! unresolvable descriptor skip the policy chain entirely. The memo must be
//! cleared whenever registrations or policies change, since either can turn
//! a past negative into a positive.

use dashmap::DashSet;
use plugboard_domain::TypeDescriptor;

/// Memo of descriptors known to be unresolvable on this node
#[derive(Debug, Default)]
pub struct MissingTypeMemo {
    misses: DashSet<TypeDescriptor>,
}

impl MissingTypeMemo {
    /// Create an empty memo
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a descriptor as unresolvable
    pub fn record(&self, descriptor: TypeDescriptor) {
        self.misses.insert(descriptor);
    }

    /// Whether a descriptor was memoized as unresolvable
    pub fn contains(&self, descriptor: &TypeDescriptor) -> bool {
        self.misses.contains(descriptor)
    }

    /// Forget every memoized negative
    pub fn clear(&self) {
        self.misses.clear();
    }

    /// Number of memoized negatives
    pub fn len(&self) -> usize {
        self.misses.len()
    }

    /// Whether no negatives are memoized
    pub fn is_empty(&self) -> bool {
        self.misses.is_empty()
    }
}
