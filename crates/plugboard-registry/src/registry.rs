//! Descriptor-to-family map
//!
//! The concurrent heart of a registry node. `get` is the only creating
//! read: a miss runs the policy chain and falls back to a bare family, so
//! resolution code downstream never handles absence. `has`, `inspect` and
//! the snapshots never create anything, which is what presence checks and
//! policies build on.

use crate::family::PluginFamily;
use crate::node::RegistryNode;
use crate::policies::FamilyPolicyChain;
use dashmap::DashMap;
use plugboard_domain::TypeDescriptor;
use std::sync::{Arc, Weak};
use tracing::debug;

/// Concurrent map of plugin types to their families
pub struct FamilyRegistry {
    families: DashMap<TypeDescriptor, Arc<PluginFamily>>,
    policies: FamilyPolicyChain,
    owner: Weak<RegistryNode>,
}

impl FamilyRegistry {
    /// Create an empty registry owned by a node
    pub fn new(owner: Weak<RegistryNode>) -> Self {
        Self {
            families: DashMap::new(),
            policies: FamilyPolicyChain::new(),
            owner,
        }
    }

    /// Return the family for a descriptor, creating it on first access
    ///
    /// On a miss the policy chain runs in priority order; when no policy
    /// produces a family a bare default family is created, so this method
    /// always succeeds. The chain runs outside any map lock: racing first
    /// accesses may each run it, but only the first published family is
    /// ever observed and the losers are discarded. Policies are therefore
    /// free to read this registry re-entrantly.
    pub fn get(&self, descriptor: &TypeDescriptor) -> Arc<PluginFamily> {
        if let Some(existing) = self.families.get(descriptor) {
            return existing.clone();
        }
        let candidate = match self.policies.build(descriptor, self) {
            Some(synthesized) => synthesized,
            None => {
                debug!(descriptor = %descriptor, "Creating bare plugin family");
                PluginFamily::new(descriptor.clone())
            }
        };
        candidate.set_owner(self.owner.clone());
        self.families
            .entry(descriptor.clone())
            .or_insert_with(|| Arc::new(candidate))
            .clone()
    }

    /// Store a family under its own descriptor, replacing any existing one
    pub fn set(&self, family: PluginFamily) {
        family.set_owner(self.owner.clone());
        let descriptor = family.descriptor().clone();
        self.families.insert(descriptor, Arc::new(family));
    }

    /// Whether a family is currently stored for the descriptor
    ///
    /// Pure lookup; never consults policies.
    pub fn has(&self, descriptor: &TypeDescriptor) -> bool {
        self.families.contains_key(descriptor)
    }

    /// Detach and return the family stored for the descriptor
    pub fn remove(&self, descriptor: &TypeDescriptor) -> Option<Arc<PluginFamily>> {
        self.families.remove(descriptor).map(|(_, family)| family)
    }

    /// Stored family for the descriptor, without creating one
    pub fn inspect(&self, descriptor: &TypeDescriptor) -> Option<Arc<PluginFamily>> {
        self.families.get(descriptor).map(|entry| entry.clone())
    }

    /// Snapshot of every stored family
    ///
    /// Clones the `Arc`s out so callers never hold map locks while walking
    /// families.
    pub fn families_snapshot(&self) -> Vec<Arc<PluginFamily>> {
        self.families.iter().map(|entry| entry.value().clone()).collect()
    }

    /// Snapshot of every stored descriptor
    pub fn descriptors(&self) -> Vec<TypeDescriptor> {
        self.families.iter().map(|entry| entry.key().clone()).collect()
    }

    /// The fallback policy chain consulted by [`Self::get`]
    pub fn policy_chain(&self) -> &FamilyPolicyChain {
        &self.policies
    }

    /// Number of stored families
    pub fn len(&self) -> usize {
        self.families.len()
    }

    /// Whether no families are stored
    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// Drop every stored family without disposing anything
    pub fn clear(&self) {
        self.families.clear();
    }
}

impl std::fmt::Debug for FamilyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FamilyRegistry")
            .field("families_count", &self.families.len())
            .field("policies_count", &self.policies.len())
            .finish()
    }
}
