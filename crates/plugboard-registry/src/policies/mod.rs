//! Fallback policies
//!
//! When [`crate::registry::FamilyRegistry::get`] misses, the policy chain
//! gets a chance to synthesize a family before the bare fallback. Policies
//! are consulted most-recently-added first, so later registrations override
//! earlier ones. Each policy declares whether presence checks may consult
//! it; presence hits are deliberately not persisted, unlike `get` results.

/// Open-generic closing policy
pub mod close_generics;
/// Collection aggregate synthesis
pub mod collection;
/// Deferred-invocation wrapper synthesis
pub mod deferred;

pub use close_generics::CloseGenericsPolicy;
pub use collection::CollectionPolicy;
pub use deferred::DeferredWrapperPolicy;

use crate::family::PluginFamily;
use crate::registry::FamilyRegistry;
use plugboard_domain::TypeDescriptor;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// A pluggable strategy for synthesizing families on registry misses
pub trait FamilyPolicy: Send + Sync {
    /// Policy name for logging and diagnostics
    fn name(&self) -> &str;

    /// Whether `has_family` presence probes may consult this policy
    ///
    /// Presence-eligible policies answer from real configuration, so a hit
    /// is a truthful "yes". Policies that can synthesize a family for
    /// almost any descriptor stay out of presence checks to keep
    /// `has_family` meaningful.
    fn applies_to_presence_checks(&self) -> bool {
        false
    }

    /// Synthesize a family for the descriptor, or decline
    ///
    /// Runs without any registry lock held, so implementations may read
    /// `families` freely. Returning `None` passes the miss to the next
    /// policy in the chain.
    fn build(&self, descriptor: &TypeDescriptor, families: &FamilyRegistry)
    -> Option<PluginFamily>;
}

/// Ordered chain of fallback policies
///
/// Insertion puts new policies at the front. Reads snapshot the chain and
/// drop the lock before running any policy, so policies re-entering the
/// registry can never deadlock against a registration in flight.
pub struct FamilyPolicyChain {
    policies: RwLock<Vec<Arc<dyn FamilyPolicy>>>,
}

impl FamilyPolicyChain {
    /// Create an empty chain
    pub fn new() -> Self {
        Self {
            policies: RwLock::new(Vec::new()),
        }
    }

    /// Add a policy at the front of the chain
    pub fn add(&self, policy: Arc<dyn FamilyPolicy>) {
        debug!(policy = %policy.name(), "Adding family policy");
        let mut policies = self.policies.write().unwrap_or_else(PoisonError::into_inner);
        policies.insert(0, policy);
    }

    fn snapshot(&self) -> Vec<Arc<dyn FamilyPolicy>> {
        self.policies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// First non-empty synthesis result, in priority order
    pub fn build(
        &self,
        descriptor: &TypeDescriptor,
        families: &FamilyRegistry,
    ) -> Option<PluginFamily> {
        for policy in self.snapshot() {
            if let Some(family) = policy.build(descriptor, families) {
                debug!(
                    descriptor = %descriptor,
                    policy = %policy.name(),
                    "Policy synthesized plugin family"
                );
                return Some(family);
            }
        }
        None
    }

    /// First non-empty result among presence-eligible policies only
    ///
    /// Callers discard the synthesized family; presence probes must not
    /// mutate the registry.
    pub fn build_for_presence(
        &self,
        descriptor: &TypeDescriptor,
        families: &FamilyRegistry,
    ) -> Option<PluginFamily> {
        for policy in self.snapshot() {
            if !policy.applies_to_presence_checks() {
                continue;
            }
            if let Some(family) = policy.build(descriptor, families) {
                return Some(family);
            }
        }
        None
    }

    /// Number of registered policies
    pub fn len(&self) -> usize {
        self.policies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the chain has no policies
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Policy names in consultation order, for diagnostics
    pub fn policy_names(&self) -> Vec<String> {
        self.snapshot()
            .iter()
            .map(|policy| policy.name().to_string())
            .collect()
    }
}

impl Default for FamilyPolicyChain {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FamilyPolicyChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FamilyPolicyChain")
            .field("policies", &self.policy_names())
            .finish()
    }
}
