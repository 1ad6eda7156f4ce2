//! Open-generic closing policy
//!
//! Requests for a closed generic type are satisfied by locating an open
//! registration with the same base shape and substituting the request's
//! arguments into every producer that participates in closing. Matching is
//! pure descriptor arithmetic; no runtime type machinery is involved.

use crate::family::PluginFamily;
use crate::policies::FamilyPolicy;
use crate::registry::FamilyRegistry;
use plugboard_domain::TypeDescriptor;
use tracing::debug;

/// Closes open generic registrations against closed requests
#[derive(Debug, Clone, Copy, Default)]
pub struct CloseGenericsPolicy;

impl CloseGenericsPolicy {
    /// Create the policy
    pub fn new() -> Self {
        Self
    }
}

impl FamilyPolicy for CloseGenericsPolicy {
    fn name(&self) -> &str {
        "close-generics"
    }

    // An open registration is real configuration, so a match here is a
    // truthful presence answer.
    fn applies_to_presence_checks(&self) -> bool {
        true
    }

    fn build(
        &self,
        descriptor: &TypeDescriptor,
        families: &FamilyRegistry,
    ) -> Option<PluginFamily> {
        if descriptor.is_open() || descriptor.arity() == 0 {
            return None;
        }
        for family in families.families_snapshot() {
            let open = family.descriptor();
            if !open.is_open() {
                continue;
            }
            if let Some(bindings) = open.bind_open(descriptor) {
                debug!(
                    open = %open,
                    closed = %descriptor,
                    "Closing open generic registration"
                );
                return Some(family.close(descriptor.clone(), &bindings));
            }
        }
        None
    }
}
