//! Deferred-invocation wrapper synthesis
//!
//! Requests shaped like `Lazy<Inner>` get a family holding one deferred
//! producer around the inner descriptor. The wrapper is only synthesized
//! when the inner type already has a family, which keeps presence answers
//! for wrapper types anchored to real configuration.

use crate::family::PluginFamily;
use crate::instances::DeferredProducer;
use crate::policies::FamilyPolicy;
use crate::registry::FamilyRegistry;
use plugboard_domain::{TypeArg, TypeDescriptor};
use std::sync::Arc;

/// Template names recognized by default
const DEFAULT_TEMPLATES: [&str; 2] = ["Lazy", "Factory"];

/// Synthesizes deferred wrappers for template-named requests
#[derive(Debug, Clone)]
pub struct DeferredWrapperPolicy {
    templates: Vec<String>,
}

impl DeferredWrapperPolicy {
    /// Create the policy with the conventional template names
    pub fn new() -> Self {
        Self::with_templates(DEFAULT_TEMPLATES)
    }

    /// Create the policy recognizing custom template names
    pub fn with_templates<I, S>(templates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            templates: templates.into_iter().map(Into::into).collect(),
        }
    }

    fn wrapped_element(&self, descriptor: &TypeDescriptor) -> Option<TypeDescriptor> {
        if descriptor.is_open() || descriptor.arity() != 1 {
            return None;
        }
        if !self.templates.iter().any(|template| template == descriptor.name()) {
            return None;
        }
        match &descriptor.args()[0] {
            TypeArg::Concrete(inner) => Some(inner.clone()),
            TypeArg::Param(_) => None,
        }
    }
}

impl Default for DeferredWrapperPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl FamilyPolicy for DeferredWrapperPolicy {
    fn name(&self) -> &str {
        "deferred-wrapper"
    }

    // Synthesis requires a registered inner family, so presence answers
    // stay truthful.
    fn applies_to_presence_checks(&self) -> bool {
        true
    }

    fn build(
        &self,
        descriptor: &TypeDescriptor,
        families: &FamilyRegistry,
    ) -> Option<PluginFamily> {
        let inner = self.wrapped_element(descriptor)?;
        if !families.has(&inner) {
            return None;
        }
        let family = PluginFamily::new(descriptor.clone());
        family.add_instance(Arc::new(DeferredProducer::new(inner)));
        family.set_default(DeferredProducer::DEFAULT_NAME);
        Some(family)
    }
}
