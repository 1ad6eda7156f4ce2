//! Collection aggregate synthesis
//!
//! Requests shaped like `Vec<Element>` get a family holding one collection
//! producer that aggregates every instance of the element type at
//! resolution time. An empty aggregate is a valid answer, so the policy
//! synthesizes unconditionally and therefore stays out of presence checks.

use crate::family::PluginFamily;
use crate::instances::CollectionProducer;
use crate::policies::FamilyPolicy;
use crate::registry::FamilyRegistry;
use plugboard_domain::{TypeArg, TypeDescriptor};
use std::sync::Arc;

/// Template names recognized by default
const DEFAULT_TEMPLATES: [&str; 2] = ["Vec", "Collection"];

/// Synthesizes collection aggregates for template-named requests
#[derive(Debug, Clone)]
pub struct CollectionPolicy {
    templates: Vec<String>,
}

impl CollectionPolicy {
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

    fn element_of(&self, descriptor: &TypeDescriptor) -> Option<TypeDescriptor> {
        if descriptor.is_open() || descriptor.arity() != 1 {
            return None;
        }
        if !self.templates.iter().any(|template| template == descriptor.name()) {
            return None;
        }
        match &descriptor.args()[0] {
            TypeArg::Concrete(element) => Some(element.clone()),
            TypeArg::Param(_) => None,
        }
    }
}

impl Default for CollectionPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl FamilyPolicy for CollectionPolicy {
    fn name(&self) -> &str {
        "collection"
    }

    fn build(
        &self,
        descriptor: &TypeDescriptor,
        _families: &FamilyRegistry,
    ) -> Option<PluginFamily> {
        let element = self.element_of(descriptor)?;
        let family = PluginFamily::new(descriptor.clone());
        family.add_instance(Arc::new(CollectionProducer::new(element)));
        family.set_default(CollectionProducer::DEFAULT_NAME);
        Some(family)
    }
}
