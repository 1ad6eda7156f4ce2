//! Collection aggregate producer
//!
//! Synthesized by [`crate::policies::CollectionPolicy`] for requests like
//! `Vec<Element>`. Carries the element descriptor so the resolution
//! pipeline can gather every instance of the element family; an empty
//! family yields an empty aggregate, never an error.

use plugboard_domain::{Instance, Scope, TypeDescriptor};

/// Aggregates all instances of an element plugin type
#[derive(Debug, Clone)]
pub struct CollectionProducer {
    element: TypeDescriptor,
    name: String,
}

impl CollectionProducer {
    /// Name given to synthesized collection producers
    pub const DEFAULT_NAME: &'static str = "default";

    /// Create a collection producer over an element descriptor
    pub fn new(element: TypeDescriptor) -> Self {
        Self {
            element,
            name: Self::DEFAULT_NAME.to_string(),
        }
    }

    /// Element plugin type being aggregated
    pub fn element(&self) -> &TypeDescriptor {
        &self.element
    }
}

impl Instance for CollectionProducer {
    fn name(&self) -> &str {
        &self.name
    }

    fn scope(&self) -> Scope {
        Scope::Transient
    }

    fn description(&self) -> String {
        format!("collection of all {} instances", self.element)
    }
}
