//! Named-reference producer
//!
//! A redirect: resolving this producer means resolving another named
//! producer of the same family. Useful for aliasing a stable name onto a
//! configuration-selected implementation.

use plugboard_domain::{Instance, Scope, TypeBindings};
use std::sync::Arc;

/// Redirects resolution to another named producer in the same family
#[derive(Debug, Clone)]
pub struct ReferenceProducer {
    name: String,
    referenced: String,
}

impl ReferenceProducer {
    /// Create a reference under `name` pointing at `referenced`
    pub fn new(name: impl Into<String>, referenced: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            referenced: referenced.into(),
        }
    }

    /// Name of the producer this reference redirects to
    pub fn referenced(&self) -> &str {
        &self.referenced
    }
}

impl Instance for ReferenceProducer {
    fn name(&self) -> &str {
        &self.name
    }

    fn scope(&self) -> Scope {
        // The referenced producer's scope governs; the redirect itself
        // holds nothing.
        Scope::Transient
    }

    fn description(&self) -> String {
        format!("reference to named instance '{}'", self.referenced)
    }

    fn close_with(&self, _bindings: &TypeBindings) -> Option<Arc<dyn Instance>> {
        // References are name-based and carry over unchanged.
        Some(Arc::new(self.clone()))
    }
}
