//! Concrete-type producer
//!
//! The workhorse producer: metadata naming the concrete type that satisfies
//! the plugin type. The resolution pipeline reads the concrete descriptor
//! and builds the value; the registry only stores the mapping.

use plugboard_domain::{Instance, Scope, TypeBindings, TypeDescriptor};
use std::sync::Arc;

/// Maps a plugin type to the concrete type that satisfies it
#[derive(Debug, Clone)]
pub struct ConcreteProducer {
    concrete: TypeDescriptor,
    name: String,
    scope: Scope,
}

impl ConcreteProducer {
    /// Create a producer named after its concrete type
    pub fn new(concrete: TypeDescriptor) -> Self {
        let name = concrete.name().to_string();
        Self {
            concrete,
            name,
            scope: Scope::default(),
        }
    }

    /// Create a producer with an explicit instance name
    pub fn named(concrete: TypeDescriptor, name: impl Into<String>) -> Self {
        Self {
            concrete,
            name: name.into(),
            scope: Scope::default(),
        }
    }

    /// Set the lifetime scope
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// Concrete type this producer yields
    pub fn concrete(&self) -> &TypeDescriptor {
        &self.concrete
    }
}

impl Instance for ConcreteProducer {
    fn name(&self) -> &str {
        &self.name
    }

    fn scope(&self) -> Scope {
        self.scope
    }

    fn description(&self) -> String {
        format!("concrete type {}", self.concrete)
    }

    fn close_with(&self, bindings: &TypeBindings) -> Option<Arc<dyn Instance>> {
        // Names stay stable across closing so default designations carry.
        let closed = if self.concrete.is_open() {
            self.concrete.substitute(bindings)
        } else {
            self.concrete.clone()
        };
        Some(Arc::new(Self {
            concrete: closed,
            name: self.name.clone(),
            scope: self.scope,
        }))
    }
}
