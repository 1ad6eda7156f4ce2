//! Deferred-invocation producer
//!
//! Synthesized by [`crate::policies::DeferredWrapperPolicy`] for requests
//! like `Lazy<Inner>`. Carries the inner descriptor so the resolution
//! pipeline can build a thunk that resolves the inner type on first use.

use plugboard_domain::{Instance, Scope, TypeDescriptor};

/// Defers resolution of an inner plugin type until first use
#[derive(Debug, Clone)]
pub struct DeferredProducer {
    inner: TypeDescriptor,
    name: String,
}

impl DeferredProducer {
    /// Name given to synthesized deferred producers
    pub const DEFAULT_NAME: &'static str = "default";

    /// Create a deferred producer around an inner descriptor
    pub fn new(inner: TypeDescriptor) -> Self {
        Self {
            inner,
            name: Self::DEFAULT_NAME.to_string(),
        }
    }

    /// Inner plugin type whose resolution is deferred
    pub fn inner(&self) -> &TypeDescriptor {
        &self.inner
    }
}

impl Instance for DeferredProducer {
    fn name(&self) -> &str {
        &self.name
    }

    fn scope(&self) -> Scope {
        // A fresh thunk per resolution; the inner value's scope is the
        // inner family's business.
        Scope::Transient
    }

    fn description(&self) -> String {
        format!("deferred invocation of {}", self.inner)
    }
}
