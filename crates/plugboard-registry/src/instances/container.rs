//! Container self-reference producer
//!
//! Every registry node seeds its own family with one of these, so plugins
//! can depend on the container the way they depend on anything else.
//! Teardown detaches this family before the general disposal pass.

use crate::node::RegistryNode;
use plugboard_domain::{Instance, Scope};
use std::sync::{Arc, Weak};

/// Resolves to the owning registry node itself
pub struct ContainerReference {
    node: Weak<RegistryNode>,
}

impl ContainerReference {
    /// Name of the seeded self-reference instance
    pub const DEFAULT_NAME: &'static str = "default";

    /// Create a self-reference for a node
    pub fn new(node: Weak<RegistryNode>) -> Self {
        Self { node }
    }

    /// The referenced node, while it is alive
    pub fn node(&self) -> Option<Arc<RegistryNode>> {
        self.node.upgrade()
    }
}

impl Instance for ContainerReference {
    fn name(&self) -> &str {
        Self::DEFAULT_NAME
    }

    fn scope(&self) -> Scope {
        Scope::Singleton
    }

    fn description(&self) -> String {
        match self.node() {
            Some(node) => format!("container self-reference ('{}')", node.profile_name()),
            None => "container self-reference (released)".to_string(),
        }
    }
}

impl std::fmt::Debug for ContainerReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContainerReference")
            .field("alive", &self.node.upgrade().is_some())
            .finish()
    }
}
