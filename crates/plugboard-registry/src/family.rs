//! Plugin families
//!
//! A family collects every configured producer for one plugin type, keeps
//! them in registration order with unique names, and optionally designates
//! one as the default. Families are shared behind `Arc` once published, so
//! all mutation goes through interior locks; writes belong to the
//! single-threaded configuration phase, reads are free-threaded.

use crate::node::RegistryNode;
use plugboard_domain::{Instance, TypeBindings, TypeDescriptor};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};
use tracing::warn;

/// Producers registered for one plugin type
pub struct PluginFamily {
    descriptor: TypeDescriptor,
    instances: RwLock<Vec<Arc<dyn Instance>>>,
    default_name: RwLock<Option<String>>,
    owner: RwLock<Weak<RegistryNode>>,
}

impl PluginFamily {
    /// Create an empty family for a plugin type
    pub fn new(descriptor: TypeDescriptor) -> Self {
        Self {
            descriptor,
            instances: RwLock::new(Vec::new()),
            default_name: RwLock::new(None),
            owner: RwLock::new(Weak::new()),
        }
    }

    /// Plugin type this family serves
    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    fn read_instances(&self) -> RwLockReadGuard<'_, Vec<Arc<dyn Instance>>> {
        self.instances.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_instances(&self) -> RwLockWriteGuard<'_, Vec<Arc<dyn Instance>>> {
        self.instances
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a producer, replacing any existing producer with the same name
    ///
    /// Replacement keeps the original registration position so instance
    /// ordering stays stable across reconfiguration.
    pub fn add_instance(&self, instance: Arc<dyn Instance>) {
        let mut instances = self.write_instances();
        match instances
            .iter()
            .position(|existing| existing.name() == instance.name())
        {
            Some(index) => instances[index] = instance,
            None => instances.push(instance),
        }
    }

    /// Producer registered under a name, if any
    pub fn instance_named(&self, name: &str) -> Option<Arc<dyn Instance>> {
        self.read_instances()
            .iter()
            .find(|instance| instance.name() == name)
            .cloned()
    }

    /// Snapshot of all producers in registration order
    pub fn instances(&self) -> Vec<Arc<dyn Instance>> {
        self.read_instances().clone()
    }

    /// Remove and return the producer registered under a name
    pub fn remove_instance(&self, name: &str) -> Option<Arc<dyn Instance>> {
        let mut instances = self.write_instances();
        let index = instances.iter().position(|instance| instance.name() == name)?;
        let removed = instances.remove(index);
        let mut default_name = self
            .default_name
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if default_name.as_deref() == Some(name) {
            *default_name = None;
        }
        Some(removed)
    }

    /// Number of registered producers
    pub fn instance_count(&self) -> usize {
        self.read_instances().len()
    }

    /// Whether the family has no producers
    pub fn is_empty(&self) -> bool {
        self.read_instances().is_empty()
    }

    /// Designate the producer with this name as the family default
    pub fn set_default(&self, name: impl Into<String>) {
        let mut default_name = self
            .default_name
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *default_name = Some(name.into());
    }

    /// The default producer
    ///
    /// Explicit designation wins; a family holding exactly one producer
    /// treats it as the implicit default.
    pub fn default_instance(&self) -> Option<Arc<dyn Instance>> {
        let explicit = self
            .default_name
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(name) = explicit {
            return self.instance_named(&name);
        }
        let instances = self.read_instances();
        if instances.len() == 1 {
            return instances.first().cloned();
        }
        None
    }

    /// Name of the default producer, if one resolves
    pub fn default_name(&self) -> Option<String> {
        self.default_instance().map(|instance| instance.name().to_string())
    }

    /// Bind this family to its owning registry node
    pub fn set_owner(&self, owner: Weak<RegistryNode>) {
        let mut slot = self.owner.write().unwrap_or_else(PoisonError::into_inner);
        *slot = owner;
    }

    /// Owning registry node, while it is alive
    pub fn owner(&self) -> Option<Arc<RegistryNode>> {
        self.owner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .upgrade()
    }

    /// Profile name of the owning node, for diagnostics
    pub fn owner_profile(&self) -> Option<String> {
        self.owner().map(|node| node.profile_name().to_string())
    }

    /// Close this open family against a closed descriptor
    ///
    /// Each producer that participates in closing contributes its closed
    /// clone; producers that do not participate are left behind. An explicit
    /// default designation carries over when its closed counterpart
    /// survived.
    pub fn close(&self, descriptor: TypeDescriptor, bindings: &TypeBindings) -> PluginFamily {
        let closed = PluginFamily::new(descriptor);
        for instance in self.instances() {
            if let Some(closed_instance) = instance.close_with(bindings) {
                closed.add_instance(closed_instance);
            }
        }
        let explicit = self
            .default_name
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(name) = explicit {
            if closed.instance_named(&name).is_some() {
                closed.set_default(name);
            }
        }
        closed
    }

    /// Release every disposable producer and clear the family
    ///
    /// Disposal failures are logged and skipped; one bad producer never
    /// blocks the rest of the family.
    pub fn dispose(&self) {
        let drained: Vec<Arc<dyn Instance>> = {
            let mut instances = self.write_instances();
            std::mem::take(&mut *instances)
        };
        for instance in drained {
            if let Some(disposable) = instance.as_disposable() {
                if let Err(error) = disposable.dispose() {
                    warn!(
                        family = %self.descriptor,
                        instance = %instance.name(),
                        error = %error,
                        "Producer disposal failed"
                    );
                }
            }
        }
        let mut default_name = self
            .default_name
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *default_name = None;
    }
}

impl std::fmt::Debug for PluginFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginFamily")
            .field("descriptor", &self.descriptor)
            .field("instances_count", &self.read_instances().len())
            .finish()
    }
}
