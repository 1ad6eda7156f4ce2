//! Registry nodes
//!
//! A node is one overlay in the profile tree: it owns its family registry,
//! policy chain, lifecycle cache, type-miss memo and import queue, plus
//! named profile children and unnamed structural children. Nothing is
//! inherited automatically; parent delegation, when wanted, is an external
//! builder's policy.
//!
//! Teardown follows a strict order so cached values release before the
//! producers that made them, children release before this node's families,
//! and the container's own self-registration never participates in the
//! general disposal pass.

use crate::diagnostics::RegistrySummary;
use crate::family::PluginFamily;
use crate::imports::RegistryImportQueue;
use crate::instances::{ConcreteProducer, ContainerReference};
use crate::lifecycle::LifecycleCache;
use crate::memo::MissingTypeMemo;
use crate::policies::FamilyPolicy;
use crate::registry::FamilyRegistry;
use dashmap::DashMap;
use plugboard_domain::{CachedValue, ConfigurationModule, Instance, Result, TypeDescriptor};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock, Weak};
use tracing::{debug, warn};

/// Profile name given to roots created without one
pub const DEFAULT_PROFILE: &str = "DEFAULT";

/// Well-known descriptor name of the container self-registration
pub const CONTAINER_TYPE_NAME: &str = "plugboard.RegistryNode";

/// Descriptor under which every node registers itself
pub fn container_descriptor() -> TypeDescriptor {
    TypeDescriptor::new(CONTAINER_TYPE_NAME)
}

/// One overlay node in the profile tree
pub struct RegistryNode {
    profile: String,
    parent: Weak<RegistryNode>,
    weak_self: Weak<RegistryNode>,
    families: FamilyRegistry,
    lifecycle: LifecycleCache,
    misses: MissingTypeMemo,
    imports: RegistryImportQueue,
    profiles: DashMap<String, Arc<RegistryNode>>,
    children: RwLock<Vec<Arc<RegistryNode>>>,
    disposed: AtomicBool,
}

impl RegistryNode {
    /// Create a root node under the default profile name
    pub fn create_root() -> Arc<Self> {
        Self::create_root_named(DEFAULT_PROFILE)
    }

    /// Create a root node under an explicit profile name
    pub fn create_root_named(profile: impl Into<String>) -> Arc<Self> {
        Self::build(profile.into(), Weak::new())
    }

    fn build(profile: String, parent: Weak<RegistryNode>) -> Arc<Self> {
        let node = Arc::new_cyclic(|weak: &Weak<RegistryNode>| RegistryNode {
            profile,
            parent,
            weak_self: weak.clone(),
            families: FamilyRegistry::new(weak.clone()),
            lifecycle: LifecycleCache::new(),
            misses: MissingTypeMemo::new(),
            imports: RegistryImportQueue::new(),
            profiles: DashMap::new(),
            children: RwLock::new(Vec::new()),
            disposed: AtomicBool::new(false),
        });
        node.seed_container_family();
        debug!(profile = %node.profile, "Created registry node");
        node
    }

    fn seed_container_family(&self) {
        let family = PluginFamily::new(container_descriptor());
        family.add_instance(Arc::new(ContainerReference::new(self.weak_self.clone())));
        family.set_default(ContainerReference::DEFAULT_NAME);
        self.families.set(family);
    }

    // Nodes only exist behind Arc; upgrading the self pointer cannot fail
    // while a method is executing on one.
    fn strong_self(&self) -> Arc<RegistryNode> {
        self.weak_self
            .upgrade()
            .expect("registry node accessed outside an Arc")
    }

    // ============================================================
    // Tree navigation
    // ============================================================

    /// Profile name of this node
    pub fn profile_name(&self) -> &str {
        &self.profile
    }

    /// Parent node, while it is alive
    pub fn parent(&self) -> Option<Arc<RegistryNode>> {
        self.parent.upgrade()
    }

    /// Whether this node has no living parent
    pub fn is_root(&self) -> bool {
        self.parent.upgrade().is_none()
    }

    /// Walk parent pointers to the top of the tree
    pub fn root(&self) -> Arc<RegistryNode> {
        let mut current = self.strong_self();
        while let Some(parent) = current.parent.upgrade() {
            current = parent;
        }
        current
    }

    /// Get or create the named profile child
    ///
    /// Case-sensitive and idempotent: the same name always returns the same
    /// child until teardown discards it. A name requested after teardown
    /// yields a fresh node, never the disposed one.
    pub fn profile(&self, name: &str) -> Arc<RegistryNode> {
        self.profiles
            .entry(name.to_string())
            .or_insert_with(|| {
                debug!(parent = %self.profile, child = %name, "Creating profile child");
                Self::build(name.to_string(), self.weak_self.clone())
            })
            .clone()
    }

    /// Create an unnamed structural child
    ///
    /// Shares the parent-pointer mechanism with profile children but never
    /// appears in [`Self::profile_names`]; the child inherits this node's
    /// profile name.
    pub fn create_child(&self) -> Arc<RegistryNode> {
        let child = Self::build(self.profile.clone(), self.weak_self.clone());
        let mut children = self.children.write().unwrap_or_else(PoisonError::into_inner);
        children.push(child.clone());
        child
    }

    /// Names of the current profile children, sorted
    pub fn profile_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.profiles.iter().map(|entry| entry.key().clone()).collect();
        names.sort();
        names
    }

    // ============================================================
    // Component access
    // ============================================================

    /// The descriptor-to-family map
    pub fn families(&self) -> &FamilyRegistry {
        &self.families
    }

    /// The singleton lifecycle cache
    pub fn lifecycle(&self) -> &LifecycleCache {
        &self.lifecycle
    }

    /// The module import queue
    pub fn imports(&self) -> &RegistryImportQueue {
        &self.imports
    }

    /// The negative-lookup memo
    pub fn type_misses(&self) -> &MissingTypeMemo {
        &self.misses
    }

    /// Whether teardown has run on this node
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    // ============================================================
    // Registration
    // ============================================================

    /// Add a fallback policy, consulted before all previously added ones
    pub fn add_family_policy(&self, policy: Arc<dyn FamilyPolicy>) {
        self.families.policy_chain().add(policy);
        self.misses.clear();
    }

    /// Register a concrete type as a producer for a plugin type
    ///
    /// Without a name the producer is registered under its concrete type's
    /// name. Returns the family for follow-up configuration such as
    /// [`PluginFamily::set_default`].
    pub fn add_type(
        &self,
        plugin: &TypeDescriptor,
        concrete: TypeDescriptor,
        name: Option<&str>,
    ) -> Arc<PluginFamily> {
        let family = self.families.get(plugin);
        let producer = match name {
            Some(name) => ConcreteProducer::named(concrete, name),
            None => ConcreteProducer::new(concrete),
        };
        family.add_instance(Arc::new(producer));
        self.misses.clear();
        family
    }

    /// Register a pre-built family, replacing any existing one
    pub fn add_family(&self, family: PluginFamily) {
        debug!(descriptor = %family.descriptor(), "Registering plugin family");
        self.families.set(family);
        self.misses.clear();
    }

    /// Import a module by kind through the module-kind table
    pub fn import_module_kind(&self, kind: &str) -> Result<bool> {
        self.imports.import_kind(kind)
    }

    /// Import a ready-made module value
    pub fn import_module(&self, module: Arc<dyn ConfigurationModule>) -> bool {
        self.imports.import(module)
    }

    // ============================================================
    // Presence checks and lookup
    // ============================================================

    /// Whether this node can resolve the descriptor
    ///
    /// Registry hit answers immediately; memoized misses short-circuit;
    /// otherwise only presence-eligible policies are probed and a hit is
    /// reported without persisting the synthesized family. Unlike
    /// [`FamilyRegistry::get`], a positive answer here leaves the registry
    /// untouched.
    pub fn has_family(&self, descriptor: &TypeDescriptor) -> bool {
        if self.families.has(descriptor) {
            return true;
        }
        if self.misses.contains(descriptor) {
            return false;
        }
        if self
            .families
            .policy_chain()
            .build_for_presence(descriptor, &self.families)
            .is_some()
        {
            // Probe result is discarded; presence checks must not mutate.
            return true;
        }
        self.misses.record(descriptor.clone());
        false
    }

    /// Forget memoized negative lookups
    ///
    /// Call after any batch registration that could turn a past negative
    /// into a positive; the registration methods on this node do it
    /// automatically.
    pub fn clear_type_misses(&self) {
        self.misses.clear();
    }

    /// Whether a stored family has a producer under this name
    ///
    /// Pure check against existing configuration; never creates a family
    /// and never consults policies.
    pub fn has_instance(&self, descriptor: &TypeDescriptor, name: &str) -> bool {
        self.families
            .inspect(descriptor)
            .is_some_and(|family| family.instance_named(name).is_some())
    }

    /// Whether a stored family resolves a default producer
    pub fn has_default_for_type(&self, descriptor: &TypeDescriptor) -> bool {
        self.families
            .inspect(descriptor)
            .is_some_and(|family| family.default_instance().is_some())
    }

    /// Producer registered under a name, creating the family on first access
    pub fn find_instance(
        &self,
        descriptor: &TypeDescriptor,
        name: &str,
    ) -> Option<Arc<dyn Instance>> {
        self.families.get(descriptor).instance_named(name)
    }

    /// All producers for the descriptor, creating the family on first access
    pub fn all_instances(&self, descriptor: &TypeDescriptor) -> Vec<Arc<dyn Instance>> {
        self.families.get(descriptor).instances()
    }

    // ============================================================
    // Ejection and teardown
    // ============================================================

    /// Remove a family and dispose it together with its cached values
    ///
    /// # Returns
    ///
    /// `true` when a family was present and ejected.
    pub fn eject_family(&self, descriptor: &TypeDescriptor) -> bool {
        let Some(family) = self.families.remove(descriptor) else {
            return false;
        };
        debug!(descriptor = %descriptor, "Ejecting plugin family");
        for (instance, value) in self.lifecycle.eject_family(descriptor) {
            dispose_cached(descriptor, &instance, value.as_ref());
        }
        family.dispose();
        true
    }

    /// Tear this node down
    ///
    /// Order is load-bearing: cached singleton values first, then children,
    /// then the container self-registration, then the memo, then every
    /// remaining family. Disposal failures are logged and never interrupt
    /// the pass. Idempotent; a second call is a no-op. Afterwards the node
    /// behaves as empty, and previously disposed children are never
    /// resurrected.
    pub fn dispose(&self) {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return;
        }
        debug!(profile = %self.profile, "Disposing registry node");

        // 1. Eject cached singleton values pair by pair, then sweep
        //    whatever no longer maps to a live (family, instance) pair.
        for family in self.families.families_snapshot() {
            for instance in family.instances() {
                if let Some(value) = self.lifecycle.eject(family.descriptor(), instance.name()) {
                    dispose_cached(family.descriptor(), instance.name(), value.as_ref());
                }
            }
        }
        for (key, value) in self.lifecycle.drain() {
            dispose_cached(key.descriptor(), key.instance(), value.as_ref());
        }

        // 2. Children release before this node's own families.
        let named: Vec<Arc<RegistryNode>> =
            self.profiles.iter().map(|entry| entry.value().clone()).collect();
        self.profiles.clear();
        for child in named {
            child.dispose();
        }
        let structural: Vec<Arc<RegistryNode>> = {
            let mut children = self.children.write().unwrap_or_else(PoisonError::into_inner);
            std::mem::take(&mut *children)
        };
        for child in structural {
            child.dispose();
        }

        // 3. The self-registration family detaches before the general pass.
        if let Some(container) = self.families.remove(&container_descriptor()) {
            container.dispose();
        }

        // 4. Negative memos go with the registrations they described.
        self.misses.clear();

        // 5. Dispose and clear every remaining family.
        for family in self.families.families_snapshot() {
            family.dispose();
        }
        self.families.clear();

        self.imports.clear();
        debug!(profile = %self.profile, "Registry node disposed");
    }

    // ============================================================
    // Diagnostics
    // ============================================================

    /// Snapshot this node's configuration for inspection
    pub fn describe(&self) -> RegistrySummary {
        RegistrySummary::from_node(self)
    }
}

fn dispose_cached(descriptor: &TypeDescriptor, instance: &str, value: &dyn CachedValue) {
    if let Some(disposable) = value.as_disposable() {
        if let Err(error) = disposable.dispose() {
            warn!(
                descriptor = %descriptor,
                instance = %instance,
                error = %error,
                "Cached value disposal failed during teardown"
            );
        }
    }
}

impl std::fmt::Debug for RegistryNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryNode")
            .field("profile", &self.profile)
            .field("families_count", &self.families.len())
            .field("profiles", &self.profile_names())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
