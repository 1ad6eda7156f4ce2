//! # Plugboard Registry Core
//!
//! The configuration registry at the heart of a runtime plugin container:
//! type-keyed producer families, a pluggable fallback policy chain, a
//! hierarchical profile overlay tree, a singleton lifecycle cache, a
//! deduplicating module import queue and a strict teardown protocol.
//!
//! The registry stores and organizes producer configurations; it never
//! constructs plugin values. Resolution, object building and module
//! application belong to external pipelines that consume this crate.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `node` | Registry nodes: profile tree, convenience surface, teardown |
//! | `registry` | Concurrent descriptor-to-family map with policy fallback |
//! | `family` | Plugin families: ordered producers plus default designation |
//! | `policies` | Fallback policy contract, chain and built-in policies |
//! | `instances` | Built-in producer implementations |
//! | `lifecycle` | Singleton value cache keyed by descriptor and name |
//! | `memo` | Negative-lookup memoization for presence checks |
//! | `imports` | Module import queue and the module-kind table |
//! | `diagnostics` | Serializable registry summaries |
//!
//! ## Concurrency model
//!
//! Configuration happens single-threaded; presence checks and lookups are
//! safe concurrently once configuration settles; teardown requires exclusive
//! access. Get-or-create paths run their builders outside map locks and
//! publish first-wins, so racing callers may duplicate discarded work but
//! always observe a single shared result.

/// Serializable registry summaries
pub mod diagnostics;
/// Plugin families
pub mod family;
/// Module import queue and module-kind table
pub mod imports;
/// Built-in producer implementations
pub mod instances;
/// Singleton lifecycle cache
pub mod lifecycle;
/// Negative-lookup memoization
pub mod memo;
/// Registry nodes and teardown
pub mod node;
/// Fallback policies
pub mod policies;
/// Descriptor-to-family map
pub mod registry;

pub use diagnostics::{FamilySummary, InstanceSummary, RegistrySummary};
pub use family::PluginFamily;
pub use imports::{
    MODULE_KINDS, ModuleKindEntry, RegistryImportQueue, construct_module, list_module_kinds,
};
pub use instances::{
    CollectionProducer, ConcreteProducer, ContainerReference, DeferredProducer, ReferenceProducer,
};
pub use lifecycle::{LifecycleCache, SingletonKey};
pub use memo::MissingTypeMemo;
pub use node::{CONTAINER_TYPE_NAME, DEFAULT_PROFILE, RegistryNode, container_descriptor};
pub use policies::{
    CloseGenericsPolicy, CollectionPolicy, DeferredWrapperPolicy, FamilyPolicy, FamilyPolicyChain,
};
pub use registry::FamilyRegistry;
