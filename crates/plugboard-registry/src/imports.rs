//! Module import queue and module-kind table
//!
//! Configuration modules arrive either as ready-made values or as kind
//! identifiers constructed through the module-kind table, a linker-built
//! registry of no-argument constructors. The queue only deduplicates and
//! holds modules; applying their registrations is the external module
//! compiler's job, which drains pending into merged.

use plugboard_domain::{ConfigurationModule, Error, Result};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Entry in the module-kind table
pub struct ModuleKindEntry {
    /// Kind identifier used by imports
    pub kind: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// No-argument constructor for modules of this kind
    pub construct: fn() -> std::result::Result<Arc<dyn ConfigurationModule>, String>,
}

/// Module-kind table, populated at link time
///
/// Register an entry from any crate:
///
/// ```ignore
/// #[linkme::distributed_slice(MODULE_KINDS)]
/// static STORAGE_MODULE: ModuleKindEntry = ModuleKindEntry {
///     kind: "storage",
///     description: "Storage backend registrations",
///     construct: || Ok(std::sync::Arc::new(StorageModule::default())),
/// };
/// ```
#[linkme::distributed_slice]
pub static MODULE_KINDS: [ModuleKindEntry] = [..];

/// Construct a module of the requested kind through the table
pub fn construct_module(kind: &str) -> Result<Arc<dyn ConfigurationModule>> {
    for entry in MODULE_KINDS {
        if entry.kind == kind {
            return (entry.construct)()
                .map_err(|cause| Error::module_construction(kind, cause));
        }
    }
    let available: Vec<&str> = MODULE_KINDS.iter().map(|entry| entry.kind).collect();
    Err(Error::unknown_module_kind(kind, &available))
}

/// List registered module kinds with their descriptions
pub fn list_module_kinds() -> Vec<(&'static str, &'static str)> {
    MODULE_KINDS
        .iter()
        .map(|entry| (entry.kind, entry.description))
        .collect()
}

#[derive(Default)]
struct QueueState {
    pending: Vec<Arc<dyn ConfigurationModule>>,
    merged: Vec<Arc<dyn ConfigurationModule>>,
}

impl QueueState {
    fn contains_kind(&self, kind: &str) -> bool {
        self.all().any(|module| module.kind() == kind)
    }

    fn all(&self) -> impl Iterator<Item = &Arc<dyn ConfigurationModule>> {
        self.merged.iter().chain(self.pending.iter())
    }
}

/// Deduplicating queue of configuration modules awaiting application
pub struct RegistryImportQueue {
    state: Mutex<QueueState>,
}

impl RegistryImportQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            state: Mutex::new(QueueState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Import a module by kind, constructing it through the table
    ///
    /// No-ops when a module of the same kind already sits in merged or
    /// pending. Construction failures surface as
    /// [`Error::ModuleConstruction`] with the kind identity and cause
    /// preserved.
    ///
    /// # Returns
    ///
    /// `Ok(true)` when a module was constructed and queued, `Ok(false)` on
    /// a dedup no-op.
    pub fn import_kind(&self, kind: &str) -> Result<bool> {
        if self.lock().contains_kind(kind) {
            debug!(kind = %kind, "Module kind already imported; skipping");
            return Ok(false);
        }
        // Constructed outside the lock so module constructors may import
        // further modules.
        let module = construct_module(kind)?;
        let mut state = self.lock();
        if state.contains_kind(kind) {
            debug!(kind = %kind, "Module kind already imported; skipping");
            return Ok(false);
        }
        debug!(kind = %kind, "Queued module import");
        state.pending.push(module);
        Ok(true)
    }

    /// Import a ready-made module value
    ///
    /// Deduplicates through the incoming module's own equality contract
    /// against everything in merged and pending.
    ///
    /// # Returns
    ///
    /// `true` when the module was queued, `false` on a dedup no-op.
    pub fn import(&self, module: Arc<dyn ConfigurationModule>) -> bool {
        let mut state = self.lock();
        let duplicate = state.all().any(|existing| module.matches(existing.as_ref()));
        if duplicate {
            debug!(kind = %module.kind(), "Module already imported; skipping");
            return false;
        }
        debug!(kind = %module.kind(), "Queued module import");
        state.pending.push(module);
        true
    }

    /// Move every pending module into the merged set and return them
    ///
    /// The external module compiler calls this, applies the returned
    /// modules, then clears the owning node's type-miss memo.
    pub fn drain_pending(&self) -> Vec<Arc<dyn ConfigurationModule>> {
        let mut state = self.lock();
        let drained: Vec<Arc<dyn ConfigurationModule>> = state.pending.drain(..).collect();
        state.merged.extend(drained.iter().cloned());
        if !drained.is_empty() {
            debug!(count = drained.len(), "Drained pending modules into merged set");
        }
        drained
    }

    /// Whether a module of this kind sits in merged or pending
    pub fn contains_kind(&self, kind: &str) -> bool {
        self.lock().contains_kind(kind)
    }

    /// Number of modules awaiting application
    pub fn pending_count(&self) -> usize {
        self.lock().pending.len()
    }

    /// Number of applied modules
    pub fn merged_count(&self) -> usize {
        self.lock().merged.len()
    }

    /// Forget every queued and merged module
    pub fn clear(&self) {
        let mut state = self.lock();
        state.pending.clear();
        state.merged.clear();
    }
}

impl Default for RegistryImportQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RegistryImportQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("RegistryImportQueue")
            .field("pending_count", &state.pending.len())
            .field("merged_count", &state.merged.len())
            .finish()
    }
}
