//! Producer and resource contracts

use crate::error::Result;
use crate::value_objects::{Scope, TypeBindings};
use downcast_rs::{DowncastSync, impl_downcast};
use std::sync::Arc;

/// Contract for values that hold resources requiring explicit release
///
/// Teardown collects disposal failures and logs them; a failing disposable
/// never aborts the pass or poisons its neighbours.
pub trait Disposable: Send + Sync {
    /// Release held resources
    ///
    /// # Returns
    ///
    /// `Ok(())` on success, or a [`crate::Error::Disposal`] describing the
    /// failure for the caller to log.
    fn dispose(&self) -> Result<()>;
}

/// A configured producer of plugin values
///
/// The polymorphic entry stored inside a plugin family: concrete-type
/// producers, named references, deferred wrappers and collection aggregates
/// all implement this one contract. The registry stores and orders
/// producers; it never invokes them. Actual value construction belongs to
/// the external resolution pipeline.
pub trait Instance: DowncastSync {
    /// Name of this producer, unique within its owning family
    fn name(&self) -> &str;

    /// Lifetime scope of produced values
    fn scope(&self) -> Scope;

    /// Human-readable description for diagnostics output
    fn description(&self) -> String;

    /// Disposable view, when the producer itself holds resources
    fn as_disposable(&self) -> Option<&dyn Disposable> {
        None
    }

    /// Close an open producer under the given parameter bindings
    ///
    /// # Returns
    ///
    /// A closed clone of this producer, or `None` when the producer does
    /// not participate in open-generic closing.
    fn close_with(&self, bindings: &TypeBindings) -> Option<Arc<dyn Instance>> {
        let _ = bindings;
        None
    }
}

impl_downcast!(sync Instance);

/// Type-erased singleton value held by the lifecycle cache
///
/// Implementors wrap whatever the resolution pipeline built; the cache only
/// stores, returns and ejects them. Values holding resources expose a
/// disposable view so teardown can release them.
pub trait CachedValue: DowncastSync {
    /// Disposable view, when the value holds resources
    fn as_disposable(&self) -> Option<&dyn Disposable> {
        None
    }
}

impl_downcast!(sync CachedValue);
