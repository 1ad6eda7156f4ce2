//! Configuration module contract

use downcast_rs::{DowncastSync, impl_downcast};
use std::fmt::Debug;

/// A bundle of registrations a registry node can queue for import
///
/// The registry core only deduplicates and queues modules; applying their
/// registrations is the external module compiler's job. Imports arrive two
/// ways: by kind identifier, constructed through the registered module-kind
/// table, or as ready-made values deduplicated through [`Self::matches`].
pub trait ConfigurationModule: DowncastSync + Debug {
    /// Module kind identifier, shared by every module of the same shape
    fn kind(&self) -> &str;

    /// Equality contract used by value-based import deduplication
    ///
    /// Defaults to kind identity. Modules carrying configuration state
    /// override this to compare that state, so two differently-configured
    /// modules of one kind can coexist in the queue.
    fn matches(&self, other: &dyn ConfigurationModule) -> bool {
        self.kind() == other.kind()
    }
}

impl_downcast!(sync ConfigurationModule);
