//! Port contracts for the Plugboard domain
//!
//! Traits implemented outside this crate: producers configured into plugin
//! families, disposable resources released at teardown, type-erased
//! singleton values, and configuration modules queued for import. All ports
//! are synchronous; nothing in the registry core suspends or blocks.

/// Producer, disposable and cached-value contracts
pub mod instance;
/// Configuration module contract
pub mod module;

pub use instance::{CachedValue, Disposable, Instance};
pub use module::ConfigurationModule;
