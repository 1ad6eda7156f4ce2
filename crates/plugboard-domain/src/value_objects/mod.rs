//! Value objects for the Plugboard domain
//!
//! Immutable types with structural equality. Descriptors key every registry
//! map, bindings drive open-generic closing, scopes tag producer lifetimes.

/// Producer lifetime scopes
pub mod scope;
/// Structural type identity and parameter binding
pub mod type_descriptor;

pub use scope::Scope;
pub use type_descriptor::{TypeArg, TypeBindings, TypeDescriptor};
