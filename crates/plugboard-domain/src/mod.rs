//! # Plugboard Domain Layer
//!
//! Pure contracts and value objects for the plugin registry. This crate has
//! no machinery: it defines what a producer, a disposable resource, a cached
//! singleton value and a configuration module look like, plus the structural
//! type identity used to key every registry map.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `error` | Error enum and `Result` alias shared by both layers |
//! | `ports` | Trait contracts implemented outside the domain |
//! | `value_objects` | Immutable types: descriptors, bindings, scopes |

pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::{CachedValue, ConfigurationModule, Disposable, Instance};
pub use value_objects::{Scope, TypeArg, TypeBindings, TypeDescriptor};
