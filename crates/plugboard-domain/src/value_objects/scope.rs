//! Producer lifetime scopes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifetime scope of a configured producer
///
/// ## Business Rules
///
/// - `Singleton` is the only scope the lifecycle cache interacts with;
///   transient and per-request values are never cached by the registry
/// - The scope is metadata for the external resolution pipeline, the
///   registry itself never constructs plugin values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    /// A fresh value per resolution
    #[default]
    Transient,
    /// One shared value per registry node, held by the lifecycle cache
    Singleton,
    /// One value per logical request, managed by the resolution pipeline
    PerRequest,
}

impl Scope {
    /// Whether values of this scope are cached by the registry node
    pub fn is_singleton(self) -> bool {
        matches!(self, Self::Singleton)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transient => write!(f, "transient"),
            Self::Singleton => write!(f, "singleton"),
            Self::PerRequest => write!(f, "per-request"),
        }
    }
}
