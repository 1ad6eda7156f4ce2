//! Error types for the Plugboard registry
//!
//! One enum covers both layers. Negative lookups are never errors: a missing
//! family or instance comes back as `false`, `None` or an empty collection.
//! The only failure the registry core itself produces is module construction;
//! the remaining variants exist for port implementors (disposables, module
//! constructors) to report through.

/// Result type alias for Plugboard operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Plugboard registry
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A configuration module could not be constructed for a registered kind
    #[error("Module construction failed for kind '{kind}'")]
    ModuleConstruction {
        /// Module kind identifier that failed to construct
        kind: String,
        /// Underlying cause reported by the module constructor
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// No constructor registered for the requested module kind
    #[error("Unknown module kind '{kind}'. Available kinds: {available}")]
    UnknownModuleKind {
        /// Requested module kind identifier
        kind: String,
        /// Comma-separated list of registered kinds
        available: String,
    },

    /// A disposable resource failed to release
    #[error("Disposal failed for '{entity}': {message}")]
    Disposal {
        /// Name of the entity that failed to dispose
        entity: String,
        /// Error message
        message: String,
        /// Optional underlying cause
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal error
    #[error("Internal error: {message}")]
    Internal {
        /// Error message
        message: String,
    },
}

impl Error {
    /// Create a module construction error with its underlying cause
    pub fn module_construction(
        kind: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::ModuleConstruction {
            kind: kind.into(),
            source: source.into(),
        }
    }

    /// Create an unknown-module-kind error listing the registered kinds
    pub fn unknown_module_kind(kind: impl Into<String>, available: &[&str]) -> Self {
        Self::UnknownModuleKind {
            kind: kind.into(),
            available: available.join(", "),
        }
    }

    /// Create a disposal error
    pub fn disposal(entity: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Disposal {
            entity: entity.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a disposal error with an underlying cause
    pub fn disposal_with_source(
        entity: impl Into<String>,
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Disposal {
            entity: entity.into(),
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<&str> for Error {
    fn from(message: &str) -> Self {
        Self::internal(message)
    }
}

impl From<String> for Error {
    fn from(message: String) -> Self {
        Self::internal(message)
    }
}
