//! Structural type identity
//!
//! A [`TypeDescriptor`] is the registry's replacement for runtime type
//! reflection: a plain value carrying a fully-qualified type name and an
//! ordered list of type arguments, each either bound to another descriptor
//! or left as an open parameter. Matching and substitution are ordinary
//! value operations, so closing an open generic registration never needs
//! reflective machinery.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// One argument slot of a generic type descriptor
///
/// ## Business Rules
///
/// - `Param` carries the parameter's declared name (`"T"`, `"K"`); two
///   params with the same name in one descriptor refer to the same binding
/// - `Concrete` nests a full descriptor and may itself be open
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeArg {
    /// An unbound type parameter, identified by name
    Param(String),
    /// A bound argument, itself a descriptor
    Concrete(TypeDescriptor),
}

impl TypeArg {
    /// Whether this argument slot is (or contains) an unbound parameter
    pub fn is_open(&self) -> bool {
        match self {
            Self::Param(_) => true,
            Self::Concrete(descriptor) => descriptor.is_open(),
        }
    }
}

impl fmt::Display for TypeArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Param(name) => write!(f, "{name}"),
            Self::Concrete(descriptor) => write!(f, "{descriptor}"),
        }
    }
}

/// Structural identity of a plugin type
///
/// ## Business Rules
///
/// - Equality and hashing are structural: same name, same arguments in the
///   same order
/// - A descriptor is *open* when any argument, at any nesting depth, is an
///   unbound parameter; only closed descriptors are resolvable
/// - The name is treated as opaque and case-sensitive
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeDescriptor {
    name: String,
    args: Vec<TypeArg>,
}

impl TypeDescriptor {
    /// Create a non-generic descriptor from a fully-qualified name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Create a generic descriptor with explicit argument slots
    pub fn generic(name: impl Into<String>, args: Vec<TypeArg>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// Create a descriptor named after a Rust type
    ///
    /// Convenience for callers keying registrations by native types. The
    /// full `std::any::type_name` path becomes the opaque name; argument
    /// structure is not recovered, so use [`TypeDescriptor::generic`] when
    /// open-generic matching matters.
    pub fn of<T: ?Sized>() -> Self {
        Self::new(std::any::type_name::<T>())
    }

    /// Fully-qualified type name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Argument slots, in declaration order
    pub fn args(&self) -> &[TypeArg] {
        &self.args
    }

    /// Number of argument slots
    pub fn arity(&self) -> usize {
        self.args.len()
    }

    /// Whether any argument slot is still an unbound parameter
    pub fn is_open(&self) -> bool {
        self.args.iter().any(TypeArg::is_open)
    }

    /// Match this open descriptor against a closed request
    ///
    /// Returns the parameter bindings that turn `self` into `closed`, or
    /// `None` when the shapes do not line up: different names, different
    /// arity, a parameter bound to two distinct arguments, or a request
    /// that is itself still open.
    pub fn bind_open(&self, closed: &TypeDescriptor) -> Option<TypeBindings> {
        if !self.is_open() || closed.is_open() {
            return None;
        }
        let mut bindings = TypeBindings::new();
        if self.collect_bindings(closed, &mut bindings) {
            Some(bindings)
        } else {
            None
        }
    }

    fn collect_bindings(&self, closed: &TypeDescriptor, out: &mut TypeBindings) -> bool {
        if self.name != closed.name || self.args.len() != closed.args.len() {
            return false;
        }
        for (open_arg, closed_arg) in self.args.iter().zip(&closed.args) {
            match (open_arg, closed_arg) {
                (TypeArg::Param(param), TypeArg::Concrete(bound)) => {
                    match out.get(param) {
                        Some(existing) if existing != bound => return false,
                        Some(_) => {}
                        None => out.insert(param, bound.clone()),
                    }
                }
                (TypeArg::Concrete(open), TypeArg::Concrete(bound)) => {
                    if open.is_open() {
                        if !open.collect_bindings(bound, out) {
                            return false;
                        }
                    } else if open != bound {
                        return false;
                    }
                }
                // A closed request never carries parameters.
                (_, TypeArg::Param(_)) => return false,
            }
        }
        true
    }

    /// Replace bound parameters with their descriptors
    ///
    /// Parameters without a binding are left open, so partial substitution
    /// composes.
    pub fn substitute(&self, bindings: &TypeBindings) -> TypeDescriptor {
        let args = self
            .args
            .iter()
            .map(|arg| match arg {
                TypeArg::Param(param) => bindings
                    .get(param)
                    .map(|descriptor| TypeArg::Concrete(descriptor.clone()))
                    .unwrap_or_else(|| TypeArg::Param(param.clone())),
                TypeArg::Concrete(descriptor) => {
                    TypeArg::Concrete(descriptor.substitute(bindings))
                }
            })
            .collect();
        TypeDescriptor {
            name: self.name.clone(),
            args,
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.args.is_empty() {
            write!(f, "<")?;
            for (index, arg) in self.args.iter().enumerate() {
                if index > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{arg}")?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}

/// Parameter name to descriptor map produced by [`TypeDescriptor::bind_open`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeBindings {
    entries: HashMap<String, TypeDescriptor>,
}

impl TypeBindings {
    /// Create an empty binding set
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a parameter name to a descriptor
    pub fn insert(&mut self, param: impl Into<String>, descriptor: TypeDescriptor) {
        self.entries.insert(param.into(), descriptor);
    }

    /// Descriptor bound to a parameter name, if any
    pub fn get(&self, param: &str) -> Option<&TypeDescriptor> {
        self.entries.get(param)
    }

    /// Number of bound parameters
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no parameters are bound
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
