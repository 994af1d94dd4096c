//! Type identity: the key under which a type is registered
//!
//! An identity is either an Arrow logical type, an Arrow extension type, or
//! an opaque named tag. Named tags cover host-side scalar types (the core
//! registry keys the host boolean as `"bool"` next to Arrow `Boolean`) and
//! custom types that a library introduces without an Arrow counterpart.

use arrow_schema::{DataType, Field};
use std::fmt;
use tabula_core::ExtensionType;

/// Hashable registry key for a type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeIdentity {
    /// Arrow logical type
    Arrow(DataType),
    /// Arrow extension type
    Extension(ExtensionType),
    /// Opaque host or library tag
    Named(String),
}

impl TypeIdentity {
    /// Create a named identity
    pub fn named(tag: impl Into<String>) -> Self {
        TypeIdentity::Named(tag.into())
    }

    /// Identity a field's values are registered under
    ///
    /// Extension-tagged fields resolve to their extension type, every other
    /// field to its Arrow type.
    pub fn of_field(field: &Field) -> Self {
        match ExtensionType::from_field(field) {
            Some(ext) => TypeIdentity::Extension(ext),
            None => TypeIdentity::Arrow(field.data_type().clone()),
        }
    }

    /// Physical Arrow type backing values of this identity, if any
    pub fn storage_type(&self) -> Option<&DataType> {
        match self {
            TypeIdentity::Arrow(dt) => Some(dt),
            TypeIdentity::Extension(ext) => Some(ext.storage_type()),
            TypeIdentity::Named(_) => None,
        }
    }
}

impl From<DataType> for TypeIdentity {
    fn from(dt: DataType) -> Self {
        TypeIdentity::Arrow(dt)
    }
}

impl From<ExtensionType> for TypeIdentity {
    fn from(ext: ExtensionType) -> Self {
        TypeIdentity::Extension(ext)
    }
}

impl From<&str> for TypeIdentity {
    fn from(tag: &str) -> Self {
        TypeIdentity::Named(tag.to_string())
    }
}

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeIdentity::Arrow(dt) => write!(f, "{dt}"),
            TypeIdentity::Extension(ext) => write!(f, "{ext}"),
            TypeIdentity::Named(tag) => write!(f, "{tag}"),
        }
    }
}
