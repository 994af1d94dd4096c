//! Error types for tabula
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Every variant describes a usage error detected synchronously at the call
//! that would have produced an invalid structure. None of them are transient,
//! so there is nothing to retry: the caller fixes the call instead.

use std::fmt;
use thiserror::Error;

/// Result type alias for tabula operations
pub type Result<T> = std::result::Result<T, Error>;

/// Which declared arity of a type an array disagreed with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArityKind {
    /// Nested child arrays (`num_fields`)
    Children,
    /// Storage handles (`num_buffers`)
    Stores,
}

impl fmt::Display for ArityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArityKind::Children => write!(f, "children"),
            ArityKind::Stores => write!(f, "stores"),
        }
    }
}

/// Error types for tabula
///
/// # Categories
///
/// | Category | Variants |
/// |----------|----------|
/// | Array structure | `ArityMismatch` |
/// | Type registry | `DuplicateType`, `UnknownType`, `TypeCodeOutOfRange` |
/// | Reduction ops | `DuplicateReductionOp`, `UnknownReductionOp` |
/// | Column resolution | `IndexOutOfBounds`, `ColumnNotFound`, `AmbiguousColumnName` |
/// | Table construction | `LengthMismatch`, `TypeMismatch`, `ConflictingArguments`, `MissingArguments` |
/// | Exchange | `UnsupportedVersion` |
/// | Capabilities | `Unsupported` |
/// | Configuration | `Config` |
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Array child or store count disagrees with its declared type
    #[error("type expects {expected} {kind} but {actual} were passed")]
    ArityMismatch {
        /// Which arity was violated
        kind: ArityKind,
        /// Count declared by the type
        expected: usize,
        /// Count actually supplied
        actual: usize,
    },

    /// Type identity is already registered
    #[error("{identity} is already in this type system")]
    DuplicateType {
        /// Rendered type identity
        identity: String,
    },

    /// Type identity is not registered
    #[error("{identity} is not a valid type in this type system")]
    UnknownType {
        /// Rendered type identity
        identity: String,
    },

    /// Reduction op is already registered for a type
    #[error("reduction op {op} is already registered to type {identity}")]
    DuplicateReductionOp {
        /// Operator name
        op: String,
        /// Rendered type identity
        identity: String,
    },

    /// Reduction op is not registered for a type
    #[error("{op} is not a valid reduction op for type {identity}")]
    UnknownReductionOp {
        /// Operator name
        op: String,
        /// Rendered type identity
        identity: String,
    },

    /// Type code cannot be encoded into a reduction id
    #[error("type code {code} is outside the encodable range 0..{limit}")]
    TypeCodeOutOfRange {
        /// Offending type code
        code: u32,
        /// Number of encodable type codes
        limit: u32,
    },

    /// Positional index outside the valid range
    #[error("index {index} out of bounds in '{operation}' (len {len})")]
    IndexOutOfBounds {
        /// Operation that received the index
        operation: &'static str,
        /// Offending index
        index: usize,
        /// Number of columns at the time of the call
        len: usize,
    },

    /// No column carries the requested name
    #[error("field \"{name}\" does not exist in table schema")]
    ColumnNotFound {
        /// Requested name
        name: String,
    },

    /// More than one column carries the requested name
    #[error("field \"{name}\" exists {count} times in table schema")]
    AmbiguousColumnName {
        /// Requested name
        name: String,
        /// Number of matching columns
        count: usize,
    },

    /// Two sequences that must agree in length do not
    #[error("{context}: expected {expected}, got {actual}")]
    LengthMismatch {
        /// What was being compared
        context: &'static str,
        /// Required length
        expected: usize,
        /// Supplied length
        actual: usize,
    },

    /// Schema field type differs from the array type
    #[error("schema type {expected} and array type {actual} must match at column {index}")]
    TypeMismatch {
        /// Column position
        index: usize,
        /// Type declared by the schema
        expected: String,
        /// Type carried by the array
        actual: String,
    },

    /// Mutually exclusive arguments were both supplied
    #[error("conflicting arguments: {reason}")]
    ConflictingArguments {
        /// Which arguments collided
        reason: &'static str,
    },

    /// Neither of two alternative arguments was supplied
    #[error("missing arguments: {reason}")]
    MissingArguments {
        /// Which arguments are needed
        reason: &'static str,
    },

    /// Exchange payload version not recognized by this consumer
    #[error("unsupported data interface version {version} (supported: {supported})")]
    UnsupportedVersion {
        /// Version found in the payload
        version: u32,
        /// Version this consumer understands
        supported: u32,
    },

    /// Capability not provided by this instance
    #[error("unsupported operation: {operation}")]
    Unsupported {
        /// Description of the missing capability
        operation: String,
    },

    /// Configuration could not be read, parsed or validated
    #[error("configuration error: {reason}")]
    Config {
        /// What went wrong
        reason: String,
    },
}

impl Error {
    /// Build an `Unsupported` error
    pub fn unsupported(operation: impl Into<String>) -> Self {
        Error::Unsupported {
            operation: operation.into(),
        }
    }

    /// Build a `Config` error
    pub fn config(reason: impl Into<String>) -> Self {
        Error::Config {
            reason: reason.into(),
        }
    }

    /// Check if this error reports a failed lookup
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::UnknownType { .. }
                | Error::UnknownReductionOp { .. }
                | Error::ColumnNotFound { .. }
        )
    }

    /// Check if this error reports a repeated registration
    pub fn is_duplicate(&self) -> bool {
        matches!(
            self,
            Error::DuplicateType { .. } | Error::DuplicateReductionOp { .. }
        )
    }
}
