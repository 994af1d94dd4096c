//! Core types for tabula
//!
//! This crate defines the foundations shared by every other tabula crate:
//! - Error: the error taxonomy and `Result` alias
//! - DataTypeExt: arity queries (`num_fields`, `num_buffers`) on Arrow types
//! - ExtensionType: named extension types (complex64, complex128, custom)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod datatype;
pub mod error;

pub use datatype::{DataTypeExt, ExtensionType, EXTENSION_METADATA_KEY, EXTENSION_NAME_KEY};
pub use error::{ArityKind, Error, Result};

// The schema model is part of the public API of every crate above this one
pub use arrow_schema;
