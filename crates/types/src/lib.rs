//! Reduction-aware type registry for tabula
//!
//! This crate maps type identities to their physical metadata:
//! - TypeIdentity: registry key (Arrow type, extension type, or named tag)
//! - Dtype: size, type code and reduction-op table of one type
//! - ReductionOp / ReductionEncoder: operator kinds and dense id encoding
//! - TypeSystem: the registry, seeded from the built-in table
//! - SharedTypeSystem: lock-protected handle for session-wide use
//!
//! # Example
//!
//! ```
//! use tabula_types::{ReductionOp, TypeIdentity, TypeSystem};
//! use arrow_schema::DataType;
//!
//! let mut types = TypeSystem::default();
//! let alias = types
//!     .make_alias("float", &TypeIdentity::from(DataType::Float64), true)
//!     .unwrap();
//! assert!(alias.supports(ReductionOp::Max));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builtin;
pub mod dtype;
pub mod identity;
pub mod reduction;
pub mod shared;
pub mod type_system;

pub use builtin::{core_dtypes, CoreTypeCode, HOST_BOOL, STRING_TYPE_CODE};
pub use dtype::Dtype;
pub use identity::TypeIdentity;
pub use reduction::{
    ReductionEncoder, ReductionId, ReductionOp, REDUCTION_ID_BASE, TYPE_CODE_COUNT,
};
pub use shared::SharedTypeSystem;
pub use type_system::TypeSystem;
