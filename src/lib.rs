//! Tabula - typed columnar data model with a reduction-aware type registry
//!
//! Tabula describes data that an external runtime owns. It never touches
//! element values; it keeps track of what the values are and how they are
//! arranged:
//!
//! - a [`TypeSystem`] mapping type identities to size, type code and the
//!   reduction operators each type supports
//! - [`Array`]s bundling storage handles under an Arrow type
//! - [`Table`]s naming a list of arrays through an Arrow schema
//! - an exchange payload ([`ExchangeItem`]) for handing columns to another
//!   library
//! - the [`Library`] contract through which components extend a type system
//!
//! # Quick Start
//!
//! ```
//! use tabula::{DataType, ReductionOp, TypeSystem};
//!
//! let types = TypeSystem::default();
//! let float = types.lookup(&DataType::Float64.into()).unwrap();
//! assert_eq!(float.size(), 8);
//! assert!(float.supports(ReductionOp::Max));
//! assert!(!float.supports(ReductionOp::Xor));
//! ```

pub use tabula_core::arrow_schema;
pub use tabula_core::arrow_schema::{DataType, Field, FieldRef, Schema, SchemaRef};
pub use tabula_core::{ArityKind, DataTypeExt, Error, ExtensionType, Result};

pub use tabula_types::{
    core_dtypes, CoreTypeCode, Dtype, ReductionEncoder, ReductionId, ReductionOp,
    SharedTypeSystem, TypeIdentity, TypeSystem, HOST_BOOL, REDUCTION_ID_BASE, STRING_TYPE_CODE,
    TYPE_CODE_COUNT,
};

pub use tabula_data::{
    same_store, Array, ArrayRef, ColumnSelector, DataExchange, ExchangeItem, FieldSpec, Store,
    StoreRef, Table, TableOptions, DATA_INTERFACE_VERSION,
};

pub use tabula_library::{
    destroy_library, initialize_library, library_extension, shared_library_file,
    shared_library_path, Library, ResourceConfig,
};
