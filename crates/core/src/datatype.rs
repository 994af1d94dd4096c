//! Arrow layout queries and extension type identity
//!
//! Arrays in tabula are validated against the arity their Arrow type
//! declares: how many child arrays it nests (`num_fields`) and how many
//! physical buffers its columnar layout carries (`num_buffers`). The buffer
//! count follows the Arrow columnar format and always includes the validity
//! slot, even for types whose validity buffer is always absent.
//!
//! ## Buffer counts
//!
//! | Type | Buffers |
//! |------|---------|
//! | Null, Struct, FixedSizeList, RunEndEncoded | 1 |
//! | Boolean, fixed-width, List, LargeList, Map, sparse Union, Dictionary, views | 2 |
//! | Binary, Utf8 (and Large), ListView, LargeListView, dense Union | 3 |

use arrow_schema::{DataType, Field, UnionMode};
use std::collections::HashMap;
use std::fmt;

/// Field metadata key naming an extension type
pub const EXTENSION_NAME_KEY: &str = "ARROW:extension:name";

/// Field metadata key carrying serialized extension parameters
pub const EXTENSION_METADATA_KEY: &str = "ARROW:extension:metadata";

/// Arity queries on an Arrow `DataType`
pub trait DataTypeExt {
    /// Number of child arrays an array of this type nests
    fn num_fields(&self) -> usize;

    /// Number of storage buffers in this type's columnar layout
    fn num_buffers(&self) -> usize;
}

impl DataTypeExt for DataType {
    fn num_fields(&self) -> usize {
        match self {
            DataType::Struct(fields) => fields.len(),
            DataType::Union(fields, _) => fields.iter().count(),
            DataType::List(_)
            | DataType::LargeList(_)
            | DataType::ListView(_)
            | DataType::LargeListView(_)
            | DataType::FixedSizeList(_, _)
            | DataType::Map(_, _) => 1,
            DataType::RunEndEncoded(_, _) => 2,
            _ => 0,
        }
    }

    fn num_buffers(&self) -> usize {
        match self {
            DataType::Null
            | DataType::Struct(_)
            | DataType::FixedSizeList(_, _)
            | DataType::RunEndEncoded(_, _) => 1,
            DataType::Binary
            | DataType::LargeBinary
            | DataType::Utf8
            | DataType::LargeUtf8
            | DataType::ListView(_)
            | DataType::LargeListView(_) => 3,
            DataType::Union(_, UnionMode::Dense) => 3,
            // Validity plus one data, offsets, type-id, index or view buffer
            _ => 2,
        }
    }
}

/// An Arrow extension type: a named logical type over a physical storage type
///
/// Extension identity travels with a `Field` through the
/// `ARROW:extension:name` metadata key; arrays themselves only ever carry
/// the storage type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExtensionType {
    name: String,
    storage: DataType,
}

impl ExtensionType {
    /// Create an extension type
    pub fn new(name: impl Into<String>, storage: DataType) -> Self {
        Self {
            name: name.into(),
            storage,
        }
    }

    /// Single-precision complex number stored as 8 opaque bytes
    pub fn complex64() -> Self {
        Self::new("complex64", DataType::FixedSizeBinary(8))
    }

    /// Double-precision complex number stored as 16 opaque bytes
    pub fn complex128() -> Self {
        Self::new("complex128", DataType::FixedSizeBinary(16))
    }

    /// Extension name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Physical storage type
    pub fn storage_type(&self) -> &DataType {
        &self.storage
    }

    /// Build a nullable field tagged with this extension type
    pub fn to_field(&self, name: impl Into<String>) -> Field {
        let metadata = HashMap::from([
            (EXTENSION_NAME_KEY.to_string(), self.name.clone()),
            (EXTENSION_METADATA_KEY.to_string(), String::new()),
        ]);
        Field::new(name, self.storage.clone(), true).with_metadata(metadata)
    }

    /// Recover the extension type a field is tagged with, if any
    pub fn from_field(field: &Field) -> Option<Self> {
        field
            .metadata()
            .get(EXTENSION_NAME_KEY)
            .map(|name| Self::new(name.clone(), field.data_type().clone()))
    }
}

impl fmt::Display for ExtensionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "extension<{}>", self.name)
    }
}
