//! Typed, possibly nested bundle of storage handles
//!
//! An `Array` pairs an Arrow type with the storage handles of its own
//! buffers and the child arrays its type nests. It is validated once, at
//! construction, and never changes afterwards.
//!
//! ## Flatten order
//!
//! [`Array::stores`] lists this array's own handles first, then each
//! child's flattened handles in field order, depth first. Callers build
//! positional mappings from physical storage back to logical structure with
//! this exact order, so it must never change.

use arrow_schema::DataType;
use std::sync::Arc;
use tabula_core::{ArityKind, DataTypeExt, Error, Result};

use crate::store::StoreRef;

/// Shared array
pub type ArrayRef = Arc<Array>;

/// Immutable typed view over storage handles
#[derive(Debug, Clone)]
pub struct Array {
    data_type: DataType,
    /// One slot per buffer of the type; `None` marks an absent buffer
    buffers: Vec<Option<StoreRef>>,
    children: Vec<ArrayRef>,
}

impl Array {
    /// Build an array, checking arity against `data_type`
    ///
    /// # Errors
    ///
    /// Returns `ArityMismatch` if `children.len() != data_type.num_fields()`
    /// or `buffers.len() != data_type.num_buffers()`. Absent buffers are not
    /// an error.
    pub fn try_new(
        data_type: DataType,
        buffers: Vec<Option<StoreRef>>,
        children: Vec<ArrayRef>,
    ) -> Result<Self> {
        let expected = data_type.num_fields();
        if children.len() != expected {
            return Err(Error::ArityMismatch {
                kind: ArityKind::Children,
                expected,
                actual: children.len(),
            });
        }
        let expected = data_type.num_buffers();
        if buffers.len() != expected {
            return Err(Error::ArityMismatch {
                kind: ArityKind::Stores,
                expected,
                actual: buffers.len(),
            });
        }
        Ok(Self {
            data_type,
            buffers,
            children,
        })
    }

    /// Build an array from borrowed slices
    ///
    /// Equivalent to [`try_new`](Self::try_new); the slices are copied, so
    /// the caller keeps ownership of its sequences.
    pub fn from_stores(
        data_type: &DataType,
        buffers: &[Option<StoreRef>],
        children: &[ArrayRef],
    ) -> Result<Self> {
        Self::try_new(data_type.clone(), buffers.to_vec(), children.to_vec())
    }

    /// Declared type
    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }

    /// This array's own buffer slots, without children
    pub fn buffers(&self) -> &[Option<StoreRef>] {
        &self.buffers
    }

    /// Nested child arrays, in field order
    pub fn children(&self) -> &[ArrayRef] {
        &self.children
    }

    /// Child at field position `i`
    pub fn child(&self, i: usize) -> Option<&ArrayRef> {
        self.children.get(i)
    }

    /// Every buffer slot of this array and its descendants, in flatten order
    pub fn stores(&self) -> Vec<Option<StoreRef>> {
        let mut out = Vec::with_capacity(self.num_stores());
        self.collect_stores(&mut out);
        out
    }

    fn collect_stores(&self, out: &mut Vec<Option<StoreRef>>) {
        out.extend(self.buffers.iter().cloned());
        for child in &self.children {
            child.collect_stores(out);
        }
    }

    /// Number of slots [`stores`](Self::stores) returns
    pub fn num_stores(&self) -> usize {
        self.buffers.len() + self.children.iter().map(|c| c.num_stores()).sum::<usize>()
    }

    /// Logical length, as reported by the backing storage
    ///
    /// The first present handle in flatten order answers. Every buffer of
    /// an array spans its full logical extent, so any own handle will do;
    /// children answer only when every own slot is absent.
    ///
    /// # Errors
    ///
    /// Returns `Unsupported` when no slot anywhere holds a handle: an
    /// unbacked array has no length, and it is never reported as empty.
    pub fn len(&self) -> Result<usize> {
        match self.first_store() {
            Some(store) => store.len(),
            None => Err(Error::unsupported(format!(
                "length of an unbacked {} array",
                self.data_type
            ))),
        }
    }

    /// Whether the backing storage holds no elements
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    fn first_store(&self) -> Option<&StoreRef> {
        self.buffers
            .iter()
            .flatten()
            .next()
            .or_else(|| self.children.iter().find_map(|c| c.first_store()))
    }
}
