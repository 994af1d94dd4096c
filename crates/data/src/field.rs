//! Column designators
//!
//! Edits on a `Table` take either a full Arrow `Field` or a bare name; a
//! bare name borrows its type from the array it is paired with. Lookups
//! take either a position or a name.

use arrow_schema::{Field, FieldRef};
use std::sync::Arc;

use crate::array::Array;

/// A column's field, given in full or by name only
#[derive(Debug, Clone, PartialEq)]
pub enum FieldSpec {
    /// Name only; type comes from the array, nullable
    Name(String),
    /// Complete field
    Field(FieldRef),
}

impl FieldSpec {
    /// Resolve into a field describing `array`
    pub fn resolve(self, array: &Array) -> FieldRef {
        match self {
            FieldSpec::Name(name) => Arc::new(Field::new(name, array.data_type().clone(), true)),
            FieldSpec::Field(field) => field,
        }
    }
}

impl From<&str> for FieldSpec {
    fn from(name: &str) -> Self {
        FieldSpec::Name(name.to_string())
    }
}

impl From<String> for FieldSpec {
    fn from(name: String) -> Self {
        FieldSpec::Name(name)
    }
}

impl From<Field> for FieldSpec {
    fn from(field: Field) -> Self {
        FieldSpec::Field(Arc::new(field))
    }
}

impl From<FieldRef> for FieldSpec {
    fn from(field: FieldRef) -> Self {
        FieldSpec::Field(field)
    }
}

/// Column position or name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSelector<'a> {
    /// Zero-based position
    Index(usize),
    /// Exact field name
    Name(&'a str),
}

impl From<usize> for ColumnSelector<'_> {
    fn from(index: usize) -> Self {
        ColumnSelector::Index(index)
    }
}

impl<'a> From<&'a str> for ColumnSelector<'a> {
    fn from(name: &'a str) -> Self {
        ColumnSelector::Name(name)
    }
}

impl<'a> From<&'a String> for ColumnSelector<'a> {
    fn from(name: &'a String) -> Self {
        ColumnSelector::Name(name)
    }
}
