//! Named collection of equal-length arrays
//!
//! A `Table` pairs an Arrow schema with one array per field. Tables are
//! immutable values: every structural edit (`add_column`, `remove_column`,
//! `set_column`, `rename_columns`, `drop_columns`) validates its arguments,
//! then builds and returns a new table. Untouched columns are shared by
//! reference between the old and the new table.
//!
//! ## Invariants
//!
//! - `schema.fields().len() == columns.len()`, checked before any table is built
//! - A name matching several fields is ambiguous and never resolves
//! - Schema-level metadata survives every edit
//!
//! Columns are assumed to share one length. Edits do not re-check it;
//! [`Table::check_row_counts`] verifies it on demand.

use arrow_schema::{FieldRef, Schema, SchemaRef};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tabula_core::{Error, Result};
use tracing::{debug, warn};

use crate::array::ArrayRef;
use crate::field::{ColumnSelector, FieldSpec};

/// How `Table::from_arrays` should name and type its columns
///
/// Exactly one of `names` or `schema` must be given. `metadata` may only
/// accompany `names`; a supplied schema carries its own.
#[derive(Debug, Clone, Default)]
pub struct TableOptions {
    names: Option<Vec<String>>,
    schema: Option<SchemaRef>,
    metadata: Option<HashMap<String, String>>,
}

impl TableOptions {
    /// Options with nothing set
    pub fn new() -> Self {
        Self::default()
    }

    /// Name the columns; types are taken from the arrays
    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Use a complete schema; its field types must match the arrays
    pub fn with_schema(mut self, schema: impl Into<SchemaRef>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Attach schema-level metadata to the synthesized schema
    pub fn with_metadata(mut self, metadata: HashMap<String, String>) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Immutable table of store-backed columns
#[derive(Debug, Clone)]
pub struct Table {
    schema: SchemaRef,
    columns: Vec<ArrayRef>,
}

impl Table {
    /// Pair a schema with its columns
    ///
    /// # Errors
    ///
    /// Returns `LengthMismatch` if the schema and column counts differ.
    pub fn try_new(schema: SchemaRef, columns: Vec<ArrayRef>) -> Result<Self> {
        if schema.fields().len() != columns.len() {
            return Err(Error::LengthMismatch {
                context: "schema fields vs columns",
                expected: schema.fields().len(),
                actual: columns.len(),
            });
        }
        Ok(Self { schema, columns })
    }

    /// Build a table from arrays plus either names or a schema
    ///
    /// # Errors
    ///
    /// - `ConflictingArguments` if a schema comes with names or metadata
    /// - `MissingArguments` if neither names nor a schema is given
    /// - `LengthMismatch` if names or schema fields don't match the array count
    /// - `TypeMismatch` if a schema field's type differs from its array's type
    pub fn from_arrays(arrays: &[ArrayRef], options: TableOptions) -> Result<Self> {
        let TableOptions {
            names,
            schema,
            metadata,
        } = options;

        let schema = match (schema, names) {
            (Some(_), Some(_)) => {
                return Err(Error::ConflictingArguments {
                    reason: "cannot pass both schema and names",
                })
            }
            (Some(_), None) if metadata.is_some() => {
                return Err(Error::ConflictingArguments {
                    reason: "cannot pass both schema and metadata",
                })
            }
            (None, None) => {
                return Err(Error::MissingArguments {
                    reason: "must pass names or schema when constructing a table",
                })
            }
            (Some(schema), None) => {
                check_schema_matches(&schema, arrays)?;
                schema
            }
            (None, Some(names)) => {
                if names.len() != arrays.len() {
                    return Err(Error::LengthMismatch {
                        context: "names vs arrays",
                        expected: arrays.len(),
                        actual: names.len(),
                    });
                }
                let fields: Vec<FieldRef> = names
                    .into_iter()
                    .zip(arrays)
                    .map(|(name, array)| FieldSpec::Name(name).resolve(array))
                    .collect();
                Arc::new(Schema::new_with_metadata(fields, metadata.unwrap_or_default()))
            }
        };

        Self::try_new(schema, arrays.to_vec())
    }

    /// Schema of the table
    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    /// Number of columns
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows: the length of the first column, 0 without columns
    ///
    /// # Errors
    ///
    /// Propagates the first column's length error.
    pub fn num_rows(&self) -> Result<usize> {
        match self.columns.first() {
            Some(column) => column.len(),
            None => Ok(0),
        }
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> Result<(usize, usize)> {
        Ok((self.num_rows()?, self.num_columns()))
    }

    /// Field names in column order
    pub fn column_names(&self) -> Vec<&str> {
        self.schema.fields().iter().map(|f| f.name().as_str()).collect()
    }

    /// Columns in column order
    pub fn columns(&self) -> &[ArrayRef] {
        &self.columns
    }

    /// Iterate columns in column order
    pub fn iter_columns(&self) -> impl Iterator<Item = &ArrayRef> {
        self.columns.iter()
    }

    /// Position of the single field named `name`
    ///
    /// # Errors
    ///
    /// Returns `ColumnNotFound` for no match and `AmbiguousColumnName` for
    /// more than one.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        let mut matches = self
            .schema
            .fields()
            .iter()
            .enumerate()
            .filter(|(_, f)| f.name() == name)
            .map(|(i, _)| i);

        match (matches.next(), matches.next()) {
            (None, _) => Err(Error::ColumnNotFound {
                name: name.to_string(),
            }),
            (Some(index), None) => Ok(index),
            (Some(_), Some(_)) => Err(Error::AmbiguousColumnName {
                name: name.to_string(),
                count: 2 + matches.count(),
            }),
        }
    }

    fn resolve(&self, selector: ColumnSelector<'_>, operation: &'static str) -> Result<usize> {
        let index = match selector {
            ColumnSelector::Index(index) => index,
            ColumnSelector::Name(name) => self.column_index(name)?,
        };
        self.check_index(index, operation)?;
        Ok(index)
    }

    fn check_index(&self, index: usize, operation: &'static str) -> Result<()> {
        if index >= self.columns.len() {
            return Err(Error::IndexOutOfBounds {
                operation,
                index,
                len: self.columns.len(),
            });
        }
        Ok(())
    }

    /// Column by position or name
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds`, `ColumnNotFound` or `AmbiguousColumnName`.
    pub fn column<'a>(&self, selector: impl Into<ColumnSelector<'a>>) -> Result<&ArrayRef> {
        let index = self.resolve(selector.into(), "column")?;
        Ok(&self.columns[index])
    }

    /// Schema field by position or name
    ///
    /// # Errors
    ///
    /// Same as [`column`](Self::column).
    pub fn field<'a>(&self, selector: impl Into<ColumnSelector<'a>>) -> Result<&FieldRef> {
        let index = self.resolve(selector.into(), "field")?;
        Ok(&self.schema.fields()[index])
    }

    /// New table with `array` inserted at `index`
    ///
    /// `index` may equal `num_columns()` to append. A bare name takes its
    /// type from `array`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if `index > num_columns()`.
    pub fn add_column(
        &self,
        index: usize,
        field: impl Into<FieldSpec>,
        array: ArrayRef,
    ) -> Result<Table> {
        if index > self.columns.len() {
            return Err(Error::IndexOutOfBounds {
                operation: "add_column",
                index,
                len: self.columns.len(),
            });
        }
        let field = field.into().resolve(&array);

        let mut fields: Vec<FieldRef> = self.schema.fields().iter().cloned().collect();
        let mut columns = self.columns.clone();
        fields.insert(index, field);
        columns.insert(index, array);

        debug!(target: "tabula::data", index, num_columns = columns.len(), "Column added");
        Ok(self.rebuild(fields, columns))
    }

    /// New table with `array` appended as the last column
    pub fn append_column(&self, field: impl Into<FieldSpec>, array: ArrayRef) -> Result<Table> {
        self.add_column(self.columns.len(), field, array)
    }

    /// New table without the column at `index`
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if `index >= num_columns()`.
    pub fn remove_column(&self, index: usize) -> Result<Table> {
        self.check_index(index, "remove_column")?;

        let (fields, columns) = self
            .pairs()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, pair)| pair)
            .unzip();

        debug!(target: "tabula::data", index, "Column removed");
        Ok(self.rebuild(fields, columns))
    }

    /// New table without the named columns
    ///
    /// Every name must resolve; a name listed twice is dropped once.
    ///
    /// # Errors
    ///
    /// Returns `ColumnNotFound` or `AmbiguousColumnName` for the first name
    /// that does not resolve to exactly one column.
    pub fn drop_columns<S: AsRef<str>>(&self, names: &[S]) -> Result<Table> {
        let dropped = names
            .iter()
            .map(|name| self.column_index(name.as_ref()))
            .collect::<Result<BTreeSet<usize>>>()?;

        let (fields, columns) = self
            .pairs()
            .enumerate()
            .filter(|(i, _)| !dropped.contains(i))
            .map(|(_, pair)| pair)
            .unzip();

        debug!(target: "tabula::data", dropped = dropped.len(), "Columns dropped");
        Ok(self.rebuild(fields, columns))
    }

    /// New table with the column at `index` replaced by `array`
    ///
    /// A bare name takes its type from `array`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if `index >= num_columns()`.
    pub fn set_column(
        &self,
        index: usize,
        field: impl Into<FieldSpec>,
        array: ArrayRef,
    ) -> Result<Table> {
        self.check_index(index, "set_column")?;
        let field = field.into().resolve(&array);

        let mut fields: Vec<FieldRef> = self.schema.fields().iter().cloned().collect();
        let mut columns = self.columns.clone();
        fields[index] = field;
        columns[index] = array;

        debug!(target: "tabula::data", index, "Column replaced");
        Ok(self.rebuild(fields, columns))
    }

    /// New table with every field renamed positionally
    ///
    /// # Errors
    ///
    /// Returns `LengthMismatch` if `names.len() != num_columns()`.
    pub fn rename_columns<S: AsRef<str>>(&self, names: &[S]) -> Result<Table> {
        if names.len() != self.columns.len() {
            return Err(Error::LengthMismatch {
                context: "names vs columns",
                expected: self.columns.len(),
                actual: names.len(),
            });
        }
        let fields = self
            .schema
            .fields()
            .iter()
            .zip(names)
            .map(|(field, name)| Arc::new(field.as_ref().clone().with_name(name.as_ref())))
            .collect();

        Ok(self.rebuild(fields, self.columns.clone()))
    }

    /// Verify that every column reports the same length
    ///
    /// Returns the shared row count.
    ///
    /// # Errors
    ///
    /// Returns `LengthMismatch` naming the first disagreeing length, or the
    /// first column's length error.
    pub fn check_row_counts(&self) -> Result<usize> {
        let expected = self.num_rows()?;
        for (index, column) in self.columns.iter().enumerate().skip(1) {
            let actual = column.len()?;
            if actual != expected {
                warn!(target: "tabula::data", index, expected, actual, "Column length disagrees with first column");
                return Err(Error::LengthMismatch {
                    context: "column row count",
                    expected,
                    actual,
                });
            }
        }
        Ok(expected)
    }

    fn pairs(&self) -> impl Iterator<Item = (FieldRef, ArrayRef)> + '_ {
        self.schema
            .fields()
            .iter()
            .cloned()
            .zip(self.columns.iter().cloned())
    }

    // Callers keep fields and columns the same length.
    fn rebuild(&self, fields: Vec<FieldRef>, columns: Vec<ArrayRef>) -> Table {
        let schema = Schema::new_with_metadata(fields, self.schema.metadata().clone());
        Table {
            schema: Arc::new(schema),
            columns,
        }
    }
}

fn check_schema_matches(schema: &Schema, arrays: &[ArrayRef]) -> Result<()> {
    if schema.fields().len() != arrays.len() {
        return Err(Error::LengthMismatch {
            context: "schema fields vs arrays",
            expected: schema.fields().len(),
            actual: arrays.len(),
        });
    }
    for (index, (field, array)) in schema.fields().iter().zip(arrays).enumerate() {
        if field.data_type() != array.data_type() {
            return Err(Error::TypeMismatch {
                index,
                expected: field.data_type().to_string(),
                actual: array.data_type().to_string(),
            });
        }
    }
    Ok(())
}
