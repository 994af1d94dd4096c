//! Store-backed arrays and tables for tabula
//!
//! - Store: opaque handle to externally materialized data
//! - Array: typed, possibly nested bundle of store handles
//! - Table: named, schema-described collection of arrays
//! - ExchangeItem / DataExchange: versioned hand-off of columns between libraries
//!
//! Nothing here reads or writes element data. Arrays and tables only
//! arrange handles and describe them; the runtime that owns the handles
//! does the rest.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod array;
pub mod exchange;
pub mod field;
pub mod store;
pub mod table;

#[cfg(test)]
mod testing;

pub use array::{Array, ArrayRef};
pub use exchange::{DataExchange, ExchangeItem, DATA_INTERFACE_VERSION};
pub use field::{ColumnSelector, FieldSpec};
pub use store::{same_store, Store, StoreRef};
pub use table::{Table, TableOptions};
