//! Versioned column exchange
//!
//! Any value that can present itself as an ordered list of
//! `(field, array)` pairs can be handed to another library without either
//! side knowing the other's concrete types. The payload is tagged with
//! [`DATA_INTERFACE_VERSION`]; receivers refuse payloads of any other
//! version.

use arrow_schema::{Field, FieldRef, Schema};
use std::sync::Arc;
use tabula_core::{Error, Result};
use tracing::debug;

use crate::array::ArrayRef;
use crate::table::Table;

/// Version of the exchange payload layout
pub const DATA_INTERFACE_VERSION: u32 = 1;

/// Exchange payload: ordered `(field, array)` pairs
///
/// Order matches the exporter's column order. Fields need not be unique.
#[derive(Debug, Clone)]
pub struct ExchangeItem {
    /// Payload layout version
    pub version: u32,
    /// Columns in exporter order
    pub data: Vec<(FieldRef, ArrayRef)>,
}

impl ExchangeItem {
    /// Payload at the current version
    pub fn new(data: Vec<(FieldRef, ArrayRef)>) -> Self {
        Self {
            version: DATA_INTERFACE_VERSION,
            data,
        }
    }

    /// Fail unless this payload uses the current version
    pub fn check_version(&self) -> Result<()> {
        if self.version != DATA_INTERFACE_VERSION {
            return Err(Error::UnsupportedVersion {
                version: self.version,
                supported: DATA_INTERFACE_VERSION,
            });
        }
        Ok(())
    }

    /// First array whose field equals `field`
    pub fn get(&self, field: &Field) -> Option<&ArrayRef> {
        self.data
            .iter()
            .find(|(f, _)| f.as_ref() == field)
            .map(|(_, array)| array)
    }

    /// First array whose field is named `name`
    pub fn get_by_name(&self, name: &str) -> Option<&ArrayRef> {
        self.data
            .iter()
            .find(|(f, _)| f.name() == name)
            .map(|(_, array)| array)
    }

    /// Fields in exporter order
    pub fn fields(&self) -> impl Iterator<Item = &FieldRef> {
        self.data.iter().map(|(field, _)| field)
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the payload carries no columns
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Something that can export its columns for exchange
pub trait DataExchange {
    /// Snapshot of this value's columns
    fn export(&self) -> ExchangeItem;
}

impl DataExchange for Table {
    fn export(&self) -> ExchangeItem {
        let data = self
            .schema()
            .fields()
            .iter()
            .cloned()
            .zip(self.columns().iter().cloned())
            .collect();
        ExchangeItem::new(data)
    }
}

impl Table {
    /// Rebuild a table from an exchange payload
    ///
    /// Schema-level metadata does not travel through the payload.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedVersion` for a payload of another version.
    pub fn from_exchange(item: &ExchangeItem) -> Result<Table> {
        item.check_version()?;
        let (fields, columns): (Vec<FieldRef>, Vec<ArrayRef>) = item.data.iter().cloned().unzip();
        debug!(target: "tabula::data", columns = columns.len(), "Table imported");
        Table::try_new(Arc::new(Schema::new(fields)), columns)
    }
}
