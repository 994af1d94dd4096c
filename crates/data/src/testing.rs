//! Test doubles shared by the unit tests of this crate

use arrow_schema::DataType;
use std::sync::Arc;
use tabula_core::{DataTypeExt, Error, Result};

use crate::array::{Array, ArrayRef};
use crate::store::{Store, StoreRef};

/// Store reporting a fixed length
#[derive(Debug)]
pub struct FixedStore(pub usize);

impl Store for FixedStore {
    fn len(&self) -> Result<usize> {
        Ok(self.0)
    }
}

/// Store whose runtime cannot report a length
#[derive(Debug)]
pub struct DetachedStore;

impl Store for DetachedStore {
    fn len(&self) -> Result<usize> {
        Err(Error::unsupported("length of a detached store"))
    }
}

pub fn store(len: usize) -> StoreRef {
    Arc::new(FixedStore(len))
}

/// Flat array whose every buffer slot holds a store of `len` elements
pub fn flat(dt: DataType, len: usize) -> ArrayRef {
    let stores = (0..dt.num_buffers()).map(|_| Some(store(len))).collect();
    Arc::new(Array::try_new(dt, stores, Vec::new()).unwrap())
}

pub fn int32(len: usize) -> ArrayRef {
    flat(DataType::Int32, len)
}
