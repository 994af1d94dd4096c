//! Shared test utilities for the integration suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tabula::{Array, ArrayRef, DataType, DataTypeExt, Result, Store, StoreRef, Table, TableOptions};

// ============================================================================
// Stores
// ============================================================================

/// Store with a fixed length that counts how often it was asked
#[derive(Debug, Default)]
pub struct CountingStore {
    pub len: usize,
    pub queries: AtomicUsize,
}

impl CountingStore {
    pub fn new(len: usize) -> Arc<Self> {
        Arc::new(Self {
            len,
            queries: AtomicUsize::new(0),
        })
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl Store for CountingStore {
    fn len(&self) -> Result<usize> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        Ok(self.len)
    }
}

pub fn store(len: usize) -> StoreRef {
    CountingStore::new(len)
}

// ============================================================================
// Arrays and tables
// ============================================================================

/// Flat array with every buffer slot backed by a store of `len` elements
pub fn flat(data_type: DataType, len: usize) -> ArrayRef {
    let stores = (0..data_type.num_buffers())
        .map(|_| Some(store(len)))
        .collect();
    Arc::new(Array::try_new(data_type, stores, Vec::new()).unwrap())
}

pub fn int32(len: usize) -> ArrayRef {
    flat(DataType::Int32, len)
}

/// Table of `n` int32 columns named `c0..cn`, each `rows` long
pub fn int_table(n: usize, rows: usize) -> Table {
    let arrays: Vec<ArrayRef> = (0..n).map(|_| int32(rows)).collect();
    let names: Vec<String> = (0..n).map(|i| format!("c{}", i)).collect();
    Table::from_arrays(&arrays, TableOptions::new().with_names(names)).unwrap()
}
