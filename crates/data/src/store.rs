//! Storage handle boundary
//!
//! A store is an opaque reference to data allocated and materialized by an
//! external runtime. This crate never dereferences one; it only arranges
//! handles into arrays and tables and asks them for their length.

use std::fmt;
use std::sync::Arc;
use tabula_core::Result;

/// Opaque handle to physically backed data
///
/// Thread safety: handles are shared between arrays and tables on any
/// thread, so implementations must be `Send + Sync`.
pub trait Store: fmt::Debug + Send + Sync {
    /// Number of elements behind this handle
    ///
    /// # Errors
    ///
    /// Returns an error if the backing runtime cannot answer the query.
    fn len(&self) -> Result<usize>;

    /// Whether this handle holds no elements
    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

/// Shared storage handle
pub type StoreRef = Arc<dyn Store>;

/// Whether two optional buffer slots hold the same handle
pub fn same_store(a: &Option<StoreRef>, b: &Option<StoreRef>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}
