//! Shared, externally synchronized type system handle
//!
//! `TypeSystem` itself is not safe to extend from several threads at once.
//! `SharedTypeSystem` wraps one instance in a read-write lock so that
//! library initialization takes the single writer slot while lookups after
//! population proceed concurrently.

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;
use tabula_core::Result;

use crate::dtype::Dtype;
use crate::identity::TypeIdentity;
use crate::type_system::TypeSystem;

/// Cloneable handle to one type system per runtime session
#[derive(Debug, Clone, Default)]
pub struct SharedTypeSystem {
    inner: Arc<RwLock<TypeSystem>>,
}

impl SharedTypeSystem {
    /// Share an existing type system
    pub fn new(types: TypeSystem) -> Self {
        Self {
            inner: Arc::new(RwLock::new(types)),
        }
    }

    /// Acquire read access
    pub fn read(&self) -> RwLockReadGuard<'_, TypeSystem> {
        self.inner.read()
    }

    /// Acquire exclusive write access
    pub fn write(&self) -> RwLockWriteGuard<'_, TypeSystem> {
        self.inner.write()
    }

    /// Whether `identity` is registered
    pub fn contains(&self, identity: &TypeIdentity) -> bool {
        self.inner.read().contains(identity)
    }

    /// Copy of the entry registered for `identity`
    ///
    /// # Errors
    ///
    /// Returns `UnknownType` if `identity` is not registered.
    pub fn lookup_cloned(&self, identity: &TypeIdentity) -> Result<Dtype> {
        self.inner.read().lookup(identity).cloned()
    }

    /// Run `f` with exclusive access, e.g. to register a library's types
    pub fn extend<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut TypeSystem) -> Result<T>,
    {
        let mut guard = self.inner.write();
        f(&mut guard)
    }
}

impl From<TypeSystem> for SharedTypeSystem {
    fn from(types: TypeSystem) -> Self {
        Self::new(types)
    }
}
