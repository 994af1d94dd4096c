//! Type system: identity → registry entry
//!
//! A `TypeSystem` is seeded from the built-in table (or left empty), then
//! extended by libraries at initialization time and read thereafter.
//!
//! ## Invariants
//!
//! - An identity is registered at most once
//! - Lookups on an unregistered identity fail instead of defaulting
//! - Aliases copy their source's reduction table at creation time only

use rustc_hash::FxHashMap;
use std::fmt;
use tabula_core::{Error, Result};
use tracing::debug;

use crate::builtin::core_dtypes;
use crate::dtype::Dtype;
use crate::identity::TypeIdentity;
use crate::reduction::{ReductionId, ReductionOp};

/// Mapping from type identity to registry entry
#[derive(Debug, Clone)]
pub struct TypeSystem {
    types: FxHashMap<TypeIdentity, Dtype>,
}

impl Default for TypeSystem {
    fn default() -> Self {
        Self::new(true)
    }
}

impl TypeSystem {
    /// Create a type system, optionally seeded with the built-in types
    pub fn new(inherit_core_types: bool) -> Self {
        let types = if inherit_core_types {
            core_dtypes()
                .iter()
                .map(|dt| (dt.identity().clone(), dt.clone()))
                .collect()
        } else {
            FxHashMap::default()
        };
        Self { types }
    }

    /// Create a type system with no registered types
    pub fn empty() -> Self {
        Self::new(false)
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether no type is registered
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Whether `identity` is registered
    pub fn contains(&self, identity: &TypeIdentity) -> bool {
        self.types.contains_key(identity)
    }

    /// Entry registered for `identity`
    ///
    /// # Errors
    ///
    /// Returns `UnknownType` if `identity` is not registered.
    pub fn lookup(&self, identity: &TypeIdentity) -> Result<&Dtype> {
        self.types.get(identity).ok_or_else(|| unknown(identity))
    }

    /// Mutable entry registered for `identity`, for attaching reduction ops
    ///
    /// # Errors
    ///
    /// Returns `UnknownType` if `identity` is not registered.
    pub fn lookup_mut(&mut self, identity: &TypeIdentity) -> Result<&mut Dtype> {
        self.types.get_mut(identity).ok_or_else(|| unknown(identity))
    }

    /// Register a new type with an empty reduction table
    ///
    /// # Errors
    ///
    /// Returns `DuplicateType` if `identity` is already registered.
    pub fn add_type(
        &mut self,
        identity: impl Into<TypeIdentity>,
        size_in_bytes: i64,
        code: u32,
    ) -> Result<&mut Dtype> {
        let identity = identity.into();
        self.insert_new(Dtype::new(identity, size_in_bytes, code))
    }

    /// Register `alias` with the size and code of `source`
    ///
    /// With `copy_reduction_ops`, every reduction op registered on `source`
    /// at this moment is registered on the alias as well. Later changes to
    /// either entry do not propagate.
    ///
    /// # Errors
    ///
    /// Returns `UnknownType` if `source` is not registered and
    /// `DuplicateType` if `alias` already is.
    pub fn make_alias(
        &mut self,
        alias: impl Into<TypeIdentity>,
        source: &TypeIdentity,
        copy_reduction_ops: bool,
    ) -> Result<&mut Dtype> {
        let alias = alias.into();
        let src = self.lookup(source)?;
        let mut copy = Dtype::new(alias, src.size(), src.code());
        if copy_reduction_ops {
            src.copy_reduction_ops_to(&mut copy)?;
        }
        debug!(
            target: "tabula::types",
            alias = %copy.identity(),
            source = %source,
            reduction_ops = copy.num_reduction_ops(),
            "Type alias created"
        );
        self.insert_new(copy)
    }

    /// Attach a reduction id to a registered type
    ///
    /// # Errors
    ///
    /// Returns `UnknownType` if `identity` is not registered and
    /// `DuplicateReductionOp` if `op` already is for that type.
    pub fn register_reduction_op(
        &mut self,
        identity: &TypeIdentity,
        op: ReductionOp,
        id: ReductionId,
    ) -> Result<()> {
        self.lookup_mut(identity)?.register_reduction_op(op, id)?;
        debug!(target: "tabula::types", identity = %identity, op = %op, id = id.as_u32(), "Reduction op registered");
        Ok(())
    }

    /// Registered identities, in no particular order
    pub fn identities(&self) -> impl Iterator<Item = &TypeIdentity> {
        self.types.keys()
    }

    /// Registered entries, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &Dtype> {
        self.types.values()
    }

    fn insert_new(&mut self, dtype: Dtype) -> Result<&mut Dtype> {
        use std::collections::hash_map::Entry;

        match self.types.entry(dtype.identity().clone()) {
            Entry::Occupied(occupied) => Err(Error::DuplicateType {
                identity: occupied.key().to_string(),
            }),
            Entry::Vacant(vacant) => {
                debug!(
                    target: "tabula::types",
                    identity = %dtype.identity(),
                    size = dtype.size(),
                    code = dtype.code(),
                    "Type registered"
                );
                Ok(vacant.insert(dtype))
            }
        }
    }
}

fn unknown(identity: &TypeIdentity) -> Error {
    Error::UnknownType {
        identity: identity.to_string(),
    }
}

impl fmt::Display for TypeSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<String> = self.identities().map(|id| id.to_string()).collect();
        names.sort();
        write!(f, "TypeSystem[{}]", names.join(", "))
    }
}
