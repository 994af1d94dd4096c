//! Registry entry for one type
//!
//! A `Dtype` records the physical metadata the runtime needs for a type:
//! its byte size, its dense type code, and the reduction operators it
//! supports together with their runtime ids.
//!
//! ## Invariants
//!
//! - An operator is registered at most once per entry
//! - The reduction table only ever grows
//! - Equality compares identity, size and code; reduction tables are ignored

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use tabula_core::{Error, Result};

use crate::identity::TypeIdentity;
use crate::reduction::{ReductionId, ReductionOp};

/// Physical metadata and reduction table of one registered type
#[derive(Debug, Clone)]
pub struct Dtype {
    identity: TypeIdentity,
    /// Byte size; negative means variable-length
    size_in_bytes: i64,
    code: u32,
    reduction_ops: BTreeMap<ReductionOp, ReductionId>,
}

impl Dtype {
    /// Create an entry with an empty reduction table
    pub fn new(identity: TypeIdentity, size_in_bytes: i64, code: u32) -> Self {
        Self {
            identity,
            size_in_bytes,
            code,
            reduction_ops: BTreeMap::new(),
        }
    }

    /// Registry key of this entry
    pub fn identity(&self) -> &TypeIdentity {
        &self.identity
    }

    /// Byte size (negative for variable-length types)
    pub fn size(&self) -> i64 {
        self.size_in_bytes
    }

    /// Dense type code
    pub fn code(&self) -> u32 {
        self.code
    }

    /// Whether values of this type have no fixed width
    pub fn variable_size(&self) -> bool {
        self.size_in_bytes < 0
    }

    /// Whether `op` is registered for this type
    pub fn supports(&self, op: ReductionOp) -> bool {
        self.reduction_ops.contains_key(&op)
    }

    /// Runtime id registered for `op`
    ///
    /// # Errors
    ///
    /// Returns `UnknownReductionOp` if `op` was never registered.
    pub fn reduction_op_id(&self, op: ReductionOp) -> Result<ReductionId> {
        self.reduction_ops
            .get(&op)
            .copied()
            .ok_or_else(|| Error::UnknownReductionOp {
                op: op.to_string(),
                identity: self.identity.to_string(),
            })
    }

    /// Attach a reduction id for `op`
    ///
    /// # Errors
    ///
    /// Returns `DuplicateReductionOp` if `op` is already registered; the
    /// existing id is left in place.
    pub fn register_reduction_op(&mut self, op: ReductionOp, id: ReductionId) -> Result<()> {
        if self.reduction_ops.contains_key(&op) {
            return Err(Error::DuplicateReductionOp {
                op: op.to_string(),
                identity: self.identity.to_string(),
            });
        }
        self.reduction_ops.insert(op, id);
        Ok(())
    }

    /// Registered operators and ids, in operator order
    pub fn reduction_ops(&self) -> impl Iterator<Item = (ReductionOp, ReductionId)> + '_ {
        self.reduction_ops.iter().map(|(op, id)| (*op, *id))
    }

    /// Number of registered operators
    pub fn num_reduction_ops(&self) -> usize {
        self.reduction_ops.len()
    }

    /// Register every operator of this entry on `other`
    ///
    /// The copy is a snapshot: later registrations on either entry are not
    /// reflected on the other.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateReductionOp` at the first operator `other` already
    /// has. Operators copied before that point stay registered.
    pub fn copy_reduction_ops_to(&self, other: &mut Dtype) -> Result<()> {
        for (op, id) in self.reduction_ops() {
            other.register_reduction_op(op, id)?;
        }
        Ok(())
    }
}

impl PartialEq for Dtype {
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity
            && self.size_in_bytes == other.size_in_bytes
            && self.code == other.code
    }
}

impl Eq for Dtype {}

impl PartialEq<TypeIdentity> for Dtype {
    fn eq(&self, other: &TypeIdentity) -> bool {
        self.identity == *other
    }
}

impl Hash for Dtype {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity.hash(state);
    }
}

impl fmt::Display for Dtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identity)
    }
}
