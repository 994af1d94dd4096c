//! Reduction operators and their dense id encoding
//!
//! A reduction id is a single integer naming an `(operator, type code)`
//! pair. Ids are laid out in one band of `T` consecutive ids per operator,
//! starting at a global base `B`:
//!
//! ```text
//! id = B + op.ordinal() * T + code
//! ```
//!
//! The layout is collision-free as long as `code < T`, and a consumer can
//! decode an id back into its pair with two integer divisions instead of a
//! lookup table.

use serde::{Deserialize, Serialize};
use std::fmt;
use tabula_core::{Error, Result};

use crate::dtype::Dtype;

/// First id of the reduction id space
pub const REDUCTION_ID_BASE: u32 = 1 << 20;

/// Number of distinct built-in type codes (width of one operator band)
pub const TYPE_CODE_COUNT: u32 = 15;

/// A commutative, associative operator usable for parallel aggregation
///
/// ## Invariant
///
/// The ordinal order is part of the id encoding. Reordering variants
/// changes every encoded id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReductionOp {
    /// Sum
    Add,
    /// Difference
    Sub,
    /// Product
    Mul,
    /// Quotient
    Div,
    /// Maximum
    Max,
    /// Minimum
    Min,
    /// Bitwise or logical or
    Or,
    /// Bitwise or logical and
    And,
    /// Bitwise or logical exclusive or
    Xor,
}

impl ReductionOp {
    /// All operators in ordinal order
    pub const ALL: [ReductionOp; 9] = [
        ReductionOp::Add,
        ReductionOp::Sub,
        ReductionOp::Mul,
        ReductionOp::Div,
        ReductionOp::Max,
        ReductionOp::Min,
        ReductionOp::Or,
        ReductionOp::And,
        ReductionOp::Xor,
    ];

    /// Operators meaningful for floating point values
    pub const ARITHMETIC: [ReductionOp; 6] = [
        ReductionOp::Add,
        ReductionOp::Sub,
        ReductionOp::Mul,
        ReductionOp::Div,
        ReductionOp::Min,
        ReductionOp::Max,
    ];

    /// Operators that need no ordering (complex values have none)
    pub const UNORDERED: [ReductionOp; 4] = [
        ReductionOp::Add,
        ReductionOp::Sub,
        ReductionOp::Mul,
        ReductionOp::Div,
    ];

    /// Position of this operator in the id layout
    pub const fn ordinal(self) -> u32 {
        match self {
            ReductionOp::Add => 0,
            ReductionOp::Sub => 1,
            ReductionOp::Mul => 2,
            ReductionOp::Div => 3,
            ReductionOp::Max => 4,
            ReductionOp::Min => 5,
            ReductionOp::Or => 6,
            ReductionOp::And => 7,
            ReductionOp::Xor => 8,
        }
    }

    /// Operator at an ordinal position
    pub fn from_ordinal(ordinal: u32) -> Option<Self> {
        Self::ALL.get(ordinal as usize).copied()
    }

    /// Upper-case operator name
    pub const fn name(self) -> &'static str {
        match self {
            ReductionOp::Add => "ADD",
            ReductionOp::Sub => "SUB",
            ReductionOp::Mul => "MUL",
            ReductionOp::Div => "DIV",
            ReductionOp::Max => "MAX",
            ReductionOp::Min => "MIN",
            ReductionOp::Or => "OR",
            ReductionOp::And => "AND",
            ReductionOp::Xor => "XOR",
        }
    }

    /// Parse from operator name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.name().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for ReductionOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Runtime identifier of a registered reduction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReductionId(u32);

impl ReductionId {
    /// Wrap a raw id
    pub const fn new(id: u32) -> Self {
        ReductionId(id)
    }

    /// Raw id value
    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ReductionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ReductionId {
    fn from(id: u32) -> Self {
        ReductionId(id)
    }
}

/// Computes and decodes dense reduction ids
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReductionEncoder {
    base: u32,
    type_code_count: u32,
}

impl Default for ReductionEncoder {
    fn default() -> Self {
        Self::new(REDUCTION_ID_BASE, TYPE_CODE_COUNT)
    }
}

impl ReductionEncoder {
    /// Create an encoder with an explicit base and band width
    pub const fn new(base: u32, type_code_count: u32) -> Self {
        Self {
            base,
            type_code_count,
        }
    }

    /// First id of the space
    pub const fn base(&self) -> u32 {
        self.base
    }

    /// Width of one operator band
    pub const fn type_code_count(&self) -> u32 {
        self.type_code_count
    }

    /// Id for `(op, code)`, or `None` if `code` falls outside one band
    pub fn encode(&self, op: ReductionOp, code: u32) -> Option<ReductionId> {
        if code >= self.type_code_count {
            return None;
        }
        op.ordinal()
            .checked_mul(self.type_code_count)
            .and_then(|band| band.checked_add(code))
            .and_then(|offset| self.base.checked_add(offset))
            .map(ReductionId)
    }

    /// Recover `(op, code)` from an id produced by [`encode`](Self::encode)
    pub fn decode(&self, id: ReductionId) -> Option<(ReductionOp, u32)> {
        if self.type_code_count == 0 {
            return None;
        }
        let offset = id.as_u32().checked_sub(self.base)?;
        let op = ReductionOp::from_ordinal(offset / self.type_code_count)?;
        Some((op, offset % self.type_code_count))
    }

    /// Encode and register every `(op, entry)` pair
    ///
    /// Stops at the first failure: `TypeCodeOutOfRange` for an entry whose
    /// code cannot be encoded, `DuplicateReductionOp` for a pair that is
    /// already registered.
    pub fn register_all<'a, I>(&self, entries: I, ops: &[ReductionOp]) -> Result<()>
    where
        I: IntoIterator<Item = &'a mut Dtype>,
    {
        for entry in entries {
            for &op in ops {
                let id = self
                    .encode(op, entry.code())
                    .ok_or(Error::TypeCodeOutOfRange {
                        code: entry.code(),
                        limit: self.type_code_count,
                    })?;
                entry.register_reduction_op(op, id)?;
            }
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
