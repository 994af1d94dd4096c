//! Built-in type table
//!
//! The core registry is built once per process and cloned into every
//! `TypeSystem` that inherits core types.
//!
//! | Entries | Reduction ops |
//! |---------|---------------|
//! | host `bool`, `Boolean`, signed and unsigned integers | all nine |
//! | `Float16`, `Float32`, `Float64` | ADD SUB MUL DIV MIN MAX |
//! | `complex64`, `complex128` | ADD SUB MUL DIV |
//! | `Utf8` | none |

use arrow_schema::DataType;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tabula_core::{ExtensionType, Result};

use crate::dtype::Dtype;
use crate::identity::TypeIdentity;
use crate::reduction::{ReductionEncoder, ReductionOp};

/// Tag of the host-side boolean scalar type
pub const HOST_BOOL: &str = "bool";

/// Type code of the built-in string type, one past the last numeric code
pub const STRING_TYPE_CODE: u32 = CoreTypeCode::Complex128.as_u32() + 1;

/// Dense discriminants of the built-in value types
///
/// These match the runtime's type enumeration and are the `code` term of
/// the reduction id encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoreTypeCode {
    /// Boolean
    Bool,
    /// 8-bit signed integer
    Int8,
    /// 16-bit signed integer
    Int16,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 8-bit unsigned integer
    UInt8,
    /// 16-bit unsigned integer
    UInt16,
    /// 32-bit unsigned integer
    UInt32,
    /// 64-bit unsigned integer
    UInt64,
    /// Half-precision float
    Float16,
    /// Single-precision float
    Float32,
    /// Double-precision float
    Float64,
    /// Half-precision complex; reserved, no built-in entry uses it
    Complex32,
    /// Single-precision complex
    Complex64,
    /// Double-precision complex
    Complex128,
}

impl CoreTypeCode {
    /// All codes in discriminant order
    pub const ALL: [CoreTypeCode; 15] = [
        CoreTypeCode::Bool,
        CoreTypeCode::Int8,
        CoreTypeCode::Int16,
        CoreTypeCode::Int32,
        CoreTypeCode::Int64,
        CoreTypeCode::UInt8,
        CoreTypeCode::UInt16,
        CoreTypeCode::UInt32,
        CoreTypeCode::UInt64,
        CoreTypeCode::Float16,
        CoreTypeCode::Float32,
        CoreTypeCode::Float64,
        CoreTypeCode::Complex32,
        CoreTypeCode::Complex64,
        CoreTypeCode::Complex128,
    ];

    /// Numeric discriminant
    pub const fn as_u32(self) -> u32 {
        self as u32
    }

    /// Code with a given discriminant
    pub fn from_u32(code: u32) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }
}

fn entry(identity: impl Into<TypeIdentity>, size: i64, code: CoreTypeCode) -> Dtype {
    Dtype::new(identity.into(), size, code.as_u32())
}

fn build_core_dtypes() -> Result<Vec<Dtype>> {
    let mut dtypes = vec![
        entry(TypeIdentity::named(HOST_BOOL), 1, CoreTypeCode::Bool),
        entry(DataType::Boolean, 1, CoreTypeCode::Bool),
        entry(DataType::Int8, 1, CoreTypeCode::Int8),
        entry(DataType::Int16, 2, CoreTypeCode::Int16),
        entry(DataType::Int32, 4, CoreTypeCode::Int32),
        entry(DataType::Int64, 8, CoreTypeCode::Int64),
        entry(DataType::UInt8, 1, CoreTypeCode::UInt8),
        entry(DataType::UInt16, 2, CoreTypeCode::UInt16),
        entry(DataType::UInt32, 4, CoreTypeCode::UInt32),
        entry(DataType::UInt64, 8, CoreTypeCode::UInt64),
        entry(DataType::Float16, 2, CoreTypeCode::Float16),
        entry(DataType::Float32, 4, CoreTypeCode::Float32),
        entry(DataType::Float64, 8, CoreTypeCode::Float64),
        entry(ExtensionType::complex64(), 8, CoreTypeCode::Complex64),
        entry(ExtensionType::complex128(), 16, CoreTypeCode::Complex128),
        Dtype::new(TypeIdentity::from(DataType::Utf8), -1, STRING_TYPE_CODE),
    ];

    let encoder = ReductionEncoder::default();
    let (integral, rest) = dtypes.split_at_mut(10);
    let (floating, rest) = rest.split_at_mut(3);
    let (complex, _string) = rest.split_at_mut(2);

    encoder.register_all(integral.iter_mut(), &ReductionOp::ALL)?;
    encoder.register_all(floating.iter_mut(), &ReductionOp::ARITHMETIC)?;
    encoder.register_all(complex.iter_mut(), &ReductionOp::UNORDERED)?;

    Ok(dtypes)
}

// Every built-in code is below TYPE_CODE_COUNT and each entry starts with
// an empty table, so a failure here is a broken built-in table.
static CORE_DTYPES: Lazy<Vec<Dtype>> =
    Lazy::new(|| build_core_dtypes().expect("built-in reduction registration failed"));

/// The built-in entries, in registration order
pub fn core_dtypes() -> &'static [Dtype] {
    &CORE_DTYPES
}
