//! Type System Tests
//!
//! Tests for the registry as a library would use it:
//! - Built-in population and reduction tables
//! - Registration and alias semantics
//! - Shared access across threads

use std::thread;
use tabula::{
    core_dtypes, DataType, Error, ExtensionType, ReductionEncoder, ReductionId, ReductionOp,
    SharedTypeSystem, TypeIdentity, TypeSystem, HOST_BOOL, REDUCTION_ID_BASE, TYPE_CODE_COUNT,
};

// ============================================================================
// Built-ins
// ============================================================================

#[test]
fn default_type_system_holds_builtins() {
    let types = TypeSystem::default();
    assert_eq!(types.len(), core_dtypes().len());
    for dt in core_dtypes() {
        assert!(types.contains(dt.identity()), "missing {}", dt);
    }
}

#[test]
fn empty_type_system_holds_nothing() {
    let types = TypeSystem::new(false);
    assert!(types.is_empty());
    assert!(types
        .lookup(&DataType::Int32.into())
        .unwrap_err()
        .is_not_found());
}

#[test]
fn host_bool_and_boolean_share_reduction_ids() {
    let types = TypeSystem::default();
    let host = types.lookup(&TypeIdentity::named(HOST_BOOL)).unwrap();
    let arrow = types.lookup(&DataType::Boolean.into()).unwrap();
    assert_eq!(host.code(), arrow.code());
    assert_ne!(host, arrow);
    for op in ReductionOp::ALL {
        assert_eq!(
            host.reduction_op_id(op).unwrap(),
            arrow.reduction_op_id(op).unwrap()
        );
    }
}

#[test]
fn string_has_no_reductions_and_variable_size() {
    let types = TypeSystem::default();
    let s = types.lookup(&DataType::Utf8.into()).unwrap();
    assert!(s.variable_size());
    assert_eq!(s.num_reduction_ops(), 0);
    assert!(matches!(
        s.reduction_op_id(ReductionOp::Add).unwrap_err(),
        Error::UnknownReductionOp { .. }
    ));
}

#[test]
fn builtin_ids_follow_encoding() {
    let types = TypeSystem::default();
    let i64_entry = types.lookup(&DataType::Int64.into()).unwrap();
    let expected = REDUCTION_ID_BASE + ReductionOp::Min.ordinal() * TYPE_CODE_COUNT + i64_entry.code();
    assert_eq!(
        i64_entry.reduction_op_id(ReductionOp::Min).unwrap(),
        ReductionId::new(expected)
    );
}

#[test]
fn complex_types_are_extension_types() {
    let types = TypeSystem::default();
    let c128 = types
        .lookup(&ExtensionType::complex128().into())
        .unwrap();
    assert_eq!(c128.size(), 16);
    assert!(c128.supports(ReductionOp::Mul));
    assert!(!c128.supports(ReductionOp::Max));
}

// ============================================================================
// Registration
// ============================================================================

#[test]
fn add_type_then_register_op() {
    let mut types = TypeSystem::default();
    let id = ReductionEncoder::default()
        .encode(ReductionOp::Max, 7)
        .unwrap();
    types.add_type("timestamp", 8, 7).unwrap();
    types
        .register_reduction_op(&TypeIdentity::named("timestamp"), ReductionOp::Max, id)
        .unwrap();

    let entry = types.lookup(&TypeIdentity::named("timestamp")).unwrap();
    assert_eq!(entry.reduction_op_id(ReductionOp::Max).unwrap(), id);
}

#[test]
fn duplicate_registration_fails_and_keeps_original() {
    let mut types = TypeSystem::default();
    let err = types.add_type(DataType::Int32, 99, 3).unwrap_err();
    assert!(err.is_duplicate());
    assert_eq!(types.lookup(&DataType::Int32.into()).unwrap().size(), 4);
}

#[test]
fn register_op_on_unknown_type_fails() {
    let mut types = TypeSystem::empty();
    let err = types
        .register_reduction_op(&"ghost".into(), ReductionOp::Add, ReductionId::new(1))
        .unwrap_err();
    assert!(matches!(err, Error::UnknownType { .. }));
}

#[test]
fn alias_snapshot_does_not_follow_source() {
    let mut types = TypeSystem::default();
    types.add_type("meters", 8, 11).unwrap();
    types
        .register_reduction_op(&"meters".into(), ReductionOp::Add, ReductionId::new(500))
        .unwrap();

    types.make_alias("distance", &"meters".into(), true).unwrap();
    types
        .register_reduction_op(&"meters".into(), ReductionOp::Max, ReductionId::new(501))
        .unwrap();

    let alias = types.lookup(&"distance".into()).unwrap();
    assert!(alias.supports(ReductionOp::Add));
    assert!(!alias.supports(ReductionOp::Max));
}

#[test]
fn alias_without_copy_has_empty_table() {
    let mut types = TypeSystem::default();
    let alias = types
        .make_alias("float", &DataType::Float64.into(), false)
        .unwrap();
    assert_eq!(alias.size(), 8);
    assert_eq!(alias.num_reduction_ops(), 0);
}

#[test]
fn alias_of_unknown_source_fails() {
    let mut types = TypeSystem::default();
    assert!(types
        .make_alias("x", &"missing".into(), true)
        .unwrap_err()
        .is_not_found());
}

// ============================================================================
// Shared access
// ============================================================================

#[test]
fn shared_type_system_serves_concurrent_readers() {
    let shared = SharedTypeSystem::new(TypeSystem::default());
    shared
        .extend(|types| types.add_type("vec3", 12, 11).map(|_| ()))
        .unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let shared = shared.clone();
            thread::spawn(move || {
                let entry = shared.lookup_cloned(&"vec3".into()).unwrap();
                entry.size()
            })
        })
        .collect();

    for h in handles {
        assert_eq!(h.join().unwrap(), 12);
    }
}
