//! Table Tests
//!
//! Tests for table construction and copy-producing edits:
//! - Construction from names or a schema
//! - Column lookup by name and position
//! - Edits leave the source table untouched

use crate::common::*;
use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use tabula::{DataType, Error, Field, Schema, Table, TableOptions};

// ============================================================================
// Construction
// ============================================================================

#[test]
fn names_and_arrays_build_schema() {
    let a0 = int32(5);
    let a1 = flat(DataType::Utf8, 5);
    let t = Table::from_arrays(&[a0.clone(), a1.clone()], TableOptions::new().with_names(["x", "y"]))
        .unwrap();

    assert_eq!(t.column_names(), vec!["x", "y"]);
    assert_eq!(t.num_columns(), 2);
    assert!(Arc::ptr_eq(t.column("x").unwrap(), &a0));
    assert!(Arc::ptr_eq(t.column(1).unwrap(), &a1));
    assert_eq!(t.field("y").unwrap().data_type(), &DataType::Utf8);
}

#[test]
fn schema_with_extension_field_is_accepted() {
    let field = tabula::ExtensionType::complex64().to_field("z");
    let schema = Schema::new(vec![field.clone()]);
    let t = Table::from_arrays(
        &[flat(DataType::FixedSizeBinary(8), 2)],
        TableOptions::new().with_schema(schema),
    )
    .unwrap();
    assert_eq!(t.field(0).unwrap().as_ref(), &field);
}

#[test]
fn schema_length_mismatch() {
    let schema = Schema::new(vec![Field::new("a", DataType::Int32, true)]);
    let err = Table::from_arrays(
        &[int32(1), int32(1)],
        TableOptions::new().with_schema(schema),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        Error::LengthMismatch {
            expected: 1,
            actual: 2,
            ..
        }
    ));
}

#[test]
fn metadata_flows_into_schema() {
    let metadata = HashMap::from([("source".to_string(), "sensor".to_string())]);
    let t = Table::from_arrays(
        &[int32(2)],
        TableOptions::new()
            .with_names(["v"])
            .with_metadata(metadata.clone()),
    )
    .unwrap();
    assert_eq!(t.schema().metadata(), &metadata);
    let renamed = t.rename_columns(&["w"]).unwrap();
    assert_eq!(renamed.schema().metadata(), &metadata);
}

// ============================================================================
// Edits
// ============================================================================

#[test]
fn remove_column_keeps_source() {
    let t = int_table(3, 4);
    let t2 = t.remove_column(1).unwrap();

    assert_eq!(t.num_columns(), 3);
    assert_eq!(t2.num_columns(), 2);
    assert!(Arc::ptr_eq(t2.column(0).unwrap(), t.column(0).unwrap()));
    assert!(Arc::ptr_eq(t2.column(1).unwrap(), t.column(2).unwrap()));
}

#[test]
fn drop_is_strict_and_remove_is_bounded() {
    let t = int_table(3, 4);
    assert!(matches!(
        t.drop_columns(&["nonexistent"]).unwrap_err(),
        Error::ColumnNotFound { .. }
    ));
    assert!(matches!(
        t.remove_column(99).unwrap_err(),
        Error::IndexOutOfBounds { index: 99, .. }
    ));
}

#[test]
fn drop_every_column() {
    let t = int_table(2, 4);
    let empty = t.drop_columns(&["c0", "c1"]).unwrap();
    assert_eq!(empty.num_columns(), 0);
    assert_eq!(empty.num_rows().unwrap(), 0);
}

#[test]
fn rename_length_checked_for_all_sizes() {
    let t = int_table(3, 1);
    for n in [0usize, 2, 4] {
        let names: Vec<String> = (0..n).map(|i| format!("n{}", i)).collect();
        let err = t.rename_columns(&names).unwrap_err();
        assert_eq!(
            err,
            Error::LengthMismatch {
                context: "names vs columns",
                expected: 3,
                actual: n,
            }
        );
    }
}

#[test]
fn chained_edits() {
    let t = int_table(2, 3)
        .append_column("label", flat(DataType::Utf8, 3))
        .and_then(|t| t.add_column(0, "id", flat(DataType::Int64, 3)))
        .and_then(|t| t.remove_column(1))
        .and_then(|t| t.rename_columns(&["id", "b", "label"]))
        .unwrap();

    assert_eq!(t.column_names(), vec!["id", "b", "label"]);
    assert_eq!(t.field("id").unwrap().data_type(), &DataType::Int64);
    assert_eq!(t.shape().unwrap(), (3, 3));
    assert_eq!(t.check_row_counts().unwrap(), 3);
}

#[test]
fn ragged_table_detected_on_request() {
    let t = int_table(1, 3).append_column("short", int32(1)).unwrap();
    assert_eq!(t.num_rows().unwrap(), 3);
    assert!(t.check_row_counts().is_err());
}

#[test]
fn derived_tables_from_shared_base() {
    let base = Arc::new(int_table(4, 2));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let base = Arc::clone(&base);
            thread::spawn(move || base.remove_column(i).unwrap())
        })
        .collect();

    for (i, h) in handles.into_iter().enumerate() {
        let t = h.join().unwrap();
        assert_eq!(t.num_columns(), 3);
        assert!(!t.column_names().contains(&format!("c{}", i).as_str()));
    }
    assert_eq!(base.num_columns(), 4);
}
