//! create_table validation and accounting

use tinydb::catalog::{MAX_TABLES, NAME_LEN};
use tinydb::{ColumnDef, ColumnType, TinyDbError};

use crate::{cols, setup_db};

// =============================================================================
// Accounting
// =============================================================================

#[test]
fn test_regions_grow_toward_each_other() {
    let mut db = setup_db(256);
    let free = db.free_bytes();

    let t = db.create_table("T", 4, &cols(&["a:LONG", "b:BOOL"])).unwrap();
    let u = db.create_table("U", 2, &cols(&["c:CHAR10"])).unwrap();

    assert_eq!(t.start, 1);
    assert_eq!(t.data_len(), 4 * 5);
    assert_eq!(u.start, 1 + 20);
    assert_eq!(u.base, t.base - t.encoded_len());
    assert_eq!(db.data_end(), 1 + 20 + 20);
    assert_eq!(db.free_bytes(), free - (20 + 16) - (20 + 12));
    assert_eq!(db.table_count(), 2);
}

#[test]
fn test_record_round_trips_through_device() {
    let mut db = setup_db(256);
    let created = db
        .create_table("Tb", 7, &cols(&["a:UINT", "bc:CHAR3", "d:CHAR"]))
        .unwrap();

    let stored = db.table("Tb").unwrap();
    assert_eq!(stored, created);
    assert_eq!(stored.size, 0);
    assert_eq!(stored.capacity, 7);
    assert_eq!(
        stored
            .columns
            .iter()
            .map(|c| c.column_type)
            .collect::<Vec<_>>(),
        vec![ColumnType::UInt, ColumnType::CharArray(3), ColumnType::Char]
    );
}

#[test]
fn test_insufficient_memory_reports_sizes() {
    let mut db = setup_db(64);
    let available = db.free_bytes();

    let err = db.create_table("T", 30, &cols(&["a:INT"])).unwrap_err();
    match err {
        TinyDbError::InsufficientMemory { needed, available: reported } => {
            assert_eq!(needed, 30 * 2 + 12);
            assert_eq!(reported, available);
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(db.table_count(), 0);
}

#[test]
fn test_memory_is_checked_before_existence() {
    let mut db = setup_db(64);
    db.create_table("T", 1, &cols(&["a:INT"])).unwrap();

    let err = db.create_table("T", 200, &cols(&["a:INT"])).unwrap_err();
    assert!(matches!(err, TinyDbError::InsufficientMemory { .. }));
}

// =============================================================================
// Schema Validation
// =============================================================================

#[test]
fn test_name_limits() {
    let mut db = setup_db(256);
    let long = "x".repeat(NAME_LEN + 1);

    for name in ["", long.as_str(), "a\0"] {
        let err = db.create_table(name, 1, &cols(&["a:INT"])).unwrap_err();
        assert!(matches!(err, TinyDbError::InvalidSchema(_)), "name {:?}", name);
    }

    let err = db
        .create_table("T", 1, &[ColumnDef::new(long.as_str(), "INT")])
        .unwrap_err();
    assert!(matches!(err, TinyDbError::InvalidSchema(_)));

    // Names may use the full width
    db.create_table("AB", 1, &cols(&["cd:INT"])).unwrap();
    assert!(db.resolve("AB").is_some());
    assert!(db.resolve("A").is_none());
}

#[test]
fn test_schema_shape_errors() {
    let mut db = setup_db(256);

    let err = db.create_table("T", 0, &cols(&["a:INT"])).unwrap_err();
    assert!(matches!(err, TinyDbError::InvalidSchema(_)));

    let err = db.create_table("T", 1, &[]).unwrap_err();
    assert!(matches!(err, TinyDbError::InvalidSchema(_)));

    let err = db.create_table("T", 1, &cols(&["a:INT", "a:INT"])).unwrap_err();
    assert!(matches!(err, TinyDbError::InvalidSchema(_)));
    assert!(err.is_creation_error());
}

#[test]
fn test_unknown_types() {
    let mut db = setup_db(256);

    for type_name in ["STRING", "int", "CHARx", "CHAR300"] {
        let err = db
            .create_table("T", 1, &[ColumnDef::new("a", type_name)])
            .unwrap_err();
        assert!(
            matches!(err, TinyDbError::UnknownColumnType { type_name: ref t, .. } if t == type_name),
            "type {}",
            type_name
        );
    }
    assert_eq!(db.table_count(), 0);
}

#[test]
fn test_table_count_limit() {
    let mut db = setup_db(8192);

    for i in 0..MAX_TABLES {
        let name = format!("{:02x}", i);
        db.create_table(&name, 1, &cols(&["a:BOOL"])).unwrap();
    }
    assert_eq!(db.table_count(), MAX_TABLES);

    let err = db.create_table("zz", 1, &cols(&["a:BOOL"])).unwrap_err();
    assert!(matches!(err, TinyDbError::InvalidSchema(_)));

    // Every table is still reachable by walking the records
    assert!(db.resolve("00").is_some());
    assert!(db.resolve("fe").is_some());
    assert_eq!(db.tables().unwrap().len(), MAX_TABLES);
}
