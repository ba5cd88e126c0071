//! Session operations on the "P" table

use tinydb::table::PendingAction;
use tinydb::{Config, Database, Predicate, SyncStrategy, TinyDbError, Value};

use crate::{cols, people_db, setup_db};

// =============================================================================
// Lookup & Typing
// =============================================================================

#[test]
fn test_open_unknown_table() {
    let mut db = people_db();

    let err = db.open_table("Q").err().unwrap();
    assert!(matches!(err, TinyDbError::TableNotFound { ref table } if table == "Q"));
    assert!(err.is_lookup_error());
}

#[test]
fn test_unknown_column_everywhere() {
    let mut db = people_db();
    let mut table = db.open_table("P").unwrap();

    assert!(matches!(
        table.insert("zz", 1i16).err().unwrap(),
        TinyDbError::ColumnNotFound { .. }
    ));
    assert!(matches!(
        table.select("zz", 0).unwrap_err(),
        TinyDbError::ColumnNotFound { .. }
    ));
    assert!(matches!(
        table.select_all("zz").unwrap_err(),
        TinyDbError::ColumnNotFound { .. }
    ));
    assert!(matches!(
        table.filter("zz", Predicate::EqualTo, 1i16).err().unwrap(),
        TinyDbError::ColumnNotFound { .. }
    ));
    assert!(matches!(
        table.update("zz", 1i16, 0).err().unwrap(),
        TinyDbError::ColumnNotFound { .. }
    ));
}

#[test]
fn test_insert_type_mismatch_writes_nothing() {
    let mut db = people_db();
    let before = db.device().as_bytes().to_vec();

    {
        let mut table = db.open_table("P").unwrap();
        let err = table.insert("id", 5i32).err().unwrap();
        match err {
            TinyDbError::TypeMismatch {
                column,
                expected,
                found,
            } => {
                assert_eq!(column, "id");
                assert_eq!(expected, "INT");
                assert_eq!(found, "LONG");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        table.finalize().unwrap();
        assert_eq!(table.count(), 0);
    }

    assert_eq!(db.device().as_bytes(), &before[..]);
}

// =============================================================================
// Select & Update
// =============================================================================

#[test]
fn test_select_wraps_past_active_count() {
    let mut db = people_db();
    let mut table = db.open_table("P").unwrap();
    for id in [7i16, 8, 9] {
        table.insert("id", id).unwrap();
        table.finalize().unwrap();
    }

    assert_eq!(table.select("id", 1).unwrap(), Value::Int(8));
    assert_eq!(table.select("id", 4).unwrap(), Value::Int(8));
}

#[test]
fn test_update_in_place_keeps_size() {
    let mut db = people_db();
    let mut table = db.open_table("P").unwrap();
    for id in [1i16, 2, 3] {
        table.insert("id", id).unwrap();
        table.insert("nm", "row").unwrap();
        table.finalize().unwrap();
    }

    table.update("nm", "second", 1).unwrap();
    table.finalize().unwrap();

    assert_eq!(table.size(), 3);
    assert_eq!(table.select("nm", 1).unwrap(), Value::Text("secon".to_string()));
    assert_eq!(table.select("nm", 0).unwrap(), Value::Text("row".to_string()));
}

#[test]
fn test_update_through_filter() {
    let mut db = people_db();
    let mut table = db.open_table("P").unwrap();
    for id in [1i16, 2, 3, 4] {
        table.insert("id", id).unwrap();
        table.finalize().unwrap();
    }

    table.filter("id", Predicate::GreaterOrEqualTo, 3i16).unwrap();
    table.update("id", 30i16, 0).unwrap();
    table.update("id", 40i16, 1).unwrap();
    table.finalize().unwrap();

    let all: Vec<Value> = table.select_all("id").unwrap();
    assert_eq!(
        all,
        vec![Value::Int(1), Value::Int(2), Value::Int(30), Value::Int(40)]
    );
}

// =============================================================================
// Empty Results
// =============================================================================

#[test]
fn test_empty_table() {
    let mut db = people_db();
    let mut table = db.open_table("P").unwrap();

    assert_eq!(table.count(), 0);
    assert!(table.select_all("id").unwrap().is_empty());
    assert!(matches!(
        table.select("id", 0).unwrap_err(),
        TinyDbError::EmptyResult { .. }
    ));
    assert!(matches!(
        table.update("id", 1i16, 0).err().unwrap(),
        TinyDbError::EmptyResult { .. }
    ));
    assert!(matches!(
        table.delete_at(0).err().unwrap(),
        TinyDbError::EmptyResult { .. }
    ));
    assert_eq!(table.delete_all().unwrap(), 0);
}

#[test]
fn test_filter_matching_nothing() {
    let mut db = people_db();
    let mut table = db.open_table("P").unwrap();
    for id in [1i16, 2] {
        table.insert("id", id).unwrap();
        table.finalize().unwrap();
    }

    table.filter("id", Predicate::GreaterThan, 100i16).unwrap();
    assert_eq!(table.count(), 0);
    assert!(matches!(
        table.select("id", 0).unwrap_err(),
        TinyDbError::EmptyResult { .. }
    ));

    table.finalize().unwrap();
    assert_eq!(table.count(), 2);
}

// =============================================================================
// Filters
// =============================================================================

#[test]
fn test_filter_rejects_char_arrays() {
    let mut db = people_db();
    let mut table = db.open_table("P").unwrap();

    let err = table.filter("nm", Predicate::EqualTo, "x").err().unwrap();
    assert!(matches!(err, TinyDbError::UnsupportedFilter { ref column } if column == "nm"));
}

#[test]
fn test_filter_threshold_must_match_column() {
    let mut db = people_db();
    let mut table = db.open_table("P").unwrap();

    let err = table
        .filter("id", Predicate::LessThan, 3.0f32)
        .err()
        .unwrap();
    assert!(matches!(err, TinyDbError::TypeMismatch { .. }));
}

#[test]
fn test_nan_only_passes_not_equal() {
    let mut db = people_db();
    let mut table = db.open_table("P").unwrap();
    for t in [1.0f32, f32::NAN, 2.0] {
        table.insert("t", t).unwrap();
        table.finalize().unwrap();
    }

    table.filter("t", Predicate::NotEqualTo, 1.0f32).unwrap();
    assert_eq!(table.count(), 2);
    table.finalize().unwrap();

    table.filter("t", Predicate::LessOrEqualTo, 5.0f32).unwrap();
    assert_eq!(table.count(), 2);
}

#[test]
fn test_filter_on_char_column() {
    let mut db = setup_db();
    db.create_table("C", 4, &cols(&["c:CHAR"])).unwrap();
    let mut table = db.open_table("C").unwrap();
    for c in [b'a', b'm', b'z'] {
        table.insert("c", Value::Char(c)).unwrap();
        table.finalize().unwrap();
    }

    table.filter("c", Predicate::GreaterThan, Value::Char(b'b')).unwrap();
    assert_eq!(
        table.select_all("c").unwrap(),
        vec![Value::Char(b'm'), Value::Char(b'z')]
    );
}

// =============================================================================
// Session State
// =============================================================================

#[test]
fn test_uncommitted_insert_is_discarded() {
    let mut db = people_db();
    {
        let mut table = db.open_table("P").unwrap();
        table.insert("id", 1i16).unwrap();
        assert_eq!(table.pending_action(), PendingAction::Insert);
    }

    let table = db.open_table("P").unwrap();
    assert_eq!(table.size(), 0);
    assert_eq!(table.count(), 0);
}

#[test]
fn test_write_cursor_follows_size() {
    let mut db = people_db();
    let mut table = db.open_table("P").unwrap();

    for id in 0..5i16 {
        assert_eq!(table.write_cursor(), id as usize);
        table.insert("id", id).unwrap();
        table.finalize().unwrap();
    }
    assert_eq!(table.size(), 5);
    assert_eq!(table.write_cursor(), 0);

    table.insert("id", 5i16).unwrap();
    table.finalize().unwrap();
    assert_eq!(table.size(), 6);
    assert_eq!(table.write_cursor(), 1);
    assert_eq!(table.count(), 5);
    assert_eq!(table.pending_action(), PendingAction::Idle);
}

#[test]
fn test_commit_points() {
    let config = Config::builder()
        .sync_strategy(SyncStrategy::Manual)
        .build();
    let mut db = Database::in_memory(config).unwrap();
    db.create_table("P", 5, &cols(&["id:INT"])).unwrap();
    // init and create
    assert_eq!(db.pending_commits(), 2);

    {
        let mut table = db.open_table("P").unwrap();
        table.insert("id", 1i16).unwrap();
        table.finalize().unwrap();

        // Filtering persists nothing
        table.filter("id", Predicate::EqualTo, 1i16).unwrap();
        table.finalize().unwrap();

        table.update("id", 2i16, 0).unwrap();
        table.finalize().unwrap();

        table.delete_at(0).unwrap();
        table.finalize().unwrap();
    }
    assert_eq!(db.pending_commits(), 5);

    db.sync().unwrap();
    assert_eq!(db.pending_commits(), 0);
}
