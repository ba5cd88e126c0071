//! Whole-row inserts

use tinydb::{Predicate, TinyDbError, Value};

use crate::people_db;

#[test]
fn test_commit_writes_the_row() {
    let mut db = people_db();
    let mut table = db.open_table("P").unwrap();

    table
        .begin_row()
        .set("id", 1i16)
        .set("t", 36.6f32)
        .set("nm", "ann")
        .commit()
        .unwrap();

    assert_eq!(table.count(), 1);
    assert_eq!(table.select("id", 0).unwrap(), Value::Int(1));
    assert_eq!(table.select("t", 0).unwrap(), Value::Float(36.6));
    assert_eq!(table.select("nm", 0).unwrap(), Value::Text("ann".to_string()));
}

#[test]
fn test_unset_columns_are_zeroed() {
    let mut db = people_db();
    let mut table = db.open_table("P").unwrap();
    for id in 0..5i16 {
        table
            .begin_row()
            .set("id", id)
            .set("t", 1.5f32)
            .set("nm", "full")
            .commit()
            .unwrap();
    }

    // Overwrites the oldest slot, which still holds "full"
    table.begin_row().set("id", 5i16).commit().unwrap();

    assert_eq!(table.select("id", 4).unwrap(), Value::Int(5));
    assert_eq!(table.select("t", 4).unwrap(), Value::Float(0.0));
    assert_eq!(table.select("nm", 4).unwrap(), Value::Text(String::new()));
}

#[test]
fn test_later_set_wins() {
    let mut db = people_db();
    let mut table = db.open_table("P").unwrap();

    table
        .begin_row()
        .set("id", 1i16)
        .set("id", 2i16)
        .commit()
        .unwrap();

    assert_eq!(table.select("id", 0).unwrap(), Value::Int(2));
}

#[test]
fn test_rejected_row_writes_nothing() {
    let mut db = people_db();
    let before = db.device().as_bytes().to_vec();

    {
        let mut table = db.open_table("P").unwrap();

        let err = table
            .begin_row()
            .set("id", 1i16)
            .set("t", 2i16)
            .commit()
            .unwrap_err();
        assert!(matches!(err, TinyDbError::TypeMismatch { ref column, .. } if column == "t"));

        let err = table
            .begin_row()
            .set("id", 1i16)
            .set("xx", 2i16)
            .commit()
            .unwrap_err();
        assert!(matches!(err, TinyDbError::ColumnNotFound { .. }));

        assert_eq!(table.count(), 0);
    }

    assert_eq!(db.device().as_bytes(), &before[..]);
}

#[test]
fn test_dropped_writer_writes_nothing() {
    let mut db = people_db();
    let before = db.device().as_bytes().to_vec();

    {
        let mut table = db.open_table("P").unwrap();
        drop(table.begin_row().set("id", 1i16));
        assert_eq!(table.count(), 0);
    }

    assert_eq!(db.device().as_bytes(), &before[..]);
}

#[test]
fn test_commit_discards_live_filter() {
    let mut db = people_db();
    let mut table = db.open_table("P").unwrap();
    for id in [1i16, 2, 3] {
        table.begin_row().set("id", id).commit().unwrap();
    }

    table.filter("id", Predicate::EqualTo, 2i16).unwrap();
    assert_eq!(table.count(), 1);

    table.begin_row().set("id", 4i16).commit().unwrap();
    assert_eq!(table.count(), 4);
}
