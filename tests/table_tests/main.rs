//! Tests for table sessions
//!
//! These tests verify:
//! - Column lookup and strict value typing
//! - Positional select/update through the index cursor
//! - Empty-result handling on empty and fully filtered tables
//! - Whole-row inserts through RowWriter

mod row_writer_tests;
mod session_tests;

use tinydb::{ColumnDef, Config, Database, MemoryDevice};

// =============================================================================
// Helper Functions
// =============================================================================

pub fn setup_db() -> Database<MemoryDevice> {
    Database::in_memory(Config::default()).unwrap()
}

pub fn cols(decls: &[&str]) -> Vec<ColumnDef> {
    decls.iter().map(|d| ColumnDef::parse(d).unwrap()).collect()
}

/// Database with table "P" of (id INT, t FLOAT, nm CHAR6), capacity 5
pub fn people_db() -> Database<MemoryDevice> {
    let mut db = setup_db();
    db.create_table("P", 5, &cols(&["id:INT", "t:FLOAT", "nm:CHAR6"]))
        .unwrap();
    db
}
