//! Tests for the catalog and table management
//!
//! These tests verify:
//! - Device initialization and clearing
//! - create_table validation and region accounting
//! - Record lookup across many tables
//! - The diagnostic dump

mod create_tests;

use tinydb::{ColumnDef, Config, Database, MemoryDevice};

// =============================================================================
// Helper Functions
// =============================================================================

pub fn setup_db(device_len: usize) -> Database<MemoryDevice> {
    Database::open(MemoryDevice::new(device_len), Config::default()).unwrap()
}

pub fn cols(decls: &[&str]) -> Vec<ColumnDef> {
    decls.iter().map(|d| ColumnDef::parse(d).unwrap()).collect()
}
