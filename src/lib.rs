//! # tinydb
//!
//! A tiny table store for EEPROM-class persistent memory:
//! - Typed, fixed-width columns declared at creation time
//! - Ring-buffer tables that overwrite their oldest row once full
//! - Filter, select, update and delete through a per-table session
//! - A catalog that shares one device with the row data it describes
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Database<D>                            │
//! │           (create_table, open_table, init, dump)             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌──────────────┐
//!   │   Catalog   │          │ TableSession │
//!   │  (records)  │          │ (IndexCursor)│
//!   └──────┬──────┘          └──────┬───────┘
//!          │                        │
//!          └────────────┬───────────┘
//!                       ▼
//!               ┌───────────────┐
//!               │ StorageDevice │
//!               │ (Memory/File) │
//!               └───────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use tinydb::{ColumnDef, Config, Database, Value};
//!
//! let mut db = Database::in_memory(Config::default())?;
//! db.create_table("T", 3, &[ColumnDef::new("a", "INT"), ColumnDef::new("b", "CHAR5")])?;
//!
//! let mut table = db.open_table("T")?;
//! table.begin_row().set("a", 7i16).set("b", "hi").commit()?;
//! assert_eq!(table.select("a", 0)?, Value::Int(7));
//! # Ok::<(), tinydb::TinyDbError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod storage;
pub mod types;
pub mod catalog;
pub mod table;
pub mod database;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, TinyDbError};
pub use config::{Config, SyncStrategy};
pub use database::Database;
pub use storage::{FileDevice, MemoryDevice, StorageDevice};
pub use table::{Predicate, RowWriter, TableSession};
pub use types::{ColumnDef, ColumnType, Value};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of tinydb
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
