//! Catalog Module
//!
//! Database-wide bookkeeping stored at the top of the device.
//!
//! ## Responsibilities
//! - Global counters: data bytes allocated, metadata boundary, table count
//! - One record per table describing its name, storage and columns
//! - Name lookup by walking the records from the top of the device down
//!
//! ## Device Layout (length N)
//! ```text
//!  0     1                 data_end        meta_boundary       N-7   N-6   N-1
//!  ┌─────┬─────────────────┬───────────────┬───────────────────┬─────┬─────┐
//!  │ rsv │ row data  ───►  │     free      │  ◄───  records    │ hdr │ rsv │
//!  └─────┴─────────────────┴───────────────┴───────────────────┴─────┴─────┘
//! ```
//!
//! Row data grows upward from address 1; `data_end` (the persisted
//! "total data bytes" counter) is the next free data address. Records grow
//! downward from `N-7`; `meta_boundary` is the base address of the next
//! record. The two never cross because every allocation first checks
//! `need <= meta_boundary - data_end`.
//!
//! ## Global Header
//! ```text
//! ┌────────────┬────────────────────┬──────────────────┬──────────┐
//! │ N-6        │ N-5 ..= N-4        │ N-3 ..= N-2      │ N-1      │
//! │ table count│ meta boundary (u16)│ data end (u16)   │ reserved │
//! └────────────┴────────────────────┴──────────────────┴──────────┘
//! ```
//!
//! ## Table Record (base address B, fields at decreasing addresses)
//! ```text
//! B, B-1      name (NAME_LEN bytes, zero padded)
//! B-3..=B-2   start of row data (u16)
//! B-5..=B-4   size counter (u16)
//! B-6         capacity
//! B-7         column count
//! B-8 - 4j    column j: name at C, C-1; reserved C-2; type code C-3
//! ```

mod dump;
mod header;
mod record;

pub use dump::CatalogDump;
pub use header::Catalog;
pub use record::{decode_name, encode_name, ColumnMeta, TableRecord};

/// Bytes in a table or column name
pub const NAME_LEN: usize = 2;

/// First address available for row data; also the empty-data sentinel
pub const START_DATA: usize = 1;

/// Fixed bytes of a table record before its column descriptors
pub const RECORD_HEADER_LEN: usize = NAME_LEN + 6;

/// Bytes per column descriptor
pub const COLUMN_SLOT_LEN: usize = NAME_LEN + 2;

/// Bytes at the top of the device taken by the global header and end marker
pub const GLOBAL_HEADER_LEN: usize = 6;

/// Maximum rows per table
pub const MAX_CAPACITY: usize = u8::MAX as usize;

/// Maximum tables in one catalog
pub const MAX_TABLES: usize = u8::MAX as usize;

/// Smallest device that can hold one single-row table of one BYTE column
pub const MIN_DEVICE_LEN: usize =
    START_DATA + 1 + RECORD_HEADER_LEN + COLUMN_SLOT_LEN + GLOBAL_HEADER_LEN + 1;
