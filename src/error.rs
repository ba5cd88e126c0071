//! Error types for tinydb
//!
//! Provides a unified error type for all operations.
//!
//! The variants fall into the three families a caller has to tell apart:
//! - creation errors, returned by `create_table` before anything is written
//! - lookup errors, for unknown tables and columns
//! - empty results, when an operation addresses a table (or a filtered view)
//!   with no active rows

use thiserror::Error;

/// Result type alias using TinyDbError
pub type Result<T> = std::result::Result<T, TinyDbError>;

/// Unified error type for tinydb operations
#[derive(Debug, Error)]
pub enum TinyDbError {
    // -------------------------------------------------------------------------
    // Creation Errors
    // -------------------------------------------------------------------------
    #[error("Table '{table}' already exists")]
    TableAlreadyExists { table: String },

    #[error("Insufficient memory: need {needed} bytes, {available} available")]
    InsufficientMemory { needed: usize, available: usize },

    #[error("Capacity {requested} exceeds the maximum of {max} rows")]
    MaxCapacityExceeded { requested: usize, max: usize },

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("Unknown type '{type_name}' for column '{column}'")]
    UnknownColumnType { column: String, type_name: String },

    // -------------------------------------------------------------------------
    // Lookup Errors
    // -------------------------------------------------------------------------
    #[error("Table '{table}' not found")]
    TableNotFound { table: String },

    #[error("Column '{column}' not found in table '{table}'")]
    ColumnNotFound { table: String, column: String },

    // -------------------------------------------------------------------------
    // Row Errors
    // -------------------------------------------------------------------------
    #[error("Table '{table}' has no active rows")]
    EmptyResult { table: String },

    #[error("Type mismatch for column '{column}': expected {expected}, got {found}")]
    TypeMismatch {
        column: String,
        expected: String,
        found: String,
    },

    #[error("Column '{column}' holds a character array and cannot be filtered")]
    UnsupportedFilter { column: String },

    // -------------------------------------------------------------------------
    // Image Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image corruption detected: {0}")]
    Corruption(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TinyDbError {
    /// Errors `create_table` reports before touching the device
    pub fn is_creation_error(&self) -> bool {
        matches!(
            self,
            TinyDbError::TableAlreadyExists { .. }
                | TinyDbError::InsufficientMemory { .. }
                | TinyDbError::MaxCapacityExceeded { .. }
                | TinyDbError::InvalidSchema(_)
                | TinyDbError::UnknownColumnType { .. }
        )
    }

    /// Unknown table or column
    pub fn is_lookup_error(&self) -> bool {
        matches!(
            self,
            TinyDbError::TableNotFound { .. } | TinyDbError::ColumnNotFound { .. }
        )
    }
}

impl From<bincode::Error> for TinyDbError {
    fn from(err: bincode::Error) -> Self {
        TinyDbError::Serialization(err.to_string())
    }
}
