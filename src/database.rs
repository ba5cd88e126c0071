//! Database Module
//!
//! The top-level entry point that owns the device and its catalog.
//!
//! ## Responsibilities
//! - Initialize and clear the device
//! - Validate and create tables, keeping row data and records apart
//! - Resolve table names and hand out table sessions
//! - Push writes to the device according to the sync strategy

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::catalog::{
    encode_name, Catalog, CatalogDump, ColumnMeta, TableRecord, MAX_CAPACITY, MAX_TABLES,
    MIN_DEVICE_LEN, NAME_LEN, START_DATA,
};
use crate::config::{Config, SyncStrategy, MAX_DEVICE_LEN};
use crate::error::{Result, TinyDbError};
use crate::storage::{FileDevice, MemoryDevice, StorageDevice};
use crate::table::TableSession;
use crate::types::{ColumnDef, ColumnType};

/// A table store on one device
///
/// ## Commit Points
/// Every persisted mutation (init, create, finalize after a write, delete,
/// clear) is a commit point. The configured `SyncStrategy` decides at which
/// commit points the device is flushed.
pub struct Database<D: StorageDevice> {
    pub(crate) device: D,
    catalog: Catalog,
    config: Config,
    /// Commit points since the last flush
    pending_commits: usize,
}

impl<D: StorageDevice> Database<D> {
    /// Open a database on `device`, initializing it if it has never been used
    ///
    /// The catalog is laid out for `device.len()`; `config.device_len` only
    /// sizes devices built by `in_memory` and `open_image`.
    pub fn open(device: D, config: Config) -> Result<Self> {
        config.validate()?;

        let len = device.len();
        if !(MIN_DEVICE_LEN..=MAX_DEVICE_LEN).contains(&len) {
            return Err(TinyDbError::Config(format!(
                "device length {} outside {}..={}",
                len, MIN_DEVICE_LEN, MAX_DEVICE_LEN
            )));
        }

        let mut db = Self {
            device,
            catalog: Catalog::new(len),
            config,
            pending_commits: 0,
        };
        db.init()?;

        Ok(db)
    }

    // =========================================================================
    // Device Lifecycle
    // =========================================================================

    /// Write the empty catalog header if the device was never initialized
    ///
    /// Returns whether anything was written.
    pub fn init(&mut self) -> Result<bool> {
        if self.is_initialized() {
            return Ok(false);
        }

        let top = self.catalog.tables_top();
        self.catalog.set_meta_boundary(&mut self.device, top);
        self.catalog.set_data_end(&mut self.device, START_DATA);
        self.catalog.set_table_count(&mut self.device, 0);
        debug!(device_len = self.catalog.device_len(), "device initialized");

        self.commit_point()?;
        Ok(true)
    }

    pub fn is_initialized(&self) -> bool {
        self.catalog.data_end(&self.device) != 0
    }

    /// Zero every byte of the device
    ///
    /// The device is left uninitialized; call `init` before creating tables.
    pub fn clear_all(&mut self) -> Result<()> {
        let len = self.device.len();
        self.device.fill(0, len, 0);
        debug!(len, "device cleared");
        self.commit_point()
    }

    // =========================================================================
    // Catalog Counters
    // =========================================================================

    /// Whether `need` bytes fit between row data and the records
    pub fn is_memory_available(&self, need: usize) -> bool {
        need <= self.free_bytes()
    }

    pub fn free_bytes(&self) -> usize {
        self.catalog.free_bytes(&self.device)
    }

    /// Next free row-data address
    pub fn data_end(&self) -> usize {
        self.catalog.data_end(&self.device)
    }

    /// Base address of the next table record
    pub fn meta_boundary(&self) -> usize {
        self.catalog.meta_boundary(&self.device)
    }

    pub fn table_count(&self) -> usize {
        self.catalog.table_count(&self.device)
    }

    // =========================================================================
    // Tables
    // =========================================================================

    /// Create a table with room for `capacity` rows
    ///
    /// All checks run before the device is touched, so a rejected table
    /// leaves the catalog unchanged.
    pub fn create_table(
        &mut self,
        name: &str,
        capacity: usize,
        columns: &[ColumnDef],
    ) -> Result<TableRecord> {
        self.try_create_table(name, capacity, columns)
            .map_err(|e| {
                warn!(table = name, capacity, error = %e, "create table rejected");
                e
            })
    }

    fn try_create_table(
        &mut self,
        name: &str,
        capacity: usize,
        columns: &[ColumnDef],
    ) -> Result<TableRecord> {
        let columns = validate_schema(name, capacity, columns)?;

        let count = self.table_count();
        if count >= MAX_TABLES {
            return Err(TinyDbError::InvalidSchema(format!(
                "catalog already holds {} tables",
                count
            )));
        }

        let row_width: usize = columns.iter().map(ColumnMeta::width).sum();
        let data_bytes = capacity * row_width;
        let record = TableRecord {
            base: self.meta_boundary(),
            name: name.to_string(),
            start: self.data_end(),
            size: 0,
            capacity: capacity as u8,
            columns,
        };
        let meta_bytes = record.encoded_len();

        let needed = data_bytes + meta_bytes;
        if !self.is_memory_available(needed) {
            return Err(TinyDbError::InsufficientMemory {
                needed,
                available: self.free_bytes(),
            });
        }

        if self.resolve(name).is_some() {
            return Err(TinyDbError::TableAlreadyExists {
                table: name.to_string(),
            });
        }

        record.write(&mut self.device);
        self.catalog
            .set_data_end(&mut self.device, record.start + data_bytes);
        self.catalog
            .set_meta_boundary(&mut self.device, record.base - meta_bytes);
        self.catalog.set_table_count(&mut self.device, count + 1);

        debug!(
            table = name,
            base = record.base,
            start = record.start,
            capacity,
            data_bytes,
            meta_bytes,
            "table created"
        );

        self.commit_point()?;
        Ok(record)
    }

    /// Base address of the record for `name`
    pub fn resolve(&self, name: &str) -> Option<usize> {
        self.catalog.find(&self.device, name)
    }

    /// Catalog record of `name`
    pub fn table(&self, name: &str) -> Result<TableRecord> {
        let base = self.resolve(name).ok_or_else(|| TinyDbError::TableNotFound {
            table: name.to_string(),
        })?;
        TableRecord::read(&self.device, base)
    }

    /// All table records, in creation order
    pub fn tables(&self) -> Result<Vec<TableRecord>> {
        self.catalog
            .record_bases(&self.device)
            .into_iter()
            .map(|base| TableRecord::read(&self.device, base))
            .collect()
    }

    /// Open `name` for row operations
    pub fn open_table(&mut self, name: &str) -> Result<TableSession<'_, D>> {
        let record = self.table(name)?;
        debug!(table = name, size = record.size, "table opened");
        Ok(TableSession::new(self, record))
    }

    // =========================================================================
    // Sync & Diagnostics
    // =========================================================================

    /// Snapshot of the catalog for inspection
    pub fn dump(&self) -> Result<CatalogDump> {
        CatalogDump::capture(&self.catalog, &self.device)
    }

    /// Flush the device now
    pub fn sync(&mut self) -> Result<()> {
        self.device.flush()?;
        self.pending_commits = 0;
        Ok(())
    }

    /// Commit points not yet flushed
    pub fn pending_commits(&self) -> usize {
        self.pending_commits
    }

    pub(crate) fn commit_point(&mut self) -> Result<()> {
        self.pending_commits += 1;
        let strategy = self.config.sync_strategy;
        match strategy {
            SyncStrategy::EveryCommit => self.sync(),
            SyncStrategy::EveryNCommits { count } if self.pending_commits >= count => self.sync(),
            SyncStrategy::EveryNCommits { .. } | SyncStrategy::Manual => Ok(()),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    /// Give up the database, keeping the device
    pub fn into_device(self) -> D {
        self.device
    }
}

impl Database<MemoryDevice> {
    /// Database on a zeroed in-memory device of `config.device_len` bytes
    pub fn in_memory(config: Config) -> Result<Self> {
        config.validate()?;
        let device = MemoryDevice::new(config.device_len);
        Self::open(device, config)
    }
}

impl Database<FileDevice> {
    /// Database on the image file at `config.image_path`
    pub fn open_image(config: Config) -> Result<Self> {
        config.validate()?;
        let device = FileDevice::open(&config.image_path, config.device_len)?;
        Self::open(device, config)
    }
}

/// Check a table declaration and resolve its column types
fn validate_schema(name: &str, capacity: usize, columns: &[ColumnDef]) -> Result<Vec<ColumnMeta>> {
    if capacity > MAX_CAPACITY {
        return Err(TinyDbError::MaxCapacityExceeded {
            requested: capacity,
            max: MAX_CAPACITY,
        });
    }
    if capacity == 0 {
        return Err(TinyDbError::InvalidSchema(
            "capacity must be at least 1".to_string(),
        ));
    }
    if encode_name(name).is_none() {
        return Err(TinyDbError::InvalidSchema(format!(
            "table name '{}' must be 1 to {} bytes without NUL",
            name, NAME_LEN
        )));
    }
    if columns.is_empty() {
        return Err(TinyDbError::InvalidSchema(format!(
            "table '{}' declares no columns",
            name
        )));
    }
    if columns.len() > u8::MAX as usize {
        return Err(TinyDbError::InvalidSchema(format!(
            "table '{}' declares {} columns, at most {} allowed",
            name,
            columns.len(),
            u8::MAX
        )));
    }

    let mut seen = HashSet::with_capacity(columns.len());
    for column in columns {
        if encode_name(&column.name).is_none() {
            return Err(TinyDbError::InvalidSchema(format!(
                "column name '{}' must be 1 to {} bytes without NUL",
                column.name, NAME_LEN
            )));
        }
        if !seen.insert(column.name.as_str()) {
            return Err(TinyDbError::InvalidSchema(format!(
                "duplicate column '{}'",
                column.name
            )));
        }
    }

    columns
        .iter()
        .map(|column| {
            ColumnType::parse(&column.type_name)
                .map(|ty| ColumnMeta::new(column.name.clone(), ty))
                .ok_or_else(|| TinyDbError::UnknownColumnType {
                    column: column.name.clone(),
                    type_name: column.type_name.clone(),
                })
        })
        .collect()
}
