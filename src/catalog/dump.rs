//! Diagnostic dump of the catalog
//!
//! A read-only snapshot of the global counters and every table record,
//! rendered for humans through `Display`.

use std::fmt;

use crate::error::Result;
use crate::storage::StorageDevice;

use super::{Catalog, TableRecord};

/// Snapshot of the catalog at one point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogDump {
    pub device_len: usize,
    /// Next free row-data address
    pub data_end: usize,
    /// Base address for the next table record
    pub meta_boundary: usize,
    /// Bytes taken by table records
    pub meta_bytes: usize,
    pub free_bytes: usize,
    pub tables: Vec<TableRecord>,
}

impl CatalogDump {
    /// Read the catalog; fails on a record that does not decode
    pub fn capture<D: StorageDevice>(catalog: &Catalog, device: &D) -> Result<Self> {
        let tables = catalog
            .record_bases(device)
            .into_iter()
            .map(|base| TableRecord::read(device, base))
            .collect::<Result<Vec<_>>>()?;

        let meta_boundary = catalog.meta_boundary(device);

        Ok(Self {
            device_len: catalog.device_len(),
            data_end: catalog.data_end(device),
            meta_boundary,
            meta_bytes: catalog.tables_top().saturating_sub(meta_boundary),
            free_bytes: catalog.free_bytes(device),
            tables,
        })
    }
}

impl fmt::Display for CatalogDump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "====================")?;
        writeln!(f, "device bytes: {}", self.device_len)?;
        writeln!(f, "data end:     {}", self.data_end)?;
        writeln!(f, "meta bytes:   {} (boundary at {})", self.meta_bytes, self.meta_boundary)?;
        writeln!(f, "free bytes:   {}", self.free_bytes)?;
        writeln!(f, "tables:       {}", self.tables.len())?;

        for table in &self.tables {
            writeln!(f, "--------------------")?;
            writeln!(f, "table '{}' (record at {})", table.name, table.base)?;
            writeln!(f, "  start at: {}", table.start)?;
            writeln!(f, "  size:     {}", table.size)?;
            writeln!(f, "  capacity: {}", table.capacity)?;
            writeln!(f, "  columns:  {}", table.columns.len())?;
            for (i, column) in table.columns.iter().enumerate() {
                writeln!(
                    f,
                    "    {}. {} {} ({} bytes)",
                    i + 1,
                    column.name,
                    column.column_type,
                    column.width()
                )?;
            }
        }

        write!(f, "====================")
    }
}
