//! Global catalog counters
//!
//! Addresses of the counters are derived from the device length, so a
//! `Catalog` is just the arithmetic; the values live on the device.

use tracing::warn;

use crate::storage::StorageDevice;

use super::{record, GLOBAL_HEADER_LEN, NAME_LEN, RECORD_HEADER_LEN};

/// Address map of the catalog for a device of a given length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Catalog {
    device_len: usize,
}

impl Catalog {
    pub fn new(device_len: usize) -> Self {
        Self { device_len }
    }

    pub fn device_len(&self) -> usize {
        self.device_len
    }

    // =========================================================================
    // Header Addresses
    // =========================================================================

    fn data_end_addr(&self) -> usize {
        self.device_len - 3
    }

    fn meta_boundary_addr(&self) -> usize {
        self.device_len - 5
    }

    fn table_count_addr(&self) -> usize {
        self.device_len - GLOBAL_HEADER_LEN
    }

    /// Base address of the first table record
    pub fn tables_top(&self) -> usize {
        self.device_len - GLOBAL_HEADER_LEN - 1
    }

    // =========================================================================
    // Counters
    // =========================================================================

    /// Next free row-data address (the "total data bytes" counter)
    pub fn data_end<D: StorageDevice>(&self, device: &D) -> usize {
        device.read_u16(self.data_end_addr()) as usize
    }

    pub fn set_data_end<D: StorageDevice>(&self, device: &mut D, value: usize) {
        device.write_u16(self.data_end_addr(), value as u16);
    }

    /// Base address for the next table record
    pub fn meta_boundary<D: StorageDevice>(&self, device: &D) -> usize {
        device.read_u16(self.meta_boundary_addr()) as usize
    }

    pub fn set_meta_boundary<D: StorageDevice>(&self, device: &mut D, value: usize) {
        device.write_u16(self.meta_boundary_addr(), value as u16);
    }

    pub fn table_count<D: StorageDevice>(&self, device: &D) -> usize {
        device.read_byte(self.table_count_addr()) as usize
    }

    pub fn set_table_count<D: StorageDevice>(&self, device: &mut D, value: usize) {
        device.write_byte(self.table_count_addr(), value as u8);
    }

    /// Bytes between the end of row data and the metadata boundary
    pub fn free_bytes<D: StorageDevice>(&self, device: &D) -> usize {
        self.meta_boundary(device).saturating_sub(self.data_end(device))
    }

    // =========================================================================
    // Records
    // =========================================================================

    /// Base addresses of all table records, in creation order
    ///
    /// Each record's length comes from its own column count. A walk that
    /// would leave the device stops early.
    pub fn record_bases<D: StorageDevice>(&self, device: &D) -> Vec<usize> {
        let count = self.table_count(device);
        let mut bases = Vec::with_capacity(count);
        let mut base = self.tables_top();

        for _ in 0..count {
            if base + 1 < RECORD_HEADER_LEN {
                warn!(base, "catalog walk ran off the device");
                break;
            }
            bases.push(base);
            let len = record::record_len(record::read_column_count(device, base) as usize);
            match base.checked_sub(len) {
                Some(next) => base = next,
                None => {
                    warn!(base, "catalog walk ran off the device");
                    break;
                }
            }
        }

        bases
    }

    /// Base address of the record named `name`
    pub fn find<D: StorageDevice>(&self, device: &D, name: &str) -> Option<usize> {
        let wanted: [u8; NAME_LEN] = record::encode_name(name)?;
        self.record_bases(device)
            .into_iter()
            .find(|&base| record::read_name(device, base) == wanted)
    }
}
