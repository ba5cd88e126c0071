//! Table records
//!
//! Encoding and decoding of one table's catalog entry.

use crate::error::{Result, TinyDbError};
use crate::storage::StorageDevice;
use crate::types::ColumnType;

use super::{COLUMN_SLOT_LEN, NAME_LEN, RECORD_HEADER_LEN};

// Field addresses are `base - OFFSET`; multi-byte fields start at the lower address.
const START_OFFSET: usize = NAME_LEN + 1;
const SIZE_OFFSET: usize = NAME_LEN + 3;
const CAPACITY_OFFSET: usize = NAME_LEN + 4;
const COLUMN_COUNT_OFFSET: usize = NAME_LEN + 5;
const COLUMN_TYPE_OFFSET: usize = NAME_LEN + 1;

/// Encode a table or column name into its fixed-width slot
///
/// Returns `None` for empty names, names longer than `NAME_LEN` bytes and
/// names containing NUL.
pub fn encode_name(name: &str) -> Option<[u8; NAME_LEN]> {
    let bytes = name.as_bytes();
    if bytes.is_empty() || bytes.len() > NAME_LEN || bytes.contains(&0) {
        return None;
    }
    let mut out = [0u8; NAME_LEN];
    out[..bytes.len()].copy_from_slice(bytes);
    Some(out)
}

/// Decode a name slot, dropping the zero padding
pub fn decode_name(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

/// Name bytes stored downward from `base`
pub(crate) fn read_name<D: StorageDevice>(device: &D, base: usize) -> [u8; NAME_LEN] {
    let mut name = [0u8; NAME_LEN];
    for (i, byte) in name.iter_mut().enumerate() {
        *byte = device.read_byte(base - i);
    }
    name
}

fn write_name<D: StorageDevice>(device: &mut D, base: usize, name: &[u8; NAME_LEN]) {
    for (i, byte) in name.iter().enumerate() {
        device.write_byte(base - i, *byte);
    }
}

pub(crate) fn read_column_count<D: StorageDevice>(device: &D, base: usize) -> u8 {
    device.read_byte(base - COLUMN_COUNT_OFFSET)
}

/// Bytes taken by a record with `column_count` columns
pub(crate) fn record_len(column_count: usize) -> usize {
    RECORD_HEADER_LEN + COLUMN_SLOT_LEN * column_count
}

/// One column as described by the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMeta {
    pub name: String,
    pub column_type: ColumnType,
}

impl ColumnMeta {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }

    /// Bytes per stored value
    pub fn width(&self) -> usize {
        self.column_type.width()
    }
}

/// A table's catalog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRecord {
    /// Address of the record's first (highest) byte
    pub base: usize,
    pub name: String,
    /// First address of the table's row data
    pub start: usize,
    /// Persisted size counter (may run up to `2 * capacity - 1`)
    pub size: u16,
    pub capacity: u8,
    pub columns: Vec<ColumnMeta>,
}

impl TableRecord {
    /// Bytes this record takes in the catalog
    pub fn encoded_len(&self) -> usize {
        record_len(self.columns.len())
    }

    /// Bytes of row data reserved for this table
    pub fn data_len(&self) -> usize {
        self.capacity as usize * self.columns.iter().map(ColumnMeta::width).sum::<usize>()
    }

    /// Rows currently stored (the size counter clamped to capacity)
    pub fn row_count(&self) -> usize {
        (self.size as usize).min(self.capacity as usize)
    }

    /// Read the record whose base address is `base`
    pub fn read<D: StorageDevice>(device: &D, base: usize) -> Result<Self> {
        if base + 1 < RECORD_HEADER_LEN {
            return Err(TinyDbError::Corruption(format!(
                "Record base {} is below the record header length",
                base
            )));
        }

        let name = decode_name(&read_name(device, base));
        let start = device.read_u16(base - START_OFFSET) as usize;
        let size = device.read_u16(base - SIZE_OFFSET);
        let capacity = device.read_byte(base - CAPACITY_OFFSET);
        let column_count = read_column_count(device, base) as usize;

        if base + 1 < record_len(column_count) {
            return Err(TinyDbError::Corruption(format!(
                "Record '{}' at {} does not fit below its base",
                name, base
            )));
        }

        let mut columns = Vec::with_capacity(column_count);
        for j in 0..column_count {
            let slot = base - RECORD_HEADER_LEN - COLUMN_SLOT_LEN * j;
            let column_name = decode_name(&read_name(device, slot));
            let code = device.read_byte(slot - COLUMN_TYPE_OFFSET);
            let column_type = ColumnType::from_code(code).ok_or_else(|| {
                TinyDbError::Corruption(format!(
                    "Column '{}' of table '{}' has invalid type code {}",
                    column_name, name, code
                ))
            })?;
            columns.push(ColumnMeta::new(column_name, column_type));
        }

        Ok(Self {
            base,
            name,
            start,
            size,
            capacity,
            columns,
        })
    }

    /// Write the whole record at its base address
    ///
    /// Names must already have passed `encode_name`.
    pub fn write<D: StorageDevice>(&self, device: &mut D) {
        let base = self.base;

        write_name(device, base, &encode_name(&self.name).unwrap_or_default());
        device.write_u16(base - START_OFFSET, self.start as u16);
        device.write_u16(base - SIZE_OFFSET, self.size);
        device.write_byte(base - CAPACITY_OFFSET, self.capacity);
        device.write_byte(base - COLUMN_COUNT_OFFSET, self.columns.len() as u8);

        for (j, column) in self.columns.iter().enumerate() {
            let slot = base - RECORD_HEADER_LEN - COLUMN_SLOT_LEN * j;
            write_name(device, slot, &encode_name(&column.name).unwrap_or_default());
            device.write_byte(slot - NAME_LEN, 0);
            device.write_byte(slot - COLUMN_TYPE_OFFSET, column.column_type.code());
        }
    }

    /// Persist only the size counter of the record at `base`
    pub fn write_size<D: StorageDevice>(device: &mut D, base: usize, size: u16) {
        device.write_u16(base - SIZE_OFFSET, size);
    }
}
