//! Storage Module
//!
//! Byte-addressable persistent stores the engine runs on.
//!
//! ## Responsibilities
//! - Single-byte and fixed-width (u16) reads and writes at an address
//! - A fixed length decided when the device is created
//! - Pushing buffered writes to the backing medium on `flush`
//!
//! The engine never addresses bytes outside `0..len`. Devices treat such
//! accesses as no-ops (reads return zero) instead of panicking.
//!
//! ## Image File Format (FileDevice)
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │ Header (bincode)                               │
//! │ ┌──────────┬──────────┬──────────┬───────────┐ │
//! │ │Magic (4) │Version(2)│ Len (4)  │ CRC32 (4) │ │
//! │ └──────────┴──────────┴──────────┴───────────┘ │
//! ├────────────────────────────────────────────────┤
//! │ Body: `Len` raw device bytes                   │
//! └────────────────────────────────────────────────┘
//! ```

mod file;
mod image;
mod memory;

pub use file::FileDevice;
pub use image::{ImageHeader, IMAGE_HEADER_LEN, IMAGE_MAGIC, IMAGE_VERSION};
pub use memory::MemoryDevice;

use crate::error::Result;

/// A fixed-length, byte-addressable persistent store
///
/// Only `len`, `read_byte` and `write_byte` are required; the multi-byte
/// helpers are built on top of them and may be overridden by devices with
/// a faster path.
pub trait StorageDevice {
    /// Number of addressable bytes
    fn len(&self) -> usize;

    /// Whether the device has no addressable bytes
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read one byte
    fn read_byte(&self, addr: usize) -> u8;

    /// Write one byte
    fn write_byte(&mut self, addr: usize, value: u8);

    /// Read `buf.len()` consecutive bytes starting at `addr`
    fn read_bytes(&self, addr: usize, buf: &mut [u8]) {
        for (i, byte) in buf.iter_mut().enumerate() {
            *byte = self.read_byte(addr + i);
        }
    }

    /// Write `data` to consecutive bytes starting at `addr`
    fn write_bytes(&mut self, addr: usize, data: &[u8]) {
        for (i, byte) in data.iter().enumerate() {
            self.write_byte(addr + i, *byte);
        }
    }

    /// Set `len` bytes starting at `addr` to `value`
    fn fill(&mut self, addr: usize, len: usize, value: u8) {
        for i in 0..len {
            self.write_byte(addr + i, value);
        }
    }

    /// Read a little-endian u16 whose low byte is at `addr`
    fn read_u16(&self, addr: usize) -> u16 {
        u16::from_le_bytes([self.read_byte(addr), self.read_byte(addr + 1)])
    }

    /// Write a little-endian u16 whose low byte goes to `addr`
    fn write_u16(&mut self, addr: usize, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.write_byte(addr, lo);
        self.write_byte(addr + 1, hi);
    }

    /// Push buffered writes to the backing medium
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}
