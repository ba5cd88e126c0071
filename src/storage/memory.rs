//! In-memory device
//!
//! A zero-initialized byte array standing in for an EEPROM.

use super::StorageDevice;

/// Volatile device backed by a `Vec<u8>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryDevice {
    bytes: Vec<u8>,
}

impl MemoryDevice {
    /// Create a zeroed device of `len` bytes
    pub fn new(len: usize) -> Self {
        Self {
            bytes: vec![0; len],
        }
    }

    /// Wrap existing contents (e.g. a dump taken from real hardware)
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Raw device contents
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl StorageDevice for MemoryDevice {
    fn len(&self) -> usize {
        self.bytes.len()
    }

    fn read_byte(&self, addr: usize) -> u8 {
        self.bytes.get(addr).copied().unwrap_or(0)
    }

    fn write_byte(&mut self, addr: usize, value: u8) {
        if let Some(slot) = self.bytes.get_mut(addr) {
            *slot = value;
        }
    }

    fn read_bytes(&self, addr: usize, buf: &mut [u8]) {
        match self.bytes.get(addr..addr + buf.len()) {
            Some(src) => buf.copy_from_slice(src),
            None => {
                for (i, byte) in buf.iter_mut().enumerate() {
                    *byte = self.read_byte(addr + i);
                }
            }
        }
    }

    fn write_bytes(&mut self, addr: usize, data: &[u8]) {
        match self.bytes.get_mut(addr..addr + data.len()) {
            Some(dst) => dst.copy_from_slice(data),
            None => {
                for (i, byte) in data.iter().enumerate() {
                    self.write_byte(addr + i, *byte);
                }
            }
        }
    }
}
