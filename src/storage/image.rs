//! Image header definitions
//!
//! Defines the header prepended to a device image file.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TinyDbError};

/// Identifies a tinydb image file
pub const IMAGE_MAGIC: [u8; 4] = *b"TDB1";

/// Current image format version
pub const IMAGE_VERSION: u16 = 1;

/// Encoded header size: magic (4) + version (2) + len (4) + crc (4)
pub const IMAGE_HEADER_LEN: usize = 14;

/// Header stored in front of the raw device bytes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageHeader {
    pub magic: [u8; 4],
    pub version: u16,
    /// Number of body bytes that follow the header
    pub device_len: u32,
    /// CRC32 of the body
    pub checksum: u32,
}

impl ImageHeader {
    /// Build the header describing `body`
    pub fn for_body(body: &[u8]) -> Self {
        Self {
            magic: IMAGE_MAGIC,
            version: IMAGE_VERSION,
            device_len: body.len() as u32,
            checksum: crc32fast::hash(body),
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a header from the front of `bytes`
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < IMAGE_HEADER_LEN {
            return Err(TinyDbError::Corruption(format!(
                "Incomplete header: expected {} bytes, got {}",
                IMAGE_HEADER_LEN,
                bytes.len()
            )));
        }

        let header: ImageHeader = bincode::deserialize(&bytes[..IMAGE_HEADER_LEN])?;

        if header.magic != IMAGE_MAGIC {
            return Err(TinyDbError::Corruption(format!(
                "Bad magic: {:02x?}",
                header.magic
            )));
        }

        if header.version != IMAGE_VERSION {
            return Err(TinyDbError::Corruption(format!(
                "Unsupported image version {}",
                header.version
            )));
        }

        Ok(header)
    }

    /// Check `body` against the recorded length and checksum
    pub fn verify(&self, body: &[u8]) -> Result<()> {
        if body.len() != self.device_len as usize {
            return Err(TinyDbError::Corruption(format!(
                "Body length {} does not match header length {}",
                body.len(),
                self.device_len
            )));
        }

        let actual = crc32fast::hash(body);
        if actual != self.checksum {
            return Err(TinyDbError::Corruption(format!(
                "Checksum mismatch: stored {:08x}, computed {:08x}",
                self.checksum, actual
            )));
        }

        Ok(())
    }
}
