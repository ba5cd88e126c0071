//! File-backed device
//!
//! Keeps a device image on the host file system so a table store survives
//! between process runs. All reads and writes hit an in-memory copy; `flush`
//! rewrites the image file when something changed.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Result, TinyDbError};

use super::{ImageHeader, StorageDevice, IMAGE_HEADER_LEN};

/// Device persisted to an image file
pub struct FileDevice {
    /// Image file path
    path: PathBuf,
    /// Device contents
    bytes: Vec<u8>,
    /// Writes not yet flushed to the image
    dirty: bool,
}

impl FileDevice {
    /// Open the image at `path`, creating a zeroed `len`-byte image if missing
    ///
    /// An existing image must hold exactly `len` bytes.
    pub fn open(path: &Path, len: usize) -> Result<Self> {
        if !path.exists() {
            let mut device = Self {
                path: path.to_path_buf(),
                bytes: vec![0; len],
                dirty: true,
            };
            device.flush()?;
            debug!(path = %path.display(), len, "created device image");
            return Ok(device);
        }

        let device = Self::load(path)?;
        if device.bytes.len() != len {
            return Err(TinyDbError::Config(format!(
                "Image {} holds {} bytes, expected {}",
                path.display(),
                device.bytes.len(),
                len
            )));
        }

        Ok(device)
    }

    /// Open an existing image, taking the device length from its header
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read(path)?;
        let header = ImageHeader::decode(&raw)?;
        let body = &raw[IMAGE_HEADER_LEN..];
        header.verify(body)?;

        debug!(path = %path.display(), len = body.len(), "loaded device image");

        Ok(Self {
            path: path.to_path_buf(),
            bytes: body.to_vec(),
            dirty: false,
        })
    }

    /// Image file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether writes are waiting for a flush
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn write_image(&self) -> Result<()> {
        let header = ImageHeader::for_body(&self.bytes);

        let file: File = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)?;

        let mut writer = BufWriter::new(file);
        writer.write_all(&header.encode()?)?;
        writer.write_all(&self.bytes)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;

        Ok(())
    }
}

impl StorageDevice for FileDevice {
    fn len(&self) -> usize {
        self.bytes.len()
    }

    fn read_byte(&self, addr: usize) -> u8 {
        self.bytes.get(addr).copied().unwrap_or(0)
    }

    fn write_byte(&mut self, addr: usize, value: u8) {
        if let Some(slot) = self.bytes.get_mut(addr) {
            if *slot != value {
                *slot = value;
                self.dirty = true;
            }
        }
    }

    fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }

        self.write_image()?;
        self.dirty = false;
        Ok(())
    }
}

impl Drop for FileDevice {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            warn!(path = %self.path.display(), error = %e, "failed to flush device image on drop");
        }
    }
}
