//! File-backed byte region
//!
//! Emulates a non-volatile EEPROM with an image file on disk.
//!
//! The whole image is held in memory; `write` only touches the buffer and
//! marks it dirty, `flush` rewrites the file and fsyncs it.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::storage::EMPTY;

use super::ByteRegion;

/// EEPROM image persisted to a file
#[derive(Debug)]
pub struct FileRegion {
    /// Image file path
    path: PathBuf,

    /// In-memory copy of the image
    bytes: Vec<u8>,

    /// Unflushed writes pending
    dirty: bool,
}

impl FileRegion {
    /// Open an image of `size` bytes
    ///
    /// A missing file yields a blank (all `EMPTY`) image. A shorter file is
    /// padded with `EMPTY`; a longer one is cut to `size`.
    pub fn open(path: &Path, size: usize) -> Result<Self> {
        let mut bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        let loaded = bytes.len();
        bytes.resize(size, EMPTY);

        // A freshly created or resized image must hit the disk on first flush
        let dirty = loaded != size;

        tracing::debug!(
            "Opened EEPROM image {} ({} bytes loaded, {} bytes addressable)",
            path.display(),
            loaded,
            size
        );

        Ok(Self {
            path: path.to_path_buf(),
            bytes,
            dirty,
        })
    }

    /// Image file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether there are writes not yet flushed to disk
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

impl ByteRegion for FileRegion {
    fn len(&self) -> usize {
        self.bytes.len()
    }

    fn read(&self, addr: usize) -> u8 {
        self.bytes[addr]
    }

    fn write(&mut self, addr: usize, byte: u8) {
        if self.bytes[addr] != byte {
            self.bytes[addr] = byte;
            self.dirty = true;
        }
    }

    fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }

        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)?;
        file.write_all(&self.bytes)?;
        file.sync_all()?;

        self.dirty = false;
        tracing::debug!("Flushed EEPROM image to {}", self.path.display());
        Ok(())
    }
}
