//! In-memory byte region
//!
//! Backs the RAM drive, and the EEPROM drive when no image file is configured.

use crate::storage::EMPTY;

use super::ByteRegion;

/// A `Vec<u8>` region that starts out fully erased
#[derive(Debug, Clone)]
pub struct MemRegion {
    bytes: Vec<u8>,
}

impl MemRegion {
    /// Create a blank region of `size` bytes
    pub fn new(size: usize) -> Self {
        Self {
            bytes: vec![EMPTY; size],
        }
    }

    /// Wrap existing contents
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// View the raw contents
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl ByteRegion for MemRegion {
    fn len(&self) -> usize {
        self.bytes.len()
    }

    fn read(&self, addr: usize) -> u8 {
        self.bytes[addr]
    }

    fn write(&mut self, addr: usize, byte: u8) {
        self.bytes[addr] = byte;
    }
}
