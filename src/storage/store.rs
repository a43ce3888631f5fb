//! Record Store
//!
//! Key lookup, insert and erase on top of the scanner and allocator.
//!
//! ## Uniqueness
//! Nothing in the region format prevents two records with the same key.
//! `insert` always erases the old record before writing, which is the only
//! thing keeping keys unique.
//!
//! ## Atomicity
//! None. An insert that fails to find space has already erased the previous
//! record under that key.

use bytes::Bytes;

use crate::error::{AvpError, Result};
use crate::region::ByteRegion;

use super::allocator::find_hole;
use super::{encode_record, Layout, Record, Scanner, EMPTY, TERMINATOR};

/// Mutable access to the store's span on one backend
pub struct RecordStore<'a> {
    region: &'a mut dyn ByteRegion,
    layout: Layout,
}

impl<'a> RecordStore<'a> {
    /// Open the store over `layout` on `region`. The layout must lie within the region.
    pub fn new(region: &'a mut dyn ByteRegion, layout: Layout) -> Self {
        debug_assert!(layout.end <= region.len());
        Self { region, layout }
    }

    /// Read-only scanner over the same span
    pub fn scanner(&self) -> Scanner<'_> {
        Scanner::new(&*self.region, self.layout)
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Address of `key`'s record
    pub fn find_key(&self, key: &[u8]) -> Option<usize> {
        self.scanner().find_key(key)
    }

    pub fn contains(&self, key: &[u8]) -> bool {
        self.find_key(key).is_some()
    }

    /// The value stored under `key`
    pub fn get(&self, key: &[u8]) -> Option<Bytes> {
        self.scanner().value_of(key)
    }

    /// The full record stored under `key`
    pub fn record(&self, key: &[u8]) -> Option<Record> {
        let scanner = self.scanner();
        scanner.find_key(key).map(|addr| scanner.record_at(addr))
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Store `value` under `key`, replacing any existing record
    ///
    /// Returns the address the record was written at.
    pub fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<usize> {
        validate_payload(key, value)?;
        self.place(key, &encode_record(key, value))
    }

    /// Erase the record under `key`, then write `encoded` (`key\0value\0`)
    /// into the first hole that fits
    pub(crate) fn place(&mut self, key: &[u8], encoded: &[u8]) -> Result<usize> {
        if self.erase(key) {
            tracing::debug!("Replacing {:?}", String::from_utf8_lossy(key));
        }

        let addr = find_hole(&self.scanner(), encoded.len())?;
        for (offset, &byte) in encoded.iter().enumerate() {
            self.region.write(addr + offset, byte);
        }

        tracing::debug!(
            "Saved {:?} at {} ({} bytes)",
            String::from_utf8_lossy(key),
            addr,
            encoded.len()
        );
        Ok(addr)
    }

    /// Erase the record under `key`. Returns false if there was none.
    pub fn erase(&mut self, key: &[u8]) -> bool {
        let addr = match self.find_key(key) {
            Some(addr) => addr,
            None => return false,
        };

        let value_start = self.erase_field(addr);
        let end = self.erase_field(value_start);

        tracing::debug!(
            "Erased {:?} at {} ({} bytes)",
            String::from_utf8_lossy(key),
            addr,
            end - addr
        );
        true
    }

    /// Overwrite one string field with `EMPTY`, through its terminator
    ///
    /// Stops early at an already-`EMPTY` byte. Returns the address past the
    /// last byte erased.
    fn erase_field(&mut self, addr: usize) -> usize {
        let mut addr = addr;
        while addr < self.layout.end {
            let byte = self.region.read(addr);
            if byte == EMPTY {
                return addr;
            }
            self.region.write(addr, EMPTY);
            addr += 1;
            if byte == TERMINATOR {
                return addr;
            }
        }
        addr
    }
}

/// Keys must be non-empty and neither field may contain a sentinel byte
pub(crate) fn validate_payload(key: &[u8], value: &[u8]) -> Result<()> {
    if key.is_empty() {
        return Err(AvpError::InvalidPayload("empty key".to_string()));
    }
    if key.iter().any(|&b| b == EMPTY || b == TERMINATOR) {
        return Err(AvpError::InvalidPayload(
            "key contains a reserved byte (0x00 or 0xFF)".to_string(),
        ));
    }
    if value.iter().any(|&b| b == EMPTY || b == TERMINATOR) {
        return Err(AvpError::InvalidPayload(
            "value contains a reserved byte (0x00 or 0xFF)".to_string(),
        ));
    }
    Ok(())
}
