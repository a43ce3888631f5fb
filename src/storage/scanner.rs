//! Region Scanner
//!
//! Classifies bytes and walks the region to find record boundaries.
//!
//! Every scan is bounded by `Layout::end`; nothing here reads outside the
//! store's span.

use bytes::Bytes;

use crate::region::ByteRegion;

use super::{Layout, Record, EMPTY, MIN_RECORD_SIZE, TERMINATOR};

/// Read-only view of the store's span on one backend
#[derive(Clone, Copy)]
pub struct Scanner<'a> {
    region: &'a dyn ByteRegion,
    layout: Layout,
}

impl<'a> Scanner<'a> {
    /// Scan `layout` on `region`. The layout must lie within the region.
    pub fn new(region: &'a dyn ByteRegion, layout: Layout) -> Self {
        debug_assert!(layout.end <= region.len());
        Self { region, layout }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn region(&self) -> &'a dyn ByteRegion {
        self.region
    }

    /// Read one byte
    pub fn read(&self, addr: usize) -> u8 {
        self.region.read(addr)
    }

    // =========================================================================
    // Primitive Scans
    // =========================================================================

    /// First address at or after `addr` holding a non-`EMPTY` byte
    pub fn find_occupied(&self, addr: usize) -> Option<usize> {
        (addr..self.layout.end).find(|&a| self.read(a) != EMPTY)
    }

    /// First address at or after `addr` holding an `EMPTY` byte
    pub fn find_unoccupied(&self, addr: usize) -> Option<usize> {
        (addr..self.layout.end).find(|&a| self.read(a) == EMPTY)
    }

    /// End of the string slot starting at `addr`
    ///
    /// Scanning starts one byte past `addr`. Returns the first `EMPTY` address
    /// or the address just past the first `TERMINATOR`, whichever comes first,
    /// and `end` when neither occurs.
    pub fn find_end(&self, addr: usize) -> usize {
        let mut addr = addr;
        loop {
            addr += 1;
            if addr >= self.layout.end {
                return self.layout.end;
            }
            match self.read(addr) {
                EMPTY => return addr,
                TERMINATOR => return addr + 1,
                _ => {}
            }
        }
    }

    /// Step over one string field (key or value)
    ///
    /// Same as `find_end`, except a zero-length field (terminator at `addr`
    /// itself) ends right after that terminator.
    pub fn skip_field(&self, addr: usize) -> usize {
        if addr < self.layout.end && self.read(addr) == TERMINATOR {
            addr + 1
        } else {
            self.find_end(addr)
        }
    }

    /// True if the string at `addr` is exactly `candidate`
    pub fn matches(&self, addr: usize, candidate: &[u8]) -> bool {
        let mut pos = addr;
        for &byte in candidate {
            if pos >= self.layout.end || self.read(pos) != byte {
                return false;
            }
            pos += 1;
        }
        // Ended at the same place?
        pos < self.layout.end && self.read(pos) == TERMINATOR
    }

    /// The bytes of the string at `addr`, up to its terminator
    pub fn read_string(&self, addr: usize) -> Bytes {
        let bytes: Vec<u8> = (addr..self.layout.end)
            .map(|a| self.read(a))
            .take_while(|&b| b != TERMINATOR && b != EMPTY)
            .collect();
        Bytes::from(bytes)
    }

    // =========================================================================
    // Record Walks
    // =========================================================================

    /// Address of the record whose key is `key`
    pub fn find_key(&self, key: &[u8]) -> Option<usize> {
        let mut start = self.layout.start;

        while start + MIN_RECORD_SIZE <= self.layout.end {
            start = self.find_occupied(start)?;

            if self.matches(start, key) {
                return Some(start);
            }

            // Skip the key and its value
            start = self.skip_field(start);
            start = self.skip_field(start);
        }

        None
    }

    /// Address of the first value byte of `key`'s record
    pub fn get_value(&self, key: &[u8]) -> Option<usize> {
        self.find_key(key).map(|addr| self.skip_field(addr))
    }

    /// The value stored under `key`
    pub fn value_of(&self, key: &[u8]) -> Option<Bytes> {
        let value_start = self.get_value(key)?;
        if value_start >= self.layout.end {
            return Some(Bytes::new());
        }
        Some(self.read_string(value_start))
    }

    /// Bytes from `addr` through the value's terminator
    pub fn record_span(&self, addr: usize) -> usize {
        self.skip_field(self.skip_field(addr)) - addr
    }

    /// Parse the record starting at `addr`
    pub fn record_at(&self, addr: usize) -> Record {
        let key = self.read_string(addr);
        let value_start = self.skip_field(addr);
        let value = if value_start < self.layout.end {
            self.read_string(value_start)
        } else {
            Bytes::new()
        };

        Record { addr, key, value }
    }
}
