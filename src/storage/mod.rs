//! Storage Module
//!
//! Sentinel-scanned record storage over a flat byte region.
//!
//! ## Responsibilities
//! - Parse the untyped region into records by scanning byte values
//! - First-fit allocation of erased space
//! - Insert / erase / lookup with unique keys
//! - Listings and raw dumps for inspection
//!
//! ## Region Format
//! ```text
//! ┌──────┬───┬──────────┬───┬──────────┬──────┬───┬────────┬───┬─────┐
//! │ key  │ 0 │  value   │ 0 │ FF FF FF │ key  │ 0 │ value  │ 0 │ FF… │
//! └──────┴───┴──────────┴───┴──────────┴──────┴───┴────────┴───┴─────┘
//!   record                  hole         record                 hole
//! ```
//! There is no header, no length field and no index: record boundaries are
//! found by scanning for `TERMINATOR` (0x00) and `EMPTY` (0xFF). Stored keys
//! and values therefore never contain either byte.

mod allocator;
mod listing;
mod scanner;
mod store;

use std::borrow::Cow;

use bytes::{BufMut, Bytes, BytesMut};

pub use allocator::{find_hole, largest_hole, Hole, Holes};
pub use listing::{ByteClass, Dump, DumpCell, Keys, ListEntry, ListingSummary, LongListing, Records};
pub use scanner::Scanner;
pub use store::RecordStore;

// =============================================================================
// Byte Classes
// =============================================================================

/// Value of a never-written or erased byte
pub const EMPTY: u8 = 0xFF;

/// End of a key or value string
pub const TERMINATOR: u8 = 0x00;

/// Smallest possible record: one-byte key, empty value, two terminators.
/// Record walks stop once fewer bytes than this remain.
pub const MIN_RECORD_SIZE: usize = 3;

// =============================================================================
// Layout
// =============================================================================

/// The `[start, end)` address span reserved for the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub start: usize,
    pub end: usize,
}

impl Layout {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of bytes in the region
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, addr: usize) -> bool {
        addr >= self.start && addr < self.end
    }
}

// =============================================================================
// Record
// =============================================================================

/// A key/value pair read out of the region
///
/// Once parsed by the scanner a record carries explicit lengths, so nothing
/// above the scanner re-derives boundaries from the raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Address of the first key byte
    pub addr: usize,

    pub key: Bytes,

    pub value: Bytes,
}

impl Record {
    /// Bytes occupied in the region: `key\0value\0`
    pub fn span(&self) -> usize {
        span_of(&self.key, &self.value)
    }

    /// Key as text
    pub fn name(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.key)
    }

    /// Value as text
    pub fn body(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.value)
    }

    /// Encode into the on-region form
    pub fn encode(&self) -> BytesMut {
        encode_record(&self.key, &self.value)
    }
}

/// Bytes a record with this key and value occupies
pub fn span_of(key: &[u8], value: &[u8]) -> usize {
    key.len() + value.len() + 2
}

/// `key\0value\0`
pub fn encode_record(key: &[u8], value: &[u8]) -> BytesMut {
    let mut buf = BytesMut::with_capacity(span_of(key, value));
    buf.put_slice(key);
    buf.put_u8(TERMINATOR);
    buf.put_slice(value);
    buf.put_u8(TERMINATOR);
    buf
}
