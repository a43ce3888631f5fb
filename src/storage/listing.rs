//! Listings and Dumps
//!
//! Lazy walks over the region for `ls`, `ll` and `peep`. Each iterator holds
//! only a cursor; calling the constructor again restarts the walk.

use bytes::Bytes;

use crate::region::ByteRegion;

use super::{Record, Scanner, EMPTY, TERMINATOR};

// =============================================================================
// Keys / Records
// =============================================================================

/// Keys in address order
pub struct Keys<'a> {
    scanner: Scanner<'a>,
    pos: usize,
}

impl<'a> Keys<'a> {
    pub fn new(scanner: Scanner<'a>) -> Self {
        let pos = scanner.layout().start;
        Self { scanner, pos }
    }
}

impl<'a> Iterator for Keys<'a> {
    type Item = Bytes;

    fn next(&mut self) -> Option<Bytes> {
        let start = self.scanner.find_occupied(self.pos)?;
        let key = self.scanner.read_string(start);

        let value_start = self.scanner.skip_field(start);
        self.pos = self.scanner.skip_field(value_start);

        Some(key)
    }
}

/// Whole records in address order
pub struct Records<'a> {
    scanner: Scanner<'a>,
    pos: usize,
}

impl<'a> Records<'a> {
    pub fn new(scanner: Scanner<'a>) -> Self {
        let pos = scanner.layout().start;
        Self { scanner, pos }
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        let start = self.scanner.find_occupied(self.pos)?;
        let record = self.scanner.record_at(start);
        self.pos = start + self.scanner.record_span(start);
        Some(record)
    }
}

// =============================================================================
// Long Listing
// =============================================================================

/// One line of `ll`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEntry {
    Hole { addr: usize, size: usize },
    Record { addr: usize, name: Bytes, size: usize },
}

impl ListEntry {
    pub fn size(&self) -> usize {
        match self {
            ListEntry::Hole { size, .. } | ListEntry::Record { size, .. } => *size,
        }
    }
}

/// Totals accumulated by a `LongListing`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListingSummary {
    pub holes: usize,
    pub hole_bytes: usize,
    pub records: usize,
    pub record_bytes: usize,
}

/// Every hole and record from the region start to its end
pub struct LongListing<'a> {
    scanner: Scanner<'a>,
    pos: usize,
    summary: ListingSummary,
}

impl<'a> LongListing<'a> {
    pub fn new(scanner: Scanner<'a>) -> Self {
        let pos = scanner.layout().start;
        Self {
            scanner,
            pos,
            summary: ListingSummary::default(),
        }
    }

    /// Totals for the entries yielded so far
    pub fn summary(&self) -> ListingSummary {
        self.summary
    }
}

impl<'a> Iterator for LongListing<'a> {
    type Item = ListEntry;

    fn next(&mut self) -> Option<ListEntry> {
        let end = self.scanner.layout().end;
        if self.pos >= end {
            return None;
        }

        let addr = self.pos;
        if self.scanner.read(addr) == EMPTY {
            let hole_end = self.scanner.find_occupied(addr).unwrap_or(end);
            let size = hole_end - addr;

            self.summary.holes += 1;
            self.summary.hole_bytes += size;
            self.pos = hole_end;

            Some(ListEntry::Hole { addr, size })
        } else {
            let name = self.scanner.read_string(addr);
            let size = self.scanner.record_span(addr);

            self.summary.records += 1;
            self.summary.record_bytes += size;
            self.pos = addr + size;

            Some(ListEntry::Record { addr, name, size })
        }
    }
}

// =============================================================================
// Dump
// =============================================================================

/// How `peep` shows one byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteClass {
    Printable(u8),
    Terminator,
    Empty,
    Control(u8),
}

impl ByteClass {
    pub fn of(byte: u8) -> Self {
        match byte {
            TERMINATOR => ByteClass::Terminator,
            EMPTY => ByteClass::Empty,
            b if b < b' ' => ByteClass::Control(b),
            b => ByteClass::Printable(b),
        }
    }

    /// Single display character
    pub fn marker(self) -> char {
        match self {
            ByteClass::Terminator => '$',
            ByteClass::Empty => '.',
            ByteClass::Control(_) => '^',
            ByteClass::Printable(b) => char::from(b),
        }
    }
}

/// A classified byte at an address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DumpCell {
    pub addr: usize,
    pub class: ByteClass,
}

/// Classified bytes over `[start, end)`, clamped to the backend
pub struct Dump<'a> {
    region: &'a dyn ByteRegion,
    pos: usize,
    end: usize,
}

impl<'a> Dump<'a> {
    pub fn new(region: &'a dyn ByteRegion, start: usize, end: usize) -> Self {
        let end = end.min(region.len());
        let pos = start.min(end);
        Self { region, pos, end }
    }

    /// First address that will be yielded
    pub fn start(&self) -> usize {
        self.pos
    }
}

impl<'a> Iterator for Dump<'a> {
    type Item = DumpCell;

    fn next(&mut self) -> Option<DumpCell> {
        if self.pos >= self.end {
            return None;
        }
        let addr = self.pos;
        self.pos += 1;
        Some(DumpCell {
            addr,
            class: ByteClass::of(self.region.read(addr)),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.end - self.pos;
        (left, Some(left))
    }
}
