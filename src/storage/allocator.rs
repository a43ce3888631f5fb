//! Hole Allocator
//!
//! First-fit search for a contiguous run of `EMPTY` bytes.
//! Erased space is never compacted; a record lands in the first hole,
//! counted from the region start, that is large enough.

use crate::error::{AvpError, Result};

use super::Scanner;

/// A maximal run of `EMPTY` bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hole {
    pub addr: usize,
    pub len: usize,
}

/// Find the first hole of at least `size` bytes
///
/// Fails with `Overflow` when no single hole is large enough, even if the
/// free bytes in total would be.
pub fn find_hole(scanner: &Scanner<'_>, size: usize) -> Result<usize> {
    if size == 0 {
        return Err(AvpError::InvalidArgument(
            "cannot allocate an empty record".to_string(),
        ));
    }

    let end = scanner.layout().end;
    let mut start = scanner.layout().start;

    loop {
        if start + size > end {
            break;
        }

        // First byte of the next hole
        start = match scanner.find_unoccupied(start) {
            Some(addr) => addr,
            None => break,
        };

        // First byte of the next record, or the region end
        let hole_end = scanner.find_occupied(start).unwrap_or(end);

        if hole_end - start >= size {
            return Ok(start);
        }
        start = hole_end;
    }

    tracing::warn!("No hole of {} bytes left", size);
    Err(AvpError::Overflow { requested: size })
}

/// Size of the largest hole, or 0 when the region is full
pub fn largest_hole(scanner: &Scanner<'_>) -> usize {
    Holes::new(*scanner).map(|hole| hole.len).max().unwrap_or(0)
}

/// Iterator over every hole in address order
pub struct Holes<'a> {
    scanner: Scanner<'a>,
    pos: usize,
}

impl<'a> Holes<'a> {
    pub fn new(scanner: Scanner<'a>) -> Self {
        let pos = scanner.layout().start;
        Self { scanner, pos }
    }
}

impl<'a> Iterator for Holes<'a> {
    type Item = Hole;

    fn next(&mut self) -> Option<Hole> {
        let addr = self.scanner.find_unoccupied(self.pos)?;
        let end = self
            .scanner
            .find_occupied(addr)
            .unwrap_or(self.scanner.layout().end);

        self.pos = end;
        Some(Hole {
            addr,
            len: end - addr,
        })
    }
}
