//! Byte Region Module
//!
//! Raw byte-level access to the two storage backends.
//!
//! ## Responsibilities
//! - Byte read/write at absolute addresses
//! - Keep the EEPROM backend's contents across restarts (image file)
//! - Name the backends for `cd` / `pwd`
//!
//! ## Layout
//! ```text
//! 0                      db_start            db_end            len
//! ┌──────────────────────┬───────────────────┬─────────────────┐
//! │ reserved (untouched) │  record store     │ reserved        │
//! └──────────────────────┴───────────────────┴─────────────────┘
//! ```
//! Both backends are addressed identically. A blank backend reads
//! `EMPTY` (0xFF) everywhere, just like erased EEPROM cells.

mod file;
mod memory;

use std::fmt;

use crate::error::Result;

pub use file::FileRegion;
pub use memory::MemRegion;

/// Byte-addressable storage backing one backend
///
/// `read` and `write` take absolute addresses in `0..len()`; callers keep
/// addresses in range. Writes never fail; durable implementations persist
/// them on `flush`.
pub trait ByteRegion {
    /// Number of addressable bytes
    fn len(&self) -> usize;

    /// Read one byte
    fn read(&self, addr: usize) -> u8;

    /// Write one byte
    fn write(&mut self, addr: usize, byte: u8);

    /// Make written bytes durable
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One of the two interchangeable storage backends ("drives")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Non-volatile EEPROM
    Eeprom,

    /// Volatile RAM emulation
    Ram,
}

impl Backend {
    /// Display name used by `pwd`
    pub fn name(self) -> &'static str {
        match self {
            Backend::Eeprom => "EEPROM",
            Backend::Ram => "RAM",
        }
    }

    /// The backend `cp` writes to
    pub fn other(self) -> Backend {
        match self {
            Backend::Eeprom => Backend::Ram,
            Backend::Ram => Backend::Eeprom,
        }
    }

    /// Select a backend by the first letter of an argument ("e..." or "r...")
    pub fn from_arg(arg: &str) -> Option<Backend> {
        match arg.chars().next() {
            Some('e') => Some(Backend::Eeprom),
            Some('r') => Some(Backend::Ram),
            _ => None,
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
