//! Configuration for avpdb
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{AvpError, Result};
use crate::region::Backend;
use crate::storage::Layout;

/// Main configuration for an avpdb instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Backend Configuration
    // -------------------------------------------------------------------------
    /// Size of the EEPROM backend in bytes (addresses `0..eeprom_size`)
    pub eeprom_size: usize,

    /// Size of the RAM backend in bytes
    pub ram_size: usize,

    /// File holding the EEPROM image. `None` keeps EEPROM in memory only.
    pub eeprom_image: Option<PathBuf>,

    /// Backend selected when the engine opens
    pub initial_backend: Backend,

    // -------------------------------------------------------------------------
    // Database Region
    // -------------------------------------------------------------------------
    /// First address reserved for the store
    pub db_start: usize,

    /// One past the last address reserved for the store.
    /// `None` means "up to the end of the smaller backend".
    pub db_end: Option<usize>,

    // -------------------------------------------------------------------------
    // Copy Configuration
    // -------------------------------------------------------------------------
    /// Largest record (key + value + both terminators) `cp` can move
    pub transfer_buffer_size: usize,

    // -------------------------------------------------------------------------
    // Command Surface
    // -------------------------------------------------------------------------
    /// Which command set the dispatcher exposes
    pub mode: ShellMode,
}

/// Command set exposed to the command dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellMode {
    /// Small targets: `ls` prints whole definitions, `peep` dumps everything
    Compact,

    /// Larger targets: adds `ll`, `cat`, `cp` and ranged `peep`
    Extended,
}

impl ShellMode {
    pub fn is_extended(self) -> bool {
        self == ShellMode::Extended
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            eeprom_size: 1024,
            ram_size: 1024,
            eeprom_image: None,
            initial_backend: Backend::Eeprom,
            db_start: 0,
            db_end: None,
            transfer_buffer_size: 256,
            mode: ShellMode::Extended,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// The `[start, end)` span the store may use on either backend
    pub fn layout(&self) -> Layout {
        let end = self
            .db_end
            .unwrap_or_else(|| self.eeprom_size.min(self.ram_size));
        Layout::new(self.db_start, end)
    }

    /// Check that the region fits both backends and the copy buffer is usable
    pub fn validate(&self) -> Result<()> {
        let layout = self.layout();

        if layout.start >= layout.end {
            return Err(AvpError::Config(format!(
                "empty database region: start {} >= end {}",
                layout.start, layout.end
            )));
        }

        let smallest = self.eeprom_size.min(self.ram_size);
        if layout.end > smallest {
            return Err(AvpError::Config(format!(
                "database end {} exceeds backend size {}",
                layout.end, smallest
            )));
        }

        if self.transfer_buffer_size == 0 {
            return Err(AvpError::Config(
                "transfer buffer size must be non-zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the EEPROM backend size (in bytes)
    pub fn eeprom_size(mut self, size: usize) -> Self {
        self.config.eeprom_size = size;
        self
    }

    /// Set the RAM backend size (in bytes)
    pub fn ram_size(mut self, size: usize) -> Self {
        self.config.ram_size = size;
        self
    }

    /// Set both backend sizes at once
    pub fn backend_size(self, size: usize) -> Self {
        self.eeprom_size(size).ram_size(size)
    }

    /// Persist the EEPROM backend to an image file
    pub fn eeprom_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.eeprom_image = Some(path.into());
        self
    }

    /// Set the backend that is active after open
    pub fn initial_backend(mut self, backend: Backend) -> Self {
        self.config.initial_backend = backend;
        self
    }

    /// Set the database region `[start, end)`
    pub fn db_region(mut self, start: usize, end: usize) -> Self {
        self.config.db_start = start;
        self.config.db_end = Some(end);
        self
    }

    /// Set the copy transfer buffer size (in bytes)
    pub fn transfer_buffer_size(mut self, size: usize) -> Self {
        self.config.transfer_buffer_size = size;
        self
    }

    /// Set the command set
    pub fn mode(mut self, mode: ShellMode) -> Self {
        self.config.mode = mode;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
