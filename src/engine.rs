//! Engine Module
//!
//! The context object that owns both backends and the drive selector.
//!
//! ## Responsibilities
//! - Hold the EEPROM and RAM regions and which one is active
//! - Halt background tasks before switching drives or rewriting records
//! - Copy records between drives through a bounded transfer buffer
//! - Dispatch parsed commands

use std::sync::Arc;

use bytes::{BufMut, Bytes, BytesMut};

use crate::config::Config;
use crate::error::{AvpError, Result};
use crate::protocol::{Command, CopyTarget, Response};
use crate::region::{Backend, ByteRegion, FileRegion, MemRegion};
use crate::storage::{
    Dump, Keys, Layout, ListEntry, ListingSummary, LongListing, Record, RecordStore, Records,
    Scanner,
};
use crate::tasks::{NoTasks, TaskController};

/// Bytes per `peep` line in compact mode
const COMPACT_DUMP_WIDTH: usize = 64;

/// Bytes per `peep` line in extended mode; ranged dumps start on this boundary
const EXTENDED_DUMP_WIDTH: usize = 32;

/// The storage engine
///
/// ## Drive Model
/// Both drives are addressed identically and hold independent stores over
/// the same `Layout`. Every store operation works on the active drive; the
/// selection is plain state on this struct, so scanners and stores are
/// built per call and never cache it.
///
/// ## Concurrency
/// None. Operations run to completion; anything that changes what running
/// scripts see calls `TaskController::halt_all` first.
pub struct Engine {
    /// Engine configuration
    config: Config,

    /// Store span on both drives
    layout: Layout,

    /// Non-volatile drive
    eeprom: Box<dyn ByteRegion>,

    /// Volatile drive
    ram: Box<dyn ByteRegion>,

    /// Drive all store operations act on
    active: Backend,

    /// Background task scheduler
    tasks: Arc<dyn TaskController>,
}

impl Engine {
    /// Open an engine with the given config
    ///
    /// 1. Validate the layout
    /// 2. Load the EEPROM image (or start a blank in-memory EEPROM)
    /// 3. Start a blank RAM drive
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;

        let eeprom: Box<dyn ByteRegion> = match &config.eeprom_image {
            Some(path) => Box::new(FileRegion::open(path, config.eeprom_size)?),
            None => Box::new(MemRegion::new(config.eeprom_size)),
        };
        let ram: Box<dyn ByteRegion> = Box::new(MemRegion::new(config.ram_size));

        Self::with_regions(config, eeprom, ram)
    }

    /// Build an engine over caller-supplied regions
    pub fn with_regions(
        config: Config,
        eeprom: Box<dyn ByteRegion>,
        ram: Box<dyn ByteRegion>,
    ) -> Result<Self> {
        config.validate()?;
        let layout = config.layout();

        for (backend, region) in [(Backend::Eeprom, &eeprom), (Backend::Ram, &ram)] {
            if region.len() < layout.end {
                return Err(AvpError::Config(format!(
                    "{} region has {} bytes, store needs {}",
                    backend,
                    region.len(),
                    layout.end
                )));
            }
        }

        tracing::info!(
            "Store region [{}, {}), {} active",
            layout.start,
            layout.end,
            config.initial_backend
        );

        Ok(Self {
            active: config.initial_backend,
            config,
            layout,
            eeprom,
            ram,
            tasks: Arc::new(NoTasks),
        })
    }

    /// Attach the interpreter's background task controller
    pub fn with_tasks(mut self, tasks: Arc<dyn TaskController>) -> Self {
        self.tasks = tasks;
        self
    }

    // =========================================================================
    // Command Dispatch
    // =========================================================================

    /// Execute a command
    ///
    /// Routes commands to appropriate handlers. Errors leave the read-command
    /// loop running; the caller reports them.
    pub fn execute(&mut self, command: Command) -> Result<Response> {
        let kind = command.command_type();
        if kind.is_extended_only() && !self.config.mode.is_extended() {
            return Err(AvpError::ExtendedOnly(kind.verb()));
        }

        match command {
            Command::Function { id, body } => {
                self.define(id.as_bytes(), body.as_bytes())?;
                Ok(Response::Saved)
            }
            Command::Ls => Ok(self.ls()),
            Command::Ll => {
                let (entries, summary) = self.long_listing();
                Ok(Response::LongListing { entries, summary })
            }
            Command::Cat { id } => {
                let record = self.cat(id.as_bytes())?;
                Ok(Response::Definition {
                    id,
                    body: record.body().into_owned(),
                })
            }
            Command::Peep { range } => Ok(self.peep(range)),
            Command::Cd { backend } => {
                self.set_backend(backend);
                Ok(Response::Drive {
                    backend,
                    changed: true,
                })
            }
            Command::Pwd => Ok(Response::Drive {
                backend: self.active,
                changed: false,
            }),
            Command::Cp { target } => {
                let count = match target {
                    CopyTarget::One(id) => {
                        self.copy_key(id.as_bytes())?;
                        1
                    }
                    CopyTarget::All => self.copy_all()?,
                };
                Ok(Response::Copied {
                    count,
                    to: self.active.other(),
                })
            }
            Command::Rm { id } => {
                self.erase(id.as_bytes())?;
                Ok(Response::Removed { id })
            }
        }
    }

    fn ls(&self) -> Response {
        if self.config.mode.is_extended() {
            Response::Names(
                self.keys()
                    .map(|k| String::from_utf8_lossy(&k).into_owned())
                    .collect(),
            )
        } else {
            Response::Definitions(
                self.records()
                    .map(|r| (r.name().into_owned(), r.body().into_owned()))
                    .collect(),
            )
        }
    }

    fn peep(&self, range: Option<(usize, usize)>) -> Response {
        let len = self.region(self.active).len();

        let (start, end, width) = match (self.config.mode.is_extended(), range) {
            (true, Some((start, end))) => {
                let mut start = start & !(EXTENDED_DUMP_WIDTH - 1);
                if start >= len {
                    start = 0;
                }
                // `end` is inclusive
                let end = if end < start || end >= len { len } else { end + 1 };
                (start, end, EXTENDED_DUMP_WIDTH)
            }
            (true, None) => (0, len, EXTENDED_DUMP_WIDTH),
            (false, _) => (0, len, COMPACT_DUMP_WIDTH),
        };

        Response::Dump {
            cells: self.dump(start, end).collect(),
            width,
        }
    }

    // =========================================================================
    // Drive Selection
    // =========================================================================

    /// The active drive
    pub fn backend(&self) -> Backend {
        self.active
    }

    /// Switch the active drive, halting background tasks first
    pub fn set_backend(&mut self, backend: Backend) {
        self.tasks.halt_all();
        if self.active != backend {
            tracing::info!("Drive {} -> {}", self.active, backend);
        }
        self.active = backend;
    }

    /// Raw region of a drive
    pub fn region(&self, backend: Backend) -> &dyn ByteRegion {
        match backend {
            Backend::Eeprom => self.eeprom.as_ref(),
            Backend::Ram => self.ram.as_ref(),
        }
    }

    fn region_mut(&mut self, backend: Backend) -> &mut dyn ByteRegion {
        match backend {
            Backend::Eeprom => self.eeprom.as_mut(),
            Backend::Ram => self.ram.as_mut(),
        }
    }

    /// Scanner over the active drive
    pub fn scanner(&self) -> Scanner<'_> {
        self.scanner_on(self.active)
    }

    /// Scanner over a specific drive
    pub fn scanner_on(&self, backend: Backend) -> Scanner<'_> {
        Scanner::new(self.region(backend), self.layout)
    }

    /// Store over the active drive
    ///
    /// Does not halt background tasks; `define` / `erase` do.
    pub fn store(&mut self) -> RecordStore<'_> {
        self.store_on(self.active)
    }

    /// Store over a specific drive
    pub fn store_on(&mut self, backend: Backend) -> RecordStore<'_> {
        let layout = self.layout;
        RecordStore::new(self.region_mut(backend), layout)
    }

    // =========================================================================
    // Records
    // =========================================================================

    /// Define (or redefine) a function on the active drive
    pub fn define(&mut self, id: &[u8], body: &[u8]) -> Result<usize> {
        self.tasks.halt_all();
        self.store().insert(id, body)
    }

    /// Look up a function body on the active drive
    pub fn get(&self, id: &[u8]) -> Option<Bytes> {
        self.scanner().value_of(id)
    }

    /// The full record for `id`, or `KeyNotFound`
    pub fn cat(&self, id: &[u8]) -> Result<Record> {
        let scanner = self.scanner();
        scanner
            .find_key(id)
            .map(|addr| scanner.record_at(addr))
            .ok_or_else(|| not_found(id))
    }

    /// Erase a function on the active drive
    pub fn erase(&mut self, id: &[u8]) -> Result<()> {
        self.tasks.halt_all();
        if self.store().erase(id) {
            Ok(())
        } else {
            Err(not_found(id))
        }
    }

    // =========================================================================
    // Enumeration
    // =========================================================================

    /// Function names on the active drive, in address order
    pub fn keys(&self) -> Keys<'_> {
        Keys::new(self.scanner())
    }

    /// Whole records on the active drive, in address order
    pub fn records(&self) -> Records<'_> {
        Records::new(self.scanner())
    }

    /// Every hole and record on the active drive, plus totals
    pub fn long_listing(&self) -> (Vec<ListEntry>, ListingSummary) {
        let mut listing = LongListing::new(self.scanner());
        let entries: Vec<ListEntry> = listing.by_ref().collect();
        (entries, listing.summary())
    }

    /// Classified bytes of the active drive over `[start, end)`, clamped
    pub fn dump(&self, start: usize, end: usize) -> Dump<'_> {
        Dump::new(self.region(self.active), start, end)
    }

    // =========================================================================
    // Cross-Drive Copy
    // =========================================================================

    /// Copy the record at `source_addr` on the active drive to the other drive
    ///
    /// Any record with the same key on the destination is erased first.
    /// Returns the source address just past the copied record.
    ///
    /// Records larger than the transfer buffer fail with `TransferOverflow`
    /// before the destination is touched. An `Overflow` on the destination
    /// happens after its old copy of the record was erased.
    pub fn copy_one(&mut self, source_addr: usize) -> Result<usize> {
        let capacity = self.config.transfer_buffer_size;

        let (record, next) = {
            let scanner = self.scanner();
            if scanner.find_occupied(source_addr) != Some(source_addr) {
                return Err(AvpError::InvalidArgument(format!(
                    "no record at address {}",
                    source_addr
                )));
            }
            let span = scanner.record_span(source_addr);
            (scanner.record_at(source_addr), source_addr + span)
        };

        let size = record.span();
        if size > capacity {
            tracing::warn!(
                "Cannot copy {:?}: {} bytes exceeds transfer buffer",
                record.name(),
                size
            );
            return Err(AvpError::TransferOverflow { size, capacity });
        }

        let mut buffer = BytesMut::with_capacity(capacity);
        buffer.put(record.encode());

        let destination = self.active.other();
        self.store_on(destination).place(&record.key, &buffer)?;

        tracing::info!("Copied {:?} to {}", record.name(), destination);
        Ok(next)
    }

    /// Copy one function to the other drive
    pub fn copy_key(&mut self, id: &[u8]) -> Result<()> {
        self.tasks.halt_all();
        let addr = self.scanner().find_key(id).ok_or_else(|| not_found(id))?;
        self.copy_one(addr)?;
        Ok(())
    }

    /// Copy every function on the active drive to the other drive
    ///
    /// Returns the number of records copied.
    pub fn copy_all(&mut self) -> Result<usize> {
        self.tasks.halt_all();

        let mut copied = 0;
        let mut next = self.scanner().find_occupied(self.layout.start);
        while let Some(addr) = next {
            let after = self.copy_one(addr)?;
            copied += 1;
            next = self.scanner().find_occupied(after);
        }

        tracing::info!("Copied {} function(s) to {}", copied, self.active.other());
        Ok(copied)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Persist both drives (only a file-backed EEPROM does anything)
    pub fn flush(&mut self) -> Result<()> {
        self.eeprom.flush()?;
        self.ram.flush()?;
        Ok(())
    }

    /// Close the engine, flushing the EEPROM image
    pub fn close(mut self) -> Result<()> {
        self.flush()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the store layout
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

fn not_found(id: &[u8]) -> AvpError {
    AvpError::KeyNotFound(String::from_utf8_lossy(id).into_owned())
}
