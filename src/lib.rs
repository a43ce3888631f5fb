//! # avpdb
//!
//! A tiny attribute/value database for script storage on small devices:
//! - Named scripts ("functions") stored as `name\0body\0` records
//! - No header, no index: boundaries are found by scanning for sentinels
//! - First-fit allocation of erased space, no compaction
//! - Two interchangeable drives (EEPROM and RAM) with cross-drive copy
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │              Command Dispatcher (shell / cli)                │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ protocol::Command
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Engine                                │
//! │         (drive selector, task halting, cp)                   │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │ RecordStore │─────────▶│  Allocator  │
//!   └──────┬──────┘          └──────┬──────┘
//!          │                        │
//!          ▼                        ▼
//!   ┌─────────────────────────────────────┐
//!   │               Scanner               │
//!   └──────────────────┬──────────────────┘
//!                      ▼
//!   ┌─────────────────────────────────────┐
//!   │   ByteRegion (EEPROM image / RAM)   │
//!   └─────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod region;
pub mod storage;
pub mod tasks;
pub mod protocol;
pub mod engine;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{AvpError, Result};
pub use config::{Config, ShellMode};
pub use engine::Engine;
pub use region::Backend;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of avpdb
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
