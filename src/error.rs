//! Error types for avpdb
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using AvpError
pub type Result<T> = std::result::Result<T, AvpError>;

/// Unified error type for avpdb operations
#[derive(Debug, Error)]
pub enum AvpError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Lookup Errors
    // -------------------------------------------------------------------------
    #[error("Function not found: {0}")]
    KeyNotFound(String),

    // -------------------------------------------------------------------------
    // Space Errors
    // -------------------------------------------------------------------------
    #[error("Out of space: no hole of {requested} bytes")]
    Overflow { requested: usize },

    #[error("Record of {size} bytes exceeds the {capacity} byte transfer buffer")]
    TransferOverflow { size: usize, capacity: usize },

    // -------------------------------------------------------------------------
    // Argument Errors
    // -------------------------------------------------------------------------
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Command '{0}' requires extended mode")]
    ExtendedOnly(&'static str),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AvpError {
    /// True for errors that leave the store untouched (lookups and bad arguments)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AvpError::KeyNotFound(_)
                | AvpError::InvalidArgument(_)
                | AvpError::InvalidIdentifier(_)
                | AvpError::InvalidPayload(_)
                | AvpError::ExtendedOnly(_)
        )
    }
}
