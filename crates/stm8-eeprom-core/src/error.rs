//! Error types for stm8-eeprom-core
//!
//! Only the strict API reports errors. The counting API (`write_range`,
//! `read_range`, `write_byte`) degrades every failure to a smaller byte
//! count instead.

use thiserror::Error;

/// Core error type - no_std compatible, Copy for efficiency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Requested range does not fit inside the EEPROM region
    #[error("address out of bounds: {len} bytes at offset 0x{index:04X} exceed region of {size} bytes")]
    AddressOutOfBounds {
        /// Offset the access started at
        index: usize,
        /// Number of bytes requested
        len: usize,
        /// Size of the region in bytes
        size: usize,
    },

    /// The unlock key sequence did not set the DUL flag
    #[error("data EEPROM unlock failed")]
    UnlockFailed,
}

/// Result type alias using the core Error type
pub type Result<T> = core::result::Result<T, Error>;
