//! Data EEPROM driver
//!
//! `Eeprom` wraps a register backend and provides three layers of access:
//!
//! - **Counting API** (`write_range`, `read_range`, `write_byte`): every
//!   failure degrades to fewer or zero bytes processed. Callers must check
//!   the returned count; ignoring it silently loses data when a request is
//!   out of range or the unlock sequence fails.
//! - **Arduino-style helpers** (`read_byte`, `update_byte`, `get`, `put`)
//! - **Strict API** (`try_write`, `try_read`, and the `embedded-storage`
//!   traits) for callers that want a `Result`
//!
//! Every write runs unlock, store and lock inside one critical section, so
//! interrupt handlers never observe or disturb a half-finished sequence.
//!
//! # Example
//!
//! ```ignore
//! use stm8_eeprom_core::Eeprom;
//!
//! let mut eeprom = Eeprom::new(registers);
//!
//! // Writes past the end are clamped; the count says how much landed
//! let written = eeprom.write_range(120, &[0xAA; 16], 16);
//! if written < 16 {
//!     // handle the short write
//! }
//! ```

mod ops;
mod strict;
mod typed;

use crate::device::EepromGeometry;
use crate::registers::EepromRegisters;

/// Data EEPROM access driver
pub struct Eeprom<R> {
    regs: R,
}

impl<R: EepromRegisters> Eeprom<R> {
    /// Create a driver on top of a register backend
    pub fn new(regs: R) -> Self {
        Self { regs }
    }

    /// Get a reference to the register backend
    pub fn registers(&self) -> &R {
        &self.regs
    }

    /// Get a mutable reference to the register backend
    ///
    /// Accesses made through this reference bypass the unlock/lock
    /// sequencing of the driver.
    pub fn registers_mut(&mut self) -> &mut R {
        &mut self.regs
    }

    /// Release the register backend
    pub fn into_inner(self) -> R {
        self.regs
    }

    /// Geometry of the region
    pub fn geometry(&self) -> &EepromGeometry {
        self.regs.geometry()
    }

    /// Region size in bytes
    pub fn len(&self) -> usize {
        self.geometry().size
    }

    /// Check if the region has no bytes
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Last valid offset, or `None` for an empty region
    pub fn end(&self) -> Option<usize> {
        self.geometry().end()
    }
}
