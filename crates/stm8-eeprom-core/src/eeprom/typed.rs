//! Arduino-style single byte and typed value access

use super::Eeprom;
use crate::registers::{EepromRegisters, ERASED_BYTE};
use zerocopy::{FromBytes, Immutable, IntoBytes};

impl<R: EepromRegisters> Eeprom<R> {
    /// Read a single byte (Arduino `EEPROM.read`)
    ///
    /// Returns [`ERASED_BYTE`] for an `index` outside the region.
    pub fn read_byte(&self, index: usize) -> u8 {
        if !self.geometry().contains(index) {
            return ERASED_BYTE;
        }
        self.regs.read_data(index)
    }

    /// Write a byte only if it differs from the stored one (Arduino
    /// `EEPROM.update`)
    ///
    /// Skipping identical bytes saves erase/write cycles. Same failure
    /// behaviour as [`write_byte`](Self::write_byte).
    pub fn update_byte(&mut self, index: usize, value: u8) {
        if self.geometry().contains(index) && self.regs.read_data(index) == value {
            return;
        }
        self.write_byte(index, value);
    }

    /// Read a plain-old-data value stored at `index` (Arduino `EEPROM.get`)
    ///
    /// Returns `None` if the value does not fit entirely inside the region.
    pub fn get<T: FromBytes + IntoBytes>(&self, index: usize) -> Option<T> {
        let mut value = T::new_zeroed();
        let size = core::mem::size_of::<T>();
        if self.read_range(index, value.as_mut_bytes(), size) != size {
            return None;
        }
        Some(value)
    }

    /// Store a plain-old-data value at `index` (Arduino `EEPROM.put`)
    ///
    /// Only bytes that differ from the stored ones are written. Returns the
    /// number of bytes of `value` that now match the region: fewer than
    /// `size_of::<T>()` when the value runs past the end of the region or
    /// the unlock failed.
    pub fn put<T: IntoBytes + Immutable>(&mut self, index: usize, value: &T) -> usize {
        let bytes = value.as_bytes();
        let len = match self.geometry().clamp(index, bytes.len()) {
            Some(len) => len,
            None => return 0,
        };

        let mut stored = 0;
        for (offset, &byte) in (index..).zip(&bytes[..len]) {
            if self.regs.read_data(offset) != byte && self.write_range(offset, &[byte], 1) == 0 {
                break;
            }
            stored += 1;
        }
        stored
    }
}
