//! Result-returning API
//!
//! These functions are an addition to the counting API for callers that
//! prefer an error over a short count. A request is either carried out
//! completely or rejected; out-of-range requests are never clamped.

use super::Eeprom;
use crate::error::{Error, Result};
use crate::registers::EepromRegisters;
use embedded_storage::{ReadStorage, Storage};

impl<R: EepromRegisters> Eeprom<R> {
    /// Write all of `data` starting at `index`
    ///
    /// # Errors
    ///
    /// - [`Error::AddressOutOfBounds`] if the data does not fit; nothing is
    ///   written
    /// - [`Error::UnlockFailed`] if the region could not be unlocked
    ///
    /// The region is locked again afterwards in every case.
    pub fn try_write(&mut self, index: usize, data: &[u8]) -> Result<()> {
        self.check_range(index, data.len())?;
        if self.write_range(index, data, data.len()) != data.len() {
            return Err(Error::UnlockFailed);
        }
        Ok(())
    }

    /// Fill all of `buf` from the region starting at `index`
    ///
    /// # Errors
    ///
    /// [`Error::AddressOutOfBounds`] if the range does not fit.
    pub fn try_read(&self, index: usize, buf: &mut [u8]) -> Result<()> {
        self.check_range(index, buf.len())?;
        self.read_range(index, buf, buf.len());
        Ok(())
    }

    fn check_range(&self, index: usize, len: usize) -> Result<()> {
        let size = self.len();
        match index.checked_add(len) {
            Some(end) if end <= size => Ok(()),
            _ => Err(Error::AddressOutOfBounds { index, len, size }),
        }
    }
}

impl<R: EepromRegisters> ReadStorage for Eeprom<R> {
    type Error = Error;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<()> {
        self.try_read(offset as usize, bytes)
    }

    fn capacity(&self) -> usize {
        self.len()
    }
}

impl<R: EepromRegisters> Storage for Eeprom<R> {
    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<()> {
        self.try_write(offset as usize, bytes)
    }
}
