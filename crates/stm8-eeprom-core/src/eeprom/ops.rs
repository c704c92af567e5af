//! Lock handling and the counting read/write API

use super::Eeprom;
use crate::registers::{EepromRegisters, IapStatus, DATA_UNLOCK_SEQUENCE};

impl<R: EepromRegisters> Eeprom<R> {
    /// Check whether the data EEPROM is currently unlocked
    ///
    /// Reads the `DUL` flag of `FLASH_IAPSR`. Does not change the lock state.
    pub fn is_unlocked(&self) -> bool {
        self.regs.read_status().contains(IapStatus::DUL)
    }

    /// Unlock the data EEPROM for writing
    ///
    /// Writes the two-key sequence to `FLASH_DUKR` unless the region is
    /// already unlocked, so calling it repeatedly writes the keys once.
    /// Whether the hardware accepted the keys is not reported; check
    /// [`is_unlocked`](Self::is_unlocked) afterwards.
    pub fn unlock(&mut self) {
        if self.is_unlocked() {
            return;
        }
        critical_section::with(|_| {
            log::trace!("Writing data EEPROM unlock keys");
            for key in DATA_UNLOCK_SEQUENCE {
                self.regs.write_key(key);
            }
        });
    }

    /// Lock the data EEPROM again
    ///
    /// Clears `DUL` and leaves the other status bits untouched. Always
    /// safe to call, also when the region is already locked.
    pub fn lock(&mut self) {
        let status = self.regs.read_status();
        self.regs.write_status(status - IapStatus::DUL);
    }

    /// Write a single byte (Arduino `EEPROM.write`)
    ///
    /// Unlocks the region, stores `value` at `index` only if the unlock
    /// took effect, then locks the region again. Nothing is reported back:
    /// if the unlock fails the byte is silently dropped.
    ///
    /// An `index` outside the region is dropped as well (with a warning
    /// in the log) rather than stored past the end of the window.
    pub fn write_byte(&mut self, index: usize, value: u8) {
        if !self.geometry().contains(index) {
            log::warn!(
                "Dropping write of 0x{:02X} to offset 0x{:04X}: region is {} bytes",
                value,
                index,
                self.len()
            );
            return;
        }

        critical_section::with(|_| {
            self.unlock();
            if self.is_unlocked() {
                self.regs.write_data(index, value);
            } else {
                log::warn!(
                    "Data EEPROM unlock failed, byte at 0x{:04X} not written",
                    index
                );
            }
            self.lock();
        });
    }

    /// Write up to `length` bytes from `buffer` starting at `index`
    ///
    /// Returns the number of bytes actually written:
    ///
    /// - 0 if `index` is at or past the end of the region (no hardware
    ///   access is made)
    /// - fewer than `length` if the range runs past the end of the region
    ///   or past the end of `buffer`; the write stops at the last valid
    ///   offset
    /// - 0 if the region could not be unlocked
    ///
    /// The region is locked again afterwards in every case. A caller that
    /// ignores the returned count will silently lose data.
    pub fn write_range(&mut self, index: usize, buffer: &[u8], length: usize) -> usize {
        let len = match self.clamp(index, length.min(buffer.len())) {
            Some(len) => len,
            None => return 0,
        };
        if len < length {
            log::debug!(
                "Write of {} bytes at 0x{:04X} clamped to {} bytes",
                length,
                index,
                len
            );
        }

        critical_section::with(|_| {
            let mut written = 0;
            self.unlock();
            if self.is_unlocked() {
                for (offset, &byte) in (index..).zip(&buffer[..len]) {
                    self.regs.write_data(offset, byte);
                    written += 1;
                }
            } else {
                log::warn!(
                    "Data EEPROM unlock failed, {} bytes at 0x{:04X} not written",
                    len,
                    index
                );
            }
            self.lock();
            written
        })
    }

    /// Read up to `length` bytes starting at `index` into `buffer`
    ///
    /// Returns the number of bytes copied: 0 if `index` is past the end of
    /// the region, otherwise `length` clamped to the region end and to
    /// the size of `buffer`. Reading needs no unlock.
    pub fn read_range(&self, index: usize, buffer: &mut [u8], length: usize) -> usize {
        let len = match self.clamp(index, length.min(buffer.len())) {
            Some(len) => len,
            None => return 0,
        };
        if len < length {
            log::debug!(
                "Read of {} bytes at 0x{:04X} clamped to {} bytes",
                length,
                index,
                len
            );
        }

        critical_section::with(|_| self.regs.read_block(index, &mut buffer[..len]));
        len
    }

    /// Clamp a request to the region, logging rejected offsets
    fn clamp(&self, index: usize, len: usize) -> Option<usize> {
        let clamped = self.geometry().clamp(index, len);
        if clamped.is_none() {
            log::debug!(
                "Offset 0x{:04X} is outside the {}-byte region",
                index,
                self.len()
            );
        }
        clamped
    }
}
