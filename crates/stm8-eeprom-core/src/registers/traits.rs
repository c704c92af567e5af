//! Register access trait

use super::flags::IapStatus;
use crate::device::EepromGeometry;

/// Access to the flash controller registers and the data EEPROM window
///
/// This trait represents the hardware the driver talks to. The driver
/// owns all sequencing (unlock, write, lock) and all bounds handling, so
/// implementations only perform the individual accesses:
///
/// - **Memory-mapped hardware** (`Mmio`): volatile loads and stores at the
///   physical addresses given by the geometry
/// - **Simulated hardware** (e.g. `stm8-eeprom-dummy`): an in-memory model
///   of the registers, used for host-side testing
///
/// Offsets passed to `read_data`, `write_data` and `read_block` are
/// relative to the region base and have already been checked against
/// `geometry().size` by the driver.
pub trait EepromRegisters {
    /// Geometry of the region these registers control
    fn geometry(&self) -> &EepromGeometry;

    /// Read `FLASH_IAPSR`
    fn read_status(&self) -> IapStatus;

    /// Write `FLASH_IAPSR`
    ///
    /// On hardware only clearing `DUL` and `PUL` has an effect; the other
    /// bits are read-only or cleared by reading.
    fn write_status(&mut self, status: IapStatus);

    /// Write one key to `FLASH_DUKR`
    fn write_key(&mut self, key: u8);

    /// Read the byte at `offset`
    fn read_data(&self, offset: usize) -> u8;

    /// Store a byte at `offset`
    ///
    /// The hardware ignores the store while the region is locked.
    fn write_data(&mut self, offset: usize, value: u8);

    /// Copy `buf.len()` bytes starting at `offset` into `buf`
    ///
    /// The default implementation reads byte by byte. Backends with a
    /// faster block path may override it.
    fn read_block(&self, offset: usize, buf: &mut [u8]) {
        for (i, byte) in buf.iter_mut().enumerate() {
            *byte = self.read_data(offset + i);
        }
    }
}

impl<T: EepromRegisters + ?Sized> EepromRegisters for &mut T {
    fn geometry(&self) -> &EepromGeometry {
        (**self).geometry()
    }

    fn read_status(&self) -> IapStatus {
        (**self).read_status()
    }

    fn write_status(&mut self, status: IapStatus) {
        (**self).write_status(status)
    }

    fn write_key(&mut self, key: u8) {
        (**self).write_key(key)
    }

    fn read_data(&self, offset: usize) -> u8 {
        (**self).read_data(offset)
    }

    fn write_data(&mut self, offset: usize, value: u8) {
        (**self).write_data(offset, value)
    }

    fn read_block(&self, offset: usize, buf: &mut [u8]) {
        (**self).read_block(offset, buf)
    }
}
