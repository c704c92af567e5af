//! Memory-mapped register backend
//!
//! This module provides the backend that drives the real flash controller
//! on the target, using volatile loads and stores at the physical
//! addresses of a [`EepromGeometry`].
//!
//! # Ownership
//!
//! The lock state in `FLASH_IAPSR` is shared by everything on the chip and
//! has no mutual exclusion of its own. [`Mmio::take`] therefore hands out
//! at most one instance at a time; [`Mmio::release`] gives it back.

use core::cell::Cell;
use core::ptr;

use critical_section::Mutex;

use crate::device::EepromGeometry;
use crate::registers::{EepromRegisters, IapStatus};

static TAKEN: Mutex<Cell<bool>> = Mutex::new(Cell::new(false));

/// Volatile access to the flash controller of the running device
pub struct Mmio {
    geometry: &'static EepromGeometry,
}

impl Mmio {
    /// Take the single instance for `geometry`
    ///
    /// Returns `None` if an instance is already in use.
    pub fn take(geometry: &'static EepromGeometry) -> Option<Self> {
        let taken = critical_section::with(|cs| TAKEN.borrow(cs).replace(true));
        if taken {
            log::debug!("Data EEPROM registers are already taken");
            return None;
        }
        // SAFETY: the flag guarantees this is the only instance
        Some(unsafe { Self::steal(geometry) })
    }

    /// Create an instance without checking ownership
    ///
    /// # Safety
    ///
    /// The caller must ensure that:
    /// - `geometry` describes the device the code is running on
    /// - No other instance is used at the same time
    pub unsafe fn steal(geometry: &'static EepromGeometry) -> Self {
        Self { geometry }
    }

    /// Give the instance back so it can be taken again
    pub fn release(self) {
        critical_section::with(|cs| TAKEN.borrow(cs).set(false));
    }

    #[inline]
    fn read8(&self, addr: u32) -> u8 {
        // SAFETY: addresses come from the geometry of the running device
        unsafe { ptr::read_volatile(addr as usize as *const u8) }
    }

    #[inline]
    fn write8(&mut self, addr: u32, value: u8) {
        // SAFETY: addresses come from the geometry of the running device
        unsafe { ptr::write_volatile(addr as usize as *mut u8, value) }
    }
}

impl EepromRegisters for Mmio {
    fn geometry(&self) -> &EepromGeometry {
        self.geometry
    }

    fn read_status(&self) -> IapStatus {
        IapStatus::from_bits_retain(self.read8(self.geometry.registers.iapsr))
    }

    fn write_status(&mut self, status: IapStatus) {
        self.write8(self.geometry.registers.iapsr, status.bits());
    }

    fn write_key(&mut self, key: u8) {
        self.write8(self.geometry.registers.dukr, key);
    }

    fn read_data(&self, offset: usize) -> u8 {
        debug_assert!(offset < self.geometry.size);
        self.read8(self.geometry.address_of(offset))
    }

    fn write_data(&mut self, offset: usize, value: u8) {
        debug_assert!(offset < self.geometry.size);
        self.write8(self.geometry.address_of(offset), value);
    }
}
