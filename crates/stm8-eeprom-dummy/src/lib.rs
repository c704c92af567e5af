//! stm8-eeprom-dummy - Simulated STM8 flash controller for testing
//!
//! This crate provides an in-memory model of the STM8 flash controller
//! registers and the data EEPROM window. It's useful for exercising the
//! driver on a development host without real hardware.
//!
//! The model follows the reference manual where it matters to the driver:
//!
//! - `DUL` is set only by writing `DATA_KEY_1` then `DATA_KEY_2` to `DUKR`
//! - A wrong key locks `DUKR` out until the next [`DummyEeprom::reset`]
//! - Writing `IAPSR` can clear `DUL` but never set it
//! - Stores to the data window are ignored while `DUL` is clear, and set
//!   `WR_PG_DIS`
//! - `EOP` and `WR_PG_DIS` are cleared by reading `IAPSR`

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "alloc")]
use alloc::vec;
#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use core::cell::Cell;

use stm8_eeprom_core::device::{
    DeviceVariant, EepromGeometry, STM8S_EEPROM_START, STM8S_REGISTERS,
};
use stm8_eeprom_core::registers::{
    EepromRegisters, IapStatus, DATA_KEY_1, DATA_KEY_2, ERASED_BYTE,
};

/// Configuration for the dummy EEPROM
#[derive(Debug, Clone)]
pub struct DummyConfig {
    /// Geometry to simulate
    pub geometry: EepromGeometry,
    /// Initial value of every byte
    pub fill: u8,
}

impl Default for DummyConfig {
    fn default() -> Self {
        Self {
            geometry: EepromGeometry::new(STM8S_EEPROM_START, 128, STM8S_REGISTERS),
            fill: ERASED_BYTE,
        }
    }
}

impl DummyConfig {
    /// Configuration matching a known device variant
    pub fn for_variant(variant: &DeviceVariant) -> Self {
        Self {
            geometry: variant.geometry,
            ..Self::default()
        }
    }

    /// Configuration with a region of `size` bytes
    pub fn with_size(size: usize) -> Self {
        let mut config = Self::default();
        config.geometry.size = size;
        config
    }
}

/// Progress through the `DUKR` key sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyState {
    /// Waiting for the first key
    Idle,
    /// First key accepted, waiting for the second
    FirstKey,
    /// A wrong key was written; further keys are ignored until reset
    LockedOut,
}

/// Dummy data EEPROM
///
/// Emulates the flash controller registers and the data window in memory.
#[cfg(feature = "alloc")]
pub struct DummyEeprom {
    config: DummyConfig,
    data: Vec<u8>,
    status: Cell<IapStatus>,
    key_state: KeyState,
    key_log: Vec<u8>,
    unlock_fault: bool,
    data_reads: Cell<usize>,
    data_writes: usize,
    rejected_writes: usize,
    stray_accesses: Cell<usize>,
}

#[cfg(feature = "alloc")]
impl DummyEeprom {
    /// Create a new dummy EEPROM with the given configuration
    pub fn new(config: DummyConfig) -> Self {
        let data = vec![config.fill; config.geometry.size];
        Self {
            config,
            data,
            status: Cell::new(IapStatus::HVOFF),
            key_state: KeyState::Idle,
            key_log: Vec::new(),
            unlock_fault: false,
            data_reads: Cell::new(0),
            data_writes: 0,
            rejected_writes: 0,
            stray_accesses: Cell::new(0),
        }
    }

    /// Create a new dummy EEPROM with default configuration (128 bytes)
    pub fn new_default() -> Self {
        Self::new(DummyConfig::default())
    }

    /// Create a dummy EEPROM with pre-filled data
    pub fn with_data(config: DummyConfig, initial_data: &[u8]) -> Self {
        let mut eeprom = Self::new(config);
        let len = core::cmp::min(initial_data.len(), eeprom.data.len());
        eeprom.data[..len].copy_from_slice(&initial_data[..len]);
        eeprom
    }

    /// Get a reference to the EEPROM contents
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get a mutable reference to the EEPROM contents
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Get the configuration
    pub fn config(&self) -> &DummyConfig {
        &self.config
    }

    /// Current `IAPSR` value, without the clear-on-read side effect
    pub fn status(&self) -> IapStatus {
        self.status.get()
    }

    /// Every key written to `DUKR`, oldest first
    pub fn key_log(&self) -> &[u8] {
        &self.key_log
    }

    /// Forget the recorded keys
    pub fn clear_key_log(&mut self) {
        self.key_log.clear();
    }

    /// Make the controller ignore all unlock keys
    pub fn set_unlock_fault(&mut self, fault: bool) {
        self.unlock_fault = fault;
    }

    /// Simulate a device reset
    ///
    /// Locks the region, clears any key lockout and resets the status
    /// register. The EEPROM contents and the access counters are kept.
    pub fn reset(&mut self) {
        self.status.set(IapStatus::HVOFF);
        self.key_state = KeyState::Idle;
    }

    /// Number of bytes read from the data window
    pub fn data_reads(&self) -> usize {
        self.data_reads.get()
    }

    /// Number of bytes stored to the data window
    pub fn data_writes(&self) -> usize {
        self.data_writes
    }

    /// Number of stores ignored because the region was locked
    pub fn rejected_writes(&self) -> usize {
        self.rejected_writes
    }

    /// Number of data window accesses outside the region
    pub fn stray_accesses(&self) -> usize {
        self.stray_accesses.get()
    }

    /// Total number of data window accesses, including rejected ones
    pub fn data_accesses(&self) -> usize {
        self.data_reads() + self.data_writes + self.rejected_writes + self.stray_accesses()
    }

    fn is_unlocked(&self) -> bool {
        self.status.get().contains(IapStatus::DUL)
    }

    fn set_status(&self, flags: IapStatus) {
        self.status.set(self.status.get() | flags);
    }

    fn handle_key(&mut self, key: u8) {
        self.key_state = match (self.key_state, key) {
            (KeyState::LockedOut, _) => KeyState::LockedOut,
            (KeyState::Idle, DATA_KEY_1) => KeyState::FirstKey,
            (KeyState::FirstKey, DATA_KEY_2) => {
                log::trace!("Dummy data EEPROM unlocked");
                self.set_status(IapStatus::DUL);
                KeyState::Idle
            }
            (state, key) => {
                log::debug!(
                    "Unexpected key 0x{:02X} in state {:?}, DUKR locked out",
                    key,
                    state
                );
                KeyState::LockedOut
            }
        };
    }
}

#[cfg(feature = "alloc")]
impl EepromRegisters for DummyEeprom {
    fn geometry(&self) -> &EepromGeometry {
        &self.config.geometry
    }

    fn read_status(&self) -> IapStatus {
        let status = self.status.get();
        self.status.set(status - (IapStatus::EOP | IapStatus::WR_PG_DIS));
        status
    }

    fn write_status(&mut self, status: IapStatus) {
        let mut current = self.status.get();
        for flag in [IapStatus::DUL, IapStatus::PUL] {
            if !status.contains(flag) {
                current.remove(flag);
            }
        }
        self.status.set(current);
    }

    fn write_key(&mut self, key: u8) {
        self.key_log.push(key);
        if self.unlock_fault {
            log::trace!("Dummy unlock fault, ignoring key 0x{:02X}", key);
            return;
        }
        self.handle_key(key);
    }

    fn read_data(&self, offset: usize) -> u8 {
        match self.data.get(offset) {
            Some(&byte) => {
                self.data_reads.set(self.data_reads.get() + 1);
                byte
            }
            None => {
                self.stray_accesses.set(self.stray_accesses.get() + 1);
                ERASED_BYTE
            }
        }
    }

    fn write_data(&mut self, offset: usize, value: u8) {
        if offset >= self.data.len() {
            self.stray_accesses.set(self.stray_accesses.get() + 1);
            return;
        }
        if !self.is_unlocked() {
            self.rejected_writes += 1;
            self.set_status(IapStatus::WR_PG_DIS);
            return;
        }
        self.data[offset] = value;
        self.data_writes += 1;
        self.set_status(IapStatus::EOP);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stm8_eeprom_core::device::find_variant;
    use stm8_eeprom_core::registers::DATA_UNLOCK_SEQUENCE;
    use stm8_eeprom_core::{Eeprom, Error};

    fn ramp(len: usize) -> Vec<u8> {
        (1..=len as u8).collect()
    }

    #[test]
    fn test_key_sequence_unlocks() {
        let mut dummy = DummyEeprom::new_default();
        assert!(!dummy.status().contains(IapStatus::DUL));

        dummy.write_key(DATA_KEY_1);
        assert!(!dummy.status().contains(IapStatus::DUL));
        dummy.write_key(DATA_KEY_2);
        assert!(dummy.status().contains(IapStatus::DUL));
    }

    #[test]
    fn test_wrong_key_locks_out_until_reset() {
        let mut dummy = DummyEeprom::new_default();
        dummy.write_key(DATA_KEY_2);
        dummy.write_key(DATA_KEY_1);
        dummy.write_key(DATA_KEY_2);
        assert!(!dummy.status().contains(IapStatus::DUL));

        dummy.reset();
        dummy.write_key(DATA_KEY_1);
        dummy.write_key(DATA_KEY_2);
        assert!(dummy.status().contains(IapStatus::DUL));
    }

    #[test]
    fn test_status_write_cannot_set_dul() {
        let mut dummy = DummyEeprom::new_default();
        dummy.write_status(IapStatus::DUL);
        assert!(!dummy.status().contains(IapStatus::DUL));
    }

    #[test]
    fn test_locked_store_is_rejected() {
        let mut dummy = DummyEeprom::new_default();
        dummy.write_data(3, 0x42);
        assert_eq!(dummy.data()[3], ERASED_BYTE);
        assert_eq!(dummy.rejected_writes(), 1);

        // WR_PG_DIS is cleared by the first read
        assert!(dummy.read_status().contains(IapStatus::WR_PG_DIS));
        assert!(!dummy.read_status().contains(IapStatus::WR_PG_DIS));
    }

    #[test]
    fn test_unlock_is_idempotent() {
        let mut eeprom = Eeprom::new(DummyEeprom::new_default());

        eeprom.unlock();
        eeprom.unlock();

        assert!(eeprom.is_unlocked());
        assert_eq!(eeprom.registers().key_log(), &DATA_UNLOCK_SEQUENCE[..]);
    }

    #[test]
    fn test_lock_clears_only_dul() {
        let mut eeprom = Eeprom::new(DummyEeprom::new_default());
        eeprom.unlock();
        eeprom.lock();

        assert!(!eeprom.is_unlocked());
        assert!(eeprom.registers().status().contains(IapStatus::HVOFF));

        // Locking a locked region is harmless
        eeprom.lock();
        assert!(!eeprom.is_unlocked());
    }

    #[test]
    fn test_write_range_clamps_at_end() {
        let mut eeprom = Eeprom::new(DummyEeprom::new_default());
        let data = ramp(10);

        assert_eq!(eeprom.write_range(120, &data, 10), 8);
        assert!(!eeprom.is_unlocked());

        let mut buf = [0u8; 10];
        assert_eq!(eeprom.read_range(120, &mut buf, 10), 8);
        assert_eq!(&buf[..8], &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(&buf[8..], &[0, 0]);
        assert_eq!(eeprom.registers().stray_accesses(), 0);
    }

    #[test]
    fn test_write_range_out_of_range_touches_nothing() {
        let mut dummy = DummyEeprom::new_default();
        let mut eeprom = Eeprom::new(&mut dummy);

        assert_eq!(eeprom.write_range(200, &[1, 2, 3, 4, 5], 5), 0);
        assert_eq!(eeprom.write_range(128, &[1], 1), 0);

        assert!(dummy.key_log().is_empty());
        assert_eq!(dummy.data_accesses(), 0);
        assert!(dummy.data().iter().all(|&b| b == ERASED_BYTE));
    }

    #[test]
    fn test_read_range_out_of_range_touches_nothing() {
        let dummy = DummyEeprom::new_default();
        let eeprom = Eeprom::new(dummy);

        let mut buf = [0xAAu8; 4];
        assert_eq!(eeprom.read_range(128, &mut buf, 4), 0);
        assert_eq!(eeprom.read_range(500, &mut buf, 4), 0);
        assert_eq!(buf, [0xAA; 4]);
        assert_eq!(eeprom.registers().data_accesses(), 0);
    }

    #[test]
    fn test_clamped_length_over_every_offset() {
        let mut eeprom = Eeprom::new(DummyEeprom::new_default());
        let data = [0x5Au8; 32];

        for index in 100..128 {
            let expected = (128 - index).min(32);
            assert_eq!(eeprom.write_range(index, &data, 32), expected);

            let mut buf = [0u8; 32];
            assert_eq!(eeprom.read_range(index, &mut buf, 32), expected);
        }
        assert_eq!(eeprom.registers().stray_accesses(), 0);
    }

    #[test]
    fn test_length_bounded_by_buffer() {
        let mut eeprom = Eeprom::new(DummyEeprom::new_default());

        assert_eq!(eeprom.write_range(0, &[9, 8, 7], 10), 3);

        let mut buf = [0u8; 2];
        assert_eq!(eeprom.read_range(0, &mut buf, 10), 2);
        assert_eq!(buf, [9, 8]);
    }

    #[test]
    fn test_round_trip_preserves_neighbours() {
        let initial: Vec<u8> = (0..128).map(|i| i as u8).collect();
        let dummy = DummyEeprom::with_data(DummyConfig::default(), &initial);
        let mut eeprom = Eeprom::new(dummy);

        assert_eq!(eeprom.write_range(40, &[0xDE, 0xAD, 0xBE, 0xEF], 4), 4);

        let mut buf = [0u8; 8];
        assert_eq!(eeprom.read_range(38, &mut buf, 8), 8);
        assert_eq!(buf, [38, 39, 0xDE, 0xAD, 0xBE, 0xEF, 44, 45]);
    }

    #[test]
    fn test_unlock_fault_writes_nothing() {
        let mut dummy = DummyEeprom::new_default();
        dummy.set_unlock_fault(true);
        let mut eeprom = Eeprom::new(&mut dummy);

        assert_eq!(eeprom.write_range(0, &[1, 2, 3], 3), 0);
        assert!(!eeprom.is_unlocked());

        eeprom.write_byte(5, 0x77);
        assert!(!eeprom.is_unlocked());

        assert_eq!(eeprom.try_write(0, &[1]), Err(Error::UnlockFailed));
        assert!(!eeprom.is_unlocked());

        assert_eq!(dummy.data_writes(), 0);
        assert!(dummy.data().iter().all(|&b| b == ERASED_BYTE));
    }

    #[test]
    fn test_write_byte() {
        let mut eeprom = Eeprom::new(DummyEeprom::new_default());

        eeprom.write_byte(0, 0x11);
        eeprom.write_byte(127, 0x22);

        assert!(!eeprom.is_unlocked());
        assert_eq!(eeprom.read_byte(0), 0x11);
        assert_eq!(eeprom.read_byte(127), 0x22);
    }

    #[test]
    fn test_write_byte_out_of_range_is_dropped() {
        let mut eeprom = Eeprom::new(DummyEeprom::new_default());

        eeprom.write_byte(128, 0x33);

        assert_eq!(eeprom.registers().stray_accesses(), 0);
        assert!(eeprom.registers().key_log().is_empty());
        assert_eq!(eeprom.read_byte(128), ERASED_BYTE);
    }

    #[test]
    fn test_update_byte_skips_equal_value() {
        let dummy = DummyEeprom::with_data(DummyConfig::default(), &[0x10, 0x20]);
        let mut eeprom = Eeprom::new(dummy);

        eeprom.update_byte(1, 0x20);
        assert!(eeprom.registers().key_log().is_empty());
        assert_eq!(eeprom.registers().data_writes(), 0);

        eeprom.update_byte(1, 0x21);
        assert_eq!(eeprom.registers().key_log(), &DATA_UNLOCK_SEQUENCE[..]);
        assert_eq!(eeprom.read_byte(1), 0x21);
    }

    #[test]
    fn test_put_and_get() {
        let mut eeprom = Eeprom::new(DummyEeprom::new_default());

        assert_eq!(eeprom.put(10, &0xCAFE_F00Du32), 4);
        assert_eq!(eeprom.get::<u32>(10), Some(0xCAFE_F00D));
        assert_eq!(&eeprom.registers().data()[10..14], &0xCAFE_F00Du32.to_ne_bytes());

        // Writing the same value again stores nothing
        let writes = eeprom.registers().data_writes();
        assert_eq!(eeprom.put(10, &0xCAFE_F00Du32), 4);
        assert_eq!(eeprom.registers().data_writes(), writes);
    }

    #[test]
    fn test_get_past_end() {
        let mut eeprom = Eeprom::new(DummyEeprom::new_default());

        assert_eq!(eeprom.get::<u32>(125), None);
        assert_eq!(eeprom.get::<u32>(124), Some(0));
        assert_eq!(eeprom.put(126, &u32::MAX), 2);
        assert_eq!(eeprom.get::<u16>(126), Some(u16::MAX));
    }

    #[test]
    fn test_try_write_and_read() {
        let mut eeprom = Eeprom::new(DummyEeprom::new_default());

        eeprom.try_write(124, &[1, 2, 3, 4]).unwrap();
        assert!(!eeprom.is_unlocked());

        let mut buf = [0u8; 4];
        eeprom.try_read(124, &mut buf).unwrap();
        assert_eq!(buf, [1, 2, 3, 4]);
    }

    #[test]
    fn test_try_write_out_of_bounds() {
        let mut eeprom = Eeprom::new(DummyEeprom::new_default());

        assert_eq!(
            eeprom.try_write(125, &[1, 2, 3, 4]),
            Err(Error::AddressOutOfBounds {
                index: 125,
                len: 4,
                size: 128
            })
        );
        assert!(eeprom.registers().key_log().is_empty());

        let mut buf = [0u8; 2];
        assert!(eeprom.try_read(usize::MAX, &mut buf).is_err());
        assert_eq!(eeprom.registers().data_accesses(), 0);
    }

    #[test]
    fn test_embedded_storage() {
        use embedded_storage::{ReadStorage, Storage};

        let mut eeprom = Eeprom::new(DummyEeprom::new_default());
        assert_eq!(eeprom.capacity(), 128);

        Storage::write(&mut eeprom, 0x20, b"stm8").unwrap();
        let mut buf = [0u8; 4];
        ReadStorage::read(&mut eeprom, 0x20, &mut buf).unwrap();
        assert_eq!(&buf, b"stm8");

        assert!(Storage::write(&mut eeprom, 0x7E, b"stm8").is_err());
    }

    #[test]
    fn test_variant_geometry() {
        let variant = find_variant("stm8s105").unwrap();
        let mut eeprom = Eeprom::new(DummyEeprom::new(DummyConfig::for_variant(variant)));

        assert_eq!(eeprom.len(), 1024);
        assert_eq!(eeprom.end(), Some(1023));
        assert_eq!(eeprom.write_range(1020, &[0xFF; 8], 8), 4);
    }

    #[test]
    fn test_empty_region() {
        let mut eeprom = Eeprom::new(DummyEeprom::new(DummyConfig::with_size(0)));

        assert!(eeprom.is_empty());
        assert_eq!(eeprom.write_range(0, &[1], 1), 0);
        eeprom.write_byte(0, 1);
        assert_eq!(eeprom.registers().data_accesses(), 0);
    }
}
