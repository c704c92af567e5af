//! Flash controller register bits and unlock keys

use bitflags::bitflags;

bitflags! {
    /// `FLASH_IAPSR` status flags
    ///
    /// Naming follows the STM8 reference manuals.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct IapStatus: u8 {
        /// Write attempted to a protected page
        const WR_PG_DIS = 1 << 0;
        /// Program memory unlocked
        const PUL       = 1 << 1;
        /// End of programming
        const EOP       = 1 << 2;
        /// Data EEPROM unlocked
        const DUL       = 1 << 3;
        /// High voltage off (no programming in progress)
        const HVOFF     = 1 << 6;
    }
}

impl Default for IapStatus {
    fn default() -> Self {
        IapStatus::empty()
    }
}

/// First key written to `FLASH_DUKR`
pub const DATA_KEY_1: u8 = 0xAE;

/// Second key written to `FLASH_DUKR`
pub const DATA_KEY_2: u8 = 0x56;

/// Unlock sequence, in the order the hardware expects
pub const DATA_UNLOCK_SEQUENCE: [u8; 2] = [DATA_KEY_1, DATA_KEY_2];

/// Value of an erased data EEPROM byte
pub const ERASED_BYTE: u8 = 0x00;
