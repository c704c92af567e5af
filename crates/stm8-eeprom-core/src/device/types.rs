//! Device geometry type definitions

/// Addresses of the flash controller registers used by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct RegisterMap {
    /// In-application programming status register (`FLASH_IAPSR`)
    pub iapsr: u32,
    /// Data EEPROM unprotection key register (`FLASH_DUKR`)
    pub dukr: u32,
}

impl RegisterMap {
    /// Create a new register map
    pub const fn new(iapsr: u32, dukr: u32) -> Self {
        Self { iapsr, dukr }
    }
}

/// Location and size of a data EEPROM region
///
/// `size` is the number of bytes in the region, so the last valid offset
/// is `size - 1`. Offsets passed to the driver are relative to
/// `base_address`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct EepromGeometry {
    /// Physical address of offset 0
    pub base_address: u32,
    /// Region size in bytes
    pub size: usize,
    /// Control register addresses
    pub registers: RegisterMap,
}

impl EepromGeometry {
    /// Create a new geometry
    pub const fn new(base_address: u32, size: usize, registers: RegisterMap) -> Self {
        Self {
            base_address,
            size,
            registers,
        }
    }

    /// Last valid offset, or `None` for an empty region
    pub const fn end(&self) -> Option<usize> {
        self.size.checked_sub(1)
    }

    /// Check if an offset falls inside the region
    pub const fn contains(&self, index: usize) -> bool {
        index < self.size
    }

    /// Physical address of an offset
    ///
    /// Does not check the offset against the region size.
    pub const fn address_of(&self, index: usize) -> u32 {
        self.base_address + index as u32
    }

    /// Number of bytes that may be transferred starting at `index`
    ///
    /// Returns `None` when `index` is at or past the end of the region.
    /// Otherwise `len` is clamped so the access stops at the last valid
    /// offset.
    pub fn clamp(&self, index: usize, len: usize) -> Option<usize> {
        if index >= self.size {
            return None;
        }
        Some(len.min(self.size - index))
    }
}

/// A known STM8 family member with a data EEPROM
#[derive(Debug, Clone, Copy)]
pub struct DeviceVariant {
    /// Canonical name of the variant
    pub name: &'static str,
    /// Part numbers sharing this geometry
    pub aliases: &'static [&'static str],
    /// Description
    pub description: &'static str,
    /// Data EEPROM geometry
    pub geometry: EepromGeometry,
}

impl DeviceVariant {
    /// Check if `name` matches the canonical name or one of the aliases
    ///
    /// Matching is ASCII case-insensitive. An alias also matches a longer
    /// part number that starts with it, so `stm8s103f3p6` finds the
    /// `STM8S103` entry.
    pub fn matches(&self, name: &str) -> bool {
        core::iter::once(&self.name)
            .chain(self.aliases.iter())
            .any(|candidate| starts_with_ignore_case(name, candidate))
    }
}

fn starts_with_ignore_case(name: &str, prefix: &str) -> bool {
    name.len() >= prefix.len()
        && name.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}
