//! Built-in table of STM8 variants
//!
//! Register addresses and region sizes follow the STM8S and STM8L
//! reference manuals. Every listed part stores its data EEPROM as a single
//! contiguous window.

use super::types::{DeviceVariant, EepromGeometry, RegisterMap};

/// Flash controller registers on STM8S/STM8AF devices
pub const STM8S_REGISTERS: RegisterMap = RegisterMap::new(0x505F, 0x5064);

/// Flash controller registers on STM8L/STM8AL devices
pub const STM8L_REGISTERS: RegisterMap = RegisterMap::new(0x5054, 0x5053);

/// Data EEPROM start on STM8S devices
pub const STM8S_EEPROM_START: u32 = 0x4000;

/// Data EEPROM start on STM8L devices
pub const STM8L_EEPROM_START: u32 = 0x1000;

/// All known variants
pub static VARIANTS: &[DeviceVariant] = &[
    DeviceVariant {
        name: "stm8s103",
        aliases: &["stm8s003", "stm8s903"],
        description: "STM8S low density (640 bytes)",
        geometry: EepromGeometry::new(STM8S_EEPROM_START, 640, STM8S_REGISTERS),
    },
    DeviceVariant {
        name: "stm8s105",
        aliases: &["stm8s005", "stm8af626"],
        description: "STM8S medium density (1 KiB)",
        geometry: EepromGeometry::new(STM8S_EEPROM_START, 1024, STM8S_REGISTERS),
    },
    DeviceVariant {
        name: "stm8s208",
        aliases: &["stm8s207", "stm8s007", "stm8af52"],
        description: "STM8S high density (2 KiB)",
        geometry: EepromGeometry::new(STM8S_EEPROM_START, 2048, STM8S_REGISTERS),
    },
    DeviceVariant {
        name: "stm8l152",
        aliases: &["stm8l151", "stm8l052"],
        description: "STM8L medium density (1 KiB)",
        geometry: EepromGeometry::new(STM8L_EEPROM_START, 1024, STM8L_REGISTERS),
    },
];

/// Look up a variant by part number
///
/// See [`DeviceVariant::matches`] for the matching rules.
pub fn find_variant(name: &str) -> Option<&'static DeviceVariant> {
    let name = name.trim();
    let variant = VARIANTS.iter().find(|v| v.matches(name));
    if variant.is_none() {
        log::debug!("No data EEPROM geometry known for '{}'", name);
    }
    variant
}
