//! STM8 device geometry and variant table
//!
//! This module describes where the data EEPROM and its control registers
//! live on each supported STM8 family member, as well as a table of
//! known variants for lookup by part number.

mod database;
mod types;

pub use database::*;
pub use types::*;
