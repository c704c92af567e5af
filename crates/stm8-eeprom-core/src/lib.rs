//! stm8-eeprom-core - Data EEPROM access for STM8 microcontrollers
//!
//! This crate provides byte-level read/write access to the data EEPROM
//! region of STM8 devices. It is designed to be `no_std` compatible and
//! runs on the target itself; the register layer is abstracted so the
//! same sequencing logic can be exercised against a simulated device.
//!
//! # Features
//!
//! - `std` - Enable standard library support (includes `alloc`) and serde
//!   derives on the geometry types
//! - `alloc` - Enable heap allocation
//!
//! # Example
//!
//! ```ignore
//! use stm8_eeprom_core::{device, mmio::Mmio, Eeprom};
//!
//! let variant = device::find_variant("stm8s103f3").unwrap();
//! let mut eeprom = Eeprom::new(Mmio::take(&variant.geometry).unwrap());
//!
//! // Counting API: the return value is the number of bytes written
//! let written = eeprom.write_range(0x10, b"hello", 5);
//! assert_eq!(written, 5);
//!
//! let mut buf = [0u8; 5];
//! eeprom.read_range(0x10, &mut buf, 5);
//! ```

#![no_std]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod device;
pub mod eeprom;
pub mod error;
pub mod mmio;
pub mod registers;

pub use eeprom::Eeprom;
pub use error::{Error, Result};
