//! Register abstraction
//!
//! This module defines the trait the driver uses to reach the flash
//! controller registers and the data window, along with the bit and key
//! definitions of those registers.

mod flags;
mod traits;

pub use flags::*;
pub use traits::*;
