#![cfg_attr(not(test), no_std)]

//! Bootloader entry handshake for nRF52840 keyboards.
//!
//! A retention register (GPREGRET) survives a warm reset. Writing a magic
//! value into it right before resetting tells the bootloader to stay in
//! firmware update mode instead of starting the application.

mod behavior;
mod boot_mode;
mod error;
mod ram;
pub mod reboot;
mod retention;
mod system;
mod trigger;

#[cfg(feature = "nrf52840")]
pub mod nrf;

#[cfg(test)]
mod fakes;

pub use behavior::*;
pub use boot_mode::*;
pub use error::Error;
pub use ram::*;
pub use reboot::{RebootConfig, RebootHandler, RebootType};
pub use retention::*;
pub use system::*;
pub use trigger::*;

/// Magic value checked by the Adafruit nRF52 UF2 bootloader on startup.
pub const DFU_MAGIC_UF2_RESET: u8 = 0x57;
