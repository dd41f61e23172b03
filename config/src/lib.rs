#![cfg_attr(not(test), no_std)]

pub use {bootloader_api as api, fugit};

#[macro_use]
mod macros;

use api::{
    BootloaderMode, RamLayout, RamRegion, RebootConfig, ResetKind, Targets, TriggerConfig,
    DFU_MAGIC_UF2_RESET,
};
use fugit::MillisDurationU32;

pub const SYSCLK: u32 = 64_000_000;

/// Time given to the retention register write before resetting.
pub const SETTLE_TIME: MillisDurationU32 = MillisDurationU32::millis(10);
pub const DEBOUNCE_TIME_MS: u32 = 5;

/// Key position reported for the boot key.
pub const BOOT_KEY_POSITION: u32 = 0;

pub const BOOTLOADER_MODE: BootloaderMode =
    select_mode(cfg!(feature = "uf2"), cfg!(feature = "mcuboot"));

pub const MAGIC: u8 = DFU_MAGIC_UF2_RESET;

pub const TARGETS: Targets = Targets {
    gpregret2: cfg!(feature = "gpregret2"),
};

pub const RESET_KIND: ResetKind = if cfg!(feature = "cold-reset") {
    ResetKind::Cold
} else {
    ResetKind::Warm
};

pub const FORCE_RAM_ON_REBOOT: bool = cfg!(feature = "force-ram-on-reboot");

pub const RAM: RamRegion = RamLayout::NRF52840.region();

pub const TRIGGER: TriggerConfig = TriggerConfig {
    mode: BOOTLOADER_MODE,
    magic: MAGIC,
    targets: TARGETS,
    reset: RESET_KIND,
    force_ram_on_reboot: FORCE_RAM_ON_REBOOT,
    ram: RAM,
    settle: SETTLE_TIME,
};

pub const REBOOT: RebootConfig = RebootConfig {
    magic: MAGIC,
    targets: TARGETS,
    force_ram_on_reboot: FORCE_RAM_ON_REBOOT,
    ram: RAM,
    settle: SETTLE_TIME,
};

/// MCUboot wins when both conventions are enabled.
pub const fn select_mode(uf2: bool, mcuboot: bool) -> BootloaderMode {
    if mcuboot {
        BootloaderMode::McuBoot
    } else if uf2 {
        BootloaderMode::Uf2
    } else {
        BootloaderMode::None
    }
}

pin_macro!($ boot_key_pin, p0, p0_11);
pin_macro!($ led_pin, p0, p0_15);
