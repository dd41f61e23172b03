use fugit::MillisDurationU32;
use log::{error, info, warn};

use crate::{
    reset_and_park, BehaviorStatus, BootMode, BootModeType, Error, RamLayout, RamPower,
    RamRegion, ResetKind, RetentionPort, SystemControl, Targets, WritePath,
    DFU_MAGIC_UF2_RESET,
};

/// Bootloader convention to hand over to, chosen at build time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BootloaderMode {
    /// Magic byte in the retention registers, UF2/DFU bootloaders.
    Uf2,
    /// Generic boot mode store, MCUboot.
    McuBoot,
    None,
}

#[derive(Clone, Copy, Debug)]
pub struct TriggerConfig {
    pub mode: BootloaderMode,
    pub magic: u8,
    pub targets: Targets,
    pub reset: ResetKind,
    pub force_ram_on_reboot: bool,
    pub ram: RamRegion,
    pub settle: MillisDurationU32,
}

impl TriggerConfig {
    pub const DEFAULT: TriggerConfig = TriggerConfig {
        mode: BootloaderMode::Uf2,
        magic: DFU_MAGIC_UF2_RESET,
        targets: Targets::BOTH,
        reset: ResetKind::Warm,
        force_ram_on_reboot: false,
        ram: RamLayout::NRF52840.region(),
        settle: MillisDurationU32::millis(10),
    };
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Reboots into the bootloader. Invoking it is irreversible except when no
/// bootloader mode is configured.
pub struct BootloaderTrigger<'a> {
    config: TriggerConfig,
    retention: RetentionPort<'a>,
    boot_mode: Option<&'a dyn BootMode>,
    ram: Option<&'a dyn RamPower>,
    system: &'a dyn SystemControl,
}

impl<'a> BootloaderTrigger<'a> {
    pub const fn new(
        config: TriggerConfig,
        retention: RetentionPort<'a>,
        system: &'a dyn SystemControl,
    ) -> Self {
        Self {
            config,
            retention,
            boot_mode: None,
            ram: None,
            system,
        }
    }

    pub const fn with_boot_mode(mut self, boot_mode: &'a dyn BootMode) -> Self {
        self.boot_mode = Some(boot_mode);
        self
    }

    pub const fn with_ram_power(mut self, ram: &'a dyn RamPower) -> Self {
        self.ram = Some(ram);
        self
    }

    /// Returns only when no bootloader mode is configured.
    pub fn fire(&self) -> BehaviorStatus {
        info!("bootloader entry requested, mode {:?}", self.config.mode);

        match self.config.mode {
            BootloaderMode::Uf2 => self.write_magic(),
            BootloaderMode::McuBoot => self.set_boot_mode(),
            BootloaderMode::None => {
                error!("no bootloader mode configured, not rebooting");
                return BehaviorStatus::Opaque;
            }
        }

        info!("rebooting into bootloader");
        let ram = match (self.config.force_ram_on_reboot, self.config.reset, self.ram) {
            (true, ResetKind::Warm, Some(ram)) => Some((ram, self.config.ram)),
            (true, ResetKind::Warm, None) => {
                warn!("RAM power control unavailable, RAM may not survive the reset");
                None
            }
            _ => None,
        };
        reset_and_park(self.system, ram, self.config.settle, self.config.reset)
    }

    fn write_magic(&self) {
        let report = self
            .retention
            .write_targets(self.config.targets, self.config.magic);
        if report.iter().all(|(_, path)| *path == WritePath::Skipped) {
            warn!("bootloader magic {:#04x} was not written", self.config.magic);
        }
    }

    fn set_boot_mode(&self) {
        let result = match self.boot_mode {
            Some(boot_mode) => boot_mode.set(BootModeType::Bootloader),
            None => Err(Error::BootModeApiFailed),
        };
        if let Err(e) = result {
            error!("failed to set boot mode: {e}");
        }
    }
}
