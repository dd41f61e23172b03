//! System-wide reboot override.
//!
//! Exactly one [`Reboot`] implementation is installed at startup; every reboot
//! request goes through it so the retention register always matches the
//! requested reboot type.

use core::convert::Infallible;

use fugit::MillisDurationU32;
use log::{error, info, warn};
use spin::Once;

use crate::{
    keep_powered, reset_and_park, Error, GpRegRet, RamLayout, RamPower, RamRegion, ResetKind,
    SystemControl, Targets, DFU_MAGIC_UF2_RESET,
};

pub const SYS_REBOOT_WARM: i32 = 0;
pub const SYS_REBOOT_COLD: i32 = 1;
pub const SYS_REBOOT_TO_BOOTLOADER: i32 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RebootType {
    Normal(ResetKind),
    Bootloader,
}

impl RebootType {
    /// Unknown codes are plain warm reboots.
    pub fn from_code(code: i32) -> Self {
        match code {
            SYS_REBOOT_COLD => RebootType::Normal(ResetKind::Cold),
            SYS_REBOOT_TO_BOOTLOADER => RebootType::Bootloader,
            _ => RebootType::Normal(ResetKind::Warm),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            RebootType::Normal(ResetKind::Warm) => SYS_REBOOT_WARM,
            RebootType::Normal(ResetKind::Cold) => SYS_REBOOT_COLD,
            RebootType::Bootloader => SYS_REBOOT_TO_BOOTLOADER,
        }
    }

    pub fn reset_kind(self) -> ResetKind {
        match self {
            RebootType::Normal(kind) => kind,
            RebootType::Bootloader => ResetKind::Warm,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct RebootConfig {
    pub magic: u8,
    /// Registers set on bootloader reboots and cleared on every other one.
    pub targets: Targets,
    pub force_ram_on_reboot: bool,
    pub ram: RamRegion,
    pub settle: MillisDurationU32,
}

impl RebootConfig {
    pub const DEFAULT: RebootConfig = RebootConfig {
        magic: DFU_MAGIC_UF2_RESET,
        targets: Targets::BOTH,
        force_ram_on_reboot: false,
        ram: RamLayout::NRF52840.region(),
        settle: MillisDurationU32::millis(10),
    };
}

impl Default for RebootConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

pub trait Reboot: Sync {
    /// Reboots with a raw reboot type code.
    fn reboot(&self, code: i32) -> !;
}

/// Sets the retention registers according to the reboot type before
/// resetting: the magic for bootloader reboots, zero for everything else.
pub struct RebootHandler<'a> {
    config: RebootConfig,
    registers: &'a dyn GpRegRet,
    ram: Option<&'a dyn RamPower>,
    system: &'a dyn SystemControl,
}

impl<'a> RebootHandler<'a> {
    pub const fn new(
        config: RebootConfig,
        registers: &'a dyn GpRegRet,
        system: &'a dyn SystemControl,
    ) -> Self {
        Self {
            config,
            registers,
            ram: None,
            system,
        }
    }

    pub const fn with_ram_power(mut self, ram: &'a dyn RamPower) -> Self {
        self.ram = Some(ram);
        self
    }

    /// Everything up to the reset itself.
    pub fn prepare(&self, code: i32) -> RebootType {
        info!("reboot requested with type {code}");

        let request = RebootType::from_code(code);
        let value = match request {
            RebootType::Bootloader => {
                info!("entering bootloader mode");
                self.config.magic
            }
            RebootType::Normal(_) => {
                info!("normal reboot (type {code})");
                0x00
            }
        };
        for register in self.config.targets.iter() {
            self.registers.set(register, value);
            info!("{register} set to {:#04x}", self.registers.get(register));
        }

        if self.config.force_ram_on_reboot {
            match self.ram {
                Some(ram) => {
                    keep_powered(ram, self.config.ram);
                }
                None => warn!("RAM power control unavailable, RAM may not survive the reset"),
            }
        }

        request
    }
}

impl Reboot for RebootHandler<'_> {
    fn reboot(&self, code: i32) -> ! {
        let request = self.prepare(code);
        reset_and_park(self.system, None, self.config.settle, request.reset_kind())
    }
}

static HOOK: Once<&'static dyn Reboot> = Once::new();

/// Installs the process-wide reboot handler. Only the first call succeeds.
pub fn install(hook: &'static dyn Reboot) -> Result<(), Error> {
    let mut installed = false;
    HOOK.call_once(|| {
        installed = true;
        hook
    });
    if installed {
        Ok(())
    } else {
        Err(Error::HookAlreadyInstalled)
    }
}

/// Reboots through the installed handler. Returns only if none is installed.
pub fn sys_reboot(request: RebootType) -> Result<Infallible, Error> {
    match HOOK.get() {
        Some(hook) => hook.reboot(request.code()),
        None => {
            error!("{}", Error::HookNotInstalled);
            Err(Error::HookNotInstalled)
        }
    }
}
