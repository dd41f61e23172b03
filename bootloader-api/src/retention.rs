use core::fmt;

use heapless::Vec;
use log::{debug, info, warn};

use crate::Error;

/// General purpose retention registers of the nRF52 POWER block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Register {
    Gpregret,
    Gpregret2,
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Register::Gpregret => f.write_str("GPREGRET"),
            Register::Gpregret2 => f.write_str("GPREGRET2"),
        }
    }
}

/// Direct access to the retention registers.
pub trait GpRegRet: Sync {
    fn get(&self, register: Register) -> u8;

    fn set(&self, register: Register, value: u8);
}

/// A retained memory device, i.e. a small area that keeps its content over a
/// warm reset.
pub trait RetainedMem: Sync {
    fn is_ready(&self) -> bool;

    fn size(&self) -> usize;

    fn read(&self, offset: usize, buf: &mut [u8]) -> Result<(), Error>;

    fn write(&self, offset: usize, data: &[u8]) -> Result<(), Error>;

    fn clear(&self) -> Result<(), Error>;
}

/// Bounds check shared by retained memory implementations.
pub fn check_range(size: usize, offset: usize, len: usize) -> Result<(), Error> {
    match offset.checked_add(len) {
        Some(end) if end <= size => Ok(()),
        _ => Err(Error::OutOfRange),
    }
}

/// Which registers receive the bootloader magic. GPREGRET always does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Targets {
    pub gpregret2: bool,
}

impl Targets {
    pub const GPREGRET: Targets = Targets { gpregret2: false };
    pub const BOTH: Targets = Targets { gpregret2: true };

    pub fn iter(self) -> impl Iterator<Item = Register> {
        core::iter::once(Register::Gpregret).chain(self.gpregret2.then_some(Register::Gpregret2))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WritePath {
    RetainedMem,
    Direct,
    Skipped,
}

pub type WriteReport = Vec<(Register, WritePath), 2>;

/// Everything that can reach the retention registers on the current board.
///
/// Any part may be missing: a retained memory device is preferred, the
/// register block is the fallback, and with neither the write is skipped.
#[derive(Clone, Copy, Default)]
pub struct RetentionPort<'a> {
    gpregret: Option<&'a dyn RetainedMem>,
    gpregret2: Option<&'a dyn RetainedMem>,
    direct: Option<&'a dyn GpRegRet>,
}

impl<'a> RetentionPort<'a> {
    pub const fn new() -> Self {
        Self {
            gpregret: None,
            gpregret2: None,
            direct: None,
        }
    }

    pub const fn with_retained(mut self, register: Register, mem: &'a dyn RetainedMem) -> Self {
        match register {
            Register::Gpregret => self.gpregret = Some(mem),
            Register::Gpregret2 => self.gpregret2 = Some(mem),
        }
        self
    }

    pub const fn with_direct(mut self, registers: &'a dyn GpRegRet) -> Self {
        self.direct = Some(registers);
        self
    }

    fn retained(&self, register: Register) -> Option<&'a dyn RetainedMem> {
        match register {
            Register::Gpregret => self.gpregret,
            Register::Gpregret2 => self.gpregret2,
        }
    }

    /// Current value of `register`, if any access path is available.
    pub fn read(&self, register: Register) -> Option<u8> {
        if let Some(mem) = self.retained(register).filter(|mem| mem.is_ready()) {
            let mut value = [0u8; 1];
            if mem.read(0, &mut value).is_ok() {
                return Some(value[0]);
            }
        }
        self.direct.map(|regs| regs.get(register))
    }

    /// Single best-effort write per access path, no retries.
    pub fn write(&self, register: Register, value: u8) -> WritePath {
        if let Some(mem) = self.retained(register) {
            match write_retained(mem, value) {
                Ok(()) => return WritePath::RetainedMem,
                Err(e) => warn!("{register}: {e}, falling back to direct register write"),
            }
        }

        match self.direct {
            Some(regs) => {
                regs.set(register, value);
                if regs.get(register) != value {
                    warn!("{register}: {}", Error::RegisterWriteFailed);
                }
                WritePath::Direct
            }
            None => {
                warn!("{register} is not accessible on this hardware, skipping write");
                WritePath::Skipped
            }
        }
    }

    /// Writes `value` to every register in `targets`, logging the values
    /// before and after.
    pub fn write_targets(&self, targets: Targets, value: u8) -> WriteReport {
        let mut report = WriteReport::new();
        for register in targets.iter() {
            let before = self.read(register);
            let path = self.write(register, value);
            let after = self.read(register);
            info!("{register}: {before:02x?} -> {after:02x?} ({path:?})");
            // capacity matches the number of registers
            let _ = report.push((register, path));
        }
        debug!("retention write report: {report:?}");
        report
    }
}

fn write_retained(mem: &dyn RetainedMem, value: u8) -> Result<(), Error> {
    if !mem.is_ready() {
        return Err(Error::DeviceNotReady);
    }
    mem.write(0, &[value])
}
