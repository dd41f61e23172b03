//! nRF52840 backends for the hardware traits.

use cortex_m::peripheral::SCB;
use fugit::MillisDurationU32;
use nrf52840_hal::pac::{power::RegisterBlock, POWER};

use crate::{
    check_range, Error, GpRegRet, RamLayout, RamPower, Register, ResetKind, RetainedMem,
    SystemControl,
};

/// The POWER block: retention registers and RAM section power.
///
/// Every access is a single register read or write, so handing out several
/// of these is fine.
pub struct NrfPower {
    _private: (),
}

impl NrfPower {
    pub const fn new() -> Self {
        Self { _private: () }
    }

    fn regs(&self) -> &'static RegisterBlock {
        unsafe { &*POWER::ptr() }
    }
}

impl GpRegRet for NrfPower {
    fn get(&self, register: Register) -> u8 {
        let power = self.regs();
        let bits = match register {
            Register::Gpregret => power.gpregret.read().bits(),
            Register::Gpregret2 => power.gpregret2.read().bits(),
        };
        bits as u8
    }

    fn set(&self, register: Register, value: u8) {
        let power = self.regs();
        match register {
            Register::Gpregret => power.gpregret.write(|w| unsafe { w.bits(value as u32) }),
            Register::Gpregret2 => power.gpregret2.write(|w| unsafe { w.bits(value as u32) }),
        }
    }
}

impl RamPower for NrfPower {
    fn layout(&self) -> &RamLayout {
        &RamLayout::NRF52840
    }

    fn power_on(&self, block: usize, sections: u32) {
        // upper half of POWERSET holds the System OFF retention bits
        if let Some(ram) = self.regs().ram.get(block) {
            ram.powerset.write(|w| unsafe { w.bits(sections & 0xFFFF) });
        }
    }
}

/// One retention register exposed as a one byte retained memory area.
pub struct GpregretMem {
    register: Register,
    power: NrfPower,
}

impl GpregretMem {
    pub const fn new(register: Register) -> Self {
        Self {
            register,
            power: NrfPower::new(),
        }
    }
}

impl RetainedMem for GpregretMem {
    fn is_ready(&self) -> bool {
        true
    }

    fn size(&self) -> usize {
        1
    }

    fn read(&self, offset: usize, buf: &mut [u8]) -> Result<(), Error> {
        check_range(self.size(), offset, buf.len())?;
        if let Some(byte) = buf.first_mut() {
            *byte = self.power.get(self.register);
        }
        Ok(())
    }

    fn write(&self, offset: usize, data: &[u8]) -> Result<(), Error> {
        check_range(self.size(), offset, data.len())?;
        if let Some(byte) = data.first() {
            self.power.set(self.register, *byte);
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), Error> {
        self.power.set(self.register, 0);
        Ok(())
    }
}

/// Reset, sleep and busy waiting on the Cortex-M4 core.
pub struct CortexM {
    sysclk_hz: u32,
}

impl CortexM {
    pub const fn new(sysclk_hz: u32) -> Self {
        Self { sysclk_hz }
    }
}

impl SystemControl for CortexM {
    // SYSRESETREQ for both kinds; RAM survives whenever its sections stay
    // powered.
    fn reset(&self, _kind: ResetKind) {
        cortex_m::interrupt::disable();
        SCB::sys_reset()
    }

    fn idle(&self) {
        cortex_m::asm::wfi();
    }

    fn delay(&self, duration: MillisDurationU32) {
        let cycles_per_ms = self.sysclk_hz / 1_000;
        cortex_m::asm::delay(duration.to_millis().saturating_mul(cycles_per_ms));
    }
}
