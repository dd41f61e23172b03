//! Test doubles for the hardware traits.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, AtomicUsize, Ordering};
use std::sync::Mutex;

use fugit::MillisDurationU32;

use crate::{
    check_range, BootMode, BootModeType, Error, GpRegRet, RamLayout, RamPower, Register,
    ResetKind, RetainedMem, SystemControl,
};

const PARKED: &str = "parked";

/// Runs `f`, returning `None` if it ended up in the park loop.
pub fn run_until_parked<R>(f: impl FnOnce() -> R) -> Option<R> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Some(value),
        Err(payload) => match payload.downcast_ref::<&str>() {
            Some(&PARKED) => None,
            _ => panic::resume_unwind(payload),
        },
    }
}

pub struct FakeGpRegRet {
    gpregret: AtomicU8,
    gpregret2: AtomicU8,
    writes: AtomicUsize,
    stuck: AtomicBool,
}

impl FakeGpRegRet {
    pub fn new() -> Self {
        Self {
            gpregret: AtomicU8::new(0),
            gpregret2: AtomicU8::new(0),
            writes: AtomicUsize::new(0),
            stuck: AtomicBool::new(false),
        }
    }

    /// Registers that accept writes but never change.
    pub fn stuck() -> Self {
        let regs = Self::new();
        regs.stuck.store(true, Ordering::SeqCst);
        regs
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn cell(&self, register: Register) -> &AtomicU8 {
        match register {
            Register::Gpregret => &self.gpregret,
            Register::Gpregret2 => &self.gpregret2,
        }
    }
}

impl GpRegRet for FakeGpRegRet {
    fn get(&self, register: Register) -> u8 {
        self.cell(register).load(Ordering::SeqCst)
    }

    fn set(&self, register: Register, value: u8) {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if !self.stuck.load(Ordering::SeqCst) {
            self.cell(register).store(value, Ordering::SeqCst);
        }
    }
}

pub struct FakeRetainedMem {
    ready: AtomicBool,
    bytes: [AtomicU8; 8],
    size: usize,
}

impl FakeRetainedMem {
    pub fn new(size: usize) -> Self {
        assert!(size <= 8);
        Self {
            ready: AtomicBool::new(true),
            bytes: Default::default(),
            size,
        }
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }

    pub fn byte(&self, offset: usize) -> u8 {
        self.bytes[offset].load(Ordering::SeqCst)
    }
}

impl RetainedMem for FakeRetainedMem {
    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    fn size(&self) -> usize {
        self.size
    }

    fn read(&self, offset: usize, buf: &mut [u8]) -> Result<(), Error> {
        check_range(self.size, offset, buf.len())?;
        for (i, b) in buf.iter_mut().enumerate() {
            *b = self.byte(offset + i);
        }
        Ok(())
    }

    fn write(&self, offset: usize, data: &[u8]) -> Result<(), Error> {
        check_range(self.size, offset, data.len())?;
        for (i, b) in data.iter().enumerate() {
            self.bytes[offset + i].store(*b, Ordering::SeqCst);
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), Error> {
        self.bytes.iter().for_each(|b| b.store(0, Ordering::SeqCst));
        Ok(())
    }
}

/// Reset never happens; `idle` unwinds out of the park loop.
#[derive(Default)]
pub struct FakeSystem {
    resets: Mutex<Vec<ResetKind>>,
    delay_ms: AtomicU32,
}

impl FakeSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resets(&self) -> Vec<ResetKind> {
        self.resets.lock().unwrap().clone()
    }

    pub fn delayed_ms(&self) -> u32 {
        self.delay_ms.load(Ordering::SeqCst)
    }
}

impl SystemControl for FakeSystem {
    fn reset(&self, kind: ResetKind) {
        self.resets.lock().unwrap().push(kind);
    }

    fn idle(&self) {
        panic::panic_any(PARKED);
    }

    fn delay(&self, duration: MillisDurationU32) {
        self.delay_ms.fetch_add(duration.to_millis(), Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct FakeBootMode {
    requests: Mutex<Vec<BootModeType>>,
    fail: AtomicBool,
}

impl FakeBootMode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let mode = Self::default();
        mode.fail.store(true, Ordering::SeqCst);
        mode
    }

    pub fn requests(&self) -> Vec<BootModeType> {
        self.requests.lock().unwrap().clone()
    }
}

impl BootMode for FakeBootMode {
    fn set(&self, mode: BootModeType) -> Result<(), Error> {
        self.requests.lock().unwrap().push(mode);
        if self.fail.load(Ordering::SeqCst) {
            return Err(Error::BootModeApiFailed);
        }
        Ok(())
    }

    fn get(&self) -> Result<u8, Error> {
        self.requests
            .lock()
            .unwrap()
            .last()
            .map(|mode| *mode as u8)
            .ok_or(Error::BootModeApiFailed)
    }

    fn clear(&self) -> Result<(), Error> {
        self.requests.lock().unwrap().clear();
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeRamPower {
    powered: [AtomicU32; 9],
}

impl FakeRamPower {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn powered(&self, block: usize) -> u32 {
        self.powered[block].load(Ordering::SeqCst)
    }
}

impl RamPower for FakeRamPower {
    fn layout(&self) -> &RamLayout {
        &RamLayout::NRF52840
    }

    fn power_on(&self, block: usize, sections: u32) {
        self.powered[block].fetch_or(sections, Ordering::SeqCst);
    }
}
