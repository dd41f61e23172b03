use log::debug;

use crate::{Error, RetainedMem};

/// Generic boot mode values, understood by MCUboot.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BootModeType {
    Normal = 0x00,
    Bootloader = 0x01,
}

/// Boot mode store consulted by the bootloader on the next boot.
pub trait BootMode: Sync {
    fn set(&self, mode: BootModeType) -> Result<(), Error>;

    fn get(&self) -> Result<u8, Error>;

    fn clear(&self) -> Result<(), Error>;
}

/// Keeps the boot mode in the first byte of a retained memory device.
pub struct RetainedBootMode<'a> {
    mem: &'a dyn RetainedMem,
}

impl<'a> RetainedBootMode<'a> {
    pub const fn new(mem: &'a dyn RetainedMem) -> Self {
        Self { mem }
    }

    fn ready(&self) -> Result<&'a dyn RetainedMem, Error> {
        if self.mem.is_ready() {
            Ok(self.mem)
        } else {
            Err(Error::DeviceNotReady)
        }
    }
}

impl BootMode for RetainedBootMode<'_> {
    fn set(&self, mode: BootModeType) -> Result<(), Error> {
        debug!("boot mode -> {mode:?}");
        self.ready()?
            .write(0, &[mode as u8])
            .map_err(|_| Error::BootModeApiFailed)
    }

    fn get(&self) -> Result<u8, Error> {
        let mut value = [0u8; 1];
        self.ready()?.read(0, &mut value)?;
        Ok(value[0])
    }

    fn clear(&self) -> Result<(), Error> {
        self.ready()?.clear()
    }
}
