use core::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    RegisterWriteFailed,
    BootModeApiFailed,
    DeviceNotReady,
    ResetDidNotOccur,
    OutOfRange,
    HookAlreadyInstalled,
    HookNotInstalled,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Error::RegisterWriteFailed => "retention register write failed",
            Error::BootModeApiFailed => "boot mode could not be set",
            Error::DeviceNotReady => "retained memory device not ready",
            Error::ResetDidNotOccur => "system reset did not occur",
            Error::OutOfRange => "access outside of retained memory",
            Error::HookAlreadyInstalled => "reboot hook already installed",
            Error::HookNotInstalled => "no reboot hook installed",
        })
    }
}
