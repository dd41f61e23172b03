use fugit::MillisDurationU32;
use log::{debug, error};

use crate::{keep_powered, Error, RamPower, RamRegion};

/// Warm resets keep powered RAM, cold resets do not.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetKind {
    Warm,
    Cold,
}

pub trait SystemControl: Sync {
    /// Resets the system. Only returns if the reset did not happen.
    fn reset(&self, kind: ResetKind);

    /// Sleeps until the next interrupt.
    fn idle(&self);

    /// Busy waits, used to let register writes settle.
    fn delay(&self, duration: MillisDurationU32);
}

/// Terminal state once a reset failed to take effect.
pub fn park(system: &dyn SystemControl) -> ! {
    loop {
        system.idle();
    }
}

/// Keeps `ram` powered if given, waits `settle` for pending register writes
/// and resets. Parks if control comes back.
pub fn reset_and_park(
    system: &dyn SystemControl,
    ram: Option<(&dyn RamPower, RamRegion)>,
    settle: MillisDurationU32,
    kind: ResetKind,
) -> ! {
    if let Some((ram, region)) = ram {
        keep_powered(ram, region);
    }
    system.delay(settle);
    debug!("{kind:?} reset");
    system.reset(kind);

    error!("{}", Error::ResetDidNotOccur);
    park(system)
}
