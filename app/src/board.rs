use bootloader_api::nrf::{CortexM, GpregretMem, NrfPower};
use bootloader_api::{
    BootloaderBehavior, BootloaderTrigger, RebootHandler, Register, RetainedBootMode,
    RetentionPort,
};

pub struct AllGpio {
    pub p0: nrf52840_hal::gpio::p0::Parts,
}

static POWER: NrfPower = NrfPower::new();
static SYSTEM: CortexM = CortexM::new(config::SYSCLK);
static GPREGRET: GpregretMem = GpregretMem::new(Register::Gpregret);
static GPREGRET2: GpregretMem = GpregretMem::new(Register::Gpregret2);
static BOOT_MODE: RetainedBootMode<'static> = RetainedBootMode::new(&GPREGRET);

pub static BOOTLOADER: BootloaderBehavior<'static> = BootloaderBehavior::new(
    BootloaderTrigger::new(
        config::TRIGGER,
        RetentionPort::new()
            .with_retained(Register::Gpregret, &GPREGRET)
            .with_retained(Register::Gpregret2, &GPREGRET2)
            .with_direct(&POWER),
        &SYSTEM,
    )
    .with_boot_mode(&BOOT_MODE)
    .with_ram_power(&POWER),
);

pub static REBOOT: RebootHandler<'static> =
    RebootHandler::new(config::REBOOT, &POWER, &SYSTEM).with_ram_power(&POWER);
