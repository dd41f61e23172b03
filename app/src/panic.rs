use core::panic::PanicInfo;
use core::sync::atomic::{self, Ordering};

use bootloader_api::reboot::{self, RebootType};
use bootloader_api::ResetKind;

#[inline(never)]
#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    cortex_m::interrupt::disable();

    log::error!("{info}");

    // Clears the retention registers so a panic never lands us in the bootloader
    let _ = reboot::sys_reboot(RebootType::Normal(ResetKind::Warm));

    loop {
        // add some side effect to prevent this from turning into a UDF instruction
        // see rust-lang/rust#28728 for details
        atomic::compiler_fence(Ordering::SeqCst);
    }
}
