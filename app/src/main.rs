#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

#[cfg(target_os = "none")]
mod board;
#[cfg(all(target_os = "none", feature = "semihosting"))]
mod logger;
#[cfg(target_os = "none")]
mod panic;

#[cfg(not(target_os = "none"))]
fn main() {
    println!(
        "nRF52840 firmware, bootloader mode {:?}; build it from app/ for thumbv7em-none-eabihf",
        config::BOOTLOADER_MODE
    );
}

#[cfg(target_os = "none")]
#[rtic::app(device = nrf52840_hal::pac, dispatchers = [SWI0_EGU0])]
mod app {
    use bootloader_api::{reboot, Behavior, BindingEvent};
    use config as hw;
    use embedded_hal::digital::{InputPin, OutputPin};
    use fugit::ExtU32;
    use hal::gpio::{Input, Level, Output, Pin, PullUp, PushPull};
    use hal::gpiote::Gpiote;
    use log::{info, warn};
    use nrf52840_hal as hal;
    use rtic_monotonics::systick::Systick;
    use rtic_monotonics::{create_systick_token, Monotonic};

    use crate::board::{self, AllGpio};

    #[shared]
    struct Shared {}

    #[local]
    struct Local {
        gpiote: Gpiote,
        boot_key_pin: Pin<Input<PullUp>>,
        led_pin: Pin<Output<PushPull>>,
        pressed: bool,
    }

    #[init]
    fn init(cx: init::Context) -> (Shared, Local) {
        #[cfg(feature = "semihosting")]
        crate::logger::init();

        let dp = cx.device;
        let _clocks = hal::Clocks::new(dp.CLOCK).enable_ext_hfosc();

        let systick_token = create_systick_token!();
        Systick::start(cx.core.SYST, hw::SYSCLK, systick_token);

        if let Err(e) = reboot::install(&board::REBOOT) {
            warn!("{e}");
        }

        let gpio = AllGpio {
            p0: hal::gpio::p0::Parts::new(dp.P0),
        };
        let boot_key_pin = hw::boot_key_pin!(gpio).into_pullup_input().degrade();
        let led_pin = hw::led_pin!(gpio)
            .into_push_pull_output(Level::Low)
            .degrade();

        let gpiote = Gpiote::new(dp.GPIOTE);
        gpiote
            .channel0()
            .input_pin(&boot_key_pin)
            .toggle()
            .enable_interrupt();

        info!("boot key armed, bootloader mode {:?}", hw::BOOTLOADER_MODE);

        (
            Shared {},
            Local {
                gpiote,
                boot_key_pin,
                led_pin,
                pressed: false,
            },
        )
    }

    // HWCONFIG
    #[task(binds = GPIOTE, local = [gpiote], priority = 2)]
    fn boot_key_edge(cx: boot_key_edge::Context) {
        let channel = cx.local.gpiote.channel0();
        if channel.is_event_triggered() {
            channel.reset_events();
            // already pending means a debounce is running
            let _ = debounce_task::spawn();
        }
    }

    #[task(local = [boot_key_pin, led_pin, pressed], priority = 1)]
    async fn debounce_task(cx: debounce_task::Context) {
        Systick::delay(hw::DEBOUNCE_TIME_MS.millis()).await;

        // active low
        let pressed = cx.local.boot_key_pin.is_low().unwrap_or(false);
        if pressed == *cx.local.pressed {
            return;
        }
        *cx.local.pressed = pressed;

        let event = BindingEvent {
            layer: 0,
            position: hw::BOOT_KEY_POSITION,
            timestamp_ms: Systick::now().duration_since_epoch().to_millis() as i64,
        };

        if pressed {
            let _ = cx.local.led_pin.set_high();
            board::BOOTLOADER.binding_pressed(event);
        } else {
            let _ = cx.local.led_pin.set_low();
            board::BOOTLOADER.binding_released(event);
        }
    }

    #[idle]
    fn idle(_cx: idle::Context) -> ! {
        loop {
            rtic::export::wfi()
        }
    }
}
