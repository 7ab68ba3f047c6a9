//! Binary clock on the 17x7 RGB matrix with the four face buttons.
//!
//! Runs on a Raspberry Pi Pico RP2040. Button A pauses the clock, Button B
//! switches between the bit rows and a scrolling timestamp, Button X shuts
//! down cleanly. See the `README.md` for more information.
#![no_std]
#![no_main]
#![allow(clippy::future_not_send, reason = "single-threaded")]

use binclock::{
    ButtonPad, ButtonPadStatic, Clock, ClockConfig, ClockStatic, Matrix, ONE_DAY, PadButton,
    Result, UnixSeconds, config_store,
};
use defmt::{info, warn};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::flash::{Blocking, Flash};
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::peripherals::FLASH;
use embassy_time::Timer;
use panic_probe as _;

#[embassy_executor::main]
pub async fn main(spawner: Spawner) -> ! {
    match inner_main(spawner).await {
        // Button X: leave the matrix dark and idle forever.
        Ok(()) => loop {
            Timer::after(ONE_DAY).await;
        },
        Err(err) => panic!("{err}"),
    }
}

async fn inner_main(spawner: Spawner) -> Result<()> {
    info!("Starting BinClock");
    let p = embassy_rp::init(Default::default());

    // Configuration: the persisted copy when present and readable, the
    // built-in defaults otherwise. Resolved once, validated before use.
    let mut flash: Flash<'_, FLASH, Blocking, { config_store::INTERNAL_FLASH_SIZE }> =
        Flash::new_blocking(p.FLASH);
    let config = match config_store::load(&mut flash) {
        Ok(Some(config)) => config,
        Ok(None) => ClockConfig::default(),
        Err(_) => {
            warn!("Stored configuration unreadable, using defaults");
            ClockConfig::default()
        }
    };
    config.validate()?;

    static MATRIX_STATIC: binclock::MatrixStatic = Matrix::new_static();
    let mut matrix = Matrix::new(
        &MATRIX_STATIC,
        p.PIO0,
        p.DMA_CH0,
        p.PIN_2,
        config.display.rotation,
        config.display.brightness,
        spawner,
    )?;

    // No battery clock on this board; seed from the build timestamp.
    static CLOCK_STATIC: ClockStatic = Clock::new_static();
    let utc_offset_minutes: i32 = env!("UTC_OFFSET_MINUTES").parse().unwrap_or(0);
    let clock = Clock::new(&CLOCK_STATIC, utc_offset_minutes, config.refresh_rate(), spawner)?;
    let build_seconds: i64 = env!("BUILD_UNIX_SECONDS").parse().unwrap_or(0);
    if build_seconds > 0 {
        clock.set_time(UnixSeconds(build_seconds)).await;
    }

    let pad = if config.buttons.enabled {
        static PAD_STATIC: ButtonPadStatic = ButtonPad::new_static();
        Some(ButtonPad::new(
            &PAD_STATIC,
            [
                (PadButton::A, Input::new(p.PIN_5, Pull::Up)),
                (PadButton::B, Input::new(p.PIN_6, Pull::Up)),
                (PadButton::X, Input::new(p.PIN_16, Pull::Up)),
                (PadButton::Y, Input::new(p.PIN_24, Pull::Up)),
            ],
            config.debounce(),
            spawner,
        )?)
    } else {
        None
    };

    binclock::run(&clock, pad.as_ref(), &mut matrix, &config).await?;
    info!("BinClock stopped");
    Ok(())
}
