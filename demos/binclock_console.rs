//! Console clock - the binary rows as `0`/`1` text on the defmt console.
//!
//! Same render loop as the matrix demo, but the sink prints instead of
//! driving hardware. Useful on a bare Pico with no panel attached.
#![no_std]
#![no_main]
#![allow(clippy::future_not_send, reason = "single-threaded")]

use binclock::{Clock, ClockConfig, ClockStatic, ConsoleMatrix, Never, Result, UnixSeconds};
use defmt::info;
use defmt_rtt as _;
use embassy_executor::Spawner;
use panic_probe as _;

#[embassy_executor::main]
pub async fn main(spawner: Spawner) -> ! {
    let err = inner_main(spawner).await.unwrap_err();
    panic!("{err}");
}

async fn inner_main(spawner: Spawner) -> Result<Never> {
    info!("Starting BinClock console mode");
    let _p = embassy_rp::init(Default::default());

    let config = ClockConfig::default();
    config.validate()?;

    static CLOCK_STATIC: ClockStatic = Clock::new_static();
    let utc_offset_minutes: i32 = env!("UTC_OFFSET_MINUTES").parse().unwrap_or(0);
    let clock = Clock::new(&CLOCK_STATIC, utc_offset_minutes, config.refresh_rate(), spawner)?;
    let build_seconds: i64 = env!("BUILD_UNIX_SECONDS").parse().unwrap_or(0);
    if build_seconds > 0 {
        clock.set_time(UnixSeconds(build_seconds)).await;
    }

    let mut sink = ConsoleMatrix::new();

    // Without buttons there is no exit request, so the loop never returns Ok.
    binclock::run(&clock, None, &mut sink, &config).await?;
    unreachable!("render loop without buttons cannot exit cleanly");
}
