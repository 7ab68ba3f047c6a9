//! The render loop tying the clock, buttons, renderer, and sink together.

#![cfg(feature = "pico1")]
#![allow(clippy::future_not_send, reason = "single-threaded")]

use defmt::{info, warn};
use embassy_futures::select::{Either, select};
use embassy_time::Timer;

use crate::button_pad::ButtonPad;
use crate::clock::Clock;
use crate::config::ClockConfig;
use crate::controller::{Controller, DisplayMode};
use crate::frame::{FrameDiff, MatrixFrame};
use crate::matrix::PixelSink;
use crate::render::{Marquee, format_iso, render_binary};
use crate::shared_constants::{MATRIX_COLS, MATRIX_ROWS, MAX_FLUSH_FAILURES, SCROLL_TICK};
use crate::time_fields::BinaryFields;
use crate::{Error, Result};

/// Drive the display until Button X asks for shutdown.
///
/// Each iteration folds queued button presses into the controller, paints
/// the current (or frozen) time in the active mode, and flushes changed
/// pixels. The tick sleep races the button channel, so an exit press is
/// honored within one tick. Pass `pad: None` to run without buttons.
///
/// # Errors
///
/// [`Error::FlushRetriesExhausted`] after too many consecutive sink
/// failures; sink errors during the final blank-and-release are passed
/// through.
pub async fn run<S: PixelSink>(
    clock: &Clock,
    pad: Option<&ButtonPad>,
    sink: &mut S,
    config: &ClockConfig,
) -> Result<()> {
    let mut controller = Controller::new();
    let mut frame = MatrixFrame::new();
    let mut diff = FrameDiff::<MATRIX_ROWS, MATRIX_COLS>::new();
    let mut marquee: Option<Marquee> = None;
    let mut flush_failures: u8 = 0;

    info!("Render loop started");
    loop {
        // Fold any queued presses in before painting.
        if let Some(pad) = pad {
            while let Some(button) = pad.try_take() {
                controller.apply(button, clock.current_time());
            }
        }

        if controller.is_exiting() {
            info!("Exit requested, blanking matrix");
            sink.close().await?;
            return Ok(());
        }

        let shown = controller.display_time(clock.current_time());
        match controller.mode() {
            DisplayMode::Binary => {
                marquee = None;
                let fields = BinaryFields::from_datetime(&shown);
                render_binary(
                    &fields,
                    &config.colors,
                    controller.is_paused(),
                    controller.mode(),
                    &mut frame,
                );
            }
            DisplayMode::Scroll => {
                let scroll = marquee.get_or_insert_with(|| {
                    Marquee::new(format_iso(&shown).as_str(), config.colors.okay_color())
                });
                frame = scroll.window();
                if scroll.advance() {
                    // One full pass shown; pick up the latest time.
                    *scroll =
                        Marquee::new(format_iso(&shown).as_str(), config.colors.okay_color());
                }
            }
        }

        match diff.flush(&frame, sink).await {
            Ok(_) => flush_failures = 0,
            Err(_) => {
                flush_failures = flush_failures.saturating_add(1);
                warn!("Display flush failed ({} consecutive)", flush_failures);
                if flush_failures >= MAX_FLUSH_FAILURES {
                    return Err(Error::FlushRetriesExhausted);
                }
                // Repaint everything once the sink recovers.
                diff.invalidate();
            }
        }

        // Binary mode paces on the clock device's aligned ticks; scroll mode
        // moves one column per scroll tick. Both race the button channel so
        // an exit press lands within one tick.
        match (controller.mode(), pad) {
            (DisplayMode::Binary, Some(pad)) => match select(clock.wait(), pad.wait()).await {
                Either::First(_) => {}
                Either::Second(button) => controller.apply(button, clock.current_time()),
            },
            (DisplayMode::Binary, None) => {
                clock.wait().await;
            }
            (DisplayMode::Scroll, Some(pad)) => {
                match select(Timer::after(SCROLL_TICK), pad.wait()).await {
                    Either::First(()) => {}
                    Either::Second(button) => controller.apply(button, clock.current_time()),
                }
            }
            (DisplayMode::Scroll, None) => Timer::after(SCROLL_TICK).await,
        }
    }
}
