//! The four-button pad device.
//!
//! One task per button waits for falling edges (the buttons pull their pins
//! low) and publishes presses on a bounded channel the render loop drains.
//! Edges inside the debounce window after a press are discarded.

#![cfg(feature = "pico1")]

use defmt::{info, warn};
use embassy_executor::Spawner;
use embassy_rp::gpio::Input;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Duration, Timer};

use crate::Result;
use crate::controller::PadButton;

/// Channel type for button events.
type ButtonEvents = Channel<CriticalSectionRawMutex, PadButton, 8>;

/// Resources needed by the [`ButtonPad`] device.
pub struct ButtonPadStatic {
    events: ButtonEvents,
}

/// Handle for receiving debounced button presses.
pub struct ButtonPad {
    events: &'static ButtonEvents,
}

impl ButtonPad {
    /// Create the static resources for the pad.
    #[must_use]
    pub const fn new_static() -> ButtonPadStatic {
        ButtonPadStatic {
            events: Channel::new(),
        }
    }

    /// Spawn one listener task per button.
    ///
    /// # Errors
    ///
    /// [`crate::Error::TaskSpawn`] when a listener task cannot start.
    pub fn new(
        pad_static: &'static ButtonPadStatic,
        buttons: [(PadButton, Input<'static>); 4],
        debounce: Duration,
        spawner: Spawner,
    ) -> Result<Self> {
        for (which, input) in buttons {
            let token = button_task(input, which, debounce, &pad_static.events)?;
            spawner.spawn(token);
        }
        Ok(Self {
            events: &pad_static.events,
        })
    }

    /// Wait for the next press.
    pub async fn wait(&self) -> PadButton {
        self.events.receive().await
    }

    /// Take a pending press without waiting.
    #[must_use]
    pub fn try_take(&self) -> Option<PadButton> {
        self.events.try_receive().ok()
    }
}

#[embassy_executor::task(pool_size = 4)]
async fn button_task(
    mut input: Input<'static>,
    which: PadButton,
    debounce: Duration,
    events: &'static ButtonEvents,
) -> ! {
    loop {
        input.wait_for_falling_edge().await;
        info!("Button {} pressed", which);
        if events.try_send(which).is_err() {
            warn!("Button event queue full, dropping {}", which);
        }
        // Contact noise shows up as extra edges right after the press;
        // nothing is armed again until the debounce window has passed.
        Timer::after(debounce).await;
    }
}
