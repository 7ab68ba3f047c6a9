//! Button-driven run state consumed by the render loop.
//!
//! Button events arrive as messages and are folded into this small state
//! machine: Running/Paused with an orthogonal Binary/Scroll mode flag, and a
//! terminal Exiting state. The render loop is the only reader.

use time::OffsetDateTime;

/// The four face buttons next to the panel.
#[derive(Copy, Clone, Debug, Eq, PartialEq, defmt::Format)]
pub enum PadButton {
    /// Toggles pause.
    A,
    /// Toggles between the binary rows and the scrolling text.
    B,
    /// Requests a clean shutdown.
    X,
    /// Reserved.
    Y,
}

/// What the renderer paints.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default, defmt::Format)]
pub enum DisplayMode {
    #[default]
    Binary,
    Scroll,
}

/// Top-level loop state. `Exiting` is terminal.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default, defmt::Format)]
pub enum RunState {
    #[default]
    Running,
    Paused,
    Exiting,
}

/// Folds button presses into the loop state.
///
/// While paused, the time captured at the pause moment is replayed so the
/// displayed time does not advance; resuming goes back to the live clock.
#[derive(Debug, Default)]
pub struct Controller {
    run_state: RunState,
    mode: DisplayMode,
    frozen: Option<OffsetDateTime>,
}

impl Controller {
    /// Start running in binary mode.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            run_state: RunState::Running,
            mode: DisplayMode::Binary,
            frozen: None,
        }
    }

    /// Apply one button press. `now` is the clock sample to freeze if this
    /// press pauses the clock.
    pub fn apply(&mut self, button: PadButton, now: OffsetDateTime) {
        match button {
            PadButton::A => match self.run_state {
                RunState::Running => {
                    self.run_state = RunState::Paused;
                    self.frozen = Some(now);
                }
                RunState::Paused => {
                    self.run_state = RunState::Running;
                    self.frozen = None;
                }
                RunState::Exiting => {}
            },
            PadButton::B => {
                // Mode is orthogonal to pause; neither touches the other.
                self.mode = match self.mode {
                    DisplayMode::Binary => DisplayMode::Scroll,
                    DisplayMode::Scroll => DisplayMode::Binary,
                };
            }
            PadButton::X => self.run_state = RunState::Exiting,
            PadButton::Y => {}
        }
    }

    /// Current loop state.
    #[must_use]
    pub const fn run_state(&self) -> RunState {
        self.run_state
    }

    /// Current display mode.
    #[must_use]
    pub const fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// True while the clock is paused.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        matches!(self.run_state, RunState::Paused)
    }

    /// True once shutdown was requested.
    #[must_use]
    pub const fn is_exiting(&self) -> bool {
        matches!(self.run_state, RunState::Exiting)
    }

    /// The time to display: the frozen sample while paused, `live` otherwise.
    #[must_use]
    pub fn display_time(&self, live: OffsetDateTime) -> OffsetDateTime {
        self.frozen.unwrap_or(live)
    }
}
