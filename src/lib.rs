//! Binary-clock firmware for a 17x7 RGB LED matrix.
//!
//! The current wall-clock time is split into its components (year, month,
//! day, hour, minute, second), each component is rendered as a fixed-width
//! row of binary digits, and the rows are pushed to a WS2812-style LED
//! matrix. Buttons pause the clock, switch to a scrolling-text mode, or
//! request shutdown. A console sink renders the same rows as `0`/`1` text
//! for machines without the matrix.
#![no_std]

mod binclock;
mod button_pad;
mod clock;
mod config;
#[cfg(feature = "pico1")]
pub mod config_store;
mod controller;
mod error;
mod frame;
mod matrix;
mod never;
mod pio_irqs;
mod render;
mod shared_constants;
mod time_fields;
mod unix_seconds;

// Re-export commonly used items
#[cfg(feature = "pico1")]
pub use binclock::run;
#[cfg(feature = "pico1")]
pub use button_pad::{ButtonPad, ButtonPadStatic};
#[cfg(feature = "pico1")]
pub use clock::{Clock, ClockStatic};
pub use config::{ButtonConfig, ClockConfig, ColorScheme, DisplayConfig, Rotation};
pub use controller::{Controller, DisplayMode, PadButton, RunState};
pub use error::{Error, Result};
pub use frame::{Frame, FrameDiff, MatrixFrame};
#[cfg(feature = "pico1")]
pub use matrix::{ConsoleMatrix, Matrix, MatrixStatic};
pub use matrix::{PixelSink, Rgb};
pub use never::Never;
pub use render::{Marquee, format_iso, render_binary};
pub use shared_constants::*;
pub use time_fields::{BinaryFields, FieldBits};
pub use unix_seconds::UnixSeconds;
