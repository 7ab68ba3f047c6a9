//! Structured runtime configuration with built-in defaults.
//!
//! Configuration is resolved once at startup: the persisted copy (see
//! [`config_store`](crate::config_store)) when present and valid, the
//! built-in defaults otherwise. Nothing re-reads configuration per access.

use embassy_time::Duration;
use serde::{Deserialize, Serialize};

use crate::matrix::Rgb;
use crate::{Error, Result};

/// Panel rotation in quarter turns.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize, defmt::Format)]
pub enum Rotation {
    Rot0,
    Rot90,
    Rot180,
    Rot270,
}

impl Rotation {
    /// The rotation as degrees.
    #[must_use]
    pub const fn degrees(self) -> u16 {
        match self {
            Self::Rot0 => 0,
            Self::Rot90 => 90,
            Self::Rot180 => 180,
            Self::Rot270 => 270,
        }
    }

    /// Parse degrees; anything but 0/90/180/270 is `None`.
    #[must_use]
    pub const fn from_degrees(degrees: u16) -> Option<Self> {
        match degrees {
            0 => Some(Self::Rot0),
            90 => Some(Self::Rot90),
            180 => Some(Self::Rot180),
            270 => Some(Self::Rot270),
            _ => None,
        }
    }
}

/// Display settings.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, defmt::Format)]
pub struct DisplayConfig {
    pub rotation: Rotation,
    /// Global brightness, 0.0 to 1.0.
    pub brightness: f32,
    /// Tick interval of the binary-clock mode, in milliseconds.
    pub refresh_rate_ms: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        // The panel hangs upside-down in its stock enclosure.
        Self {
            rotation: Rotation::Rot180,
            brightness: 0.1,
            refresh_rate_ms: 1_000,
        }
    }
}

/// Colors for the bit rows and the status pixels, as RGB triples.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize, defmt::Format)]
pub struct ColorScheme {
    pub on: [u8; 3],
    pub off: [u8; 3],
    pub okay: [u8; 3],
    pub error: [u8; 3],
    pub warn: [u8; 3],
    pub info: [u8; 3],
}

impl ColorScheme {
    /// Color of a 1-bit.
    #[must_use]
    pub const fn on_color(&self) -> Rgb {
        rgb(self.on)
    }

    /// Color of a 0-bit.
    #[must_use]
    pub const fn off_color(&self) -> Rgb {
        rgb(self.off)
    }

    /// Status color: everything fine.
    #[must_use]
    pub const fn okay_color(&self) -> Rgb {
        rgb(self.okay)
    }

    /// Status color: something failed.
    #[must_use]
    pub const fn error_color(&self) -> Rgb {
        rgb(self.error)
    }

    /// Status color: degraded but running.
    #[must_use]
    pub const fn warn_color(&self) -> Rgb {
        rgb(self.warn)
    }

    /// Status color: informational.
    #[must_use]
    pub const fn info_color(&self) -> Rgb {
        rgb(self.info)
    }
}

const fn rgb(channels: [u8; 3]) -> Rgb {
    Rgb::new(channels[0], channels[1], channels[2])
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            on: [255, 0, 0],
            off: [0, 0, 0],
            okay: [0, 255, 0],
            error: [255, 0, 0],
            warn: [255, 255, 0],
            info: [0, 0, 255],
        }
    }
}

/// Button settings. Pin assignments are compile-time resources, not
/// configuration; only behavior is configurable.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize, defmt::Format)]
pub struct ButtonConfig {
    /// Edges within this window after a press are discarded.
    pub debounce_ms: u32,
    /// When false, no button tasks are started and the clock free-runs.
    pub enabled: bool,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            enabled: true,
        }
    }
}

/// The whole runtime configuration.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Default, defmt::Format)]
pub struct ClockConfig {
    pub display: DisplayConfig,
    pub colors: ColorScheme,
    pub buttons: ButtonConfig,
}

impl ClockConfig {
    /// Check every field that has an invalid range.
    ///
    /// # Errors
    ///
    /// Brightness outside 0.0..=1.0, a zero refresh rate, or a quarter-turn
    /// rotation the 17x7 panel cannot show.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.display.brightness) {
            return Err(Error::InvalidBrightness);
        }
        if self.display.refresh_rate_ms == 0 {
            return Err(Error::InvalidRefreshRate);
        }
        if matches!(
            self.display.rotation,
            Rotation::Rot90 | Rotation::Rot270
        ) {
            return Err(Error::UnsupportedRotation);
        }
        Ok(())
    }

    /// Tick interval of the binary-clock mode.
    #[must_use]
    pub fn refresh_rate(&self) -> Duration {
        Duration::from_millis(u64::from(self.display.refresh_rate_ms))
    }

    /// Per-button debounce window.
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(u64::from(self.buttons.debounce_ms))
    }
}
