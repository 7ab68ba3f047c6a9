//! Sinks that put frames on (real or substitute) hardware.
//!
//! [`PixelSink`] is the capability interface the render loop draws through.
//! [`Matrix`] drives the physical WS2812-wired 17x7 panel over PIO;
//! [`ConsoleMatrix`] renders the same pixels as `0`/`1` rows on the defmt
//! console for boards without the panel attached.

use crate::Result;

/// RGB color representation re-exported from `smart_leds`.
pub type Rgb = smart_leds::RGB8;

/// Capability interface for a matrix-shaped pixel device.
///
/// The render loop stages changed pixels with [`set_pixel`](Self::set_pixel)
/// and makes them visible with one [`show`](Self::show) call per tick.
#[expect(
    async_fn_in_trait,
    reason = "Single-executor firmware; implementations are not shared across threads."
)]
pub trait PixelSink {
    /// Stage one pixel. Not visible until [`show`](Self::show).
    async fn set_pixel(&mut self, row: usize, col: usize, color: Rgb) -> Result<()>;

    /// Push all staged pixels to the device.
    async fn show(&mut self) -> Result<()>;

    /// Stage all-black and push it.
    async fn clear(&mut self) -> Result<()>;

    /// Blank the device and release it. The sink must not be used afterwards.
    async fn close(&mut self) -> Result<()>;
}

#[cfg(feature = "pico1")]
pub use hardware::{ConsoleMatrix, Matrix, MatrixStatic};

#[cfg(feature = "pico1")]
mod hardware {
    use embassy_executor::Spawner;
    use embassy_rp::Peri;
    use embassy_rp::peripherals::{DMA_CH0, PIN_2, PIO0};
    use embassy_rp::pio::Pio;
    use embassy_rp::pio_programs::ws2812::{Grb, PioWs2812, PioWs2812Program};
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
    use embassy_sync::signal::Signal;
    use heapless::String;

    use super::{PixelSink, Rgb};
    use crate::config::Rotation;
    use crate::pio_irqs::Pio0Irqs;
    use crate::shared_constants::{MATRIX_COLS, MATRIX_LED_COUNT, MATRIX_ROWS};
    use crate::{Error, Result};

    type MatrixCommands = Signal<CriticalSectionRawMutex, [Rgb; MATRIX_LED_COUNT]>;
    type MatrixDone = Signal<CriticalSectionRawMutex, ()>;

    /// Resources needed by the [`Matrix`] device.
    pub struct MatrixStatic {
        commands: MatrixCommands,
        done: MatrixDone,
    }

    /// The physical panel: a single WS2812 strip of 119 LEDs wired in
    /// serpentine column-major order behind the 17x7 face.
    ///
    /// Pixels are staged in a local buffer in display coordinates; `show`
    /// hands the buffer to a background task that owns the PIO driver.
    /// Rotation and global brightness are fixed at construction.
    pub struct Matrix {
        commands: &'static MatrixCommands,
        done: &'static MatrixDone,
        pixels: [Rgb; MATRIX_LED_COUNT],
        lut: [u16; MATRIX_LED_COUNT],
        level_table: [u8; 256],
    }

    impl Matrix {
        /// Create the static resources for the matrix device.
        #[must_use]
        pub const fn new_static() -> MatrixStatic {
            MatrixStatic {
                commands: Signal::new(),
                done: Signal::new(),
            }
        }

        /// Create the matrix device and spawn its driver task.
        ///
        /// # Errors
        ///
        /// [`Error::InvalidBrightness`] or [`Error::UnsupportedRotation`] for
        /// configuration values the panel cannot honor;
        /// [`Error::TaskSpawn`] when the driver task cannot start.
        pub fn new(
            matrix_static: &'static MatrixStatic,
            pio: Peri<'static, PIO0>,
            dma: Peri<'static, DMA_CH0>,
            pin: Peri<'static, PIN_2>,
            rotation: Rotation,
            brightness: f32,
            spawner: Spawner,
        ) -> Result<Self> {
            if !(0.0..=1.0).contains(&brightness) {
                return Err(Error::InvalidBrightness);
            }
            let lut = panel_lut(rotation)?;
            let token = matrix_device_task(pio, dma, pin, &matrix_static.commands, &matrix_static.done)?;
            spawner.spawn(token);
            defmt::info!(
                "Matrix device started (rotation {}, brightness {})",
                rotation.degrees(),
                brightness
            );
            Ok(Self {
                commands: &matrix_static.commands,
                done: &matrix_static.done,
                pixels: [Rgb::new(0, 0, 0); MATRIX_LED_COUNT],
                lut,
                level_table: level_table(brightness),
            })
        }

        fn scale(&self, color: Rgb) -> Rgb {
            Rgb::new(
                self.level_table[usize::from(color.r)],
                self.level_table[usize::from(color.g)],
                self.level_table[usize::from(color.b)],
            )
        }
    }

    impl PixelSink for Matrix {
        async fn set_pixel(&mut self, row: usize, col: usize, color: Rgb) -> Result<()> {
            if row >= MATRIX_ROWS || col >= MATRIX_COLS {
                return Err(Error::IndexOutOfBounds);
            }
            let led_index = usize::from(self.lut[row * MATRIX_COLS + col]);
            self.pixels[led_index] = self.scale(color);
            Ok(())
        }

        async fn show(&mut self) -> Result<()> {
            self.commands.signal(self.pixels);
            self.done.wait().await;
            Ok(())
        }

        async fn clear(&mut self) -> Result<()> {
            self.pixels = [Rgb::new(0, 0, 0); MATRIX_LED_COUNT];
            self.show().await
        }

        async fn close(&mut self) -> Result<()> {
            defmt::info!("Releasing matrix");
            self.clear().await
        }
    }

    #[embassy_executor::task]
    async fn matrix_device_task(
        pio: Peri<'static, PIO0>,
        dma: Peri<'static, DMA_CH0>,
        pin: Peri<'static, PIN_2>,
        commands: &'static MatrixCommands,
        done: &'static MatrixDone,
    ) -> ! {
        let Pio {
            mut common, sm0, ..
        } = Pio::new(pio, Pio0Irqs);
        let program = PioWs2812Program::new(&mut common);
        let mut driver =
            PioWs2812::<'_, PIO0, 0, MATRIX_LED_COUNT, Grb>::new(&mut common, sm0, dma, pin, &program);
        defmt::info!("matrix_device_task: driver ready");
        loop {
            let frame = commands.wait().await;
            commands.reset();
            driver.write(&frame).await;
            done.signal(());
        }
    }

    /// Map display (row, col) to a LED index on the serpentine strip, with
    /// the configured rotation folded in.
    fn panel_lut(rotation: Rotation) -> Result<[u16; MATRIX_LED_COUNT]> {
        let mut lut = [0_u16; MATRIX_LED_COUNT];
        for row in 0..MATRIX_ROWS {
            for col in 0..MATRIX_COLS {
                let (panel_row, panel_col) = match rotation {
                    Rotation::Rot0 => (row, col),
                    Rotation::Rot180 => (MATRIX_ROWS - 1 - row, MATRIX_COLS - 1 - col),
                    // The panel is not square, so quarter turns cannot map.
                    Rotation::Rot90 | Rotation::Rot270 => {
                        return Err(Error::UnsupportedRotation);
                    }
                };
                let led_index = if panel_col % 2 == 0 {
                    // Even column: top-to-bottom
                    panel_col * MATRIX_ROWS + panel_row
                } else {
                    // Odd column: bottom-to-top
                    panel_col * MATRIX_ROWS + (MATRIX_ROWS - 1 - panel_row)
                };
                lut[row * MATRIX_COLS + col] = led_index as u16;
            }
        }
        Ok(lut)
    }

    /// Per-channel scaling table for the global brightness setting.
    fn level_table(brightness: f32) -> [u8; 256] {
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "brightness is validated to 0.0..=1.0 first"
        )]
        let scale = (brightness * 255.0) as u16;
        let mut table = [0_u8; 256];
        for (value, entry) in table.iter_mut().enumerate() {
            *entry = ((value as u16 * scale) / 255) as u8;
        }
        table
    }

    /// Console stand-in for the panel: logs every shown frame as rows of
    /// `0`/`1` characters (lit = any nonzero channel) instead of driving
    /// hardware. Used where no matrix is attached.
    pub struct ConsoleMatrix {
        pixels: [[Rgb; MATRIX_COLS]; MATRIX_ROWS],
    }

    impl ConsoleMatrix {
        /// Create a blank console sink.
        #[must_use]
        pub const fn new() -> Self {
            Self {
                pixels: [[Rgb::new(0, 0, 0); MATRIX_COLS]; MATRIX_ROWS],
            }
        }
    }

    impl Default for ConsoleMatrix {
        fn default() -> Self {
            Self::new()
        }
    }

    impl PixelSink for ConsoleMatrix {
        async fn set_pixel(&mut self, row: usize, col: usize, color: Rgb) -> Result<()> {
            if row >= MATRIX_ROWS || col >= MATRIX_COLS {
                return Err(Error::IndexOutOfBounds);
            }
            self.pixels[row][col] = color;
            Ok(())
        }

        async fn show(&mut self) -> Result<()> {
            for cells in &self.pixels {
                let mut line: String<MATRIX_COLS> = String::new();
                for &color in cells {
                    let lit = color.r != 0 || color.g != 0 || color.b != 0;
                    line.push(if lit { '1' } else { '0' })
                        .map_err(|()| Error::FormatError)?;
                }
                defmt::info!("{}", line.as_str());
            }
            defmt::info!("");
            Ok(())
        }

        async fn clear(&mut self) -> Result<()> {
            self.pixels = [[Rgb::new(0, 0, 0); MATRIX_COLS]; MATRIX_ROWS];
            self.show().await
        }

        async fn close(&mut self) -> Result<()> {
            self.clear().await
        }
    }
}
