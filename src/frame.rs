//! In-memory display frames and the diffing flush path.
//!
//! A [`Frame`] is the full pixel state the renderer wants on the matrix.
//! [`FrameDiff`] remembers what was last pushed to the hardware and forwards
//! only changed pixels, so an unchanged clock costs no bus traffic.

use embedded_graphics::{
    draw_target::DrawTarget,
    pixelcolor::Rgb888,
    prelude::{OriginDimensions, Pixel, RgbColor, Size},
};

use crate::matrix::{PixelSink, Rgb};
use crate::shared_constants::{MATRIX_COLS, MATRIX_ROWS};
use crate::{Error, Result};

/// A frame sized for the physical 17x7 matrix.
pub type MatrixFrame = Frame<MATRIX_ROWS, MATRIX_COLS>;

/// A 2D array of RGB pixels representing a single display frame.
///
/// Frames are stored in row-major order where `frame[row][col]` is the pixel
/// at display coordinates (col, row). They support direct pixel access via
/// array indexing and full graphics drawing via
/// [`embedded-graphics`](https://docs.rs/embedded-graphics).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Frame<const ROWS: usize, const COLS: usize>(pub [[Rgb; COLS]; ROWS]);

impl<const ROWS: usize, const COLS: usize> Frame<ROWS, COLS> {
    /// Create a new blank (all black) frame.
    #[must_use]
    pub const fn new() -> Self {
        Self([[Rgb::new(0, 0, 0); COLS]; ROWS])
    }

    /// Create a frame filled with a single color.
    #[must_use]
    pub const fn filled(color: Rgb) -> Self {
        Self([[color; COLS]; ROWS])
    }

    /// Set one pixel, checking bounds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] when `row` or `col` is off the
    /// frame. That is a caller bug, not a recoverable condition.
    pub fn set(&mut self, row: usize, col: usize, color: Rgb) -> Result<()> {
        let cell = self
            .0
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or(Error::IndexOutOfBounds)?;
        *cell = color;
        Ok(())
    }
}

impl<const ROWS: usize, const COLS: usize> core::ops::Deref for Frame<ROWS, COLS> {
    type Target = [[Rgb; COLS]; ROWS];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<const ROWS: usize, const COLS: usize> core::ops::DerefMut for Frame<ROWS, COLS> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<const ROWS: usize, const COLS: usize> From<[[Rgb; COLS]; ROWS]> for Frame<ROWS, COLS> {
    fn from(array: [[Rgb; COLS]; ROWS]) -> Self {
        Self(array)
    }
}

impl<const ROWS: usize, const COLS: usize> Default for Frame<ROWS, COLS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const ROWS: usize, const COLS: usize> OriginDimensions for Frame<ROWS, COLS> {
    fn size(&self) -> Size {
        Size::new(COLS as u32, ROWS as u32)
    }
}

impl<const ROWS: usize, const COLS: usize> DrawTarget for Frame<ROWS, COLS> {
    type Color = Rgb888;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> core::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            let column_index = coord.x;
            let row_index = coord.y;
            if column_index >= 0
                && column_index < COLS as i32
                && row_index >= 0
                && row_index < ROWS as i32
            {
                self.0[row_index as usize][column_index as usize] =
                    Rgb::new(color.r(), color.g(), color.b());
            }
        }
        Ok(())
    }
}

/// Snapshot of the last frame pushed to the hardware, plus the diffing write
/// path on top of a [`PixelSink`].
pub struct FrameDiff<const ROWS: usize, const COLS: usize> {
    last: Option<Frame<ROWS, COLS>>,
}

impl<const ROWS: usize, const COLS: usize> FrameDiff<ROWS, COLS> {
    /// Create a diff with no snapshot; the first flush writes every pixel.
    #[must_use]
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Forward every pixel of `frame` that differs from the snapshot to
    /// `sink`, then call [`PixelSink::show`] once if anything changed.
    ///
    /// Returns the number of pixel writes issued; zero when `frame` matches
    /// the snapshot exactly (no `show` is issued either). The snapshot is
    /// updated only when every write succeeded, so a failed flush is retried
    /// in full on the next tick.
    ///
    /// # Errors
    ///
    /// Propagates the first sink failure.
    pub async fn flush<S: PixelSink>(
        &mut self,
        frame: &Frame<ROWS, COLS>,
        sink: &mut S,
    ) -> Result<usize> {
        let mut writes = 0_usize;
        for (row, cells) in frame.0.iter().enumerate() {
            for (col, &color) in cells.iter().enumerate() {
                let unchanged = self
                    .last
                    .as_ref()
                    .is_some_and(|last| last.0[row][col] == color);
                if unchanged {
                    continue;
                }
                sink.set_pixel(row, col, color).await?;
                writes = writes.saturating_add(1);
            }
        }
        if writes > 0 {
            sink.show().await?;
        }
        self.last = Some(*frame);
        Ok(writes)
    }

    /// Drop the snapshot so the next flush rewrites the whole matrix.
    pub fn invalidate(&mut self) {
        self.last = None;
    }
}

impl<const ROWS: usize, const COLS: usize> Default for FrameDiff<ROWS, COLS> {
    fn default() -> Self {
        Self::new()
    }
}
