//! Painting time onto frames: binary bit rows and the scrolling marquee.

use core::fmt::Write as _;

use embedded_graphics::Drawable;
use embedded_graphics::mono_font::{MonoTextStyle, ascii::FONT_5X7};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::Point;
use embedded_graphics::text::Text;
use heapless::String;
use time::OffsetDateTime;

use crate::config::ColorScheme;
use crate::controller::DisplayMode;
use crate::frame::{Frame, MatrixFrame};
use crate::matrix::Rgb;
use crate::shared_constants::{
    MARQUEE_MAX_COLS, MATRIX_COLS, MATRIX_ROWS, STATUS_MODE_COL, STATUS_OKAY_COL,
    STATUS_PAUSED_COL, STATUS_ROW,
};
use crate::time_fields::{BinaryFields, FieldBits};

/// Format a datetime as `YYYY-MM-DDThh:mm:ss` for the marquee.
#[must_use]
pub fn format_iso(dt: &OffsetDateTime) -> String<24> {
    let mut text = String::new();
    // A 24-byte buffer always fits the 19 characters; ignore the Err arm.
    let _ = write!(
        text,
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
        dt.year(),
        u8::from(dt.month()),
        dt.day(),
        dt.hour(),
        dt.minute(),
        dt.second()
    );
    text
}

/// Paint one field row. The least-significant bit lands on the rightmost
/// column; columns left of the field's width stay at the off color.
fn paint_field<const WIDTH: usize>(
    frame: &mut MatrixFrame,
    row: usize,
    bits: &FieldBits<WIDTH>,
    on: Rgb,
    off: Rgb,
) {
    for col in 0..MATRIX_COLS {
        let place = MATRIX_COLS - 1 - col;
        let lit = place < WIDTH && bits.bit_from_lsb(place);
        frame.0[row][col] = if lit { on } else { off };
    }
}

/// Paint the binary-clock face: six bit rows (year, month, day, hour,
/// minute, second on rows 0-5) plus the status pixels on the bottom row.
pub fn render_binary(
    fields: &BinaryFields,
    scheme: &ColorScheme,
    paused: bool,
    mode: DisplayMode,
    frame: &mut MatrixFrame,
) {
    let on = scheme.on_color();
    let off = scheme.off_color();
    paint_field(frame, 0, &fields.year, on, off);
    paint_field(frame, 1, &fields.month, on, off);
    paint_field(frame, 2, &fields.day, on, off);
    paint_field(frame, 3, &fields.hour, on, off);
    paint_field(frame, 4, &fields.minute, on, off);
    paint_field(frame, 5, &fields.second, on, off);

    frame.0[STATUS_ROW][STATUS_OKAY_COL] = scheme.okay_color();
    frame.0[STATUS_ROW][STATUS_PAUSED_COL] = if paused {
        scheme.error_color()
    } else {
        scheme.okay_color()
    };
    frame.0[STATUS_ROW][STATUS_MODE_COL] = match mode {
        DisplayMode::Binary => scheme.warn_color(),
        DisplayMode::Scroll => scheme.info_color(),
    };
}

/// A rasterized text strip with a matrix-wide window sliding over it.
///
/// The text is drawn once into a wide buffer; each tick the window advances
/// one column and wraps past the text plus a one-screen blank gap, so the
/// marquee repeats until the mode changes.
pub struct Marquee {
    strip: Frame<MATRIX_ROWS, MARQUEE_MAX_COLS>,
    total_cols: usize,
    offset: usize,
}

impl Marquee {
    /// Rasterize `text` in the 5x7 font. Text wider than the strip buffer is
    /// clipped on the right.
    #[must_use]
    pub fn new(text: &str, color: Rgb) -> Self {
        let mut strip = Frame::new();
        let style = MonoTextStyle::new(&FONT_5X7, Rgb888::new(color.r, color.g, color.b));
        #[expect(
            clippy::cast_possible_wrap,
            reason = "Font baselines are single digits."
        )]
        let baseline = FONT_5X7.baseline as i32;
        // The frame clips out-of-bounds pixels itself and cannot fail.
        let _ = Text::new(text, Point::new(0, baseline), style).draw(&mut strip);

        let glyph_cols =
            (FONT_5X7.character_size.width + FONT_5X7.character_spacing) as usize;
        let text_cols = text
            .chars()
            .count()
            .saturating_mul(glyph_cols)
            .min(MARQUEE_MAX_COLS);
        let total_cols = text_cols
            .saturating_add(MATRIX_COLS)
            .min(MARQUEE_MAX_COLS);
        Self {
            strip,
            total_cols,
            offset: 0,
        }
    }

    /// The matrix-sized window at the current scroll position.
    #[must_use]
    pub fn window(&self) -> MatrixFrame {
        let mut frame = MatrixFrame::new();
        for row in 0..MATRIX_ROWS {
            for col in 0..MATRIX_COLS {
                let source_col = (self.offset + col) % self.total_cols;
                frame.0[row][col] = self.strip.0[row][source_col];
            }
        }
        frame
    }

    /// Advance the window one column. Returns true when the window wrapped
    /// back to the start of the text.
    pub fn advance(&mut self) -> bool {
        self.offset = (self.offset + 1) % self.total_cols;
        self.offset == 0
    }

    /// Columns in one full scroll cycle (text plus the blank gap).
    #[must_use]
    pub const fn total_cols(&self) -> usize {
        self.total_cols
    }
}
