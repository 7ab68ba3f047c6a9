#![cfg(feature = "host")]

use binclock::{
    BinaryFields, ColorScheme, DisplayMode, Frame, MATRIX_COLS, MATRIX_ROWS, Marquee, Rgb,
    STATUS_MODE_COL, STATUS_OKAY_COL, STATUS_PAUSED_COL, STATUS_ROW, format_iso, render_binary,
};
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time};

fn datetime(year: i32, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> OffsetDateTime {
    let date = Date::from_calendar_date(year, Month::try_from(month).expect("valid month"), day)
        .expect("valid date");
    let time = Time::from_hms(hour, minute, second).expect("valid time");
    PrimitiveDateTime::new(date, time).assume_utc()
}

fn reference_frame() -> Frame<MATRIX_ROWS, MATRIX_COLS> {
    let fields = BinaryFields::from_datetime(&datetime(2024, 5, 28, 13, 45, 30));
    let mut frame = Frame::new();
    render_binary(
        &fields,
        &ColorScheme::default(),
        false,
        DisplayMode::Binary,
        &mut frame,
    );
    frame
}

/// Read a field row back as a string of on/off digits.
fn row_digits(frame: &Frame<MATRIX_ROWS, MATRIX_COLS>, row: usize, scheme: &ColorScheme) -> String {
    frame.0[row]
        .iter()
        .map(|&cell| if cell == scheme.on_color() { '1' } else { '0' })
        .collect()
}

#[test]
fn least_significant_bit_lands_on_the_rightmost_column() {
    let frame = reference_frame();
    let scheme = ColorScheme::default();
    // second = 30 = 011110: LSB (0) at column 16, MSB (0) at column 11.
    assert_eq!(frame.0[5][16], scheme.off_color());
    assert_eq!(frame.0[5][15], scheme.on_color());
    assert_eq!(frame.0[5][12], scheme.on_color());
    assert_eq!(frame.0[5][11], scheme.off_color());
}

#[test]
fn field_rows_match_reference_datetime() {
    let frame = reference_frame();
    let scheme = ColorScheme::default();
    // Rows are year, month, day, hour, minute, second; each field is
    // right-aligned with its unused left columns at the off color.
    assert_eq!(row_digits(&frame, 0, &scheme), "00000011111101000");
    assert_eq!(row_digits(&frame, 1, &scheme), "00000000000000101");
    assert_eq!(row_digits(&frame, 2, &scheme), "00000000000011100");
    assert_eq!(row_digits(&frame, 3, &scheme), "00000000000001101");
    assert_eq!(row_digits(&frame, 4, &scheme), "00000000000101101");
    assert_eq!(row_digits(&frame, 5, &scheme), "00000000000011110");
}

#[test]
fn status_pixels_reflect_pause_and_mode() {
    let fields = BinaryFields::from_datetime(&datetime(2024, 5, 28, 13, 45, 30));
    let scheme = ColorScheme::default();
    let mut frame = Frame::new();

    render_binary(&fields, &scheme, false, DisplayMode::Binary, &mut frame);
    assert_eq!(frame.0[STATUS_ROW][STATUS_OKAY_COL], scheme.okay_color());
    assert_eq!(frame.0[STATUS_ROW][STATUS_PAUSED_COL], scheme.okay_color());
    assert_eq!(frame.0[STATUS_ROW][STATUS_MODE_COL], scheme.warn_color());

    render_binary(&fields, &scheme, true, DisplayMode::Scroll, &mut frame);
    assert_eq!(frame.0[STATUS_ROW][STATUS_PAUSED_COL], scheme.error_color());
    assert_eq!(frame.0[STATUS_ROW][STATUS_MODE_COL], scheme.info_color());
}

#[test]
fn identical_datetimes_render_identical_frames() {
    assert_eq!(reference_frame(), reference_frame());
}

#[test]
fn format_iso_matches_the_marquee_text() {
    let text = format_iso(&datetime(2024, 5, 28, 13, 45, 30));
    assert_eq!(text.as_str(), "2024-05-28T13:45:30");
    let text = format_iso(&datetime(987, 1, 2, 3, 4, 5));
    assert_eq!(text.as_str(), "0987-01-02T03:04:05");
}

#[test]
fn marquee_renders_visible_text() {
    let red = Rgb::new(255, 0, 0);
    let marquee = Marquee::new("2024-05-28T13:45:30", red);
    let window = marquee.window();
    let lit = window
        .0
        .iter()
        .flatten()
        .filter(|&&cell| cell == red)
        .count();
    assert!(lit > 0, "the first window must show the start of the text");
}

#[test]
fn marquee_wraps_after_one_full_cycle() {
    let red = Rgb::new(255, 0, 0);
    let mut marquee = Marquee::new("2024-05-28T13:45:30", red);
    let start = marquee.window();
    let total = marquee.total_cols();
    assert!(total > MATRIX_COLS, "text plus gap is wider than the panel");

    for step in 0..total {
        let wrapped = marquee.advance();
        assert_eq!(wrapped, step == total - 1, "wrap only on the last step");
    }
    assert_eq!(marquee.window(), start);
}

#[test]
fn marquee_gap_between_repeats_is_blank() {
    let red = Rgb::new(255, 0, 0);
    let mut marquee = Marquee::new("2024-05-28T13:45:30", red);
    // Advance until the window sits exactly on the trailing gap.
    for _ in 0..marquee.total_cols() - MATRIX_COLS {
        marquee.advance();
    }
    let window = marquee.window();
    assert!(
        window.0.iter().flatten().all(|&cell| cell == Rgb::new(0, 0, 0)),
        "the inter-repeat gap must be one full blank screen"
    );
}
