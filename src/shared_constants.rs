use embassy_time::Duration;

/// Number of LED rows on the matrix.
pub const MATRIX_ROWS: usize = 7;
/// Number of LED columns on the matrix.
pub const MATRIX_COLS: usize = 17;
/// Total number of LEDs (rows * columns).
pub const MATRIX_LED_COUNT: usize = MATRIX_ROWS * MATRIX_COLS;

/// Rows 0-5 carry the six time fields; row 6 carries the status pixels.
pub const FIELD_ROWS: usize = 6;
/// Row holding the status pixels.
pub const STATUS_ROW: usize = 6;
/// Status pixel columns: heartbeat, pause indicator, mode indicator.
pub const STATUS_OKAY_COL: usize = 0;
pub const STATUS_PAUSED_COL: usize = 1;
pub const STATUS_MODE_COL: usize = 2;

/// Widest marquee the scroll renderer supports. An ISO timestamp is 19
/// glyphs of the 5x7 font (95 columns) plus a blank gap one screen wide.
pub const MARQUEE_MAX_COLS: usize = 128;

/// How far the scroll window advances per tick, and how often.
pub const SCROLL_TICK: Duration = Duration::from_millis(50);

/// Consecutive flush failures tolerated before the render loop gives up.
pub const MAX_FLUSH_FAILURES: u8 = 5;

/// Duration representing one second.
pub const ONE_SECOND: Duration = Duration::from_secs(1);
/// Duration representing one minute (60 seconds).
pub const ONE_MINUTE: Duration = Duration::from_secs(60);
/// Duration representing one day (24 hours).
pub const ONE_DAY: Duration = Duration::from_secs(60 * 60 * 24);
