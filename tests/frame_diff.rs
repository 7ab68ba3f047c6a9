#![cfg(feature = "host")]

use binclock::{Error, Frame, FrameDiff, PixelSink, Result, Rgb};
use embassy_futures::block_on;

const RED: Rgb = Rgb::new(255, 0, 0);
const GREEN: Rgb = Rgb::new(0, 255, 0);

/// Sink that records every call instead of touching hardware.
#[derive(Default)]
struct RecordingSink {
    writes: Vec<(usize, usize, Rgb)>,
    shows: usize,
    fail_writes: bool,
}

impl PixelSink for RecordingSink {
    async fn set_pixel(&mut self, row: usize, col: usize, color: Rgb) -> Result<()> {
        if self.fail_writes {
            return Err(Error::FormatError);
        }
        self.writes.push((row, col, color));
        Ok(())
    }

    async fn show(&mut self) -> Result<()> {
        if self.fail_writes {
            return Err(Error::FormatError);
        }
        self.shows += 1;
        Ok(())
    }

    async fn clear(&mut self) -> Result<()> {
        self.writes.clear();
        self.show().await
    }

    async fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

#[test]
fn first_flush_writes_every_pixel() {
    let frame: Frame<2, 3> = Frame::filled(RED);
    let mut diff = FrameDiff::new();
    let mut sink = RecordingSink::default();

    let writes = block_on(diff.flush(&frame, &mut sink)).expect("flush succeeds");
    assert_eq!(writes, 6);
    assert_eq!(sink.writes.len(), 6);
    assert_eq!(sink.shows, 1);
}

#[test]
fn unchanged_frame_issues_zero_writes_and_no_show() {
    let frame: Frame<2, 3> = Frame::filled(RED);
    let mut diff = FrameDiff::new();
    let mut sink = RecordingSink::default();

    block_on(diff.flush(&frame, &mut sink)).expect("first flush succeeds");
    let writes = block_on(diff.flush(&frame, &mut sink)).expect("second flush succeeds");
    assert_eq!(writes, 0);
    assert_eq!(sink.shows, 1, "an unchanged frame must not be re-shown");
}

#[test]
fn only_changed_pixels_are_forwarded() {
    let mut frame: Frame<2, 3> = Frame::new();
    let mut diff = FrameDiff::new();
    let mut sink = RecordingSink::default();
    block_on(diff.flush(&frame, &mut sink)).expect("first flush succeeds");

    frame.set(1, 2, GREEN).expect("in bounds");
    sink.writes.clear();
    let writes = block_on(diff.flush(&frame, &mut sink)).expect("second flush succeeds");
    assert_eq!(writes, 1);
    assert_eq!(sink.writes, vec![(1, 2, GREEN)]);
    assert_eq!(sink.shows, 2);
}

#[test]
fn failed_flush_is_retried_in_full() {
    let mut frame: Frame<2, 3> = Frame::new();
    let mut diff = FrameDiff::new();
    let mut sink = RecordingSink::default();
    block_on(diff.flush(&frame, &mut sink)).expect("first flush succeeds");

    frame.set(0, 0, GREEN).expect("in bounds");
    sink.fail_writes = true;
    assert!(block_on(diff.flush(&frame, &mut sink)).is_err());

    // The snapshot was not advanced, so the change is forwarded again.
    sink.fail_writes = false;
    sink.writes.clear();
    let writes = block_on(diff.flush(&frame, &mut sink)).expect("retry succeeds");
    assert_eq!(writes, 1);
    assert_eq!(sink.writes, vec![(0, 0, GREEN)]);
}

#[test]
fn invalidate_forces_a_full_rewrite() {
    let frame: Frame<2, 3> = Frame::filled(RED);
    let mut diff = FrameDiff::new();
    let mut sink = RecordingSink::default();
    block_on(diff.flush(&frame, &mut sink)).expect("first flush succeeds");

    diff.invalidate();
    sink.writes.clear();
    let writes = block_on(diff.flush(&frame, &mut sink)).expect("flush succeeds");
    assert_eq!(writes, 6);
}

#[test]
fn out_of_range_set_is_an_index_fault() {
    let mut frame: Frame<2, 3> = Frame::new();
    assert!(matches!(frame.set(2, 0, RED), Err(Error::IndexOutOfBounds)));
    assert!(matches!(frame.set(0, 3, RED), Err(Error::IndexOutOfBounds)));
    assert!(frame.set(1, 2, RED).is_ok());
}
