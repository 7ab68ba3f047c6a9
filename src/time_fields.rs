//! Fixed-width binary views of a wall-clock time.
//!
//! Each time component is reduced to a fixed number of binary digits,
//! most-significant bit first: year 11, month 4, day 5, hour 5, minute 6,
//! second 6. The conversion is pure and deterministic.

use time::OffsetDateTime;

/// Binary digits in the year row.
pub const YEAR_BITS: usize = 11;
/// Binary digits in the month row.
pub const MONTH_BITS: usize = 4;
/// Binary digits in the day row.
pub const DAY_BITS: usize = 5;
/// Binary digits in the hour row.
pub const HOUR_BITS: usize = 5;
/// Binary digits in the minute row.
pub const MINUTE_BITS: usize = 6;
/// Binary digits in the second row.
pub const SECOND_BITS: usize = 6;

/// A value reduced to `WIDTH` binary digits, most-significant bit first.
///
/// Values too wide for the field wrap to their low-order bits (`value mod
/// 2^WIDTH`). That is the defined behavior, not an error: a year past 2047
/// simply rolls over on an 11-bit row.
#[derive(Copy, Clone, Debug, Eq, PartialEq, defmt::Format)]
pub struct FieldBits<const WIDTH: usize> {
    bits: [bool; WIDTH],
}

impl<const WIDTH: usize> FieldBits<WIDTH> {
    /// Reduce `value` to `WIDTH` binary digits.
    #[must_use]
    pub fn from_value(value: u32) -> Self {
        let mut bits = [false; WIDTH];
        for (place, bit) in bits.iter_mut().rev().enumerate() {
            *bit = (value >> place) & 1 == 1;
        }
        Self { bits }
    }

    /// Number of binary digits in this field.
    #[must_use]
    pub const fn width(&self) -> usize {
        WIDTH
    }

    /// The digits, most-significant first.
    #[must_use]
    pub const fn bits(&self) -> &[bool; WIDTH] {
        &self.bits
    }

    /// Digit at `place`, counted from the least-significant end.
    /// `place` must be below `WIDTH`.
    #[must_use]
    pub fn bit_from_lsb(&self, place: usize) -> bool {
        self.bits[WIDTH - 1 - place]
    }

    /// Reinterpret the digits as an unsigned integer.
    #[must_use]
    pub fn value(&self) -> u32 {
        self.bits
            .iter()
            .fold(0, |acc, &bit| (acc << 1) | u32::from(bit))
    }
}

/// The six time components of one clock sample, each as fixed-width binary.
#[derive(Copy, Clone, Debug, Eq, PartialEq, defmt::Format)]
pub struct BinaryFields {
    pub year: FieldBits<YEAR_BITS>,
    pub month: FieldBits<MONTH_BITS>,
    pub day: FieldBits<DAY_BITS>,
    pub hour: FieldBits<HOUR_BITS>,
    pub minute: FieldBits<MINUTE_BITS>,
    pub second: FieldBits<SECOND_BITS>,
}

impl BinaryFields {
    /// Split `dt` into its components and reduce each to its field width.
    ///
    /// Accepts any datetime; components outside their natural range wrap via
    /// truncation (see [`FieldBits::from_value`]).
    #[must_use]
    pub fn from_datetime(dt: &OffsetDateTime) -> Self {
        #[expect(
            clippy::cast_sign_loss,
            reason = "Years before 1 CE clamp to zero; the display has no sign row."
        )]
        let year = dt.year().max(0) as u32;
        Self {
            year: FieldBits::from_value(year),
            month: FieldBits::from_value(u32::from(u8::from(dt.month()))),
            day: FieldBits::from_value(u32::from(dt.day())),
            hour: FieldBits::from_value(u32::from(dt.hour())),
            minute: FieldBits::from_value(u32::from(dt.minute())),
            second: FieldBits::from_value(u32::from(dt.second())),
        }
    }
}
