//! Unix timestamp type for time-related devices

use time::{OffsetDateTime, UtcOffset};

/// Units-safe wrapper for Unix timestamps (seconds since 1970-01-01 00:00:00 UTC)
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, defmt::Format)]
pub struct UnixSeconds(pub i64);

impl UnixSeconds {
    /// Get the underlying i64 value
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }

    /// Convert to OffsetDateTime with the given timezone offset
    #[must_use]
    pub fn to_offset_datetime(self, offset: UtcOffset) -> Option<OffsetDateTime> {
        OffsetDateTime::from_unix_timestamp(self.as_i64())
            .ok()
            .map(|dt| dt.to_offset(offset))
    }
}
