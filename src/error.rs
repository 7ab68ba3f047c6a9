use derive_more::derive::{Display, Error};

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Define a unified error type for this crate.
#[expect(missing_docs, reason = "The variants are self-explanatory.")]
#[derive(Debug, Display, Error)]
pub enum Error {
    // `#[error(not(source))]` below tells `derive_more` that `embassy_executor::SpawnError` does
    // not implement Rust's `core::error::Error` trait.
    #[cfg(feature = "pico1")]
    #[display("{_0:?}")]
    TaskSpawn(#[error(not(source))] embassy_executor::SpawnError),

    #[display("Index out of bounds")]
    IndexOutOfBounds,

    #[display("Brightness must be between 0.0 and 1.0")]
    InvalidBrightness,

    #[display("Refresh rate must be positive")]
    InvalidRefreshRate,

    #[display("A 17x7 panel cannot be rotated by 90 or 270 degrees")]
    UnsupportedRotation,

    #[display("Stored configuration is invalid")]
    ConfigStorageCorrupted,

    #[display("Configuration could not be encoded")]
    ConfigEncoding,

    #[cfg(feature = "pico1")]
    #[display("Flash operation failed: {_0:?}")]
    Flash(#[error(not(source))] embassy_rp::flash::Error),

    #[display("Display flush failed too many times in a row")]
    FlushRetriesExhausted,

    #[display("Format error")]
    FormatError,
}

impl From<core::fmt::Error> for Error {
    fn from(_: core::fmt::Error) -> Self {
        Self::FormatError
    }
}

#[cfg(feature = "pico1")]
impl From<embassy_executor::SpawnError> for Error {
    fn from(err: embassy_executor::SpawnError) -> Self {
        Self::TaskSpawn(err)
    }
}
