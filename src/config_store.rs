//! Storage for the runtime configuration in flash memory.
//!
//! The configuration is postcard-encoded and framed with a magic number,
//! format version, length, and CRC in the last erase sector. A missing or
//! older-versioned record reads as `None` (callers fall back to defaults);
//! a record that fails its CRC is reported as corrupted.

#![cfg(feature = "pico1")]

use crc32fast::Hasher;
use embassy_rp::flash::{Blocking, ERASE_SIZE, Flash, Instance};

use crate::config::ClockConfig;
use crate::{Error, Result};

/// Total internal flash on the Pico board.
pub const INTERNAL_FLASH_SIZE: usize = 2 * 1024 * 1024;

const STORAGE_SIZE: usize = ERASE_SIZE;
const MAGIC: u32 = 0x4243_4647; // 'BCFG'
const VERSION: u16 = 1;
const VERSION_OFFSET: usize = 4;
const LEN_OFFSET: usize = 6;
const PAYLOAD_OFFSET: usize = 8;
const CRC_SIZE: usize = 4;

/// Load the persisted configuration, if any.
///
/// # Errors
///
/// Flash read failures and CRC mismatches; an absent record is `Ok(None)`.
pub fn load<'d, T: Instance>(
    flash: &mut Flash<'d, T, Blocking, INTERNAL_FLASH_SIZE>,
) -> Result<Option<ClockConfig>> {
    let offset = storage_offset(flash);
    let mut buffer = [0u8; STORAGE_SIZE];
    flash
        .blocking_read(offset, &mut buffer)
        .map_err(Error::Flash)?;

    if u32::from_le_bytes(buffer[..VERSION_OFFSET].try_into().unwrap()) != MAGIC {
        return Ok(None);
    }

    let version = u16::from_le_bytes(buffer[VERSION_OFFSET..LEN_OFFSET].try_into().unwrap());
    if version != VERSION {
        return Ok(None);
    }

    let len = usize::from(u16::from_le_bytes(
        buffer[LEN_OFFSET..PAYLOAD_OFFSET].try_into().unwrap(),
    ));
    if len > STORAGE_SIZE - PAYLOAD_OFFSET - CRC_SIZE {
        return Err(Error::ConfigStorageCorrupted);
    }
    let payload_end = PAYLOAD_OFFSET + len;

    let crc_stored = u32::from_le_bytes(
        buffer[payload_end..payload_end + CRC_SIZE]
            .try_into()
            .unwrap(),
    );
    let crc = compute_crc(&buffer[VERSION_OFFSET..payload_end]);
    if crc != crc_stored {
        return Err(Error::ConfigStorageCorrupted);
    }

    let config = postcard::from_bytes(&buffer[PAYLOAD_OFFSET..payload_end])
        .map_err(|_| Error::ConfigStorageCorrupted)?;
    Ok(Some(config))
}

/// Persist the configuration to flash.
///
/// # Errors
///
/// Encoding failures and flash erase/write failures.
pub fn save<'d, T: Instance>(
    flash: &mut Flash<'d, T, Blocking, INTERNAL_FLASH_SIZE>,
    config: &ClockConfig,
) -> Result<()> {
    let offset = storage_offset(flash);
    let mut buffer = [0xFFu8; STORAGE_SIZE];
    buffer[..VERSION_OFFSET].copy_from_slice(&MAGIC.to_le_bytes());
    buffer[VERSION_OFFSET..LEN_OFFSET].copy_from_slice(&VERSION.to_le_bytes());

    let len = postcard::to_slice(
        config,
        &mut buffer[PAYLOAD_OFFSET..STORAGE_SIZE - CRC_SIZE],
    )
    .map_err(|_| Error::ConfigEncoding)?
    .len();
    let payload_end = PAYLOAD_OFFSET + len;

    #[expect(
        clippy::cast_possible_truncation,
        reason = "The payload fits one erase sector, far below u16::MAX."
    )]
    buffer[LEN_OFFSET..PAYLOAD_OFFSET].copy_from_slice(&(len as u16).to_le_bytes());

    let crc = compute_crc(&buffer[VERSION_OFFSET..payload_end]);
    buffer[payload_end..payload_end + CRC_SIZE].copy_from_slice(&crc.to_le_bytes());

    flash
        .blocking_erase(offset, offset + STORAGE_SIZE as u32)
        .map_err(Error::Flash)?;
    flash
        .blocking_write(offset, &buffer)
        .map_err(Error::Flash)?;
    Ok(())
}

/// Remove the persisted configuration from flash.
///
/// # Errors
///
/// Flash erase failures.
pub fn clear<'d, T: Instance>(
    flash: &mut Flash<'d, T, Blocking, INTERNAL_FLASH_SIZE>,
) -> Result<()> {
    let offset = storage_offset(flash);
    flash
        .blocking_erase(offset, offset + STORAGE_SIZE as u32)
        .map_err(Error::Flash)
}

fn storage_offset<'d, T: Instance>(flash: &Flash<'d, T, Blocking, INTERNAL_FLASH_SIZE>) -> u32 {
    let capacity = flash.capacity() as u32;
    capacity - STORAGE_SIZE as u32
}

fn compute_crc(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}
