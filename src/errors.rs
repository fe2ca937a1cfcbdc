//! SNES errors
//!
//! All errors the emulator core can produce. The memory bus itself is total:
//! unmapped reads return open bus and stray writes are discarded, exactly as
//! the hardware behaves, so no bus-level error kind exists.

use thiserror::Error;

/// Console-level error type
#[derive(Debug, Error)]
pub enum SnesError {
    #[error("SNES can't run without a cartridge!")]
    NoCartridgeInserted,

    #[error("Cartridge error: {0}")]
    Cartridge(#[from] CartridgeError),
}

/// Cartridge loading errors
#[derive(Debug, Error)]
pub enum CartridgeError {
    #[error("ROM image is empty")]
    EmptyRom,

    #[error("Failed to read ROM file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
