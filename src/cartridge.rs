use std::fs;
use std::path::Path;

use log::debug;

use crate::errors::CartridgeError;

/// A game cartridge: the ROM image handed to the bus plus a display name.
///
/// SNES ROM dumps have no mandatory header; the only validation is that the
/// image is non-empty. The bus pads it to a power of two when it is mapped.
pub struct Cartridge {
    name: String,
    rom: Vec<u8>,
}

impl Cartridge {
    /// Create a cartridge from a raw ROM image
    pub fn from_bytes(rom: Vec<u8>) -> Result<Self, CartridgeError> {
        if rom.is_empty() {
            return Err(CartridgeError::EmptyRom);
        }

        debug!("Cartridge image: {} bytes", rom.len());
        Ok(Self {
            name: String::from("<raw image>"),
            rom,
        })
    }

    /// Create a cartridge loading the contents of a `.sfc`/`.smc` ROM file
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, CartridgeError> {
        let name = path
            .as_ref()
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| String::from("<unnamed>"));

        let rom = fs::read(path.as_ref()).map_err(|source| CartridgeError::Io {
            path: path.as_ref().display().to_string(),
            source,
        })?;

        let mut cartridge = Self::from_bytes(rom)?;
        cartridge.name = name;
        Ok(cartridge)
    }

    pub fn rom(&self) -> &[u8] {
        &self.rom
    }

    pub fn into_rom(self) -> Vec<u8> {
        self.rom
    }
}

impl std::fmt::Display for Cartridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
