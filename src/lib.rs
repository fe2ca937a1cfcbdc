//! SNES emulator core: a cycle-counting 65c816 interpreter and the 24-bit
//! bus decoder it executes against.

mod cartridge;
mod errors;
mod interfaces;
mod snes;
mod types;
mod utils;

pub mod hardware;
pub mod processor;

pub use cartridge::Cartridge;
pub use errors::{CartridgeError, SnesError};
pub use interfaces::Bus;
pub use processor::registers::Registers;
pub use snes::Snes;
pub use types::{SharedBus, SharedMainBus};
