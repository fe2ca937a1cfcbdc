//! SNES hardware constants
//!
//! The 24-bit address space is decoded as `bank (8) || offset (16)`. Banks
//! 0x00-0x3F and 0x80-0xBF are a symmetric pair sharing the same window
//! layout; banks 0x7E-0x7F expose the full Work RAM linearly.

// Main bus
// --------
//
// Window layout inside the system bank pairs (0x00-0x3F / 0x80-0xBF)

// Low Work RAM window - mirror of the first 8 kB of WRAM
pub const LOW_WRAM_START: u16 = 0x0000;
pub const LOW_WRAM_END: u16 = 0x1FFF;
pub const LOW_WRAM_MIRROR_SIZE: u32 = 0x2000;

// Hardware registers (PPU, APU, DMA, joypads). Reads are open bus in this
// core; writes are discarded
pub const HARDWARE_START: u16 = 0x2000;
pub const HARDWARE_END: u16 = 0x5FFF;

// Save RAM window (present only when the cartridge carries SRAM)
pub const SRAM_WINDOW_START: u16 = 0x6000;
pub const SRAM_WINDOW_END: u16 = 0x7FFF;

// Cartridge ROM window
pub const ROM_WINDOW_START: u16 = 0x8000;
pub const ROM_WINDOW_END: u16 = 0xFFFF;

// System bank pairs
pub const SYSTEM_BANKS_LOW_END: u8 = 0x3F;
pub const SYSTEM_BANKS_HIGH_START: u8 = 0x80;
pub const SYSTEM_BANKS_HIGH_END: u8 = 0xBF;

// Banks 0x7E-0x7F - the full 128 kB Work RAM, linearized as
// ((bank & 1) << 16) | offset
pub const WRAM_BANK_LOW: u8 = 0x7E;
pub const WRAM_BANK_HIGH: u8 = 0x7F;

// Memory sizes
pub const WRAM_SIZE: usize = 128 * 1024;
pub const SRAM_DEFAULT_SIZE: usize = 32 * 1024;
pub const VRAM_SIZE: usize = 64 * 1024;
pub const CGRAM_SIZE: usize = 512;
pub const OAM_SIZE: usize = 544;

// Interrupt vectors
// -----------------
//
// Little-endian 16-bit pointers read from ROM bank 0. The 65c816 has two
// vector tables: one used in emulation mode, one in native mode.

pub const VECTOR_EMULATION_COP: u32 = 0xFFF4;
pub const VECTOR_EMULATION_ABORT: u32 = 0xFFF8;
pub const VECTOR_EMULATION_NMI: u32 = 0xFFFA;
pub const VECTOR_EMULATION_RESET: u32 = 0xFFFC;
pub const VECTOR_EMULATION_BRK: u32 = 0xFFFE;
pub const VECTOR_EMULATION_IRQ: u32 = 0xFFFE;

pub const VECTOR_NATIVE_COP: u32 = 0xFFE4;
pub const VECTOR_NATIVE_BRK: u32 = 0xFFE6;
pub const VECTOR_NATIVE_ABORT: u32 = 0xFFE8;
pub const VECTOR_NATIVE_NMI: u32 = 0xFFEA;
pub const VECTOR_NATIVE_IRQ: u32 = 0xFFEE;
