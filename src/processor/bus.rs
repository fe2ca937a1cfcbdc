use log::{debug, trace};

use crate::hardware::{
    CGRAM_SIZE, HARDWARE_END, HARDWARE_START, LOW_WRAM_END, LOW_WRAM_MIRROR_SIZE, OAM_SIZE,
    SRAM_DEFAULT_SIZE, SRAM_WINDOW_END, SRAM_WINDOW_START, SYSTEM_BANKS_HIGH_END,
    SYSTEM_BANKS_HIGH_START, SYSTEM_BANKS_LOW_END, VRAM_SIZE, WRAM_BANK_HIGH, WRAM_BANK_LOW,
    WRAM_SIZE,
};
use crate::interfaces::Bus;

/// Value driven onto the bus by reads nothing answers
pub const OPEN_BUS: u8 = 0xFF;

/// Storage region a 24-bit address decodes to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    Wram,
    Sram,
    Rom,
    Hardware,
    Unmapped,
}

/// The main 24-bit SNES bus.
///
/// Owns Work RAM, Save RAM and the cartridge ROM, decodes every CPU access
/// to one of them and services it with the hardware's failure-free
/// semantics: open-bus reads for unanswered addresses, silent discards for
/// ROM and unmapped writes.
///
/// VRAM, CGRAM and OAM are allocated here but only as storage; their access
/// ports belong to the picture processor, which is outside this core.
pub struct MainBus {
    wram: Vec<u8>,
    sram: Vec<u8>,
    rom: Vec<u8>,

    vram: Vec<u8>,
    cgram: Vec<u8>,
    oam: Vec<u8>,
}

impl MainBus {
    pub fn new() -> Self {
        Self::with_sram(SRAM_DEFAULT_SIZE)
    }

    /// Build a bus with `sram_size` bytes of Save RAM. The size must be
    /// zero (no SRAM) or a power of two, so offsets can be masked
    pub fn with_sram(sram_size: usize) -> Self {
        assert!(
            sram_size == 0 || sram_size.is_power_of_two(),
            "SRAM size must be a power of two, got {sram_size}"
        );

        Self {
            wram: vec![0; WRAM_SIZE],
            sram: vec![0; sram_size],
            rom: Vec::new(),
            vram: vec![0; VRAM_SIZE],
            cgram: vec![0; CGRAM_SIZE],
            oam: vec![0; OAM_SIZE],
        }
    }

    /// Clear every RAM region. The loaded ROM survives a reset
    pub fn reset(&mut self) {
        self.wram.fill(0);
        self.sram.fill(0);
        self.vram.fill(0);
        self.cgram.fill(0);
        self.oam.fill(0);
    }

    /// Make `image` the ROM region, padded to a power of two so offsets can
    /// be masked. An empty image is rejected and leaves the bus untouched
    pub fn load_rom(&mut self, image: Vec<u8>) -> bool {
        if image.is_empty() {
            return false;
        }

        let mut rom = image;
        let size = rom.len();
        let padded = size.next_power_of_two();
        rom.resize(padded, 0);
        debug!("Loaded ROM: {size} bytes ({padded} after padding)");
        self.rom = rom;
        true
    }

    pub fn has_rom(&self) -> bool {
        !self.rom.is_empty()
    }

    /// Decode a 24-bit address to the region that answers it
    pub fn region(address: u32) -> Region {
        let bank = (address >> 16) as u8;
        let offset = (address & 0xFFFF) as u16;

        if bank <= SYSTEM_BANKS_LOW_END
            || (SYSTEM_BANKS_HIGH_START..=SYSTEM_BANKS_HIGH_END).contains(&bank)
        {
            return match offset {
                o if o <= LOW_WRAM_END => Region::Wram,
                o if (HARDWARE_START..=HARDWARE_END).contains(&o) => Region::Hardware,
                o if (SRAM_WINDOW_START..=SRAM_WINDOW_END).contains(&o) => Region::Sram,
                _ => Region::Rom,
            };
        }

        if bank == WRAM_BANK_LOW || bank == WRAM_BANK_HIGH {
            return Region::Wram;
        }

        // Banks 0x40-0x7D and 0xC0-0xFF
        Region::Rom
    }

    fn wram_index(address: u32) -> usize {
        let bank = (address >> 16) as u8;
        let offset = address & 0xFFFF;

        if bank == WRAM_BANK_LOW || bank == WRAM_BANK_HIGH {
            // Full 128 kB, linearized across the two banks
            ((((bank & 1) as u32) << 16) | offset) as usize
        } else {
            // Low-WRAM window mirrors the first 8 kB
            (offset % LOW_WRAM_MIRROR_SIZE) as usize
        }
    }

    fn sram_index(&self, address: u32) -> usize {
        let offset = (address & 0xFFFF) as usize - SRAM_WINDOW_START as usize;
        offset & (self.sram.len() - 1)
    }

    fn rom_index(&self, address: u32) -> usize {
        address as usize & (self.rom.len() - 1)
    }
}

impl Default for MainBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus for MainBus {
    fn read(&self, address: u32) -> u8 {
        let address = address & 0xFF_FFFF;

        let data = match Self::region(address) {
            Region::Wram => self.wram[Self::wram_index(address)],
            Region::Sram if !self.sram.is_empty() => self.sram[self.sram_index(address)],
            Region::Rom if !self.rom.is_empty() => self.rom[self.rom_index(address)],
            // Hardware registers, absent SRAM/ROM: open bus
            _ => OPEN_BUS,
        };

        trace!("Bus read:  {address:0>6X} -> {data:0>2X}");
        data
    }

    fn write(&mut self, address: u32, data: u8) {
        let address = address & 0xFF_FFFF;
        trace!("Bus write: {address:0>6X} <- {data:0>2X}");

        match Self::region(address) {
            Region::Wram => {
                let index = Self::wram_index(address);
                self.wram[index] = data;
            }
            Region::Sram if !self.sram.is_empty() => {
                let index = self.sram_index(address);
                self.sram[index] = data;
            }
            // ROM, hardware window and unmapped space swallow writes
            _ => {}
        }
    }
}

// Storage-only access to the video memories. No bus decoding applies; the
// picture processor's ports are out of scope for this core.
impl MainBus {
    pub fn vram_read(&self, address: u16) -> u8 {
        self.vram[address as usize % VRAM_SIZE]
    }

    pub fn vram_write(&mut self, address: u16, data: u8) {
        self.vram[address as usize % VRAM_SIZE] = data;
    }

    pub fn cgram_read(&self, address: u16) -> u8 {
        self.cgram[address as usize % CGRAM_SIZE]
    }

    pub fn cgram_write(&mut self, address: u16, data: u8) {
        self.cgram[address as usize % CGRAM_SIZE] = data;
    }

    pub fn oam_read(&self, address: u16) -> u8 {
        self.oam[address as usize % OAM_SIZE]
    }

    pub fn oam_write(&mut self, address: u16, data: u8) {
        self.oam[address as usize % OAM_SIZE] = data;
    }
}
