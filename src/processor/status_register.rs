use std::convert::From;

use crate::utils;

// Bring local enum variants to scope
use StatusRegisterFlag::*;

/// The 65c816 P register.
///
/// Bits outside the eight defined flag positions do not exist on this CPU,
/// but conversions are bitwise in both directions so no pattern is ever
/// masked away.
#[derive(Copy, Clone, Default)]
pub struct StatusRegister {
    sr: u8,
}

impl StatusRegister {
    pub fn new() -> Self {
        Self { sr: 0 }
    }

    pub fn get(&self, flag: StatusRegisterFlag) -> bool {
        utils::bv(self.sr, flag as u8) > 0
    }

    pub fn set(&mut self, flag: StatusRegisterFlag) {
        self.sr = utils::set_bit(self.sr, flag as u8);
    }

    pub fn clear(&mut self, flag: StatusRegisterFlag) {
        self.sr = utils::clear_bit(self.sr, flag as u8);
    }

    pub fn set_value(&mut self, flag: StatusRegisterFlag, condition: bool) {
        match condition {
            true => self.set(flag),
            false => self.clear(flag),
        }
    }

    /// Set N or Z from an 8-bit result
    pub fn auto_set_8(&mut self, flag: StatusRegisterFlag, value: u8) {
        let condition = match flag {
            Zero => value == 0,
            Negative => (value as i8) < 0,
            _ => panic!("Auto set flag {flag:?} not implemented"),
        };

        self.set_value(flag, condition);
    }

    /// Set N or Z from a 16-bit result
    pub fn auto_set_16(&mut self, flag: StatusRegisterFlag, value: u16) {
        let condition = match flag {
            Zero => value == 0,
            Negative => (value as i16) < 0,
            _ => panic!("Auto set flag {flag:?} not implemented"),
        };

        self.set_value(flag, condition);
    }
}

impl From<u8> for StatusRegister {
    fn from(value: u8) -> Self {
        Self { sr: value }
    }
}

impl From<StatusRegister> for u8 {
    fn from(value: StatusRegister) -> Self {
        value.sr
    }
}

#[derive(Copy, Clone, Debug)]
pub enum StatusRegisterFlag {
    Negative = 7,
    Overflow = 6,
    // 0 = 16-bit accumulator/memory, 1 = 8-bit. Serves as the break bit on
    // interrupt frames pushed in emulation mode
    MemoryWidth = 5,
    // 0 = 16-bit index registers, 1 = 8-bit
    IndexWidth = 4,
    Decimal = 3,
    InterruptDisable = 2,
    Zero = 1,
    Carry = 0,
}
