use std::collections::HashMap;

use crate::hardware::{
    VECTOR_EMULATION_BRK, VECTOR_EMULATION_COP, VECTOR_NATIVE_BRK, VECTOR_NATIVE_COP,
};
use crate::processor::cpu::Cpu;
use crate::processor::instruction::{
    AddressingMode, Instruction, InstructionKind, Opcode, WidthPenalty,
};
use crate::processor::status_register::StatusRegisterFlag;
use crate::utils;

use AddressingMode::*;
// the explicit imports win over the glob where the names collide
use InstructionKind::{BlockMove, Branch, BranchLong, Implied, Internal, Jump, Memory};
use StatusRegisterFlag::*;

pub struct InstructionSet {
    instruction_set: HashMap<Opcode, Instruction>,
}

macro_rules! instruction {
    ($set:expr, $opcode:expr, $name:expr, $kind:expr, $mode:expr, $cycles:expr) => {
        instruction!($set, $opcode, $name, $kind, $mode, $cycles, WidthPenalty::None)
    };
    ($set:expr, $opcode:expr, $name:expr, $kind:expr, $mode:expr, $cycles:expr, $penalty:expr) => {
        $set.insert(
            $opcode,
            Instruction {
                opcode: $opcode,
                name: $name,
                instruction: $kind,
                addressing_mode: $mode,
                cycles: $cycles,
                width_penalty: $penalty,
            },
        )
    };
}

impl InstructionSet {
    pub fn get(&self, opcode: Opcode) -> Option<&Instruction> {
        self.instruction_set.get(&opcode)
    }

    /// Build the 65c816 dispatch table: one entry per implemented opcode
    /// with its operation, addressing mode, base cycle count and the width
    /// flag that buys an extra cycle at 16 bits.
    pub fn new_65c816_set() -> Self {
        use WidthPenalty::{Index, Memory as MemWidth};

        let mut set = HashMap::new();

        // Load instructions
        instruction!(set, 0xA9, "LDA", Memory(lda), ImmediateM, 2, MemWidth);
        instruction!(set, 0xA5, "LDA", Memory(lda), Direct, 3, MemWidth);
        instruction!(set, 0xB5, "LDA", Memory(lda), DirectX, 4, MemWidth);
        instruction!(set, 0xAD, "LDA", Memory(lda), Absolute, 4, MemWidth);
        instruction!(set, 0xBD, "LDA", Memory(lda), AbsoluteX, 4, MemWidth);
        instruction!(set, 0xB9, "LDA", Memory(lda), AbsoluteY, 4, MemWidth);
        instruction!(set, 0xA1, "LDA", Memory(lda), IndirectX, 6, MemWidth);
        instruction!(set, 0xB1, "LDA", Memory(lda), IndirectY, 5, MemWidth);

        instruction!(set, 0xA2, "LDX", Memory(ldx), ImmediateX, 2, Index);
        instruction!(set, 0xA6, "LDX", Memory(ldx), Direct, 3, Index);
        instruction!(set, 0xB6, "LDX", Memory(ldx), DirectY, 4, Index);
        instruction!(set, 0xAE, "LDX", Memory(ldx), Absolute, 4, Index);
        instruction!(set, 0xBE, "LDX", Memory(ldx), AbsoluteY, 4, Index);

        instruction!(set, 0xA0, "LDY", Memory(ldy), ImmediateX, 2, Index);
        instruction!(set, 0xA4, "LDY", Memory(ldy), Direct, 3, Index);
        instruction!(set, 0xB4, "LDY", Memory(ldy), DirectX, 4, Index);
        instruction!(set, 0xAC, "LDY", Memory(ldy), Absolute, 4, Index);
        instruction!(set, 0xBC, "LDY", Memory(ldy), AbsoluteX, 4, Index);

        // Store instructions
        instruction!(set, 0x85, "STA", Memory(sta), Direct, 3, MemWidth);
        instruction!(set, 0x95, "STA", Memory(sta), DirectX, 4, MemWidth);
        instruction!(set, 0x8D, "STA", Memory(sta), Absolute, 4, MemWidth);
        instruction!(set, 0x9D, "STA", Memory(sta), AbsoluteX, 5, MemWidth);
        instruction!(set, 0x99, "STA", Memory(sta), AbsoluteY, 5, MemWidth);
        instruction!(set, 0x81, "STA", Memory(sta), IndirectX, 6, MemWidth);
        instruction!(set, 0x91, "STA", Memory(sta), IndirectY, 6, MemWidth);

        instruction!(set, 0x86, "STX", Memory(stx), Direct, 3, Index);
        instruction!(set, 0x96, "STX", Memory(stx), DirectY, 4, Index);
        instruction!(set, 0x8E, "STX", Memory(stx), Absolute, 4, Index);

        instruction!(set, 0x84, "STY", Memory(sty), Direct, 3, Index);
        instruction!(set, 0x94, "STY", Memory(sty), DirectX, 4, Index);
        instruction!(set, 0x8C, "STY", Memory(sty), Absolute, 4, Index);

        // Register transfers
        instruction!(set, 0xAA, "TAX", Implied(tax), AddressingMode::Implied, 2);
        instruction!(set, 0xA8, "TAY", Implied(tay), AddressingMode::Implied, 2);
        instruction!(set, 0x8A, "TXA", Implied(txa), AddressingMode::Implied, 2);
        instruction!(set, 0x98, "TYA", Implied(tya), AddressingMode::Implied, 2);
        instruction!(set, 0xBA, "TSX", Implied(tsx), AddressingMode::Implied, 2);
        instruction!(set, 0x9A, "TXS", Implied(txs), AddressingMode::Implied, 2);
        instruction!(set, 0x5B, "TCD", Implied(tcd), AddressingMode::Implied, 2);
        instruction!(set, 0x7B, "TDC", Implied(tdc), AddressingMode::Implied, 2);
        instruction!(set, 0x1B, "TCS", Implied(tcs), AddressingMode::Implied, 2);
        instruction!(set, 0x3B, "TSC", Implied(tsc), AddressingMode::Implied, 2);

        // Stack instructions
        instruction!(set, 0x48, "PHA", Implied(pha), AddressingMode::Implied, 3, MemWidth);
        instruction!(set, 0xDA, "PHX", Implied(phx), AddressingMode::Implied, 3, Index);
        instruction!(set, 0x5A, "PHY", Implied(phy), AddressingMode::Implied, 3, Index);
        instruction!(set, 0x08, "PHP", Implied(php), AddressingMode::Implied, 3);
        instruction!(set, 0x0B, "PHD", Implied(phd), AddressingMode::Implied, 4);
        instruction!(set, 0x8B, "PHB", Implied(phb), AddressingMode::Implied, 3);
        instruction!(set, 0x4B, "PHK", Implied(phk), AddressingMode::Implied, 3);
        instruction!(set, 0x68, "PLA", Implied(pla), AddressingMode::Implied, 4, MemWidth);
        instruction!(set, 0xFA, "PLX", Implied(plx), AddressingMode::Implied, 4, Index);
        instruction!(set, 0x7A, "PLY", Implied(ply), AddressingMode::Implied, 4, Index);
        instruction!(set, 0x28, "PLP", Implied(plp), AddressingMode::Implied, 4);
        instruction!(set, 0x2B, "PLD", Implied(pld), AddressingMode::Implied, 5);
        instruction!(set, 0xAB, "PLB", Implied(plb), AddressingMode::Implied, 4);

        // Arithmetic
        instruction!(set, 0x69, "ADC", Memory(adc), ImmediateM, 2, MemWidth);
        instruction!(set, 0x65, "ADC", Memory(adc), Direct, 3, MemWidth);
        instruction!(set, 0x75, "ADC", Memory(adc), DirectX, 4, MemWidth);
        instruction!(set, 0x6D, "ADC", Memory(adc), Absolute, 4, MemWidth);
        instruction!(set, 0x7D, "ADC", Memory(adc), AbsoluteX, 4, MemWidth);
        instruction!(set, 0x79, "ADC", Memory(adc), AbsoluteY, 4, MemWidth);
        instruction!(set, 0x61, "ADC", Memory(adc), IndirectX, 6, MemWidth);
        instruction!(set, 0x71, "ADC", Memory(adc), IndirectY, 5, MemWidth);

        instruction!(set, 0xE9, "SBC", Memory(sbc), ImmediateM, 2, MemWidth);
        instruction!(set, 0xE5, "SBC", Memory(sbc), Direct, 3, MemWidth);
        instruction!(set, 0xF5, "SBC", Memory(sbc), DirectX, 4, MemWidth);
        instruction!(set, 0xED, "SBC", Memory(sbc), Absolute, 4, MemWidth);
        instruction!(set, 0xFD, "SBC", Memory(sbc), AbsoluteX, 4, MemWidth);
        instruction!(set, 0xF9, "SBC", Memory(sbc), AbsoluteY, 4, MemWidth);
        instruction!(set, 0xE1, "SBC", Memory(sbc), IndirectX, 6, MemWidth);
        instruction!(set, 0xF1, "SBC", Memory(sbc), IndirectY, 5, MemWidth);

        // Logic operations
        instruction!(set, 0x29, "AND", Memory(and), ImmediateM, 2, MemWidth);
        instruction!(set, 0x25, "AND", Memory(and), Direct, 3, MemWidth);
        instruction!(set, 0x35, "AND", Memory(and), DirectX, 4, MemWidth);
        instruction!(set, 0x2D, "AND", Memory(and), Absolute, 4, MemWidth);
        instruction!(set, 0x3D, "AND", Memory(and), AbsoluteX, 4, MemWidth);
        instruction!(set, 0x39, "AND", Memory(and), AbsoluteY, 4, MemWidth);
        instruction!(set, 0x21, "AND", Memory(and), IndirectX, 6, MemWidth);
        instruction!(set, 0x31, "AND", Memory(and), IndirectY, 5, MemWidth);

        instruction!(set, 0x09, "ORA", Memory(ora), ImmediateM, 2, MemWidth);
        instruction!(set, 0x05, "ORA", Memory(ora), Direct, 3, MemWidth);
        instruction!(set, 0x15, "ORA", Memory(ora), DirectX, 4, MemWidth);
        instruction!(set, 0x0D, "ORA", Memory(ora), Absolute, 4, MemWidth);
        instruction!(set, 0x1D, "ORA", Memory(ora), AbsoluteX, 4, MemWidth);
        instruction!(set, 0x19, "ORA", Memory(ora), AbsoluteY, 4, MemWidth);
        instruction!(set, 0x01, "ORA", Memory(ora), IndirectX, 6, MemWidth);
        instruction!(set, 0x11, "ORA", Memory(ora), IndirectY, 5, MemWidth);

        instruction!(set, 0x49, "EOR", Memory(eor), ImmediateM, 2, MemWidth);
        instruction!(set, 0x45, "EOR", Memory(eor), Direct, 3, MemWidth);
        instruction!(set, 0x55, "EOR", Memory(eor), DirectX, 4, MemWidth);
        instruction!(set, 0x4D, "EOR", Memory(eor), Absolute, 4, MemWidth);
        instruction!(set, 0x5D, "EOR", Memory(eor), AbsoluteX, 4, MemWidth);
        instruction!(set, 0x59, "EOR", Memory(eor), AbsoluteY, 4, MemWidth);
        instruction!(set, 0x41, "EOR", Memory(eor), IndirectX, 6, MemWidth);
        instruction!(set, 0x51, "EOR", Memory(eor), IndirectY, 5, MemWidth);

        // Shifts and rotates
        instruction!(set, 0x0A, "ASL", Implied(asl_acc), Accumulator, 2);
        instruction!(set, 0x06, "ASL", Memory(asl), Direct, 5, MemWidth);
        instruction!(set, 0x16, "ASL", Memory(asl), DirectX, 6, MemWidth);
        instruction!(set, 0x0E, "ASL", Memory(asl), Absolute, 6, MemWidth);
        instruction!(set, 0x1E, "ASL", Memory(asl), AbsoluteX, 7, MemWidth);

        instruction!(set, 0x4A, "LSR", Implied(lsr_acc), Accumulator, 2);
        instruction!(set, 0x46, "LSR", Memory(lsr), Direct, 5, MemWidth);
        instruction!(set, 0x56, "LSR", Memory(lsr), DirectX, 6, MemWidth);
        instruction!(set, 0x4E, "LSR", Memory(lsr), Absolute, 6, MemWidth);
        instruction!(set, 0x5E, "LSR", Memory(lsr), AbsoluteX, 7, MemWidth);

        instruction!(set, 0x2A, "ROL", Implied(rol_acc), Accumulator, 2);
        instruction!(set, 0x26, "ROL", Memory(rol), Direct, 5, MemWidth);
        instruction!(set, 0x36, "ROL", Memory(rol), DirectX, 6, MemWidth);
        instruction!(set, 0x2E, "ROL", Memory(rol), Absolute, 6, MemWidth);
        instruction!(set, 0x3E, "ROL", Memory(rol), AbsoluteX, 7, MemWidth);

        instruction!(set, 0x6A, "ROR", Implied(ror_acc), Accumulator, 2);
        instruction!(set, 0x66, "ROR", Memory(ror), Direct, 5, MemWidth);
        instruction!(set, 0x76, "ROR", Memory(ror), DirectX, 6, MemWidth);
        instruction!(set, 0x6E, "ROR", Memory(ror), Absolute, 6, MemWidth);
        instruction!(set, 0x7E, "ROR", Memory(ror), AbsoluteX, 7, MemWidth);

        // Increments and decrements
        instruction!(set, 0x1A, "INC", Implied(inc_acc), Accumulator, 2);
        instruction!(set, 0xE6, "INC", Memory(inc), Direct, 5, MemWidth);
        instruction!(set, 0xF6, "INC", Memory(inc), DirectX, 6, MemWidth);
        instruction!(set, 0xEE, "INC", Memory(inc), Absolute, 6, MemWidth);
        instruction!(set, 0xFE, "INC", Memory(inc), AbsoluteX, 7, MemWidth);

        instruction!(set, 0x3A, "DEC", Implied(dec_acc), Accumulator, 2);
        instruction!(set, 0xC6, "DEC", Memory(dec), Direct, 5, MemWidth);
        instruction!(set, 0xD6, "DEC", Memory(dec), DirectX, 6, MemWidth);
        instruction!(set, 0xCE, "DEC", Memory(dec), Absolute, 6, MemWidth);
        instruction!(set, 0xDE, "DEC", Memory(dec), AbsoluteX, 7, MemWidth);

        instruction!(set, 0xE8, "INX", Implied(inx), AddressingMode::Implied, 2);
        instruction!(set, 0xC8, "INY", Implied(iny), AddressingMode::Implied, 2);
        instruction!(set, 0xCA, "DEX", Implied(dex), AddressingMode::Implied, 2);
        instruction!(set, 0x88, "DEY", Implied(dey), AddressingMode::Implied, 2);

        // Bit operations
        instruction!(set, 0x89, "BIT", Memory(bit_immediate), ImmediateM, 2, MemWidth);
        instruction!(set, 0x24, "BIT", Memory(bit), Direct, 3, MemWidth);
        instruction!(set, 0x34, "BIT", Memory(bit), DirectX, 4, MemWidth);
        instruction!(set, 0x2C, "BIT", Memory(bit), Absolute, 4, MemWidth);
        instruction!(set, 0x3C, "BIT", Memory(bit), AbsoluteX, 4, MemWidth);

        instruction!(set, 0x04, "TSB", Memory(tsb), Direct, 5, MemWidth);
        instruction!(set, 0x0C, "TSB", Memory(tsb), Absolute, 6, MemWidth);
        instruction!(set, 0x14, "TRB", Memory(trb), Direct, 5, MemWidth);
        instruction!(set, 0x1C, "TRB", Memory(trb), Absolute, 6, MemWidth);

        // Comparisons
        instruction!(set, 0xC9, "CMP", Memory(cmp), ImmediateM, 2, MemWidth);
        instruction!(set, 0xC5, "CMP", Memory(cmp), Direct, 3, MemWidth);
        instruction!(set, 0xD5, "CMP", Memory(cmp), DirectX, 4, MemWidth);
        instruction!(set, 0xCD, "CMP", Memory(cmp), Absolute, 4, MemWidth);
        instruction!(set, 0xDD, "CMP", Memory(cmp), AbsoluteX, 4, MemWidth);
        instruction!(set, 0xD9, "CMP", Memory(cmp), AbsoluteY, 4, MemWidth);
        instruction!(set, 0xC1, "CMP", Memory(cmp), IndirectX, 6, MemWidth);
        instruction!(set, 0xD1, "CMP", Memory(cmp), IndirectY, 5, MemWidth);

        instruction!(set, 0xE0, "CPX", Memory(cpx), ImmediateX, 2, Index);
        instruction!(set, 0xE4, "CPX", Memory(cpx), Direct, 3, Index);
        instruction!(set, 0xEC, "CPX", Memory(cpx), Absolute, 4, Index);

        instruction!(set, 0xC0, "CPY", Memory(cpy), ImmediateX, 2, Index);
        instruction!(set, 0xC4, "CPY", Memory(cpy), Direct, 3, Index);
        instruction!(set, 0xCC, "CPY", Memory(cpy), Absolute, 4, Index);

        // Conditional branches
        instruction!(set, 0x10, "BPL", Branch(bpl), Relative, 2);
        instruction!(set, 0x30, "BMI", Branch(bmi), Relative, 2);
        instruction!(set, 0x50, "BVC", Branch(bvc), Relative, 2);
        instruction!(set, 0x70, "BVS", Branch(bvs), Relative, 2);
        instruction!(set, 0x90, "BCC", Branch(bcc), Relative, 2);
        instruction!(set, 0xB0, "BCS", Branch(bcs), Relative, 2);
        instruction!(set, 0xD0, "BNE", Branch(bne), Relative, 2);
        instruction!(set, 0xF0, "BEQ", Branch(beq), Relative, 2);
        instruction!(set, 0x80, "BRA", Branch(bra), Relative, 3);
        instruction!(set, 0x82, "BRL", BranchLong(brl), RelativeLong, 4);

        // Jumps and subroutines
        instruction!(set, 0x4C, "JMP", Jump(jmp), Absolute, 3);
        instruction!(set, 0x6C, "JMP", Jump(jmp), AbsoluteIndirect, 5);
        instruction!(set, 0x7C, "JMP", Jump(jmp), AbsoluteIndexedIndirect, 6);
        instruction!(set, 0x20, "JSR", Jump(jsr), Absolute, 6);
        instruction!(set, 0x60, "RTS", Implied(rts), AddressingMode::Implied, 6);

        // Software interrupts
        instruction!(set, 0x00, "BRK", Internal(brk), AddressingMode::Implied, 7);
        instruction!(set, 0x02, "COP", Internal(cop), AddressingMode::Implied, 7);
        instruction!(set, 0x40, "RTI", Implied(rti), AddressingMode::Implied, 6);

        // Flag manipulation
        instruction!(set, 0x18, "CLC", Implied(clc), AddressingMode::Implied, 2);
        instruction!(set, 0x38, "SEC", Implied(sec), AddressingMode::Implied, 2);
        instruction!(set, 0x58, "CLI", Implied(cli), AddressingMode::Implied, 2);
        instruction!(set, 0x78, "SEI", Implied(sei), AddressingMode::Implied, 2);
        instruction!(set, 0xB8, "CLV", Implied(clv), AddressingMode::Implied, 2);
        instruction!(set, 0xD8, "CLD", Implied(cld), AddressingMode::Implied, 2);
        instruction!(set, 0xF8, "SED", Implied(sed), AddressingMode::Implied, 2);
        instruction!(set, 0xC2, "REP", Internal(rep), AddressingMode::Implied, 3);
        instruction!(set, 0xE2, "SEP", Internal(sep), AddressingMode::Implied, 3);

        // Mode exchange and block moves
        instruction!(set, 0xFB, "XCE", Implied(xce), AddressingMode::Implied, 2);
        instruction!(set, 0x54, "MVN", BlockMove(mvn), AddressingMode::BlockMove, 7);
        instruction!(set, 0x44, "MVP", BlockMove(mvp), AddressingMode::BlockMove, 7);

        // Halt, wait and reserved
        instruction!(set, 0xDB, "STP", Implied(stp), AddressingMode::Implied, 3);
        instruction!(set, 0xCB, "WAI", Implied(wai), AddressingMode::Implied, 3);
        instruction!(set, 0x42, "WDM", Internal(wdm), AddressingMode::Implied, 2);
        instruction!(set, 0xEA, "NOP", Implied(nop), AddressingMode::Implied, 2);

        Self {
            instruction_set: set,
        }
    }
}

// Load and store instructions

/// LDA - Load Accumulator with Memory
///
/// Operation:
/// M -> A
///
/// Status Register:
/// N Z C I D V
/// + + - - - -
pub fn lda(cpu: &mut Cpu, address: u32) {
    if cpu.regs.is_memory_8bit() {
        let value = cpu.read8(address);
        cpu.regs.set_acc8(value);
        cpu.regs.sr.auto_set_8(Negative, value);
        cpu.regs.sr.auto_set_8(Zero, value);
    } else {
        let value = cpu.read16(address);
        cpu.regs.acc = value;
        cpu.regs.sr.auto_set_16(Negative, value);
        cpu.regs.sr.auto_set_16(Zero, value);
    }
}

/// LDX - Load Index X with Memory
///
/// Operation:
/// M -> X
///
/// Status Register:
/// N Z C I D V
/// + + - - - -
pub fn ldx(cpu: &mut Cpu, address: u32) {
    if cpu.regs.is_index_8bit() {
        let value = cpu.read8(address);
        cpu.regs.x_reg = value as u16;
        cpu.regs.sr.auto_set_8(Negative, value);
        cpu.regs.sr.auto_set_8(Zero, value);
    } else {
        let value = cpu.read16(address);
        cpu.regs.x_reg = value;
        cpu.regs.sr.auto_set_16(Negative, value);
        cpu.regs.sr.auto_set_16(Zero, value);
    }
}

/// LDY - Load Index Y with Memory
///
/// Operation:
/// M -> Y
///
/// Status Register:
/// N Z C I D V
/// + + - - - -
pub fn ldy(cpu: &mut Cpu, address: u32) {
    if cpu.regs.is_index_8bit() {
        let value = cpu.read8(address);
        cpu.regs.y_reg = value as u16;
        cpu.regs.sr.auto_set_8(Negative, value);
        cpu.regs.sr.auto_set_8(Zero, value);
    } else {
        let value = cpu.read16(address);
        cpu.regs.y_reg = value;
        cpu.regs.sr.auto_set_16(Negative, value);
        cpu.regs.sr.auto_set_16(Zero, value);
    }
}

/// STA - Store Accumulator in Memory
///
/// Operation:
/// A -> M
///
/// Status Register:
/// N Z C I D V
/// - - - - - -
pub fn sta(cpu: &mut Cpu, address: u32) {
    if cpu.regs.is_memory_8bit() {
        let value = cpu.regs.acc8();
        cpu.write8(address, value);
    } else {
        let value = cpu.regs.acc;
        cpu.write16(address, value);
    }
}

/// STX - Store Index X in Memory
///
/// Operation:
/// X -> M
///
/// Status Register:
/// N Z C I D V
/// - - - - - -
pub fn stx(cpu: &mut Cpu, address: u32) {
    if cpu.regs.is_index_8bit() {
        let value = (cpu.regs.x_reg & 0xFF) as u8;
        cpu.write8(address, value);
    } else {
        let value = cpu.regs.x_reg;
        cpu.write16(address, value);
    }
}

/// STY - Store Index Y in Memory
///
/// Operation:
/// Y -> M
///
/// Status Register:
/// N Z C I D V
/// - - - - - -
pub fn sty(cpu: &mut Cpu, address: u32) {
    if cpu.regs.is_index_8bit() {
        let value = (cpu.regs.y_reg & 0xFF) as u8;
        cpu.write8(address, value);
    } else {
        let value = cpu.regs.y_reg;
        cpu.write16(address, value);
    }
}

// Register transfers

/// TAX - Transfer Accumulator to Index X
///
/// Operation:
/// A -> X
///
/// Status Register:
/// N Z C I D V
/// + + - - - -
pub fn tax(cpu: &mut Cpu) {
    if cpu.regs.is_index_8bit() {
        cpu.regs.x_reg = cpu.regs.acc & 0xFF;
        cpu.regs.sr.auto_set_8(Negative, cpu.regs.x_reg as u8);
        cpu.regs.sr.auto_set_8(Zero, cpu.regs.x_reg as u8);
    } else {
        cpu.regs.x_reg = cpu.regs.acc;
        cpu.regs.sr.auto_set_16(Negative, cpu.regs.x_reg);
        cpu.regs.sr.auto_set_16(Zero, cpu.regs.x_reg);
    }
}

/// TAY - Transfer Accumulator to Index Y
///
/// Operation:
/// A -> Y
///
/// Status Register:
/// N Z C I D V
/// + + - - - -
pub fn tay(cpu: &mut Cpu) {
    if cpu.regs.is_index_8bit() {
        cpu.regs.y_reg = cpu.regs.acc & 0xFF;
        cpu.regs.sr.auto_set_8(Negative, cpu.regs.y_reg as u8);
        cpu.regs.sr.auto_set_8(Zero, cpu.regs.y_reg as u8);
    } else {
        cpu.regs.y_reg = cpu.regs.acc;
        cpu.regs.sr.auto_set_16(Negative, cpu.regs.y_reg);
        cpu.regs.sr.auto_set_16(Zero, cpu.regs.y_reg);
    }
}

/// TXA - Transfer Index X to Accumulator
///
/// Operation:
/// X -> A
///
/// Status Register:
/// N Z C I D V
/// + + - - - -
pub fn txa(cpu: &mut Cpu) {
    if cpu.regs.is_memory_8bit() {
        let value = (cpu.regs.x_reg & 0xFF) as u8;
        cpu.regs.set_acc8(value);
        cpu.regs.sr.auto_set_8(Negative, value);
        cpu.regs.sr.auto_set_8(Zero, value);
    } else {
        cpu.regs.acc = cpu.regs.x_reg;
        cpu.regs.sr.auto_set_16(Negative, cpu.regs.acc);
        cpu.regs.sr.auto_set_16(Zero, cpu.regs.acc);
    }
}

/// TYA - Transfer Index Y to Accumulator
///
/// Operation:
/// Y -> A
///
/// Status Register:
/// N Z C I D V
/// + + - - - -
pub fn tya(cpu: &mut Cpu) {
    if cpu.regs.is_memory_8bit() {
        let value = (cpu.regs.y_reg & 0xFF) as u8;
        cpu.regs.set_acc8(value);
        cpu.regs.sr.auto_set_8(Negative, value);
        cpu.regs.sr.auto_set_8(Zero, value);
    } else {
        cpu.regs.acc = cpu.regs.y_reg;
        cpu.regs.sr.auto_set_16(Negative, cpu.regs.acc);
        cpu.regs.sr.auto_set_16(Zero, cpu.regs.acc);
    }
}

/// TSX - Transfer Stack Pointer to Index X
///
/// Operation:
/// SP -> X
///
/// Status Register:
/// N Z C I D V
/// + + - - - -
pub fn tsx(cpu: &mut Cpu) {
    if cpu.regs.is_index_8bit() {
        cpu.regs.x_reg = cpu.regs.sp & 0xFF;
        cpu.regs.sr.auto_set_8(Negative, cpu.regs.x_reg as u8);
        cpu.regs.sr.auto_set_8(Zero, cpu.regs.x_reg as u8);
    } else {
        cpu.regs.x_reg = cpu.regs.sp;
        cpu.regs.sr.auto_set_16(Negative, cpu.regs.x_reg);
        cpu.regs.sr.auto_set_16(Zero, cpu.regs.x_reg);
    }
}

/// TXS - Transfer Index X to Stack Pointer
///
/// TXS never updates N or Z.
///
/// Operation:
/// X -> SP
///
/// Status Register:
/// N Z C I D V
/// - - - - - -
pub fn txs(cpu: &mut Cpu) {
    cpu.regs.sp = cpu.regs.x_reg;
}

/// TCD - Transfer Accumulator to Direct Page
///
/// Always a full 16-bit transfer, whatever M says.
///
/// Operation:
/// C -> D
///
/// Status Register:
/// N Z C I D V
/// + + - - - -
pub fn tcd(cpu: &mut Cpu) {
    cpu.regs.direct_page = cpu.regs.acc;
    cpu.regs.sr.auto_set_16(Negative, cpu.regs.direct_page);
    cpu.regs.sr.auto_set_16(Zero, cpu.regs.direct_page);
}

/// TDC - Transfer Direct Page to Accumulator
///
/// Always a full 16-bit transfer.
///
/// Operation:
/// D -> C
///
/// Status Register:
/// N Z C I D V
/// + + - - - -
pub fn tdc(cpu: &mut Cpu) {
    cpu.regs.acc = cpu.regs.direct_page;
    cpu.regs.sr.auto_set_16(Negative, cpu.regs.acc);
    cpu.regs.sr.auto_set_16(Zero, cpu.regs.acc);
}

/// TCS - Transfer Accumulator to Stack Pointer
///
/// Always a full 16-bit transfer; never updates N or Z.
///
/// Operation:
/// C -> SP
///
/// Status Register:
/// N Z C I D V
/// - - - - - -
pub fn tcs(cpu: &mut Cpu) {
    cpu.regs.sp = cpu.regs.acc;
}

/// TSC - Transfer Stack Pointer to Accumulator
///
/// Always a full 16-bit transfer.
///
/// Operation:
/// SP -> C
///
/// Status Register:
/// N Z C I D V
/// + + - - - -
pub fn tsc(cpu: &mut Cpu) {
    cpu.regs.acc = cpu.regs.sp;
    cpu.regs.sr.auto_set_16(Negative, cpu.regs.acc);
    cpu.regs.sr.auto_set_16(Zero, cpu.regs.acc);
}

// Stack instructions

/// PHA - Push Accumulator on Stack
///
/// One byte at 8-bit width, two (high then low) at 16-bit.
///
/// Operation:
/// push A
///
/// Status Register:
/// N Z C I D V
/// - - - - - -
pub fn pha(cpu: &mut Cpu) {
    if cpu.regs.is_memory_8bit() {
        let value = cpu.regs.acc8();
        cpu.push8(value);
    } else {
        let value = cpu.regs.acc;
        cpu.push16(value);
    }
}

/// PHX - Push Index X on Stack
///
/// Operation:
/// push X
///
/// Status Register:
/// N Z C I D V
/// - - - - - -
pub fn phx(cpu: &mut Cpu) {
    if cpu.regs.is_index_8bit() {
        let value = (cpu.regs.x_reg & 0xFF) as u8;
        cpu.push8(value);
    } else {
        let value = cpu.regs.x_reg;
        cpu.push16(value);
    }
}

/// PHY - Push Index Y on Stack
///
/// Operation:
/// push Y
///
/// Status Register:
/// N Z C I D V
/// - - - - - -
pub fn phy(cpu: &mut Cpu) {
    if cpu.regs.is_index_8bit() {
        let value = (cpu.regs.y_reg & 0xFF) as u8;
        cpu.push8(value);
    } else {
        let value = cpu.regs.y_reg;
        cpu.push16(value);
    }
}

/// PHP - Push Processor Status on Stack
///
/// Operation:
/// push P
///
/// Status Register:
/// N Z C I D V
/// - - - - - -
pub fn php(cpu: &mut Cpu) {
    let sr: u8 = cpu.regs.sr.into();
    cpu.push8(sr);
}

/// PHD - Push Direct Page Register on Stack
///
/// Always 16-bit.
///
/// Operation:
/// push D
///
/// Status Register:
/// N Z C I D V
/// - - - - - -
pub fn phd(cpu: &mut Cpu) {
    let value = cpu.regs.direct_page;
    cpu.push16(value);
}

/// PHB - Push Data Bank Register on Stack
///
/// Operation:
/// push DBR
///
/// Status Register:
/// N Z C I D V
/// - - - - - -
pub fn phb(cpu: &mut Cpu) {
    let value = cpu.regs.dbr;
    cpu.push8(value);
}

/// PHK - Push Program Bank Register on Stack
///
/// Operation:
/// push PBR
///
/// Status Register:
/// N Z C I D V
/// - - - - - -
pub fn phk(cpu: &mut Cpu) {
    let value = cpu.regs.pbr;
    cpu.push8(value);
}

/// PLA - Pull Accumulator from Stack
///
/// Operation:
/// pull A
///
/// Status Register:
/// N Z C I D V
/// + + - - - -
pub fn pla(cpu: &mut Cpu) {
    if cpu.regs.is_memory_8bit() {
        let value = cpu.pull8();
        cpu.regs.set_acc8(value);
        cpu.regs.sr.auto_set_8(Negative, value);
        cpu.regs.sr.auto_set_8(Zero, value);
    } else {
        let value = cpu.pull16();
        cpu.regs.acc = value;
        cpu.regs.sr.auto_set_16(Negative, value);
        cpu.regs.sr.auto_set_16(Zero, value);
    }
}

/// PLX - Pull Index X from Stack
///
/// Operation:
/// pull X
///
/// Status Register:
/// N Z C I D V
/// + + - - - -
pub fn plx(cpu: &mut Cpu) {
    if cpu.regs.is_index_8bit() {
        let value = cpu.pull8();
        cpu.regs.x_reg = value as u16;
        cpu.regs.sr.auto_set_8(Negative, value);
        cpu.regs.sr.auto_set_8(Zero, value);
    } else {
        let value = cpu.pull16();
        cpu.regs.x_reg = value;
        cpu.regs.sr.auto_set_16(Negative, value);
        cpu.regs.sr.auto_set_16(Zero, value);
    }
}

/// PLY - Pull Index Y from Stack
///
/// Operation:
/// pull Y
///
/// Status Register:
/// N Z C I D V
/// + + - - - -
pub fn ply(cpu: &mut Cpu) {
    if cpu.regs.is_index_8bit() {
        let value = cpu.pull8();
        cpu.regs.y_reg = value as u16;
        cpu.regs.sr.auto_set_8(Negative, value);
        cpu.regs.sr.auto_set_8(Zero, value);
    } else {
        let value = cpu.pull16();
        cpu.regs.y_reg = value;
        cpu.regs.sr.auto_set_16(Negative, value);
        cpu.regs.sr.auto_set_16(Zero, value);
    }
}

/// PLP - Pull Processor Status from Stack
///
/// Restores the entire P register. In emulation mode the width bits are
/// forced back to 1; a restored X=1 zeroes the index high bytes.
///
/// Operation:
/// pull P
///
/// Status Register:
/// N Z C I D V
/// from stack
pub fn plp(cpu: &mut Cpu) {
    let value = cpu.pull8();
    cpu.regs.sr = value.into();
    if cpu.regs.emulation {
        cpu.regs.sr.set(MemoryWidth);
        cpu.regs.sr.set(IndexWidth);
    }
    cpu.regs.truncate_index_registers();
}

/// PLD - Pull Direct Page Register from Stack
///
/// Always 16-bit.
///
/// Operation:
/// pull D
///
/// Status Register:
/// N Z C I D V
/// + + - - - -
pub fn pld(cpu: &mut Cpu) {
    let value = cpu.pull16();
    cpu.regs.direct_page = value;
    cpu.regs.sr.auto_set_16(Negative, value);
    cpu.regs.sr.auto_set_16(Zero, value);
}

/// PLB - Pull Data Bank Register from Stack
///
/// Operation:
/// pull DBR
///
/// Status Register:
/// N Z C I D V
/// + + - - - -
pub fn plb(cpu: &mut Cpu) {
    let value = cpu.pull8();
    cpu.regs.dbr = value;
    cpu.regs.sr.auto_set_8(Negative, value);
    cpu.regs.sr.auto_set_8(Zero, value);
}

// Arithmetic operations

/// ADC - Add Memory to Accumulator with Carry
///
/// Decimal mode is tracked but executes as binary arithmetic in this core.
///
/// Operation:
/// A + M + C -> A, C
///
/// Status Register:
/// N Z C I D V
/// + + + - - +
pub fn adc(cpu: &mut Cpu, address: u32) {
    let carry: u16 = if cpu.regs.sr.get(Carry) { 1 } else { 0 };

    if cpu.regs.is_memory_8bit() {
        let operand = cpu.read8(address);
        let a = cpu.regs.acc8();
        let sum = a as u16 + operand as u16 + carry;
        let result = sum as u8;

        cpu.regs.sr.set_value(Carry, sum > 0xFF);
        cpu.regs
            .sr
            .set_value(Overflow, ((a ^ result) & (operand ^ result) & 0x80) != 0);
        cpu.regs.set_acc8(result);
        cpu.regs.sr.auto_set_8(Negative, result);
        cpu.regs.sr.auto_set_8(Zero, result);
    } else {
        let operand = cpu.read16(address);
        let a = cpu.regs.acc;
        let sum = a as u32 + operand as u32 + carry as u32;
        let result = sum as u16;

        cpu.regs.sr.set_value(Carry, sum > 0xFFFF);
        cpu.regs
            .sr
            .set_value(Overflow, ((a ^ result) & (operand ^ result) & 0x8000) != 0);
        cpu.regs.acc = result;
        cpu.regs.sr.auto_set_16(Negative, result);
        cpu.regs.sr.auto_set_16(Zero, result);
    }
}

/// SBC - Subtract Memory from Accumulator with Borrow
///
/// Decimal mode is tracked but executes as binary arithmetic in this core.
///
/// Operation:
/// A - M - (1 - C) -> A
///
/// Status Register:
/// N Z C I D V
/// + + + - - +
pub fn sbc(cpu: &mut Cpu, address: u32) {
    let borrow: u16 = if cpu.regs.sr.get(Carry) { 0 } else { 1 };

    if cpu.regs.is_memory_8bit() {
        let operand = cpu.read8(address);
        let a = cpu.regs.acc8();
        let difference = (a as u16).wrapping_sub(operand as u16).wrapping_sub(borrow);
        let result = difference as u8;

        // carry set means no borrow occurred
        cpu.regs.sr.set_value(Carry, difference & 0x100 == 0);
        cpu.regs
            .sr
            .set_value(Overflow, ((a ^ operand) & (a ^ result) & 0x80) != 0);
        cpu.regs.set_acc8(result);
        cpu.regs.sr.auto_set_8(Negative, result);
        cpu.regs.sr.auto_set_8(Zero, result);
    } else {
        let operand = cpu.read16(address);
        let a = cpu.regs.acc;
        let difference = (a as u32)
            .wrapping_sub(operand as u32)
            .wrapping_sub(borrow as u32);
        let result = difference as u16;

        cpu.regs.sr.set_value(Carry, difference & 0x1_0000 == 0);
        cpu.regs
            .sr
            .set_value(Overflow, ((a ^ operand) & (a ^ result) & 0x8000) != 0);
        cpu.regs.acc = result;
        cpu.regs.sr.auto_set_16(Negative, result);
        cpu.regs.sr.auto_set_16(Zero, result);
    }
}

// Logic operations

/// AND - AND Memory with Accumulator
///
/// Operation:
/// A AND M -> A
///
/// Status Register:
/// N Z C I D V
/// + + - - - -
pub fn and(cpu: &mut Cpu, address: u32) {
    if cpu.regs.is_memory_8bit() {
        let result = cpu.regs.acc8() & cpu.read8(address);
        cpu.regs.set_acc8(result);
        cpu.regs.sr.auto_set_8(Negative, result);
        cpu.regs.sr.auto_set_8(Zero, result);
    } else {
        let result = cpu.regs.acc & cpu.read16(address);
        cpu.regs.acc = result;
        cpu.regs.sr.auto_set_16(Negative, result);
        cpu.regs.sr.auto_set_16(Zero, result);
    }
}

/// ORA - OR Memory with Accumulator
///
/// Operation:
/// A OR M -> A
///
/// Status Register:
/// N Z C I D V
/// + + - - - -
pub fn ora(cpu: &mut Cpu, address: u32) {
    if cpu.regs.is_memory_8bit() {
        let result = cpu.regs.acc8() | cpu.read8(address);
        cpu.regs.set_acc8(result);
        cpu.regs.sr.auto_set_8(Negative, result);
        cpu.regs.sr.auto_set_8(Zero, result);
    } else {
        let result = cpu.regs.acc | cpu.read16(address);
        cpu.regs.acc = result;
        cpu.regs.sr.auto_set_16(Negative, result);
        cpu.regs.sr.auto_set_16(Zero, result);
    }
}

/// EOR - Exclusive-OR Memory with Accumulator
///
/// Operation:
/// A EOR M -> A
///
/// Status Register:
/// N Z C I D V
/// + + - - - -
pub fn eor(cpu: &mut Cpu, address: u32) {
    if cpu.regs.is_memory_8bit() {
        let result = cpu.regs.acc8() ^ cpu.read8(address);
        cpu.regs.set_acc8(result);
        cpu.regs.sr.auto_set_8(Negative, result);
        cpu.regs.sr.auto_set_8(Zero, result);
    } else {
        let result = cpu.regs.acc ^ cpu.read16(address);
        cpu.regs.acc = result;
        cpu.regs.sr.auto_set_16(Negative, result);
        cpu.regs.sr.auto_set_16(Zero, result);
    }
}

// Shift and rotate instructions. The memory forms read, modify and write
// back in that order

/// ASL - Shift Left One Bit (Memory)
///
/// Operation:
/// C <- [76543210] <- 0
///
/// Status Register:
/// N Z C I D V
/// + + + - - -
pub fn asl(cpu: &mut Cpu, address: u32) {
    if cpu.regs.is_memory_8bit() {
        let operand = cpu.read8(address);
        let result = operand << 1;
        cpu.write8(address, result);
        cpu.regs.sr.set_value(Carry, utils::bv(operand, 7) != 0);
        cpu.regs.sr.auto_set_8(Negative, result);
        cpu.regs.sr.auto_set_8(Zero, result);
    } else {
        let operand = cpu.read16(address);
        let result = operand << 1;
        cpu.write16(address, result);
        cpu.regs.sr.set_value(Carry, utils::bv16(operand, 15) != 0);
        cpu.regs.sr.auto_set_16(Negative, result);
        cpu.regs.sr.auto_set_16(Zero, result);
    }
}

/// ASL - Shift Left One Bit (Accumulator)
pub fn asl_acc(cpu: &mut Cpu) {
    if cpu.regs.is_memory_8bit() {
        let operand = cpu.regs.acc8();
        let result = operand << 1;
        cpu.regs.set_acc8(result);
        cpu.regs.sr.set_value(Carry, utils::bv(operand, 7) != 0);
        cpu.regs.sr.auto_set_8(Negative, result);
        cpu.regs.sr.auto_set_8(Zero, result);
    } else {
        let operand = cpu.regs.acc;
        let result = operand << 1;
        cpu.regs.acc = result;
        cpu.regs.sr.set_value(Carry, utils::bv16(operand, 15) != 0);
        cpu.regs.sr.auto_set_16(Negative, result);
        cpu.regs.sr.auto_set_16(Zero, result);
    }
}

/// LSR - Shift One Bit Right (Memory)
///
/// Operation:
/// 0 -> [76543210] -> C
///
/// Status Register:
/// N Z C I D V
/// 0 + + - - -
pub fn lsr(cpu: &mut Cpu, address: u32) {
    if cpu.regs.is_memory_8bit() {
        let operand = cpu.read8(address);
        let result = operand >> 1;
        cpu.write8(address, result);
        cpu.regs.sr.set_value(Carry, utils::bv(operand, 0) != 0);
        cpu.regs.sr.auto_set_8(Negative, result);
        cpu.regs.sr.auto_set_8(Zero, result);
    } else {
        let operand = cpu.read16(address);
        let result = operand >> 1;
        cpu.write16(address, result);
        cpu.regs.sr.set_value(Carry, utils::bv16(operand, 0) != 0);
        cpu.regs.sr.auto_set_16(Negative, result);
        cpu.regs.sr.auto_set_16(Zero, result);
    }
}

/// LSR - Shift One Bit Right (Accumulator)
pub fn lsr_acc(cpu: &mut Cpu) {
    if cpu.regs.is_memory_8bit() {
        let operand = cpu.regs.acc8();
        let result = operand >> 1;
        cpu.regs.set_acc8(result);
        cpu.regs.sr.set_value(Carry, utils::bv(operand, 0) != 0);
        cpu.regs.sr.auto_set_8(Negative, result);
        cpu.regs.sr.auto_set_8(Zero, result);
    } else {
        let operand = cpu.regs.acc;
        let result = operand >> 1;
        cpu.regs.acc = result;
        cpu.regs.sr.set_value(Carry, utils::bv16(operand, 0) != 0);
        cpu.regs.sr.auto_set_16(Negative, result);
        cpu.regs.sr.auto_set_16(Zero, result);
    }
}

/// ROL - Rotate One Bit Left (Memory)
///
/// Operation:
/// C <- [76543210] <- C
///
/// Status Register:
/// N Z C I D V
/// + + + - - -
pub fn rol(cpu: &mut Cpu, address: u32) {
    let carry_in = if cpu.regs.sr.get(Carry) { 1 } else { 0 };

    if cpu.regs.is_memory_8bit() {
        let operand = cpu.read8(address);
        let result = (operand << 1) | carry_in as u8;
        cpu.write8(address, result);
        cpu.regs.sr.set_value(Carry, utils::bv(operand, 7) != 0);
        cpu.regs.sr.auto_set_8(Negative, result);
        cpu.regs.sr.auto_set_8(Zero, result);
    } else {
        let operand = cpu.read16(address);
        let result = (operand << 1) | carry_in;
        cpu.write16(address, result);
        cpu.regs.sr.set_value(Carry, utils::bv16(operand, 15) != 0);
        cpu.regs.sr.auto_set_16(Negative, result);
        cpu.regs.sr.auto_set_16(Zero, result);
    }
}

/// ROL - Rotate One Bit Left (Accumulator)
pub fn rol_acc(cpu: &mut Cpu) {
    let carry_in = if cpu.regs.sr.get(Carry) { 1 } else { 0 };

    if cpu.regs.is_memory_8bit() {
        let operand = cpu.regs.acc8();
        let result = (operand << 1) | carry_in as u8;
        cpu.regs.set_acc8(result);
        cpu.regs.sr.set_value(Carry, utils::bv(operand, 7) != 0);
        cpu.regs.sr.auto_set_8(Negative, result);
        cpu.regs.sr.auto_set_8(Zero, result);
    } else {
        let operand = cpu.regs.acc;
        let result = (operand << 1) | carry_in;
        cpu.regs.acc = result;
        cpu.regs.sr.set_value(Carry, utils::bv16(operand, 15) != 0);
        cpu.regs.sr.auto_set_16(Negative, result);
        cpu.regs.sr.auto_set_16(Zero, result);
    }
}

/// ROR - Rotate One Bit Right (Memory)
///
/// Operation:
/// C -> [76543210] -> C
///
/// Status Register:
/// N Z C I D V
/// + + + - - -
pub fn ror(cpu: &mut Cpu, address: u32) {
    let carry_in: u16 = if cpu.regs.sr.get(Carry) { 1 } else { 0 };

    if cpu.regs.is_memory_8bit() {
        let operand = cpu.read8(address);
        let result = (operand >> 1) | ((carry_in as u8) << 7);
        cpu.write8(address, result);
        cpu.regs.sr.set_value(Carry, utils::bv(operand, 0) != 0);
        cpu.regs.sr.auto_set_8(Negative, result);
        cpu.regs.sr.auto_set_8(Zero, result);
    } else {
        let operand = cpu.read16(address);
        let result = (operand >> 1) | (carry_in << 15);
        cpu.write16(address, result);
        cpu.regs.sr.set_value(Carry, utils::bv16(operand, 0) != 0);
        cpu.regs.sr.auto_set_16(Negative, result);
        cpu.regs.sr.auto_set_16(Zero, result);
    }
}

/// ROR - Rotate One Bit Right (Accumulator)
pub fn ror_acc(cpu: &mut Cpu) {
    let carry_in: u16 = if cpu.regs.sr.get(Carry) { 1 } else { 0 };

    if cpu.regs.is_memory_8bit() {
        let operand = cpu.regs.acc8();
        let result = (operand >> 1) | ((carry_in as u8) << 7);
        cpu.regs.set_acc8(result);
        cpu.regs.sr.set_value(Carry, utils::bv(operand, 0) != 0);
        cpu.regs.sr.auto_set_8(Negative, result);
        cpu.regs.sr.auto_set_8(Zero, result);
    } else {
        let operand = cpu.regs.acc;
        let result = (operand >> 1) | (carry_in << 15);
        cpu.regs.acc = result;
        cpu.regs.sr.set_value(Carry, utils::bv16(operand, 0) != 0);
        cpu.regs.sr.auto_set_16(Negative, result);
        cpu.regs.sr.auto_set_16(Zero, result);
    }
}

// Increments and decrements

/// INC - Increment Memory by One
///
/// Operation:
/// M + 1 -> M
///
/// Status Register:
/// N Z C I D V
/// + + - - - -
pub fn inc(cpu: &mut Cpu, address: u32) {
    if cpu.regs.is_memory_8bit() {
        let result = cpu.read8(address).wrapping_add(1);
        cpu.write8(address, result);
        cpu.regs.sr.auto_set_8(Negative, result);
        cpu.regs.sr.auto_set_8(Zero, result);
    } else {
        let result = cpu.read16(address).wrapping_add(1);
        cpu.write16(address, result);
        cpu.regs.sr.auto_set_16(Negative, result);
        cpu.regs.sr.auto_set_16(Zero, result);
    }
}

/// INC - Increment Accumulator by One
pub fn inc_acc(cpu: &mut Cpu) {
    if cpu.regs.is_memory_8bit() {
        let result = cpu.regs.acc8().wrapping_add(1);
        cpu.regs.set_acc8(result);
        cpu.regs.sr.auto_set_8(Negative, result);
        cpu.regs.sr.auto_set_8(Zero, result);
    } else {
        let result = cpu.regs.acc.wrapping_add(1);
        cpu.regs.acc = result;
        cpu.regs.sr.auto_set_16(Negative, result);
        cpu.regs.sr.auto_set_16(Zero, result);
    }
}

/// DEC - Decrement Memory by One
///
/// Operation:
/// M - 1 -> M
///
/// Status Register:
/// N Z C I D V
/// + + - - - -
pub fn dec(cpu: &mut Cpu, address: u32) {
    if cpu.regs.is_memory_8bit() {
        let result = cpu.read8(address).wrapping_sub(1);
        cpu.write8(address, result);
        cpu.regs.sr.auto_set_8(Negative, result);
        cpu.regs.sr.auto_set_8(Zero, result);
    } else {
        let result = cpu.read16(address).wrapping_sub(1);
        cpu.write16(address, result);
        cpu.regs.sr.auto_set_16(Negative, result);
        cpu.regs.sr.auto_set_16(Zero, result);
    }
}

/// DEC - Decrement Accumulator by One
pub fn dec_acc(cpu: &mut Cpu) {
    if cpu.regs.is_memory_8bit() {
        let result = cpu.regs.acc8().wrapping_sub(1);
        cpu.regs.set_acc8(result);
        cpu.regs.sr.auto_set_8(Negative, result);
        cpu.regs.sr.auto_set_8(Zero, result);
    } else {
        let result = cpu.regs.acc.wrapping_sub(1);
        cpu.regs.acc = result;
        cpu.regs.sr.auto_set_16(Negative, result);
        cpu.regs.sr.auto_set_16(Zero, result);
    }
}

/// INX - Increment Index X by One
///
/// Operation:
/// X + 1 -> X
///
/// Status Register:
/// N Z C I D V
/// + + - - - -
pub fn inx(cpu: &mut Cpu) {
    if cpu.regs.is_index_8bit() {
        let result = ((cpu.regs.x_reg as u8).wrapping_add(1)) as u16;
        cpu.regs.x_reg = result;
        cpu.regs.sr.auto_set_8(Negative, result as u8);
        cpu.regs.sr.auto_set_8(Zero, result as u8);
    } else {
        cpu.regs.x_reg = cpu.regs.x_reg.wrapping_add(1);
        cpu.regs.sr.auto_set_16(Negative, cpu.regs.x_reg);
        cpu.regs.sr.auto_set_16(Zero, cpu.regs.x_reg);
    }
}

/// INY - Increment Index Y by One
///
/// Operation:
/// Y + 1 -> Y
///
/// Status Register:
/// N Z C I D V
/// + + - - - -
pub fn iny(cpu: &mut Cpu) {
    if cpu.regs.is_index_8bit() {
        let result = ((cpu.regs.y_reg as u8).wrapping_add(1)) as u16;
        cpu.regs.y_reg = result;
        cpu.regs.sr.auto_set_8(Negative, result as u8);
        cpu.regs.sr.auto_set_8(Zero, result as u8);
    } else {
        cpu.regs.y_reg = cpu.regs.y_reg.wrapping_add(1);
        cpu.regs.sr.auto_set_16(Negative, cpu.regs.y_reg);
        cpu.regs.sr.auto_set_16(Zero, cpu.regs.y_reg);
    }
}

/// DEX - Decrement Index X by One
///
/// Operation:
/// X - 1 -> X
///
/// Status Register:
/// N Z C I D V
/// + + - - - -
pub fn dex(cpu: &mut Cpu) {
    if cpu.regs.is_index_8bit() {
        let result = ((cpu.regs.x_reg as u8).wrapping_sub(1)) as u16;
        cpu.regs.x_reg = result;
        cpu.regs.sr.auto_set_8(Negative, result as u8);
        cpu.regs.sr.auto_set_8(Zero, result as u8);
    } else {
        cpu.regs.x_reg = cpu.regs.x_reg.wrapping_sub(1);
        cpu.regs.sr.auto_set_16(Negative, cpu.regs.x_reg);
        cpu.regs.sr.auto_set_16(Zero, cpu.regs.x_reg);
    }
}

/// DEY - Decrement Index Y by One
///
/// Operation:
/// Y - 1 -> Y
///
/// Status Register:
/// N Z C I D V
/// + + - - - -
pub fn dey(cpu: &mut Cpu) {
    if cpu.regs.is_index_8bit() {
        let result = ((cpu.regs.y_reg as u8).wrapping_sub(1)) as u16;
        cpu.regs.y_reg = result;
        cpu.regs.sr.auto_set_8(Negative, result as u8);
        cpu.regs.sr.auto_set_8(Zero, result as u8);
    } else {
        cpu.regs.y_reg = cpu.regs.y_reg.wrapping_sub(1);
        cpu.regs.sr.auto_set_16(Negative, cpu.regs.y_reg);
        cpu.regs.sr.auto_set_16(Zero, cpu.regs.y_reg);
    }
}

// Bit operations

/// BIT - Test Bits in Memory with Accumulator
///
/// The top two bits of the operand are copied into N and V (bits 7/6 at
/// 8-bit width, 15/14 at 16-bit); Z reflects A AND M.
///
/// Operation:
/// A AND M -> Z, M7 -> N, M6 -> V
///
/// Status Register:
///  N Z C I D V
/// M7 + - - - M6
pub fn bit(cpu: &mut Cpu, address: u32) {
    if cpu.regs.is_memory_8bit() {
        let operand = cpu.read8(address);
        cpu.regs.sr.set_value(Negative, utils::bv(operand, 7) != 0);
        cpu.regs.sr.set_value(Overflow, utils::bv(operand, 6) != 0);
        cpu.regs.sr.set_value(Zero, cpu.regs.acc8() & operand == 0);
    } else {
        let operand = cpu.read16(address);
        cpu.regs.sr.set_value(Negative, utils::bv16(operand, 15) != 0);
        cpu.regs.sr.set_value(Overflow, utils::bv16(operand, 14) != 0);
        cpu.regs.sr.set_value(Zero, cpu.regs.acc & operand == 0);
    }
}

/// BIT - Test Bits in Memory with Accumulator (immediate form)
///
/// The immediate form only updates Z.
///
/// Status Register:
/// N Z C I D V
/// - + - - - -
pub fn bit_immediate(cpu: &mut Cpu, address: u32) {
    if cpu.regs.is_memory_8bit() {
        let operand = cpu.read8(address);
        cpu.regs.sr.set_value(Zero, cpu.regs.acc8() & operand == 0);
    } else {
        let operand = cpu.read16(address);
        cpu.regs.sr.set_value(Zero, cpu.regs.acc & operand == 0);
    }
}

/// TSB - Test and Set Bits
///
/// Operation:
/// A AND M -> Z, A OR M -> M
///
/// Status Register:
/// N Z C I D V
/// - + - - - -
pub fn tsb(cpu: &mut Cpu, address: u32) {
    if cpu.regs.is_memory_8bit() {
        let operand = cpu.read8(address);
        cpu.regs.sr.set_value(Zero, cpu.regs.acc8() & operand == 0);
        cpu.write8(address, operand | cpu.regs.acc8());
    } else {
        let operand = cpu.read16(address);
        cpu.regs.sr.set_value(Zero, cpu.regs.acc & operand == 0);
        cpu.write16(address, operand | cpu.regs.acc);
    }
}

/// TRB - Test and Reset Bits
///
/// Operation:
/// A AND M -> Z, (NOT A) AND M -> M
///
/// Status Register:
/// N Z C I D V
/// - + - - - -
pub fn trb(cpu: &mut Cpu, address: u32) {
    if cpu.regs.is_memory_8bit() {
        let operand = cpu.read8(address);
        cpu.regs.sr.set_value(Zero, cpu.regs.acc8() & operand == 0);
        cpu.write8(address, operand & !cpu.regs.acc8());
    } else {
        let operand = cpu.read16(address);
        cpu.regs.sr.set_value(Zero, cpu.regs.acc & operand == 0);
        cpu.write16(address, operand & !cpu.regs.acc);
    }
}

// Comparisons. The subtraction happens one bit wider than the operands so
// the borrow is observable; the registers are never modified

fn compare_8(cpu: &mut Cpu, lhs: u8, rhs: u8) {
    let result = (lhs as u16).wrapping_sub(rhs as u16) as u8;
    cpu.regs.sr.set_value(Carry, lhs >= rhs);
    cpu.regs.sr.auto_set_8(Negative, result);
    cpu.regs.sr.auto_set_8(Zero, result);
}

fn compare_16(cpu: &mut Cpu, lhs: u16, rhs: u16) {
    let result = (lhs as u32).wrapping_sub(rhs as u32) as u16;
    cpu.regs.sr.set_value(Carry, lhs >= rhs);
    cpu.regs.sr.auto_set_16(Negative, result);
    cpu.regs.sr.auto_set_16(Zero, result);
}

/// CMP - Compare Memory with Accumulator
///
/// Operation:
/// A - M
///
/// Status Register:
/// N Z C I D V
/// + + + - - -
pub fn cmp(cpu: &mut Cpu, address: u32) {
    if cpu.regs.is_memory_8bit() {
        let operand = cpu.read8(address);
        compare_8(cpu, cpu.regs.acc8(), operand);
    } else {
        let operand = cpu.read16(address);
        compare_16(cpu, cpu.regs.acc, operand);
    }
}

/// CPX - Compare Memory and Index X
///
/// Operation:
/// X - M
///
/// Status Register:
/// N Z C I D V
/// + + + - - -
pub fn cpx(cpu: &mut Cpu, address: u32) {
    if cpu.regs.is_index_8bit() {
        let operand = cpu.read8(address);
        compare_8(cpu, (cpu.regs.x_reg & 0xFF) as u8, operand);
    } else {
        let operand = cpu.read16(address);
        compare_16(cpu, cpu.regs.x_reg, operand);
    }
}

/// CPY - Compare Memory and Index Y
///
/// Operation:
/// Y - M
///
/// Status Register:
/// N Z C I D V
/// + + + - - -
pub fn cpy(cpu: &mut Cpu, address: u32) {
    if cpu.regs.is_index_8bit() {
        let operand = cpu.read8(address);
        compare_8(cpu, (cpu.regs.y_reg & 0xFF) as u8, operand);
    } else {
        let operand = cpu.read16(address);
        compare_16(cpu, cpu.regs.y_reg, operand);
    }
}

// Conditional branches

pub fn branch(cpu: &mut Cpu, condition: bool, displacement: i8) {
    if condition {
        cpu.regs.pc = cpu.regs.pc.wrapping_add_signed(displacement as i16);
    }
}

/// BPL - Branch on Result Plus
///
/// Operation:
/// branch on N = 0
pub fn bpl(cpu: &mut Cpu, displacement: i8) {
    branch(cpu, !cpu.regs.sr.get(Negative), displacement);
}

/// BMI - Branch on Result Minus
///
/// Operation:
/// branch on N = 1
pub fn bmi(cpu: &mut Cpu, displacement: i8) {
    branch(cpu, cpu.regs.sr.get(Negative), displacement);
}

/// BVC - Branch on Overflow Clear
///
/// Operation:
/// branch on V = 0
pub fn bvc(cpu: &mut Cpu, displacement: i8) {
    branch(cpu, !cpu.regs.sr.get(Overflow), displacement);
}

/// BVS - Branch on Overflow Set
///
/// Operation:
/// branch on V = 1
pub fn bvs(cpu: &mut Cpu, displacement: i8) {
    branch(cpu, cpu.regs.sr.get(Overflow), displacement);
}

/// BCC - Branch on Carry Clear
///
/// Operation:
/// branch on C = 0
pub fn bcc(cpu: &mut Cpu, displacement: i8) {
    branch(cpu, !cpu.regs.sr.get(Carry), displacement);
}

/// BCS - Branch on Carry Set
///
/// Operation:
/// branch on C = 1
pub fn bcs(cpu: &mut Cpu, displacement: i8) {
    branch(cpu, cpu.regs.sr.get(Carry), displacement);
}

/// BNE - Branch on Result not Zero
///
/// Operation:
/// branch on Z = 0
pub fn bne(cpu: &mut Cpu, displacement: i8) {
    branch(cpu, !cpu.regs.sr.get(Zero), displacement);
}

/// BEQ - Branch on Result Zero
///
/// Operation:
/// branch on Z = 1
pub fn beq(cpu: &mut Cpu, displacement: i8) {
    branch(cpu, cpu.regs.sr.get(Zero), displacement);
}

/// BRA - Branch Always
pub fn bra(cpu: &mut Cpu, displacement: i8) {
    branch(cpu, true, displacement);
}

/// BRL - Branch Always Long
///
/// 16-bit displacement, still confined to the program bank.
pub fn brl(cpu: &mut Cpu, displacement: i16) {
    cpu.regs.pc = cpu.regs.pc.wrapping_add_signed(displacement);
}

// Jumps and subroutines

/// JMP - Jump to New Location
///
/// The target is within the program bank; PBR is never modified.
///
/// Operation:
/// target -> PC
pub fn jmp(cpu: &mut Cpu, target: u16) {
    cpu.regs.pc = target;
}

/// JSR - Jump to Subroutine Saving Return Address
///
/// Pushes the address of the last operand byte (PC - 1); RTS undoes the
/// bias when pulling.
///
/// Operation:
/// push PC - 1, target -> PC
pub fn jsr(cpu: &mut Cpu, target: u16) {
    let return_address = cpu.regs.pc.wrapping_sub(1);
    cpu.push16(return_address);
    cpu.regs.pc = target;
}

/// RTS - Return from Subroutine
///
/// Operation:
/// pull PC, PC + 1 -> PC
pub fn rts(cpu: &mut Cpu) {
    cpu.regs.pc = cpu.pull16().wrapping_add(1);
}

// Software interrupts

// Common BRK/COP sequence. The byte after the opcode is a signature and is
// skipped; the pushed return address is already past it, so a handler that
// wants the faulting opcode must subtract 2
fn software_interrupt(cpu: &mut Cpu, emulation_vector: u32, native_vector: u32) {
    let _signature = cpu.fetch_byte();

    if !cpu.regs.emulation {
        cpu.push8(cpu.regs.pbr);
    }
    cpu.push16(cpu.regs.pc);

    let mut pushed_sr: u8 = cpu.regs.sr.into();
    if cpu.regs.emulation {
        // the index-width bit doubles as the break bit on emulation frames
        pushed_sr |= 1 << IndexWidth as u8;
    }
    cpu.push8(pushed_sr);

    cpu.regs.sr.set(InterruptDisable);
    cpu.regs.sr.clear(Decimal);

    let vector = if cpu.regs.emulation {
        emulation_vector
    } else {
        native_vector
    };
    cpu.regs.pc = cpu.read16(vector);
    cpu.regs.pbr = 0;
}

/// BRK - Force Break
///
/// Operation:
/// push PBR (native), push PC, push P; vector -> PC, 0 -> PBR
///
/// Status Register:
/// N Z C I D V
/// - - - 1 0 -
pub fn brk(cpu: &mut Cpu) {
    software_interrupt(cpu, VECTOR_EMULATION_BRK, VECTOR_NATIVE_BRK);
}

/// COP - Co-processor Enable
///
/// Same frame as BRK through the COP vector.
///
/// Status Register:
/// N Z C I D V
/// - - - 1 0 -
pub fn cop(cpu: &mut Cpu) {
    software_interrupt(cpu, VECTOR_EMULATION_COP, VECTOR_NATIVE_COP);
}

/// RTI - Return from Interrupt
///
/// Pulls P, then PC, then (native mode only) PBR. Emulation mode forces the
/// width bits back to 1 after the pull.
///
/// Operation:
/// pull P, pull PC, pull PBR
///
/// Status Register:
/// N Z C I D V
/// from stack
pub fn rti(cpu: &mut Cpu) {
    let value = cpu.pull8();
    cpu.regs.sr = value.into();
    if cpu.regs.emulation {
        cpu.regs.sr.set(MemoryWidth);
        cpu.regs.sr.set(IndexWidth);
    }
    cpu.regs.truncate_index_registers();

    cpu.regs.pc = cpu.pull16();
    if !cpu.regs.emulation {
        cpu.regs.pbr = cpu.pull8();
    }
}

// Flag instructions

/// CLC - Clear Carry Flag
///
/// Status Register:
/// N Z C I D V
/// - - 0 - - -
pub fn clc(cpu: &mut Cpu) {
    cpu.regs.sr.clear(Carry);
}

/// SEC - Set Carry Flag
///
/// Status Register:
/// N Z C I D V
/// - - 1 - - -
pub fn sec(cpu: &mut Cpu) {
    cpu.regs.sr.set(Carry);
}

/// CLI - Clear Interrupt Disable Bit
///
/// Status Register:
/// N Z C I D V
/// - - - 0 - -
pub fn cli(cpu: &mut Cpu) {
    cpu.regs.sr.clear(InterruptDisable);
}

/// SEI - Set Interrupt Disable Status
///
/// Status Register:
/// N Z C I D V
/// - - - 1 - -
pub fn sei(cpu: &mut Cpu) {
    cpu.regs.sr.set(InterruptDisable);
}

/// CLV - Clear Overflow Flag
///
/// Status Register:
/// N Z C I D V
/// - - - - - 0
pub fn clv(cpu: &mut Cpu) {
    cpu.regs.sr.clear(Overflow);
}

/// CLD - Clear Decimal Mode
///
/// Status Register:
/// N Z C I D V
/// - - - - 0 -
pub fn cld(cpu: &mut Cpu) {
    cpu.regs.sr.clear(Decimal);
}

/// SED - Set Decimal Flag
///
/// Status Register:
/// N Z C I D V
/// - - - - 1 -
pub fn sed(cpu: &mut Cpu) {
    cpu.regs.sr.set(Decimal);
}

/// REP - Reset Processor Status Bits
///
/// Clears every P bit set in the immediate mask. In emulation mode the
/// width bits cannot be cleared.
///
/// Operation:
/// P AND (NOT mask) -> P
///
/// Status Register:
/// N Z C I D V
/// cleared per mask
pub fn rep(cpu: &mut Cpu) {
    let mask = cpu.fetch_byte();
    let sr: u8 = cpu.regs.sr.into();
    cpu.regs.sr = (sr & !mask).into();
    if cpu.regs.emulation {
        cpu.regs.sr.set(MemoryWidth);
        cpu.regs.sr.set(IndexWidth);
    }
    cpu.regs.truncate_index_registers();
}

/// SEP - Set Processor Status Bits
///
/// Sets every P bit set in the immediate mask. Setting the index-width bit
/// zeroes the index high bytes.
///
/// Operation:
/// P OR mask -> P
///
/// Status Register:
/// N Z C I D V
/// set per mask
pub fn sep(cpu: &mut Cpu) {
    let mask = cpu.fetch_byte();
    let sr: u8 = cpu.regs.sr.into();
    cpu.regs.sr = (sr | mask).into();
    cpu.regs.truncate_index_registers();
}

// Mode exchange and block moves

/// XCE - Exchange Carry and Emulation Flags
///
/// Entering emulation mode forces M = X = 1, zeroes the index high bytes
/// and confines the stack to page 1.
///
/// Operation:
/// C <-> E
///
/// Status Register:
/// N Z C I D V
/// - - E - - -
pub fn xce(cpu: &mut Cpu) {
    let carry = cpu.regs.sr.get(Carry);
    cpu.regs.sr.set_value(Carry, cpu.regs.emulation);
    cpu.regs.emulation = carry;
    cpu.regs.enforce_emulation_invariants();
}

// One iteration of a block move: copy a byte, step the index registers,
// count A down and rewind PC onto the opcode while the transfer is
// unfinished. Interrupts can therefore service between bytes
fn block_move(cpu: &mut Cpu, destination_bank: u8, source_bank: u8, step: i16) {
    let source = ((source_bank as u32) << 16) | cpu.regs.x_reg as u32;
    let destination = ((destination_bank as u32) << 16) | cpu.regs.y_reg as u32;
    let value = cpu.read8(source);
    cpu.write8(destination, value);

    cpu.regs.x_reg = cpu.regs.x_reg.wrapping_add_signed(step);
    cpu.regs.y_reg = cpu.regs.y_reg.wrapping_add_signed(step);
    cpu.regs.acc = cpu.regs.acc.wrapping_sub(1);
    cpu.regs.dbr = destination_bank;

    if cpu.regs.acc != 0xFFFF {
        // back onto the 3-byte MVN/MVP instruction
        cpu.regs.pc = cpu.regs.pc.wrapping_sub(3);
    }
}

/// MVN - Block Move Next
///
/// Copies [src:X] to [dst:Y] one byte per execution, incrementing X and Y
/// and decrementing A until it underflows to 0xFFFF. DBR tracks the
/// destination bank.
///
/// Operation:
/// [srcBank:X] -> [dstBank:Y], X + 1, Y + 1, A - 1
pub fn mvn(cpu: &mut Cpu, destination_bank: u8, source_bank: u8) {
    block_move(cpu, destination_bank, source_bank, 1);
}

/// MVP - Block Move Previous
///
/// As MVN with X and Y stepping downwards.
///
/// Operation:
/// [srcBank:X] -> [dstBank:Y], X - 1, Y - 1, A - 1
pub fn mvp(cpu: &mut Cpu, destination_bank: u8, source_bank: u8) {
    block_move(cpu, destination_bank, source_bank, -1);
}

// Halt, wait and reserved

/// STP - Stop the Processor
///
/// PC stays on the STP instruction; only reset leaves the stopped state.
pub fn stp(cpu: &mut Cpu) {
    cpu.regs.pc = cpu.regs.pc.wrapping_sub(1);
    cpu.enter_stopped();
}

/// WAI - Wait for Interrupt
///
/// Execution resumes after the WAI as soon as an interrupt line rises.
pub fn wai(cpu: &mut Cpu) {
    cpu.enter_waiting();
}

/// WDM - Reserved
///
/// Consumes its signature byte like BRK and does nothing else.
pub fn wdm(cpu: &mut Cpu) {
    let _signature = cpu.fetch_byte();
}

/// NOP - No Operation
///
/// Status Register:
/// N Z C I D V
/// - - - - - -
pub fn nop(_: &mut Cpu) {}
