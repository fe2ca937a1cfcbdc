use bitflags::bitflags;
use log::{debug, trace};

use crate::hardware::{
    VECTOR_EMULATION_IRQ, VECTOR_EMULATION_NMI, VECTOR_EMULATION_RESET, VECTOR_NATIVE_IRQ,
    VECTOR_NATIVE_NMI,
};
use crate::interfaces::Bus;
use crate::processor::instruction::{AddressingMode, Instruction, InstructionKind, WidthPenalty};
use crate::processor::instruction_set::InstructionSet;
use crate::processor::registers::Registers;
use crate::processor::status_register::StatusRegisterFlag;
use crate::types::SharedBus;

/// Cycles a halted or waiting processor burns per `step` call
const IDLE_CYCLES: u64 = 2;

/// Cycles consumed by an interrupt acknowledge sequence
const INTERRUPT_CYCLES: u64 = 7;

bitflags! {
    /// Sticky interrupt request lines. An external party raises them at any
    /// time; the processor samples them at instruction boundaries only and
    /// clears a line when it services it.
    pub struct PendingInterrupts: u8 {
        const IRQ = 0b0000_0001;
        const NMI = 0b0000_0010;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InterruptKind {
    Irq,
    Nmi,
}

/// Execution phase of the processor.
///
/// `Waiting` is entered by WAI and left when any interrupt line rises.
/// `Stopped` is entered by STP and left only through reset. In both phases
/// `step` keeps returning cycles but the program counter does not advance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionState {
    Running,
    Waiting,
    Stopped,
}

/// WDC 65c816 processor emulator.
///
/// The CPU owns the register file and a shared handle to the memory bus.
/// Instructions execute atomically: `step` fetches one opcode, dispatches
/// through the instruction-set table and returns the cycles consumed.
pub struct Cpu {
    pub regs: Registers,
    pub(crate) bus: SharedBus,
    state: ExecutionState,
    pending: PendingInterrupts,
    total_cycles: u64,
    instruction_set: InstructionSet,
}

impl Cpu {
    /// Create a new CPU connected to `bus`
    pub fn new(bus: SharedBus) -> Self {
        Self {
            regs: Registers::default(),
            bus,
            state: ExecutionState::Running,
            pending: PendingInterrupts::empty(),
            total_cycles: 0,
            instruction_set: InstructionSet::new_65c816_set(),
        }
    }

    /// Reset the processor: registers to their power-on state, emulation
    /// mode entered and PC loaded from the reset vector
    pub fn reset(&mut self) {
        self.regs = Registers::default();
        self.regs.pc = self.read16(VECTOR_EMULATION_RESET);
        self.state = ExecutionState::Running;
        self.pending = PendingInterrupts::empty();
        self.total_cycles = 0;
    }

    /// Execute one instruction (or service one pending interrupt) and
    /// return the cycles consumed
    pub fn step(&mut self) -> u64 {
        match self.state {
            ExecutionState::Stopped => {
                self.total_cycles += IDLE_CYCLES;
                return IDLE_CYCLES;
            }
            ExecutionState::Waiting => {
                if self.pending.is_empty() {
                    self.total_cycles += IDLE_CYCLES;
                    return IDLE_CYCLES;
                }
                // any raised line resumes execution, even one that stays
                // masked below
                self.state = ExecutionState::Running;
            }
            ExecutionState::Running => {}
        }

        if self.pending.contains(PendingInterrupts::NMI) {
            self.pending.remove(PendingInterrupts::NMI);
            let cycles = self.service_interrupt(InterruptKind::Nmi);
            self.total_cycles += cycles;
            return cycles;
        }
        if self.pending.contains(PendingInterrupts::IRQ)
            && !self.regs.sr.get(StatusRegisterFlag::InterruptDisable)
        {
            self.pending.remove(PendingInterrupts::IRQ);
            let cycles = self.service_interrupt(InterruptKind::Irq);
            self.total_cycles += cycles;
            return cycles;
        }

        let opcode = self.fetch_byte();
        let Some(instruction) = self.instruction_set.get(opcode).cloned() else {
            debug!(
                "Unknown opcode {opcode:0>2X} at {:0>2X}:{:0>4X}, executed as NOP",
                self.regs.pbr,
                self.regs.pc.wrapping_sub(1)
            );
            self.total_cycles += IDLE_CYCLES;
            return IDLE_CYCLES;
        };

        trace!(
            "{:0>2X}:{:0>4X}  {} ({:0>2X})",
            self.regs.pbr,
            self.regs.pc.wrapping_sub(1),
            instruction.name,
            instruction.opcode
        );

        let mut cycles = instruction.cycles as u64;
        match instruction.width_penalty {
            WidthPenalty::Memory if !self.regs.is_memory_8bit() => cycles += 1,
            WidthPenalty::Index if !self.regs.is_index_8bit() => cycles += 1,
            _ => {}
        }

        self.execute(instruction);

        // the invariants emulation mode forces hold at every instruction
        // boundary, whatever the instruction did to P, S or the indices
        self.regs.enforce_emulation_invariants();

        self.total_cycles += cycles;
        cycles
    }

    /// Run whole instructions until `cycle_budget` is exhausted and return
    /// the cycles actually consumed.
    ///
    /// Instructions are atomic, so the final one may overshoot the budget;
    /// the return value reports the overshoot.
    pub fn run_until(&mut self, cycle_budget: u64) -> u64 {
        let mut consumed = 0;
        while consumed < cycle_budget {
            consumed += self.step();
        }
        consumed
    }

    /// Raise a sticky interrupt line. It stays pending until serviced
    pub fn raise_interrupt(&mut self, kind: InterruptKind) {
        match kind {
            InterruptKind::Irq => self.pending.insert(PendingInterrupts::IRQ),
            InterruptKind::Nmi => self.pending.insert(PendingInterrupts::NMI),
        }
    }

    pub fn state(&self) -> ExecutionState {
        self.state
    }

    /// Monotonic cycle counter since the last reset
    pub fn total_cycles(&self) -> u64 {
        self.total_cycles
    }

    /// Copy of the register file, for save-states and debuggers
    pub fn snapshot_registers(&self) -> Registers {
        self.regs
    }

    pub fn restore_registers(&mut self, registers: Registers) {
        self.regs = registers;
    }

    fn execute(&mut self, instruction: Instruction) {
        match instruction.instruction {
            InstructionKind::Implied(fun) => fun(self),
            InstructionKind::Memory(fun) => {
                let address = self.effective_address(instruction.addressing_mode);
                fun(self, address);
            }
            InstructionKind::Branch(fun) => {
                let displacement = self.fetch_byte() as i8;
                fun(self, displacement);
            }
            InstructionKind::BranchLong(fun) => {
                let displacement = self.fetch_word() as i16;
                fun(self, displacement);
            }
            InstructionKind::Jump(fun) => {
                let target = match instruction.addressing_mode {
                    AddressingMode::Absolute => self.fetch_word(),
                    mode => (self.effective_address(mode) & 0xFFFF) as u16,
                };
                fun(self, target);
            }
            InstructionKind::BlockMove(fun) => {
                let destination_bank = self.fetch_byte();
                let source_bank = self.fetch_byte();
                fun(self, destination_bank, source_bank);
            }
            InstructionKind::Internal(fun) => fun(self),
        }
    }

    // Interrupt acknowledge: the same frame BRK/COP push, minus the
    // signature-byte skip. Emulation mode pushes P with the break bit clear
    // so a handler can tell a hardware interrupt from BRK
    fn service_interrupt(&mut self, kind: InterruptKind) -> u64 {
        let vector = match (kind, self.regs.emulation) {
            (InterruptKind::Nmi, true) => VECTOR_EMULATION_NMI,
            (InterruptKind::Nmi, false) => VECTOR_NATIVE_NMI,
            (InterruptKind::Irq, true) => VECTOR_EMULATION_IRQ,
            (InterruptKind::Irq, false) => VECTOR_NATIVE_IRQ,
        };

        if !self.regs.emulation {
            self.push8(self.regs.pbr);
        }
        self.push16(self.regs.pc);
        let mut pushed_sr: u8 = self.regs.sr.into();
        if self.regs.emulation {
            pushed_sr &= !(1 << StatusRegisterFlag::IndexWidth as u8);
        }
        self.push8(pushed_sr);

        self.regs.sr.set(StatusRegisterFlag::InterruptDisable);
        self.regs.sr.clear(StatusRegisterFlag::Decimal);
        self.regs.pbr = 0;
        self.regs.pc = self.read16(vector);

        INTERRUPT_CYCLES
    }
}

// Bus plumbing: memory access, operand fetches and the stack
impl Cpu {
    pub(crate) fn read8(&self, address: u32) -> u8 {
        self.bus.borrow().read(address)
    }

    pub(crate) fn read16(&self, address: u32) -> u16 {
        self.bus.borrow().read16(address)
    }

    pub(crate) fn write8(&mut self, address: u32, data: u8) {
        self.bus.borrow_mut().write(address, data);
    }

    pub(crate) fn write16(&mut self, address: u32, data: u16) {
        self.bus.borrow_mut().write16(address, data);
    }

    /// Fetch the next instruction byte at PBR:PC, advancing PC
    pub(crate) fn fetch_byte(&mut self) -> u8 {
        let address = ((self.regs.pbr as u32) << 16) | self.regs.pc as u32;
        let value = self.read8(address);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    /// Fetch a little-endian operand word, advancing PC twice
    pub(crate) fn fetch_word(&mut self) -> u16 {
        let lo = self.fetch_byte() as u16;
        let hi = self.fetch_byte() as u16;
        (hi << 8) | lo
    }

    pub(crate) fn push8(&mut self, value: u8) {
        self.write8(self.regs.sp as u32, value);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        if self.regs.emulation {
            // the stack wraps within page 1
            self.regs.sp = 0x0100 | (self.regs.sp & 0xFF);
        }
    }

    pub(crate) fn push16(&mut self, value: u16) {
        self.push8((value >> 8) as u8);
        self.push8((value & 0xFF) as u8);
    }

    pub(crate) fn pull8(&mut self) -> u8 {
        self.regs.sp = self.regs.sp.wrapping_add(1);
        if self.regs.emulation {
            self.regs.sp = 0x0100 | (self.regs.sp & 0xFF);
        }
        self.read8(self.regs.sp as u32)
    }

    pub(crate) fn pull16(&mut self) -> u16 {
        let lo = self.pull8() as u16;
        let hi = self.pull8() as u16;
        (hi << 8) | lo
    }

    /// Halt until reset, keeping PC on the current instruction
    pub(crate) fn enter_stopped(&mut self) {
        self.state = ExecutionState::Stopped;
    }

    /// Sleep until an interrupt line rises
    pub(crate) fn enter_waiting(&mut self) {
        self.state = ExecutionState::Waiting;
    }
}

#[cfg(test)]
mod tests;
