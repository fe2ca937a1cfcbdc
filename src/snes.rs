/// Super Nintendo console abstraction.
///
/// Wires one `Cpu` to one `MainBus` and exposes the stepping interface a
/// host driver uses: insert a cartridge, reset, then `step` or `run_until`
/// in a loop, raising interrupts as external hardware demands. To emulate
/// several machines, instantiate several `Snes` values; the pairs share
/// nothing.
use std::cell::RefCell;
use std::rc::Rc;

use crate::cartridge::Cartridge;
use crate::errors::SnesError;
use crate::processor::bus::MainBus;
use crate::processor::cpu::{Cpu, InterruptKind};
use crate::processor::registers::Registers;
use crate::types::SharedMainBus;

pub struct Snes {
    cpu: Cpu,
    bus: SharedMainBus,
}

impl Snes {
    pub fn new() -> Self {
        let bus: SharedMainBus = Rc::new(RefCell::new(MainBus::new()));
        let cpu = Cpu::new(bus.clone());
        Self { cpu, bus }
    }

    /// Map a cartridge's ROM onto the bus
    pub fn insert_cartridge(&mut self, cartridge: Cartridge) {
        self.bus.borrow_mut().load_rom(cartridge.into_rom());
    }

    /// Reset the machine: RAM cleared, CPU back to its power-on state with
    /// PC fetched from the reset vector
    pub fn reset(&mut self) -> Result<(), SnesError> {
        if !self.bus.borrow().has_rom() {
            return Err(SnesError::NoCartridgeInserted);
        }

        self.bus.borrow_mut().reset();
        self.cpu.reset();
        Ok(())
    }

    /// Execute one instruction, returning the cycles consumed
    pub fn step(&mut self) -> u64 {
        self.cpu.step()
    }

    /// Execute instructions until `cycle_budget` cycles have been consumed.
    /// The final instruction is atomic and may overshoot the budget
    pub fn run_until(&mut self, cycle_budget: u64) -> u64 {
        self.cpu.run_until(cycle_budget)
    }

    /// Raise a sticky IRQ or NMI line, sampled at instruction boundaries
    pub fn raise_interrupt(&mut self, kind: InterruptKind) {
        self.cpu.raise_interrupt(kind);
    }

    pub fn snapshot_registers(&self) -> Registers {
        self.cpu.snapshot_registers()
    }

    pub fn restore_registers(&mut self, registers: Registers) {
        self.cpu.restore_registers(registers);
    }

    /// The processor, for debuggers and tests
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    /// The bus, for debuggers and tests
    pub fn bus(&self) -> SharedMainBus {
        self.bus.clone()
    }
}

impl Default for Snes {
    fn default() -> Self {
        Self::new()
    }
}
