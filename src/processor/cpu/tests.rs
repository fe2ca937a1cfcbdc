use std::cell::RefCell;
use std::rc::Rc;

use mockall::mock;
use mockall::predicate::eq;

use super::*;
use crate::interfaces::Bus;

mock! {
    TestBus {}

    impl Bus for TestBus {
        fn read(&self, address: u32) -> u8;
        fn write(&mut self, address: u32, data: u8);
    }
}

impl MockTestBus {
    /// Expect `program` to be fetched starting at 00:0000
    fn load_program(&mut self, program: Vec<u8>) {
        for (address, value) in program.into_iter().enumerate() {
            self.expect_read()
                .with(eq(address as u32))
                .return_const(value);
        }
    }
}

// Get a CPU with a mocked bus and a loaded program. PC starts at 0 so the
// expectations line up with the program bytes
fn test_cpu_with_program(program: Vec<u8>) -> Cpu {
    let mut mock_bus = MockTestBus::new();
    mock_bus.load_program(program);

    let bus: SharedBus = Rc::new(RefCell::new(mock_bus));
    Cpu::new(bus)
}

#[test]
fn test_step_executes_nop() {
    let mut cpu = test_cpu_with_program(vec![0xEA]);

    let cycles = cpu.step();
    assert_eq!(cycles, 2);
    assert_eq!(cpu.regs.pc, 0x0001);
    assert_eq!(cpu.total_cycles(), 2);
}

#[test]
fn test_unknown_opcode_is_a_nop() {
    // 0xFF (SBC long) is not in the implemented set
    let mut cpu = test_cpu_with_program(vec![0xFF, 0xEA]);

    let cycles = cpu.step();
    assert_eq!(cycles, 2);
    assert_eq!(cpu.regs.pc, 0x0001);

    cpu.step();
    assert_eq!(cpu.regs.pc, 0x0002);
}

#[test]
fn test_lda_immediate_through_dispatch() {
    let mut cpu = test_cpu_with_program(vec![0xA9, 0x42]);

    let cycles = cpu.step();
    assert_eq!(cycles, 2);
    assert_eq!(cpu.regs.acc8(), 0x42);
    assert_eq!(cpu.regs.pc, 0x0002);
}

#[test]
fn test_sta_writes_through_the_bus() {
    let mut mock_bus = MockTestBus::new();
    mock_bus.load_program(vec![0x8D, 0x00, 0x10]); // STA $1000
    mock_bus
        .expect_write()
        .with(eq(0x001000u32), eq(0x42u8))
        .times(1)
        .return_const(());

    let bus: SharedBus = Rc::new(RefCell::new(mock_bus));
    let mut cpu = Cpu::new(bus);
    cpu.regs.acc = 0x42;

    cpu.step();
    assert_eq!(cpu.regs.pc, 0x0003);
}

#[test]
fn test_sixteen_bit_width_costs_an_extra_cycle() {
    // native mode, M = 0: LDA #$1234 is three bytes and 3 cycles
    let mut cpu = test_cpu_with_program(vec![0xA9, 0x34, 0x12]);
    cpu.regs.emulation = false;
    cpu.regs.sr.clear(StatusRegisterFlag::MemoryWidth);

    let cycles = cpu.step();
    assert_eq!(cycles, 3);
    assert_eq!(cpu.regs.acc, 0x1234);
    assert_eq!(cpu.regs.pc, 0x0003);
}

#[test]
fn test_run_until_consumes_at_least_the_budget() {
    let mut cpu = test_cpu_with_program(vec![0xEA; 16]);

    let consumed = cpu.run_until(7);
    // four NOPs at 2 cycles each: the last one overshoots the budget
    assert_eq!(consumed, 8);
    assert_eq!(cpu.regs.pc, 0x0004);
}

#[test]
fn test_stp_freezes_the_processor() {
    let mut cpu = test_cpu_with_program(vec![0xDB, 0xEA]);

    cpu.step();
    assert_eq!(cpu.state(), ExecutionState::Stopped);
    assert_eq!(cpu.regs.pc, 0x0000); // clamped onto the STP opcode

    // further steps burn cycles without touching PC
    let cycles = cpu.step();
    assert_eq!(cycles, 2);
    assert_eq!(cpu.regs.pc, 0x0000);
    assert_eq!(cpu.state(), ExecutionState::Stopped);
}

#[test]
fn test_wai_sleeps_until_interrupt() {
    let mut mock_bus = MockTestBus::new();
    mock_bus.load_program(vec![0xCB, 0xEA]); // WAI; NOP
    // IRQ frame: two stack pushes and the status byte, then the vector
    mock_bus.expect_write().return_const(());
    mock_bus
        .expect_read()
        .with(eq(0x00FFFEu32))
        .return_const(0x01u8);
    mock_bus
        .expect_read()
        .with(eq(0x00FFFFu32))
        .return_const(0x00u8);

    let bus: SharedBus = Rc::new(RefCell::new(mock_bus));
    let mut cpu = Cpu::new(bus);
    cpu.regs.sr.clear(StatusRegisterFlag::InterruptDisable);

    cpu.step();
    assert_eq!(cpu.state(), ExecutionState::Waiting);
    let waiting_pc = cpu.regs.pc;

    cpu.step();
    assert_eq!(cpu.regs.pc, waiting_pc);
    assert_eq!(cpu.state(), ExecutionState::Waiting);

    cpu.raise_interrupt(InterruptKind::Irq);
    cpu.step();
    assert_eq!(cpu.state(), ExecutionState::Running);
    // the IRQ frame ran: PC moved to the vector target
    assert_eq!(cpu.regs.pc, 0x0001);
}

#[test]
fn test_irq_respects_interrupt_disable() {
    let mut cpu = test_cpu_with_program(vec![0xEA, 0xEA]);
    // reset state has I set
    cpu.raise_interrupt(InterruptKind::Irq);

    cpu.step();
    assert_eq!(cpu.regs.pc, 0x0001); // the NOP executed, no frame pushed
}

#[test]
fn test_nmi_ignores_interrupt_disable() {
    let mut mock_bus = MockTestBus::new();
    mock_bus.load_program(vec![0xEA]);
    mock_bus.expect_write().return_const(());
    mock_bus
        .expect_read()
        .with(eq(0x00FFFAu32))
        .return_const(0x34u8);
    mock_bus
        .expect_read()
        .with(eq(0x00FFFBu32))
        .return_const(0x12u8);

    let bus: SharedBus = Rc::new(RefCell::new(mock_bus));
    let mut cpu = Cpu::new(bus);

    cpu.raise_interrupt(InterruptKind::Nmi);
    let cycles = cpu.step();
    assert_eq!(cycles, 7);
    assert_eq!(cpu.regs.pc, 0x1234);
    assert_eq!(cpu.regs.pbr, 0);
    assert!(cpu.regs.sr.get(StatusRegisterFlag::InterruptDisable));
}

#[test]
fn test_snapshot_and_restore_registers() {
    let mut cpu = test_cpu_with_program(vec![0xA9, 0x42, 0xA9, 0x99]);

    cpu.step();
    let snapshot = cpu.snapshot_registers();
    assert_eq!(snapshot.acc8(), 0x42);

    cpu.step();
    assert_eq!(cpu.regs.acc8(), 0x99);

    cpu.restore_registers(snapshot);
    assert_eq!(cpu.regs.acc8(), 0x42);
    assert_eq!(cpu.regs.pc, 0x0002);
}
