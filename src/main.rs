use std::process::ExitCode;

use log::{error, LevelFilter};

use snes_emulator::{Cartridge, Snes};

/// Cycles to run per invocation, roughly one video frame worth
const CYCLE_BUDGET: u64 = 357_366;

fn main() -> ExitCode {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let Some(rom_path) = std::env::args().nth(1) else {
        eprintln!("usage: snes-emulator <rom.sfc>");
        return ExitCode::FAILURE;
    };

    let cartridge = match Cartridge::new(&rom_path) {
        Ok(cartridge) => cartridge,
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };
    println!("Running {cartridge}");

    let mut snes = Snes::new();
    snes.insert_cartridge(cartridge);
    if let Err(err) = snes.reset() {
        error!("{err}");
        return ExitCode::FAILURE;
    }

    let consumed = snes.run_until(CYCLE_BUDGET);
    let regs = snes.snapshot_registers();
    println!("Ran {consumed} cycles");
    println!(
        "PC={:0>2X}:{:0>4X} A={:0>4X} X={:0>4X} Y={:0>4X} S={:0>4X} P={:0>2X} E={}",
        regs.pbr,
        regs.pc,
        regs.acc,
        regs.x_reg,
        regs.y_reg,
        regs.sp,
        u8::from(regs.sr),
        regs.emulation as u8,
    );

    ExitCode::SUCCESS
}
