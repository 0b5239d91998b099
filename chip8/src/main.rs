use std::path::PathBuf;

use clap::Parser;

use chip8_core::{CLOCK_SPEED, TIMER_SPEED};

mod keymap;
mod run;

/// Runs a Chip-8 ROM in an SDL2 window.
///
/// Keys 1234/QWER/ASDF/ZXCV map onto the hex keypad, Space fast-forwards and Escape quits.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the ROM file to run
    rom: PathBuf,

    /// Size multiplier for each Chip-8 pixel
    #[arg(short, long, default_value_t = 10)]
    scale: u32,

    /// Instructions executed per second
    #[arg(long, default_value_t = CLOCK_SPEED)]
    cpu_hz: u32,

    /// Timer decrements (and frames) per second
    #[arg(long, default_value_t = TIMER_SPEED)]
    timer_hz: u32,

    /// Seed for the random number instruction, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    run::run(&args)
}
