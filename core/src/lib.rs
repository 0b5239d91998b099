//! A Chip-8 interpreter core: machine state, instruction decoding and execution, and timers.
//!
//! The host owns windowing, audio, input polling and pacing; it drives the machine through
//! [`Chip8::step`] and [`Chip8::tick_timers`] and reads the frame buffer back out.
pub use chip8::{Chip8, Cycle};
pub use constants::{CLOCK_SPEED, TIMER_SPEED};
pub use error::Chip8Error;
pub use instruction::Instruction;
pub use state::{FrameBuffer, Keypad, RunState};

mod chip8;
pub mod constants;
mod error;
mod instruction;
mod opcode;
mod operations;
pub mod state;
