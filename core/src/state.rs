use crate::constants::{
    ADDRESS_MASK, DISPLAY_HEIGHT, DISPLAY_WIDTH, INITIAL_TIMER_VALUE, INSTRUCTION_SIZE,
    MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET, STACK_DEPTH,
};
use crate::error::Chip8Error;

/// The FrameBuffer is indexed as [y][x]; each pixel is 0 (off) or 1 (on)
pub type FrameBuffer = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// Pressed status of the hex keys 0..F
pub type Keypad = [bool; 16];

/// Whether the cpu is executing or halted on an `FX0A` key wait
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunState {
    Running,
    /// Halted until a key is pressed; the key is then written to `register`
    WaitingForKey { register: u8 },
}

/// A snapshot of the Chip8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry, borrow and collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter
///
/// Pointer
/// - (sp) the number of return addresses on the stack
///
/// Timers
/// - 2 8-bit timers (delay & sound), decremented by the host at 60Hz
///
/// ## Memory
/// - 16 entry stack of return addresses
/// - 4096 bytes of addressable memory; every access wraps
/// - 64x32 byte frame buffer
///     - stores the contents of the next frame to be drawn
#[derive(Copy, Clone)]
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; STACK_DEPTH],
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    pub run_state: RunState,
}

impl State {
    pub fn new() -> Self {
        // 0x000 - 0x050 holds the sprite sheet
        let mut memory = [0; MEMORY_SIZE];
        memory[..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);

        State {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            delay_timer: INITIAL_TIMER_VALUE,
            sound_timer: INITIAL_TIMER_VALUE,
            stack: [0; STACK_DEPTH],
            memory,
            frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            draw_flag: false,
            run_state: RunState::Running,
        }
    }

    /// Reads a byte, wrapping the address at the end of memory.
    pub fn read(&self, addr: u16) -> u8 {
        self.memory[(addr & ADDRESS_MASK) as usize]
    }

    /// Writes a byte, wrapping the address at the end of memory.
    pub fn write(&mut self, addr: u16, value: u8) {
        self.memory[(addr & ADDRESS_MASK) as usize] = value;
    }

    /// Moves the pc past the current instruction
    pub fn advance(&mut self) {
        self.pc = self.pc.wrapping_add(INSTRUCTION_SIZE);
    }

    /// Moves the pc past the current instruction and, if `condition` holds, the next one too
    pub fn skip_if(&mut self, condition: bool) {
        self.advance();
        if condition {
            self.advance();
        }
    }

    /// Pushes a return address; the state is untouched on overflow.
    pub fn push(&mut self, addr: u16) -> Result<(), Chip8Error> {
        if self.sp as usize >= STACK_DEPTH {
            return Err(Chip8Error::StackOverflow { address: self.pc });
        }
        self.stack[self.sp as usize] = addr;
        self.sp += 1;
        Ok(())
    }

    /// Pops a return address; the state is untouched on underflow.
    pub fn pop(&mut self) -> Result<u16, Chip8Error> {
        if self.sp == 0 {
            return Err(Chip8Error::StackUnderflow { address: self.pc });
        }
        self.sp -= 1;
        Ok(self.stack[self.sp as usize])
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
