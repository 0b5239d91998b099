/// Total addressable memory in bytes; addresses wrap at this boundary
pub const MEMORY_SIZE: usize = 4096;

/// Mask applied to every memory address so accesses wrap at `MEMORY_SIZE`
pub const ADDRESS_MASK: u16 = (MEMORY_SIZE - 1) as u16;

/// ROMs are loaded into memory starting here and the pc starts here
pub const PROGRAM_START: u16 = 0x200;

/// The largest ROM that fits between `PROGRAM_START` and the end of memory
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Number of return addresses the call stack can hold
pub const STACK_DEPTH: usize = 16;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Every instruction is two bytes wide
pub const INSTRUCTION_SIZE: u16 = 2;

/// Both timers start here on reset
pub const INITIAL_TIMER_VALUE: u8 = 0;

/// Default number of instructions executed per second
pub const CLOCK_SPEED: u32 = 500;

/// Rate at which the delay and sound timers count down
pub const TIMER_SPEED: u32 = 60;

/// Bytes per built-in hex digit sprite
pub const SPRITE_HEIGHT: u16 = 5;

/// Hex digit sprites 0..F, each 4 pixels wide and 5 rows tall.
/// The sheet lives at address 0x000 so digit `d` starts at `d * SPRITE_HEIGHT`.
/// ```text
/// "0"     Binary   Hex
/// ****    11110000 0xF0
/// *  *    10010000 0x90
/// *  *    10010000 0x90
/// *  *    10010000 0x90
/// ****    11110000 0xF0
/// ```
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
