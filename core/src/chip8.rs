use std::io::Read;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::constants::{MAX_ROM_SIZE, PROGRAM_START, STACK_DEPTH};
use crate::error::Chip8Error;
use crate::instruction::Instruction;
use crate::opcode;
use crate::state::{FrameBuffer, Keypad, RunState, State};

/// The outcome of a single call to `Chip8::step`
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cycle {
    /// An instruction ran to completion (for `FX0A` this is when the awaited key arrived)
    Executed(Instruction),
    /// Halted on `FX0A`; nothing changed
    AwaitingKey,
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - `pressed_keys` with public interfaces for manipulating them
///  - the random source used by `CXNN`
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing the CPU by one instruction
/// - advancing its timers
/// - inspecting its frame buffer for rendering by some display
pub struct Chip8 {
    state: State,
    pressed_keys: Keypad,
    latched_key: Option<u8>,
    rng: StdRng,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Creates a Chip8 whose `CXNN` results are reproducible
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Chip8 {
            state: State::new(),
            pressed_keys: [false; 16],
            latched_key: None,
            rng,
        }
    }

    /// Resets the machine: clears memory, registers, stack, timers and display,
    /// reloads the sprite sheet and points the pc at the program start.
    ///
    /// The keypad is owned by the input source and is left as is.
    pub fn initialize(&mut self) {
        self.state = State::new();
        self.latched_key = None;
        debug!("machine reset, pc at {:#05X}", self.state.pc);
    }

    /// Copies a program into memory at `PROGRAM_START`
    ///
    /// # Arguments
    /// * `rom` the raw program bytes; there is no header
    pub fn load(&mut self, rom: &[u8]) -> Result<(), Chip8Error> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(Chip8Error::LoadTooLarge {
                size: rom.len(),
                max: MAX_ROM_SIZE,
            });
        }
        let start = PROGRAM_START as usize;
        self.state.memory[start..start + rom.len()].copy_from_slice(rom);
        debug!("loaded {} byte program at {:#05X}", rom.len(), start);
        Ok(())
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<usize, Chip8Error> {
        let mut rom = Vec::with_capacity(MAX_ROM_SIZE);
        reader.read_to_end(&mut rom)?;
        self.load(&rom)?;
        Ok(rom.len())
    }

    /// Returns the FrameBuffer if it changed since the last call, clearing the draw flag
    pub fn take_frame(&mut self) -> Option<FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(self.state.frame_buffer)
        } else {
            None
        }
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the hex digit (0x0..=0xF) of the key that was pressed
    pub fn key_press(&mut self, key: u8) {
        let key = key & 0xF;
        if !self.pressed_keys[key as usize] {
            self.latch(key);
        }
        self.pressed_keys[key as usize] = true;
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the hex digit (0x0..=0xF) of the key that was released
    pub fn key_release(&mut self, key: u8) {
        self.pressed_keys[(key & 0xF) as usize] = false;
    }

    /// Replaces the whole keypad at once
    pub fn set_keys(&mut self, keys: Keypad) {
        let newly_pressed = (0..16u8).find(|&k| keys[k as usize] && !self.pressed_keys[k as usize]);
        if let Some(key) = newly_pressed {
            self.latch(key);
        }
        self.pressed_keys = keys;
    }

    pub fn keys(&self) -> &Keypad {
        &self.pressed_keys
    }

    /// Remembers the first key pressed during an `FX0A` wait
    fn latch(&mut self, key: u8) {
        if self.is_waiting() && self.latched_key.is_none() {
            self.latched_key = Some(key);
        }
    }

    /// Advances the CPU by a single cycle
    /// - completes a pending `FX0A` once a key has been pressed, otherwise does nothing while waiting
    /// - gets, decodes and executes the next opcode
    ///
    /// Unknown opcodes and stack faults are returned without touching the state,
    /// so the pc still points at the offending instruction.
    pub fn step(&mut self) -> Result<Cycle, Chip8Error> {
        let keys = self.pressed_keys;

        if let RunState::WaitingForKey { register } = self.state.run_state {
            return Ok(match self.latched_key.take() {
                Some(key) => {
                    debug!("received key {:X} into v{:X}", key, register);
                    self.state.v[register as usize] = key;
                    self.state.run_state = RunState::Running;
                    self.state.advance();
                    Cycle::Executed(Instruction::WaitForKey(register))
                }
                None => Cycle::AwaitingKey,
            });
        }

        let op = self.get_op();
        let instruction = Instruction::decode(op).ok_or(Chip8Error::UnknownOpcode {
            address: self.state.pc,
            opcode: op,
        })?;
        trace!(
            "{:04X} v{:02X?} i{:04X} pc{:04X} {:?}",
            op,
            self.state.v,
            self.state.i,
            self.state.pc,
            instruction
        );
        instruction.execute(&mut self.state, &keys, &mut self.rng)?;

        if self.is_waiting() {
            debug!("waiting for a key at {:#05X}", self.state.pc);
            self.latched_key = None;
        }
        Ok(Cycle::Executed(instruction))
    }

    /// Decrements both timers once; call at 60Hz
    ///
    /// Returns true exactly when the sound timer runs out (goes from 1 to 0),
    /// signalling the end of the tone.
    pub fn tick_timers(&mut self) -> bool {
        if self.state.delay_timer > 0 {
            self.state.delay_timer -= 1;
        }

        if self.state.sound_timer > 0 {
            self.state.sound_timer -= 1;
            if self.state.sound_timer == 0 {
                debug!("sound timer expired");
                return true;
            }
        }
        false
    }

    /// Whether a tone should currently be sounding
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    pub fn is_waiting(&self) -> bool {
        matches!(self.state.run_state, RunState::WaitingForKey { .. })
    }

    pub fn run_state(&self) -> RunState {
        self.state.run_state
    }

    pub fn registers(&self) -> &[u8; 16] {
        &self.state.v
    }

    pub fn index(&self) -> u16 {
        self.state.i
    }

    pub fn pc(&self) -> u16 {
        self.state.pc
    }

    pub fn sp(&self) -> u8 {
        self.state.sp
    }

    pub fn stack(&self) -> &[u16; STACK_DEPTH] {
        &self.state.stack
    }

    pub fn delay_timer(&self) -> u8 {
        self.state.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.state.sound_timer
    }

    pub fn memory(&self) -> &[u8] {
        &self.state.memory
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    fn get_op(&self) -> u16 {
        let pc = self.state.pc;
        opcode::from_bytes(self.state.read(pc), self.state.read(pc.wrapping_add(1)))
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
