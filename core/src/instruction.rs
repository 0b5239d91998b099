use rand::Rng;

use crate::error::Chip8Error;
use crate::opcode::Opcode;
use crate::operations::*;
use crate::state::{Keypad, State};

/// # Instructions
/// The 35 canonical Chip-8 instructions with their operands decoded.
///
/// Register operands are register numbers (0x0..=0xF), not register values.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0
    Clear,
    /// 00EE
    Return,
    /// 1NNN
    Jump(u16),
    /// 2NNN
    Call(u16),
    /// 3XNN
    SkipEqual(u8, u8),
    /// 4XNN
    SkipNotEqual(u8, u8),
    /// 5XY0
    SkipRegistersEqual(u8, u8),
    /// 6XNN
    Load(u8, u8),
    /// 7XNN
    Add(u8, u8),
    /// 8XY0
    Move(u8, u8),
    /// 8XY1
    Or(u8, u8),
    /// 8XY2
    And(u8, u8),
    /// 8XY3
    Xor(u8, u8),
    /// 8XY4
    AddRegisters(u8, u8),
    /// 8XY5
    Sub(u8, u8),
    /// 8XY6
    ShiftRight(u8),
    /// 8XY7
    SubReversed(u8, u8),
    /// 8XYE
    ShiftLeft(u8),
    /// 9XY0
    SkipRegistersNotEqual(u8, u8),
    /// ANNN
    LoadIndex(u16),
    /// BNNN
    JumpOffset(u16),
    /// CXNN
    Random(u8, u8),
    /// DXYN
    Draw(u8, u8, u8),
    /// EX9E
    SkipPressed(u8),
    /// EXA1
    SkipNotPressed(u8),
    /// FX07
    LoadDelay(u8),
    /// FX0A
    WaitForKey(u8),
    /// FX15
    SetDelay(u8),
    /// FX18
    SetSound(u8),
    /// FX1E
    AddIndex(u8),
    /// FX29
    LoadSprite(u8),
    /// FX33
    StoreBcd(u8),
    /// FX55
    StoreRegisters(u8),
    /// FX65
    LoadRegisters(u8),
}

impl Instruction {
    /// Selects the Instruction for a given Opcode, or None if it isn't one of the 35
    pub fn decode(op: u16) -> Option<Instruction> {
        let (x, y, n, nn, nnn) = (op.x(), op.y(), op.n(), op.nn(), op.nnn());
        let instruction = match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Instruction::Clear,
            (0x0, 0x0, 0xE, 0xE) => Instruction::Return,
            (0x1, ..) => Instruction::Jump(nnn),
            (0x2, ..) => Instruction::Call(nnn),
            (0x3, ..) => Instruction::SkipEqual(x, nn),
            (0x4, ..) => Instruction::SkipNotEqual(x, nn),
            (0x5, .., 0x0) => Instruction::SkipRegistersEqual(x, y),
            (0x6, ..) => Instruction::Load(x, nn),
            (0x7, ..) => Instruction::Add(x, nn),
            (0x8, .., 0x0) => Instruction::Move(x, y),
            (0x8, .., 0x1) => Instruction::Or(x, y),
            (0x8, .., 0x2) => Instruction::And(x, y),
            (0x8, .., 0x3) => Instruction::Xor(x, y),
            (0x8, .., 0x4) => Instruction::AddRegisters(x, y),
            (0x8, .., 0x5) => Instruction::Sub(x, y),
            (0x8, .., 0x6) => Instruction::ShiftRight(x),
            (0x8, .., 0x7) => Instruction::SubReversed(x, y),
            (0x8, .., 0xE) => Instruction::ShiftLeft(x),
            (0x9, .., 0x0) => Instruction::SkipRegistersNotEqual(x, y),
            (0xA, ..) => Instruction::LoadIndex(nnn),
            (0xB, ..) => Instruction::JumpOffset(nnn),
            (0xC, ..) => Instruction::Random(x, nn),
            (0xD, ..) => Instruction::Draw(x, y, n),
            (0xE, _, 0x9, 0xE) => Instruction::SkipPressed(x),
            (0xE, _, 0xA, 0x1) => Instruction::SkipNotPressed(x),
            (0xF, _, 0x0, 0x7) => Instruction::LoadDelay(x),
            (0xF, _, 0x0, 0xA) => Instruction::WaitForKey(x),
            (0xF, _, 0x1, 0x5) => Instruction::SetDelay(x),
            (0xF, _, 0x1, 0x8) => Instruction::SetSound(x),
            (0xF, _, 0x1, 0xE) => Instruction::AddIndex(x),
            (0xF, _, 0x2, 0x9) => Instruction::LoadSprite(x),
            (0xF, _, 0x3, 0x3) => Instruction::StoreBcd(x),
            (0xF, _, 0x5, 0x5) => Instruction::StoreRegisters(x),
            (0xF, _, 0x6, 0x5) => Instruction::LoadRegisters(x),
            _ => return None,
        };
        Some(instruction)
    }

    /// Applies the instruction to `state`, including its pc advancement.
    /// On error the state is left untouched.
    pub fn execute<R: Rng + ?Sized>(
        self,
        state: &mut State,
        keys: &Keypad,
        rng: &mut R,
    ) -> Result<(), Chip8Error> {
        match self {
            Instruction::Clear => clr(state),
            Instruction::Return => rts(state)?,
            Instruction::Jump(addr) => jump(state, addr),
            Instruction::Call(addr) => call(state, addr)?,
            Instruction::SkipEqual(x, nn) => ske(state, x, nn),
            Instruction::SkipNotEqual(x, nn) => skne(state, x, nn),
            Instruction::SkipRegistersEqual(x, y) => skre(state, x, y),
            Instruction::Load(x, nn) => load(state, x, nn),
            Instruction::Add(x, nn) => add(state, x, nn),
            Instruction::Move(x, y) => mv(state, x, y),
            Instruction::Or(x, y) => or(state, x, y),
            Instruction::And(x, y) => and(state, x, y),
            Instruction::Xor(x, y) => xor(state, x, y),
            Instruction::AddRegisters(x, y) => addr(state, x, y),
            Instruction::Sub(x, y) => sub(state, x, y),
            Instruction::ShiftRight(x) => shr(state, x),
            Instruction::SubReversed(x, y) => subn(state, x, y),
            Instruction::ShiftLeft(x) => shl(state, x),
            Instruction::SkipRegistersNotEqual(x, y) => skrne(state, x, y),
            Instruction::LoadIndex(addr) => loadi(state, addr),
            Instruction::JumpOffset(addr) => jumpi(state, addr),
            Instruction::Random(x, nn) => rand(state, rng, x, nn),
            Instruction::Draw(x, y, n) => draw(state, x, y, n),
            Instruction::SkipPressed(x) => skpr(state, keys, x),
            Instruction::SkipNotPressed(x) => skup(state, keys, x),
            Instruction::LoadDelay(x) => moved(state, x),
            Instruction::WaitForKey(x) => keyd(state, x),
            Instruction::SetDelay(x) => loads(state, x),
            Instruction::SetSound(x) => ld(state, x),
            Instruction::AddIndex(x) => addi(state, x),
            Instruction::LoadSprite(x) => ldspr(state, x),
            Instruction::StoreBcd(x) => bcd(state, x),
            Instruction::StoreRegisters(x) => stor(state, x),
            Instruction::LoadRegisters(x) => read(state, x),
        }
        Ok(())
    }
}
