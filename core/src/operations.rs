use rand::Rng;

use crate::constants::{ADDRESS_MASK, DISPLAY_HEIGHT, DISPLAY_WIDTH, SPRITE_HEIGHT};
use crate::error::Chip8Error;
use crate::state::{Keypad, RunState, State};

/// clear
pub fn clr(state: &mut State) {
    state.frame_buffer = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    state.draw_flag = true;
    state.advance();
}

/// PC = STACK.pop()
/// The stack holds the address of the call itself so we step past it
pub fn rts(state: &mut State) -> Result<(), Chip8Error> {
    state.pc = state.pop()?;
    state.advance();
    Ok(())
}

/// PC = addr
pub fn jump(state: &mut State, addr: u16) {
    state.pc = addr;
}

/// STACK.push(PC); PC = addr
pub fn call(state: &mut State, addr: u16) -> Result<(), Chip8Error> {
    state.push(state.pc)?;
    state.pc = addr;
    Ok(())
}

/// if Vx == nn then pc += 2
pub fn ske(state: &mut State, x: u8, nn: u8) {
    state.skip_if(state.v[x as usize] == nn);
}

/// if Vx != nn then pc += 2
pub fn skne(state: &mut State, x: u8, nn: u8) {
    state.skip_if(state.v[x as usize] != nn);
}

/// if Vx == Vy then pc += 2
pub fn skre(state: &mut State, x: u8, y: u8) {
    state.skip_if(state.v[x as usize] == state.v[y as usize]);
}

/// Vx = nn
pub fn load(state: &mut State, x: u8, nn: u8) {
    state.v[x as usize] = nn;
    state.advance();
}

/// Vx += nn
/// Overflow wraps and VF is left alone
pub fn add(state: &mut State, x: u8, nn: u8) {
    state.v[x as usize] = state.v[x as usize].wrapping_add(nn);
    state.advance();
}

/// Vx = Vy
pub fn mv(state: &mut State, x: u8, y: u8) {
    state.v[x as usize] = state.v[y as usize];
    state.advance();
}

/// Vx |= Vy
pub fn or(state: &mut State, x: u8, y: u8) {
    state.v[x as usize] |= state.v[y as usize];
    state.advance();
}

/// Vx &= Vy
pub fn and(state: &mut State, x: u8, y: u8) {
    state.v[x as usize] &= state.v[y as usize];
    state.advance();
}

/// Vx ^= Vy
pub fn xor(state: &mut State, x: u8, y: u8) {
    state.v[x as usize] ^= state.v[y as usize];
    state.advance();
}

// The flag-setting operations below write VF after Vx so that the flag wins when x is F.

/// Vx += Vy; VF = overflow
pub fn addr(state: &mut State, x: u8, y: u8) {
    let (res, over) = state.v[x as usize].overflowing_add(state.v[y as usize]);
    state.v[x as usize] = res;
    state.v[0xF] = over as u8;
    state.advance();
}

/// Vx -= Vy; VF = !borrow
pub fn sub(state: &mut State, x: u8, y: u8) {
    let (res, borrow) = state.v[x as usize].overflowing_sub(state.v[y as usize]);
    state.v[x as usize] = res;
    state.v[0xF] = !borrow as u8;
    state.advance();
}

/// Vx >>= 1; VF = shifted out bit
pub fn shr(state: &mut State, x: u8) {
    let lsb = state.v[x as usize] & 0x1;
    state.v[x as usize] >>= 1;
    state.v[0xF] = lsb;
    state.advance();
}

/// Vx = Vy - Vx; VF = !borrow
pub fn subn(state: &mut State, x: u8, y: u8) {
    let (res, borrow) = state.v[y as usize].overflowing_sub(state.v[x as usize]);
    state.v[x as usize] = res;
    state.v[0xF] = !borrow as u8;
    state.advance();
}

/// Vx <<= 1; VF = shifted out bit
pub fn shl(state: &mut State, x: u8) {
    let msb = (state.v[x as usize] >> 7) & 0x1;
    state.v[x as usize] <<= 1;
    state.v[0xF] = msb;
    state.advance();
}

/// if Vx != Vy then pc += 2
pub fn skrne(state: &mut State, x: u8, y: u8) {
    state.skip_if(state.v[x as usize] != state.v[y as usize]);
}

/// I = addr
pub fn loadi(state: &mut State, addr: u16) {
    state.i = addr;
    state.advance();
}

/// PC = V0 + addr
pub fn jumpi(state: &mut State, addr: u16) {
    state.pc = (addr + u16::from(state.v[0x0])) & ADDRESS_MASK;
}

/// Vx = rand_byte & nn
pub fn rand<R: Rng + ?Sized>(state: &mut State, rng: &mut R, x: u8, nn: u8) {
    let rand_byte: u8 = rng.gen();
    state.v[x as usize] = rand_byte & nn;
    state.advance();
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..i+n at position x, y on the FrameBuffer with wrapping.
/// Sets VF if any pixels were erased
pub fn draw(state: &mut State, x: u8, y: u8, n: u8) {
    let origin_x = state.v[x as usize] as usize % DISPLAY_WIDTH;
    let origin_y = state.v[y as usize] as usize % DISPLAY_HEIGHT;
    let mut collision = 0x0;

    for row in 0..n as usize {
        let sprite_row = state.read(state.i.wrapping_add(row as u16));
        let y = (origin_y + row) % DISPLAY_HEIGHT;
        for bit in 0..8 {
            let x = (origin_x + bit) % DISPLAY_WIDTH;
            let pixel_value = (sprite_row >> (7 - bit)) & 1;
            collision |= pixel_value & state.frame_buffer[y][x];
            state.frame_buffer[y][x] ^= pixel_value;
        }
    }

    state.v[0xF] = collision;
    state.draw_flag = true;
    state.advance();
}

/// if Vx.pressed then pc += 2
pub fn skpr(state: &mut State, keys: &Keypad, x: u8) {
    state.skip_if(keys[(state.v[x as usize] & 0xF) as usize]);
}

/// if !Vx.pressed then pc += 2
pub fn skup(state: &mut State, keys: &Keypad, x: u8) {
    state.skip_if(!keys[(state.v[x as usize] & 0xF) as usize]);
}

/// Vx = DT
pub fn moved(state: &mut State, x: u8) {
    state.v[x as usize] = state.delay_timer;
    state.advance();
}

/// await keypress for Vx
/// The pc stays on this instruction until the key arrives
pub fn keyd(state: &mut State, x: u8) {
    state.run_state = RunState::WaitingForKey { register: x };
}

/// DT = Vx
pub fn loads(state: &mut State, x: u8) {
    state.delay_timer = state.v[x as usize];
    state.advance();
}

/// ST = Vx
pub fn ld(state: &mut State, x: u8) {
    state.sound_timer = state.v[x as usize];
    state.advance();
}

/// I += Vx
/// No flag is set
pub fn addi(state: &mut State, x: u8) {
    state.i = state.i.wrapping_add(u16::from(state.v[x as usize]));
    state.advance();
}

/// I = Vx * 5
/// Set I to the memory address of the sprite for the hex digit in Vx
/// See constants::SPRITE_SHEET for more details
pub fn ldspr(state: &mut State, x: u8) {
    state.i = u16::from(state.v[x as usize] & 0xF) * SPRITE_HEIGHT;
    state.advance();
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
pub fn bcd(state: &mut State, x: u8) {
    let value = state.v[x as usize];
    let digits = [value / 100, value / 10 % 10, value % 10];
    for (offset, digit) in digits.iter().enumerate() {
        state.write(state.i.wrapping_add(offset as u16), *digit);
    }
    state.advance();
}

/// mem[I..=I+x] = V0..=Vx
/// I itself is left unchanged
pub fn stor(state: &mut State, x: u8) {
    for reg in 0..=x {
        state.write(state.i.wrapping_add(u16::from(reg)), state.v[reg as usize]);
    }
    state.advance();
}

/// V0..=Vx = mem[I..=I+x]
/// I itself is left unchanged
pub fn read(state: &mut State, x: u8) {
    for reg in 0..=x {
        state.v[reg as usize] = state.read(state.i.wrapping_add(u16::from(reg)));
    }
    state.advance();
}
