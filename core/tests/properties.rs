use chip8_core::constants::{MAX_ROM_SIZE, SPRITE_SHEET, STACK_DEPTH};
use chip8_core::{Chip8, Chip8Error, Cycle};

fn machine(program: &[u8]) -> Chip8 {
    let mut chip8 = Chip8::with_seed(8);
    chip8.load(program).expect("program fits in memory");
    chip8
}

fn run(chip8: &mut Chip8, steps: usize) {
    for _ in 0..steps {
        chip8.step().expect("step should succeed");
    }
}

#[test]
fn load_leaves_memory_outside_font_and_program_zeroed() {
    for len in [0, 1, 2, 255, 1024, MAX_ROM_SIZE] {
        let rom: Vec<u8> = (0..len).map(|b| (b % 255) as u8 + 1).collect();
        let chip8 = machine(&rom);
        let memory = chip8.memory();
        assert_eq!(memory[..80], SPRITE_SHEET[..]);
        assert!(memory[80..0x200].iter().all(|&b| b == 0));
        assert_eq!(memory[0x200..0x200 + len], rom[..]);
        assert!(memory[0x200 + len..].iter().all(|&b| b == 0));
    }
}

#[test]
fn add_immediate_wraps_without_touching_flag() {
    // V0 = FF; VF = 7; V0 += 1
    let mut chip8 = machine(&[0x60, 0xFF, 0x6F, 0x07, 0x70, 0x01]);
    run(&mut chip8, 3);
    assert_eq!(chip8.registers()[0x0], 0x00);
    assert_eq!(chip8.registers()[0xF], 0x07);
}

#[test]
fn add_registers_sets_carry() {
    // V0 = FF; V1 = 01; V0 += V1
    let mut chip8 = machine(&[0x60, 0xFF, 0x61, 0x01, 0x80, 0x14]);
    run(&mut chip8, 3);
    assert_eq!(chip8.registers()[0x0], 0x00);
    assert_eq!(chip8.registers()[0xF], 0x01);
}

#[test]
fn sub_sets_borrow_flag() {
    // V0 = 01; V1 = 02; V0 -= V1
    let mut chip8 = machine(&[0x60, 0x01, 0x61, 0x02, 0x80, 0x15]);
    run(&mut chip8, 3);
    assert_eq!(chip8.registers()[0x0], 0xFF);
    assert_eq!(chip8.registers()[0xF], 0x00);

    // V0 = 02; V1 = 01; V0 -= V1
    let mut chip8 = machine(&[0x60, 0x02, 0x61, 0x01, 0x80, 0x15]);
    run(&mut chip8, 3);
    assert_eq!(chip8.registers()[0x0], 0x01);
    assert_eq!(chip8.registers()[0xF], 0x01);
}

#[test]
fn drawing_a_sprite_twice_erases_it_and_collides() {
    // I = sprite for "0"; V0 = 10; V1 = 5; draw; draw
    let program = [0xA0, 0x00, 0x60, 0x0A, 0x61, 0x05, 0xD0, 0x15, 0xD0, 0x15];
    let mut chip8 = machine(&program);
    run(&mut chip8, 4);
    assert_eq!(chip8.registers()[0xF], 0x0);
    assert_eq!(chip8.frame_buffer()[5][10..14], [1, 1, 1, 1]);
    assert!(chip8.take_frame().is_some());

    run(&mut chip8, 1);
    assert_eq!(chip8.registers()[0xF], 0x1);
    assert!(chip8.frame_buffer().iter().flatten().all(|&p| p == 0));
}

#[test]
fn return_resumes_after_call() {
    // 200: call 206; 202: V0 = 42; 204: jump 204; 206: V1 = 1; 208: ret
    let program = [0x22, 0x06, 0x60, 0x42, 0x12, 0x04, 0x61, 0x01, 0x00, 0xEE];
    let mut chip8 = machine(&program);
    run(&mut chip8, 3);
    assert_eq!(chip8.pc(), 0x202);
    assert_eq!(chip8.sp(), 0);
    run(&mut chip8, 1);
    assert_eq!(chip8.registers()[0x0], 0x42);
    assert_eq!(chip8.registers()[0x1], 0x01);
}

#[test]
fn nested_calls_overflow_on_the_seventeenth() {
    // every call targets the next instruction, each one a call itself
    let program: Vec<u8> = (0..=STACK_DEPTH as u16)
        .flat_map(|n| {
            let target = 0x202 + n * 2;
            [0x20 | (target >> 8) as u8, target as u8]
        })
        .collect();
    let mut chip8 = machine(&program);
    run(&mut chip8, STACK_DEPTH);
    assert_eq!(chip8.sp() as usize, STACK_DEPTH);

    let pc = chip8.pc();
    match chip8.step() {
        Err(Chip8Error::StackOverflow { address }) => assert_eq!(address, pc),
        other => panic!("expected StackOverflow, got {:?}", other),
    }
    assert_eq!(chip8.pc(), pc);
    assert_eq!(chip8.sp() as usize, STACK_DEPTH);
}

#[test]
fn return_with_empty_stack_underflows() {
    let mut chip8 = machine(&[0x00, 0xEE]);
    assert!(matches!(
        chip8.step(),
        Err(Chip8Error::StackUnderflow { address: 0x200 })
    ));
    assert_eq!(chip8.pc(), 0x200);
}

#[test]
fn bcd_stores_hundreds_tens_ones() {
    // V0 = 123; I = 300; bcd V0
    let mut chip8 = machine(&[0x60, 0x7B, 0xA3, 0x00, 0xF0, 0x33]);
    run(&mut chip8, 3);
    assert_eq!(chip8.memory()[0x300..0x303], [1, 2, 3]);
}

#[test]
fn unknown_opcode_leaves_pc_in_place() {
    let mut chip8 = machine(&[0xFF, 0xFF]);
    for _ in 0..2 {
        match chip8.step() {
            Err(Chip8Error::UnknownOpcode { address, opcode }) => {
                assert_eq!(address, 0x200);
                assert_eq!(opcode, 0xFFFF);
            }
            other => panic!("expected UnknownOpcode, got {:?}", other),
        }
        assert_eq!(chip8.pc(), 0x200);
    }
}

#[test]
fn timers_keep_running_while_waiting_for_key() {
    // V0 = 3; DT = V0; wait for key into V1
    let mut chip8 = machine(&[0x60, 0x03, 0xF0, 0x15, 0xF1, 0x0A]);
    run(&mut chip8, 3);
    assert_eq!(chip8.step().unwrap(), Cycle::AwaitingKey);
    chip8.tick_timers();
    chip8.tick_timers();
    assert_eq!(chip8.delay_timer(), 1);
    assert_eq!(chip8.pc(), 0x204);

    chip8.key_press(0xA);
    run(&mut chip8, 1);
    assert_eq!(chip8.registers()[0x1], 0xA);
    assert_eq!(chip8.pc(), 0x206);
}

#[test]
fn independent_machines_dont_share_state() {
    let mut a = machine(&[0x60, 0x01]);
    let b = machine(&[0x60, 0x02]);
    run(&mut a, 1);
    assert_eq!(a.registers()[0x0], 0x01);
    assert_eq!(b.registers()[0x0], 0x00);
}
