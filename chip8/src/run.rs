use std::fs::File;
use std::io::BufReader;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context};
use log::{debug, error, info, warn};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use chip8_core::{Chip8, Cycle};
use display::{Beeper, Display};

use crate::keymap::keymap;
use crate::Args;

pub fn run(args: &Args) -> anyhow::Result<()> {
    let mut chip8 = match args.seed {
        Some(seed) => Chip8::with_seed(seed),
        None => Chip8::new(),
    };

    // Load ROM
    let file = File::open(&args.rom)
        .with_context(|| format!("unable to open {}", args.rom.display()))?;
    let mut reader = BufReader::new(file);
    let size = chip8
        .load_rom(&mut reader)
        .with_context(|| format!("unable to load {}", args.rom.display()))?;
    info!("loaded {} ({} bytes)", args.rom.display(), size);

    // Get SDL2 context
    let sdl = sdl2::init().map_err(|e| anyhow!(e))?;
    let mut display = Display::new(&sdl, args.scale).map_err(|e| anyhow!(e))?;
    let mut beeper = match Beeper::new(&sdl) {
        Ok(beeper) => Some(beeper),
        Err(e) => {
            warn!("no audio device, running without sound: {}", e);
            None
        }
    };
    let mut events = sdl.event_pump().map_err(|e| anyhow!(e))?;

    // Each frame runs a batch of instructions then ticks the timers once
    let timer_hz = args.timer_hz.max(1);
    let steps_per_frame = (args.cpu_hz / timer_hz).max(1);
    let frame_time = Duration::from_secs(1) / timer_hz;
    debug!("{} steps per {:?} frame", steps_per_frame, frame_time);

    // Whether or not the default clock speed should be respected
    let mut fast_forward = false;

    'event: loop {
        let frame_start = Instant::now();

        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.key_press(kc),
                    (Keycode::Space, _) => fast_forward = true,
                    (Keycode::Escape, _) => break 'event,
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.key_release(kc),
                    (Keycode::Space, _) => fast_forward = false,
                    _ => continue,
                },
                _ => continue,
            };
        }

        // Update state
        for _ in 0..steps_per_frame {
            match chip8.step() {
                Ok(Cycle::AwaitingKey) => break,
                Ok(Cycle::Executed(_)) => {}
                Err(e) => {
                    error!("halting: {}", e);
                    return Err(e.into());
                }
            }
        }
        if chip8.tick_timers() {
            debug!("tone stopped");
        }
        if let Some(beeper) = beeper.as_mut() {
            beeper.set_active(chip8.sound_active());
        }

        // If something was drawn, render the current frame
        if let Some(frame) = chip8.take_frame() {
            display.render(&frame).map_err(|e| anyhow!(e))?;
        }

        // Handle timing
        let elapsed = frame_start.elapsed();
        if !fast_forward && frame_time > elapsed {
            std::thread::sleep(frame_time - elapsed);
        }
    }

    Ok(())
}
