use sdl2::audio::{AudioCallback, AudioDevice, AudioSpecDesired};

const SAMPLE_RATE: i32 = 44_100;
const TONE_HZ: f32 = 440.0;
const VOLUME: f32 = 0.25;

/// A square wave oscillator fed to SDL's audio thread
struct SquareWave {
    phase_inc: f32,
    phase: f32,
    volume: f32,
}

impl AudioCallback for SquareWave {
    type Channel = f32;

    fn callback(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = if self.phase <= 0.5 {
                self.volume
            } else {
                -self.volume
            };
            self.phase = (self.phase + self.phase_inc) % 1.0;
        }
    }
}

/// # Beeper
/// The Chip-8 has a single tone that sounds while its sound timer is above zero.
/// The device starts paused and is toggled with `set_active`.
pub struct Beeper {
    device: AudioDevice<SquareWave>,
    active: bool,
}

impl Beeper {
    /// Opens the default playback device on an sdl2 context.
    pub fn new(sdl: &sdl2::Sdl) -> Result<Self, String> {
        let audio_subsystem = sdl.audio()?;
        let desired = AudioSpecDesired {
            freq: Some(SAMPLE_RATE),
            channels: Some(1),
            samples: None,
        };
        let device = audio_subsystem.open_playback(None, &desired, |spec| SquareWave {
            phase_inc: TONE_HZ / spec.freq as f32,
            phase: 0.0,
            volume: VOLUME,
        })?;

        Ok(Beeper {
            device,
            active: false,
        })
    }

    /// Starts or stops the tone; repeated calls with the same value do nothing
    pub fn set_active(&mut self, active: bool) {
        if active == self.active {
            return;
        }
        if active {
            self.device.resume();
        } else {
            self.device.pause();
        }
        self.active = active;
    }
}
