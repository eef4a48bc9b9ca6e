use crate::audio::{AudioBackend, CpalBackend};
use crate::input::KeyboardHandler;
use crate::synth::{Synth, SynthConfig, SynthControl};
use crate::Result;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Initial state applied before the stream starts.
#[derive(Clone, Debug, Default)]
pub struct PlayOptions {
    pub device_name: Option<String>,
    pub chord: Option<usize>,
    pub gain: Option<f32>,
    pub enabled: bool,
}

/// Native runtime: cpal output plus a polled keyboard control surface.
pub struct NativeSynth {
    control: SynthControl,
    backend: CpalBackend,
    keyboard: KeyboardHandler,
}

impl NativeSynth {
    /// Opens the output device and starts rendering.
    pub fn start(config: SynthConfig, options: PlayOptions) -> Result<Self> {
        let (mut control, engine) = Synth::new(&config).split();

        if let Some(gain) = options.gain {
            let gain = config.clamp_gain(gain);
            for voice in 0..control.voice_count() {
                control.set_voice_gain(voice, gain);
            }
        }
        if let Some(chord) = options.chord {
            control.select_chord(chord);
        }
        control.set_master_enabled(options.enabled);

        let mut backend = CpalBackend::new(
            options.device_name,
            config.buffer_size,
            config.max_block_frames,
        );
        let sample_rate = backend.start(engine)?;
        control.configure(sample_rate);

        Ok(Self {
            control,
            backend,
            keyboard: KeyboardHandler::new(config),
        })
    }

    /// Polls the keyboard until the quit key, then stops the stream.
    pub fn run(mut self) -> Result<()> {
        tracing::info!("keys: C/A/F/G chords, space on/off, 1-3 focus voice, up/down pitch, left/right gain, esc quit");
        while self.keyboard.update(&mut self.control) {
            std::thread::sleep(POLL_INTERVAL);
        }
        self.backend.stop()
    }
}
