use super::chord;
use super::config::{SynthConfig, NUM_VOICES};
use super::engine::{EngineState, RenderEngine};
use super::params::{ParamSnapshot, SharedParams};
use super::voice_bank::{check_index, VoiceBank};
use std::sync::Arc;

/// Control-thread side of the synth.
///
/// Every call publishes through the shared parameter block and is picked up
/// by the [`RenderEngine`] at its next block start. This handle is the only
/// writer, which is why it is not `Clone` and mutates through `&mut self`.
pub struct SynthControl {
    params: Arc<SharedParams>,
    // mirror of what has been published, for relative edits from the UI
    current: ParamSnapshot,
}

impl SynthControl {
    /// Requests a sample rate. Call before audio starts and whenever the
    /// transport reports a new rate.
    pub fn configure(&mut self, sample_rate: f32) {
        assert!(
            sample_rate > 0.0,
            "sample rate must be positive, got {}",
            sample_rate
        );
        tracing::info!(sample_rate, "synth configured");
        self.current.sample_rate = sample_rate;
        self.params.write(|w| w.set_sample_rate(sample_rate));
    }

    pub fn set_master_enabled(&mut self, enabled: bool) {
        tracing::debug!(enabled, "master gate");
        self.current.enabled = enabled;
        self.params.write(|w| w.set_enabled(enabled));
    }

    pub fn toggle_master_enabled(&mut self) -> bool {
        let enabled = !self.current.enabled;
        self.set_master_enabled(enabled);
        enabled
    }

    pub fn set_voice_frequency(&mut self, index: usize, frequency: f32) {
        check_index(index);
        tracing::debug!(voice = index, frequency, "voice frequency");
        self.current.frequencies[index] = frequency;
        self.params.write(|w| w.set_frequency(index, frequency));
    }

    pub fn set_voice_gain(&mut self, index: usize, gain: f32) {
        check_index(index);
        tracing::debug!(voice = index, gain, "voice gain");
        self.current.gains[index] = gain;
        self.params.write(|w| w.set_gain(index, gain));
    }

    /// Publishes all of the chord's frequencies in one write, so the audio
    /// thread never renders a mix of old and new chord.
    pub fn select_chord(&mut self, chord_index: usize) {
        let chord = chord::chord(chord_index);
        tracing::debug!(chord = chord.name, "chord selected");
        self.current.frequencies = chord.frequencies;
        self.params.write(|w| {
            for (index, frequency) in chord.frequencies.iter().enumerate() {
                w.set_frequency(index, *frequency);
            }
        });
    }

    pub fn is_master_enabled(&self) -> bool {
        self.current.enabled
    }

    pub fn voice_frequency(&self, index: usize) -> f32 {
        check_index(index);
        self.current.frequencies[index]
    }

    pub fn voice_gain(&self, index: usize) -> f32 {
        check_index(index);
        self.current.gains[index]
    }

    pub fn voice_count(&self) -> usize {
        NUM_VOICES
    }
}

/// Single-threaded synth: a control handle and its engine in one value.
///
/// Handy for offline rendering, tests and the WASM runtime, where the
/// caller drives rendering itself. Use [`split`](Self::split) to hand the
/// engine to an audio callback.
pub struct Synth {
    control: SynthControl,
    engine: RenderEngine,
}

impl Synth {
    pub fn new(config: &SynthConfig) -> Self {
        let params = Arc::new(SharedParams::new(
            config.default_frequency,
            config.default_gain,
        ));
        let current = ParamSnapshot {
            frequencies: [config.default_frequency; NUM_VOICES],
            gains: [config.default_gain; NUM_VOICES],
            enabled: false,
            sample_rate: 0.0,
        };
        let bank = VoiceBank::new(config.default_frequency, config.default_gain);

        Self {
            control: SynthControl {
                params: Arc::clone(&params),
                current,
            },
            engine: RenderEngine::new(bank, params),
        }
    }

    pub fn split(self) -> (SynthControl, RenderEngine) {
        (self.control, self.engine)
    }

    pub fn engine(&self) -> &RenderEngine {
        &self.engine
    }

    pub fn configure(&mut self, sample_rate: f32) {
        self.control.configure(sample_rate);
    }

    pub fn set_master_enabled(&mut self, enabled: bool) {
        self.control.set_master_enabled(enabled);
    }

    pub fn set_voice_frequency(&mut self, index: usize, frequency: f32) {
        self.control.set_voice_frequency(index, frequency);
    }

    pub fn set_voice_gain(&mut self, index: usize, gain: f32) {
        self.control.set_voice_gain(index, gain);
    }

    pub fn select_chord(&mut self, chord_index: usize) {
        self.control.select_chord(chord_index);
    }

    pub fn render_block(&mut self, output: &mut [f32]) {
        self.engine.render_block(output);
    }

    /// Engine state as of the last rendered block.
    ///
    /// `configure` and `set_master_enabled` are only picked up at block
    /// start, so a freshly configured synth reports `Unprepared` until its
    /// first `render_block`.
    pub fn state(&self) -> EngineState {
        self.engine.state()
    }
}

impl Default for Synth {
    fn default() -> Self {
        Self::new(&SynthConfig::default())
    }
}
