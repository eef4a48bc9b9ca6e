use std::ops::RangeInclusive;

/// Number of voices in the bank. Fixed for the lifetime of the process.
pub const NUM_VOICES: usize = 3;

#[derive(Clone, Debug)]
pub struct SynthConfig {
    /// Frequency every voice starts at before any chord is selected.
    pub default_frequency: f32,
    /// Gain every voice starts at.
    pub default_gain: f32,
    /// Range the control surface clamps frequency edits into. Not enforced by the core.
    pub frequency_range: RangeInclusive<f32>,
    /// Range the control surface clamps gain edits into. Not enforced by the core.
    pub gain_range: RangeInclusive<f32>,
    /// Gain change applied per key press on the keyboard surface.
    pub gain_step: f32,
    /// Size of the preallocated scratch buffer the audio callback renders into.
    pub max_block_frames: usize,
    /// Buffer size requested from the device, in frames.
    pub buffer_size: u32,
}

impl SynthConfig {
    pub fn clamp_frequency(&self, frequency: f32) -> f32 {
        frequency.clamp(*self.frequency_range.start(), *self.frequency_range.end())
    }

    pub fn clamp_gain(&self, gain: f32) -> f32 {
        gain.clamp(*self.gain_range.start(), *self.gain_range.end())
    }
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            default_frequency: 1000.0,
            default_gain: 0.5,
            frequency_range: 50.0..=5000.0,
            gain_range: 0.0..=1.0,
            gain_step: 0.05,
            max_block_frames: 4096,
            buffer_size: 256,
        }
    }
}
