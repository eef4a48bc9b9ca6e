use super::chord;
use super::config::NUM_VOICES;
use super::oscillator::Oscillator;

/// One oscillator and the gain it is mixed at.
#[derive(Clone, Debug)]
pub struct Voice {
    pub oscillator: Oscillator,
    pub gain: f32,
}

/// The additive engine: a fixed set of voices mixed with a constant `1/N`
/// normalization.
#[derive(Clone, Debug)]
pub struct VoiceBank {
    voices: [Voice; NUM_VOICES],
}

impl VoiceBank {
    pub fn new(frequency: f32, gain: f32) -> Self {
        Self {
            voices: std::array::from_fn(|_| Voice {
                oscillator: Oscillator::new(frequency),
                gain,
            }),
        }
    }

    pub fn prepare(&mut self, sample_rate: f32) {
        for voice in self.voices.iter_mut() {
            voice.oscillator.set_sample_rate(sample_rate);
        }
    }

    pub fn set_voice_frequency(&mut self, index: usize, frequency: f32) {
        self.voice_mut(index).oscillator.set_frequency(frequency);
    }

    /// Stored as given: gains outside `[0, 1]` produce a mix outside `[-1, 1]`.
    pub fn set_voice_gain(&mut self, index: usize, gain: f32) {
        self.voice_mut(index).gain = gain;
    }

    /// Retunes every voice, in index order, to the chord's frequencies.
    pub fn select_chord(&mut self, chord_index: usize) {
        let chord = chord::chord(chord_index);
        for (index, frequency) in chord.frequencies.iter().enumerate() {
            self.set_voice_frequency(index, *frequency);
        }
    }

    /// Ticks every voice once and returns the gain-weighted sum divided by N.
    ///
    /// All voices contribute regardless of gain; silence comes from zero
    /// gains or the engine's master gate.
    pub fn render_sample(&mut self) -> f32 {
        let sum: f32 = self
            .voices
            .iter_mut()
            .map(|voice| voice.oscillator.tick() * voice.gain)
            .sum();
        sum / NUM_VOICES as f32
    }

    pub fn frequency(&self, index: usize) -> f32 {
        self.voice(index).oscillator.frequency()
    }

    pub fn gain(&self, index: usize) -> f32 {
        self.voice(index).gain
    }

    pub fn voice(&self, index: usize) -> &Voice {
        check_index(index);
        &self.voices[index]
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    pub fn len(&self) -> usize {
        NUM_VOICES
    }

    pub fn is_empty(&self) -> bool {
        NUM_VOICES == 0
    }

    fn voice_mut(&mut self, index: usize) -> &mut Voice {
        check_index(index);
        &mut self.voices[index]
    }
}

pub(crate) fn check_index(index: usize) {
    assert!(
        index < NUM_VOICES,
        "voice index {} out of range ({} voices)",
        index,
        NUM_VOICES
    );
}
