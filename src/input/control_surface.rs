use crate::synth::{SynthConfig, SynthControl};

/// Something the user asked the synth to do.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlAction {
    SelectChord(usize),
    ToggleMaster,
    /// Direct later frequency/gain edits at this voice.
    FocusVoice(usize),
    NudgeFrequency { semitones: i32 },
    NudgeGain { steps: i32 },
    Quit,
}

/// Turns [`ControlAction`]s into calls on a [`SynthControl`].
///
/// Frequency and gain edits are clamped to the configured control ranges
/// here; the synth core itself accepts any value.
pub struct ControlSurface {
    config: SynthConfig,
    focused_voice: usize,
}

impl ControlSurface {
    pub fn new(config: SynthConfig) -> Self {
        Self {
            config,
            focused_voice: 0,
        }
    }

    pub fn focused_voice(&self) -> usize {
        self.focused_voice
    }

    /// Applies `action`. Returns `false` once the user asked to quit.
    pub fn apply(&mut self, action: ControlAction, control: &mut SynthControl) -> bool {
        match action {
            ControlAction::SelectChord(index) => control.select_chord(index),
            ControlAction::ToggleMaster => {
                let enabled = control.toggle_master_enabled();
                tracing::info!(enabled, "master gate toggled");
            }
            ControlAction::FocusVoice(index) => {
                if index < control.voice_count() {
                    self.focused_voice = index;
                    tracing::info!(voice = index, "voice focused");
                }
            }
            ControlAction::NudgeFrequency { semitones } => {
                let voice = self.focused_voice;
                let current = control.voice_frequency(voice);
                let target = current * 2f32.powf(semitones as f32 / 12.0);
                let frequency = self.config.clamp_frequency(target);
                control.set_voice_frequency(voice, frequency);
                tracing::info!(voice, frequency, "frequency changed");
            }
            ControlAction::NudgeGain { steps } => {
                let voice = self.focused_voice;
                let target = control.voice_gain(voice) + steps as f32 * self.config.gain_step;
                let gain = self.config.clamp_gain(target);
                control.set_voice_gain(voice, gain);
                tracing::info!(voice, gain, "gain changed");
            }
            ControlAction::Quit => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::Synth;

    fn surface_and_control() -> (ControlSurface, SynthControl) {
        let config = SynthConfig::default();
        let (control, _) = Synth::new(&config).split();
        (ControlSurface::new(config), control)
    }

    #[test]
    fn frequency_nudges_by_semitone_and_clamps() {
        let (mut surface, mut control) = surface_and_control();
        control.set_voice_frequency(0, 440.0);
        surface.apply(ControlAction::NudgeFrequency { semitones: 12 }, &mut control);
        assert!((control.voice_frequency(0) - 880.0).abs() < 1e-3);

        control.set_voice_frequency(0, 4900.0);
        surface.apply(ControlAction::NudgeFrequency { semitones: 1 }, &mut control);
        assert_eq!(control.voice_frequency(0), 5000.0);

        control.set_voice_frequency(0, 51.0);
        surface.apply(ControlAction::NudgeFrequency { semitones: -1 }, &mut control);
        assert_eq!(control.voice_frequency(0), 50.0);
    }

    #[test]
    fn gain_edits_follow_focus() {
        let (mut surface, mut control) = surface_and_control();
        surface.apply(ControlAction::FocusVoice(2), &mut control);
        assert_eq!(surface.focused_voice(), 2);
        for _ in 0..20 {
            surface.apply(ControlAction::NudgeGain { steps: 1 }, &mut control);
        }
        assert_eq!(control.voice_gain(2), 1.0);
        assert_eq!(control.voice_gain(0), 0.5);
    }

    #[test]
    fn focus_outside_bank_is_ignored() {
        let (mut surface, mut control) = surface_and_control();
        surface.apply(ControlAction::FocusVoice(7), &mut control);
        assert_eq!(surface.focused_voice(), 0);
    }

    #[test]
    fn quit_stops_the_loop() {
        let (mut surface, mut control) = surface_and_control();
        assert!(surface.apply(ControlAction::ToggleMaster, &mut control));
        assert!(control.is_master_enabled());
        assert!(!surface.apply(ControlAction::Quit, &mut control));
    }
}
