use super::params::{ParamSnapshot, SharedParams};
use super::voice_bank::VoiceBank;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    /// No sample rate yet; rendering is a caller error.
    Unprepared,
    /// Prepared, master gate closed. Output is silent but oscillators run.
    Disabled,
    Enabled,
}

/// Audio-thread side of the synth. Owns the voice bank.
///
/// Parameter changes arrive through [`SharedParams`] and are applied once at
/// the start of each block. Rendering never locks, allocates or waits.
pub struct RenderEngine {
    bank: VoiceBank,
    params: Arc<SharedParams>,
    applied_version: Option<u32>,
    requested_sample_rate: f32,
    sample_rate: Option<f32>,
    enabled: bool,
}

impl RenderEngine {
    pub(crate) fn new(bank: VoiceBank, params: Arc<SharedParams>) -> Self {
        Self {
            bank,
            params,
            applied_version: None,
            requested_sample_rate: 0.0,
            sample_rate: None,
            enabled: false,
        }
    }

    /// Propagates `sample_rate` to every oscillator. Phases are kept.
    pub fn prepare(&mut self, sample_rate: f32) {
        self.bank.prepare(sample_rate);
        self.sample_rate = Some(sample_rate);
    }

    /// Fills `output` with the next `output.len()` samples.
    ///
    /// # Panics
    ///
    /// If neither [`prepare`](Self::prepare) nor a control-side `configure`
    /// has supplied a sample rate.
    pub fn render_block(&mut self, output: &mut [f32]) {
        self.sync_params();
        assert!(
            self.sample_rate.is_some(),
            "render_block called before a sample rate was configured"
        );

        if self.enabled {
            for sample in output.iter_mut() {
                *sample = self.bank.render_sample();
            }
        } else {
            // muted: keep the oscillators running so re-enabling is click-free
            for sample in output.iter_mut() {
                self.bank.render_sample();
                *sample = 0.0;
            }
        }
    }

    /// State as of the last block start, when published parameters are applied.
    pub fn state(&self) -> EngineState {
        match (self.sample_rate, self.enabled) {
            (None, _) => EngineState::Unprepared,
            (Some(_), false) => EngineState::Disabled,
            (Some(_), true) => EngineState::Enabled,
        }
    }

    pub fn sample_rate(&self) -> Option<f32> {
        self.sample_rate
    }

    pub fn bank(&self) -> &VoiceBank {
        &self.bank
    }

    /// Picks up the latest published parameters, if any were published since
    /// the last block and the read was not interrupted by a write.
    fn sync_params(&mut self) {
        if self.applied_version == Some(self.params.version()) {
            return;
        }
        if let Some((version, snapshot)) = self.params.try_snapshot() {
            self.apply(&snapshot);
            self.applied_version = Some(version);
        }
    }

    fn apply(&mut self, snapshot: &ParamSnapshot) {
        // only a new configure() request re-prepares, so a rate set directly
        // through prepare() is not overwritten by an older request
        if snapshot.sample_rate > 0.0 && snapshot.sample_rate != self.requested_sample_rate {
            self.requested_sample_rate = snapshot.sample_rate;
            self.prepare(snapshot.sample_rate);
        }
        for (index, frequency) in snapshot.frequencies.iter().enumerate() {
            self.bank.set_voice_frequency(index, *frequency);
        }
        for (index, gain) in snapshot.gains.iter().enumerate() {
            self.bank.set_voice_gain(index, *gain);
        }
        self.enabled = snapshot.enabled;
    }
}
