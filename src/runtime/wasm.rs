use crate::synth::{chord_for_key, Synth, CHORDS};
use js_sys::Float32Array;
use wasm_bindgen::prelude::*;

/// WASM synth runtime (no threads, the page drives rendering directly).
///
/// Out-of-range voice or chord indices and rendering before `configure`
/// trap, same as the native core.
#[wasm_bindgen]
pub struct WasmSynth {
    synth: Synth,
    temp_buffer: Vec<f32>,
}

#[wasm_bindgen]
impl WasmSynth {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmSynth {
        WasmSynth {
            synth: Synth::default(),
            temp_buffer: Vec::new(),
        }
    }

    #[wasm_bindgen]
    pub fn configure(&mut self, sample_rate: f32) {
        self.synth.configure(sample_rate);
    }

    /// Render `length` samples into a JS-friendly Float32Array
    #[wasm_bindgen]
    pub fn render(&mut self, length: usize) -> Float32Array {
        if self.temp_buffer.len() != length {
            self.temp_buffer = vec![0.0; length];
        }
        self.synth.render_block(&mut self.temp_buffer);
        Float32Array::from(self.temp_buffer.as_slice())
    }

    #[wasm_bindgen]
    pub fn set_master_enabled(&mut self, enabled: bool) {
        self.synth.set_master_enabled(enabled);
    }

    #[wasm_bindgen]
    pub fn set_voice_frequency(&mut self, voice: usize, frequency: f32) {
        self.synth.set_voice_frequency(voice, frequency);
    }

    #[wasm_bindgen]
    pub fn set_voice_gain(&mut self, voice: usize, gain: f32) {
        self.synth.set_voice_gain(voice, gain);
    }

    #[wasm_bindgen]
    pub fn select_chord(&mut self, chord: usize) {
        self.synth.select_chord(chord);
    }

    /// Returns false when the key has no chord bound to it.
    #[wasm_bindgen]
    pub fn select_chord_by_key(&mut self, key: char) -> bool {
        match chord_for_key(key) {
            Some(chord) => {
                self.synth.select_chord(chord);
                true
            }
            None => false,
        }
    }

    /// The chord table, for drawing the chord buttons.
    #[wasm_bindgen]
    pub fn chords(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&CHORDS).map_err(JsValue::from)
    }
}

impl Default for WasmSynth {
    fn default() -> Self {
        Self::new()
    }
}
