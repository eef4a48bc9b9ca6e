pub mod chord;
pub mod config;
pub mod core;
pub mod engine;
pub mod oscillator;
pub mod params;
pub mod voice_bank;

pub use self::chord::{chord_for_key, Chord, CHORDS};
pub use self::config::{SynthConfig, NUM_VOICES};
pub use self::core::{Synth, SynthControl};
pub use self::engine::{EngineState, RenderEngine};
pub use self::oscillator::Oscillator;
pub use self::voice_bank::{Voice, VoiceBank};
