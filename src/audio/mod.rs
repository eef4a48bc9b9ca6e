mod cpal_backend;
pub use self::cpal_backend::CpalBackend;

use crate::synth::RenderEngine;
use crate::Result;

pub trait AudioBackend {
    /// Takes ownership of the engine, prepares it for the device's sample
    /// rate and starts streaming. Returns that sample rate.
    fn start(&mut self, engine: RenderEngine) -> Result<f32>;
    fn stop(&mut self) -> Result<()>;
}
