pub mod error;
pub mod runtime;
pub mod synth;

#[cfg(feature = "native")]
pub mod audio;
#[cfg(feature = "native")]
pub mod input;

pub use error::{Error, Result};
