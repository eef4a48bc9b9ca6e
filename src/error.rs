/// Errors raised while opening or driving the audio device.
///
/// The synthesis core itself has no recoverable errors: caller-contract
/// violations (bad voice index, bad chord index, rendering before a sample
/// rate is known) panic instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No output device is available on the system.
    #[error("No output device available")]
    NoDevice,

    /// The requested output device was not found.
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    /// The device only offers sample formats the backend cannot write.
    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),

    /// Stream setup or runtime failure reported by the audio host.
    #[error("Audio stream error: {0}")]
    Stream(String),
}

pub type Result<T> = std::result::Result<T, Error>;
