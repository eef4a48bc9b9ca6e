use crate::audio::AudioBackend;
use crate::synth::RenderEngine;
use crate::{Error, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, Stream};

/// Plays a [`RenderEngine`] on a cpal output device.
///
/// The engine is moved into the device callback, so the audio thread owns it
/// outright and never contends for a lock. The mono signal is copied to every
/// device channel.
pub struct CpalBackend {
    stream: Option<Stream>,
    device_name: Option<String>,
    buffer_size: u32,
    max_block_frames: usize,
}

impl CpalBackend {
    pub fn new(device_name: Option<String>, buffer_size: u32, max_block_frames: usize) -> Self {
        Self {
            stream: None,
            device_name,
            buffer_size,
            max_block_frames,
        }
    }

    fn select_output_device(&self, host: &cpal::Host) -> Result<cpal::Device> {
        let Some(search) = &self.device_name else {
            return host.default_output_device().ok_or(Error::NoDevice);
        };

        let search = search.to_lowercase();
        let devices = host
            .output_devices()
            .map_err(|e| Error::Stream(e.to_string()))?;
        for device in devices {
            let name = device.name().unwrap_or_default();
            if name.to_lowercase().contains(&search) {
                return Ok(device);
            }
        }
        Err(Error::DeviceNotFound(format!(
            "no output device matching '{}'",
            search
        )))
    }

    fn build_stream(
        &self,
        device: &cpal::Device,
        stream_config: &cpal::StreamConfig,
        mut engine: RenderEngine,
    ) -> std::result::Result<Stream, cpal::BuildStreamError> {
        let channels = stream_config.channels as usize;
        // allocated here, never in the callback
        let mut scratch = vec![0.0f32; self.max_block_frames.max(1)];

        device.build_output_stream(
            stream_config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                write_interleaved(&mut engine, &mut scratch, data, channels);
            },
            |err| tracing::error!(error = %err, "output stream error"),
            None,
        )
    }

    fn open(&mut self, mut engine: RenderEngine) -> Result<f32> {
        let host = cpal::default_host();
        let device = self.select_output_device(&host)?;
        tracing::info!(device = %device.name().unwrap_or_default(), "selected output device");

        let supported_config = device
            .default_output_config()
            .map_err(|e| Error::Stream(e.to_string()))?;
        if supported_config.sample_format() != SampleFormat::F32 {
            return Err(Error::UnsupportedFormat(format!(
                "{:?}",
                supported_config.sample_format()
            )));
        }

        let buffer_size = fixed_buffer_size(supported_config.buffer_size(), self.buffer_size);
        let mut stream_config: cpal::StreamConfig = supported_config.into();
        stream_config.buffer_size = buffer_size;
        let sample_rate = stream_config.sample_rate.0 as f32;
        engine.prepare(sample_rate);

        let stream = self
            .build_stream(&device, &stream_config, engine)
            .map_err(|e| Error::Stream(e.to_string()))?;

        stream.play().map_err(|e| Error::Stream(e.to_string()))?;
        tracing::info!(
            sample_rate,
            channels = stream_config.channels,
            "output stream started"
        );
        self.stream = Some(stream);
        Ok(sample_rate)
    }
}

impl AudioBackend for CpalBackend {
    fn start(&mut self, engine: RenderEngine) -> Result<f32> {
        self.open(engine)
    }

    fn stop(&mut self) -> Result<()> {
        if let Some(stream) = self.stream.take() {
            stream.pause().map_err(|e| Error::Stream(e.to_string()))?;
            tracing::info!("output stream stopped");
        }
        Ok(())
    }
}

/// Requests `frames` per callback when the device allows it.
fn fixed_buffer_size(supported: &cpal::SupportedBufferSize, frames: u32) -> cpal::BufferSize {
    match supported {
        cpal::SupportedBufferSize::Range { min, max } if (*min..=*max).contains(&frames) => {
            cpal::BufferSize::Fixed(frames)
        }
        _ => {
            tracing::warn!(
                buffer_size = frames,
                "fixed buffer size not supported, using device default"
            );
            cpal::BufferSize::Default
        }
    }
}

/// Renders `data.len() / channels` frames through `scratch` in chunks and
/// copies each mono sample to every channel of its frame.
pub(crate) fn write_interleaved(
    engine: &mut RenderEngine,
    scratch: &mut [f32],
    data: &mut [f32],
    channels: usize,
) {
    let channels = channels.max(1);
    let chunk_samples = scratch.len() * channels;
    for chunk in data.chunks_mut(chunk_samples) {
        let frames = chunk.len() / channels;
        let mono = &mut scratch[..frames];
        engine.render_block(mono);
        for (frame, sample) in chunk.chunks_mut(channels).zip(mono.iter()) {
            frame.fill(*sample);
        }
    }
}
