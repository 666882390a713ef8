// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Audio output via cpal.
//!
//! Provides a blocking tone sink backed by the default output device.

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Stream, StreamConfig};
use tracing::{debug, error, info};

use super::synth::{ToneGenerator, Waveform};
use super::{validate_tone, AudioError, ToneSink};

/// Audio output configuration
#[derive(Debug, Clone)]
pub struct AudioConfig {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Buffer size in frames (None = device default)
    pub buffer_size: Option<u32>,
    /// Number of output channels
    pub channels: u16,
    /// Output gain (0.0 - 1.0)
    pub volume: f32,
    /// Oscillator shape
    pub waveform: Waveform,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            buffer_size: Some(512),
            channels: 2,
            volume: 0.3,
            waveform: Waveform::Sine,
        }
    }
}

/// Tone sink playing through the default output device
pub struct ToneOutput {
    /// cpal stream
    _stream: Stream,
    /// Output device
    _device: Device,
    /// Generator shared with the audio callback
    synth: Arc<Mutex<ToneGenerator>>,
    /// Current configuration
    config: AudioConfig,
}

impl ToneOutput {
    /// Open the default output device and start a silent stream
    pub fn new(config: AudioConfig) -> Result<Self, AudioError> {
        let host = cpal::default_host();

        let device = host
            .default_output_device()
            .ok_or(AudioError::NoDevice)?;

        let stream_config = StreamConfig {
            channels: config.channels,
            sample_rate: cpal::SampleRate(config.sample_rate),
            buffer_size: match config.buffer_size {
                Some(frames) => cpal::BufferSize::Fixed(frames),
                None => cpal::BufferSize::Default,
            },
        };

        let mut generator = ToneGenerator::new(config.sample_rate);
        generator.set_gain(config.volume);
        generator.set_waveform(config.waveform);
        let synth = Arc::new(Mutex::new(generator));

        let channels = config.channels as usize;
        let render_synth = Arc::clone(&synth);

        let stream = device
            .build_output_stream(
                &stream_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    for sample in data.iter_mut() {
                        *sample = 0.0;
                    }
                    if let Ok(mut synth) = render_synth.lock() {
                        synth.render(data, channels);
                    }
                },
                move |err| {
                    error!("audio stream error: {}", err);
                },
                None, // No timeout
            )
            .map_err(|e| AudioError::StreamFailed(format!("Failed to build stream: {}", e)))?;

        stream
            .play()
            .map_err(|e| AudioError::StreamFailed(format!("Failed to start stream: {}", e)))?;

        info!(
            device = %device.name().unwrap_or_else(|_| "unknown".to_string()),
            sample_rate = config.sample_rate,
            "audio output started"
        );

        Ok(Self {
            _stream: stream,
            _device: device,
            synth,
            config,
        })
    }

    /// Calculate latency in milliseconds (None when the device picks the buffer)
    pub fn latency_ms(&self) -> Option<f64> {
        latency_ms(&self.config)
    }
}

impl ToneSink for ToneOutput {
    fn emit(&mut self, frequency: f64, duration: Duration) -> Result<(), AudioError> {
        validate_tone(frequency)?;
        {
            let mut synth = self.synth.lock().map_err(|_| AudioError::LockFailed)?;
            synth.trigger(frequency as f32, duration);
        }
        debug!(frequency, duration_ms = duration.as_millis() as u64, "tone");
        thread::sleep(duration);
        Ok(())
    }
}

fn latency_ms(config: &AudioConfig) -> Option<f64> {
    config
        .buffer_size
        .map(|frames| (frames as f64 / config.sample_rate as f64) * 1000.0)
}

/// List available audio output devices
pub fn list_devices() -> Vec<String> {
    let host = cpal::default_host();
    host.output_devices()
        .map(|devices| devices.filter_map(|d| d.name().ok()).collect())
        .unwrap_or_default()
}

/// Get default device name
pub fn default_device_name() -> Option<String> {
    let host = cpal::default_host();
    host.default_output_device().and_then(|d| d.name().ok())
}
