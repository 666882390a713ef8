// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Audio output for played notes.
//!
//! This module provides:
//! - The [`ToneSink`] trait every tone consumer implements
//! - A cpal-backed output with a small oscillator
//! - A silent sink for machines without an audio device
//! - An in-memory sink that records emitted tones

pub mod output;
pub mod synth;

pub use output::{default_device_name, list_devices, AudioConfig, ToneOutput};
pub use synth::{ToneGenerator, Waveform};

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::timing::{Clock, VirtualClock};

/// Lowest frequency a sink accepts
pub const MIN_FREQUENCY_HZ: f64 = 1.0;

/// Audio error types
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AudioError {
    /// No audio device available
    #[error("No audio device available")]
    NoDevice,
    /// Failed to build or start the audio stream
    #[error("Audio stream failed: {0}")]
    StreamFailed(String),
    /// Failed to acquire lock
    #[error("Failed to acquire audio lock")]
    LockFailed,
    /// Frequency outside what a device can play
    #[error("Invalid tone frequency: {0} Hz")]
    InvalidFrequency(f64),
}

/// Consumer of tones.
///
/// `emit` blocks for at least `duration` while the tone sounds.
pub trait ToneSink {
    /// Play a tone at `frequency` Hz for `duration`
    fn emit(&mut self, frequency: f64, duration: Duration) -> Result<(), AudioError>;
}

impl<T: ToneSink + ?Sized> ToneSink for Box<T> {
    fn emit(&mut self, frequency: f64, duration: Duration) -> Result<(), AudioError> {
        (**self).emit(frequency, duration)
    }
}

/// Reject frequencies no device can sound
pub fn validate_tone(frequency: f64) -> Result<(), AudioError> {
    if frequency.is_finite() && frequency >= MIN_FREQUENCY_HZ {
        Ok(())
    } else {
        Err(AudioError::InvalidFrequency(frequency))
    }
}

/// Sink that makes no sound but keeps the tone's timing
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentOutput;

impl ToneSink for SilentOutput {
    fn emit(&mut self, frequency: f64, duration: Duration) -> Result<(), AudioError> {
        validate_tone(frequency)?;
        debug!(frequency, duration_ms = duration.as_millis() as u64, "silent tone");
        thread::sleep(duration);
        Ok(())
    }
}

/// A tone received by [`MemorySink`]
#[derive(Debug, Clone, PartialEq)]
pub struct EmittedTone {
    /// Frequency in Hz
    pub frequency: f64,
    /// Requested duration
    pub duration: Duration,
    /// Virtual time of emission (0 without a clock)
    pub at_ms: u64,
}

/// Sink that stores tones instead of playing them.
///
/// Clones share the same log. With a [`VirtualClock`] attached, each tone
/// is stamped with the virtual time it was emitted at; the clock is not
/// advanced by the tone itself.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    tones: Arc<Mutex<Vec<EmittedTone>>>,
    clock: Option<VirtualClock>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sink stamping tones with `clock`
    pub fn with_clock(clock: VirtualClock) -> Self {
        Self {
            tones: Arc::default(),
            clock: Some(clock),
        }
    }

    /// Tones emitted so far
    pub fn tones(&self) -> Vec<EmittedTone> {
        self.tones.lock().map(|t| t.clone()).unwrap_or_default()
    }

    /// Number of tones emitted
    pub fn len(&self) -> usize {
        self.tones.lock().map(|t| t.len()).unwrap_or(0)
    }

    /// Check if nothing was emitted
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget emitted tones
    pub fn clear(&self) {
        if let Ok(mut tones) = self.tones.lock() {
            tones.clear();
        }
    }
}

impl ToneSink for MemorySink {
    fn emit(&mut self, frequency: f64, duration: Duration) -> Result<(), AudioError> {
        validate_tone(frequency)?;
        let at_ms = self.clock.as_ref().map(|c| c.now_ms()).unwrap_or(0);
        let mut tones = self.tones.lock().map_err(|_| AudioError::LockFailed)?;
        tones.push(EmittedTone {
            frequency,
            duration,
            at_ms,
        });
        Ok(())
    }
}
