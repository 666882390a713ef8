// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Single-voice tone generator rendered by the audio callback.

use std::f32::consts::TAU;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Attack and release ramp length, to avoid clicks at tone edges
const RAMP_SECONDS: f32 = 0.005;

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    #[default]
    Sine,
    Square,
    Triangle,
}

impl Waveform {
    /// Sample at `phase` in [0, 1)
    fn sample(self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => (TAU * phase).sin(),
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Triangle => match phase {
                p if p < 0.25 => p * 4.0,
                p if p < 0.75 => 1.0 - (p - 0.25) * 4.0,
                p => -1.0 + (p - 0.75) * 4.0,
            },
        }
    }
}

/// Monophonic tone generator.
///
/// `trigger` replaces whatever is sounding; the tone stops on its own after
/// the requested duration.
#[derive(Debug, Clone)]
pub struct ToneGenerator {
    sample_rate: u32,
    waveform: Waveform,
    gain: f32,
    frequency: f32,
    phase: f32,
    /// Samples left in the current tone
    remaining: u64,
    /// Total samples of the current tone
    length: u64,
}

impl ToneGenerator {
    /// Create a silent generator
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate: sample_rate.max(1),
            waveform: Waveform::Sine,
            gain: 0.3,
            frequency: 0.0,
            phase: 0.0,
            remaining: 0,
            length: 0,
        }
    }

    /// Set oscillator shape
    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.waveform = waveform;
    }

    /// Set output gain (0.0 - 1.0)
    pub fn set_gain(&mut self, gain: f32) {
        self.gain = gain.clamp(0.0, 1.0);
    }

    /// Start a tone
    pub fn trigger(&mut self, frequency: f32, duration: Duration) {
        self.frequency = frequency;
        self.phase = 0.0;
        self.length = (duration.as_secs_f64() * self.sample_rate as f64).round() as u64;
        self.remaining = self.length;
    }

    /// Check if a tone is sounding
    pub fn is_sounding(&self) -> bool {
        self.remaining > 0
    }

    /// Mix the tone into an interleaved buffer
    pub fn render(&mut self, buffer: &mut [f32], channels: usize) {
        if !self.is_sounding() {
            return;
        }

        let channels = channels.max(1);
        let ramp = ((RAMP_SECONDS * self.sample_rate as f32) as u64).max(1);
        let step = self.frequency / self.sample_rate as f32;

        for frame in buffer.chunks_mut(channels) {
            if self.remaining == 0 {
                break;
            }

            let elapsed = self.length - self.remaining;
            let envelope = (elapsed.min(self.remaining) as f32 / ramp as f32).min(1.0);
            let value = self.waveform.sample(self.phase) * self.gain * envelope;

            for sample in frame.iter_mut() {
                *sample += value;
            }

            self.phase = (self.phase + step).fract();
            self.remaining -= 1;
        }
    }
}
