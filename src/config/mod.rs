// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration system.
//!
//! Settings are read from a TOML or YAML file, chosen by extension. Every
//! field has a default, so an empty file (or no file) is a valid setup.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::audio::{AudioConfig, Waveform};
use crate::music::Octave;
use crate::playback::DEFAULT_TONE_DURATION_MS;

/// Root settings file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PianoConfig {
    /// Audio output settings
    #[serde(default)]
    pub audio: AudioSettings,
    /// Playing and playback settings
    #[serde(default)]
    pub playback: PlaybackSettings,
    /// Terminal UI settings
    #[serde(default)]
    pub ui: UiSettings,
    /// Log output settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl PianoConfig {
    /// Load settings, picking the format from the file extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&contents),
            _ => Self::from_toml(&contents),
        }
        .with_context(|| format!("Invalid config file: {:?}", path))
    }

    /// Parse settings from TOML
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse TOML configuration")
    }

    /// Parse settings from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).context("Failed to serialize configuration to TOML")
    }

    /// Save settings as TOML
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let text = self.to_toml()?;
        fs::write(path.as_ref(), text)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))
    }
}

/// Audio output settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AudioSettings {
    /// Sample rate in Hz
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    /// Buffer size in frames (0 = device default)
    #[serde(default = "default_buffer_size")]
    pub buffer_size: u32,
    /// Output volume (0.0 - 1.0)
    #[serde(default = "default_volume")]
    pub volume: f32,
    /// Oscillator shape
    #[serde(default)]
    pub waveform: Waveform,
}

fn default_sample_rate() -> u32 {
    44100
}
fn default_buffer_size() -> u32 {
    512
}
fn default_volume() -> f32 {
    0.3
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            buffer_size: default_buffer_size(),
            volume: default_volume(),
            waveform: Waveform::default(),
        }
    }
}

impl AudioSettings {
    /// Output stream configuration
    pub fn to_audio_config(&self) -> AudioConfig {
        AudioConfig {
            sample_rate: self.sample_rate,
            buffer_size: (self.buffer_size > 0).then_some(self.buffer_size),
            channels: 2,
            volume: self.volume.clamp(0.0, 1.0),
            waveform: self.waveform,
        }
    }
}

/// Playing and playback settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaybackSettings {
    /// Length of every tone in milliseconds
    #[serde(default = "default_tone_duration_ms")]
    pub tone_duration_ms: u64,
    /// Octave at startup (clamped to 1-8)
    #[serde(default = "default_start_octave")]
    pub start_octave: u8,
}

fn default_tone_duration_ms() -> u64 {
    DEFAULT_TONE_DURATION_MS
}
fn default_start_octave() -> u8 {
    Octave::default().value()
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            tone_duration_ms: default_tone_duration_ms(),
            start_octave: default_start_octave(),
        }
    }
}

impl PlaybackSettings {
    /// Tone length
    pub fn tone_duration(&self) -> Duration {
        Duration::from_millis(self.tone_duration_ms)
    }

    /// Starting octave, clamped into range
    pub fn octave(&self) -> Octave {
        Octave::new(self.start_octave)
    }
}

/// Terminal UI settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiSettings {
    /// Window title
    #[serde(default = "default_title")]
    pub title: String,
    /// Redraw rate while idle
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
}

fn default_title() -> String {
    "Console Piano".to_string()
}
fn default_frame_rate() -> u32 {
    30
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            title: default_title(),
            frame_rate: default_frame_rate(),
        }
    }
}

/// Log output settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingSettings {
    /// Maximum level: trace, debug, info, warn or error
    #[serde(default = "default_level")]
    pub level: String,
    /// Log file; logging is off without one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: None,
        }
    }
}

impl LoggingSettings {
    /// Parsed level, falling back to info
    pub fn level(&self) -> tracing::Level {
        self.level.parse().unwrap_or(tracing::Level::INFO)
    }
}
