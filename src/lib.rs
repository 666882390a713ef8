// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Console piano.
//!
//! Computer keys play the twelve notes of an octave, `+`/`-` shift the
//! octave, `r` records a take with its timing and `p` plays it back with the
//! same pacing.

pub mod audio;
pub mod config;
pub mod control;
pub mod music;
pub mod playback;
pub mod recording;
pub mod timing;
pub mod ui;

pub use audio::{AudioError, MemorySink, SilentOutput, ToneOutput, ToneSink};
pub use config::PianoConfig;
pub use control::{ControlAction, InputRouter, RouterEvent};
pub use music::{transpose, Octave, PitchClass, PitchTable};
pub use playback::{PlaybackEngine, PlaybackError, PlaybackSummary};
pub use recording::{Note, Recording, RecordingSession};
pub use timing::{Clock, SystemClock, ThreadWaiter, VirtualClock, Waiter};
