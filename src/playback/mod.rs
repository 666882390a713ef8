// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Playback of recorded takes.

pub mod engine;

pub use engine::{PlaybackEngine, PlaybackError, PlaybackSummary, DEFAULT_TONE_DURATION_MS};
