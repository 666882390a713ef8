// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory module.
//!
//! Provides the key-to-pitch table and octave transposition.

pub mod pitch;

pub use pitch::{
    transpose, Octave, PitchClass, PitchEntry, PitchTable, MAX_OCTAVE, MIN_OCTAVE,
    REFERENCE_OCTAVE,
};
