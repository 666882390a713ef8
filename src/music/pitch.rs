// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Pitch model: key symbols, note names and octave transposition.
//!
//! The twelve playable keys follow the lower row of a QWERTY keyboard
//! (`z x c v b n m` for the naturals, `s d g h j` for the sharps), and every
//! entry carries its equal-tempered frequency at the reference octave.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Octave at which the pitch table frequencies are defined
pub const REFERENCE_OCTAVE: u8 = 4;

/// Lowest playable octave
pub const MIN_OCTAVE: u8 = 1;

/// Highest playable octave
pub const MAX_OCTAVE: u8 = 8;

/// Pitch classes of the chromatic scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PitchClass {
    C,
    Cs, // C#
    D,
    Ds, // D#
    E,
    F,
    Fs, // F#
    G,
    Gs, // G#
    A,
    As, // A#
    B,
}

impl PitchClass {
    /// All pitch classes in chromatic order
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::Cs,
        PitchClass::D,
        PitchClass::Ds,
        PitchClass::E,
        PitchClass::F,
        PitchClass::Fs,
        PitchClass::G,
        PitchClass::Gs,
        PitchClass::A,
        PitchClass::As,
        PitchClass::B,
    ];

    /// Display name (e.g. "C#")
    pub fn name(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::Cs => "C#",
            PitchClass::D => "D",
            PitchClass::Ds => "D#",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::Fs => "F#",
            PitchClass::G => "G",
            PitchClass::Gs => "G#",
            PitchClass::A => "A",
            PitchClass::As => "A#",
            PitchClass::B => "B",
        }
    }

    /// Whether this is a sharp (black key)
    pub fn is_sharp(self) -> bool {
        matches!(
            self,
            PitchClass::Cs | PitchClass::Ds | PitchClass::Fs | PitchClass::Gs | PitchClass::As
        )
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One key of the pitch table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchEntry {
    /// Lowercase key symbol
    pub symbol: char,
    /// Pitch class played by the key
    pub pitch: PitchClass,
    /// Frequency in Hz at the reference octave
    pub reference_hz: f64,
}

impl PitchEntry {
    const fn new(symbol: char, pitch: PitchClass, reference_hz: f64) -> Self {
        Self {
            symbol,
            pitch,
            reference_hz,
        }
    }

    /// Note name label
    pub fn name(&self) -> &'static str {
        self.pitch.name()
    }

    /// Frequency sounded by this key at the given octave
    pub fn frequency_at(&self, octave: Octave) -> f64 {
        transpose(self.reference_hz, octave)
    }
}

const ENTRIES: [PitchEntry; 12] = [
    PitchEntry::new('z', PitchClass::C, 261.63),
    PitchEntry::new('s', PitchClass::Cs, 277.18),
    PitchEntry::new('x', PitchClass::D, 293.66),
    PitchEntry::new('d', PitchClass::Ds, 311.13),
    PitchEntry::new('c', PitchClass::E, 329.63),
    PitchEntry::new('v', PitchClass::F, 349.23),
    PitchEntry::new('g', PitchClass::Fs, 369.99),
    PitchEntry::new('b', PitchClass::G, 392.00),
    PitchEntry::new('h', PitchClass::Gs, 415.30),
    PitchEntry::new('n', PitchClass::A, 440.00),
    PitchEntry::new('j', PitchClass::As, 466.16),
    PitchEntry::new('m', PitchClass::B, 493.88),
];

/// Fixed mapping from key symbols to pitches
#[derive(Debug, Clone, Copy, Default)]
pub struct PitchTable;

impl PitchTable {
    /// Create the pitch table
    pub fn new() -> Self {
        Self
    }

    /// Look up a lowercase key symbol.
    ///
    /// Returns `None` for anything that is not one of the twelve note keys;
    /// callers treat that as "not a note", never as an error.
    pub fn lookup(&self, symbol: char) -> Option<&'static PitchEntry> {
        ENTRIES.iter().find(|entry| entry.symbol == symbol)
    }

    /// Entry playing `pitch`
    pub fn entry(&self, pitch: PitchClass) -> &'static PitchEntry {
        &ENTRIES[pitch as usize]
    }

    /// Entries in chromatic order, C to B
    pub fn entries(&self) -> &'static [PitchEntry] {
        &ENTRIES
    }
}

/// Current octave, bounded to `MIN_OCTAVE..=MAX_OCTAVE`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Octave(u8);

impl Octave {
    /// Create an octave, clamping into the playable range
    pub fn new(value: u8) -> Self {
        Self(value.clamp(MIN_OCTAVE, MAX_OCTAVE))
    }

    /// Numeric octave value
    pub fn value(self) -> u8 {
        self.0
    }

    /// Step one octave up. Returns false when already at the top.
    pub fn increment(&mut self) -> bool {
        self.shift(1)
    }

    /// Step one octave down. Returns false when already at the bottom.
    pub fn decrement(&mut self) -> bool {
        self.shift(-1)
    }

    fn shift(&mut self, delta: i8) -> bool {
        let next = (self.0 as i8 + delta).clamp(MIN_OCTAVE as i8, MAX_OCTAVE as i8) as u8;
        let changed = next != self.0;
        self.0 = next;
        changed
    }
}

impl Default for Octave {
    fn default() -> Self {
        Self(REFERENCE_OCTAVE)
    }
}

impl fmt::Display for Octave {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sounding frequency of a reference-octave frequency at `octave`.
///
/// Each octave step doubles or halves the frequency: `hz * 2^(octave - 4)`.
pub fn transpose(reference_hz: f64, octave: Octave) -> f64 {
    let steps = octave.value() as i32 - REFERENCE_OCTAVE as i32;
    reference_hz * 2f64.powi(steps)
}
