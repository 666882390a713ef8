// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Control system for keyboard input.
//!
//! This module provides:
//! - Command key bindings and terminal key translation
//! - The input router that owns the piano state

pub mod keyboard;
pub mod router;

pub use keyboard::{symbol_for, KeyBinding, KeyboardController, QUIT_SYMBOL};
pub use router::{InputRouter, RouterEvent};

use crate::music::PitchClass;

/// Action a key symbol maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    /// Not a command and not a note
    None,
    /// Quit application
    Quit,
    /// Start or stop recording
    ToggleRecord,
    /// Play the last finished recording
    PlayRecording,
    /// Shift up one octave
    OctaveUp,
    /// Shift down one octave
    OctaveDown,
    /// Play a note
    PlayNote(PitchClass),
}

impl ControlAction {
    /// Command actions in help display order
    pub const ALL: [ControlAction; 5] = [
        ControlAction::ToggleRecord,
        ControlAction::PlayRecording,
        ControlAction::OctaveUp,
        ControlAction::OctaveDown,
        ControlAction::Quit,
    ];
}
