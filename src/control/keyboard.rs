// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Keyboard command bindings.
//!
//! Command keys are checked before the pitch table, so a symbol bound here
//! never plays a note.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::ControlAction;

/// Symbol produced for Ctrl+C, routed as quit
pub const QUIT_SYMBOL: char = 'q';

/// A keyboard binding (symbol to action)
#[derive(Debug, Clone)]
pub struct KeyBinding {
    /// Key symbol as typed
    pub symbol: char,
    /// The action to perform
    pub action: ControlAction,
    /// Description for help display
    pub description: String,
}

impl KeyBinding {
    /// Create a new key binding
    pub fn new(symbol: char, action: ControlAction, description: impl Into<String>) -> Self {
        Self {
            symbol,
            action,
            description: description.into(),
        }
    }
}

/// Keyboard controller with configurable bindings
pub struct KeyboardController {
    bindings: HashMap<char, KeyBinding>,
}

impl KeyboardController {
    /// Create an empty keyboard controller
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Create a keyboard controller with default bindings
    pub fn with_defaults() -> Self {
        let mut controller = Self::new();
        controller.add_default_bindings();
        controller
    }

    /// Add default keyboard bindings
    fn add_default_bindings(&mut self) {
        // Letter commands answer to both cases
        for symbol in ['q', 'Q'] {
            self.add(KeyBinding::new(symbol, ControlAction::Quit, "Quit"));
        }

        for symbol in ['r', 'R'] {
            self.add(KeyBinding::new(symbol, ControlAction::ToggleRecord, "Start/Stop Recording"));
        }

        for symbol in ['p', 'P'] {
            self.add(KeyBinding::new(symbol, ControlAction::PlayRecording, "Play Last Recording"));
        }

        self.add(KeyBinding::new('+', ControlAction::OctaveUp, "Octave Up"));
        self.add(KeyBinding::new('-', ControlAction::OctaveDown, "Octave Down"));
    }

    /// Add a key binding
    pub fn add(&mut self, binding: KeyBinding) {
        self.bindings.insert(binding.symbol, binding);
    }

    /// Get action for a symbol
    pub fn get_action(&self, symbol: char) -> Option<&ControlAction> {
        self.bindings.get(&symbol).map(|b| &b.action)
    }

    /// One help line per action, in a stable order.
    ///
    /// Symbols sharing an action are joined (e.g. "R" for `r`/`R`).
    pub fn help_lines(&self) -> Vec<(String, String)> {
        let mut lines: Vec<(String, String)> = Vec::new();

        for action in ControlAction::ALL {
            let mut symbols: Vec<char> = self
                .bindings
                .values()
                .filter(|b| b.action == action)
                .map(|b| b.symbol.to_ascii_uppercase())
                .collect();
            symbols.sort_unstable();
            symbols.dedup();

            if let Some(binding) = self.bindings.values().find(|b| b.action == action) {
                let keys: Vec<String> = symbols.iter().map(|c| c.to_string()).collect();
                lines.push((keys.join("/"), binding.description.clone()));
            }
        }

        lines
    }
}

impl Default for KeyboardController {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Translate a terminal key event into a symbol.
///
/// Only presses of printable keys produce symbols; Ctrl+C becomes the quit
/// symbol so the raw-mode terminal can still be left.
pub fn symbol_for(event: &KeyEvent) -> Option<char> {
    if event.kind != KeyEventKind::Press {
        return None;
    }

    match event.code {
        KeyCode::Char('c') | KeyCode::Char('C')
            if event.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            Some(QUIT_SYMBOL)
        }
        KeyCode::Char(_) if event.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            None
        }
        KeyCode::Char(c) => Some(c),
        _ => None,
    }
}
