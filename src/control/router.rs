// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Input routing.
//!
//! The [`InputRouter`] owns all piano state (octave, recording session,
//! playback engine, tone sink) and turns each key symbol into either a
//! command or a played note. Nothing a key does halts the session.

use std::time::Duration;

use tracing::{debug, info, warn};

use super::keyboard::KeyboardController;
use super::ControlAction;
use crate::audio::ToneSink;
use crate::music::{Octave, PitchClass, PitchTable};
use crate::playback::{PlaybackEngine, PlaybackError, PlaybackSummary, DEFAULT_TONE_DURATION_MS};
use crate::recording::{Note, RecordingSession};
use crate::timing::{Clock, Waiter};

/// What a dispatched symbol did
#[derive(Debug, Clone, PartialEq)]
pub enum RouterEvent {
    /// Quit requested
    Quit,
    /// Recording started
    RecordingStarted,
    /// Recording stopped with this many notes
    RecordingStopped {
        /// Notes in the finished take
        notes: usize,
    },
    /// Last recording played back
    PlaybackFinished(PlaybackSummary),
    /// Playback requested with nothing recorded
    PlaybackEmpty,
    /// Octave moved to this value
    OctaveChanged(Octave),
    /// Octave shift refused, already at this bound
    OctaveAtLimit(Octave),
    /// A note key was played
    NotePlayed {
        /// Pitch class played
        pitch: PitchClass,
        /// Octave played in
        octave: Octave,
        /// Sounding frequency
        frequency: f64,
        /// Whether the note went into the active take
        recorded: bool,
    },
    /// Not a command and not a note key
    Ignored,
}

impl RouterEvent {
    /// Check if the loop should end
    pub fn is_quit(&self) -> bool {
        matches!(self, RouterEvent::Quit)
    }
}

/// Owner of the piano state; dispatches key symbols
pub struct InputRouter<S, C, W>
where
    S: ToneSink,
    C: Clock,
    W: Waiter,
{
    keyboard: KeyboardController,
    table: PitchTable,
    octave: Octave,
    session: RecordingSession<C>,
    engine: PlaybackEngine<W>,
    sink: S,
}

impl<S, C, W> InputRouter<S, C, W>
where
    S: ToneSink,
    C: Clock,
    W: Waiter,
{
    /// Create a router with default octave and tone duration
    pub fn new(sink: S, clock: C, waiter: W) -> Self {
        Self::with_settings(
            sink,
            clock,
            waiter,
            Octave::default(),
            Duration::from_millis(DEFAULT_TONE_DURATION_MS),
        )
    }

    /// Create a router with a starting octave and tone duration
    pub fn with_settings(
        sink: S,
        clock: C,
        waiter: W,
        octave: Octave,
        tone_duration: Duration,
    ) -> Self {
        Self {
            keyboard: KeyboardController::with_defaults(),
            table: PitchTable::new(),
            octave,
            session: RecordingSession::new(clock),
            engine: PlaybackEngine::with_tone_duration(waiter, tone_duration),
            sink,
        }
    }

    /// Current octave
    pub fn octave(&self) -> Octave {
        self.octave
    }

    /// Recording session
    pub fn session(&self) -> &RecordingSession<C> {
        &self.session
    }

    /// Keyboard bindings
    pub fn keyboard(&self) -> &KeyboardController {
        &self.keyboard
    }

    /// Tone length for live and replayed notes
    pub fn tone_duration(&self) -> Duration {
        self.engine.tone_duration()
    }

    /// Classify a symbol. Commands win over note keys.
    pub fn classify(&self, symbol: char) -> ControlAction {
        if let Some(action) = self.keyboard.get_action(symbol) {
            return *action;
        }

        match self.table.lookup(symbol.to_ascii_lowercase()) {
            Some(entry) => ControlAction::PlayNote(entry.pitch),
            None => ControlAction::None,
        }
    }

    /// Dispatch a symbol
    pub fn dispatch(&mut self, symbol: char) -> RouterEvent {
        self.dispatch_with(symbol, |_| {})
    }

    /// Dispatch a symbol, reporting notes sounded during playback to `on_note`
    pub fn dispatch_with<F>(&mut self, symbol: char, on_note: F) -> RouterEvent
    where
        F: FnMut(&Note),
    {
        let action = self.classify(symbol);
        debug!(?symbol, ?action, "dispatch");

        match action {
            ControlAction::Quit => RouterEvent::Quit,
            ControlAction::ToggleRecord => self.toggle_recording(),
            ControlAction::PlayRecording => self.play_recording(on_note),
            ControlAction::OctaveUp => self.shift_octave(Octave::increment),
            ControlAction::OctaveDown => self.shift_octave(Octave::decrement),
            ControlAction::PlayNote(pitch) => self.play_note(pitch),
            ControlAction::None => RouterEvent::Ignored,
        }
    }

    fn shift_octave(&mut self, step: fn(&mut Octave) -> bool) -> RouterEvent {
        if step(&mut self.octave) {
            debug!(octave = %self.octave, "octave changed");
            RouterEvent::OctaveChanged(self.octave)
        } else {
            RouterEvent::OctaveAtLimit(self.octave)
        }
    }

    fn toggle_recording(&mut self) -> RouterEvent {
        if self.session.is_active() {
            let notes = self.session.stop().map(|r| r.len()).unwrap_or(0);
            RouterEvent::RecordingStopped { notes }
        } else {
            self.session.start();
            RouterEvent::RecordingStarted
        }
    }

    fn play_recording<F>(&mut self, on_note: F) -> RouterEvent
    where
        F: FnMut(&Note),
    {
        let recording = self.session.last_recording_shared();

        match self.engine.play_with(&recording, &mut self.sink, on_note) {
            Ok(summary) => RouterEvent::PlaybackFinished(summary),
            Err(PlaybackError::EmptyRecording) => {
                info!("playback requested with no recording");
                RouterEvent::PlaybackEmpty
            }
        }
    }

    fn play_note(&mut self, pitch: PitchClass) -> RouterEvent {
        let entry = self.table.entry(pitch);
        let frequency = entry.frequency_at(self.octave);
        let recorded = self.session.record(entry.pitch, self.octave, frequency);

        if let Err(e) = self.sink.emit(frequency, self.engine.tone_duration()) {
            warn!(note = entry.name(), frequency, "tone failed: {}", e);
        }

        RouterEvent::NotePlayed {
            pitch: entry.pitch,
            octave: self.octave,
            frequency,
            recorded,
        }
    }
}
