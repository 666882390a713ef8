// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Live note capture.
//!
//! A [`RecordingSession`] timestamps every note played while it is active,
//! relative to the moment recording started, and keeps the last finished
//! take for playback.

use std::sync::Arc;

use tracing::{debug, info, trace};

use crate::music::{Octave, PitchClass};
use crate::timing::Clock;

/// A recorded note
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    /// Pitch class played
    pub pitch: PitchClass,
    /// Octave the note was played in
    pub octave: Octave,
    /// Sounding frequency in Hz
    pub frequency: f64,
    /// Milliseconds since recording start
    pub timestamp_ms: u64,
}

impl Note {
    /// Create a new note
    pub fn new(pitch: PitchClass, octave: Octave, frequency: f64, timestamp_ms: u64) -> Self {
        Self {
            pitch,
            octave,
            frequency,
            timestamp_ms,
        }
    }

    /// Note name label (e.g. "C#")
    pub fn name(&self) -> &'static str {
        self.pitch.name()
    }
}

/// A finished take: notes in the order they were played
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Recording {
    name: Option<String>,
    notes: Vec<Note>,
}

impl Recording {
    /// Create an unnamed recording.
    ///
    /// Timestamps must be non-decreasing.
    pub fn new(notes: Vec<Note>) -> Self {
        debug_assert!(notes.windows(2).all(|w| w[0].timestamp_ms <= w[1].timestamp_ms));
        Self { name: None, notes }
    }

    /// Set the display name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Display name, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Notes in play order
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Number of notes
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Check if there is nothing to play
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Timestamp of the last note
    pub fn length_ms(&self) -> u64 {
        self.notes.last().map(|n| n.timestamp_ms).unwrap_or(0)
    }
}

/// Recording state
#[derive(Debug, Clone, PartialEq)]
pub enum RecordingState {
    /// Not capturing
    Idle,
    /// Capturing notes
    Active {
        /// Clock reading when recording started
        start_ms: u64,
        /// Notes captured so far
        buffer: Vec<Note>,
    },
}

/// Captures timestamped notes between `start` and `stop`
pub struct RecordingSession<C: Clock> {
    clock: C,
    state: RecordingState,
    last: Arc<Recording>,
    takes: usize,
}

impl<C: Clock> RecordingSession<C> {
    /// Create an idle session reading time from `clock`
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            state: RecordingState::Idle,
            last: Arc::new(Recording::default()),
            takes: 0,
        }
    }

    /// Check if capturing
    pub fn is_active(&self) -> bool {
        matches!(self.state, RecordingState::Active { .. })
    }

    /// Start capturing. Does nothing if already active.
    pub fn start(&mut self) {
        if self.is_active() {
            debug!("start ignored, already recording");
            return;
        }

        let start_ms = self.clock.now_ms();
        self.state = RecordingState::Active {
            start_ms,
            buffer: Vec::new(),
        };
        info!(start_ms, "recording started");
    }

    /// Stop capturing and keep the take as the last recording.
    ///
    /// Returns the finished recording, or `None` if nothing was active.
    pub fn stop(&mut self) -> Option<Arc<Recording>> {
        match std::mem::replace(&mut self.state, RecordingState::Idle) {
            RecordingState::Idle => None,
            RecordingState::Active { buffer, .. } => {
                self.takes += 1;
                let recording = Recording::new(buffer).named(format!("Take {}", self.takes));
                info!(notes = recording.len(), length_ms = recording.length_ms(), "recording stopped");
                self.last = Arc::new(recording);
                Some(Arc::clone(&self.last))
            }
        }
    }

    /// Capture a note at the current time.
    ///
    /// Returns false, dropping the note, when the session is idle.
    pub fn record(&mut self, pitch: PitchClass, octave: Octave, frequency: f64) -> bool {
        let now = self.clock.now_ms();

        match &mut self.state {
            RecordingState::Idle => {
                trace!(%pitch, "record while idle dropped");
                false
            }
            RecordingState::Active { start_ms, buffer } => {
                let previous = buffer.last().map(|n| n.timestamp_ms).unwrap_or(0);
                let timestamp_ms = now.saturating_sub(*start_ms).max(previous);
                buffer.push(Note::new(pitch, octave, frequency, timestamp_ms));
                trace!(%pitch, timestamp_ms, "note recorded");
                true
            }
        }
    }

    /// Last finished recording (empty if none)
    pub fn last_recording(&self) -> &Recording {
        &self.last
    }

    /// Shared handle to the last finished recording
    pub fn last_recording_shared(&self) -> Arc<Recording> {
        Arc::clone(&self.last)
    }

    /// Notes captured so far in the active take
    pub fn pending_len(&self) -> usize {
        match &self.state {
            RecordingState::Idle => 0,
            RecordingState::Active { buffer, .. } => buffer.len(),
        }
    }

    /// Number of takes finished so far
    pub fn take_count(&self) -> usize {
        self.takes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timing::VirtualClock;

    fn session_at(ms: u64) -> (RecordingSession<VirtualClock>, VirtualClock) {
        let clock = VirtualClock::starting_at(ms);
        (RecordingSession::new(clock.clone()), clock)
    }

    #[test]
    fn test_session_creation() {
        let (session, _) = session_at(0);
        assert!(!session.is_active());
        assert!(session.last_recording().is_empty());
        assert_eq!(session.take_count(), 0);
    }

    #[test]
    fn test_record_round_trip() {
        let (mut session, clock) = session_at(10_000);

        session.start();
        assert!(session.record(PitchClass::C, Octave::default(), 261.63));
        clock.advance(500);
        assert!(session.record(PitchClass::E, Octave::default(), 329.63));
        session.stop();

        let recording = session.last_recording();
        assert_eq!(recording.len(), 2);
        assert_eq!(recording.notes()[0].name(), "C");
        assert_eq!(recording.notes()[0].timestamp_ms, 0);
        assert_eq!(recording.notes()[1].name(), "E");
        assert_eq!(recording.notes()[1].timestamp_ms, 500);
        assert_eq!(recording.name(), Some("Take 1"));
    }

    #[test]
    fn test_record_while_idle_dropped() {
        let (mut session, _) = session_at(0);

        assert!(!session.record(PitchClass::A, Octave::default(), 440.0));
        assert!(session.last_recording().is_empty());

        session.start();
        session.record(PitchClass::C, Octave::default(), 261.63);
        session.stop();

        assert!(!session.record(PitchClass::D, Octave::default(), 293.66));
        assert_eq!(session.last_recording().len(), 1);
    }

    #[test]
    fn test_stop_twice_keeps_recording() {
        let (mut session, clock) = session_at(0);

        session.start();
        session.record(PitchClass::G, Octave::new(5), 784.0);
        clock.advance(120);
        session.record(PitchClass::A, Octave::new(5), 880.0);

        assert!(session.stop().is_some());
        let first = session.last_recording().clone();

        assert!(session.stop().is_none());
        assert_eq!(session.last_recording(), &first);
        assert_eq!(session.take_count(), 1);
    }

    #[test]
    fn test_start_while_active_keeps_buffer() {
        let (mut session, clock) = session_at(0);

        session.start();
        session.record(PitchClass::C, Octave::default(), 261.63);
        clock.advance(300);
        session.start();
        session.record(PitchClass::D, Octave::default(), 293.66);
        session.stop();

        let notes = session.last_recording().notes();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[1].timestamp_ms, 300);
    }

    #[test]
    fn test_new_take_replaces_previous() {
        let (mut session, clock) = session_at(0);

        session.start();
        session.record(PitchClass::C, Octave::default(), 261.63);
        session.record(PitchClass::E, Octave::default(), 329.63);
        session.stop();

        clock.advance(5_000);
        session.start();
        assert_eq!(session.pending_len(), 0);
        clock.advance(40);
        session.record(PitchClass::B, Octave::default(), 493.88);
        assert_eq!(session.pending_len(), 1);

        // Previous take stays playable until this one finishes
        assert_eq!(session.last_recording().len(), 2);

        session.stop();
        let recording = session.last_recording();
        assert_eq!(recording.len(), 1);
        assert_eq!(recording.notes()[0].pitch, PitchClass::B);
        assert_eq!(recording.notes()[0].timestamp_ms, 40);
        assert_eq!(recording.name(), Some("Take 2"));
    }

    #[test]
    fn test_timestamps_non_decreasing() {
        let (mut session, clock) = session_at(1_000);

        session.start();
        clock.advance(200);
        session.record(PitchClass::C, Octave::default(), 261.63);
        // A clock that steps backwards must not reorder the take
        clock.set(1_100);
        session.record(PitchClass::D, Octave::default(), 293.66);
        clock.set(500);
        session.record(PitchClass::E, Octave::default(), 329.63);
        session.stop();

        let stamps: Vec<u64> = session
            .last_recording()
            .notes()
            .iter()
            .map(|n| n.timestamp_ms)
            .collect();
        assert_eq!(stamps, vec![200, 200, 200]);
    }

    #[test]
    fn test_shared_recording_survives_new_take() {
        let (mut session, _) = session_at(0);

        session.start();
        session.record(PitchClass::F, Octave::default(), 349.23);
        let finished = session.stop().expect("active take");

        session.start();
        session.stop();

        assert_eq!(finished.len(), 1);
        assert!(session.last_recording().is_empty());
    }
}
