// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Recording playback.
//!
//! Replays a [`Recording`] note by note, waiting out the gap between
//! consecutive timestamps before each tone. Tone length is the fixed
//! engine duration, never taken from the recording.

use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::audio::ToneSink;
use crate::recording::{Note, Recording};
use crate::timing::Waiter;

/// Default tone length in milliseconds, shared with live playing
pub const DEFAULT_TONE_DURATION_MS: u64 = 200;

/// Playback errors
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum PlaybackError {
    /// Nothing has been recorded yet
    #[error("No recording found!")]
    EmptyRecording,
}

/// What a finished playback did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackSummary {
    /// Notes handed to the sink
    pub notes_played: usize,
    /// Notes the sink failed to sound
    pub failed: usize,
    /// Gap before each note, in play order (0 when none was needed)
    pub delays_ms: Vec<u64>,
}

impl PlaybackSummary {
    /// Total time spent waiting between notes
    pub fn waited_ms(&self) -> u64 {
        self.delays_ms.iter().sum()
    }
}

/// Replays recordings with their original pacing
pub struct PlaybackEngine<W: Waiter> {
    waiter: W,
    tone_duration: Duration,
}

impl<W: Waiter> PlaybackEngine<W> {
    /// Create an engine using the default tone duration
    pub fn new(waiter: W) -> Self {
        Self::with_tone_duration(waiter, Duration::from_millis(DEFAULT_TONE_DURATION_MS))
    }

    /// Create an engine with a custom tone duration
    pub fn with_tone_duration(waiter: W, tone_duration: Duration) -> Self {
        Self {
            waiter,
            tone_duration,
        }
    }

    /// Tone length used for every note
    pub fn tone_duration(&self) -> Duration {
        self.tone_duration
    }

    /// Play a recording
    pub fn play<S>(&mut self, recording: &Recording, sink: &mut S) -> Result<PlaybackSummary, PlaybackError>
    where
        S: ToneSink + ?Sized,
    {
        self.play_with(recording, sink, |_| {})
    }

    /// Play a recording, calling `on_note` after each note is sounded
    pub fn play_with<S, F>(
        &mut self,
        recording: &Recording,
        sink: &mut S,
        mut on_note: F,
    ) -> Result<PlaybackSummary, PlaybackError>
    where
        S: ToneSink + ?Sized,
        F: FnMut(&Note),
    {
        if recording.is_empty() {
            return Err(PlaybackError::EmptyRecording);
        }

        info!(
            name = recording.name().unwrap_or("untitled"),
            notes = recording.len(),
            "playback started"
        );

        let mut summary = PlaybackSummary::default();
        let mut last_timestamp = 0u64;

        for note in recording.notes() {
            let delay = note.timestamp_ms.saturating_sub(last_timestamp);
            if delay > 0 {
                self.waiter.wait(Duration::from_millis(delay));
            }
            summary.delays_ms.push(delay);

            if let Err(e) = sink.emit(note.frequency, self.tone_duration) {
                warn!(note = note.name(), "tone failed: {}", e);
                summary.failed += 1;
            }
            summary.notes_played += 1;
            debug!(note = note.name(), delay, "played");

            last_timestamp = note.timestamp_ms;
            on_note(note);
        }

        info!(
            notes = summary.notes_played,
            failed = summary.failed,
            waited_ms = summary.waited_ms(),
            "playback finished"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioError, MemorySink};
    use crate::music::{Octave, PitchClass};
    use crate::timing::VirtualClock;

    fn recording(stamps: &[u64]) -> Recording {
        let notes = stamps
            .iter()
            .enumerate()
            .map(|(i, &ts)| {
                let pitch = PitchClass::ALL[i % 12];
                Note::new(pitch, Octave::default(), 261.63 + i as f64, ts)
            })
            .collect();
        Recording::new(notes)
    }

    #[test]
    fn test_playback_delays() {
        let clock = VirtualClock::new();
        let mut sink = MemorySink::with_clock(clock.clone());
        let mut engine = PlaybackEngine::new(clock.clone());

        let summary = engine.play(&recording(&[0, 500, 1200]), &mut sink).unwrap();

        assert_eq!(summary.delays_ms, vec![0, 500, 700]);
        assert_eq!(summary.waited_ms(), 1200);
        assert_eq!(
            clock.waits(),
            vec![Duration::from_millis(500), Duration::from_millis(700)]
        );

        let stamps: Vec<u64> = sink.tones().iter().map(|t| t.at_ms).collect();
        assert_eq!(stamps, vec![0, 500, 1200]);
    }

    #[test]
    fn test_first_note_waits_for_its_offset() {
        let clock = VirtualClock::new();
        let mut sink = MemorySink::new();
        let mut engine = PlaybackEngine::new(clock.clone());

        let summary = engine.play(&recording(&[300, 300, 450]), &mut sink).unwrap();

        assert_eq!(summary.delays_ms, vec![300, 0, 150]);
        assert_eq!(
            clock.waits(),
            vec![Duration::from_millis(300), Duration::from_millis(150)]
        );
        assert_eq!(sink.len(), 3);
    }

    #[test]
    fn test_empty_recording() {
        let clock = VirtualClock::new();
        let mut sink = MemorySink::new();
        let mut engine = PlaybackEngine::new(clock.clone());

        let result = engine.play(&Recording::default(), &mut sink);

        assert_eq!(result, Err(PlaybackError::EmptyRecording));
        assert!(sink.is_empty());
        assert!(clock.waits().is_empty());
    }

    #[test]
    fn test_fixed_tone_duration() {
        let clock = VirtualClock::new();
        let mut sink = MemorySink::new();
        let mut engine = PlaybackEngine::with_tone_duration(clock, Duration::from_millis(150));

        engine.play(&recording(&[0, 10, 5_000]), &mut sink).unwrap();

        assert!(sink
            .tones()
            .iter()
            .all(|t| t.duration == Duration::from_millis(150)));
    }

    #[test]
    fn test_same_recording_same_pacing() {
        let take = recording(&[0, 90, 91, 400, 2_000]);
        let clock = VirtualClock::new();
        let mut engine = PlaybackEngine::new(clock.clone());

        let first = engine.play(&take, &mut MemorySink::new()).unwrap();
        let second = engine.play(&take, &mut MemorySink::new()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_observer_sees_notes_in_order() {
        let take = recording(&[0, 100, 200]);
        let mut engine = PlaybackEngine::new(VirtualClock::new());
        let mut seen = Vec::new();

        engine
            .play_with(&take, &mut MemorySink::new(), |note| seen.push(note.pitch))
            .unwrap();

        assert_eq!(seen, vec![PitchClass::C, PitchClass::Cs, PitchClass::D]);
    }

    struct FailingSink {
        calls: usize,
    }

    impl ToneSink for FailingSink {
        fn emit(&mut self, _frequency: f64, _duration: Duration) -> Result<(), AudioError> {
            self.calls += 1;
            Err(AudioError::NoDevice)
        }
    }

    #[test]
    fn test_sink_failure_does_not_stop_playback() {
        let mut engine = PlaybackEngine::new(VirtualClock::new());
        let mut sink = FailingSink { calls: 0 };

        let summary = engine.play(&recording(&[0, 50]), &mut sink).unwrap();

        assert_eq!(sink.calls, 2);
        assert_eq!(summary.notes_played, 2);
        assert_eq!(summary.failed, 2);
    }
}
