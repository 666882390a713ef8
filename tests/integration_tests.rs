// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Integration tests for keypiano
//!
//! These tests drive the router the way the key loop does, with a virtual
//! clock standing in for wall time and an in-memory sink for the speaker.

use std::fs;
use std::time::Duration;

use keypiano::audio::{AudioError, MemorySink, ToneSink};
use keypiano::config::PianoConfig;
use keypiano::control::{InputRouter, RouterEvent};
use keypiano::music::{Octave, PitchClass};
use keypiano::playback::PlaybackEngine;
use keypiano::recording::RecordingSession;
use keypiano::timing::{Clock, VirtualClock};

type TestRouter = InputRouter<MemorySink, VirtualClock, VirtualClock>;

fn setup() -> (TestRouter, MemorySink, VirtualClock) {
    let clock = VirtualClock::new();
    let sink = MemorySink::with_clock(clock.clone());
    let router = InputRouter::new(sink.clone(), clock.clone(), clock.clone());
    (router, sink, clock)
}

/// Play keys with the given gaps (ms before each key)
fn play(router: &mut TestRouter, clock: &VirtualClock, keys: &[(u64, char)]) -> Vec<RouterEvent> {
    keys.iter()
        .map(|&(gap, key)| {
            clock.advance(gap);
            router.dispatch(key)
        })
        .collect()
}

#[test]
fn test_record_and_replay_session() {
    let (mut router, sink, clock) = setup();

    assert_eq!(router.dispatch('r'), RouterEvent::RecordingStarted);
    play(&mut router, &clock, &[(0, 'z'), (500, 'x'), (700, 'c')]);
    assert_eq!(router.dispatch('r'), RouterEvent::RecordingStopped { notes: 3 });

    let recording = router.session().last_recording();
    let stamps: Vec<u64> = recording.notes().iter().map(|n| n.timestamp_ms).collect();
    assert_eq!(stamps, vec![0, 500, 1200]);

    sink.clear();
    clock.clear_waits();
    let before = clock.now_ms();

    match router.dispatch('p') {
        RouterEvent::PlaybackFinished(summary) => {
            assert_eq!(summary.notes_played, 3);
            assert_eq!(summary.delays_ms, vec![0, 500, 700]);
            assert_eq!(summary.waited_ms(), 1200);
        }
        other => panic!("unexpected event: {:?}", other),
    }

    let tones = sink.tones();
    let freqs: Vec<f64> = tones.iter().map(|t| t.frequency).collect();
    assert_eq!(freqs, vec![261.63, 293.66, 329.63]);
    let offsets: Vec<u64> = tones.iter().map(|t| t.at_ms - before).collect();
    assert_eq!(offsets, vec![0, 500, 1200]);
    assert!(tones.iter().all(|t| t.duration == Duration::from_millis(200)));
}

#[test]
fn test_playback_without_recording() {
    let (mut router, sink, clock) = setup();

    assert_eq!(router.dispatch('p'), RouterEvent::PlaybackEmpty);
    assert!(sink.is_empty());
    assert!(clock.waits().is_empty());

    // An empty take replaces nothing useful either
    router.dispatch('r');
    router.dispatch('r');
    assert_eq!(router.dispatch('P'), RouterEvent::PlaybackEmpty);
}

#[test]
fn test_octave_recorded_with_note() {
    let (mut router, sink, clock) = setup();

    router.dispatch('r');
    play(&mut router, &clock, &[(0, 'n'), (100, '+'), (100, 'n'), (100, '-'), (0, '-'), (100, 'n')]);
    router.dispatch('r');

    let notes = router.session().last_recording().notes().to_vec();
    let octaves: Vec<u8> = notes.iter().map(|n| n.octave.value()).collect();
    assert_eq!(octaves, vec![4, 5, 3]);

    sink.clear();
    router.dispatch('+');
    router.dispatch('+');
    router.dispatch('p');

    // Playback keeps the recorded frequencies, not the current octave
    let freqs: Vec<f64> = sink.tones().iter().map(|t| t.frequency).collect();
    assert_eq!(freqs, vec![440.0, 880.0, 220.0]);
}

#[test]
fn test_new_take_replaces_last() {
    let (mut router, _, clock) = setup();

    router.dispatch('r');
    play(&mut router, &clock, &[(0, 'z'), (50, 'x')]);
    router.dispatch('r');

    play(&mut router, &clock, &[(1000, 'm')]);

    router.dispatch('r');
    play(&mut router, &clock, &[(300, 'j')]);
    assert_eq!(router.dispatch('r'), RouterEvent::RecordingStopped { notes: 1 });

    let last = router.session().last_recording();
    assert_eq!(last.name(), Some("Take 2"));
    assert_eq!(last.notes()[0].pitch, PitchClass::As);
    assert_eq!(last.notes()[0].timestamp_ms, 300);
}

#[test]
fn test_commands_never_recorded() {
    let (mut router, _, clock) = setup();

    router.dispatch('r');
    play(&mut router, &clock, &[(10, '+'), (10, '-'), (10, 'a'), (10, '?'), (10, 'b')]);
    router.dispatch('r');

    let notes = router.session().last_recording().notes();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].pitch, PitchClass::G);
    assert_eq!(notes[0].timestamp_ms, 50);
}

#[test]
fn test_playback_is_repeatable() {
    let (mut router, sink, clock) = setup();

    router.dispatch('r');
    play(&mut router, &clock, &[(0, 's'), (250, 'd'), (250, 'g')]);
    router.dispatch('r');

    let first = router.dispatch('p');
    let first_tones: Vec<f64> = sink.tones().iter().map(|t| t.frequency).collect();
    sink.clear();
    let second = router.dispatch('p');
    let second_tones: Vec<f64> = sink.tones().iter().map(|t| t.frequency).collect();

    assert_eq!(first, second);
    assert_eq!(first_tones, second_tones);
}

struct DeafSink;

impl ToneSink for DeafSink {
    fn emit(&mut self, _frequency: f64, _duration: Duration) -> Result<(), AudioError> {
        Err(AudioError::NoDevice)
    }
}

#[test]
fn test_sink_failures_never_stop_the_session() {
    let clock = VirtualClock::new();
    let mut router = InputRouter::new(DeafSink, clock.clone(), clock.clone());

    router.dispatch('r');
    clock.advance(100);
    assert!(matches!(router.dispatch('z'), RouterEvent::NotePlayed { recorded: true, .. }));
    router.dispatch('r');

    match router.dispatch('p') {
        RouterEvent::PlaybackFinished(summary) => {
            assert_eq!(summary.notes_played, 1);
            assert_eq!(summary.failed, 1);
        }
        other => panic!("unexpected event: {:?}", other),
    }
    assert!(router.dispatch('q').is_quit());
}

#[test]
fn test_session_and_engine_standalone() {
    let clock = VirtualClock::starting_at(10_000);
    let mut session = RecordingSession::new(clock.clone());

    session.start();
    session.record(PitchClass::E, Octave::default(), 329.63);
    clock.advance(400);
    session.record(PitchClass::F, Octave::default(), 349.23);
    let take = session.stop().expect("take");

    let mut engine = PlaybackEngine::new(clock.clone());
    let mut sink = MemorySink::new();
    let summary = engine.play(&take, &mut sink).unwrap();

    assert_eq!(summary.delays_ms, vec![0, 400]);
    assert_eq!(clock.waits(), vec![Duration::from_millis(400)]);
    assert_eq!(sink.len(), 2);
}

#[test]
fn test_config_drives_router() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("piano.toml");
    fs::write(&path, "[playback]\ntone_duration_ms = 120\nstart_octave = 2\n").unwrap();

    let config = PianoConfig::load(&path).unwrap();
    let clock = VirtualClock::new();
    let sink = MemorySink::new();
    let mut router = InputRouter::with_settings(
        sink.clone(),
        clock.clone(),
        clock,
        config.playback.octave(),
        config.playback.tone_duration(),
    );

    router.dispatch('n');
    let tones = sink.tones();
    let tone = &tones[0];
    assert_eq!(tone.frequency, 110.0);
    assert_eq!(tone.duration, Duration::from_millis(120));
}
