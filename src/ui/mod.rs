// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Terminal UI for the piano.
//!
//! Provides a ratatui-based terminal interface with the control help, a
//! keyboard diagram and the octave/recording status line.

mod keyboard;
mod status;

pub use keyboard::KeyboardWidget;
pub use status::StatusWidget;

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

use crate::audio::ToneSink;
use crate::control::{symbol_for, InputRouter, RouterEvent};
use crate::music::{Octave, PitchClass, PitchTable};
use crate::recording::Note;
use crate::timing::{Clock, Waiter};

/// How long a status message stays on screen
const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

/// Display state, refreshed from the router after every key
#[derive(Debug, Clone)]
pub struct UiState {
    /// Current octave
    pub octave: Octave,
    /// Whether a take is being recorded
    pub recording: bool,
    /// Notes in the take being recorded
    pub pending_notes: usize,
    /// Notes in the last finished take
    pub saved_notes: usize,
    /// Name of the last finished take
    pub recording_name: Option<String>,
    /// Label of the last sounded note (e.g. "A#4")
    pub last_note: Option<String>,
    /// Key to highlight on the diagram
    pub active_pitch: Option<PitchClass>,
    /// Whether playback is running
    pub playing: bool,
    /// Notes sounded so far in the current playback
    pub playback_notes: usize,
    /// Command help as (keys, description)
    pub controls: Vec<(String, String)>,
    /// Status message
    pub status_message: Option<String>,
    /// Status message timestamp
    pub status_time: Option<Instant>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            octave: Octave::default(),
            recording: false,
            pending_notes: 0,
            saved_notes: 0,
            recording_name: None,
            last_note: None,
            active_pitch: None,
            playing: false,
            playback_notes: 0,
            controls: Vec::new(),
            status_message: None,
            status_time: None,
        }
    }
}

impl UiState {
    /// Set a status message that will be displayed temporarily
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_time = Some(Instant::now());
    }

    /// Clear expired status message
    pub fn clear_expired_status(&mut self) {
        if let Some(time) = self.status_time {
            if time.elapsed() > STATUS_TIMEOUT {
                self.status_message = None;
                self.status_time = None;
            }
        }
    }

    /// Copy octave, session and help text from the router
    pub fn sync<S, C, W>(&mut self, router: &InputRouter<S, C, W>)
    where
        S: ToneSink,
        C: Clock,
        W: Waiter,
    {
        let session = router.session();
        let last = session.last_recording();

        self.octave = router.octave();
        self.recording = session.is_active();
        self.pending_notes = session.pending_len();
        self.saved_notes = last.len();
        self.recording_name = last.name().map(str::to_string);

        if self.controls.is_empty() {
            self.controls = router.keyboard().help_lines();
        }
    }

    /// Update messages and highlights for a dispatched event
    pub fn apply(&mut self, event: &RouterEvent) {
        match event {
            RouterEvent::RecordingStarted => {
                self.recording = true;
                self.pending_notes = 0;
                self.set_status("RECORDING IN PROGRESS");
            }
            RouterEvent::RecordingStopped { notes } => {
                self.recording = false;
                self.saved_notes = *notes;
                self.set_status(format!("Recording Saved: {} notes", notes));
            }
            RouterEvent::PlaybackFinished(summary) => {
                self.playing = false;
                self.active_pitch = None;
                if summary.failed > 0 {
                    self.set_status(format!("Done! ({} notes failed)", summary.failed));
                } else {
                    self.set_status("Done!");
                }
            }
            RouterEvent::PlaybackEmpty => {
                self.playing = false;
                self.set_status("No recording found!");
            }
            RouterEvent::OctaveChanged(octave) => {
                self.octave = *octave;
                self.set_status(format!("Octave: {}", octave));
            }
            RouterEvent::OctaveAtLimit(octave) => {
                self.set_status(format!("Octave {} is the limit", octave));
            }
            RouterEvent::NotePlayed {
                pitch,
                octave,
                recorded,
                ..
            } => {
                self.last_note = Some(format!("{}{}", pitch, octave));
                self.active_pitch = Some(*pitch);
                if *recorded {
                    self.pending_notes += 1;
                }
            }
            RouterEvent::Quit | RouterEvent::Ignored => {}
        }
    }

    /// Mark playback as started
    pub fn begin_playback(&mut self) {
        self.playing = true;
        self.playback_notes = 0;
        self.set_status("Playing recording...");
    }

    /// Show a note sounded during playback
    pub fn playback_note(&mut self, note: &Note) {
        self.playback_notes += 1;
        self.last_note = Some(format!("{}{}", note.name(), note.octave));
        self.active_pitch = Some(note.pitch);
    }
}

/// Terminal UI application
pub struct App {
    /// Display state
    state: UiState,
    /// Terminal handle
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Header title
    title: String,
    /// Target frame rate
    frame_rate: u32,
}

impl App {
    /// Take over the terminal
    pub fn new(title: impl Into<String>, frame_rate: u32) -> io::Result<Self> {
        let title = title.into();

        enable_raw_mode()?;
        let terminal = or_restore(open_terminal(&title), || {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
        })?;

        Ok(Self {
            state: UiState::default(),
            terminal,
            title,
            frame_rate: frame_rate.clamp(1, 120),
        })
    }

    /// Mutable display state
    pub fn state_mut(&mut self) -> &mut UiState {
        &mut self.state
    }

    /// Wait up to one frame for a key press and translate it
    pub fn poll_symbol(&self) -> io::Result<Option<char>> {
        let timeout = Duration::from_millis(1000 / self.frame_rate as u64);
        if !event::poll(timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => Ok(symbol_for(&key)),
            _ => Ok(None),
        }
    }

    /// Draw the UI
    pub fn draw(&mut self) -> io::Result<()> {
        self.state.clear_expired_status();
        let state = &self.state;
        let title = self.title.as_str();

        self.terminal.draw(|frame| {
            let area = frame.area();

            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3), // Header
                    Constraint::Length(9), // Controls
                    Constraint::Length(6), // Keyboard
                    Constraint::Length(3), // Status
                    Constraint::Min(0),
                    Constraint::Length(1), // Status bar
                ])
                .split(area);

            render_header(frame, chunks[0], title);
            render_controls(frame, chunks[1], &state.controls);

            let keyboard = KeyboardWidget::new(PitchTable::new().entries())
                .active(state.active_pitch)
                .block(Block::default().borders(Borders::ALL).title(" Keys "));
            frame.render_widget(keyboard, chunks[2]);

            let status = StatusWidget::new(state)
                .block(Block::default().borders(Borders::ALL).title(" Session "));
            frame.render_widget(status, chunks[3]);

            render_status_bar(frame, chunks[5], state);
        })?;

        Ok(())
    }

    /// Cleanup terminal on drop
    fn cleanup(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Enter the alternate screen and build the terminal
fn open_terminal(title: &str) -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle(title))?;
    Terminal::new(CrosstermBackend::new(stdout))
}

/// Pass `result` through, running `restore` first when it failed.
///
/// Raw mode is already on while the terminal is opened, and `Drop` never
/// runs for an `App` that was not built.
fn or_restore<T>(result: io::Result<T>, restore: impl FnOnce()) -> io::Result<T> {
    if result.is_err() {
        restore();
    }
    result
}

/// Render header section
fn render_header(frame: &mut Frame, area: Rect, title: &str) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let header = Line::from(Span::styled(
        format!("=== {} ===", title),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(header).centered(), inner);
}

/// Render command help
fn render_controls(frame: &mut Frame, area: Rect, controls: &[(String, String)]) {
    let block = Block::default().borders(Borders::ALL).title(" Controls ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let key_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let mut lines = vec![Line::from(vec![
        Span::styled(format!("  {:<8}", "Z-M"), key_style),
        Span::raw("Play notes (S D G H J for sharps)"),
    ])];
    for (keys, description) in controls {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<8}", keys), key_style),
            Span::raw(description.clone()),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render status bar
fn render_status_bar(frame: &mut Frame, area: Rect, state: &UiState) {
    let text = if let Some(ref msg) = state.status_message {
        let color = if state.recording { Color::Red } else { Color::Yellow };
        Span::styled(format!(" {}", msg), Style::default().fg(color))
    } else {
        Span::styled(
            " Z-M: Notes | +/-: Octave | R: Record | P: Play | Q: Quit",
            Style::default().fg(Color::DarkGray),
        )
    };

    frame.render_widget(Paragraph::new(text), area);
}
