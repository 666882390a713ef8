// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Session status widget.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

use super::UiState;

/// Status widget for octave, recording and playback state
pub struct StatusWidget<'a> {
    state: &'a UiState,
    block: Option<Block<'a>>,
}

impl<'a> StatusWidget<'a> {
    /// Create a new status widget
    pub fn new(state: &'a UiState) -> Self {
        Self { state, block: None }
    }

    /// Set the block wrapper
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn recording_span(&self) -> Span<'static> {
        let state = self.state;
        if state.recording {
            Span::styled(
                format!("● REC  {} notes", state.pending_notes),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )
        } else if state.saved_notes > 0 {
            let name = state.recording_name.as_deref().unwrap_or("Take");
            Span::styled(
                format!("■ {}: {} notes", name, state.saved_notes),
                Style::default().fg(Color::Yellow),
            )
        } else {
            Span::styled("■ No recording", Style::default().fg(Color::DarkGray))
        }
    }

    fn playback_span(&self) -> Span<'static> {
        let state = self.state;
        if state.playing {
            Span::styled(
                format!("▶ PLAY  {}/{}", state.playback_notes, state.saved_notes),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled("", Style::default())
        }
    }
}

impl Widget for StatusWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = if let Some(block) = self.block.clone() {
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(12), // Octave
                Constraint::Length(2),
                Constraint::Length(24), // Recording
                Constraint::Length(2),
                Constraint::Length(12), // Last note
                Constraint::Length(2),
                Constraint::Min(0), // Playback
            ])
            .split(area);

        let octave = Line::from(vec![
            Span::raw("Octave "),
            Span::styled(
                self.state.octave.to_string(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
        ]);
        Paragraph::new(octave).render(chunks[0], buf);

        Paragraph::new(self.recording_span()).render(chunks[2], buf);

        let last = match &self.state.last_note {
            Some(name) => Span::styled(format!("♪ {}", name), Style::default().fg(Color::Magenta)),
            None => Span::styled("♪ -", Style::default().fg(Color::DarkGray)),
        };
        Paragraph::new(last).render(chunks[4], buf);

        Paragraph::new(self.playback_span()).render(chunks[6], buf);
    }
}
