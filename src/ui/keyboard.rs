// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Piano keyboard diagram widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

use crate::music::{PitchClass, PitchEntry};

/// Widget drawing the note keys with the last played one highlighted
pub struct KeyboardWidget<'a> {
    entries: &'a [PitchEntry],
    active: Option<PitchClass>,
    block: Option<Block<'a>>,
}

impl<'a> KeyboardWidget<'a> {
    /// Create a new keyboard widget
    pub fn new(entries: &'a [PitchEntry]) -> Self {
        Self {
            entries,
            active: None,
            block: None,
        }
    }

    /// Highlight a pitch
    pub fn active(mut self, pitch: Option<PitchClass>) -> Self {
        self.active = pitch;
        self
    }

    /// Set the block wrapper
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn key_style(&self, entry: &PitchEntry) -> Style {
        if self.active == Some(entry.pitch) {
            Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD)
        } else if entry.pitch.is_sharp() {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::White)
        }
    }

    /// Diagram lines: sharps row, key body, naturals row, note names
    fn lines(&self) -> Vec<Line<'static>> {
        let mut sharps = vec![Span::raw(" ")];
        let mut naturals = vec![Span::raw(" ")];
        let mut names = vec![Span::raw(" ")];

        for entry in self.entries {
            let style = self.key_style(entry);
            let label = format!(" {} ", entry.symbol.to_ascii_uppercase());
            let name = format!("{:<3}", entry.name());

            if entry.pitch.is_sharp() {
                sharps.push(Span::styled(label, style));
                naturals.push(Span::raw("   "));
            } else {
                sharps.push(Span::raw("   "));
                naturals.push(Span::styled(label, style));
            }
            names.push(Span::styled(name, style));
        }

        let body: String = std::iter::repeat("|  ").take(self.entries.len()).collect::<String>() + "|";

        vec![
            Line::from(sharps),
            Line::from(Span::styled(body, Style::default().fg(Color::DarkGray))),
            Line::from(naturals),
            Line::from(names),
        ]
    }
}

impl Widget for KeyboardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = if let Some(block) = self.block.clone() {
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };

        Paragraph::new(self.lines()).render(area, buf);
    }
}
