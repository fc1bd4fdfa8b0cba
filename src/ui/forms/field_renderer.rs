//! Field rendering utilities for forms

use crate::state::FieldBinding;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows for a single-line field (borders + text)
pub const TEXT_FIELD_HEIGHT: u16 = 3;
/// Minimum rows for a multiline field
pub const MULTILINE_FIELD_HEIGHT: u16 = 5;
/// Row below each field reserved for its error
pub const ERROR_ROW_HEIGHT: u16 = 1;

/// Space a field plus its error row asks for
pub fn field_constraint(binding: &FieldBinding) -> Constraint {
    if binding.is_multiline {
        Constraint::Min(MULTILINE_FIELD_HEIGHT + ERROR_ROW_HEIGHT)
    } else {
        Constraint::Length(TEXT_FIELD_HEIGHT + ERROR_ROW_HEIGHT)
    }
}

/// Draw a bound field with its error message underneath
///
/// `has_focus` is whether the form itself holds keyboard focus.
pub fn draw_field(frame: &mut Frame, area: Rect, binding: &FieldBinding, has_focus: bool) {
    let is_active = binding.is_active && has_focus;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(ERROR_ROW_HEIGHT)])
        .split(area);

    let border_style = if binding.error.is_some() {
        Style::default().fg(Color::Red)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let text_style = if is_active {
        Style::default()
    } else {
        Style::default().fg(Color::DarkGray)
    };

    // `split` keeps a trailing empty line so the cursor follows a typed newline
    let mut lines: Vec<Line> = binding
        .display_value()
        .split('\n')
        .map(|l| Line::from(Span::styled(l, text_style)))
        .collect();
    if is_active {
        if let Some(last) = lines.last_mut() {
            last.spans
                .push(Span::styled("▌", Style::default().fg(Color::Cyan)));
        }
    }

    let block = Block::default()
        .title(format!(" {} ", binding.label))
        .borders(Borders::ALL)
        .border_style(border_style);
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block),
        chunks[0],
    );

    if let Some(error) = binding.error {
        let error_line = Paragraph::new(Span::styled(error, Style::default().fg(Color::Red)));
        frame.render_widget(error_line, chunks[1]);
    }
}

/// Draw a single line of key hints
pub fn draw_help_text(frame: &mut Frame, area: Rect, text: &str) {
    let help = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}
