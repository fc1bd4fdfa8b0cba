//! The "Add a post" form panel

use super::field_renderer::{draw_field, draw_help_text, field_constraint};
use crate::app::App;
use crate::platform::SUBMIT_SHORTCUT;
use crate::state::{Focus, SubmissionStatus};
use crate::ui::components::{button_width, render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows the form needs to show every field
pub const POST_FORM_MIN_HEIGHT: u16 = 20;

const RESET_LABEL: &str = "Reset";

pub fn draw_post_form(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.post_form;
    let has_focus = app.state.focus == Focus::Form;

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", form.title()),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(if has_focus {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        });
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if form.status() == SubmissionStatus::Failed {
        draw_failure(frame, inner, has_focus);
        return;
    }

    let bindings = form.bindings();
    let mut constraints: Vec<Constraint> = bindings.iter().map(field_constraint).collect();
    constraints.push(Constraint::Length(BUTTON_HEIGHT));
    constraints.push(Constraint::Length(1));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (binding, area) in bindings.iter().zip(chunks.iter()) {
        draw_field(frame, *area, binding, has_focus);
    }

    let label = form.submit_label();
    let button_area = Rect {
        width: button_width(label).min(inner.width),
        ..chunks[bindings.len()]
    };
    render_button(
        frame,
        button_area,
        label,
        has_focus && form.is_submit_focused(),
        form.can_submit(),
    );

    draw_help_text(
        frame,
        chunks[bindings.len() + 1],
        &format!("Tab:next  {SUBMIT_SHORTCUT}:submit  Esc:user list  F5:refresh"),
    );
}

/// Replaces the fields after a failed submission
fn draw_failure(frame: &mut Frame, area: Rect, has_focus: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(BUTTON_HEIGHT),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    let message = Paragraph::new(Line::from(Span::styled(
        "Something went wrong!",
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(message, chunks[0]);

    let button_area = Rect {
        width: button_width(RESET_LABEL).min(area.width),
        ..chunks[1]
    };
    render_button(frame, button_area, RESET_LABEL, has_focus, true);
    draw_help_text(frame, chunks[2], "r/Enter:reset (values are kept)");
}
