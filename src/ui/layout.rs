//! Screen layout and status bar

use crate::app::App;
use crate::platform::SUBMIT_SHORTCUT;
use crate::state::{Focus, QueryState, SubmissionStatus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into page content and the status bar row
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Page
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    // Fetch status
    let indicator = match &app.state.users {
        QueryState::Failed(_) => Span::styled(" ○ ", Style::default().fg(Color::Red)),
        _ if app.is_fetching_users() => Span::styled(" ◌ ", Style::default().fg(Color::Yellow)),
        _ => Span::styled(" ● ", Style::default().fg(Color::Green)),
    };
    spans.push(indicator);
    spans.push(Span::styled(
        focus_hints(app),
        Style::default().fg(Color::DarkGray),
    ));

    let skipped = app.page.skipped.len();
    if skipped > 0 {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!("{skipped} layout node(s) skipped"),
            Style::default().fg(Color::Yellow),
        ));
    }

    let quit_hint = " ^C:quit ";
    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    let hint_width = quit_hint.len() as u16;
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(hint_width),
        width: hint_width.min(area.width),
        ..area
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Keyboard hints for the focused pane
fn focus_hints(app: &App) -> String {
    match app.state.focus {
        Focus::Form if app.post_form.status() == SubmissionStatus::Failed => {
            "r/Enter:reset  Esc:user list".to_string()
        }
        Focus::Form => format!("Tab:next field  {SUBMIT_SHORTCUT}:submit  Esc:user list"),
        Focus::UserList => "j/k:nav  F5:refresh  Esc:form".to_string(),
    }
}
