//! User list panel

use super::widgets::render_scrollable_list;
use crate::app::App;
use crate::state::{Focus, QueryState, User};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

const LIST_TITLE: &str = "User List";

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.state.focus == Focus::UserList;
    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let title = if app.is_fetching_users() && app.state.users.data().is_some() {
        format!(" {LIST_TITLE} (refreshing) ")
    } else {
        format!(" {LIST_TITLE} ")
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    match &app.state.users {
        QueryState::Idle | QueryState::Loading => {
            frame.render_widget(Paragraph::new("Loading...").block(block), area);
        }
        QueryState::Failed(_) => {
            let text = vec![
                Line::from(Span::styled(
                    "Error fetching data...",
                    Style::default().fg(Color::Red),
                )),
                Line::from(Span::styled(
                    "F5: retry",
                    Style::default().fg(Color::DarkGray),
                )),
            ];
            frame.render_widget(Paragraph::new(text).block(block), area);
        }
        QueryState::Ready(users) if users.is_empty() => {
            let empty = Paragraph::new("No users.")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(empty, area);
        }
        QueryState::Ready(users) => {
            let items: Vec<ListItem> = users.iter().map(user_item).collect();
            let list = List::new(items).block(block).highlight_style(if is_focused {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            });
            render_scrollable_list(frame, area, list, app.state.selected_user);
        }
    }
}

fn user_item(user: &User) -> ListItem<'_> {
    let label = Style::default().add_modifier(Modifier::BOLD);
    let row = |name: &'static str, value: String| {
        Line::from(vec![Span::styled(format!("{name}: "), label), Span::raw(value)])
    };
    ListItem::new(vec![
        row("ID", user.id.to_string()),
        row("Name", user.name.clone()),
        row("Username", user.username.clone()),
        row("Email", user.email.clone()),
        row("Phone", user.phone.clone()),
        Line::from(Span::styled("─".repeat(24), Style::default().fg(Color::DarkGray))),
    ])
}
