//! Painter for the resolved page layout

use super::{forms, user_list};
use crate::app::App;
use crate::layout::{Body, Element, Fragment, Slot};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw the top-level nodes side by side
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let nodes = &app.page.nodes;
    if nodes.is_empty() {
        draw_empty(frame, area);
        return;
    }

    let areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(nodes.iter().map(|n| n.element.chrome.width))
        .split(area);

    for (node, area) in nodes.iter().zip(areas.iter()) {
        draw_element(frame, *area, &node.element, app);
    }
}

fn draw_element(frame: &mut Frame, area: Rect, element: &Element, app: &App) {
    let chrome = &element.chrome;
    let inner = if chrome.bordered {
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(chrome.accent));
        if let Some(title) = &chrome.title {
            block = block.title(format!(" {title} "));
        }
        let inner = block.inner(area);
        frame.render_widget(block, area);
        inner
    } else {
        area
    };

    match &element.body {
        Body::Stack {
            direction,
            children,
        } => {
            let constraints = children.iter().map(|child| match direction {
                Direction::Horizontal => child.chrome.width,
                Direction::Vertical => child.chrome.height,
            });
            let areas = Layout::default()
                .direction(*direction)
                .constraints(constraints)
                .split(inner);
            for (child, area) in children.iter().zip(areas.iter()) {
                draw_element(frame, *area, child, app);
            }
        }
        Body::Text { heading, lines } => {
            let mut text = Vec::with_capacity(lines.len() + 1);
            if let Some(heading) = heading {
                text.push(Line::from(Span::styled(
                    heading.as_str(),
                    Style::default()
                        .fg(chrome.accent)
                        .add_modifier(Modifier::BOLD),
                )));
            }
            text.extend(lines.iter().map(|l| Line::from(l.as_str())));
            frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), inner);
        }
        Body::Fragment(Fragment::Text(lines)) => {
            let text: Vec<Line> = lines.iter().map(|l| Line::from(l.as_str())).collect();
            frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }), inner);
        }
        Body::Fragment(Fragment::Slots(slots)) => {
            let areas = Layout::default()
                .direction(Direction::Vertical)
                .constraints(slots.iter().map(|slot| slot_constraint(*slot)))
                .split(inner);
            for (slot, area) in slots.iter().zip(areas.iter()) {
                draw_slot(frame, *area, *slot, app);
            }
        }
        Body::Empty => {}
    }
}

fn slot_constraint(slot: Slot) -> Constraint {
    match slot {
        Slot::PostForm => Constraint::Min(forms::POST_FORM_MIN_HEIGHT),
        Slot::UserList => Constraint::Fill(1),
    }
}

fn draw_slot(frame: &mut Frame, area: Rect, slot: Slot, app: &App) {
    match slot {
        Slot::PostForm => forms::draw_post_form(frame, area, app),
        Slot::UserList => user_list::draw(frame, area, app),
    }
}

fn draw_empty(frame: &mut Frame, area: Rect) {
    let paragraph = Paragraph::new("The page layout is empty.")
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}
