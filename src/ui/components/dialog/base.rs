//! Centered modal dialog

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Columns between the border and the text on each side
const PADDING: u16 = 2;

pub struct DialogConfig<'a> {
    pub title: &'a str,
    /// Title and border color
    pub accent: Color,
    /// Message content, may contain `\n`
    pub message: &'a str,
    /// Bottom line, e.g. "Press Enter to dismiss"
    pub hint: Option<Vec<Span<'a>>>,
    pub max_width: u16,
}

/// Render a dialog centered on the frame
pub fn render_dialog(frame: &mut Frame, config: DialogConfig) {
    let area = frame.area();
    let chrome = PADDING * 2 + 2;
    let max_width = config.max_width.min(area.width).max(chrome + 1);
    let wrapped = wrap_text(config.message, usize::from(max_width - chrome));

    let content_width = wrapped
        .iter()
        .map(|l| l.chars().count())
        .chain(std::iter::once(config.title.chars().count()))
        .max()
        .unwrap_or(0);
    let width = (u16::try_from(content_width).unwrap_or(u16::MAX).saturating_add(chrome))
        .min(max_width)
        .min(area.width);

    // title + blank + message (+ blank + hint) + borders
    let hint_rows = if config.hint.is_some() { 2 } else { 0 };
    let rows = u16::try_from(wrapped.len()).unwrap_or(u16::MAX);
    let height = rows.saturating_add(4 + hint_rows).min(area.height);

    let dialog_area = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    };

    let mut content = vec![
        Line::from(Span::styled(
            config.title,
            Style::default()
                .fg(config.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    content.extend(wrapped.into_iter().map(Line::from));
    if let Some(hint) = config.hint {
        content.push(Line::from(""));
        content.push(Line::from(hint));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(config.accent))
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(dialog_area);
    let text_area = Rect {
        x: inner.x + PADDING.min(inner.width),
        width: inner.width.saturating_sub(PADDING * 2),
        ..inner
    };

    frame.render_widget(Clear, dialog_area);
    frame.render_widget(block, dialog_area);
    frame.render_widget(Paragraph::new(content), text_area);
}

/// Greedy word wrap; words longer than `max_width` get a line of their own
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let needed = current.chars().count() + word.chars().count() + 1;
            if !current.is_empty() && needed > max_width {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wrap_breaks_on_words() {
        assert_eq!(
            wrap_text("failed to fetch users from server", 12),
            vec!["failed to", "fetch users", "from server"]
        );
    }

    #[test]
    fn test_wrap_keeps_explicit_newlines() {
        assert_eq!(wrap_text("one\n\ntwo", 20), vec!["one", "", "two"]);
    }

    #[test]
    fn test_wrap_long_word_stays_whole() {
        assert_eq!(
            wrap_text("a supercalifragilistic b", 5),
            vec!["a", "supercalifragilistic", "b"]
        );
    }

    #[test]
    fn test_wrap_empty() {
        assert_eq!(wrap_text("", 10), vec![""]);
    }
}
