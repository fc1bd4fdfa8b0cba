//! Built-in container and leaf renderers

use super::element::{prop_str, prop_strings, Body, Chrome, Element, RenderNode};
use super::node::{Fragment, Properties};
use ratatui::layout::{Constraint, Direction};
use ratatui::style::Color;

const SECTION_ACCENT: Color = Color::Gray;
const SIDEBAR_ACCENT: Color = Color::Green;
const HEADER_ACCENT: Color = Color::Cyan;
const FOOTER_ACCENT: Color = Color::DarkGray;
const PAPER_ACCENT: Color = Color::Magenta;
const TRUST_BAR_ACCENT: Color = Color::Yellow;

/// Header and footer rows including borders
const HEADER_HEIGHT: u16 = 4;
const FOOTER_HEIGHT: u16 = 3;

fn stack(chrome: Chrome, children: Vec<RenderNode>) -> Element {
    Element::new(
        chrome,
        Body::Stack {
            direction: Direction::Vertical,
            children: children.into_iter().map(|child| child.element).collect(),
        },
    )
}

fn text(chrome: Chrome, heading: Option<&str>, lines: Vec<String>) -> Element {
    Element::new(
        chrome,
        Body::Text {
            heading: heading.map(str::to_string),
            lines,
        },
    )
}

/// `layoutSection`: vertical stack without a frame
pub fn layout_section(properties: &Properties, children: Vec<RenderNode>) -> Element {
    let chrome = Chrome::new(SECTION_ACCENT)
        .borderless()
        .with_properties(properties);
    stack(chrome, children)
}

/// `layoutSidebar`: framed vertical stack
pub fn layout_sidebar(properties: &Properties, children: Vec<RenderNode>) -> Element {
    let chrome = Chrome::new(SIDEBAR_ACCENT)
        .width(Constraint::Percentage(20))
        .with_properties(properties);
    stack(chrome, children)
}

/// `header`: `title` with an optional `subtitle`
pub fn header(properties: &Properties, _fragment: Option<&Fragment>) -> Element {
    let chrome = Chrome::new(HEADER_ACCENT)
        .height(Constraint::Length(HEADER_HEIGHT))
        .with_properties(properties);
    let lines = prop_str(properties, "subtitle")
        .map(|s| vec![s.to_string()])
        .unwrap_or_default();
    text(chrome, Some(prop_str(properties, "title").unwrap_or_default()), lines)
}

/// `footer`: a single `text` line
pub fn footer(properties: &Properties, _fragment: Option<&Fragment>) -> Element {
    let chrome = Chrome::new(FOOTER_ACCENT)
        .height(Constraint::Length(FOOTER_HEIGHT))
        .with_properties(properties);
    let lines = vec![prop_str(properties, "text").unwrap_or_default().to_string()];
    text(chrome, None, lines)
}

/// `sidebar`: bulleted `items`
pub fn sidebar(properties: &Properties, _fragment: Option<&Fragment>) -> Element {
    let chrome = Chrome::new(SIDEBAR_ACCENT).with_properties(properties);
    let items = prop_strings(properties, "items")
        .into_iter()
        .map(|item| format!("• {item}"))
        .collect();
    text(chrome, Some("Sidebar"), items)
}

/// `paper`: frames whatever fragment it was given
pub fn paper(properties: &Properties, fragment: Option<&Fragment>) -> Element {
    let chrome = Chrome::new(PAPER_ACCENT).with_properties(properties);
    let body = fragment.cloned().map_or(Body::Empty, Body::Fragment);
    Element::new(chrome, body)
}

/// `componentTrustBar`: `title` and `description`
pub fn component_trust_bar(properties: &Properties, _fragment: Option<&Fragment>) -> Element {
    let chrome = Chrome::new(TRUST_BAR_ACCENT).with_properties(properties);
    let lines = prop_str(properties, "description")
        .map(|d| vec![d.to_string()])
        .unwrap_or_default();
    text(chrome, prop_str(properties, "title"), lines)
}

/// `trustBar`: optional `title`/`subtitle` and a row of `images`
pub fn trust_bar(properties: &Properties, _fragment: Option<&Fragment>) -> Element {
    let chrome = Chrome::new(TRUST_BAR_ACCENT).with_properties(properties);
    let mut lines = Vec::new();
    if let Some(subtitle) = prop_str(properties, "subtitle") {
        lines.push(subtitle.to_string());
    }
    let images = prop_strings(properties, "images");
    if !images.is_empty() {
        lines.push(images.join("  ·  "));
    }
    text(chrome, prop_str(properties, "title"), lines)
}
