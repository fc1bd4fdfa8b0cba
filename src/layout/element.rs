//! Render output of the layout resolver

use super::node::{Fragment, Properties};
use ratatui::layout::{Constraint, Direction};
use ratatui::style::Color;
use serde_json::Value;
use std::fmt;

/// Frame around an element and the space it asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chrome {
    pub title: Option<String>,
    /// Size along a horizontal split
    pub width: Constraint,
    /// Size along a vertical split
    pub height: Constraint,
    pub accent: Color,
    pub bordered: bool,
}

impl Chrome {
    pub fn new(accent: Color) -> Self {
        Self {
            title: None,
            width: Constraint::Fill(1),
            height: Constraint::Fill(1),
            accent,
            bordered: true,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn width(mut self, width: Constraint) -> Self {
        self.width = width;
        self
    }

    pub fn height(mut self, height: Constraint) -> Self {
        self.height = height;
        self
    }

    pub fn borderless(mut self) -> Self {
        self.bordered = false;
        self
    }

    /// Apply the `width`, `height` and `accent` properties when present and valid
    pub fn with_properties(mut self, properties: &Properties) -> Self {
        if let Some(width) = properties.get("width").and_then(parse_size) {
            self.width = width;
        }
        if let Some(height) = properties.get("height").and_then(parse_size) {
            self.height = height;
        }
        if let Some(accent) = properties.get("accent").and_then(parse_color) {
            self.accent = accent;
        }
        self
    }
}

/// Content of an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// Child elements split along `direction`
    Stack {
        direction: Direction,
        children: Vec<Element>,
    },
    /// Optional bold heading followed by plain lines
    Text {
        heading: Option<String>,
        lines: Vec<String>,
    },
    Fragment(Fragment),
    Empty,
}

/// A renderer's output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub chrome: Chrome,
    pub body: Body,
}

impl Element {
    pub fn new(chrome: Chrome, body: Body) -> Self {
        Self { chrome, body }
    }
}

/// A resolved top-level node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderNode {
    pub kind: String,
    pub element: Element,
}

/// A node no renderer was registered for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedNode {
    pub kind: String,
    /// Container kind when the node was a container child
    pub parent: Option<String>,
}

impl fmt::Display for SkippedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.parent {
            Some(parent) => write!(f, "{parent} > {}", self.kind),
            None => f.write_str(&self.kind),
        }
    }
}

/// Ordered resolver output
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderTree {
    pub nodes: Vec<RenderNode>,
    pub skipped: Vec<SkippedNode>,
}

impl RenderTree {
    pub fn kinds(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.kind.as_str()).collect()
    }
}

/// String property
pub fn prop_str<'a>(properties: &'a Properties, key: &str) -> Option<&'a str> {
    properties.get(key).and_then(Value::as_str)
}

/// String array property; non-string entries are dropped
pub fn prop_strings(properties: &Properties, key: &str) -> Vec<String> {
    properties
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// `12` or `"12"` is a length in cells, `"20%"` a percentage
pub fn parse_size(value: &Value) -> Option<Constraint> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .and_then(|n| u16::try_from(n).ok())
            .map(Constraint::Length),
        Value::String(s) => {
            let s = s.trim();
            match s.strip_suffix('%') {
                Some(pct) => pct
                    .trim()
                    .parse::<u16>()
                    .ok()
                    .filter(|p| *p <= 100)
                    .map(Constraint::Percentage),
                None => s.parse::<u16>().ok().map(Constraint::Length),
            }
        }
        _ => None,
    }
}

/// Color names (`"red"`, `"light-blue"`), `"#rrggbb"` or indices
pub fn parse_color(value: &Value) -> Option<Color> {
    value.as_str().and_then(|s| s.parse::<Color>().ok())
}
