//! The application page layout

use super::node::{Fragment, LayoutNode, Slot};
use anyhow::{Context, Result};
use serde_json::json;
use std::path::Path;

/// Built-in page: sidebar, main section with the form and user list, trust bar
pub fn default_page() -> Vec<LayoutNode> {
    vec![
        LayoutNode::new("layoutSidebar")
            .prop("width", "20%")
            .with_nodes(vec![
                LayoutNode::new("header").prop("title", "Sidebar Header"),
                LayoutNode::new("sidebar").prop("items", json!(["item 1", "item 2", "item 3"])),
                LayoutNode::new("footer").prop("text", "Sidebar Footer"),
            ]),
        LayoutNode::new("layoutSection").with_nodes(vec![
            LayoutNode::new("header").prop("title", "App Header"),
            LayoutNode::new("paper")
                .with_fragment(Fragment::Slots(vec![Slot::PostForm, Slot::UserList])),
            LayoutNode::new("footer").prop("text", "App Footer"),
        ]),
        LayoutNode::new("componentTrustBar")
            .prop("title", "Trust Bar")
            .prop(
                "description",
                "This is a trust bar to showcase how the page generator works without a layout",
            )
            .prop("width", 30),
    ]
}

/// Read a page from a JSON array of nodes
pub fn load_page(path: &Path) -> Result<Vec<LayoutNode>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read page file {}", path.display()))?;
    let nodes = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse page file {}", path.display()))?;
    Ok(nodes)
}
