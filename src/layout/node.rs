//! Declarative layout nodes
//!
//! A page is a list of [`LayoutNode`]s. On disk a node keeps the shape of
//! the original page config:
//!
//! ```json
//! { "type": "layoutSection", "props": { "width": "80%" }, "components": [ ... ] }
//! { "type": "paper", "children": { "slots": ["post_form", "user_list"] } }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form renderer properties, passed through verbatim
pub type Properties = Map<String, Value>;

/// Live widget the page painter draws into a fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    PostForm,
    UserList,
}

/// Pre-built content handed to a leaf renderer untouched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fragment {
    /// Literal text lines
    Text(Vec<String>),
    /// Named live widgets, stacked top to bottom
    Slots(Vec<Slot>),
}

/// Children of a layout node
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Children {
    #[default]
    None,
    /// Child nodes, only meaningful under a container
    Nodes(Vec<LayoutNode>),
    /// Opaque fragment, only meaningful for a leaf
    Fragment(Fragment),
}

impl Children {
    pub fn nodes(&self) -> &[LayoutNode] {
        match self {
            Self::Nodes(nodes) => nodes,
            _ => &[],
        }
    }

    pub fn fragment(&self) -> Option<&Fragment> {
        match self {
            Self::Fragment(fragment) => Some(fragment),
            _ => None,
        }
    }
}

/// One entry of a page layout
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RawLayoutNode", into = "RawLayoutNode")]
pub struct LayoutNode {
    /// Registry key, either a container or a leaf kind
    pub kind: String,
    pub properties: Properties,
    pub children: Children,
}

impl LayoutNode {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    /// Set a property
    pub fn prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn with_nodes(mut self, nodes: Vec<LayoutNode>) -> Self {
        self.children = Children::Nodes(nodes);
        self
    }

    pub fn with_fragment(mut self, fragment: Fragment) -> Self {
        self.children = Children::Fragment(fragment);
        self
    }
}

/// Serialized form of [`LayoutNode`]
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawLayoutNode {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    props: Properties,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    components: Option<Vec<LayoutNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    children: Option<Fragment>,
}

impl From<RawLayoutNode> for LayoutNode {
    fn from(raw: RawLayoutNode) -> Self {
        // `components` wins when a node carries both
        let children = match (raw.components, raw.children) {
            (Some(nodes), _) => Children::Nodes(nodes),
            (None, Some(fragment)) => Children::Fragment(fragment),
            (None, None) => Children::None,
        };
        Self {
            kind: raw.kind,
            properties: raw.props,
            children,
        }
    }
}

impl From<LayoutNode> for RawLayoutNode {
    fn from(node: LayoutNode) -> Self {
        let (components, children) = match node.children {
            Children::None => (None, None),
            Children::Nodes(nodes) => (Some(nodes), None),
            Children::Fragment(fragment) => (None, Some(fragment)),
        };
        Self {
            kind: node.kind,
            props: node.properties,
            components,
            children,
        }
    }
}
