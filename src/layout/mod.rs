//! Declarative page layout
//!
//! [`LayoutNode`]s are resolved by a [`LayoutResolver`] against a
//! [`ComponentRegistry`] into a [`RenderTree`] that the UI paints.

mod builtin;
mod element;
mod node;
mod page;
mod registry;
mod resolver;

pub use element::{
    parse_color, parse_size, prop_str, prop_strings, Body, Chrome, Element, RenderNode,
    RenderTree, SkippedNode,
};
pub use node::{Children, Fragment, LayoutNode, Properties, Slot};
pub use page::{default_page, load_page};
pub use registry::{ComponentRegistry, ComponentRenderer, ContainerRenderer};
pub use resolver::{LayoutError, LayoutResolver};
