//! Resolution of layout nodes against a [`ComponentRegistry`]
//!
//! For every top-level node, in order:
//!
//! 1. a container kind resolves its child nodes against the leaf registry
//!    only and receives the outputs together with its properties;
//! 2. otherwise a leaf kind receives its properties and fragment;
//! 3. otherwise the node produces nothing.
//!
//! Nesting is one level deep: a container child that is itself a container
//! kind is unresolved.

use super::element::{RenderNode, RenderTree, SkippedNode};
use super::node::{Children, LayoutNode};
use super::registry::ComponentRegistry;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("no renderer registered for: {}", format_skipped(.0))]
    Unresolved(Vec<SkippedNode>),
}

fn format_skipped(skipped: &[SkippedNode]) -> String {
    skipped
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Resolves layout nodes into a [`RenderTree`]
#[derive(Debug, Clone, Copy)]
pub struct LayoutResolver<'a> {
    registry: &'a ComponentRegistry,
    strict: bool,
}

impl<'a> LayoutResolver<'a> {
    pub fn new(registry: &'a ComponentRegistry) -> Self {
        Self {
            registry,
            strict: false,
        }
    }

    /// Make [`LayoutResolver::resolve_page`] fail on unresolved kinds
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Resolve, skipping unknown kinds
    pub fn resolve(&self, nodes: &[LayoutNode]) -> RenderTree {
        let mut tree = RenderTree::default();

        for node in nodes {
            if let Some(container) = self.registry.container(&node.kind) {
                if let Children::Fragment(_) = node.children {
                    tracing::debug!(kind = %node.kind, "fragment on a container is ignored");
                }
                let children = self.resolve_children(node, &mut tree.skipped);
                tree.nodes.push(RenderNode {
                    kind: node.kind.clone(),
                    element: container.render(&node.properties, children),
                });
            } else if let Some(component) = self.registry.component(&node.kind) {
                tree.nodes.push(RenderNode {
                    kind: node.kind.clone(),
                    element: component.render(&node.properties, node.children.fragment()),
                });
            } else {
                tracing::debug!(kind = %node.kind, "no renderer for layout node, skipping");
                tree.skipped.push(SkippedNode {
                    kind: node.kind.clone(),
                    parent: None,
                });
            }
        }

        tree
    }

    fn resolve_children(
        &self,
        container: &LayoutNode,
        skipped: &mut Vec<SkippedNode>,
    ) -> Vec<RenderNode> {
        container
            .children
            .nodes()
            .iter()
            .filter_map(|child| match self.registry.component(&child.kind) {
                Some(component) => Some(RenderNode {
                    kind: child.kind.clone(),
                    element: component.render(&child.properties, child.children.fragment()),
                }),
                None => {
                    tracing::debug!(
                        kind = %child.kind,
                        parent = %container.kind,
                        "no leaf renderer for container child, skipping"
                    );
                    skipped.push(SkippedNode {
                        kind: child.kind.clone(),
                        parent: Some(container.kind.clone()),
                    });
                    None
                }
            })
            .collect()
    }

    /// Resolve, failing with every unresolved kind
    pub fn resolve_strict(&self, nodes: &[LayoutNode]) -> Result<RenderTree, LayoutError> {
        let tree = self.resolve(nodes);
        if tree.skipped.is_empty() {
            Ok(tree)
        } else {
            Err(LayoutError::Unresolved(tree.skipped))
        }
    }

    /// Resolve in the configured mode
    pub fn resolve_page(&self, nodes: &[LayoutNode]) -> Result<RenderTree, LayoutError> {
        if self.strict {
            self.resolve_strict(nodes)
        } else {
            Ok(self.resolve(nodes))
        }
    }
}
