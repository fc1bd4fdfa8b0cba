//! Kind-to-renderer registries

use super::builtin;
use super::element::{Element, RenderNode};
use super::node::{Fragment, Properties};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Renders a container around its already-resolved children
pub trait ContainerRenderer: Send + Sync {
    fn render(&self, properties: &Properties, children: Vec<RenderNode>) -> Element;
}

impl<F> ContainerRenderer for F
where
    F: Fn(&Properties, Vec<RenderNode>) -> Element + Send + Sync,
{
    fn render(&self, properties: &Properties, children: Vec<RenderNode>) -> Element {
        self(properties, children)
    }
}

/// Renders a leaf
pub trait ComponentRenderer: Send + Sync {
    fn render(&self, properties: &Properties, fragment: Option<&Fragment>) -> Element;
}

impl<F> ComponentRenderer for F
where
    F: Fn(&Properties, Option<&Fragment>) -> Element + Send + Sync,
{
    fn render(&self, properties: &Properties, fragment: Option<&Fragment>) -> Element {
        self(properties, fragment)
    }
}

/// Container and leaf renderers by kind
#[derive(Clone, Default)]
pub struct ComponentRegistry {
    containers: HashMap<String, Arc<dyn ContainerRenderer>>,
    components: HashMap<String, Arc<dyn ComponentRenderer>>,
}

static GLOBAL: OnceLock<ComponentRegistry> = OnceLock::new();

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in renderer
    pub fn builtin() -> Self {
        Self::new()
            .with_container("layoutSection", builtin::layout_section)
            .with_container("layoutSidebar", builtin::layout_sidebar)
            .with_component("header", builtin::header)
            .with_component("footer", builtin::footer)
            .with_component("sidebar", builtin::sidebar)
            .with_component("paper", builtin::paper)
            .with_component("componentTrustBar", builtin::component_trust_bar)
            .with_component("trustBar", builtin::trust_bar)
    }

    /// Process-wide built-in registry, created on first use
    pub fn global() -> &'static ComponentRegistry {
        GLOBAL.get_or_init(Self::builtin)
    }

    /// Register a container; replaces an earlier one of the same kind
    pub fn with_container(
        mut self,
        kind: impl Into<String>,
        renderer: impl ContainerRenderer + 'static,
    ) -> Self {
        self.containers.insert(kind.into(), Arc::new(renderer));
        self
    }

    /// Register a leaf; replaces an earlier one of the same kind
    pub fn with_component(
        mut self,
        kind: impl Into<String>,
        renderer: impl ComponentRenderer + 'static,
    ) -> Self {
        self.components.insert(kind.into(), Arc::new(renderer));
        self
    }

    pub fn container(&self, kind: &str) -> Option<&Arc<dyn ContainerRenderer>> {
        self.containers.get(kind)
    }

    pub fn component(&self, kind: &str) -> Option<&Arc<dyn ComponentRenderer>> {
        self.components.get(kind)
    }
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut containers: Vec<_> = self.containers.keys().collect();
        let mut components: Vec<_> = self.components.keys().collect();
        containers.sort();
        components.sort();
        f.debug_struct("ComponentRegistry")
            .field("containers", &containers)
            .field("components", &components)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::element::{Body, Chrome};
    use ratatui::style::Color;

    fn text(line: &'static str) -> impl Fn(&Properties, Option<&Fragment>) -> Element {
        move |_, _| {
            Element::new(
                Chrome::new(Color::Reset),
                Body::Text {
                    heading: None,
                    lines: vec![line.to_string()],
                },
            )
        }
    }

    #[test]
    fn test_builtin_kinds() {
        let registry = ComponentRegistry::builtin();
        for kind in ["layoutSection", "layoutSidebar"] {
            assert!(registry.container(kind).is_some(), "{kind}");
            assert!(registry.component(kind).is_none(), "{kind}");
        }
        for kind in ["header", "footer", "sidebar", "paper", "componentTrustBar", "trustBar"] {
            assert!(registry.component(kind).is_some(), "{kind}");
        }
        assert!(registry.component("landing").is_none());
    }

    #[test]
    fn test_last_registration_wins() {
        let registry = ComponentRegistry::new()
            .with_component("header", text("first"))
            .with_component("header", text("second"));

        let element = registry
            .component("header")
            .unwrap()
            .render(&Properties::new(), None);
        assert_eq!(
            element.body,
            Body::Text {
                heading: None,
                lines: vec!["second".to_string()]
            }
        );
    }

    #[test]
    fn test_global_is_shared() {
        let a = ComponentRegistry::global();
        let b = ComponentRegistry::global();
        assert!(std::ptr::eq(a, b));
        assert!(a.container("layoutSection").is_some());
    }

    #[test]
    fn test_debug_lists_sorted_kinds() {
        let registry = ComponentRegistry::new()
            .with_component("footer", text("f"))
            .with_component("header", text("h"));
        let debug = format!("{registry:?}");
        assert!(debug.contains(r#"components: ["footer", "header"]"#));
    }
}
