//! Per-tag renderer overrides.
//!
//! A [`ComponentMap`] binds tag names to components. Keys are either a bare tag
//! (`code`) or a tag qualified by its parent (`pre.code`); the qualified
//! binding wins.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use vellum_mdx::{attrs, text, Element, MarkupNode};

/// Renders one node in place of the default markup for its tag.
pub trait Component: Send + Sync + fmt::Debug {
    /// Name this component is looked up by in configuration (e.g. "highlight")
    fn name(&self) -> &str;

    /// Render `node`, whose children have already been rendered.
    ///
    /// A fenced block reaches a `code` or `pre.code` binding as one
    /// [`MarkupNode::CodeBlock`], and the returned node replaces the whole
    /// `pre > code` pair. A renderer that wants the `pre` frame must emit it.
    fn render(&self, node: MarkupNode) -> MarkupNode;
}

/// Shared handle to a component.
pub type ComponentRef = Arc<dyn Component>;

/// Tag bindings, keyed by `tag` or `parent.tag`.
pub type ComponentMap = BTreeMap<String, ComponentRef>;

/// Render a tree bottom-up through the bound components.
///
/// A component's output is not looked up again.
pub fn apply_components(node: MarkupNode, components: &ComponentMap) -> MarkupNode {
    if components.is_empty() {
        return node;
    }

    let node = match node {
        MarkupNode::Element(mut el) => {
            el.children = apply_all(el.children, components);
            MarkupNode::Element(el)
        }
        MarkupNode::Link {
            href,
            parent,
            children,
        } => MarkupNode::Link {
            href,
            parent,
            children: apply_all(children, components),
        },
        leaf => leaf,
    };

    match lookup(&node, components) {
        Some(component) => component.render(node),
        None => node,
    }
}

fn apply_all(children: Vec<MarkupNode>, components: &ComponentMap) -> Vec<MarkupNode> {
    children
        .into_iter()
        .map(|child| apply_components(child, components))
        .collect()
}

fn lookup<'a>(node: &MarkupNode, components: &'a ComponentMap) -> Option<&'a ComponentRef> {
    let tag = node.lookup_tag()?;
    node.parent_name()
        .and_then(|parent| components.get(&format!("{}.{}", parent, tag)))
        .or_else(|| components.get(tag))
}

/// Returns the node unchanged.
#[derive(Debug, Default)]
pub struct Passthrough;

impl Component for Passthrough {
    fn name(&self) -> &str {
        "plain"
    }

    fn render(&self, node: MarkupNode) -> MarkupNode {
        node
    }
}

/// Wraps code blocks in a captioned `figure`.
#[derive(Debug, Default)]
pub struct HighlightedCode;

impl Component for HighlightedCode {
    fn name(&self) -> &str {
        "highlight"
    }

    fn render(&self, node: MarkupNode) -> MarkupNode {
        let MarkupNode::CodeBlock(block) = node else {
            return node;
        };

        let lang = block.language.as_str().to_string();
        let mut children = Vec::with_capacity(2);
        if !lang.is_empty() {
            children.push(MarkupNode::Element(Element::new(
                "figcaption",
                attrs([("className", "code-language")]),
                vec![text(lang.clone())],
            )));
        }
        children.push(MarkupNode::CodeBlock(block));

        MarkupNode::Element(Element::new(
            "figure",
            attrs([("className", "code-block"), ("data-language", lang.as_str())]),
            children,
        ))
    }
}

/// Opens absolute http(s) links in a new tab.
#[derive(Debug, Default)]
pub struct ExternalLink;

impl Component for ExternalLink {
    fn name(&self) -> &str {
        "external-link"
    }

    fn render(&self, node: MarkupNode) -> MarkupNode {
        match node {
            MarkupNode::Link {
                href,
                parent,
                children,
            } if href.starts_with("http://") || href.starts_with("https://") => {
                let mut anchor = Element::new(
                    "a",
                    attrs([
                        ("href", href.as_str()),
                        ("target", "_blank"),
                        ("rel", "noopener noreferrer"),
                    ]),
                    children,
                );
                anchor.parent = parent;
                MarkupNode::Element(anchor)
            }
            other => other,
        }
    }
}

/// Components available to configuration, by name.
#[derive(Debug, Default)]
pub struct ComponentLibrary {
    components: HashMap<String, ComponentRef>,
}

impl ComponentLibrary {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a library holding the built-in components.
    pub fn with_builtins() -> Self {
        let mut library = Self::new();
        library.register(Arc::new(Passthrough));
        library.register(Arc::new(HighlightedCode));
        library.register(Arc::new(ExternalLink));
        library
    }

    /// Add a component, replacing any with the same name.
    pub fn register(&mut self, component: ComponentRef) {
        self.components
            .insert(component.name().to_string(), component);
    }

    /// Look up a component by name.
    pub fn get(&self, name: &str) -> Option<ComponentRef> {
        self.components.get(name).cloned()
    }

    /// All component names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.components.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
