//! Layout contract: page chrome and default tag bindings.

use std::fmt;
use std::sync::Arc;

use vellum_mdx::{attrs, Element, Frontmatter, FrontmatterError, MarkupNode, Props};

use crate::component::{ComponentMap, Passthrough};

/// `mdxType` content units pass to their layout.
pub const MDX_LAYOUT: &str = "MDXLayout";

/// Props a layout receives from a content unit.
#[derive(Debug, Clone)]
pub struct LayoutProps {
    /// Merged props: `_frontmatter` plus caller props, minus `components`
    pub props: Props,

    /// Effective tag bindings (layout defaults with caller overrides on top)
    pub components: ComponentMap,

    /// Kind of element requesting the layout
    pub mdx_type: String,
}

impl LayoutProps {
    /// Page frontmatter from the `_frontmatter` prop, empty if absent.
    pub fn frontmatter(&self) -> Result<Frontmatter, FrontmatterError> {
        match self.props.get("_frontmatter") {
            Some(value) => Frontmatter::from_value(value),
            None => Ok(Frontmatter::default()),
        }
    }
}

/// Supplies page chrome and the default renderer for each tag.
pub trait Layout: Send + Sync + fmt::Debug {
    /// Layout name
    fn name(&self) -> &str;

    /// Bindings used when the caller does not override a tag.
    fn default_components(&self) -> ComponentMap;

    /// Wrap rendered content in the page frame.
    fn wrap(&self, props: &LayoutProps, children: Vec<MarkupNode>) -> MarkupNode;
}

/// Wraps content in `div.layout` and renders every tag as written.
#[derive(Debug, Default)]
pub struct DefaultLayout;

impl Layout for DefaultLayout {
    fn name(&self) -> &str {
        "default"
    }

    fn default_components(&self) -> ComponentMap {
        let mut components = ComponentMap::new();
        components.insert("code".to_string(), Arc::new(Passthrough));
        components
    }

    fn wrap(&self, props: &LayoutProps, children: Vec<MarkupNode>) -> MarkupNode {
        MarkupNode::Element(Element::new(
            "div",
            attrs([
                ("className", "layout"),
                ("data-layout", props.mdx_type.as_str()),
            ]),
            children,
        ))
    }
}
