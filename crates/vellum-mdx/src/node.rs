//! The markup tree and the `compose` primitive that builds it.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::codeblock::{CodeBlock, Language};

/// Element attributes, ordered by name so trees compare and serialize stably.
pub type Attributes = BTreeMap<String, String>;

/// A node of a markup tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "node", rename_all = "snake_case")]
pub enum MarkupNode {
    /// Literal text
    Text(String),

    /// Any other element (`p`, `h2`, `br`, ...)
    Element(Element),

    /// An anchor with only an `href`
    Link {
        href: String,

        /// Tag of the enclosing element, as on [`Element::parent`]
        #[serde(skip_serializing_if = "Option::is_none")]
        parent: Option<String>,

        children: Vec<MarkupNode>,
    },

    /// A fenced code block
    CodeBlock(CodeBlock),
}

/// A generic element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    /// Tag name (`p`, `h2`, `inlineCode`, ...)
    pub tag: String,

    /// Attributes as written in the source
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: Attributes,

    /// Tag of the element this one was composed under, used for
    /// `parent.tag` component lookup. Never rendered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    /// Child nodes
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MarkupNode>,
}

impl Element {
    /// Create an element with no parent.
    pub fn new(tag: impl Into<String>, attributes: Attributes, children: Vec<MarkupNode>) -> Self {
        Self {
            tag: tag.into(),
            attributes,
            parent: None,
            children,
        }
    }

    /// Look up an attribute.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

impl MarkupNode {
    /// Tag used when looking up a component for this node.
    ///
    /// Links answer to `a` and code blocks to `code`; text has no tag.
    pub fn lookup_tag(&self) -> Option<&str> {
        match self {
            Self::Text(_) => None,
            Self::Element(el) => Some(&el.tag),
            Self::Link { .. } => Some("a"),
            Self::CodeBlock(_) => Some("code"),
        }
    }

    /// Tag of the enclosing literal element, if known.
    pub fn parent_name(&self) -> Option<&str> {
        match self {
            Self::Element(el) => el.parent.as_deref(),
            Self::Link { parent, .. } => parent.as_deref(),
            Self::CodeBlock(_) => Some("pre"),
            Self::Text(_) => None,
        }
    }

    /// Child nodes (empty for text and code blocks).
    pub fn children(&self) -> &[MarkupNode] {
        match self {
            Self::Element(el) => &el.children,
            Self::Link { children, .. } => children,
            Self::Text(_) | Self::CodeBlock(_) => &[],
        }
    }

    /// Concatenated text of this node and all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        match self {
            Self::Text(value) => out.push_str(value),
            Self::CodeBlock(block) => out.push_str(&block.text),
            _ => {
                for child in self.children() {
                    child.push_text(out);
                }
            }
        }
    }

    /// Check if this node is an element with the given tag.
    pub fn is_element(&self, tag: &str) -> bool {
        matches!(self, Self::Element(el) if el.tag == tag)
    }

    /// Record `parent` as this node's parent name unless one is already set.
    fn within(self, parent: &str) -> Self {
        match self {
            Self::Element(mut el) => {
                if el.parent.is_none() {
                    el.parent = Some(parent.to_string());
                }
                Self::Element(el)
            }
            Self::Link {
                href,
                parent: link_parent,
                children,
            } => Self::Link {
                href,
                parent: link_parent.or_else(|| Some(parent.to_string())),
                children,
            },
            other => other,
        }
    }
}

/// Create a text node.
pub fn text(value: impl Into<String>) -> MarkupNode {
    MarkupNode::Text(value.into())
}

/// Build an attribute map from pairs.
pub fn attrs<I, K, V>(pairs: I) -> Attributes
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Build a node from a tag, its attributes and its children.
///
/// Children are tagged with `tag` as their parent name. An `a` whose only
/// attribute is `href` becomes a [`MarkupNode::Link`], and a bare `pre`
/// wrapping a single text-only `code` becomes a [`MarkupNode::CodeBlock`].
pub fn compose(tag: &str, attributes: Attributes, children: Vec<MarkupNode>) -> MarkupNode {
    let children: Vec<MarkupNode> = children.into_iter().map(|c| c.within(tag)).collect();

    if tag == "a" && attributes.len() == 1 {
        if let Some(href) = attributes.get("href") {
            return MarkupNode::Link {
                href: href.clone(),
                parent: None,
                children,
            };
        }
    }

    if tag == "pre" && attributes.is_empty() {
        if let Some(block) = as_code_block(&children) {
            return MarkupNode::CodeBlock(block);
        }
    }

    MarkupNode::Element(Element {
        tag: tag.to_string(),
        attributes,
        parent: None,
        children,
    })
}

fn as_code_block(children: &[MarkupNode]) -> Option<CodeBlock> {
    let [MarkupNode::Element(code)] = children else {
        return None;
    };
    if code.tag != "code" {
        return None;
    }

    let mut source = String::new();
    for child in &code.children {
        match child {
            MarkupNode::Text(value) => source.push_str(value),
            _ => return None,
        }
    }

    let language = code
        .attr("className")
        .map(Language::from_class_name)
        .unwrap_or_default();

    Some(CodeBlock::new(language, source))
}
