//! Table of contents extraction from a markup tree.

use serde::Serialize;

use crate::node::MarkupNode;

/// A table of contents entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TocEntry {
    /// Heading text
    pub title: String,
    /// Anchor ID
    pub id: String,
    /// Heading level (1-6)
    pub level: u8,
}

/// Collect headings from a tree in document order.
///
/// Headings without an `id` get one derived from their text.
pub fn collect_toc(root: &MarkupNode) -> Vec<TocEntry> {
    let mut toc = Vec::new();
    walk(root, &mut toc);
    toc
}

fn walk(node: &MarkupNode, toc: &mut Vec<TocEntry>) {
    if let MarkupNode::Element(el) = node {
        if let Some(level) = heading_level(&el.tag) {
            let title = node.text_content();
            let id = el
                .attr("id")
                .map(str::to_string)
                .unwrap_or_else(|| slugify(&title));
            toc.push(TocEntry { title, id, level });
            return;
        }
    }

    for child in node.children() {
        walk(child, toc);
    }
}

fn heading_level(tag: &str) -> Option<u8> {
    match tag {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

/// Convert a heading to a URL-safe slug.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c
            } else if c.is_whitespace() || c == '-' || c == '_' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|c| *c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
