//! HTML serialization of markup trees.

use vellum_mdx::{Attributes, CodeBlock, MarkupNode};

/// Elements that never have a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

/// Serialize a markup tree to HTML.
pub fn to_html(node: &MarkupNode) -> String {
    let mut out = String::new();
    write_node(&mut out, node);
    out
}

fn write_node(out: &mut String, node: &MarkupNode) {
    match node {
        MarkupNode::Text(value) => escape_into(out, value, false),
        MarkupNode::Element(el) => {
            let tag = html_tag(&el.tag);
            out.push('<');
            out.push_str(tag);
            write_attributes(out, &el.attributes);
            out.push('>');

            if VOID_ELEMENTS.contains(&tag) {
                return;
            }

            for child in &el.children {
                write_node(out, child);
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
        MarkupNode::Link { href, children, .. } => {
            out.push_str("<a href=\"");
            escape_into(out, href, true);
            out.push_str("\">");
            for child in children {
                write_node(out, child);
            }
            out.push_str("</a>");
        }
        MarkupNode::CodeBlock(block) => write_code_block(out, block),
    }
}

fn write_code_block(out: &mut String, block: &CodeBlock) {
    out.push_str("<pre><code");
    if let Some(class) = block.language.class_name() {
        out.push_str(" class=\"");
        escape_into(out, &class, true);
        out.push('"');
    }
    out.push('>');
    escape_into(out, &block.text, false);
    out.push_str("</code></pre>");
}

fn write_attributes(out: &mut String, attributes: &Attributes) {
    for (name, value) in attributes {
        if !is_attribute_name(name) {
            tracing::warn!("Skipping invalid attribute name {:?}", name);
            continue;
        }
        out.push(' ');
        out.push_str(html_attribute(name));
        out.push_str("=\"");
        escape_into(out, value, true);
        out.push('"');
    }
}

/// Check that `name` can be written unquoted as an attribute name.
fn is_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && !name.chars().any(|c| {
            c.is_whitespace()
                || c.is_control()
                || matches!(c, '"' | '\'' | '<' | '>' | '/' | '=')
        })
}

/// Map MDX element names to HTML tags.
fn html_tag(tag: &str) -> &str {
    match tag {
        "inlineCode" => "code",
        "thematicBreak" => "hr",
        other => other,
    }
}

/// Map JSX prop names to HTML attribute names.
fn html_attribute(name: &str) -> &str {
    match name {
        "className" => "class",
        "htmlFor" => "for",
        other => other,
    }
}

fn escape_into(out: &mut String, value: &str, attribute: bool) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
}
