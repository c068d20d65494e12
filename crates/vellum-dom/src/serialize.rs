//! XML serialization of a subtree.
//!
//! [DOM Parsing § 3.2 XML serialization](https://w3c.github.io/DOM-Parsing/#dfn-xml-serialization)
//!
//! Namespace declarations are not synthesized: the generated SVG root carries
//! explicit `xmlns`/`xmlns:xlink` attributes, which is all the output needs.

use std::fmt::Write;

use crate::{DomTree, NodeId, NodeType};

/// Serialize `node` and its descendants to markup.
///
/// Elements without children are written self-closing.
#[must_use]
pub fn to_markup(tree: &DomTree, node: NodeId) -> String {
    let mut out = String::new();
    write_node(tree, node, &mut out);
    out
}

fn write_node(tree: &DomTree, node: NodeId, out: &mut String) {
    let Some(n) = tree.get(node) else {
        return;
    };
    match &n.node_type {
        NodeType::Document => {
            for &child in &n.children {
                write_node(tree, child, out);
            }
        }
        NodeType::Element(element) => {
            out.push('<');
            out.push_str(&element.tag_name);
            for (name, value) in &element.attrs {
                let _ = write!(out, " {name}=\"{}\"", escape_attribute(value));
            }
            if n.children.is_empty() {
                out.push_str("/>");
                return;
            }
            out.push('>');
            for &child in &n.children {
                write_node(tree, child, out);
            }
            let _ = write!(out, "</{}>", element.tag_name);
        }
        NodeType::Text(text) => out.push_str(&escape_text(text)),
        // "--" is not allowed inside XML comments.
        NodeType::Comment(text) => {
            let _ = write!(out, "<!--{}-->", text.replace("--", "- -"));
        }
    }
}

/// [§ 3.2.1.2 Serializing an attribute value](https://w3c.github.io/DOM-Parsing/#dfn-serializing-an-attribute-value)
#[must_use]
pub fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\t' => escaped.push_str("&#9;"),
            '\n' => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// [§ 3.2.1.5 XML serializing a Text node](https://w3c.github.io/DOM-Parsing/#xml-serializing-a-text-node)
#[must_use]
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
