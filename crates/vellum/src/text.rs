//! Text layout: one `<text>` per text node, one `<tspan>` per visual line.
//!
//! The host only reports glyph boxes, so lines are found the way a script
//! would find them with `Range.getClientRects()`: the range is grown one
//! character at a time until it spans two line boxes, then stepped back by
//! one character and emitted as a line.

use vellum_css::{ComputedStyle, fmt_number};
use vellum_dom::{DomTree, NodeId};

use crate::context::{Session, TraversalContext};
use crate::document::{Document, TextRange};
use crate::error::{ConversionError, DomException};

/// [CSS properties that apply to SVG text](https://css-tricks.com/svg-properties-and-css)
pub const TEXT_ATTRIBUTES: [&str; 18] = [
    "color",
    "dominant-baseline",
    "font-family",
    "font-size",
    "font-size-adjust",
    "font-stretch",
    "font-style",
    "font-variant",
    "font-weight",
    "direction",
    "letter-spacing",
    "text-decoration",
    "text-anchor",
    "text-rendering",
    "unicode-bidi",
    "word-spacing",
    "writing-mode",
    "user-select",
];

/// Copy the non-empty text properties of `style` onto `target` as attributes.
///
/// SVG text is painted with `fill`, so `color` is copied there too.
pub fn copy_text_styles(style: &ComputedStyle, tree: &mut DomTree, target: NodeId) {
    for property in TEXT_ATTRIBUTES {
        let value = style.get(property);
        if !value.is_empty() {
            tree.set_attribute(target, property, value);
        }
    }
    let color = style.get("color");
    if !color.is_empty() {
        tree.set_attribute(target, "fill", color);
    }
}

/// Convert a text node into a `<text>` appended to the current parent.
///
/// Nodes whose parent is hidden, and nodes without any rendered glyph
/// (white-space-only text collapsed away), produce nothing.
pub(crate) fn handle_text_node(
    document: &Document,
    node: NodeId,
    context: &TraversalContext,
    session: &mut Session<'_>,
) -> Result<(), ConversionError> {
    let Some(parent) = document.tree().parent(node).filter(|&p| document.tree().as_element(p).is_some()) else {
        return Ok(());
    };
    let style = &document.layout(parent)?.style;
    if !style.is_visible() {
        return Ok(());
    }
    if !document.layout(node)?.text.as_ref().is_some_and(|t| t.has_glyphs()) {
        return Ok(());
    }

    let text_element = session.output.create_element("text");
    let tree = session.output.tree_mut();
    copy_text_styles(style, tree, text_element);
    // y is the bottom of the line box, not the baseline.
    tree.set_attribute(text_element, "dominant-baseline", "text-after-edge");
    let tab = " ".repeat(style.tab_size());

    let mut range = document.create_range(node);
    loop {
        match range.set_end(range.end() + 1) {
            Ok(()) => {}
            Err(DomException::IndexSize) => {
                add_line(document, &range, &tab, text_element, session);
                break;
            }
        }

        let lines = document.client_rects(&range);
        if let [first, second, ..] = lines.as_slice()
            && first.top() != second.top()
        {
            // Crossed a line break: the range minus its last character is exactly one line.
            if range.set_end(range.end() - 1).is_ok() {
                add_line(document, &range, &tab, text_element, session);
                let end = range.end();
                let _ = range.set_start(end);
            }
        }
    }

    session.output.tree_mut().append_child(context.current_parent, text_element);
    Ok(())
}

fn add_line(document: &Document, range: &TextRange, tab: &str, text_element: NodeId, session: &mut Session<'_>) {
    if range.is_collapsed() {
        return;
    }
    let Some(line) = document.client_rects(range).first().copied() else {
        return;
    };
    if !line.intersects(&session.capture_area) {
        return;
    }

    let content = document.range_text(range).replace('\t', tab);
    let tspan = session.output.create_element("tspan");
    let tree = session.output.tree_mut();
    tree.set_attribute(tspan, "xml:space", "preserve");
    tree.set_attribute(tspan, "x", fmt_number(line.x));
    tree.set_attribute(tspan, "y", fmt_number(line.bottom()));
    tree.set_attribute(tspan, "textLength", fmt_number(line.width));
    tree.set_attribute(tspan, "lengthAdjust", "spacingAndGlyphs");
    let text = tree.create_text(&content);
    tree.append_child(tspan, text);
    tree.append_child(text_element, tspan);
}
