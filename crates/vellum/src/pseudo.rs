//! `::before`/`::after` synthesis.
//!
//! [CSS Pseudo-Elements § 3.1 Generated content](https://drafts.csswg.org/css-pseudo-4/#generated-content)
//!
//! Generated content has no node in the DOM, so its text cannot be measured
//! line by line. For the duration of an element's conversion each
//! pseudo-element with string `content` is replaced by a real `<span>`:
//!
//! 1. the span is inserted as first (`::before`) or last (`::after`) child,
//!    carrying the pseudo-element's style, geometry and unescaped text;
//! 2. the element is marked with `data-pseudo-element-owner`;
//! 3. a `<style>` rule in front of the element hides the real pseudo-element
//!    while the span stands in for it.
//!
//! [`PseudoElementScope`] undoes all of this in reverse order when it is
//! dropped, so the source document is left exactly as it was on every exit
//! path, including `?` and unwinding.

use std::ops::{Deref, DerefMut};

use vellum_css::value::first_string;
use vellum_dom::{Namespace, NodeId};

use crate::document::Document;
use crate::surface::{NodeLayout, PseudoElement};

/// The rule hiding the real `pseudo` element of the element marked with `owner`.
#[must_use]
pub fn suppression_rule(owner: &str, pseudo: PseudoElement) -> String {
    format!(r#"[data-pseudo-element-owner="{owner}"]{pseudo} {{ display: none !important; }}"#)
}

/// Mutable access to a [`Document`] that reverts pseudo-element synthesis on drop.
pub struct PseudoElementScope<'d> {
    document: &'d mut Document,
    created: Vec<NodeId>,
    owner: Option<NodeId>,
}

impl<'d> PseudoElementScope<'d> {
    /// Open a scope with nothing synthesized yet.
    pub fn new(document: &'d mut Document) -> Self {
        Self {
            document,
            created: Vec::new(),
            owner: None,
        }
    }

    /// Replace the `pseudo` element of `element` by a real span.
    ///
    /// Nothing happens when there is no layout for the pseudo-element or no
    /// string in its `content`.
    pub fn synthesize(&mut self, element: NodeId, owner_id: &str, pseudo: PseudoElement) {
        let Some(layout) = self.document.pseudo_layout(element, pseudo) else {
            return;
        };
        let Some(text) = first_string(layout.style.get("content")) else {
            return;
        };
        let span_layout = NodeLayout::element(layout.bounds, layout.style.clone());
        let text_layout = NodeLayout {
            text: Some(layout.text.clone()),
            ..NodeLayout::default()
        };

        let tree = self.document.tree_mut();
        // Pseudo elements are inline by default, like a span.
        let span = tree.create_element("span", Namespace::Html);
        tree.set_attribute(span, "data-pseudo-element", pseudo.as_ref());
        let text_node = tree.create_text(&text);
        tree.append_child(span, text_node);

        tree.set_attribute(element, "data-pseudo-element-owner", owner_id);

        let style = tree.create_element("style", Namespace::Html);
        let rule = tree.create_text(&suppression_rule(owner_id, pseudo));
        tree.append_child(style, rule);
        if let Some(parent) = tree.parent(element) {
            tree.insert_before(parent, style, element);
        }

        match pseudo {
            PseudoElement::Before => tree.prepend_child(element, span),
            PseudoElement::After => tree.append_child(element, span),
        }

        self.created.extend([span, text_node, style, rule]);
        self.owner = Some(element);
        self.document.set_overlay(span, span_layout);
        self.document.set_overlay(text_node, text_layout);
        log::trace!("synthesized {pseudo} for {owner_id}");
    }
}

impl Deref for PseudoElementScope<'_> {
    type Target = Document;

    fn deref(&self) -> &Document {
        self.document
    }
}

impl DerefMut for PseudoElementScope<'_> {
    fn deref_mut(&mut self) -> &mut Document {
        self.document
    }
}

impl Drop for PseudoElementScope<'_> {
    fn drop(&mut self) {
        if let Some(owner) = self.owner.take() {
            let _ = self
                .document
                .tree_mut()
                .remove_attribute(owner, "data-pseudo-element-owner");
        }
        // Nodes were allocated last, so popping them in reverse restores the arena.
        for node in self.created.drain(..).rev() {
            self.document.clear_overlay(node);
            let _ = self.document.tree_mut().discard(node);
        }
    }
}
