//! Accessibility attributes for output containers.
//!
//! Computing roles and accessible names is the host's business (see
//! [HTML-AAM](https://www.w3.org/TR/html-aam-1.0/)); the converter only copies
//! the resulting `role`/`aria-*` attributes onto the container it creates
//! for each element.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use vellum_dom::NodeId;

use crate::document::Document;
use crate::ids::IdGenerator;

/// Everything a provider may consult for one element.
pub struct AccessibilityRequest<'a> {
    /// The source document.
    pub document: &'a Document,
    /// The element being converted.
    pub element: NodeId,
    /// `<label for=…>` elements of the document, keyed by the `for` value.
    pub labels: &'a HashMap<String, Vec<NodeId>>,
    /// Id generator of the running conversion, for attributes that reference
    /// other output nodes.
    pub ids: &'a mut IdGenerator,
}

/// Source of the accessibility attributes of an element.
pub trait AccessibilityProvider {
    /// Ordered `(attribute, value)` pairs to set on the element's container.
    fn attributes(&self, request: AccessibilityRequest<'_>) -> Vec<(String, String)>;
}

/// Emits no accessibility attributes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAccessibility;

impl AccessibilityProvider for NoAccessibility {
    fn attributes(&self, _request: AccessibilityRequest<'_>) -> Vec<(String, String)> {
        Vec::new()
    }
}

/// Attributes computed ahead of time, e.g. dumped by the host next to a
/// [`Snapshot`](crate::surface::Snapshot).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrecomputedAccessibility {
    attributes: HashMap<NodeId, Vec<(String, String)>>,
}

impl PrecomputedAccessibility {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the attributes of `element`.
    pub fn insert(&mut self, element: NodeId, attributes: Vec<(String, String)>) {
        let _ = self.attributes.insert(element, attributes);
    }
}

impl AccessibilityProvider for PrecomputedAccessibility {
    fn attributes(&self, request: AccessibilityRequest<'_>) -> Vec<(String, String)> {
        self.attributes.get(&request.element).cloned().unwrap_or_default()
    }
}

/// Index the `<label for=…>` elements of a document.
#[must_use]
pub fn label_index(document: &Document) -> HashMap<String, Vec<NodeId>> {
    let tree = document.tree();
    let mut labels: HashMap<String, Vec<NodeId>> = HashMap::new();
    for node in tree.descendants(tree.root()) {
        if let Some(target) = tree
            .as_element(node)
            .filter(|e| e.is_html("label"))
            .and_then(|e| e.attribute("for"))
        {
            labels.entry(target.to_string()).or_default().push(node);
        }
    }
    labels
}
