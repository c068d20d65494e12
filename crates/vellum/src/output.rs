//! The generated SVG document.

use vellum_css::{Rect, fmt_number};
use vellum_dom::{DomTree, Namespace, NodeId, NodeType, SVG_NAMESPACE, XLINK_NAMESPACE, to_markup};

/// An SVG document under construction, rooted at an `<svg>` element.
#[derive(Debug, Clone)]
pub struct SvgDocument {
    tree: DomTree,
    root: NodeId,
}

impl SvgDocument {
    /// A document holding an empty `<svg>` root with the SVG and XLink
    /// namespace declarations.
    #[must_use]
    pub fn new() -> Self {
        let mut tree = DomTree::new();
        let root = tree.create_element("svg", Namespace::Svg);
        tree.set_attribute(root, "xmlns", SVG_NAMESPACE);
        tree.set_attribute(root, "xmlns:xlink", XLINK_NAMESPACE);
        tree.append_child(tree.root(), root);
        Self { tree, root }
    }

    /// The `<svg>` root element.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// The underlying tree.
    #[must_use]
    pub const fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Mutable access to the underlying tree.
    pub const fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// Create a detached SVG element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.tree.create_element(tag, Namespace::Svg)
    }

    /// Create a detached `<rect>` covering `bounds`.
    pub fn create_box(&mut self, bounds: &Rect) -> NodeId {
        let rect = self.create_element("rect");
        self.tree.set_attribute(rect, "width", fmt_number(bounds.width));
        self.tree.set_attribute(rect, "height", fmt_number(bounds.height));
        self.tree.set_attribute(rect, "x", fmt_number(bounds.x));
        self.tree.set_attribute(rect, "y", fmt_number(bounds.y));
        rect
    }

    /// Append a comment to `parent`.
    pub fn append_comment(&mut self, parent: NodeId, text: &str) {
        let comment = self.tree.alloc(NodeType::Comment(text.to_string()));
        self.tree.append_child(parent, comment);
    }

    /// `getElementById()`: the first attached element with the given id.
    #[must_use]
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .descendants(self.root)
            .find(|&node| self.tree.attribute(node, "id") == Some(id))
    }

    /// All attached elements with the given tag name, in document order.
    #[must_use]
    pub fn elements_by_tag_name(&self, tag: &str) -> Vec<NodeId> {
        self.tree
            .descendants(self.root)
            .filter(|&node| self.tree.as_element(node).is_some_and(|e| e.tag_name == tag))
            .collect()
    }

    /// Serialize the whole document to XML markup.
    #[must_use]
    pub fn to_markup(&self) -> String {
        to_markup(&self.tree, self.root)
    }
}

impl Default for SvgDocument {
    fn default() -> Self {
        Self::new()
    }
}
