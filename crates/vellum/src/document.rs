//! The source document: a DOM tree bound to its rendering surface.

use std::collections::HashMap;

use vellum_css::Rect;
use vellum_dom::{DomTree, NodeId};

use crate::error::{ConversionError, DomException};
use crate::pseudo::suppression_rule;
use crate::surface::{NodeLayout, PseudoElement, PseudoElementLayout, RenderingSurface};

/// A rendered document.
///
/// Pairs the source [`DomTree`] with the [`RenderingSurface`] that reports
/// its computed style and geometry (the document's "defaultView"). Nodes the
/// converter synthesizes for pseudo-elements get their layout from a
/// transient overlay that is cleared together with the nodes.
pub struct Document {
    tree: DomTree,
    surface: Option<Box<dyn RenderingSurface>>,
    overlay: HashMap<NodeId, NodeLayout>,
    unreported: NodeLayout,
}

impl Document {
    /// A document rendered on `surface`.
    #[must_use]
    pub fn new(tree: DomTree, surface: impl RenderingSurface + 'static) -> Self {
        Self {
            tree,
            surface: Some(Box::new(surface)),
            overlay: HashMap::new(),
            unreported: NodeLayout::default(),
        }
    }

    /// A document that is not rendered anywhere. Converting it fails with
    /// [`ConversionError::MissingRenderingSurface`].
    #[must_use]
    pub fn without_surface(tree: DomTree) -> Self {
        Self {
            tree,
            surface: None,
            overlay: HashMap::new(),
            unreported: NodeLayout::default(),
        }
    }

    /// The DOM tree.
    #[must_use]
    pub const fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Mutable access to the DOM tree.
    pub const fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// The rendering surface.
    ///
    /// # Errors
    ///
    /// [`ConversionError::MissingRenderingSurface`] when the document is not rendered.
    pub fn surface(&self) -> Result<&dyn RenderingSurface, ConversionError> {
        self.surface.as_deref().ok_or(ConversionError::MissingRenderingSurface)
    }

    /// `window.location.href`, if known.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.surface.as_deref().and_then(RenderingSurface::location)
    }

    /// Style and geometry of `node`.
    ///
    /// Nodes the host did not report on get an empty layout (zero-sized
    /// bounds, every style property empty).
    ///
    /// # Errors
    ///
    /// [`ConversionError::MissingRenderingSurface`] when the document is not rendered.
    pub fn layout(&self, node: NodeId) -> Result<&NodeLayout, ConversionError> {
        let surface = self.surface()?;
        Ok(self
            .overlay
            .get(&node)
            .or_else(|| surface.layout(node))
            .unwrap_or(&self.unreported))
    }

    /// Style and geometry of a pseudo-element, unless it is suppressed.
    #[must_use]
    pub fn pseudo_layout(&self, node: NodeId, pseudo: PseudoElement) -> Option<&PseudoElementLayout> {
        if self.is_pseudo_suppressed(node, pseudo) {
            return None;
        }
        self.surface.as_deref()?.pseudo_layout(node, pseudo)
    }

    /// Whether a `display: none !important` rule injected in front of `node`
    /// currently hides its `pseudo` element.
    #[must_use]
    pub fn is_pseudo_suppressed(&self, node: NodeId, pseudo: PseudoElement) -> bool {
        let Some(owner) = self.tree.attribute(node, "data-pseudo-element-owner") else {
            return false;
        };
        let rule = suppression_rule(owner, pseudo);
        self.tree.preceding_siblings(node).any(|sibling| {
            self.tree.as_element(sibling).is_some_and(|e| e.tag_name == "style")
                && self.tree.text_content(sibling) == rule
        })
    }

    pub(crate) fn set_overlay(&mut self, node: NodeId, layout: NodeLayout) {
        let _ = self.overlay.insert(node, layout);
    }

    pub(crate) fn clear_overlay(&mut self, node: NodeId) {
        let _ = self.overlay.remove(&node);
    }

    /// [DOM § 5.5 createRange()](https://dom.spec.whatwg.org/#dom-document-createrange)
    ///
    /// A collapsed range at the start of the text node `node`.
    #[must_use]
    pub fn create_range(&self, node: NodeId) -> TextRange {
        let length = self.tree.as_text(node).map_or(0, |text| text.chars().count());
        TextRange {
            node,
            start: 0,
            end: 0,
            length,
        }
    }

    /// [CSSOM View § 6.1 getClientRects()](https://drafts.csswg.org/cssom-view/#dom-range-getclientrects)
    ///
    /// One rectangle per visual line covered by `range`: the union of the
    /// rendered glyphs in the range that share a line top.
    #[must_use]
    pub fn client_rects(&self, range: &TextRange) -> Vec<Rect> {
        let Some(text) = self.layout(range.node).ok().and_then(|l| l.text.as_ref()) else {
            return Vec::new();
        };
        let mut lines: Vec<Rect> = Vec::new();
        for glyph in text.glyphs.iter().take(range.end).skip(range.start).flatten() {
            match lines.last_mut() {
                Some(line) if line.top() == glyph.top() => *line = line.union(glyph),
                _ => lines.push(*glyph),
            }
        }
        lines
    }

    /// The rendered text of `range`.
    ///
    /// Like `Selection.toString()`: characters removed by white-space
    /// collapsing are omitted and preserved line feeds read as spaces.
    #[must_use]
    pub fn range_text(&self, range: &TextRange) -> String {
        let Some(text) = self.tree.as_text(range.node) else {
            return String::new();
        };
        let glyphs = self
            .layout(range.node)
            .ok()
            .and_then(|l| l.text.as_ref())
            .map_or(&[][..], |t| t.glyphs.as_slice());
        text.chars()
            .enumerate()
            .take(range.end)
            .skip(range.start)
            .filter(|(offset, _)| glyphs.get(*offset).is_some_and(Option::is_some))
            .map(|(_, c)| if c == '\n' { ' ' } else { c })
            .collect()
    }
}

/// [DOM § 5.5 Interface Range](https://dom.spec.whatwg.org/#interface-range)
/// over a single text node, with offsets counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRange {
    node: NodeId,
    start: usize,
    end: usize,
    length: usize,
}

impl TextRange {
    /// The text node.
    #[must_use]
    pub const fn node(&self) -> NodeId {
        self.node
    }

    /// Start offset.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// End offset.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// "A live range is collapsed if its start node is its end node and its
    /// start offset is its end offset."
    #[must_use]
    pub const fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// [§ 5.5 setStart()](https://dom.spec.whatwg.org/#dom-range-setstart)
    ///
    /// # Errors
    ///
    /// "If offset is greater than node's length, then throw an
    /// IndexSizeError DOMException."
    pub const fn set_start(&mut self, offset: usize) -> Result<(), DomException> {
        if offset > self.length {
            return Err(DomException::IndexSize);
        }
        self.start = offset;
        // "If bp is after the range's end, ... set range's end to bp."
        if self.end < offset {
            self.end = offset;
        }
        Ok(())
    }

    /// [§ 5.5 setEnd()](https://dom.spec.whatwg.org/#dom-range-setend)
    ///
    /// # Errors
    ///
    /// "If offset is greater than node's length, then throw an
    /// IndexSizeError DOMException."
    pub const fn set_end(&mut self, offset: usize) -> Result<(), DomException> {
        if offset > self.length {
            return Err(DomException::IndexSize);
        }
        self.end = offset;
        // "If bp is before the range's start, ... set range's start to bp."
        if self.start > offset {
            self.start = offset;
        }
        Ok(())
    }
}
