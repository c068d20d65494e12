//! The rendering surface: what the host engine already computed.
//!
//! [CSSOM View § 4 Extensions to the Window Interface](https://drafts.csswg.org/cssom-view/#extensions-to-the-window-interface)
//!
//! In a browser the converter would ask `window.getComputedStyle()`,
//! `getBoundingClientRect()`, `Range.getClientRects()` and
//! `getScreenCTM()`. Here those answers come from a [`RenderingSurface`],
//! keyed by the [`NodeId`] of the source [`DomTree`](vellum_dom::DomTree).
//! [`Snapshot`] is a serializable surface a headless browser can dump as JSON.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};
use vellum_css::{ComputedStyle, FontFaceRule, Matrix, Rect};
use vellum_dom::NodeId;

/// [CSS Pseudo-Elements § 3.1 Generated content](https://drafts.csswg.org/css-pseudo-4/#generated-content)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, Serialize, Deserialize)]
pub enum PseudoElement {
    /// "represents a styleable child pseudo-element immediately before the
    /// originating element's actual content"
    #[strum(serialize = "::before")]
    #[serde(rename = "::before")]
    Before,
    /// "represents a styleable child pseudo-element immediately after the
    /// originating element's actual content"
    #[strum(serialize = "::after")]
    #[serde(rename = "::after")]
    After,
}

/// Rendered geometry of a text node: one glyph rectangle per character.
///
/// Characters removed by white-space collapsing have no glyph (`None`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextGeometry {
    /// Glyph boxes, indexed by character offset.
    pub glyphs: Vec<Option<Rect>>,
}

impl TextGeometry {
    /// Whether any character of the node is rendered.
    #[must_use]
    pub fn has_glyphs(&self) -> bool {
        self.glyphs.iter().any(Option::is_some)
    }
}

/// Everything the host reports about one source node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeLayout {
    /// `getBoundingClientRect()`: the border box.
    pub bounds: Rect,
    /// `getComputedStyle()` of an element.
    pub style: ComputedStyle,
    /// Glyph geometry of a text node.
    pub text: Option<TextGeometry>,
    /// [CSSOM View § offsetParent](https://drafts.csswg.org/cssom-view/#dom-htmlelement-offsetparent):
    /// the positioning reference of an HTML element.
    pub offset_parent: Option<NodeId>,
    /// `HTMLImageElement.currentSrc`: the absolute URL of the selected image source.
    pub current_src: Option<String>,
    /// `HTMLInputElement.value`: the live value of a form control.
    pub value: Option<String>,
    /// `SVGGraphicsElement.getScreenCTM()` of an SVG graphics element.
    pub screen_ctm: Option<Matrix>,
    /// `SVGSVGElement.viewBox` of an SVG viewport element.
    pub view_box: Option<Rect>,
}

impl NodeLayout {
    /// Layout of an element.
    #[must_use]
    pub fn element(bounds: Rect, style: ComputedStyle) -> Self {
        Self {
            bounds,
            style,
            ..Self::default()
        }
    }

    /// Layout of a text node.
    #[must_use]
    pub fn text(glyphs: Vec<Option<Rect>>) -> Self {
        Self {
            text: Some(TextGeometry { glyphs }),
            ..Self::default()
        }
    }
}

/// What the host reports about a `::before`/`::after` pseudo-element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PseudoElementLayout {
    /// `getComputedStyle(element, pseudo)`
    pub style: ComputedStyle,
    /// Border box of the generated box.
    pub bounds: Rect,
    /// Glyph geometry of the generated text.
    pub text: TextGeometry,
}

/// The host's view of a rendered document.
pub trait RenderingSurface {
    /// `window.location.href`
    fn location(&self) -> Option<&str>;

    /// Style and geometry of a node, `None` when the host reported nothing.
    fn layout(&self, node: NodeId) -> Option<&NodeLayout>;

    /// Style and geometry of a pseudo-element of `node`.
    fn pseudo_layout(&self, node: NodeId, pseudo: PseudoElement) -> Option<&PseudoElementLayout>;

    /// Every `@font-face` rule of the document's stylesheets.
    fn font_faces(&self) -> &[FontFaceRule];
}

/// A recorded [`RenderingSurface`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Snapshot {
    /// Document URL.
    pub location: Option<String>,
    /// Per-node layout.
    pub nodes: HashMap<NodeId, NodeLayout>,
    /// `::before` boxes, keyed by originating element.
    pub before: HashMap<NodeId, PseudoElementLayout>,
    /// `::after` boxes, keyed by originating element.
    pub after: HashMap<NodeId, PseudoElementLayout>,
    /// `@font-face` rules.
    pub font_faces: Vec<FontFaceRule>,
}

impl Snapshot {
    /// An empty snapshot of the document at `location`.
    #[must_use]
    pub fn new(location: Option<&str>) -> Self {
        Self {
            location: location.map(str::to_string),
            ..Self::default()
        }
    }

    /// Record the layout of `node`.
    pub fn insert(&mut self, node: NodeId, layout: NodeLayout) {
        let _ = self.nodes.insert(node, layout);
    }

    /// Record a pseudo-element of `node`.
    pub fn insert_pseudo(&mut self, node: NodeId, pseudo: PseudoElement, layout: PseudoElementLayout) {
        let map = match pseudo {
            PseudoElement::Before => &mut self.before,
            PseudoElement::After => &mut self.after,
        };
        let _ = map.insert(node, layout);
    }
}

impl RenderingSurface for Snapshot {
    fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    fn layout(&self, node: NodeId) -> Option<&NodeLayout> {
        self.nodes.get(&node)
    }

    fn pseudo_layout(&self, node: NodeId, pseudo: PseudoElement) -> Option<&PseudoElementLayout> {
        match pseudo {
            PseudoElement::Before => self.before.get(&node),
            PseudoElement::After => self.after.get(&node),
        }
    }

    fn font_faces(&self) -> &[FontFaceRule] {
        &self.font_faces
    }
}
