//! Converts a rendered DOM tree into an equivalent static SVG document.
//!
//! # Scope
//!
//! The host rendering engine has already laid out and styled the page. Given
//! the DOM and a [`RenderingSurface`] reporting computed styles and geometry,
//! this crate writes one SVG container per element:
//!
//! - **Painting order** ([CSS 2.1 Appendix E](https://www.w3.org/TR/CSS2/zindex.html))
//!   - Stacking contexts with seven paint layers each, sorted by z-index
//! - **Backgrounds and borders** ([CSS Backgrounds Level 3](https://www.w3.org/TR/css-backgrounds-3/))
//!   - Colors, `url()` images and tiled patterns, linear gradients
//!   - Uniform borders as strokes, other borders as lines, inset/outset shading
//!   - Border radii (uniform approximation)
//! - **Text** - one `<tspan>` per rendered line
//! - **Generated content** ([CSS Pseudo-Elements](https://drafts.csswg.org/css-pseudo-4/))
//!   - `::before`/`::after` with string `content`
//! - **Clipping** - `overflow` as `<mask>`, with cutouts for boxes positioned
//!   outside of the clipping ancestor
//! - **Replaced content** - `<img>`, form control values, inline `<svg>`
//! - **Resource inlining** - images and fonts as `data:` URLs, SVG images
//!   spliced into the document
//!
//! # Not Yet Implemented
//!
//! - `::marker` and other pseudo-elements
//! - Radial and conic gradients
//! - Per-corner border radii and non-uniform rounded borders
//! - Rotated boxes
//!
//! # Example
//!
//! ```
//! use vellum::{ConversionOptions, Document, NodeLayout, Snapshot, element_to_svg};
//! use vellum_css::{ComputedStyle, Rect};
//! use vellum_dom::{DomTree, Namespace};
//!
//! let mut tree = DomTree::new();
//! let div = tree.create_element("div", Namespace::Html);
//! tree.append_child(tree.root(), div);
//!
//! let mut snapshot = Snapshot::new(Some("https://example.com/"));
//! let style: ComputedStyle = [("display", "block"), ("background-color", "rgb(255, 0, 0)")]
//!     .into_iter()
//!     .collect();
//! snapshot.insert(div, NodeLayout::element(Rect::new(0.0, 0.0, 100.0, 50.0), style));
//!
//! let mut document = Document::new(tree, snapshot);
//! let svg = element_to_svg(&mut document, div, ConversionOptions::default()).unwrap();
//! assert!(svg.to_markup().contains(r#"fill="rgb(255, 0, 0)""#));
//! ```

/// Accessibility attributes for output containers.
pub mod accessibility;
mod context;
mod decoration;
/// The source document and its text ranges.
pub mod document;
mod element;
/// Splicing nested SVG content.
pub mod embed;
/// Error types.
pub mod error;
/// Unique output ids.
pub mod ids;
/// Resource inlining.
pub mod inline;
/// Conversion and inlining options.
pub mod options;
/// The generated SVG document.
pub mod output;
mod pseudo;
mod stacking;
/// The host's rendering results.
pub mod surface;
mod text;
mod traversal;

use vellum_dom::NodeId;

pub use accessibility::{AccessibilityProvider, AccessibilityRequest, NoAccessibility, PrecomputedAccessibility};
pub use document::{Document, TextRange};
pub use error::{ConversionError, DomException, InlineError};
pub use ids::IdGenerator;
pub use inline::{HttpFetcher, InlineSummary, Inliner, ResourceFetcher, inline_resources};
pub use options::{ConversionOptions, InlineOptions};
pub use output::SvgDocument;
pub use surface::{NodeLayout, PseudoElement, PseudoElementLayout, RenderingSurface, Snapshot, TextGeometry};

use crate::accessibility::label_index;
use crate::context::{Session, TraversalContext};
use crate::stacking::LayerSets;
use crate::traversal::walk_node;

/// A configured converter.
pub struct Converter {
    options: ConversionOptions,
    accessibility: Box<dyn AccessibilityProvider>,
}

impl Converter {
    /// A converter emitting no accessibility attributes.
    #[must_use]
    pub fn new(options: ConversionOptions) -> Self {
        Self {
            options,
            accessibility: Box::new(NoAccessibility),
        }
    }

    /// Use `provider` for the `role`/`aria-*` attributes of containers.
    #[must_use]
    pub fn with_accessibility(mut self, provider: impl AccessibilityProvider + 'static) -> Self {
        self.accessibility = Box::new(provider);
        self
    }

    /// Convert the document element of `document`.
    ///
    /// # Errors
    ///
    /// [`ConversionError::NotAnElement`] when the document is empty, and
    /// everything [`Converter::element_to_svg`] reports.
    pub fn document_to_svg(&self, document: &mut Document) -> Result<SvgDocument, ConversionError> {
        let root = document
            .tree()
            .document_element()
            .ok_or(ConversionError::NotAnElement(NodeId::ROOT))?;
        self.element_to_svg(document, root)
    }

    /// Convert `element` and its subtree.
    ///
    /// The source document is borrowed mutably because generated content is
    /// materialized as temporary nodes; it is unchanged when this returns,
    /// with or without an error.
    ///
    /// # Errors
    ///
    /// - [`ConversionError::MissingRenderingSurface`] when the document is not rendered
    /// - [`ConversionError::NotAnElement`] when `element` is not an element
    /// - [`ConversionError::UnexpectedColor`] when an inset/outset border color cannot be shaded
    pub fn element_to_svg(&self, document: &mut Document, element: NodeId) -> Result<SvgDocument, ConversionError> {
        let surface = document.surface()?;
        if document.tree().as_element(element).is_none() {
            return Err(ConversionError::NotAnElement(element));
        }
        let location = document.location().map(str::to_string);
        let font_faces: Vec<String> = surface
            .font_faces()
            .iter()
            .map(|rule| rule.with_absolute_urls(location.as_deref()))
            .collect();
        let capture_area = match self.options.capture_area {
            Some(area) => area,
            None => document.layout(element)?.bounds,
        };

        let mut output = SvgDocument::new();
        let root = output.root();
        let tree = output.tree_mut();
        tree.set_attribute(root, "width", vellum_css::fmt_number(capture_area.width));
        tree.set_attribute(root, "height", vellum_css::fmt_number(capture_area.height));
        tree.set_attribute(
            root,
            "viewBox",
            [capture_area.x, capture_area.y, capture_area.width, capture_area.height]
                .map(vellum_css::fmt_number)
                .join(" "),
        );
        output.append_comment(
            root,
            &format!(" Generated by vellum from {} ", location.as_deref().unwrap_or("about:blank")),
        );
        // Fonts must be declared in the SVG for it to render standalone.
        let style = output.create_element("style");
        let tree = output.tree_mut();
        let rules = tree.create_text(&font_faces.join("\n"));
        tree.append_child(style, rules);
        tree.append_child(root, style);

        let mut session = Session {
            output,
            ids: IdGenerator::new(),
            layer_sets: LayerSets::default(),
            capture_area,
            keep_links: self.options.keep_links,
            location,
            labels: label_index(document),
            accessibility: self.accessibility.as_ref(),
        };
        let root_layers = session.layer_sets.create(&session.output, root);
        let context = TraversalContext {
            current_parent: root,
            stacking_layers: root_layers,
            parent_stacking_layer: None,
            ancestor_masks: Vec::new(),
        };

        walk_node(document, element, &context, &mut session)?;
        session.layer_sets.flatten(root_layers, &mut session.output);
        Ok(session.output)
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(ConversionOptions::default())
    }
}

/// Convert the document element of `document` with `options`.
///
/// # Errors
///
/// See [`Converter::document_to_svg`].
pub fn document_to_svg(document: &mut Document, options: ConversionOptions) -> Result<SvgDocument, ConversionError> {
    Converter::new(options).document_to_svg(document)
}

/// Convert `element` of `document` with `options`.
///
/// # Errors
///
/// See [`Converter::element_to_svg`].
pub fn element_to_svg(
    document: &mut Document,
    element: NodeId,
    options: ConversionOptions,
) -> Result<SvgDocument, ConversionError> {
    Converter::new(options).element_to_svg(document, element)
}
