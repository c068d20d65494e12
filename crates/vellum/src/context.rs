//! Per-conversion state and the per-node traversal context.

use std::collections::HashMap;

use vellum_css::Rect;
use vellum_dom::NodeId;

use crate::accessibility::AccessibilityProvider;
use crate::ids::IdGenerator;
use crate::output::SvgDocument;
use crate::stacking::{LayerRef, LayerSetId, LayerSets};

/// A `<mask>` created for an `overflow`-clipping ancestor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AncestorMask {
    /// The `<mask>` element in the output.
    pub mask: NodeId,
    /// The source element whose box the mask clips to.
    pub owner: NodeId,
}

/// What a node's conversion inherits from its ancestors.
///
/// Every recursion step derives a fresh copy for its children; a context is
/// never changed after it was handed down, so siblings cannot observe each
/// other.
#[derive(Debug, Clone)]
pub struct TraversalContext {
    /// Output node new content is appended to.
    pub current_parent: NodeId,
    /// Layer set of the nearest stacking context.
    pub stacking_layers: LayerSetId,
    /// Bucket the parent element's container was placed in; `None` at the root.
    pub parent_stacking_layer: Option<LayerRef>,
    /// Masks of clipping ancestors, nearest first.
    pub ancestor_masks: Vec<AncestorMask>,
}

/// State shared by the whole walk of one conversion.
pub struct Session<'a> {
    /// The document being built.
    pub output: SvgDocument,
    /// Output id generator.
    pub ids: IdGenerator,
    /// All stacking layer sets.
    pub layer_sets: LayerSets,
    /// Rectangle of interest.
    pub capture_area: Rect,
    /// Whether HTML links become SVG links.
    pub keep_links: bool,
    /// URL of the source document, for resolving CSS `url()`s.
    pub location: Option<String>,
    /// `<label for>` index handed to the accessibility provider.
    pub labels: HashMap<String, Vec<NodeId>>,
    /// Source of accessibility attributes.
    pub accessibility: &'a dyn AccessibilityProvider,
}
