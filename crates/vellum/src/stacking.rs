//! Stacking layer sets: the paint buckets of one stacking context.
//!
//! [CSS 2.1 Appendix E.2 Painting order](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
//!
//! While the subtree of a stacking context is converted, every descendant
//! container that paints into the context is appended to one of seven
//! buckets instead of being attached to the tree. When the context is done,
//! each bucket is sorted by z-index and spliced into the context's container
//! as a `<g data-stacking-layer="…">` group, in painting order.

use strum::IntoEnumIterator;
use vellum_css::StackingLayer;
use vellum_css::stacking::z_index_sort_key;
use vellum_dom::NodeId;

use crate::output::SvgDocument;

/// Handle to a [`StackingLayerSet`] owned by [`LayerSets`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerSetId(usize);

/// One bucket of one layer set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerRef {
    /// The stacking context.
    pub set: LayerSetId,
    /// The bucket within it.
    pub layer: StackingLayer,
}

/// The paint buckets of one stacking context.
#[derive(Debug, Clone)]
pub struct StackingLayerSet {
    root: NodeId,
    anchor: usize,
    buckets: [Vec<NodeId>; StackingLayer::COUNT],
}

impl StackingLayerSet {
    /// Buckets for the stacking context rooted at the output node `root`.
    ///
    /// Layer groups are inserted at child index `anchor` of `root` when the
    /// set is flattened.
    #[must_use]
    pub fn new(root: NodeId, anchor: usize) -> Self {
        Self {
            root,
            anchor,
            buckets: std::array::from_fn(|_| Vec::new()),
        }
    }

    /// Append `node` to the bucket of `layer`.
    pub fn push(&mut self, layer: StackingLayer, node: NodeId) {
        self.buckets[layer.index()].push(node);
    }

    /// Sort every bucket by `data-z-index` and splice the non-empty ones into
    /// the root as layer groups.
    ///
    /// The sort is stable: containers with equal z-index keep source order.
    pub fn flatten(self, output: &mut SvgDocument) {
        let mut position = self.anchor;
        for (layer, mut bucket) in StackingLayer::iter().zip(self.buckets) {
            if bucket.is_empty() {
                continue;
            }
            bucket.sort_by_key(|&node| z_index_sort_key(output.tree().attribute(node, "data-z-index")));

            let group = output.create_element("g");
            let tree = output.tree_mut();
            tree.set_attribute(group, "data-stacking-layer", layer.as_ref());
            log::trace!("flattening {} node(s) into {}", bucket.len(), layer.as_ref());
            for node in bucket {
                tree.append_child(group, node);
            }
            tree.insert_at(self.root, position, group);
            position += 1;
        }
    }
}

/// Arena of the layer sets of one conversion.
#[derive(Debug, Clone, Default)]
pub struct LayerSets {
    sets: Vec<Option<StackingLayerSet>>,
}

impl LayerSets {
    /// Start a layer set rooted at `root`, anchored after its current children.
    pub fn create(&mut self, output: &SvgDocument, root: NodeId) -> LayerSetId {
        let anchor = output.tree().children(root).len();
        self.sets.push(Some(StackingLayerSet::new(root, anchor)));
        LayerSetId(self.sets.len() - 1)
    }

    /// Append `node` to a bucket. Ignored once the set has been flattened.
    pub fn push(&mut self, target: LayerRef, node: NodeId) {
        if let Some(Some(set)) = self.sets.get_mut(target.set.0) {
            set.push(target.layer, node);
        }
    }

    /// Flatten a set into the output. Each set is flattened at most once.
    pub fn flatten(&mut self, id: LayerSetId, output: &mut SvgDocument) {
        if let Some(set) = self.sets.get_mut(id.0).and_then(Option::take) {
            set.flatten(output);
        }
    }
}
