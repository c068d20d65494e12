//! CSS Stacking Contexts and Painting Order.
//!
//! [§ 9.9 Layered presentation](https://www.w3.org/TR/CSS2/visuren.html#layers)
//!
//! "An element in CSS 2 may have a stack level, which describes its position
//! within a set of elements sharing the same stacking context."
//!
//! [CSS 2.1 Appendix E: Elaborate description of Stacking Contexts](https://www.w3.org/TR/CSS2/zindex.html)

use strum_macros::{AsRefStr, EnumIter};

use crate::style::ComputedStyle;

/// [§ Appendix E Painting order](https://www.w3.org/TR/CSS2/zindex.html)
///
/// "Within each stacking context, the following layers are painted in
/// back-to-front order:
///
/// 1. the background and borders of the element forming the stacking context.
/// 2. the child stacking contexts with negative stack levels (most negative first).
/// 3. the in-flow, non-inline-level, non-positioned descendants.
/// 4. the non-positioned floats.
/// 5. the in-flow, inline-level, non-positioned descendants, including
///    inline tables and inline blocks.
/// 6. the child stacking contexts with stack level 0 and the positioned
///    descendants with stack level 0.
/// 7. the child stacking contexts with positive stack levels (least positive first)."
///
/// Declaration order is painting order; iterate with
/// [`strum::IntoEnumIterator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, AsRefStr, EnumIter)]
#[strum(serialize_all = "camelCase")]
pub enum StackingLayer {
    /// Layer 1.
    RootBackgroundAndBorders,
    /// Layer 2.
    ChildStackingContextsWithNegativeStackLevels,
    /// Layer 3.
    InFlowNonInlineNonPositionedDescendants,
    /// Layer 4.
    NonPositionedFloats,
    /// Layer 5.
    InFlowInlineLevelNonPositionedDescendants,
    /// Layer 6.
    ChildStackingContextsWithStackLevelZeroAndPositionedDescendantsWithStackLevelZero,
    /// Layer 7.
    ChildStackingContextsWithPositiveStackLevels,
}

impl StackingLayer {
    /// Number of layers in a stacking context.
    pub const COUNT: usize = 7;

    /// Position of this layer in painting order.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Properties whose non-initial value creates a stacking context, and which
/// do so as well when listed in `will-change`.
const STACKING_PROPERTIES: [&str; 8] = [
    "transform",
    "filter",
    "perspective",
    "clip-path",
    "mask",
    "mask-image",
    "mask-border",
    "backdrop-filter",
];

/// [MDN: Stacking context](https://developer.mozilla.org/en-US/docs/Web/CSS/CSS_Positioning/Understanding_z_index/The_stacking_context)
///
/// Whether an element with `style`, whose parent has `parent_style`, forms a
/// stacking context. The root element is handled by the caller.
#[must_use]
pub fn establishes_stacking_context(style: &ComputedStyle, parent_style: Option<&ComputedStyle>) -> bool {
    let z_index_set = style.z_index().is_some();

    // "Element with a position value absolute or relative and z-index value other than auto."
    if matches!(style.position(), "absolute" | "relative") && z_index_set {
        return true;
    }
    // "Element with a position value fixed or sticky."
    if matches!(style.position(), "fixed" | "sticky") {
        return true;
    }
    // "Element that is a child of a flex container / grid container, with
    // z-index value other than auto."
    if z_index_set
        && parent_style.is_some_and(|parent| {
            matches!(parent.display(), "flex" | "inline-flex" | "grid" | "inline-grid")
        })
    {
        return true;
    }
    // "Element with an opacity value less than 1."
    if style.opacity() < 1.0 {
        return true;
    }
    // "Element with a mix-blend-mode value other than normal."
    if !matches!(style.get("mix-blend-mode"), "" | "normal") {
        return true;
    }
    // "Element with any of the following properties with value other than none"
    if STACKING_PROPERTIES
        .iter()
        .any(|property| !matches!(style.get(property), "" | "none"))
    {
        return true;
    }
    // "Element with an isolation value isolate."
    if style.get("isolation") == "isolate" {
        return true;
    }
    // "Element with a -webkit-overflow-scrolling value touch."
    if style.get("-webkit-overflow-scrolling") == "touch" {
        return true;
    }
    // "Element with a contain value of layout, or paint, or a composite value
    // that includes either of them (i.e. contain: strict, contain: content)."
    if style
        .get("contain")
        .split_ascii_whitespace()
        .any(|c| matches!(c, "layout" | "paint" | "strict" | "content"))
    {
        return true;
    }
    // "Element with a will-change value specifying any property that would
    // create a stacking context on non-initial value."
    style.get("will-change").split(',').map(str::trim).any(|property| {
        matches!(property, "opacity" | "mix-blend-mode" | "isolation" | "z-index" | "position")
            || STACKING_PROPERTIES.contains(&property)
    })
}

/// Pick the painting layer of the nearest stacking context that an element
/// with `style` paints into.
///
/// Never returns [`StackingLayer::RootBackgroundAndBorders`]: that layer holds
/// the decoration of the context's own element.
#[must_use]
pub fn determine_stacking_layer(style: &ComputedStyle, parent_style: Option<&ComputedStyle>) -> StackingLayer {
    let z_index = style.z_index();

    if establishes_stacking_context(style, parent_style) {
        return match z_index {
            // 2. "the child stacking contexts with negative stack levels"
            Some(z) if z < 0 => StackingLayer::ChildStackingContextsWithNegativeStackLevels,
            // 7. "the child stacking contexts with positive stack levels"
            Some(z) if z > 0 => StackingLayer::ChildStackingContextsWithPositiveStackLevels,
            // 6. "the child stacking contexts with stack level 0"
            _ => StackingLayer::ChildStackingContextsWithStackLevelZeroAndPositionedDescendantsWithStackLevelZero,
        };
    }
    // 6. "... and the positioned descendants with stack level 0"
    if style.is_positioned() {
        return StackingLayer::ChildStackingContextsWithStackLevelZeroAndPositionedDescendantsWithStackLevelZero;
    }
    // 4. "the non-positioned floats"
    if style.float() != "none" {
        return StackingLayer::NonPositionedFloats;
    }
    // 5. "the in-flow, inline-level, non-positioned descendants"
    if style.is_inline() {
        return StackingLayer::InFlowInlineLevelNonPositionedDescendants;
    }
    // 3. "the in-flow, non-inline-level, non-positioned descendants"
    StackingLayer::InFlowNonInlineNonPositionedDescendants
}

/// Sort key of an output container inside a layer: its z-index, with
/// `auto` (or a missing/unparsable value) counting as 0.
#[must_use]
pub fn z_index_sort_key(z_index: Option<&str>) -> i32 {
    z_index.and_then(|z| z.trim().parse().ok()).unwrap_or(0)
}
