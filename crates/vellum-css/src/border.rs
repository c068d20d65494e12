//! Border predicates and border-radius resolution.
//!
//! [CSS Backgrounds and Borders Level 3](https://www.w3.org/TR/css-backgrounds-3/)

use strum_macros::AsRefStr;
use vellum_common::warning::warn_once;

use crate::geometry::Rect;
use crate::style::ComputedStyle;
use crate::values::parse_css_length;

/// The four sides of a box, in the order borders are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Side {
    /// Top edge.
    Top,
    /// Bottom edge.
    Bottom,
    /// Right edge.
    Right,
    /// Left edge.
    Left,
}

impl Side {
    /// All four sides in drawing order.
    pub const ALL: [Self; 4] = [Self::Top, Self::Bottom, Self::Right, Self::Left];

    /// Whether the side runs horizontally.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// The two corners bounding this side, lower coordinate first.
    const fn corners(self) -> [Self; 2] {
        if self.is_horizontal() {
            [Self::Left, Self::Right]
        } else {
            [Self::Top, Self::Bottom]
        }
    }

    /// `border-<side>-<suffix>`
    #[must_use]
    pub fn property(self, suffix: &str) -> String {
        format!("border-{}-{suffix}", self.as_ref())
    }
}

/// [§ 4 Borders](https://www.w3.org/TR/css-backgrounds-3/#borders)
///
/// The used width, style and color of one border side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderSide<'a> {
    /// [§ 4.3 'border-width'](https://www.w3.org/TR/css-backgrounds-3/#border-width)
    pub width: &'a str,
    /// [§ 4.2 'border-style'](https://www.w3.org/TR/css-backgrounds-3/#border-style)
    pub style: &'a str,
    /// [§ 4.1 'border-color'](https://www.w3.org/TR/css-backgrounds-3/#border-color)
    pub color: &'a str,
}

impl<'a> BorderSide<'a> {
    /// Read one side from a computed style.
    ///
    /// The per-side longhands are used on purpose: some engines serialize the
    /// `border-color`/`border-width` shorthands as empty strings.
    #[must_use]
    pub fn of(style: &'a ComputedStyle, side: Side) -> Self {
        Self {
            width: style.get(&side.property("width")),
            style: style.get(&side.property("style")),
            color: style.get(&side.property("color")),
        }
    }
}

/// Whether all four borders are identical and can be drawn as one stroke.
///
/// The top border must be visible (non-zero width, a style other than
/// `none`, not transparent) and must not be `inset`/`outset`, whose sides are
/// shaded differently.
#[must_use]
pub fn has_uniform_border(style: &ComputedStyle) -> bool {
    let top = BorderSide::of(style, Side::Top);
    let width = top.width.trim_end_matches("px").parse::<f64>().unwrap_or(0.0);
    width != 0.0
        && !matches!(top.style, "none" | "inset" | "outset")
        && !style.is_transparent(&Side::Top.property("color"))
        && [Side::Bottom, Side::Right, Side::Left]
            .into_iter()
            .all(|side| BorderSide::of(style, side) == top)
}

/// Whether a single side has a visible border line.
#[must_use]
pub fn has_border(style: &ComputedStyle, side: Side) -> bool {
    let border = BorderSide::of(style, side);
    !border.color.is_empty() && !style.is_transparent(&side.property("color")) && border.width != "0px"
}

/// `border-<vertical>-<horizontal>-radius` for a corner.
fn corner_property(side: Side, corner: Side) -> String {
    if side.is_horizontal() {
        format!("border-{}-{}-radius", side.as_ref(), corner.as_ref())
    } else {
        format!("border-{}-{}-radius", corner.as_ref(), side.as_ref())
    }
}

/// [§ 5.1 'border-radius'](https://www.w3.org/TR/css-backgrounds-3/#border-radius)
///
/// "The two length or percentage values of the 'border-*-radius' properties
/// define the radii of a quarter ellipse that defines the shape of the corner
/// of the outer border edge."
///
/// Returns the radii of the two corners of `side` along that side: the
/// horizontal radii for top/bottom, the vertical radii for left/right.
/// "Percentages: Refer to corresponding dimension of the border box."
#[must_use]
pub fn border_radii_for_side(style: &ComputedStyle, side: Side, bounds: &Rect) -> [f64; 2] {
    side.corners().map(|corner| {
        let mut radii = style.get(&corner_property(side, corner)).split_ascii_whitespace();
        let horizontal = radii.next().unwrap_or("0px");
        if side.is_horizontal() {
            parse_css_length(horizontal, bounds.width).unwrap_or(0.0)
        } else {
            // "If the second length is omitted it is equal to the first."
            let vertical = radii.next().unwrap_or(horizontal);
            parse_css_length(vertical, bounds.height).unwrap_or(0.0)
        }
    })
}

/// [§ 5.5 Overlapping Curves](https://www.w3.org/TR/css-backgrounds-3/#corner-overlap)
///
/// "Let f = min(Li/Si), where i ∈ {top, right, bottom, left}, Si is the sum
/// of the two corresponding radii of the corners on side i, and Ltop =
/// Lbottom = the width of the box, and Lleft = Lright = the height of the
/// box. If f < 1, then all corner radii are reduced by multiplying them by f."
#[must_use]
pub fn overlapping_curves_factor(style: &ComputedStyle, bounds: &Rect) -> f64 {
    Side::ALL.into_iter().fold(1.0_f64, |factor, side| {
        let length = if side.is_horizontal() {
            bounds.width
        } else {
            bounds.height
        };
        let [first, second] = border_radii_for_side(style, side, bounds);
        let sum = first + second;
        if sum > 0.0 {
            factor.min(length / sum)
        } else {
            factor
        }
    })
}

/// The `rx`/`ry` used for every corner of a box.
///
/// Only the top-left horizontal and vertical radii are read and applied to
/// all four corners; differing per-corner radii are not reproduced. Both are
/// scaled by [`overlapping_curves_factor`].
#[must_use]
pub fn uniform_corner_radii(style: &ComputedStyle, bounds: &Rect) -> (f64, f64) {
    let top_left = style.get("border-top-left-radius");
    if ["border-top-right-radius", "border-bottom-right-radius", "border-bottom-left-radius"]
        .into_iter()
        .any(|corner| style.get(corner) != top_left)
    {
        warn_once("CSS", "differing per-corner border radii are drawn with the top-left radius");
    }
    let factor = overlapping_curves_factor(style, bounds);
    let radius_x = border_radii_for_side(style, Side::Top, bounds)[0] * factor;
    let radius_y = border_radii_for_side(style, Side::Left, bounds)[0] * factor;
    (radius_x, radius_y)
}
