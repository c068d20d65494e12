//! Rectangles and 2D affine matrices.
//!
//! [Geometry Interfaces Module Level 1](https://drafts.fxtf.org/geometry/)

use serde::{Deserialize, Serialize};

/// [§ 3 The DOMRect interfaces](https://drafts.fxtf.org/geometry/#DOMRect)
///
/// "Objects implementing the DOMRectReadOnly interface represent a rectangle."
///
/// Widths and heights are expected to be non-negative, as reported by
/// `getBoundingClientRect()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// "The x coordinate of the origin"
    pub x: f64,
    /// "The y coordinate of the origin"
    pub y: f64,
    /// "The width of the rectangle"
    pub width: f64,
    /// "The height of the rectangle"
    pub height: f64,
}

impl Rect {
    /// Create a rectangle from origin and size.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from its four edges.
    #[must_use]
    pub fn from_edges(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    /// "The top attribute must return min(y coordinate, y coordinate + height dimension)"
    #[must_use]
    pub fn top(&self) -> f64 {
        self.y.min(self.y + self.height)
    }

    /// "The right attribute must return max(x coordinate, x coordinate + width dimension)"
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x.max(self.x + self.width)
    }

    /// "The bottom attribute must return max(y coordinate, y coordinate + height dimension)"
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y.max(self.y + self.height)
    }

    /// "The left attribute must return min(x coordinate, x coordinate + width dimension)"
    #[must_use]
    pub fn left(&self) -> f64 {
        self.x.min(self.x + self.width)
    }

    /// Whether the two rectangles overlap. Rectangles that only share an
    /// edge (or a corner) count as intersecting.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        !(self.bottom() < other.top()
            || self.top() > other.bottom()
            || self.right() < other.left()
            || self.left() > other.right())
    }

    /// Length of the diagonal.
    ///
    /// [SVG 2 § 8.9 Units](https://svgwg.org/svg2-draft/coords.html#Units)
    /// Percentages of non-directional lengths refer to
    /// "sqrt((actual-width)**2 + (actual-height)**2))/sqrt(2)". The
    /// normalization by sqrt(2) is left to the caller.
    #[must_use]
    pub fn diagonal(&self) -> f64 {
        self.width.hypot(self.height)
    }

    /// Whether both dimensions are strictly positive.
    #[must_use]
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// The smallest rectangle containing both.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self::from_edges(
            self.top().min(other.top()),
            self.right().max(other.right()),
            self.bottom().max(other.bottom()),
            self.left().min(other.left()),
        )
    }
}

/// Format a number the way script engines stringify doubles: integers
/// without a fractional part, shortest round-trip otherwise.
#[must_use]
pub fn fmt_number(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        // Also collapses -0.
        return "0".to_string();
    }
    value.to_string()
}

/// [§ 6 The DOMMatrix interfaces](https://drafts.fxtf.org/geometry/#DOMMatrix)
///
/// A 2D affine matrix in SVG notation:
///
/// ```text
/// | a c e |
/// | b d f |
/// | 0 0 1 |
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    /// Scale x.
    pub a: f64,
    /// Skew y.
    pub b: f64,
    /// Skew x.
    pub c: f64,
    /// Scale y.
    pub d: f64,
    /// Translate x.
    pub e: f64,
    /// Translate y.
    pub f: f64,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix {
    /// The identity matrix.
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    /// Create a matrix from its six components.
    #[must_use]
    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// A translation.
    #[must_use]
    pub const fn translate(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// A (possibly non-uniform) scale.
    #[must_use]
    pub const fn scale(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// [§ 6.5 multiply()](https://drafts.fxtf.org/geometry/#dom-dommatrixreadonly-multiply)
    ///
    /// Post-multiplies `other`: the result maps a point through `other` first,
    /// then through `self`.
    #[must_use]
    pub fn multiply(&self, other: &Self) -> Self {
        Self {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    /// [§ 6.5 inverse()](https://drafts.fxtf.org/geometry/#dom-dommatrixreadonly-inverse)
    ///
    /// Returns `None` when the matrix is not invertible.
    #[must_use]
    pub fn inverse(&self) -> Option<Self> {
        let det = self.a * self.d - self.b * self.c;
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        Some(Self {
            a: self.d / det,
            b: -self.b / det,
            c: -self.c / det,
            d: self.a / det,
            e: (self.c * self.f - self.d * self.e) / det,
            f: (self.b * self.e - self.a * self.f) / det,
        })
    }

    /// Whether this is the identity matrix.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Serialize as an SVG `matrix(a, b, c, d, e, f)` transform function.
    #[must_use]
    pub fn to_transform_function(&self) -> String {
        format!(
            "matrix({}, {}, {}, {}, {}, {})",
            fmt_number(self.a),
            fmt_number(self.b),
            fmt_number(self.c),
            fmt_number(self.d),
            fmt_number(self.e),
            fmt_number(self.f)
        )
    }
}

/// [CSS Transforms § 7 The SVG transform attribute](https://drafts.csswg.org/css-transforms/#svg-transform)
///
/// Parse an SVG `transform` attribute into a single consolidated matrix.
/// Functions are applied in list order, so the result is their product from
/// left to right. Returns `None` for malformed lists (including unknown
/// functions or missing arguments).
#[must_use]
pub fn parse_transform_list(input: &str) -> Option<Matrix> {
    let mut result = Matrix::IDENTITY;
    let mut rest = input.trim();
    while !rest.is_empty() {
        let open = rest.find('(')?;
        let close = rest[open..].find(')')? + open;
        let name = rest[..open].trim().trim_start_matches(',').trim();
        let args: Vec<f64> = rest[open + 1..close]
            .split(|c: char| c == ',' || c.is_ascii_whitespace())
            .filter(|s| !s.is_empty())
            .map(str::parse)
            .collect::<Result<_, _>>()
            .ok()?;

        let matrix = match (name, args.as_slice()) {
            ("matrix", &[a, b, c, d, e, f]) => Matrix::new(a, b, c, d, e, f),
            ("translate", &[tx]) => Matrix::translate(tx, 0.0),
            ("translate", &[tx, ty]) => Matrix::translate(tx, ty),
            ("scale", &[s]) => Matrix::scale(s, s),
            ("scale", &[sx, sy]) => Matrix::scale(sx, sy),
            ("rotate", &[angle]) => rotation(angle),
            ("rotate", &[angle, cx, cy]) => Matrix::translate(cx, cy)
                .multiply(&rotation(angle))
                .multiply(&Matrix::translate(-cx, -cy)),
            ("skewX", &[angle]) => Matrix::new(1.0, 0.0, angle.to_radians().tan(), 1.0, 0.0, 0.0),
            ("skewY", &[angle]) => Matrix::new(1.0, angle.to_radians().tan(), 0.0, 1.0, 0.0, 0.0),
            _ => return None,
        };
        result = result.multiply(&matrix);
        rest = rest[close + 1..].trim_start_matches([',', ' ', '\t', '\n', '\r']);
    }
    Some(result)
}

fn rotation(degrees: f64) -> Matrix {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Matrix::new(cos, sin, -sin, cos, 0.0, 0.0)
}

/// Parse a `viewBox` attribute (`min-x min-y width height`).
#[must_use]
pub fn parse_view_box(input: &str) -> Option<Rect> {
    let values: Vec<f64> = input
        .split(|c: char| c == ',' || c.is_ascii_whitespace())
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect::<Result<_, _>>()
        .ok()?;
    match values.as_slice() {
        &[x, y, width, height] if width >= 0.0 && height >= 0.0 => Some(Rect::new(x, y, width, height)),
        _ => None,
    }
}

/// [SVG 2 § 8.2 Computing the equivalent transform of an SVG viewport](https://svgwg.org/svg2-draft/coords.html#ComputingAViewportsTransform)
///
/// Maps `view_box` onto `viewport` honoring a `preserveAspectRatio` value
/// (default `xMidYMid meet`).
#[must_use]
pub fn view_box_transform(view_box: &Rect, viewport: &Rect, preserve_aspect_ratio: Option<&str>) -> Matrix {
    if view_box.width <= 0.0 || view_box.height <= 0.0 {
        return Matrix::translate(viewport.x, viewport.y);
    }

    let mut tokens = preserve_aspect_ratio.unwrap_or("").split_ascii_whitespace();
    let align = tokens.next().unwrap_or("xMidYMid");
    let slice = tokens.next() == Some("slice");

    // STEP 1-2: "Let vb-x, vb-y, vb-width, vb-height ..." / "Let e-x, e-y, e-width, e-height ..."
    let mut scale_x = viewport.width / view_box.width;
    let mut scale_y = viewport.height / view_box.height;

    // STEP 5: "If align is not 'none' and meetOrSlice is 'meet', set the larger
    // scale to the smaller." / "...'slice', set the smaller scale to the larger."
    if align != "none" {
        let uniform = if slice {
            scale_x.max(scale_y)
        } else {
            scale_x.min(scale_y)
        };
        scale_x = uniform;
        scale_y = uniform;
    }

    // STEP 6: "Initialize translate-x to e-x - (vb-x * scale-x)."
    let mut translate_x = viewport.x - view_box.x * scale_x;
    let mut translate_y = viewport.y - view_box.y * scale_y;

    // STEP 8-11: align within the viewport.
    let free_x = viewport.width - view_box.width * scale_x;
    let free_y = viewport.height - view_box.height * scale_y;
    if align.contains("xMid") {
        translate_x += free_x / 2.0;
    } else if align.contains("xMax") {
        translate_x += free_x;
    }
    if align.contains("YMid") {
        translate_y += free_y / 2.0;
    } else if align.contains("YMax") {
        translate_y += free_y;
    }

    Matrix::new(scale_x, 0.0, 0.0, scale_y, translate_x, translate_y)
}
