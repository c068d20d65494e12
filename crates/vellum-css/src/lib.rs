//! CSS value utilities for the vellum SVG writer.
//!
//! # Scope
//!
//! The host rendering engine has already cascaded, computed and laid out the
//! page; this crate only interprets the serialized results:
//!
//! - **Computed styles** ([CSSOM](https://drafts.csswg.org/cssom/)): a property
//!   map with typed accessors (`position`, `float`, `display`, `z-index`, ...)
//! - **Values** ([CSS Values Level 4](https://www.w3.org/TR/css-values-4/)):
//!   `px`/`%` lengths, colors, inset/outset shading
//! - **Borders** ([CSS Backgrounds Level 3](https://www.w3.org/TR/css-backgrounds-3/)):
//!   uniform-border detection, corner radii and the overlapping-curves factor
//! - **Value scanning** ([CSS Syntax Level 3](https://www.w3.org/TR/css-syntax-3/)):
//!   `cssparser` tokens for top-level commas, functions, strings and
//!   `url(#id)` rewriting
//! - **Gradients** ([CSS Images Level 3](https://www.w3.org/TR/css-images-3/)):
//!   `linear-gradient()` to SVG endpoints and stops
//! - **Stacking** ([CSS 2.1 Appendix E](https://www.w3.org/TR/CSS2/zindex.html)):
//!   stacking-context detection and painting layers
//! - **Fonts** ([CSS Fonts Level 4](https://www.w3.org/TR/css-fonts-4/)):
//!   `@font-face` `src` URL scanning and rewriting
//! - **Geometry** ([Geometry Interfaces](https://drafts.fxtf.org/geometry/)):
//!   rectangles and affine matrices
//!
//! # Not Yet Implemented
//!
//! - Radial and conic gradients
//! - Explicit gradient stop positions
//! - Per-corner border radii

/// Border predicates and radius resolution per [CSS Backgrounds Level 3](https://www.w3.org/TR/css-backgrounds-3/).
pub mod border;
/// `@font-face` scanning per [CSS Fonts Level 4](https://www.w3.org/TR/css-fonts-4/#font-face-rule).
pub mod font_face;
/// Rectangles and matrices per [Geometry Interfaces Level 1](https://drafts.fxtf.org/geometry/).
pub mod geometry;
/// Linear gradients per [CSS Images Level 3](https://www.w3.org/TR/css-images-3/#linear-gradients).
pub mod gradient;
/// Stacking contexts per [CSS 2.1 Appendix E](https://www.w3.org/TR/CSS2/zindex.html).
pub mod stacking;
/// Computed style per [CSSOM](https://drafts.csswg.org/cssom/#dom-window-getcomputedstyle).
pub mod style;
/// Component value scanning per [CSS Syntax Level 3](https://www.w3.org/TR/css-syntax-3/).
pub mod value;
/// Lengths and colors per [CSS Values Level 4](https://www.w3.org/TR/css-values-4/).
pub mod values;

// Re-exports for convenience
pub use border::{Side, has_border, has_uniform_border, overlapping_curves_factor, uniform_corner_radii};
pub use font_face::FontFaceRule;
pub use geometry::{Matrix, Rect, fmt_number};
pub use gradient::{LinearGradient, parse_linear_gradient};
pub use stacking::{StackingLayer, determine_stacking_layer, establishes_stacking_context};
pub use style::ComputedStyle;
pub use values::{ColorValue, parse_css_length, shade_color};
