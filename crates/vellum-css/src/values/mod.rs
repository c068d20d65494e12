//! CSS value types and parsing
//!
//! - [CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/)
//! - [CSS Color Level 4](https://www.w3.org/TR/css-color-4/)

mod color;
mod length;

pub(crate) use color::RgbFunction;
pub use color::{ColorValue, shade_color};
pub use length::parse_css_length;
