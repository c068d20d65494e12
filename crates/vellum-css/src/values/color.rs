//! CSS Color values and parsing
//!
//! [CSS Color Level 4](https://www.w3.org/TR/css-color-4/)

use serde::Serialize;

use crate::geometry::fmt_number;
use crate::value::{components, functions};

/// [§ 4 Color syntax](https://www.w3.org/TR/css-color-4/#color-syntax)
/// sRGB color represented as RGBA components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorValue {
    /// "the red color channel" (0-255)
    pub r: u8,
    /// "the green color channel" (0-255)
    pub g: u8,
    /// "the blue color channel" (0-255)
    pub b: u8,
    /// "the alpha channel" (0-255, 255 = fully opaque)
    pub a: u8,
}

impl ColorValue {
    /// Black (#000000)
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0, a: 255 };

    /// [§ 6.4 transparent](https://www.w3.org/TR/css-color-4/#transparent-color)
    pub const TRANSPARENT: Self = Self { r: 0, g: 0, b: 0, a: 0 };

    /// [§ 4.2 The RGB hexadecimal notations](https://www.w3.org/TR/css-color-4/#hex-notation)
    /// "The syntax of a <hex-color> is a <hash-token> token whose value consists of
    /// 3, 4, 6, or 8 hexadecimal digits."
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        // [§ 4.2.1]
        // "The three-digit RGB notation (#RGB) is converted into six-digit form (#RRGGBB)
        // by replicating digits, not by adding zeros."
        let short = |i: usize| u8::from_str_radix(&hex[i..=i].repeat(2), 16).ok();
        let long = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            3 => Some(Self { r: short(0)?, g: short(1)?, b: short(2)?, a: 255 }),
            4 => Some(Self { r: short(0)?, g: short(1)?, b: short(2)?, a: short(3)? }),
            6 => Some(Self { r: long(0)?, g: long(2)?, b: long(4)?, a: 255 }),
            8 => Some(Self { r: long(0)?, g: long(2)?, b: long(4)?, a: long(6)? }),
            _ => None,
        }
    }

    /// [§ 6.1 Named Colors](https://www.w3.org/TR/css-color-4/#named-colors)
    ///
    /// The basic 16 HTML colors plus `transparent`. Computed colors arrive as
    /// `rgb()`/`rgba()`, so names only show up in authored gradient stops.
    #[must_use]
    pub fn from_named(name: &str) -> Option<Self> {
        let (r, g, b) = match name.to_ascii_lowercase().as_str() {
            "transparent" => return Some(Self::TRANSPARENT),
            "black" => (0, 0, 0),
            "white" => (255, 255, 255),
            "red" => (255, 0, 0),
            "green" => (0, 128, 0),
            "blue" => (0, 0, 255),
            "yellow" => (255, 255, 0),
            "gray" | "grey" => (128, 128, 128),
            "aqua" | "cyan" => (0, 255, 255),
            "fuchsia" | "magenta" => (255, 0, 255),
            "lime" => (0, 255, 0),
            "maroon" => (128, 0, 0),
            "navy" => (0, 0, 128),
            "olive" => (128, 128, 0),
            "purple" => (128, 0, 128),
            "silver" => (192, 192, 192),
            "teal" => (0, 128, 128),
            "orange" => (255, 165, 0),
            _ => return None,
        };
        Some(Self { r, g, b, a: 255 })
    }

    /// Parse a hex color, a named color or an `rgb()`/`rgba()` function.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.starts_with('#') {
            return Self::from_hex(value);
        }
        if let Some(rgb) = RgbFunction::parse(value) {
            let channel = |s: &str| {
                s.strip_suffix('%').map_or_else(
                    || s.parse::<f64>().ok(),
                    |p| p.parse::<f64>().ok().map(|p| p * 255.0 / 100.0),
                )
            };
            // "Values outside these ranges are not invalid, but are clamped."
            let to_u8 = |v: f64| v.round().clamp(0.0, 255.0) as u8;
            let alpha = match rgb.alpha {
                Some(a) => a.strip_suffix('%').map_or_else(
                    || a.parse::<f64>().ok().map(|a| a * 255.0),
                    |p| p.parse::<f64>().ok().map(|p| p * 255.0 / 100.0),
                )?,
                None => 255.0,
            };
            return Some(Self {
                r: to_u8(channel(rgb.channels[0])?),
                g: to_u8(channel(rgb.channels[1])?),
                b: to_u8(channel(rgb.channels[2])?),
                a: to_u8(alpha),
            });
        }
        Self::from_named(value)
    }

    /// Whether a serialized color is fully transparent.
    ///
    /// Hosts serialize `transparent` as `rgba(0, 0, 0, 0)`; both spellings
    /// (and any other zero-alpha color) qualify.
    #[must_use]
    pub fn is_transparent_value(value: &str) -> bool {
        value.trim() == "transparent" || Self::parse(value).is_some_and(|c| c.a == 0)
    }
}

/// The textual arguments of an `rgb()`/`rgba()` function, comma or space
/// separated, with an optional alpha after the third channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RgbFunction<'a> {
    pub(crate) channels: [&'a str; 3],
    pub(crate) alpha: Option<&'a str>,
}

impl<'a> RgbFunction<'a> {
    pub(crate) fn parse(value: &'a str) -> Option<Self> {
        let value = value.trim();
        let function = functions(value)
            .into_iter()
            .next()
            .filter(|f| f.span == (0..value.len()))?;
        if !function.name.eq_ignore_ascii_case("rgb") && !function.name.eq_ignore_ascii_case("rgba") {
            return None;
        }
        match components(function.arguments).as_slice() {
            &[r, g, b] => Some(Self { channels: [r, g, b], alpha: None }),
            &[r, g, b, a] => Some(Self { channels: [r, g, b], alpha: Some(a) }),
            _ => None,
        }
    }
}

/// Darken a serialized `rgb()`/`rgba()` color for the low-lit sides of
/// `inset`/`outset` borders.
///
/// Each color channel is multiplied by 0.3; the alpha channel is kept
/// verbatim. `rgb(100, 150, 200)` becomes `rgb(30, 45, 60)`.
///
/// Channels above 255 are clamped first, as CSS does for `rgb()`.
///
/// Returns `None` when `color` is not an `rgb()`/`rgba()` function with
/// integer channels.
#[must_use]
pub fn shade_color(color: &str) -> Option<String> {
    let rgb = RgbFunction::parse(color)?;
    let mut shaded = Vec::with_capacity(4);
    for channel in rgb.channels {
        let value = u8::try_from(channel.parse::<u64>().ok()?.min(255)).ok()?;
        // Integer arithmetic keeps e.g. 100 * 0.3 at exactly 30.
        shaded.push(fmt_number(f64::from(u16::from(value) * 3) / 10.0));
    }
    match rgb.alpha {
        Some(alpha) => {
            shaded.push(alpha.to_string());
            Some(format!("rgba({})", shaded.join(", ")))
        }
        None => Some(format!("rgb({})", shaded.join(", "))),
    }
}
