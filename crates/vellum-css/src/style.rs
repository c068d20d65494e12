//! Computed style as reported by the host rendering engine.
//!
//! [CSSOM § 6.7 getComputedStyle()](https://drafts.csswg.org/cssom/#dom-window-getcomputedstyle)
//!
//! The converter never cascades or computes styles itself: every value is a
//! resolved string exactly as the host serializes it (e.g. `rgb(0, 0, 0)`,
//! `16px`, `auto`). This type stores those strings keyed by property name and
//! offers typed accessors for the handful of properties the converter
//! branches on.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::values::{ColorValue, parse_css_length};

/// [§ 6.6 CSSStyleDeclaration](https://drafts.csswg.org/cssom/#the-cssstyledeclaration-interface)
///
/// "A CSS declaration block ... has an associated ordered list of CSS declarations."
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComputedStyle {
    properties: IndexMap<String, String>,
}

impl ComputedStyle {
    /// An empty declaration block. Every lookup returns the empty string.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// [§ 6.6 getPropertyValue()](https://drafts.csswg.org/cssom/#dom-cssstyledeclaration-getpropertyvalue)
    ///
    /// "If property is ... not present, return the empty string."
    #[must_use]
    pub fn get(&self, property: &str) -> &str {
        self.properties.get(property).map_or("", String::as_str)
    }

    /// [§ 6.6 setProperty()](https://drafts.csswg.org/cssom/#dom-cssstyledeclaration-setproperty)
    pub fn set(&mut self, property: &str, value: impl Into<String>) {
        let _ = self.properties.insert(property.to_string(), value.into());
    }

    /// Iterate over `(property, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of declared properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Whether no property is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// [CSS Positioned Layout § 2 'position'](https://drafts.csswg.org/css-position-3/#position-property)
    ///
    /// "Initial: static"
    #[must_use]
    pub fn position(&self) -> &str {
        match self.get("position") {
            "" => "static",
            position => position,
        }
    }

    /// [CSS 2.1 § 9.5.1 'float'](https://www.w3.org/TR/CSS2/visuren.html#float-position)
    ///
    /// "Initial: none"
    #[must_use]
    pub fn float(&self) -> &str {
        match self.get("float") {
            "" => "none",
            float => float,
        }
    }

    /// [CSS Display § 2 'display'](https://drafts.csswg.org/css-display-3/#the-display-properties)
    ///
    /// "Initial: inline"
    #[must_use]
    pub fn display(&self) -> &str {
        match self.get("display") {
            "" => "inline",
            display => display,
        }
    }

    /// [CSS 2.1 § 9.9.1 'z-index'](https://www.w3.org/TR/CSS2/visuren.html#z-index)
    ///
    /// `None` for `auto` (and anything that is not an integer).
    #[must_use]
    pub fn z_index(&self) -> Option<i32> {
        self.get("z-index").trim().parse().ok()
    }

    /// [CSS Color § 11.2 'opacity'](https://drafts.csswg.org/css-color/#transparency)
    ///
    /// "Initial: 1". Unparsable values are treated as opaque.
    #[must_use]
    pub fn opacity(&self) -> f64 {
        self.get("opacity").trim().parse().unwrap_or(1.0)
    }

    /// "A positioned element is one whose computed position value is anything
    /// other than static."
    #[must_use]
    pub fn is_positioned(&self) -> bool {
        self.position() != "static"
    }

    /// Whether the box is absolutely positioned (`absolute` or `fixed`).
    #[must_use]
    pub fn is_out_of_flow_positioned(&self) -> bool {
        matches!(self.position(), "absolute" | "fixed")
    }

    /// [CSS 2.1 § 9.3 Positioning schemes](https://www.w3.org/TR/CSS2/visuren.html#positioning-scheme)
    ///
    /// "An element is called out of flow if it is floated, absolutely
    /// positioned, or is the root element. An element is called in-flow if it
    /// is not out-of-flow."
    #[must_use]
    pub fn is_in_flow(&self) -> bool {
        self.float() == "none" && !self.is_out_of_flow_positioned()
    }

    /// [CSS Display § 2.1 Outer display roles](https://drafts.csswg.org/css-display-3/#outer-role)
    ///
    /// `inline`, `inline-block`, `inline-flex`, `inline-table`, ... all have
    /// an inline outer display type.
    #[must_use]
    pub fn is_inline(&self) -> bool {
        self.display().starts_with("inline")
    }

    /// Whether the element paints at all: displayed, not `visibility: hidden`
    /// and not fully transparent.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.display() != "none" && self.get("visibility") != "hidden" && self.get("opacity") != "0"
    }

    /// [CSS Overflow § 3 'overflow'](https://drafts.csswg.org/css-overflow-3/#overflow-properties)
    ///
    /// Whether content overflowing the box is clipped in some direction.
    /// Falls back to the longhands when the shorthand is not serialized.
    #[must_use]
    pub fn clips_overflow(&self) -> bool {
        let clips = |value: &str| !value.is_empty() && value.split_ascii_whitespace().any(|v| v != "visible");
        match self.get("overflow") {
            "" => clips(self.get("overflow-x")) || clips(self.get("overflow-y")),
            overflow => clips(overflow),
        }
    }

    /// Resolve a length-valued property, defaulting to 0 when it is not a
    /// `px` or `%` value.
    #[must_use]
    pub fn length_or_zero(&self, property: &str, container_length: f64) -> f64 {
        parse_css_length(self.get(property), container_length).unwrap_or(0.0)
    }

    /// [CSS Text § 7.3 'tab-size'](https://drafts.csswg.org/css-text-3/#tab-size-property)
    ///
    /// "Initial: 8". Lengths are not supported; the number of spaces is used.
    #[must_use]
    pub fn tab_size(&self) -> usize {
        self.get("tab-size").trim().parse().unwrap_or(8)
    }

    /// Whether a color-valued property is fully transparent.
    #[must_use]
    pub fn is_transparent(&self, property: &str) -> bool {
        ColorValue::is_transparent_value(self.get(property))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ComputedStyle {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            properties: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
