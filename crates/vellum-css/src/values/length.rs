//! CSS Length values and parsing
//!
//! [CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/)

/// [§ 4.1 Lengths](https://www.w3.org/TR/css-values-4/#lengths) /
/// [§ 4.3 Percentages](https://www.w3.org/TR/css-values-4/#percentages)
///
/// Resolve a computed length to pixels. Computed lengths are always in `px`
/// (absolute lengths are canonicalized by the host); percentages resolve
/// against `container_length`.
///
/// Returns `None` for anything else (`auto`, keywords, `calc()`), leaving the
/// fallback to the caller.
#[must_use]
pub fn parse_css_length(value: &str, container_length: f64) -> Option<f64> {
    let value = value.trim();
    if let Some(px) = value.strip_suffix("px") {
        return px.trim().parse().ok();
    }
    if let Some(percent) = value.strip_suffix('%') {
        // "Percentages are always relative to another quantity"
        return percent
            .trim()
            .parse::<f64>()
            .ok()
            .map(|p| p / 100.0 * container_length);
    }
    None
}
