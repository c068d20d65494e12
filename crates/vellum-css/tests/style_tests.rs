//! Integration tests for computed style accessors, lengths and colors.

use vellum_css::{ColorValue, ComputedStyle, parse_css_length, shade_color};

fn style(pairs: &[(&str, &str)]) -> ComputedStyle {
    pairs.iter().copied().collect()
}

// ========== lengths ==========

#[test]
fn test_percentage_resolves_against_container() {
    assert_eq!(parse_css_length("50%", 200.0), Some(100.0));
}

#[test]
fn test_pixel_length() {
    assert_eq!(parse_css_length("10px", 999.0), Some(10.0));
    assert_eq!(parse_css_length("0.5px", 0.0), Some(0.5));
}

#[test]
fn test_auto_is_unresolved() {
    assert_eq!(parse_css_length("auto", 100.0), None);
    assert_eq!(parse_css_length("", 100.0), None);
    assert_eq!(parse_css_length("2em", 100.0), None);
}

// ========== colors ==========

#[test]
fn test_color_from_hex_3() {
    assert_eq!(
        ColorValue::from_hex("#f00"),
        Some(ColorValue {
            r: 255,
            g: 0,
            b: 0,
            a: 255
        })
    );
}

#[test]
fn test_color_from_hex_8() {
    assert_eq!(
        ColorValue::from_hex("#00ff0080"),
        Some(ColorValue {
            r: 0,
            g: 255,
            b: 0,
            a: 128
        })
    );
    assert_eq!(ColorValue::from_hex("#ggg"), None);
}

#[test]
fn test_color_from_rgb_functions() {
    assert_eq!(
        ColorValue::parse("rgb(1, 2, 3)"),
        Some(ColorValue {
            r: 1,
            g: 2,
            b: 3,
            a: 255
        })
    );
    assert_eq!(ColorValue::parse("rgba(0, 0, 0, 0)"), Some(ColorValue::TRANSPARENT));
    assert_eq!(ColorValue::parse("rgb(0 0 0 / 50%)").map(|c| c.a), Some(128));
}

#[test]
fn test_transparent_detection() {
    assert!(ColorValue::is_transparent_value("transparent"));
    assert!(ColorValue::is_transparent_value("rgba(0, 0, 0, 0)"));
    assert!(!ColorValue::is_transparent_value("rgb(0, 0, 0)"));
    assert!(!ColorValue::is_transparent_value("rgba(255, 0, 0, 0.5)"));
}

#[test]
fn test_shading_multiplies_channels_by_three_tenths() {
    assert_eq!(shade_color("rgb(100, 150, 200)").as_deref(), Some("rgb(30, 45, 60)"));
}

#[test]
fn test_shading_keeps_alpha() {
    assert_eq!(
        shade_color("rgba(100, 150, 200, 0.5)").as_deref(),
        Some("rgba(30, 45, 60, 0.5)")
    );
    assert_eq!(shade_color("rgb(101, 0, 0)").as_deref(), Some("rgb(30.3, 0, 0)"));
}

#[test]
fn test_shading_clamps_out_of_range_channels() {
    assert_eq!(
        shade_color("rgb(2000000000, 0, 0)").as_deref(),
        Some("rgb(76.5, 0, 0)")
    );
    assert_eq!(
        shade_color("rgb(18446744073709551615, 300, 255)").as_deref(),
        Some("rgb(76.5, 76.5, 76.5)")
    );
}

#[test]
fn test_shading_rejects_other_notations() {
    assert_eq!(shade_color("red"), None);
    assert_eq!(shade_color("#ff0000"), None);
    assert_eq!(shade_color("rgb(1, 2)"), None);
    assert_eq!(shade_color("rgb(1, 2, 3) red"), None);
}

// ========== computed style ==========

#[test]
fn test_missing_properties_read_as_empty() {
    let s = ComputedStyle::new();
    assert_eq!(s.get("color"), "");
    assert_eq!(s.position(), "static");
    assert_eq!(s.float(), "none");
    assert_eq!(s.z_index(), None);
    assert_eq!(s.opacity(), 1.0);
    assert!(s.is_inline());
}

#[test]
fn test_typed_accessors() {
    let s = style(&[
        ("position", "absolute"),
        ("z-index", "-3"),
        ("display", "inline-block"),
        ("opacity", "0.25"),
        ("overflow", "hidden"),
    ]);
    assert_eq!(s.z_index(), Some(-3));
    assert!(s.is_positioned());
    assert!(s.is_out_of_flow_positioned());
    assert!(!s.is_in_flow());
    assert!(s.is_inline());
    assert_eq!(s.opacity(), 0.25);
    assert!(s.clips_overflow());
}

#[test]
fn test_visibility() {
    assert!(style(&[("display", "block")]).is_visible());
    assert!(!style(&[("display", "none")]).is_visible());
    assert!(!style(&[("visibility", "hidden")]).is_visible());
    assert!(!style(&[("opacity", "0")]).is_visible());
}

#[test]
fn test_overflow_longhands() {
    assert!(!style(&[("overflow", "visible")]).clips_overflow());
    assert!(!ComputedStyle::new().clips_overflow());
    assert!(style(&[("overflow-x", "visible"), ("overflow-y", "auto")]).clips_overflow());
}

#[test]
fn test_style_deserializes_from_json_map() {
    let s: ComputedStyle = serde_json::from_str(r#"{"display":"block","color":"rgb(0, 0, 0)"}"#).unwrap();
    assert_eq!(s.display(), "block");
    assert_eq!(s.iter().map(|(k, _)| k).collect::<Vec<_>>(), vec!["display", "color"]);
}
