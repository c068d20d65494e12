//! Integration tests for border predicates and radii.

use quickcheck_macros::quickcheck;
use vellum_css::border::border_radii_for_side;
use vellum_css::{ComputedStyle, Rect, Side, has_border, has_uniform_border, overlapping_curves_factor, uniform_corner_radii};

fn bordered(width: &str, style: &str, color: &str) -> ComputedStyle {
    let mut s = ComputedStyle::new();
    for side in Side::ALL {
        s.set(&side.property("width"), width);
        s.set(&side.property("style"), style);
        s.set(&side.property("color"), color);
    }
    s
}

fn rounded(radius: &str) -> ComputedStyle {
    let mut s = ComputedStyle::new();
    for corner in ["top-left", "top-right", "bottom-right", "bottom-left"] {
        s.set(&format!("border-{corner}-radius"), radius);
    }
    s
}

#[test]
fn test_uniform_border() {
    assert!(has_uniform_border(&bordered("1px", "solid", "rgb(0, 0, 0)")));
    assert!(has_uniform_border(&bordered("2px", "dashed", "rgb(255, 0, 0)")));
}

#[test]
fn test_uniform_border_rejects_invisible_top() {
    assert!(!has_uniform_border(&bordered("0px", "solid", "rgb(0, 0, 0)")));
    assert!(!has_uniform_border(&bordered("1px", "none", "rgb(0, 0, 0)")));
    assert!(!has_uniform_border(&bordered("1px", "solid", "rgba(0, 0, 0, 0)")));
    assert!(!has_uniform_border(&ComputedStyle::new()));
}

#[test]
fn test_uniform_border_rejects_shaded_styles() {
    assert!(!has_uniform_border(&bordered("3px", "inset", "rgb(100, 150, 200)")));
    assert!(!has_uniform_border(&bordered("3px", "outset", "rgb(100, 150, 200)")));
}

#[test]
fn test_uniform_border_rejects_differing_side() {
    let mut s = bordered("1px", "solid", "rgb(0, 0, 0)");
    s.set("border-left-width", "2px");
    assert!(!has_uniform_border(&s));
}

#[test]
fn test_single_side_border() {
    let mut s = ComputedStyle::new();
    s.set("border-bottom-width", "1px");
    s.set("border-bottom-style", "solid");
    s.set("border-bottom-color", "rgb(0, 0, 0)");
    s.set("border-top-width", "0px");
    s.set("border-top-color", "rgb(0, 0, 0)");
    assert!(has_border(&s, Side::Bottom));
    assert!(!has_border(&s, Side::Top));
    assert!(!has_border(&s, Side::Left));
}

#[test]
fn test_side_property_names() {
    assert_eq!(Side::Right.property("color"), "border-right-color");
    assert_eq!(Side::Top.as_ref(), "top");
}

#[test]
fn test_percentage_radii_resolve_against_box() {
    let s = rounded("10%");
    let bounds = Rect::new(0.0, 0.0, 200.0, 50.0);
    assert_eq!(border_radii_for_side(&s, Side::Top, &bounds), [20.0, 20.0]);
    assert_eq!(border_radii_for_side(&s, Side::Left, &bounds), [5.0, 5.0]);
}

#[test]
fn test_overlapping_curves_are_scaled_down() {
    let s = rounded("80px");
    let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
    assert_eq!(overlapping_curves_factor(&s, &bounds), 0.625);
    assert_eq!(uniform_corner_radii(&s, &bounds), (50.0, 50.0));
}

#[test]
fn test_small_radii_are_untouched() {
    let s = rounded("4px");
    let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
    assert_eq!(overlapping_curves_factor(&s, &bounds), 1.0);
    assert_eq!(uniform_corner_radii(&s, &bounds), (4.0, 4.0));
    assert_eq!(uniform_corner_radii(&ComputedStyle::new(), &bounds), (0.0, 0.0));
}

#[test]
fn test_elliptic_corner() {
    let s = rounded("10px 20px");
    let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
    assert_eq!(uniform_corner_radii(&s, &bounds), (10.0, 20.0));
}

#[quickcheck]
fn prop_overlap_factor_never_exceeds_one(radius: u16, width: u8, height: u8) -> bool {
    let s = rounded(&format!("{radius}px"));
    let bounds = Rect::new(0.0, 0.0, f64::from(width), f64::from(height));
    let factor = overlapping_curves_factor(&s, &bounds);
    (0.0..=1.0).contains(&factor)
}
