//! Integration tests for `linear-gradient()` conversion.

use vellum_css::gradient::{GradientEndpoints, Orientation, StopColor, evenly_spaced_offset, is_linear_gradient};
use vellum_css::parse_linear_gradient;

fn endpoints(x1: &str, y1: &str, x2: &str, y2: &str) -> GradientEndpoints {
    GradientEndpoints {
        x1: x1.to_string(),
        y1: y1.to_string(),
        x2: x2.to_string(),
        y2: y2.to_string(),
    }
}

#[test]
fn test_angle_gradient() {
    let gradient = parse_linear_gradient("linear-gradient(45deg, red, blue)").unwrap();
    assert_eq!(gradient.orientation, Some(Orientation::Angle(45.0)));
    assert_eq!(gradient.endpoints(), endpoints("15%", "85%", "85%", "15%"));
    assert_eq!(
        gradient.svg_stops(),
        vec![
            ("0%".to_string(), "red".to_string(), "1".to_string()),
            ("100%".to_string(), "blue".to_string(), "1".to_string()),
        ]
    );
}

#[test]
fn test_directional_gradient() {
    let gradient = parse_linear_gradient("linear-gradient(to right, red, blue)").unwrap();
    assert_eq!(gradient.endpoints(), endpoints("0%", "0%", "100%", "0%"));

    let corner = parse_linear_gradient("linear-gradient(to left top, red, blue)").unwrap();
    assert_eq!(corner.endpoints(), endpoints("100%", "100%", "0%", "0%"));
}

#[test]
fn test_default_orientation_runs_to_bottom() {
    let gradient = parse_linear_gradient("linear-gradient(red, blue)").unwrap();
    assert_eq!(gradient.orientation, None);
    assert_eq!(gradient.endpoints(), endpoints("0%", "0%", "0%", "100%"));
}

#[test]
fn test_turn_units() {
    let gradient = parse_linear_gradient("linear-gradient(0.5turn, red, blue)").unwrap();
    assert_eq!(gradient.orientation, Some(Orientation::Angle(180.0)));
}

#[test]
fn test_computed_color_stops() {
    let gradient =
        parse_linear_gradient("linear-gradient(rgb(255, 0, 0) 10%, rgba(0, 0, 255, 0.5) 50%, #00ff00)").unwrap();
    assert_eq!(
        gradient.stops,
        vec![
            StopColor::Rgb(["255".into(), "0".into(), "0".into()]),
            StopColor::Rgba(["0".into(), "0".into(), "255".into(), "0.5".into()]),
            StopColor::Hex("00ff00".into()),
        ]
    );
    let stops = gradient.svg_stops();
    assert_eq!(stops[0].1, "rgb(255,0,0)");
    assert_eq!(stops[1], ("50%".to_string(), "rgb(0,0,255)".to_string(), "0.5".to_string()));
    assert_eq!(stops[2].1, "#00ff00");
}

#[test]
fn test_offsets_are_spread_evenly() {
    assert_eq!(evenly_spaced_offset(0, 1), "0%");
    assert_eq!(evenly_spaced_offset(1, 3), "50%");
    assert_eq!(evenly_spaced_offset(1, 5), "25%");
}

#[test]
fn test_prefixed_function_names() {
    assert!(is_linear_gradient("linear-gradient"));
    assert!(is_linear_gradient("-webkit-linear-gradient"));
    assert!(!is_linear_gradient("radial-gradient"));
}

#[test]
fn test_gradient_without_stops_is_rejected() {
    assert!(parse_linear_gradient("linear-gradient(45deg)").is_none());
}

#[test]
fn test_angle_units_and_legacy_sides() {
    let grad = parse_linear_gradient("linear-gradient(100grad, red, blue)").unwrap();
    assert_eq!(grad.orientation, Some(Orientation::Angle(90.0)));
    let upper = parse_linear_gradient("linear-gradient(90DEG, red, blue)").unwrap();
    assert_eq!(upper.endpoints(), endpoints("0%", "50%", "100%", "50%"));

    let legacy = parse_linear_gradient("-webkit-linear-gradient(left, red, blue)").unwrap();
    assert_eq!(legacy.endpoints(), endpoints("100%", "0%", "0%", "0%"));
    assert_eq!(legacy.stops.len(), 2);
}
