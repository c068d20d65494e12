//! Linear gradients.
//!
//! [CSS Images Level 3 § 3.1 Linear Gradients](https://www.w3.org/TR/css-images-3/#linear-gradients)
//!
//! A CSS `linear-gradient()` is converted into the endpoints and stops of an
//! SVG `<linearGradient>` whose coordinates are percentages of the painted
//! box (`gradientUnits="objectBoundingBox"`).

use std::f64::consts::PI;

use strum_macros::{AsRefStr, EnumString};

use cssparser::{Parser, ParserInput, Token};

use crate::value::{components, functions, split_top_level_commas};
use crate::values::{ColorValue, RgbFunction};

/// A side keyword of a `to <side>` orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    /// `to top`
    Top,
    /// `to right`
    Right,
    /// `to bottom`
    Bottom,
    /// `to left`
    Left,
}

/// "The first argument to the function specifies the gradient line"
#[derive(Debug, Clone, PartialEq)]
pub enum Orientation {
    /// An `<angle>`, normalized to degrees.
    Angle(f64),
    /// `to <side-or-corner>`; a corner has two keywords.
    Directional(Vec<Direction>),
}

/// A stop color, kept in the notation it was written in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopColor {
    /// `rgb(r, g, b)`: the three channel arguments.
    Rgb([String; 3]),
    /// `rgba(r, g, b, a)`: channels and alpha.
    Rgba([String; 4]),
    /// `#abc`: the digits without the hash.
    Hex(String),
    /// A keyword such as `red` or `transparent`.
    Literal(String),
}

impl StopColor {
    fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Some(hex) = value.strip_prefix('#') {
            return ColorValue::from_hex(hex).map(|_| Self::Hex(hex.to_string()));
        }
        if value.contains('(') {
            let rgb = RgbFunction::parse(value)?;
            let [r, g, b] = rgb.channels.map(str::to_string);
            return Some(match rgb.alpha {
                Some(alpha) => Self::Rgba([r, g, b, alpha.to_string()]),
                None => Self::Rgb([r, g, b]),
            });
        }
        (!value.is_empty()).then(|| Self::Literal(value.to_string()))
    }

    /// The SVG `stop-color` value.
    #[must_use]
    pub fn stop_color(&self) -> String {
        match self {
            Self::Rgb([r, g, b]) | Self::Rgba([r, g, b, _]) => format!("rgb({r},{g},{b})"),
            Self::Hex(hex) => format!("#{hex}"),
            Self::Literal(name) => name.clone(),
        }
    }

    /// The SVG `stop-opacity` value: the `rgba()` alpha, else `1`.
    #[must_use]
    pub fn stop_opacity(&self) -> &str {
        match self {
            Self::Rgba([_, _, _, alpha]) => alpha,
            _ => "1",
        }
    }
}

/// A parsed `linear-gradient()`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    /// `None` when the gradient line was omitted.
    pub orientation: Option<Orientation>,
    /// Stop colors in source order. Explicit stop positions are discarded.
    pub stops: Vec<StopColor>,
}

/// `x1`/`y1`/`x2`/`y2` of an SVG `<linearGradient>`, as whole percentages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradientEndpoints {
    /// Start x.
    pub x1: String,
    /// Start y.
    pub y1: String,
    /// End x.
    pub x2: String,
    /// End y.
    pub y2: String,
}

/// Whether `name` is a linear gradient function (prefixed or not).
#[must_use]
pub fn is_linear_gradient(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    name == "linear-gradient" || name == "-webkit-linear-gradient"
}

/// [§ 3.1.1 linear-gradient() syntax](https://www.w3.org/TR/css-images-3/#linear-gradient-syntax)
///
/// "linear-gradient() = linear-gradient(
///   [ <angle> | to <side-or-corner> ]? ,
///   <color-stop-list>
/// )"
///
/// Accepts the full function text (`linear-gradient(45deg, red, blue)`) or
/// just its arguments. Returns `None` when there is no stop color.
///
/// When the gradient line is omitted the orientation is `None`, which
/// [`LinearGradient::endpoints`] maps to `to bottom` (`0% 0%` to `0% 100%`),
/// the CSS initial direction, rather than leaving all four endpoints at `0%`.
#[must_use]
pub fn parse_linear_gradient(css: &str) -> Option<LinearGradient> {
    let css = css.trim();
    let arguments = functions(css)
        .into_iter()
        .find(|f| is_linear_gradient(f.name) && f.span.start == 0)
        .map_or(css, |f| f.arguments);

    let mut items = split_top_level_commas(arguments).into_iter().peekable();
    let orientation = items.peek().and_then(|first| parse_orientation(first));
    if orientation.is_some() {
        let _ = items.next();
    }

    let stops: Vec<StopColor> = items
        .filter_map(|stop| {
            // "<linear-color-stop> = <color> <length-percentage>{1,2}?"
            components(stop).first().and_then(|color| StopColor::parse(color))
        })
        .collect();

    (!stops.is_empty()).then_some(LinearGradient { orientation, stops })
}

fn parse_orientation(value: &str) -> Option<Orientation> {
    let parts = components(value);
    let (keywords, legacy) = match parts.split_first() {
        Some((first, sides)) if first.eq_ignore_ascii_case("to") => (sides, false),
        _ => (parts.as_slice(), true),
    };
    let directions = keywords
        .iter()
        .map(|side| side.to_ascii_lowercase().parse::<Direction>())
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_default();
    // Legacy prefixed syntax names the starting side without `to`; the
    // endpoint mapping below treats both identically.
    if !directions.is_empty() && (!legacy || directions.len() == 1) {
        return Some(Orientation::Directional(directions));
    }
    match parts.as_slice() {
        [angle] => parse_angle(angle).map(Orientation::Angle),
        _ => None,
    }
}

/// [CSS Values § 7.1 Angle Units](https://www.w3.org/TR/css-values-4/#angles)
fn parse_angle(value: &str) -> Option<f64> {
    let mut input = ParserInput::new(value);
    let mut parser = Parser::new(&mut input);
    let Ok(&Token::Dimension { value: number, ref unit, .. }) = parser.next() else {
        return None;
    };
    let factor = match unit.to_ascii_lowercase().as_str() {
        "deg" => 1.0,
        "grad" => 360.0 / 400.0,
        "rad" => 180.0 / PI,
        "turn" => 360.0,
        _ => return None,
    };
    Some(f64::from(number) * factor)
}

fn percent(value: f64) -> String {
    format!("{}%", value.round() as i64)
}

impl LinearGradient {
    /// Map the orientation onto the unit square.
    ///
    /// An angle θ puts the start at `(50 + sin(θ + π)·50, 50 + cos(θ)·50)` and
    /// the end at `(50 + sin(θ)·50, 50 + cos(θ + π)·50)`, rounded to whole
    /// percents. A side keyword moves one coordinate to `100%`: `left` → x1,
    /// `top` → y1, `right` → x2, `bottom` → y2. Without an orientation the
    /// gradient runs `to bottom`.
    #[must_use]
    pub fn endpoints(&self) -> GradientEndpoints {
        let mut endpoints = GradientEndpoints {
            x1: "0%".to_string(),
            y1: "0%".to_string(),
            x2: "0%".to_string(),
            y2: "0%".to_string(),
        };
        match &self.orientation {
            Some(Orientation::Angle(degrees)) => {
                let angle = degrees.to_radians();
                endpoints.x1 = percent(50.0 + (angle + PI).sin() * 50.0);
                endpoints.y1 = percent(50.0 + angle.cos() * 50.0);
                endpoints.x2 = percent(50.0 + angle.sin() * 50.0);
                endpoints.y2 = percent(50.0 + (angle + PI).cos() * 50.0);
            }
            Some(Orientation::Directional(directions)) => {
                for direction in directions {
                    let coordinate = match direction {
                        Direction::Left => &mut endpoints.x1,
                        Direction::Top => &mut endpoints.y1,
                        Direction::Right => &mut endpoints.x2,
                        Direction::Bottom => &mut endpoints.y2,
                    };
                    *coordinate = "100%".to_string();
                }
            }
            None => endpoints.y2 = "100%".to_string(),
        }
        endpoints
    }

    /// `(offset, stop-color, stop-opacity)` for every stop, in order.
    #[must_use]
    pub fn svg_stops(&self) -> Vec<(String, String, String)> {
        self.stops
            .iter()
            .enumerate()
            .map(|(index, stop)| {
                (
                    evenly_spaced_offset(index, self.stops.len()),
                    stop.stop_color(),
                    stop.stop_opacity().to_string(),
                )
            })
            .collect()
    }
}

/// Offset of stop `index` out of `count`, spread evenly from 0% to 100%.
///
/// Explicit positions in the source (`red 10%`) are not honored; every
/// stop is placed by its index instead. A single stop sits at 0%.
#[must_use]
pub fn evenly_spaced_offset(index: usize, count: usize) -> String {
    if count <= 1 {
        return "0%".to_string();
    }
    let offset = index as f64 / (count - 1) as f64 * 100.0;
    format!("{}%", crate::geometry::fmt_number(offset))
}
