//! Backgrounds and borders of one element box.
//!
//! [CSS Backgrounds and Borders Level 3](https://www.w3.org/TR/css-backgrounds-3/)

use vellum_common::url::resolve_url;
use vellum_common::warning::warn_once;
use vellum_css::border::BorderSide;
use vellum_css::gradient::is_linear_gradient;
use vellum_css::value::functions;
use vellum_css::{
    ComputedStyle, LinearGradient, Rect, Side, fmt_number, has_border, has_uniform_border, parse_css_length,
    parse_linear_gradient, shade_color, uniform_corner_radii,
};
use vellum_dom::NodeId;

use crate::context::Session;
use crate::error::ConversionError;
use crate::output::SvgDocument;

/// Draw the background and borders of a box.
///
/// Returns the created nodes in painting order; the caller decides where
/// they go (the container itself, or the root background bucket of the
/// container's own stacking context).
///
/// # Errors
///
/// [`ConversionError::UnexpectedColor`] when an `inset`/`outset` side has a
/// color that cannot be shaded.
pub(crate) fn background_and_borders(
    session: &mut Session<'_>,
    style: &ComputedStyle,
    bounds: &Rect,
) -> Result<Vec<NodeId>, ConversionError> {
    let mut nodes = Vec::new();
    if !style.is_visible() {
        return Ok(nodes);
    }

    let background_color = style.get("background-color");
    let has_background_color = !background_color.is_empty() && !style.is_transparent("background-color");
    let background_image = style.get("background-image");
    let has_background_image = !background_image.is_empty() && background_image != "none";

    if bounds.has_area() && (has_background_color || has_uniform_border(style) || has_background_image) {
        let background = background_and_border_box(&mut session.output, style, bounds);
        nodes.push(background);
        if has_background_image {
            background_layers(session, style, bounds, background, &mut nodes);
        }
    }

    if !has_uniform_border(style) {
        for side in Side::ALL {
            if has_border(style, side) {
                nodes.push(border_line(&mut session.output, style, bounds, side)?);
            }
        }
    }
    Ok(nodes)
}

/// The `<rect>` carrying the background color and, for uniform borders, the stroke.
fn background_and_border_box(output: &mut SvgDocument, style: &ComputedStyle, bounds: &Rect) -> NodeId {
    let background = output.create_box(bounds);
    let tree = output.tree_mut();
    let color = style.get("background-color");
    tree.set_attribute(background, "fill", if color.is_empty() { "none" } else { color });

    if has_uniform_border(style) {
        // The per-side longhands; some engines leave the shorthands empty.
        let top = BorderSide::of(style, Side::Top);
        tree.set_attribute(background, "stroke", top.color);
        tree.set_attribute(background, "stroke-width", top.width);
        if top.style == "dashed" {
            // [CSS Backgrounds § 4.2](https://www.w3.org/TR/css-backgrounds-3/#border-style):
            // dash length is UA-defined.
            tree.set_attribute(background, "stroke-dasharray", "1");
        }
    }

    let (radius_x, radius_y) = uniform_corner_radii(style, bounds);
    if radius_x != 0.0 {
        tree.set_attribute(background, "rx", fmt_number(radius_x));
    }
    if radius_y != 0.0 {
        tree.set_attribute(background, "ry", fmt_number(radius_y));
    }
    background
}

/// [§ 3.1 Layering Multiple Background Images](https://www.w3.org/TR/css-backgrounds-3/#layering)
///
/// "The first image in the list is the layer closest to the user". Layers
/// are drawn last to first. Each layer takes the position and repeat value at
/// its own index in the comma-separated lists.
fn background_layers(
    session: &mut Session<'_>,
    style: &ComputedStyle,
    bounds: &Rect,
    background: NodeId,
    nodes: &mut Vec<NodeId>,
) {
    let positions_x: Vec<&str> = style.get("background-position-x").split(',').map(str::trim).collect();
    let positions_y: Vec<&str> = style.get("background-position-y").split(',').map(str::trim).collect();
    let repeats: Vec<&str> = style.get("background-repeat").split(',').map(str::trim).collect();

    let layers = functions(style.get("background-image"));
    for (index, layer) in layers.iter().enumerate().rev() {
        let position_x = positions_x
            .get(index)
            .and_then(|v| parse_css_length(v, bounds.width))
            .unwrap_or(0.0);
        let position_y = positions_y
            .get(index)
            .and_then(|v| parse_css_length(v, bounds.height))
            .unwrap_or(0.0);
        let repeat = repeats.get(index).copied().filter(|r| !r.is_empty()).unwrap_or("repeat");
        let placement = Placement {
            bounds,
            position_x,
            position_y,
            repeat,
        };

        if let Some(url) = layer.url() {
            background_image(session, style, &placement, url, background, nodes);
        } else if is_linear_gradient(layer.name) {
            let Some(gradient) = parse_linear_gradient(layer.source(style.get("background-image"))) else {
                warn_once("CSS", &format!("could not parse background gradient {}", layer.arguments));
                continue;
            };
            let element = linear_gradient_element(&mut session.output, &gradient);
            let tree = session.output.tree_mut();
            if position_x != 0.0 || position_y != 0.0 {
                tree.set_attribute(
                    element,
                    "gradientTransform",
                    format!("translate({}, {})", fmt_number(position_x), fmt_number(position_y)),
                );
            }
            let id = session.ids.next_id("linear-gradient");
            tree.set_attribute(element, "id", id.as_str());
            tree.set_attribute(background, "fill", format!("url(#{id})"));
            insert_before_background(nodes, background, element);
        } else {
            warn_once("CSS", &format!("{}() backgrounds are not converted", layer.name));
        }
    }
}

struct Placement<'a> {
    bounds: &'a Rect,
    position_x: f64,
    position_y: f64,
    repeat: &'a str,
}

fn background_image(
    session: &mut Session<'_>,
    style: &ComputedStyle,
    placement: &Placement<'_>,
    url: &str,
    background: NodeId,
    nodes: &mut Vec<NodeId>,
) {
    let bounds = placement.bounds;
    let background_size = style.get("background-size");
    let mut size = background_size.split_ascii_whitespace();
    let css_width = size.next().unwrap_or("auto");
    let css_height = size.next().unwrap_or("auto");
    let width = parse_css_length(css_width, bounds.width).unwrap_or(bounds.width);
    let height = parse_css_length(css_height, bounds.height).unwrap_or(bounds.height);

    // Relative URLs should resolve against the stylesheet the declaration
    // came from, which is not known here.
    let href = resolve_url(url, session.location.as_deref());

    let image = session.output.create_element("image");
    let image_id = session.ids.next_id("background-image");
    let tree = session.output.tree_mut();
    tree.set_attribute(image, "id", image_id);
    tree.set_attribute(image, "width", fmt_number(width));
    tree.set_attribute(image, "height", fmt_number(height));
    if css_width != "auto" && css_height != "auto" {
        tree.set_attribute(image, "preserveAspectRatio", "none");
    } else if background_size == "contain" {
        tree.set_attribute(image, "preserveAspectRatio", "xMidYMid meet");
    } else if background_size == "cover" {
        tree.set_attribute(image, "preserveAspectRatio", "xMidYMid slice");
    }
    tree.set_attribute(image, "href", href);

    let naturally_aligned = placement.position_x == 0.0
        && placement.position_y == 0.0
        && width == bounds.width
        && height == bounds.height;
    if placement.repeat == "no-repeat" || naturally_aligned {
        tree.set_attribute(image, "x", fmt_number(bounds.x));
        tree.set_attribute(image, "y", fmt_number(bounds.y));
        nodes.push(image);
        return;
    }

    tree.set_attribute(image, "x", "0");
    tree.set_attribute(image, "y", "0");
    // On an axis that does not repeat the tile covers the whole box, so the
    // second copy falls outside of it.
    let tile_width = if matches!(placement.repeat, "repeat" | "repeat-x") {
        width
    } else {
        width + bounds.x + placement.position_x
    };
    let tile_height = if matches!(placement.repeat, "repeat" | "repeat-y") {
        height
    } else {
        height + bounds.y + placement.position_y
    };

    let pattern = session.output.create_element("pattern");
    let pattern_id = session.ids.next_id("pattern");
    let tree = session.output.tree_mut();
    tree.set_attribute(pattern, "patternUnits", "userSpaceOnUse");
    tree.set_attribute(pattern, "patternContentUnits", "userSpaceOnUse");
    tree.set_attribute(pattern, "x", fmt_number(bounds.x + placement.position_x));
    tree.set_attribute(pattern, "y", fmt_number(bounds.y + placement.position_y));
    tree.set_attribute(pattern, "width", fmt_number(tile_width));
    tree.set_attribute(pattern, "height", fmt_number(tile_height));
    tree.set_attribute(pattern, "id", pattern_id.as_str());
    tree.append_child(pattern, image);
    tree.set_attribute(background, "fill", format!("url(#{pattern_id})"));
    insert_before_background(nodes, background, pattern);
}

/// A `<linearGradient>` (without id) for a parsed CSS gradient.
pub(crate) fn linear_gradient_element(output: &mut SvgDocument, gradient: &LinearGradient) -> NodeId {
    let element = output.create_element("linearGradient");
    let endpoints = gradient.endpoints();
    let tree = output.tree_mut();
    tree.set_attribute(element, "x1", endpoints.x1);
    tree.set_attribute(element, "y1", endpoints.y1);
    tree.set_attribute(element, "x2", endpoints.x2);
    tree.set_attribute(element, "y2", endpoints.y2);

    for (offset, color, opacity) in gradient.svg_stops() {
        let stop = output.create_element("stop");
        let tree = output.tree_mut();
        tree.set_attribute(stop, "offset", offset);
        tree.set_attribute(stop, "stop-color", color);
        tree.set_attribute(stop, "stop-opacity", opacity);
        tree.append_child(element, stop);
    }
    element
}

/// Paint servers go right in front of the box that references them.
fn insert_before_background(nodes: &mut Vec<NodeId>, background: NodeId, node: NodeId) {
    let index = nodes.iter().position(|&n| n == background).unwrap_or(0);
    nodes.insert(index, node);
}

/// [§ 4.2 'border-style'](https://www.w3.org/TR/css-backgrounds-3/#border-style)
///
/// One `<line>` along a side. `inset` darkens the top and left sides,
/// `outset` the bottom and right sides.
fn border_line(output: &mut SvgDocument, style: &ComputedStyle, bounds: &Rect, side: Side) -> Result<NodeId, ConversionError> {
    let border = BorderSide::of(style, side);
    let shaded = match (border.style, side) {
        ("inset", Side::Top | Side::Left) | ("outset", Side::Right | Side::Bottom) => {
            Some(shade_color(border.color).ok_or_else(|| ConversionError::UnexpectedColor(border.color.to_string()))?)
        }
        _ => None,
    };

    let line = output.create_element("line");
    let tree = output.tree_mut();
    tree.set_attribute(line, "stroke-linecap", "square");
    tree.set_attribute(line, "stroke", shaded.as_deref().unwrap_or(border.color));
    tree.set_attribute(line, "stroke-width", border.width);

    let (x1, x2, y1, y2) = match side {
        Side::Top => (bounds.left(), bounds.right(), bounds.top(), bounds.top()),
        Side::Left => (bounds.left(), bounds.left(), bounds.top(), bounds.bottom()),
        Side::Right => (bounds.right(), bounds.right(), bounds.top(), bounds.bottom()),
        Side::Bottom => (bounds.left(), bounds.right(), bounds.bottom(), bounds.bottom()),
    };
    tree.set_attribute(line, "x1", fmt_number(x1));
    tree.set_attribute(line, "x2", fmt_number(x2));
    tree.set_attribute(line, "y1", fmt_number(y1));
    tree.set_attribute(line, "y2", fmt_number(y2));
    Ok(line)
}
