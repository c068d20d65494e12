//! Conversion of one source element.
//!
//! Every element gets one output container (`<g>`, or `<a>` for kept links)
//! that is placed into the painting layer it belongs to. Its decoration,
//! clip mask and leaf content (image, form value, nested SVG) are created
//! here; everything else is left to the children.

use vellum_common::url::resolve_url;
use vellum_css::{ComputedStyle, Rect, StackingLayer, determine_stacking_layer, establishes_stacking_context, fmt_number};
use vellum_dom::{ElementData, Namespace, NodeId};

use crate::accessibility::AccessibilityRequest;
use crate::context::{AncestorMask, Session, TraversalContext};
use crate::decoration::background_and_borders;
use crate::document::Document;
use crate::embed::{EmbedTarget, embed_host_svg};
use crate::error::ConversionError;
use crate::pseudo::PseudoElementScope;
use crate::stacking::{LayerRef, LayerSetId};
use crate::surface::{NodeLayout, PseudoElement};
use crate::text::copy_text_styles;
use crate::traversal::walk_node;

/// Convert `element` and its subtree.
///
/// # Errors
///
/// Fatal conditions of this element or any descendant. Pseudo-element
/// synthesis is reverted before the error is returned.
pub(crate) fn handle_element(
    document: &mut Document,
    element: NodeId,
    context: &TraversalContext,
    session: &mut Session<'_>,
) -> Result<(), ConversionError> {
    let data = document
        .tree()
        .as_element(element)
        .cloned()
        .ok_or(ConversionError::NotAnElement(element))?;
    let layout = document.layout(element)?.clone();
    let bounds = layout.bounds;
    let style = &layout.style;
    let parent_style = match document.tree().parent(element) {
        Some(parent) if document.tree().as_element(parent).is_some() => Some(document.layout(parent)?.style.clone()),
        _ => None,
    };
    let intersects = bounds.intersects(&session.capture_area);

    let container = if data.is_html("a") && session.keep_links {
        svg_anchor(&data, session)
    } else {
        session.output.create_element("g")
    };
    let id = match data.id() {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => {
            let tag = data.tag_name.to_ascii_lowercase();
            session.ids.next_id(data.classes().first().copied().unwrap_or(tag.as_str()))
        }
    };
    let tree = session.output.tree_mut();
    tree.set_attribute(container, "data-tag", data.tag_name.to_ascii_lowercase());
    tree.set_attribute(container, "id", id.as_str());
    if let Some(class) = data.attribute("class").filter(|c| !c.is_empty()) {
        tree.set_attribute(container, "class", class);
    }
    if data.namespace == Namespace::Html
        && let Some(title) = data.attribute("title").filter(|t| !t.is_empty())
    {
        let svg_title = session.output.create_element("title");
        let tree = session.output.tree_mut();
        let text = tree.create_text(title);
        tree.append_child(svg_title, text);
        tree.prepend_child(container, svg_title);
    }

    let layer = LayerRef {
        set: context.stacking_layers,
        layer: determine_stacking_layer(style, parent_style.as_ref()),
    };
    let z_index = style.get("z-index");
    session
        .output
        .tree_mut()
        .set_attribute(container, "data-z-index", if z_index.is_empty() { "auto" } else { z_index });
    place_container(container, &id, layer, context, session);

    let own_layers = if establishes_stacking_context(style, parent_style.as_ref()) {
        session.output.tree_mut().set_attribute(container, "data-stacking-context", "true");
        log::debug!("{id} establishes a stacking context");
        Some(session.layer_sets.create(&session.output, container))
    } else {
        None
    };
    let mut child_context = TraversalContext {
        current_parent: container,
        stacking_layers: own_layers.unwrap_or(context.stacking_layers),
        parent_stacking_layer: Some(layer),
        ancestor_masks: context.ancestor_masks.clone(),
    };

    let opacity = style.get("opacity");
    if !opacity.is_empty() && opacity != "1" {
        session.output.tree_mut().set_attribute(container, "opacity", opacity);
    }

    let attributes = session.accessibility.attributes(AccessibilityRequest {
        document,
        element,
        labels: &session.labels,
        ids: &mut session.ids,
    });
    for (name, value) in attributes {
        session.output.tree_mut().set_attribute(container, &name, value);
    }

    let mut scope = PseudoElementScope::new(document);
    if data.namespace == Namespace::Html {
        scope.synthesize(element, &id, PseudoElement::Before);
        scope.synthesize(element, &id, PseudoElement::After);
    }

    if intersects {
        let decoration = background_and_borders(session, style, &bounds)?;
        for node in decoration {
            match own_layers {
                Some(set) => session.layer_sets.push(
                    LayerRef {
                        set,
                        layer: StackingLayer::RootBackgroundAndBorders,
                    },
                    node,
                ),
                None => session.output.tree_mut().append_child(container, node),
            }
        }
    }

    // <mask> rather than <clipPath>: more consumers support it.
    if style.clips_overflow() {
        let mask = session.output.create_element("mask");
        let mask_id = session.ids.next_id(&format!("mask-for-{id}"));
        let visible = filled_box(session, &bounds);
        let tree = session.output.tree_mut();
        tree.set_attribute(mask, "id", mask_id.as_str());
        tree.append_child(mask, visible);
        tree.append_child(container, mask);
        tree.set_attribute(container, "mask", format!("url(#{mask_id})"));
        child_context.ancestor_masks.insert(0, AncestorMask { mask, owner: element });
    }

    if data.namespace == Namespace::Html && style.is_out_of_flow_positioned() {
        punch_cutouts(&scope, &layout, &bounds, context, session);
    }

    let has_image_source = ["src", "srcset"]
        .iter()
        .any(|name| data.attribute(name).is_some_and(|v| !v.is_empty()));
    if intersects && data.is_html("img") && has_image_source {
        let image = image_element(&data, &layout, &id, session);
        session.output.tree_mut().append_child(container, image);
    } else if intersects && data.is_html("input") && bounds.has_area() {
        let value = layout.value.as_deref().or_else(|| data.attribute("value")).unwrap_or("");
        if !value.is_empty() {
            let text = input_text(style, &bounds, value, session);
            session.layer_sets.push(
                LayerRef {
                    set: child_context.stacking_layers,
                    layer: StackingLayer::InFlowInlineLevelNonPositionedDescendants,
                },
                text,
            );
        }
    } else if intersects && data.is_svg("svg") && style.is_visible() {
        let prefix = format!("{id}-");
        embed_host_svg(
            &scope,
            element,
            &mut session.output,
            EmbedTarget {
                parent: container,
                id_prefix: &prefix,
                keep_links: session.keep_links,
            },
        );
    } else {
        // Children can overflow a box outside of the capture area.
        let children = scope.tree().children(element).to_vec();
        for child in children {
            walk_node(&mut scope, child, &child_context, session)?;
        }
    }

    if let Some(set) = own_layers {
        flatten(set, session);
    }
    Ok(())
}

/// Attach the container to its parent, or to the bucket of its layer when
/// it paints in a different layer than its parent.
fn place_container(container: NodeId, id: &str, layer: LayerRef, context: &TraversalContext, session: &mut Session<'_>) {
    if context.parent_stacking_layer == Some(layer) {
        session.output.tree_mut().append_child(context.current_parent, container);
        return;
    }
    let tree = session.output.tree_mut();
    let owns = match tree.attribute(context.current_parent, "aria-owns") {
        Some(existing) if !existing.is_empty() => format!("{existing} {id}"),
        _ => id.to_string(),
    };
    tree.set_attribute(context.current_parent, "aria-owns", owns);
    session.layer_sets.push(layer, container);
}

fn flatten(set: LayerSetId, session: &mut Session<'_>) {
    session.layer_sets.flatten(set, &mut session.output);
}

/// A white `<rect>` for a mask: white is visible.
fn filled_box(session: &mut Session<'_>, bounds: &Rect) -> NodeId {
    let rect = session.output.create_box(bounds);
    session.output.tree_mut().set_attribute(rect, "fill", "#ffffff");
    rect
}

/// Absolutely positioned and fixed boxes escape the `overflow` clipping of
/// ancestors that are not inside their positioning reference. Their box is
/// added to each such ancestor mask, nearest first, up to the first mask
/// whose owner contains the positioning reference.
fn punch_cutouts(
    document: &Document,
    layout: &NodeLayout,
    bounds: &Rect,
    context: &TraversalContext,
    session: &mut Session<'_>,
) {
    let Some(offset_parent) = layout.offset_parent else {
        return;
    };
    for ancestor in &context.ancestor_masks {
        if !document.tree().is_descendant_of(ancestor.owner, offset_parent) {
            break;
        }
        log::trace!("cutout in mask {:?} for a box positioned outside of it", ancestor.mask);
        let cutout = filled_box(session, bounds);
        session.output.tree_mut().append_child(ancestor.mask, cutout);
    }
}

/// `<image>` covering the content box of an `<img>`.
fn image_element(data: &ElementData, layout: &NodeLayout, id: &str, session: &mut Session<'_>) -> NodeId {
    let bounds = &layout.bounds;
    let style = &layout.style;
    let href = match layout.current_src.as_deref() {
        Some(current) if !current.is_empty() => current.to_string(),
        _ => resolve_url(data.attribute("src").unwrap_or(""), session.location.as_deref()),
    };
    let padding_left = style.length_or_zero("padding-left", bounds.width);
    let padding_right = style.length_or_zero("padding-right", bounds.width);
    let padding_top = style.length_or_zero("padding-top", bounds.height);
    let padding_bottom = style.length_or_zero("padding-bottom", bounds.height);

    let image = session.output.create_element("image");
    let tree = session.output.tree_mut();
    // The inliner derives prefixes for spliced SVG images from this id.
    tree.set_attribute(image, "id", format!("{id}-image"));
    tree.set_attribute(image, "href", href);
    tree.set_attribute(image, "x", fmt_number(bounds.x + padding_left));
    tree.set_attribute(image, "y", fmt_number(bounds.y + padding_top));
    tree.set_attribute(image, "width", fmt_number(bounds.width - padding_left - padding_right));
    tree.set_attribute(image, "height", fmt_number(bounds.height - padding_top - padding_bottom));
    if let Some(alt) = data.attribute("alt").filter(|a| !a.is_empty()) {
        tree.set_attribute(image, "aria-label", alt);
    }
    image
}

/// The value of a form control, vertically centered between the top and
/// bottom padding edges.
fn input_text(style: &ComputedStyle, bounds: &Rect, value: &str, session: &mut Session<'_>) -> NodeId {
    let text = session.output.create_element("text");
    let tree = session.output.tree_mut();
    copy_text_styles(style, tree, text);
    tree.set_attribute(text, "dominant-baseline", "central");
    tree.set_attribute(text, "xml:space", "preserve");
    tree.set_attribute(
        text,
        "x",
        fmt_number(bounds.x + style.length_or_zero("padding-left", bounds.width)),
    );
    let top = bounds.top() + style.length_or_zero("padding-top", bounds.height);
    let bottom = bounds.bottom() - style.length_or_zero("padding-bottom", bounds.height);
    tree.set_attribute(text, "y", fmt_number(f64::midpoint(top, bottom)));
    let content = tree.create_text(value);
    tree.append_child(text, content);
    text
}

/// An SVG `<a>` carrying the navigation attributes of an HTML link.
fn svg_anchor(data: &ElementData, session: &mut Session<'_>) -> NodeId {
    let anchor = session.output.create_element("a");
    let tree = session.output.tree_mut();
    if let Some(href) = data.attribute("href") {
        let href = resolve_url(href, session.location.as_deref());
        if !href.starts_with("javascript:") {
            tree.set_attribute(anchor, "href", href);
        }
    }
    for name in ["rel", "target", "download"] {
        if let Some(value) = data.attribute(name).filter(|v| !v.is_empty()) {
            tree.set_attribute(anchor, name, value);
        }
    }
    anchor
}
