//! Integration tests for converting rendered elements to SVG.

use vellum::{ConversionError, ConversionOptions, Converter, Document, NodeLayout, PrecomputedAccessibility, Snapshot, SvgDocument};
use vellum_css::{ComputedStyle, FontFaceRule, Rect};
use vellum_dom::{DomTree, Namespace, NodeId};

fn style(pairs: &[(&str, &str)]) -> ComputedStyle {
    pairs.iter().copied().collect()
}

fn element(tree: &mut DomTree, parent: NodeId, tag: &str) -> NodeId {
    let node = tree.create_element(tag, Namespace::Html);
    tree.append_child(parent, node);
    node
}

fn convert(tree: DomTree, snapshot: Snapshot, root: NodeId) -> SvgDocument {
    let mut document = Document::new(tree, snapshot);
    vellum::element_to_svg(&mut document, root, ConversionOptions::default()).unwrap()
}

/// Ids of the direct children of the layer group with the given name, in order.
fn layer_ids(svg: &SvgDocument, layer: &str) -> Vec<String> {
    let tree = svg.tree();
    let group = tree
        .descendants(svg.root())
        .find(|&node| tree.attribute(node, "data-stacking-layer") == Some(layer))
        .unwrap_or_else(|| panic!("no {layer} group in {}", svg.to_markup()));
    tree.children(group)
        .iter()
        .filter_map(|&child| tree.attribute(child, "id").map(str::to_string))
        .collect()
}

#[test]
fn test_root_carries_capture_area_and_generator_comment() {
    let mut tree = DomTree::new();
    let root = tree.root();
    let div = element(&mut tree, root, "div");
    let mut snapshot = Snapshot::new(Some("https://example.com/page"));
    snapshot.insert(div, NodeLayout::element(Rect::new(10.0, 20.0, 300.0, 150.5), style(&[("display", "block")])));

    let svg = convert(tree, snapshot, div);
    let markup = svg.to_markup();
    let tree = svg.tree();
    assert_eq!(tree.attribute(svg.root(), "width"), Some("300"));
    assert_eq!(tree.attribute(svg.root(), "height"), Some("150.5"));
    assert_eq!(tree.attribute(svg.root(), "viewBox"), Some("10 20 300 150.5"));
    assert!(markup.contains("<!-- Generated by vellum from https://example.com/page -->"));
}

#[test]
fn test_explicit_capture_area() {
    let mut tree = DomTree::new();
    let root = tree.root();
    let div = element(&mut tree, root, "div");
    let mut snapshot = Snapshot::new(None);
    snapshot.insert(div, NodeLayout::element(Rect::new(0.0, 0.0, 800.0, 600.0), style(&[("display", "block")])));

    let mut document = Document::new(tree, snapshot);
    let options = ConversionOptions {
        capture_area: Some(Rect::new(100.0, 50.0, 200.0, 100.0)),
        keep_links: false,
    };
    let svg = vellum::element_to_svg(&mut document, div, options).unwrap();
    assert_eq!(svg.tree().attribute(svg.root(), "viewBox"), Some("100 50 200 100"));
    assert!(svg.to_markup().contains("about:blank"));
}

#[test]
fn test_missing_rendering_surface() {
    let mut tree = DomTree::new();
    let root = tree.root();
    let div = element(&mut tree, root, "div");
    let mut document = Document::without_surface(tree);
    assert_eq!(
        vellum::element_to_svg(&mut document, div, ConversionOptions::default()).unwrap_err(),
        ConversionError::MissingRenderingSurface
    );
}

#[test]
fn test_text_node_is_not_an_element() {
    let mut tree = DomTree::new();
    let root = tree.root();
    let div = element(&mut tree, root, "div");
    let text = tree.create_text("hello");
    tree.append_child(div, text);
    let mut document = Document::new(tree, Snapshot::new(None));
    assert_eq!(
        Converter::default().element_to_svg(&mut document, text).unwrap_err(),
        ConversionError::NotAnElement(text)
    );
}

#[test]
fn test_empty_document_has_no_document_element() {
    let mut document = Document::new(DomTree::new(), Snapshot::new(None));
    assert_eq!(
        vellum::document_to_svg(&mut document, ConversionOptions::default()).unwrap_err(),
        ConversionError::NotAnElement(NodeId::ROOT)
    );
}

#[test]
fn test_font_faces_are_declared_with_absolute_urls() {
    let mut tree = DomTree::new();
    let root = tree.root();
    let div = element(&mut tree, root, "div");
    let mut snapshot = Snapshot::new(Some("https://example.com/css/"));
    snapshot.font_faces.push(FontFaceRule {
        css_text: r#"@font-face { font-family: "Inter"; src: url(inter.woff2) format("woff2"); }"#.to_string(),
        stylesheet_href: None,
    });
    snapshot.insert(div, NodeLayout::element(Rect::new(0.0, 0.0, 10.0, 10.0), style(&[("display", "block")])));

    let svg = convert(tree, snapshot, div);
    let styles = svg.elements_by_tag_name("style");
    assert_eq!(styles.len(), 1);
    assert!(svg.tree().text_content(styles[0]).contains("https://example.com/css/inter.woff2"));
}

#[test]
fn test_element_container_attributes() {
    let mut tree = DomTree::new();
    let root = tree.root();
    let section = element(&mut tree, root, "SECTION");
    tree.set_attribute(section, "class", "card wide");
    tree.set_attribute(section, "title", "Details");
    let named = element(&mut tree, section, "p");
    tree.set_attribute(named, "id", "intro");
    let mut snapshot = Snapshot::new(None);
    let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
    snapshot.insert(section, NodeLayout::element(bounds, style(&[("display", "block"), ("opacity", "0.5")])));
    snapshot.insert(named, NodeLayout::element(bounds, style(&[("display", "block")])));

    let svg = convert(tree, snapshot, section);
    let tree = svg.tree();
    let card = svg.element_by_id("card1").unwrap();
    assert_eq!(tree.attribute(card, "data-tag"), Some("section"));
    assert_eq!(tree.attribute(card, "class"), Some("card wide"));
    assert_eq!(tree.attribute(card, "opacity"), Some("0.5"));
    assert_eq!(tree.attribute(card, "data-stacking-context"), Some("true"));
    assert_eq!(tree.attribute(card, "data-z-index"), Some("auto"));
    let title = tree.first_child(card).unwrap();
    assert_eq!(tree.as_element(title).unwrap().tag_name, "title");
    assert_eq!(tree.text_content(title), "Details");
    assert!(svg.element_by_id("intro").is_some());
}

#[test]
fn test_painting_order_follows_z_index() {
    let mut tree = DomTree::new();
    let root = tree.root();
    let parent = element(&mut tree, root, "div");
    let block = element(&mut tree, parent, "div");
    tree.set_attribute(block, "id", "block");
    let front = element(&mut tree, parent, "div");
    tree.set_attribute(front, "id", "front");
    let back = element(&mut tree, parent, "div");
    tree.set_attribute(back, "id", "back");

    let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
    let mut snapshot = Snapshot::new(None);
    snapshot.insert(
        parent,
        NodeLayout::element(bounds, style(&[("display", "block"), ("position", "relative"), ("z-index", "0")])),
    );
    snapshot.insert(block, NodeLayout::element(bounds, style(&[("display", "block")])));
    snapshot.insert(
        front,
        NodeLayout::element(bounds, style(&[("display", "block"), ("position", "absolute"), ("z-index", "5")])),
    );
    snapshot.insert(
        back,
        NodeLayout::element(bounds, style(&[("display", "block"), ("position", "absolute"), ("z-index", "-1")])),
    );

    let svg = convert(tree, snapshot, parent);
    let tree = svg.tree();
    let container = svg.element_by_id("div1").unwrap();
    let layers: Vec<&str> = tree
        .children(container)
        .iter()
        .filter_map(|&child| tree.attribute(child, "data-stacking-layer"))
        .collect();
    assert_eq!(
        layers,
        [
            "childStackingContextsWithNegativeStackLevels",
            "inFlowNonInlineNonPositionedDescendants",
            "childStackingContextsWithPositiveStackLevels",
        ]
    );
    assert_eq!(layer_ids(&svg, "childStackingContextsWithNegativeStackLevels"), ["back"]);
    assert_eq!(layer_ids(&svg, "inFlowNonInlineNonPositionedDescendants"), ["block"]);
    assert_eq!(layer_ids(&svg, "childStackingContextsWithPositiveStackLevels"), ["front"]);

    // Positioned children paint in other layers than their parent.
    let owns = tree.attribute(container, "aria-owns").unwrap();
    assert_eq!(owns, "block front back");
}

#[test]
fn test_equal_z_index_keeps_source_order() {
    let mut tree = DomTree::new();
    let root = tree.root();
    let parent = element(&mut tree, root, "div");
    let mut children = Vec::new();
    for id in ["first", "second", "lower"] {
        let child = element(&mut tree, parent, "div");
        tree.set_attribute(child, "id", id);
        children.push(child);
    }

    let bounds = Rect::new(0.0, 0.0, 50.0, 50.0);
    let mut snapshot = Snapshot::new(None);
    snapshot.insert(parent, NodeLayout::element(bounds, style(&[("display", "block"), ("isolation", "isolate")])));
    for (child, z) in children.iter().zip(["2", "2", "1"]) {
        snapshot.insert(
            *child,
            NodeLayout::element(bounds, style(&[("display", "block"), ("position", "relative"), ("z-index", z)])),
        );
    }

    let svg = convert(tree, snapshot, parent);
    assert_eq!(
        layer_ids(&svg, "childStackingContextsWithPositiveStackLevels"),
        ["lower", "first", "second"]
    );
}

#[test]
fn test_background_and_uniform_border() {
    let mut tree = DomTree::new();
    let root = tree.root();
    let div = element(&mut tree, root, "div");
    let mut computed = style(&[("display", "block"), ("background-color", "rgb(0, 128, 0)")]);
    for side in ["top", "right", "bottom", "left"] {
        computed.set(&format!("border-{side}-width"), "2px");
        computed.set(&format!("border-{side}-style"), "dashed");
        computed.set(&format!("border-{side}-color"), "rgb(0, 0, 0)");
    }
    let mut snapshot = Snapshot::new(None);
    snapshot.insert(div, NodeLayout::element(Rect::new(5.0, 5.0, 40.0, 20.0), computed));

    let svg = convert(tree, snapshot, div);
    let rects = svg.elements_by_tag_name("rect");
    assert_eq!(rects.len(), 1);
    let tree = svg.tree();
    assert_eq!(tree.attribute(rects[0], "fill"), Some("rgb(0, 128, 0)"));
    assert_eq!(tree.attribute(rects[0], "stroke"), Some("rgb(0, 0, 0)"));
    assert_eq!(tree.attribute(rects[0], "stroke-width"), Some("2px"));
    assert_eq!(tree.attribute(rects[0], "stroke-dasharray"), Some("1"));
    assert_eq!(tree.attribute(rects[0], "x"), Some("5"));
    assert!(svg.elements_by_tag_name("line").is_empty());
}

#[test]
fn test_single_inset_border_side_is_shaded() {
    let mut tree = DomTree::new();
    let root = tree.root();
    let div = element(&mut tree, root, "div");
    let mut snapshot = Snapshot::new(None);
    snapshot.insert(
        div,
        NodeLayout::element(
            Rect::new(0.0, 0.0, 40.0, 20.0),
            style(&[
                ("display", "block"),
                ("border-top-width", "3px"),
                ("border-top-style", "inset"),
                ("border-top-color", "rgb(100, 150, 200)"),
            ]),
        ),
    );

    let svg = convert(tree, snapshot, div);
    let lines = svg.elements_by_tag_name("line");
    assert_eq!(lines.len(), 1);
    let tree = svg.tree();
    assert_eq!(tree.attribute(lines[0], "stroke"), Some("rgb(30, 45, 60)"));
    assert_eq!(tree.attribute(lines[0], "y1"), Some("0"));
    assert_eq!(tree.attribute(lines[0], "x2"), Some("40"));
    // Nothing to fill and no uniform border.
    assert!(svg.elements_by_tag_name("rect").is_empty());
}

#[test]
fn test_outset_border_shades_bottom_and_right_sides() {
    let mut tree = DomTree::new();
    let root = tree.root();
    let div = element(&mut tree, root, "div");
    let mut computed = style(&[("display", "block")]);
    for side in ["top", "right", "bottom", "left"] {
        computed.set(&format!("border-{side}-width"), "2px");
        computed.set(&format!("border-{side}-style"), "outset");
        computed.set(&format!("border-{side}-color"), "rgb(100, 150, 200)");
    }
    let mut snapshot = Snapshot::new(None);
    snapshot.insert(div, NodeLayout::element(Rect::new(0.0, 0.0, 40.0, 20.0), computed));

    let svg = convert(tree, snapshot, div);
    let tree = svg.tree();
    let lines = svg.elements_by_tag_name("line");
    assert_eq!(lines.len(), 4);
    let stroke_of = |x1: &str, y1: &str, x2: &str, y2: &str| {
        let line = lines
            .iter()
            .copied()
            .find(|&line| {
                tree.attribute(line, "x1") == Some(x1)
                    && tree.attribute(line, "y1") == Some(y1)
                    && tree.attribute(line, "x2") == Some(x2)
                    && tree.attribute(line, "y2") == Some(y2)
            })
            .unwrap_or_else(|| panic!("no line {x1},{y1} {x2},{y2} in {}", svg.to_markup()));
        tree.attribute(line, "stroke")
    };
    // Top and left keep the declared color.
    assert_eq!(stroke_of("0", "0", "40", "0"), Some("rgb(100, 150, 200)"));
    assert_eq!(stroke_of("0", "0", "0", "20"), Some("rgb(100, 150, 200)"));
    // Bottom and right are darkened.
    assert_eq!(stroke_of("0", "20", "40", "20"), Some("rgb(30, 45, 60)"));
    assert_eq!(stroke_of("40", "0", "40", "20"), Some("rgb(30, 45, 60)"));
    assert!(svg.elements_by_tag_name("rect").is_empty());
}

#[test]
fn test_linear_gradient_background() {
    let mut tree = DomTree::new();
    let root = tree.root();
    let div = element(&mut tree, root, "div");
    let mut snapshot = Snapshot::new(None);
    snapshot.insert(
        div,
        NodeLayout::element(
            Rect::new(0.0, 0.0, 100.0, 100.0),
            style(&[
                ("display", "block"),
                ("background-image", "linear-gradient(to right, rgb(255, 0, 0), rgba(0, 0, 255, 0.5))"),
            ]),
        ),
    );

    let svg = convert(tree, snapshot, div);
    let tree = svg.tree();
    let gradient = svg.element_by_id("linear-gradient1").unwrap();
    let stops = tree.children(gradient);
    assert_eq!(stops.len(), 2);
    assert_eq!(tree.attribute(stops[0], "stop-color"), Some("rgb(255,0,0)"));
    assert_eq!(tree.attribute(stops[1], "stop-opacity"), Some("0.5"));

    let rects = svg.elements_by_tag_name("rect");
    assert_eq!(tree.attribute(rects[0], "fill"), Some("url(#linear-gradient1)"));
    // The paint server precedes the box that references it.
    assert_eq!(tree.next_sibling(gradient), Some(rects[0]));
}

#[test]
fn test_background_image_pattern() {
    let mut tree = DomTree::new();
    let root = tree.root();
    let div = element(&mut tree, root, "div");
    let mut snapshot = Snapshot::new(Some("https://example.com/"));
    snapshot.insert(
        div,
        NodeLayout::element(
            Rect::new(0.0, 0.0, 100.0, 100.0),
            style(&[
                ("display", "block"),
                ("background-image", r#"url("tile.png")"#),
                ("background-size", "10px 10px"),
                ("background-repeat", "repeat"),
            ]),
        ),
    );

    let svg = convert(tree, snapshot, div);
    let tree = svg.tree();
    let pattern = svg.element_by_id("pattern1").unwrap();
    assert_eq!(tree.attribute(pattern, "width"), Some("10"));
    let image = svg.element_by_id("background-image1").unwrap();
    assert_eq!(tree.parent(image), Some(pattern));
    assert_eq!(tree.attribute(image, "href"), Some("https://example.com/tile.png"));
    assert_eq!(tree.attribute(image, "preserveAspectRatio"), Some("none"));
    let rects = svg.elements_by_tag_name("rect");
    assert_eq!(tree.attribute(rects[0], "fill"), Some("url(#pattern1)"));
}

#[test]
fn test_background_layers_paint_last_declared_first() {
    let mut tree = DomTree::new();
    let root = tree.root();
    let div = element(&mut tree, root, "div");
    let mut snapshot = Snapshot::new(None);
    snapshot.insert(
        div,
        NodeLayout::element(
            Rect::new(0.0, 0.0, 100.0, 100.0),
            style(&[
                ("display", "block"),
                ("background-image", r#"url("a.png"), url("b.png")"#),
                ("background-repeat", "no-repeat, no-repeat"),
            ]),
        ),
    );

    let svg = convert(tree, snapshot, div);
    let tree = svg.tree();
    let images = svg.elements_by_tag_name("image");
    let hrefs: Vec<_> = images.iter().map(|&image| tree.attribute(image, "href")).collect();
    assert_eq!(hrefs, vec![Some("b.png"), Some("a.png")]);
    assert_eq!(tree.attribute(images[0], "id"), Some("background-image1"));
    assert!(svg.elements_by_tag_name("pattern").is_empty());
}

#[test]
fn test_text_is_split_into_lines() {
    let mut tree = DomTree::new();
    let root = tree.root();
    let p = element(&mut tree, root, "p");
    let text = tree.create_text("ab cd");
    tree.append_child(p, text);

    let mut snapshot = Snapshot::new(None);
    snapshot.insert(
        p,
        NodeLayout::element(
            Rect::new(0.0, 0.0, 100.0, 40.0),
            style(&[("display", "block"), ("color", "rgb(1, 2, 3)"), ("font-size", "16px")]),
        ),
    );
    // "ab " on the first line, "cd" wrapped onto the second.
    snapshot.insert(
        text,
        NodeLayout::text(vec![
            Some(Rect::new(0.0, 0.0, 8.0, 20.0)),
            Some(Rect::new(8.0, 0.0, 8.0, 20.0)),
            Some(Rect::new(16.0, 0.0, 4.0, 20.0)),
            Some(Rect::new(0.0, 20.0, 8.0, 20.0)),
            Some(Rect::new(8.0, 20.0, 8.0, 20.0)),
        ]),
    );

    let svg = convert(tree, snapshot, p);
    let texts = svg.elements_by_tag_name("text");
    assert_eq!(texts.len(), 1);
    let tree = svg.tree();
    assert_eq!(tree.attribute(texts[0], "fill"), Some("rgb(1, 2, 3)"));
    assert_eq!(tree.attribute(texts[0], "font-size"), Some("16px"));
    assert_eq!(tree.attribute(texts[0], "dominant-baseline"), Some("text-after-edge"));

    let spans = svg.elements_by_tag_name("tspan");
    assert_eq!(spans.len(), 2);
    assert_eq!(tree.text_content(spans[0]), "ab ");
    assert_eq!(tree.attribute(spans[0], "y"), Some("20"));
    assert_eq!(tree.attribute(spans[0], "textLength"), Some("20"));
    assert_eq!(tree.text_content(spans[1]), "cd");
    assert_eq!(tree.attribute(spans[1], "x"), Some("0"));
    assert_eq!(tree.attribute(spans[1], "y"), Some("40"));
    assert_eq!(tree.attribute(spans[1], "lengthAdjust"), Some("spacingAndGlyphs"));
}

#[test]
fn test_text_outside_capture_area_and_collapsed_whitespace() {
    let mut tree = DomTree::new();
    let root = tree.root();
    let p = element(&mut tree, root, "p");
    let visible = tree.create_text("\n  ");
    tree.append_child(p, visible);

    let mut snapshot = Snapshot::new(None);
    snapshot.insert(p, NodeLayout::element(Rect::new(0.0, 0.0, 100.0, 20.0), style(&[("display", "block")])));
    snapshot.insert(visible, NodeLayout::text(vec![None, None, None]));

    let svg = convert(tree, snapshot, p);
    assert!(svg.elements_by_tag_name("text").is_empty());
}

#[test]
fn test_overflow_mask_with_cutout_for_escaping_box() {
    let mut tree = DomTree::new();
    let root = tree.root();
    let page = element(&mut tree, root, "div");
    let clip = element(&mut tree, page, "div");
    tree.set_attribute(clip, "id", "clip");
    let popup = element(&mut tree, clip, "div");
    tree.set_attribute(popup, "id", "popup");

    let mut snapshot = Snapshot::new(None);
    snapshot.insert(
        page,
        NodeLayout::element(Rect::new(0.0, 0.0, 500.0, 500.0), style(&[("display", "block"), ("position", "relative")])),
    );
    snapshot.insert(
        clip,
        NodeLayout::element(Rect::new(10.0, 10.0, 100.0, 100.0), style(&[("display", "block"), ("overflow", "hidden")])),
    );
    snapshot.insert(
        popup,
        NodeLayout {
            offset_parent: Some(page),
            ..NodeLayout::element(
                Rect::new(200.0, 200.0, 50.0, 50.0),
                style(&[("display", "block"), ("position", "absolute")]),
            )
        },
    );

    let svg = convert(tree, snapshot, page);
    let tree = svg.tree();
    let container = svg.element_by_id("clip").unwrap();
    assert_eq!(tree.attribute(container, "mask"), Some("url(#mask-for-clip1)"));
    let mask = svg.element_by_id("mask-for-clip1").unwrap();
    let rects = tree.children(mask);
    assert_eq!(rects.len(), 2);
    assert_eq!(tree.attribute(rects[0], "fill"), Some("#ffffff"));
    assert_eq!(tree.attribute(rects[1], "x"), Some("200"));
}

#[test]
fn test_no_cutout_when_positioned_inside_the_clipping_box() {
    let mut tree = DomTree::new();
    let root = tree.root();
    let clip = element(&mut tree, root, "div");
    tree.set_attribute(clip, "id", "clip");
    let inner = element(&mut tree, clip, "div");

    let mut snapshot = Snapshot::new(None);
    snapshot.insert(
        clip,
        NodeLayout::element(
            Rect::new(0.0, 0.0, 100.0, 100.0),
            style(&[("display", "block"), ("position", "relative"), ("overflow", "hidden")]),
        ),
    );
    snapshot.insert(
        inner,
        NodeLayout {
            offset_parent: Some(clip),
            ..NodeLayout::element(Rect::new(150.0, 0.0, 10.0, 10.0), style(&[("display", "block"), ("position", "absolute")]))
        },
    );

    let svg = convert(tree, snapshot, clip);
    let mask = svg.element_by_id("mask-for-clip1").unwrap();
    assert_eq!(svg.tree().children(mask).len(), 1);
}

#[test]
fn test_image_element() {
    let mut tree = DomTree::new();
    let root = tree.root();
    let img = element(&mut tree, root, "img");
    tree.set_attribute(img, "src", "photo.jpg");
    tree.set_attribute(img, "alt", "A photo");

    let mut snapshot = Snapshot::new(Some("https://example.com/gallery/"));
    snapshot.insert(
        img,
        NodeLayout::element(
            Rect::new(0.0, 0.0, 120.0, 80.0),
            style(&[("display", "inline"), ("padding-left", "10px"), ("padding-top", "5px")]),
        ),
    );

    let svg = convert(tree, snapshot, img);
    let tree = svg.tree();
    let image = svg.element_by_id("img1-image").unwrap();
    assert_eq!(tree.attribute(image, "href"), Some("https://example.com/gallery/photo.jpg"));
    assert_eq!(tree.attribute(image, "x"), Some("10"));
    assert_eq!(tree.attribute(image, "y"), Some("5"));
    assert_eq!(tree.attribute(image, "width"), Some("110"));
    assert_eq!(tree.attribute(image, "height"), Some("75"));
    assert_eq!(tree.attribute(image, "aria-label"), Some("A photo"));
}

#[test]
fn test_input_value() {
    let mut tree = DomTree::new();
    let root = tree.root();
    let input = element(&mut tree, root, "input");
    tree.set_attribute(input, "value", "initial");

    let mut snapshot = Snapshot::new(None);
    snapshot.insert(
        input,
        NodeLayout {
            value: Some("typed".to_string()),
            ..NodeLayout::element(
                Rect::new(0.0, 0.0, 200.0, 30.0),
                style(&[("display", "inline-block"), ("padding-top", "4px"), ("padding-bottom", "6px")]),
            )
        },
    );

    let svg = convert(tree, snapshot, input);
    let texts = svg.elements_by_tag_name("text");
    assert_eq!(texts.len(), 1);
    let tree = svg.tree();
    assert_eq!(tree.text_content(texts[0]), "typed");
    assert_eq!(tree.attribute(texts[0], "dominant-baseline"), Some("central"));
    assert_eq!(tree.attribute(texts[0], "y"), Some("14"));
}

#[test]
fn test_links_are_kept_on_request() {
    let build = || {
        let mut tree = DomTree::new();
        let root = tree.root();
        let a = element(&mut tree, root, "a");
        tree.set_attribute(a, "href", "/docs");
        tree.set_attribute(a, "target", "_blank");
        let mut snapshot = Snapshot::new(Some("https://example.com/index.html"));
        snapshot.insert(a, NodeLayout::element(Rect::new(0.0, 0.0, 10.0, 10.0), style(&[("display", "inline")])));
        (Document::new(tree, snapshot), a)
    };

    let (mut document, a) = build();
    let svg = vellum::element_to_svg(&mut document, a, ConversionOptions::default()).unwrap();
    assert!(svg.elements_by_tag_name("a").is_empty());

    let (mut document, a) = build();
    let options = ConversionOptions {
        keep_links: true,
        ..ConversionOptions::default()
    };
    let svg = vellum::element_to_svg(&mut document, a, options).unwrap();
    let anchors = svg.elements_by_tag_name("a");
    assert_eq!(anchors.len(), 1);
    assert_eq!(svg.tree().attribute(anchors[0], "href"), Some("https://example.com/docs"));
    assert_eq!(svg.tree().attribute(anchors[0], "target"), Some("_blank"));
}

#[test]
fn test_precomputed_accessibility_attributes() {
    let mut tree = DomTree::new();
    let root = tree.root();
    let nav = element(&mut tree, root, "nav");
    let mut snapshot = Snapshot::new(None);
    snapshot.insert(nav, NodeLayout::element(Rect::new(0.0, 0.0, 10.0, 10.0), style(&[("display", "block")])));
    let mut accessibility = PrecomputedAccessibility::new();
    accessibility.insert(
        nav,
        vec![
            ("role".to_string(), "navigation".to_string()),
            ("aria-label".to_string(), "Main".to_string()),
        ],
    );

    let mut document = Document::new(tree, snapshot);
    let svg = Converter::new(ConversionOptions::default())
        .with_accessibility(accessibility)
        .element_to_svg(&mut document, nav)
        .unwrap();
    let container = svg.element_by_id("nav1").unwrap();
    assert_eq!(svg.tree().attribute(container, "role"), Some("navigation"));
    assert_eq!(svg.tree().attribute(container, "aria-label"), Some("Main"));
}

#[test]
fn test_hidden_and_out_of_area_boxes_draw_nothing() {
    let mut tree = DomTree::new();
    let root = tree.root();
    let page = element(&mut tree, root, "div");
    let hidden = element(&mut tree, page, "div");
    let far = element(&mut tree, page, "div");

    let red = [("display", "block"), ("background-color", "rgb(255, 0, 0)")];
    let mut snapshot = Snapshot::new(None);
    snapshot.insert(page, NodeLayout::element(Rect::new(0.0, 0.0, 100.0, 100.0), style(&[("display", "block")])));
    let mut hidden_style = style(&red);
    hidden_style.set("visibility", "hidden");
    snapshot.insert(hidden, NodeLayout::element(Rect::new(0.0, 0.0, 50.0, 50.0), hidden_style));
    snapshot.insert(far, NodeLayout::element(Rect::new(1000.0, 1000.0, 50.0, 50.0), style(&red)));

    let svg = convert(tree, snapshot, page);
    assert!(svg.elements_by_tag_name("rect").is_empty());
    // Containers are still created for both.
    assert!(svg.element_by_id("div2").is_some());
    assert!(svg.element_by_id("div3").is_some());
}
