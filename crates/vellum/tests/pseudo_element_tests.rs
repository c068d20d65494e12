//! Integration tests for `::before`/`::after` conversion.
//!
//! Generated content is materialized in the source tree while its element is
//! converted; these tests check both the output and that the source is left
//! exactly as it was.

use vellum::{
    ConversionError, ConversionOptions, Document, NodeLayout, PseudoElement, PseudoElementLayout, Snapshot,
    TextGeometry, element_to_svg,
};
use vellum_css::{ComputedStyle, Rect};
use vellum_dom::{DomTree, Namespace, NodeId, to_markup};

fn style(pairs: &[(&str, &str)]) -> ComputedStyle {
    pairs.iter().copied().collect()
}

fn pseudo(content: &str, bounds: Rect) -> PseudoElementLayout {
    PseudoElementLayout {
        style: style(&[("display", "inline"), ("content", content), ("color", "rgb(0, 0, 255)")]),
        bounds,
        text: TextGeometry {
            glyphs: vec![Some(bounds); 3],
        },
    }
}

struct Fixture {
    document: Document,
    item: NodeId,
    pristine_markup: String,
    pristine_len: usize,
}

/// `<ul><li class="item">text</li></ul>` with a `::before` bullet on the item.
fn fixture() -> Fixture {
    let mut tree = DomTree::new();
    let list = tree.create_element("ul", Namespace::Html);
    tree.append_child(tree.root(), list);
    let item = tree.create_element("li", Namespace::Html);
    tree.set_attribute(item, "class", "item");
    tree.append_child(list, item);
    let text = tree.create_text("text");
    tree.append_child(item, text);

    let mut snapshot = Snapshot::new(None);
    snapshot.insert(list, NodeLayout::element(Rect::new(0.0, 0.0, 200.0, 20.0), style(&[("display", "block")])));
    snapshot.insert(item, NodeLayout::element(Rect::new(0.0, 0.0, 200.0, 20.0), style(&[("display", "list-item")])));
    snapshot.insert(
        text,
        NodeLayout::text((0..4).map(|i| Some(Rect::new(30.0 + f64::from(i) * 8.0, 0.0, 8.0, 20.0))).collect()),
    );
    snapshot.insert_pseudo(item, PseudoElement::Before, pseudo(r#""\2022  ""#, Rect::new(0.0, 0.0, 30.0, 20.0)));

    let pristine_markup = to_markup(&tree, tree.root());
    let pristine_len = tree.len();
    Fixture {
        document: Document::new(tree, snapshot),
        item,
        pristine_markup,
        pristine_len,
    }
}

fn assert_pristine(fixture: &Fixture) {
    let tree = fixture.document.tree();
    assert_eq!(tree.len(), fixture.pristine_len);
    assert_eq!(to_markup(tree, tree.root()), fixture.pristine_markup);
    assert!(tree.attribute(fixture.item, "data-pseudo-element-owner").is_none());
}

#[test]
fn test_before_content_is_converted_as_a_span() {
    let mut fixture = fixture();
    let list = fixture.document.tree().document_element().unwrap();
    let svg = element_to_svg(&mut fixture.document, list, ConversionOptions::default()).unwrap();

    let tree = svg.tree();
    let lines: Vec<String> = svg
        .elements_by_tag_name("tspan")
        .into_iter()
        .map(|span| tree.text_content(span))
        .collect();
    // The escape consumes one trailing space. The inline span paints in a
    // later layer than the list item's own text.
    assert_eq!(lines, ["text", "\u{2022} "]);

    // The synthesized span gets a container like any other element.
    let containers: Vec<&str> = tree
        .descendants(svg.root())
        .filter_map(|node| tree.attribute(node, "data-tag"))
        .collect();
    assert_eq!(containers, ["ul", "li", "span"]);
    let bullet = svg.elements_by_tag_name("text")[1];
    assert_eq!(tree.attribute(bullet, "fill"), Some("rgb(0, 0, 255)"));
    assert_eq!(tree.attribute(tree.first_child(bullet).unwrap(), "textLength"), Some("30"));

    assert_pristine(&fixture);
}

#[test]
fn test_after_content_becomes_last_text() {
    let mut fixture = fixture();
    let item = fixture.item;
    let mut snapshot = Snapshot::new(None);
    snapshot.insert(item, NodeLayout::element(Rect::new(0.0, 0.0, 200.0, 20.0), style(&[("display", "block")])));
    let text = fixture.document.tree().children(item)[0];
    snapshot.insert(text, NodeLayout::text(vec![Some(Rect::new(0.0, 0.0, 8.0, 20.0)); 4]));
    snapshot.insert_pseudo(item, PseudoElement::After, pseudo(r#""!""#, Rect::new(40.0, 0.0, 5.0, 20.0)));
    let tree = fixture.document.tree().clone();
    fixture.document = Document::new(tree, snapshot);

    let svg = element_to_svg(&mut fixture.document, item, ConversionOptions::default()).unwrap();
    let spans = svg.elements_by_tag_name("tspan");
    assert_eq!(spans.len(), 2);
    assert_eq!(svg.tree().text_content(spans[0]), "text");
    assert_eq!(svg.tree().text_content(spans[1]), "!");
    assert_pristine(&fixture);
}

#[test]
fn test_pseudo_element_without_string_content_is_skipped() {
    let mut fixture = fixture();
    let item = fixture.item;
    let mut snapshot = Snapshot::new(None);
    snapshot.insert(item, NodeLayout::element(Rect::new(0.0, 0.0, 200.0, 20.0), style(&[("display", "block")])));
    snapshot.insert_pseudo(item, PseudoElement::Before, pseudo("counter(item)", Rect::new(0.0, 0.0, 10.0, 20.0)));
    let tree = fixture.document.tree().clone();
    fixture.document = Document::new(tree, snapshot);

    let svg = element_to_svg(&mut fixture.document, item, ConversionOptions::default()).unwrap();
    let tree = svg.tree();
    assert!(tree.descendants(svg.root()).all(|node| tree.attribute(node, "data-tag") != Some("span")));
    assert_pristine(&fixture);
}

#[test]
fn test_source_is_restored_when_a_descendant_fails() {
    let mut fixture = fixture();
    let list = fixture.document.tree().document_element().unwrap();

    // A child of the item whose inset border color cannot be shaded.
    let mut tree = fixture.document.tree().clone();
    let broken = tree.create_element("div", Namespace::Html);
    tree.append_child(fixture.item, broken);
    let mut snapshot = Snapshot::new(None);
    for node in tree.descendants(tree.root()).collect::<Vec<_>>() {
        if tree.as_element(node).is_some() {
            snapshot.insert(node, NodeLayout::element(Rect::new(0.0, 0.0, 200.0, 20.0), style(&[("display", "block")])));
        }
    }
    snapshot.insert(
        broken,
        NodeLayout::element(
            Rect::new(0.0, 0.0, 200.0, 20.0),
            style(&[
                ("display", "block"),
                ("border-left-width", "2px"),
                ("border-left-style", "inset"),
                ("border-left-color", "hsl(120, 50%, 50%)"),
            ]),
        ),
    );
    snapshot.insert_pseudo(fixture.item, PseudoElement::Before, pseudo(r#""-""#, Rect::new(0.0, 0.0, 10.0, 20.0)));
    snapshot.insert_pseudo(fixture.item, PseudoElement::After, pseudo(r#""+""#, Rect::new(0.0, 0.0, 10.0, 20.0)));
    fixture.pristine_markup = to_markup(&tree, tree.root());
    fixture.pristine_len = tree.len();
    fixture.document = Document::new(tree, snapshot);

    let error = element_to_svg(&mut fixture.document, list, ConversionOptions::default()).unwrap_err();
    assert_eq!(error, ConversionError::UnexpectedColor("hsl(120, 50%, 50%)".to_string()));
    assert_pristine(&fixture);

    // The document converts again without leftovers of the failed attempt.
    let again = element_to_svg(&mut fixture.document, list, ConversionOptions::default()).unwrap_err();
    assert_eq!(again, error);
    assert_pristine(&fixture);
}

#[test]
fn test_svg_elements_get_no_pseudo_elements() {
    let mut tree = DomTree::new();
    let svg_element = tree.create_element("svg", Namespace::Svg);
    tree.append_child(tree.root(), svg_element);
    let mut snapshot = Snapshot::new(None);
    snapshot.insert(
        svg_element,
        NodeLayout::element(Rect::new(0.0, 0.0, 10.0, 10.0), style(&[("display", "inline"), ("visibility", "hidden")])),
    );
    snapshot.insert_pseudo(svg_element, PseudoElement::Before, pseudo(r#""x""#, Rect::new(0.0, 0.0, 10.0, 10.0)));
    let len = tree.len();
    let mut document = Document::new(tree, snapshot);

    let svg = element_to_svg(&mut document, svg_element, ConversionOptions::default()).unwrap();
    assert!(svg.elements_by_tag_name("text").is_empty());
    assert_eq!(document.tree().len(), len);
}
