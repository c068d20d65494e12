//! Splicing nested SVG content into the output document.
//!
//! An `<svg>` found in the source (or fetched by the inliner) cannot simply
//! be nested: its viewport maps its own coordinate system onto the page, and
//! its ids would collide with the ids of the output. The root becomes a
//! `<g class="svg-content">` carrying the viewport mapping as a `transform`,
//! every other element is cloned with its ids and `#id` references
//! namespaced by a prefix, and its computed presentation is written back as
//! attributes.

use vellum_css::geometry::{parse_transform_list, parse_view_box, view_box_transform};
use vellum_css::value::{has_url_reference, rewrite_url_references};
use vellum_css::{ComputedStyle, Matrix, Rect, fmt_number, parse_css_length};
use vellum_dom::{DomTree, Namespace, NodeId, NodeType, XLINK_NAMESPACE};

use crate::document::Document;
use crate::output::SvgDocument;
use crate::text::copy_text_styles;

/// [SVG 2 § 13 Painting properties](https://svgwg.org/svg2-draft/painting.html)
///
/// Presentation properties copied from computed style, with their initial
/// values. Only values that differ from the initial value are written.
const PRESENTATION_ATTRIBUTES: &[(&str, &str)] = &[
    ("alignment-baseline", "auto"),
    ("baseline-shift", "0px"),
    ("clip-path", "none"),
    ("clip-rule", "nonzero"),
    ("color", ""),
    ("color-interpolation", "srgb"),
    ("color-interpolation-filters", "linearrgb"),
    ("color-rendering", "auto"),
    ("direction", "ltr"),
    ("fill", ""),
    ("fill-opacity", "1"),
    ("fill-rule", "nonzero"),
    ("filter", "none"),
    ("flood-color", "rgb(0, 0, 0)"),
    ("flood-opacity", "1"),
    ("image-rendering", "auto"),
    ("lighting-color", "rgb(255, 255, 255)"),
    ("marker-end", "none"),
    ("marker-mid", "none"),
    ("marker-start", "none"),
    ("mask", "none"),
    ("opacity", "1"),
    ("pointer-events", "auto"),
    ("shape-rendering", "auto"),
    ("stop-color", "rgb(0, 0, 0)"),
    ("stop-opacity", "1"),
    ("stroke", ""),
    ("stroke-dasharray", "none"),
    ("stroke-dashoffset", "0px"),
    ("stroke-linecap", "butt"),
    ("stroke-linejoin", "miter"),
    ("stroke-miterlimit", "4"),
    ("stroke-opacity", "1"),
    ("stroke-width", "1px"),
    ("transform", "none"),
    ("vector-effect", "none"),
    ("visibility", "visible"),
];

/// [SVG 2 § 5.5 `SVGGraphicsElement`](https://svgwg.org/svg2-draft/types.html#InterfaceSVGGraphicsElement)
const GRAPHICS_ELEMENTS: [&str; 17] = [
    "a",
    "circle",
    "ellipse",
    "foreignObject",
    "g",
    "image",
    "line",
    "path",
    "polygon",
    "polyline",
    "rect",
    "svg",
    "switch",
    "text",
    "textPath",
    "tspan",
    "use",
];

/// [SVG 2 § 11.11 `SVGTextContentElement`](https://svgwg.org/svg2-draft/text.html#InterfaceSVGTextContentElement)
const TEXT_CONTENT_ELEMENTS: [&str; 3] = ["text", "tspan", "textPath"];

/// Subtrees that are never copied.
const IGNORED_ELEMENTS: [&str; 3] = ["script", "style", "foreignObject"];

/// Where nested SVG content comes from.
pub trait VectorSource {
    /// The tree holding the content.
    fn tree(&self) -> &DomTree;

    /// Computed style of an element, if the content is rendered.
    fn style(&self, node: NodeId) -> Option<&ComputedStyle>;

    /// Matrix mapping the user space of `child` (an element child of the
    /// viewport `svg_root`), including `child`'s own `transform`, into the
    /// coordinate system of the output document.
    fn content_transform(&self, svg_root: NodeId, child: NodeId) -> Option<Matrix>;

    /// `viewBox` of the nearest viewport of `node`, for resolving percentages.
    fn viewport(&self, node: NodeId) -> Rect;
}

/// An `<svg>` element of the rendered source document.
///
/// Positions come from `getScreenCTM()`, i.e. page coordinates.
pub struct HostSvg<'d> {
    document: &'d Document,
}

impl<'d> HostSvg<'d> {
    /// Content of `document`.
    #[must_use]
    pub const fn new(document: &'d Document) -> Self {
        Self { document }
    }
}

impl VectorSource for HostSvg<'_> {
    fn tree(&self) -> &DomTree {
        self.document.tree()
    }

    fn style(&self, node: NodeId) -> Option<&ComputedStyle> {
        self.document.layout(node).ok().map(|layout| &layout.style)
    }

    fn content_transform(&self, _svg_root: NodeId, child: NodeId) -> Option<Matrix> {
        self.document.layout(child).ok()?.screen_ctm
    }

    fn viewport(&self, node: NodeId) -> Rect {
        nearest_viewport(self.tree(), node)
            .and_then(|svg| self.document.layout(svg).ok()?.view_box)
            .unwrap_or_default()
    }
}

/// A standalone SVG document, e.g. an image fetched by the inliner.
///
/// Nothing is rendered, so there is no computed style; positions are derived
/// from the root's `x`/`y`/`width`/`height`, `viewBox` and
/// `preserveAspectRatio` attributes.
pub struct ParsedSvg {
    tree: DomTree,
    root: NodeId,
}

impl ParsedSvg {
    /// Parse SVG markup.
    ///
    /// # Errors
    ///
    /// The parser message when the markup is not well-formed XML.
    pub fn parse(markup: &str) -> Result<Self, String> {
        let parsed = roxmltree::Document::parse(markup).map_err(|e| e.to_string())?;
        let mut tree = DomTree::new();
        let document_root = tree.root();
        import_children(parsed.root(), &mut tree, document_root);
        let root = tree.document_element().ok_or_else(|| "document has no root element".to_string())?;
        Ok(Self { tree, root })
    }

    /// The document element.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Mutable access to the tree, e.g. to position the root.
    pub const fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

impl VectorSource for ParsedSvg {
    fn tree(&self) -> &DomTree {
        &self.tree
    }

    fn style(&self, _node: NodeId) -> Option<&ComputedStyle> {
        None
    }

    fn content_transform(&self, svg_root: NodeId, child: NodeId) -> Option<Matrix> {
        let number = |name: &str| {
            self.tree
                .attribute(svg_root, name)
                .and_then(|v| v.trim().trim_end_matches("px").parse::<f64>().ok())
                .unwrap_or(0.0)
        };
        let viewport = Rect::new(number("x"), number("y"), number("width"), number("height"));
        let view_box = self
            .tree
            .attribute(svg_root, "viewBox")
            .and_then(parse_view_box)
            .unwrap_or_default();
        let mapping = view_box_transform(
            &view_box,
            &viewport,
            self.tree.attribute(svg_root, "preserveAspectRatio"),
        );
        let own = self
            .tree
            .attribute(child, "transform")
            .and_then(parse_transform_list)
            .unwrap_or(Matrix::IDENTITY);
        Some(mapping.multiply(&own))
    }

    fn viewport(&self, node: NodeId) -> Rect {
        nearest_viewport(&self.tree, node)
            .and_then(|svg| self.tree.attribute(svg, "viewBox"))
            .and_then(parse_view_box)
            .unwrap_or_default()
    }
}

/// Copy a roxmltree subtree into `tree` under `parent`.
fn import_children(node: roxmltree::Node<'_, '_>, tree: &mut DomTree, parent: NodeId) {
    for child in node.children() {
        if child.is_element() {
            let namespace = match child.tag_name().namespace() {
                // A standalone SVG document without xmlns is still SVG.
                None => Namespace::Svg,
                uri => Namespace::from_uri(uri),
            };
            let element = tree.create_element(child.tag_name().name(), namespace);
            for attribute in child.attributes() {
                let name = match attribute.namespace() {
                    Some(XLINK_NAMESPACE) => format!("xlink:{}", attribute.name()),
                    Some("http://www.w3.org/XML/1998/namespace") => format!("xml:{}", attribute.name()),
                    _ => attribute.name().to_string(),
                };
                tree.set_attribute(element, &name, attribute.value());
            }
            tree.append_child(parent, element);
            import_children(child, tree, element);
        } else if child.is_text()
            && let Some(text) = child.text()
        {
            let text = tree.create_text(text);
            tree.append_child(parent, text);
        }
    }
}

/// `ownerSVGElement`: the nearest `<svg>` ancestor.
fn nearest_viewport(tree: &DomTree, node: NodeId) -> Option<NodeId> {
    tree.ancestors(node)
        .find(|&ancestor| tree.as_element(ancestor).is_some_and(|e| e.is_svg("svg")))
}

/// Where embedded content goes and how it is namespaced.
#[derive(Debug, Clone, Copy)]
pub struct EmbedTarget<'p> {
    /// Output node the content is appended to.
    pub parent: NodeId,
    /// Prefix for ids and `#id` references.
    pub id_prefix: &'p str,
    /// Keep `<a>` elements as links.
    pub keep_links: bool,
}

/// Clone the SVG node `node` of `source` into `output`.
///
/// Text is copied verbatim; non-SVG elements (and everything below them)
/// are dropped.
pub fn embed_node(source: &impl VectorSource, node: NodeId, output: &mut SvgDocument, target: EmbedTarget<'_>) {
    let tree = source.tree();
    match tree.get(node).map(|n| &n.node_type) {
        Some(NodeType::Element(element)) if element.namespace == Namespace::Svg => {
            if !IGNORED_ELEMENTS.contains(&element.tag_name.as_str()) {
                embed_element(source, node, output, target);
            }
        }
        Some(NodeType::Text(text)) => {
            let clone = output.tree_mut().create_text(text);
            output.tree_mut().append_child(target.parent, clone);
        }
        _ => {}
    }
}

fn embed_element(source: &impl VectorSource, node: NodeId, output: &mut SvgDocument, target: EmbedTarget<'_>) {
    let tree = source.tree();
    let Some(element) = tree.as_element(node) else {
        return;
    };

    let clone = if element.tag_name == "svg" {
        content_container(source, node, output)
    } else {
        clone_element(source, node, output, target)
    };
    output.tree_mut().append_child(target.parent, clone);

    for &child in tree.children(node) {
        embed_node(
            source,
            child,
            output,
            EmbedTarget {
                parent: clone,
                ..target
            },
        );
    }
}

/// The `<g class="svg-content">` standing in for a viewport element.
fn content_container(source: &impl VectorSource, svg_root: NodeId, output: &mut SvgDocument) -> NodeId {
    let tree = source.tree();
    let container = output.create_element("g");
    let out = output.tree_mut();

    let mut classes = vec!["svg-content"];
    if let Some(element) = tree.as_element(svg_root) {
        classes.extend(element.classes());
    }
    out.set_attribute(container, "class", classes.join(" "));
    for (attribute, data) in [("viewBox", "data-view-box"), ("width", "data-width"), ("height", "data-height")] {
        out.set_attribute(container, data, tree.attribute(svg_root, attribute).unwrap_or(""));
    }

    // The viewport mapping is read off the first graphics child; its own
    // transform must stay on the child only.
    let first_graphics_child = tree.children(svg_root).iter().copied().find(|&child| {
        tree.as_element(child)
            .is_some_and(|e| e.namespace == Namespace::Svg && GRAPHICS_ELEMENTS.contains(&e.tag_name.as_str()))
    });
    if let Some(child) = first_graphics_child
        && let Some(mut matrix) = source.content_transform(svg_root, child)
    {
        if let Some(existing) = tree.attribute(child, "transform").and_then(parse_transform_list)
            && !existing.is_identity()
        {
            match existing.inverse() {
                Some(inverse) => matrix = matrix.multiply(&inverse),
                None => log::debug!("transform of the first SVG child is not invertible"),
            }
        }
        out.set_attribute(container, "transform", matrix.to_transform_function());
    }
    container
}

/// A shallow, sanitized, namespaced clone of a non-root SVG element.
fn clone_element(source: &impl VectorSource, node: NodeId, output: &mut SvgDocument, target: EmbedTarget<'_>) -> NodeId {
    let tree = source.tree();
    let Some(element) = tree.as_element(node) else {
        return output.create_element("g");
    };

    if element.tag_name == "a" && !target.keep_links {
        return output.create_element("g");
    }

    let clone = output.create_element(&element.tag_name);
    let out = output.tree_mut();
    for (name, value) in &element.attrs {
        let local_name = name.rsplit(':').next().unwrap_or(name);
        // Event handlers and script URLs do not survive.
        if local_name.starts_with("on") || (local_name == "href" && value.starts_with("javascript:")) {
            continue;
        }
        out.set_attribute(clone, name, value.as_str());
    }

    if GRAPHICS_ELEMENTS.contains(&element.tag_name.as_str())
        && let Some(style) = source.style(node)
    {
        let viewport = source.viewport(node);
        copy_presentation_attributes(style, out, clone, &viewport);
        if TEXT_CONTENT_ELEMENTS.contains(&element.tag_name.as_str()) {
            copy_text_styles(style, out, clone);
        }
    }

    namespace_references(out, clone, target.id_prefix);
    clone
}

/// Write every presentation property that differs from its initial value.
///
/// [SVG 2 § 8.9 Units](https://svgwg.org/svg2-draft/coords.html#Units):
/// percentages refer to the diagonal of the current viewport.
fn copy_presentation_attributes(style: &ComputedStyle, out: &mut DomTree, clone: NodeId, viewport: &Rect) {
    for &(property, initial) in PRESENTATION_ATTRIBUTES {
        let value = style.get(property);
        if value.is_empty() || value == initial {
            continue;
        }
        if value.ends_with('%') {
            let resolved = parse_css_length(value, viewport.diagonal()).unwrap_or(0.0);
            out.set_attribute(clone, property, fmt_number(resolved));
        } else {
            out.set_attribute(clone, property, value);
        }
    }
}

/// Prefix the element's id and every reference to an id.
fn namespace_references(out: &mut DomTree, clone: NodeId, prefix: &str) {
    let Some(element) = out.as_element_mut(clone) else {
        return;
    };
    for (name, value) in &mut element.attrs {
        let local_name = name.rsplit(':').next().unwrap_or(name);
        if name == "id" {
            value.insert_str(0, prefix);
        } else if local_name == "href" {
            if value.starts_with('#') {
                value.insert_str(1, prefix);
            }
        } else if has_url_reference(value) {
            *value = rewrite_url_references(value, prefix);
        }
    }
}

/// Embed the source `<svg>` element `svg` into `parent`.
pub(crate) fn embed_host_svg(document: &Document, svg: NodeId, output: &mut SvgDocument, target: EmbedTarget<'_>) {
    log::debug!("embedding <svg> with prefix {}", target.id_prefix);
    embed_node(&HostSvg::new(document), svg, output, target);
}
