//! Node dispatch.

use vellum_dom::{NodeId, NodeType};

use crate::context::{Session, TraversalContext};
use crate::document::Document;
use crate::element::handle_element;
use crate::error::ConversionError;
use crate::text::handle_text_node;

/// Convert a source node: elements and text produce output, anything else
/// (comments, doctype) is skipped.
pub(crate) fn walk_node(
    document: &mut Document,
    node: NodeId,
    context: &TraversalContext,
    session: &mut Session<'_>,
) -> Result<(), ConversionError> {
    match document.tree().get(node).map(|n| &n.node_type) {
        Some(NodeType::Element(_)) => handle_element(document, node, context, session),
        Some(NodeType::Text(_)) => handle_text_node(document, node, context, session),
        Some(NodeType::Document | NodeType::Comment(_)) | None => Ok(()),
    }
}
