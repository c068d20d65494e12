//! Error types of the conversion engine and the resource inliner.

use thiserror::Error;
use vellum_common::net::FetchError;
use vellum_dom::NodeId;

/// Fatal conditions that abort the conversion of the affected subtree.
///
/// They propagate with `?` up to the caller of
/// [`Converter::element_to_svg`](crate::Converter::element_to_svg).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// The document has no rendering surface (no computed style, no geometry).
    #[error("document has no rendering surface")]
    MissingRenderingSurface,
    /// The node passed in (or the document element) is not an element.
    #[error("node {0:?} is not an element")]
    NotAnElement(NodeId),
    /// An `inset`/`outset` border color could not be shaded.
    #[error("unexpected color: {0}")]
    UnexpectedColor(String),
    /// An `<image>` selected for SVG splicing carries no id to derive a prefix from.
    #[error("<image> element must have an id")]
    MissingId,
}

/// Recoverable failures of a single resource during inlining.
///
/// Logged and collected in [`InlineSummary`](crate::InlineSummary); the
/// resource stays untouched and every other resource proceeds.
#[derive(Debug, Error)]
pub enum InlineError {
    /// The fetch did not settle in time.
    #[error("timeout fetching {0}")]
    Timeout(String),
    /// The request failed or the server answered with an error status.
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// A font URL did not answer with a font media type.
    #[error("invalid response type inlining font at {url}: expected font/* response, got {media_type}")]
    InvalidFontType {
        /// Requested URL.
        url: String,
        /// Media type of the response.
        media_type: String,
    },
    /// A fetched `image/svg+xml` document is not well-formed.
    #[error("could not parse SVG from {url}: {message}")]
    SvgParse {
        /// Requested URL.
        url: String,
        /// Parser message.
        message: String,
    },
    /// A font URL is relative and there is nothing to resolve it against.
    #[error("cannot resolve font URL {0}")]
    UnresolvableUrl(String),
    /// Splicing a fetched SVG into the output failed.
    #[error(transparent)]
    Embed(#[from] ConversionError),
}

/// [DOM § 2.2 DOMException](https://webidl.spec.whatwg.org/#idl-DOMException)
///
/// Only the code the text line splitter relies on.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DomException {
    /// "IndexSizeError: The index is not in the allowed range."
    #[error("IndexSizeError: the index is not in the allowed range")]
    IndexSize,
}
