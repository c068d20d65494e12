//! Conversion and inlining options.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use vellum_common::net::DEFAULT_USER_AGENT;
use vellum_css::Rect;

/// Options of one conversion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConversionOptions {
    /// The rectangle of interest, in the coordinate space of the page.
    ///
    /// Boxes and text lines outside of it are still traversed but not drawn.
    /// Defaults to the bounds of the converted element.
    pub capture_area: Option<Rect>,
    /// Convert `<a>` elements to SVG `<a>` elements instead of groups.
    pub keep_links: bool,
}

/// Options of the resource inlining pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineOptions {
    /// Upper bound for fetching one resource.
    pub timeout: Duration,
    /// User-Agent sent by [`HttpFetcher`](crate::inline::HttpFetcher).
    pub user_agent: String,
}

impl Default for InlineOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}
