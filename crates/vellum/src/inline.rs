//! Inlining of external resources into a generated SVG.
//!
//! A converted document still references images and fonts by URL. This pass
//! makes it self-contained:
//!
//! - `<image>` elements pointing to SVG documents are replaced by the
//!   embedded content (many consumers do not support nested SVG);
//! - other `<image>` elements get a base64 `data:` URL, the original URL is
//!   kept in `data-src`;
//! - font URLs in `@font-face` rules of `<style>` elements become `data:` URLs.
//!
//! All fetches run concurrently, each bounded by
//! [`InlineOptions::timeout`]. A failing resource is logged and left as it
//! is; it never affects other resources.

use std::collections::HashMap;
use std::future::Future;

use futures::future::join_all;
use vellum_common::net::{FetchError, FetchedResource, HttpClient};
use vellum_common::url::is_absolute;
use vellum_css::font_face::{font_face_urls, rewrite_font_face_urls};
use vellum_dom::NodeId;

use crate::embed::{EmbedTarget, ParsedSvg, embed_node};
use crate::error::{ConversionError, InlineError};
use crate::options::InlineOptions;
use crate::output::SvgDocument;

/// Source of resource bodies.
pub trait ResourceFetcher {
    /// Fetch `url`. Timeouts are applied by the caller.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<FetchedResource, FetchError>>;
}

/// Fetches over HTTP(S); `data:` URLs are decoded locally.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: HttpClient,
}

impl HttpFetcher {
    /// A fetcher sending `options.user_agent`.
    ///
    /// # Errors
    ///
    /// [`FetchError::Client`] when the HTTP client cannot be built.
    pub fn new(options: &InlineOptions) -> Result<Self, FetchError> {
        Ok(Self {
            client: HttpClient::new(&options.user_agent)?,
        })
    }
}

impl ResourceFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedResource, FetchError> {
        self.client.fetch(url).await
    }
}

/// Outcome of an inlining pass.
#[derive(Debug, Default)]
pub struct InlineSummary {
    /// `<image>` elements that now carry their content.
    pub inlined_images: usize,
    /// Font URLs replaced by `data:` URLs.
    pub inlined_fonts: usize,
    /// Resources left untouched, with the URL that failed.
    pub failures: Vec<(String, InlineError)>,
}

impl InlineSummary {
    fn record_failure(&mut self, url: &str, error: InlineError) {
        log::error!("Error inlining {url}: {error}");
        self.failures.push((url.to_string(), error));
    }
}

struct ImageJob {
    node: NodeId,
    href: String,
}

struct FontJob {
    stylesheet: NodeId,
    url: String,
}

/// Inlines resources using a [`ResourceFetcher`].
#[derive(Debug, Clone)]
pub struct Inliner<F> {
    fetcher: F,
    options: InlineOptions,
}

impl<F: ResourceFetcher> Inliner<F> {
    /// An inliner fetching through `fetcher`.
    pub const fn new(fetcher: F, options: InlineOptions) -> Self {
        Self { fetcher, options }
    }

    /// Inline every resource referenced in the subtree of `root`.
    ///
    /// Completes once every fetch has settled, successfully or not.
    pub async fn inline(&self, svg: &mut SvgDocument, root: NodeId) -> InlineSummary {
        let mut summary = InlineSummary::default();
        let images = collect_images(svg, root);
        let fonts = collect_fonts(svg, root, &mut summary);

        let (image_results, font_results) = futures::join!(
            join_all(images.iter().map(|job| self.fetch(&job.href))),
            join_all(fonts.iter().map(|job| self.fetch(&job.url))),
        );

        for (job, result) in images.iter().zip(image_results) {
            match result.and_then(|resource| inline_image(svg, job, &resource)) {
                Ok(true) => summary.inlined_images += 1,
                Ok(false) => {}
                Err(error) => summary.record_failure(&job.href, error),
            }
        }

        // Each stylesheet is rewritten once, after all of its fonts settled.
        let mut replacements: Vec<(NodeId, HashMap<String, String>)> = Vec::new();
        for (job, result) in fonts.iter().zip(font_results) {
            match result.and_then(|resource| font_data_url(&job.url, &resource)) {
                Ok(data_url) => {
                    summary.inlined_fonts += 1;
                    let index = match replacements.iter().position(|(sheet, _)| *sheet == job.stylesheet) {
                        Some(index) => index,
                        None => {
                            replacements.push((job.stylesheet, HashMap::new()));
                            replacements.len() - 1
                        }
                    };
                    let _ = replacements[index].1.insert(job.url.clone(), data_url);
                }
                Err(error) => summary.record_failure(&job.url, error),
            }
        }
        for (stylesheet, urls) in replacements {
            let css = svg.tree().text_content(stylesheet);
            let rewritten = rewrite_font_face_urls(&css, |url| urls.get(url).cloned());
            svg.tree_mut().set_text_content(stylesheet, &rewritten);
        }

        log::debug!(
            "inlined {} image(s) and {} font(s), {} failure(s)",
            summary.inlined_images,
            summary.inlined_fonts,
            summary.failures.len()
        );
        summary
    }

    async fn fetch(&self, url: &str) -> Result<FetchedResource, InlineError> {
        match tokio::time::timeout(self.options.timeout, self.fetcher.fetch(url)).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(InlineError::Timeout(url.to_string())),
        }
    }
}

fn collect_images(svg: &SvgDocument, root: NodeId) -> Vec<ImageJob> {
    let tree = svg.tree();
    tree.descendants(root)
        .filter(|&node| tree.as_element(node).is_some_and(|e| e.is_svg("image")))
        .filter_map(|node| {
            let href = tree
                .attribute(node, "href")
                .or_else(|| tree.attribute(node, "xlink:href"))
                .filter(|href| !href.is_empty())?;
            Some(ImageJob {
                node,
                href: href.to_string(),
            })
        })
        .collect()
}

fn collect_fonts(svg: &SvgDocument, root: NodeId, summary: &mut InlineSummary) -> Vec<FontJob> {
    let tree = svg.tree();
    let mut jobs = Vec::new();
    let stylesheets = tree
        .descendants(root)
        .filter(|&node| tree.as_element(node).is_some_and(|e| e.tag_name == "style"));
    for stylesheet in stylesheets {
        for url in font_face_urls(&tree.text_content(stylesheet)) {
            if url.starts_with("data:") {
                continue;
            }
            if !is_absolute(&url) {
                summary.record_failure(&url, InlineError::UnresolvableUrl(url.clone()));
                continue;
            }
            jobs.push(FontJob { stylesheet, url });
        }
    }
    jobs
}

/// Apply a fetched image. Returns whether the document changed.
fn inline_image(svg: &mut SvgDocument, job: &ImageJob, resource: &FetchedResource) -> Result<bool, InlineError> {
    if resource.media_type == "image/svg+xml" {
        splice_svg(svg, job, resource)?;
        return Ok(true);
    }
    if job.href.starts_with("data:") {
        return Ok(false);
    }
    let tree = svg.tree_mut();
    tree.set_attribute(job.node, "data-src", job.href.as_str());
    tree.set_attribute(job.node, "href", resource.to_data_url());
    Ok(true)
}

/// Replace an `<image>` by the content of the SVG document it shows.
fn splice_svg(svg: &mut SvgDocument, job: &ImageJob, resource: &FetchedResource) -> Result<(), InlineError> {
    let image_id = svg
        .tree()
        .attribute(job.node, "id")
        .filter(|id| !id.is_empty())
        .ok_or(ConversionError::MissingId)?
        .to_string();
    let markup = String::from_utf8_lossy(&resource.bytes);
    let mut parsed = ParsedSvg::parse(&markup).map_err(|message| InlineError::SvgParse {
        url: job.href.clone(),
        message,
    })?;

    let root = parsed.root();
    for name in ["x", "y", "width", "height"] {
        let value = svg.tree().attribute(job.node, name).unwrap_or("").to_string();
        parsed.tree_mut().set_attribute(root, name, value);
    }

    let mount = svg.create_element("g");
    let prefix = format!("{image_id}-");
    embed_node(
        &parsed,
        root,
        svg,
        EmbedTarget {
            parent: mount,
            id_prefix: &prefix,
            // Images are never interactive.
            keep_links: false,
        },
    );
    let tree = svg.tree_mut();
    tree.set_attribute(mount, "data-tag", "img");
    tree.set_attribute(mount, "role", "img");
    tree.replace(job.node, mount);
    Ok(())
}

fn font_data_url(url: &str, resource: &FetchedResource) -> Result<String, InlineError> {
    if !resource.media_type.starts_with("font/") && resource.media_type != "application/font-woff" {
        return Err(InlineError::InvalidFontType {
            url: url.to_string(),
            media_type: resource.media_type.clone(),
        });
    }
    Ok(resource.to_data_url())
}

/// Inline the resources of a whole document over HTTP with default options.
///
/// # Errors
///
/// Only when the HTTP client cannot be created; failures of single resources
/// are reported in the returned [`InlineSummary`].
pub async fn inline_resources(svg: &mut SvgDocument) -> Result<InlineSummary, InlineError> {
    let options = InlineOptions::default();
    let fetcher = HttpFetcher::new(&options)?;
    let root = svg.root();
    Ok(Inliner::new(fetcher, options).inline(svg, root).await)
}
