//! `@font-face` rules and their `src` descriptors.
//!
//! [CSS Fonts Level 4 § 4.1 The @font-face rule](https://www.w3.org/TR/css-fonts-4/#font-face-rule)
//!
//! "The @font-face rule allows for linking to fonts that are automatically
//! fetched and activated when needed."
//!
//! The generated SVG carries the page's `@font-face` rules in a `<style>`
//! element. Their `src` URLs are first made absolute (relative to the
//! stylesheet they came from) and may later be replaced by `data:` URLs.

use cssparser::{Delimiter, ParseError, Parser, ParserInput, Token};
use serde::{Deserialize, Serialize};
use vellum_common::url::resolve_url;

use crate::value::{SourceUrl, collect_functions};

/// An `@font-face` rule as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontFaceRule {
    /// [CSSOM § 6.4 cssText](https://drafts.csswg.org/cssom/#dom-cssrule-csstext):
    /// the serialized rule, `@font-face { font-family: ...; src: ...; }`.
    pub css_text: String,
    /// [CSSOM § 6.1 href](https://drafts.csswg.org/cssom/#dom-stylesheet-href)
    /// of the owning stylesheet; `None` for inline `<style>` sheets.
    #[serde(default)]
    pub stylesheet_href: Option<String>,
}

impl FontFaceRule {
    /// The rule text with every relative `src` URL resolved against the
    /// owning stylesheet (falling back to `document_url` for inline sheets).
    #[must_use]
    pub fn with_absolute_urls(&self, document_url: Option<&str>) -> String {
        let base = self.stylesheet_href.as_deref().or(document_url);
        rewrite_font_face_urls(&self.css_text, |url| Some(resolve_url(url, base)))
    }
}

/// [§ 4.1](https://www.w3.org/TR/css-fonts-4/#font-face-rule)
///
/// The `url()` sources of every top-level `@font-face` rule of a stylesheet,
/// in order. `local()` sources and `format()` hints are skipped.
#[must_use]
pub fn font_face_sources(stylesheet: &str) -> Vec<SourceUrl> {
    let mut input = ParserInput::new(stylesheet);
    let mut parser = Parser::new(&mut input);
    let mut sources = Vec::new();
    loop {
        let is_font_face = match parser.next() {
            Ok(Token::AtKeyword(name)) => name.eq_ignore_ascii_case("font-face"),
            Ok(_) => false,
            Err(_) => break,
        };
        if is_font_face {
            font_face_body(&mut parser, stylesheet, &mut sources);
        }
    }
    sources
}

/// Skip the prelude of an `@font-face` rule and scan its block.
fn font_face_body<'i>(parser: &mut Parser<'i, '_>, stylesheet: &'i str, sources: &mut Vec<SourceUrl>) {
    loop {
        match parser.next() {
            Ok(Token::CurlyBracketBlock) => break,
            Ok(Token::Semicolon) | Err(_) => return,
            Ok(_) => {}
        }
    }
    let _ = parser.parse_nested_block(|block| {
        while !block.is_exhausted() {
            let _ = block.parse_until_after(Delimiter::Semicolon, |declaration| {
                let is_src = declaration.expect_ident()?.eq_ignore_ascii_case("src");
                declaration.expect_colon()?;
                let mut functions = Vec::new();
                collect_functions(declaration, stylesheet, false, &mut functions);
                if is_src {
                    sources.extend(functions.into_iter().filter_map(|f| f.source_url().cloned()));
                }
                Ok::<_, ParseError<'i, ()>>(())
            });
        }
        Ok::<_, ParseError<'i, ()>>(())
    });
}

/// Every font URL referenced by `@font-face` rules of a stylesheet.
#[must_use]
pub fn font_face_urls(stylesheet: &str) -> Vec<String> {
    font_face_sources(stylesheet).into_iter().map(|source| source.url).collect()
}

/// Replace `src` URLs of all `@font-face` rules in a stylesheet.
///
/// `replace` receives each (unescaped) URL; returning `None` keeps it as is.
pub fn rewrite_font_face_urls(stylesheet: &str, mut replace: impl FnMut(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(stylesheet.len());
    let mut last = 0;
    for source in font_face_sources(stylesheet) {
        if let Some(new_url) = replace(&source.url) {
            out.push_str(&stylesheet[last..source.range.start]);
            out.push_str(&new_url);
            last = source.range.end;
        }
    }
    out.push_str(&stylesheet[last..]);
    out
}
