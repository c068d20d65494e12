//! Scanning of serialized CSS component values.
//!
//! [CSS Syntax Level 3 § 5.4.7 Consume a component value](https://www.w3.org/TR/css-syntax-3/#consume-component-value)
//!
//! Values are tokenized with `cssparser`; the helpers here report where
//! top-level commas, functions (`url()`, `linear-gradient()`), strings and
//! `url()` arguments sit in the source text so callers can slice or splice it.

use std::ops::Range;

use cssparser::{Delimiter, ParseError, Parser, ParserInput, SourcePosition, Token};

/// A function found in a component value list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssFunction<'a> {
    /// Function name, as written (e.g. `url`, `-webkit-linear-gradient`).
    pub name: &'a str,
    /// Raw text between the parentheses.
    pub arguments: &'a str,
    /// Byte range of the whole function, name through closing parenthesis.
    pub span: Range<usize>,
    url: Option<SourceUrl>,
}

/// The URL carried by a `url()` function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUrl {
    /// The URL with CSS escapes resolved.
    pub url: String,
    /// Byte range of the URL text in the scanned string, inside any quotes.
    pub range: Range<usize>,
}

impl<'a> CssFunction<'a> {
    fn new(source: &'a str, span: Range<usize>, url: Option<SourceUrl>) -> Self {
        let text = &source[span.clone()];
        let open = text.find('(').unwrap_or(text.len());
        let close = if text.ends_with(')') { text.len() - 1 } else { text.len() };
        Self {
            name: &text[..open],
            arguments: text.get(open + 1..close).unwrap_or_default(),
            span,
            url,
        }
    }

    /// The full source text of the function.
    #[must_use]
    pub fn source<'s>(&self, value: &'s str) -> &'s str {
        &value[self.span.clone()]
    }

    /// The unescaped argument of a `url()` function; `None` for other
    /// functions and for `url()` without a URL.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_ref().map(|source| source.url.as_str()).filter(|url| !url.is_empty())
    }

    /// Where the `url()` argument sits in the scanned string.
    #[must_use]
    pub const fn source_url(&self) -> Option<&SourceUrl> {
        self.url.as_ref()
    }
}

type ScanResult<'i> = Result<(), ParseError<'i, ()>>;

/// Consume the rest of the current block.
fn drain<'i>(parser: &mut Parser<'i, '_>) -> ScanResult<'i> {
    while parser.next_including_whitespace_and_comments().is_ok() {}
    Ok(())
}

/// Byte range of `text` within `source` after trimming whitespace, where
/// `text` starts at `start`.
fn trimmed_range(text: &str, start: usize) -> Range<usize> {
    let leading = text.len() - text.trim_start().len();
    start + leading..start + text.trim_end().len()
}

/// `url(<string>)`: the unescaped string and the range between its quotes.
fn quoted_url<'i>(block: &mut Parser<'i, '_>) -> Option<SourceUrl> {
    block.skip_whitespace();
    let start = block.position();
    let url = block.try_parse(|b| b.expect_string().map(|s| String::from(&**s))).ok()?;
    let range = quoted_range(block.slice_from(start), start);
    Some(SourceUrl { url, range })
}

fn quoted_range(token: &str, start: SourcePosition) -> Range<usize> {
    let start = start.byte_index();
    let closed = token.len() >= 2 && token.ends_with(&token[..1]);
    start + 1..start + if closed { token.len() - 1 } else { token.len() }
}

/// `url(bare)`: the range of the bare URL inside the parentheses.
fn unquoted_url_range(source: &str, span: &Range<usize>) -> Range<usize> {
    let text = &source[span.clone()];
    let open = text.find('(').map_or(0, |i| i + 1);
    let close = if text.ends_with(')') { text.len() - 1 } else { text.len() };
    trimmed_range(&text[open..close.max(open)], span.start + open)
}

/// Collect the functions of the current block into `found`, in source order.
/// With `deep`, functions nested in function arguments are reported too.
pub(crate) fn collect_functions<'i>(
    parser: &mut Parser<'i, '_>,
    source: &'i str,
    deep: bool,
    found: &mut Vec<CssFunction<'i>>,
) {
    loop {
        let start = parser.position();
        let Ok(token) = parser.next_including_whitespace_and_comments() else {
            break;
        };
        match token.clone() {
            Token::UnquotedUrl(url) => {
                let span = start.byte_index()..parser.position().byte_index();
                let range = unquoted_url_range(source, &span);
                found.push(CssFunction::new(
                    source,
                    span,
                    Some(SourceUrl {
                        url: String::from(&*url),
                        range,
                    }),
                ));
            }
            Token::Function(name) => {
                let is_url = name.eq_ignore_ascii_case("url");
                let mut nested = Vec::new();
                let url = parser
                    .parse_nested_block(|block| {
                        let url = if is_url { quoted_url(block) } else { None };
                        collect_functions(block, source, deep, &mut nested);
                        Ok::<_, ParseError<'i, ()>>(url)
                    })
                    .ok()
                    .flatten();
                let span = start.byte_index()..parser.position().byte_index();
                found.push(CssFunction::new(source, span, url));
                if deep {
                    found.append(&mut nested);
                }
            }
            _ => {}
        }
    }
}

/// Split a comma-separated list at top-level commas, trimming each item.
///
/// `url("a,b.png"), linear-gradient(red, blue)` yields two items.
#[must_use]
pub fn split_top_level_commas(value: &str) -> Vec<&str> {
    let mut input = ParserInput::new(value);
    let mut parser = Parser::new(&mut input);
    let mut items = Vec::new();
    loop {
        let start = parser.position();
        let _ = parser.parse_until_before(Delimiter::Comma, drain);
        let item = parser.slice_from(start).trim();
        if !item.is_empty() {
            items.push(item);
        }
        if parser.next().is_err() {
            break;
        }
    }
    items
}

/// The top-level component values of a list, as trimmed source slices.
///
/// Commas and `/` separators are dropped: `rgb(1 2 3 / 50%)` arguments give
/// `["1", "2", "3", "50%"]`, `to right bottom` gives three components.
#[must_use]
pub fn components(value: &str) -> Vec<&str> {
    let mut input = ParserInput::new(value);
    let mut parser = Parser::new(&mut input);
    let mut found = Vec::new();
    loop {
        parser.skip_whitespace();
        let start = parser.position();
        let (separator, block) = match parser.next() {
            Err(_) => break,
            Ok(Token::Comma | Token::Delim('/')) => (true, false),
            Ok(
                Token::Function(_) | Token::ParenthesisBlock | Token::SquareBracketBlock | Token::CurlyBracketBlock,
            ) => (false, true),
            Ok(_) => (false, false),
        };
        if block {
            let _ = parser.parse_nested_block(drain);
        }
        if !separator {
            found.push(parser.slice_from(start).trim_end());
        }
    }
    found
}

/// Find every top-level function in a component value list, in source order.
///
/// Functions nested inside other functions are not reported separately.
#[must_use]
pub fn functions(value: &str) -> Vec<CssFunction<'_>> {
    scan_functions(value, false)
}

fn scan_functions(value: &str, deep: bool) -> Vec<CssFunction<'_>> {
    let mut input = ParserInput::new(value);
    let mut parser = Parser::new(&mut input);
    let mut found = Vec::new();
    collect_functions(&mut parser, value, deep, &mut found);
    found
}

/// [§ 4.3.5 Consume a string token](https://www.w3.org/TR/css-syntax-3/#consume-string-token)
///
/// The first top-level string of a value, with escapes resolved.
///
/// Used for the `content` property of pseudo-elements, where only string
/// content is rendered. Strings inside `attr()`, `counter()` or `url()` do
/// not count.
#[must_use]
pub fn first_string(value: &str) -> Option<String> {
    let mut input = ParserInput::new(value);
    let mut parser = Parser::new(&mut input);
    loop {
        match parser.next() {
            Ok(Token::QuotedString(string)) => return Some(String::from(&**string)),
            Ok(_) => {}
            Err(_) => return None,
        }
    }
}

/// Prefix the fragment of every `url(#id)` reference in a value.
///
/// `fill: url(#grad)` with prefix `logo-` becomes `url(#logo-grad)`. URLs
/// pointing to other documents (`url(other.svg#id)`) are left alone.
#[must_use]
pub fn rewrite_url_references(value: &str, prefix: &str) -> String {
    let mut out = String::with_capacity(value.len() + prefix.len());
    let mut last = 0;
    for function in scan_functions(value, true) {
        let Some(source) = function.source_url().filter(|source| source.url.starts_with('#')) else {
            continue;
        };
        let Some(hash) = value[source.range.clone()].find('#') else {
            continue;
        };
        let insert_at = source.range.start + hash + 1;
        out.push_str(&value[last..insert_at]);
        out.push_str(prefix);
        last = insert_at;
    }
    out.push_str(&value[last..]);
    out
}

/// Whether a value contains a `url(#…)` fragment reference.
#[must_use]
pub fn has_url_reference(value: &str) -> bool {
    scan_functions(value, true)
        .iter()
        .any(|function| function.url().is_some_and(|url| url.starts_with('#')))
}
