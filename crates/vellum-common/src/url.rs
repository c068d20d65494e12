//! URL resolution utilities.
//!
//! [URL Standard](https://url.spec.whatwg.org/)
//!
//! The host already resolves `src`/`href` of elements it reports; these helpers
//! cover the references the converter finds itself inside CSS values
//! (`background-image: url(...)`, `@font-face { src: url(...) }`).

/// [URL Standard § 4.3](https://url.spec.whatwg.org/#url-parsing)
///
/// "An absolute-URL string is a URL-scheme string, followed by U+003A (:),
/// followed by a scheme-specific part."
///
/// A scheme is an ASCII alpha followed by alphanumerics, `+`, `-` or `.`.
#[must_use]
pub fn is_absolute(url: &str) -> bool {
    let Some((scheme, _)) = url.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Resolve a potentially relative URL against a base URL.
///
/// # Algorithm
///
/// [§ 2.5 URLs](https://html.spec.whatwg.org/multipage/urls-and-fetching.html#resolving-urls)
///
/// STEP 1: "If url is an absolute URL, return url."
///
/// STEP 2: "Otherwise, resolve url relative to base."
///
/// NOTE: This is a simplified implementation of the URL Standard's parser that
/// handles the reference forms found in stylesheets: protocol-relative,
/// absolute-path, fragment-only, query-only and path-relative (with `.` and
/// `..` segments).
#[must_use]
pub fn resolve_url(href: &str, base_url: Option<&str>) -> String {
    // STEP 1
    if is_absolute(href) {
        return href.to_string();
    }

    // STEP 2
    let Some(base) = base_url.filter(|b| is_absolute(b)) else {
        return href.to_string();
    };
    let base_without_fragment = base.split_once('#').map_or(base, |(b, _)| b);

    if href.is_empty() {
        return base_without_fragment.to_string();
    }
    if href.starts_with('#') {
        return format!("{base_without_fragment}{href}");
    }
    let base_without_query = base_without_fragment
        .split_once('?')
        .map_or(base_without_fragment, |(b, _)| b);
    if href.starts_with('?') {
        return format!("{base_without_query}{href}");
    }

    let scheme_end = base.find(':').unwrap_or(0);
    let scheme = &base[..scheme_end];
    if href.starts_with("//") {
        // Protocol-relative URL - prepend scheme from base
        return format!("{scheme}:{href}");
    }

    // Split base into "scheme://authority" and the path.
    let (origin, base_path) = base_without_query.strip_prefix(&format!("{scheme}://")).map_or_else(
        || (format!("{scheme}:"), &base_without_query[scheme_end + 1..]),
        |after_scheme| match after_scheme.find('/') {
            Some(path_start) => (
                format!("{scheme}://{}", &after_scheme[..path_start]),
                &after_scheme[path_start..],
            ),
            None => (format!("{scheme}://{after_scheme}"), "/"),
        },
    );

    let joined = if href.starts_with('/') {
        href.to_string()
    } else {
        let base_dir = base_path.rsplit_once('/').map_or("", |(dir, _)| dir);
        format!("{base_dir}/{href}")
    };

    format!("{origin}{}", remove_dot_segments(&joined))
}

/// [RFC 3986 § 5.2.4 Remove Dot Segments](https://www.rfc-editor.org/rfc/rfc3986#section-5.2.4)
fn remove_dot_segments(path: &str) -> String {
    let (path, suffix) = path
        .find(['?', '#'])
        .map_or((path, ""), |i| (&path[..i], &path[i..]));
    let mut output: Vec<&str> = Vec::new();
    let segments: Vec<&str> = path.split('/').collect();
    for (i, segment) in segments.iter().enumerate() {
        let last = i + 1 == segments.len();
        match *segment {
            "." => {
                if last {
                    output.push("");
                }
            }
            ".." => {
                if output.len() > 1 {
                    let _ = output.pop();
                }
                if last {
                    output.push("");
                }
            }
            other => output.push(other),
        }
    }
    format!("{}{suffix}", output.join("/"))
}
