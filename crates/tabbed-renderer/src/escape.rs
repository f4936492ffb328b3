//! HTML escaping and text sanitizing.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static OCTET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"%[a-fA-F0-9]{2}").unwrap());

/// Escape `&`, `<`, `>`, `"` and `'` for use in HTML text and attributes.
#[must_use]
pub fn escape_html(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Remove HTML tags from a string.
#[must_use]
pub fn strip_tags(s: &str) -> Cow<'_, str> {
    TAG_RE.replace_all(s, "")
}

/// Sanitize a single-line text value for display.
///
/// Strips tags, collapses whitespace (including line breaks and tabs) to
/// single spaces and trims. The result is HTML-escaped.
#[must_use]
pub fn sanitize_text(s: &str) -> String {
    let stripped = strip_tags(s);
    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    escape_html(&collapsed).into_owned()
}

/// Reduce a string to characters valid in an HTML class name.
///
/// Percent-encoded octets are dropped, then anything other than ASCII
/// letters, digits, `_` and `-` is removed.
#[must_use]
pub fn sanitize_html_class(s: &str) -> String {
    OCTET_RE
        .replace_all(s, "")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}
