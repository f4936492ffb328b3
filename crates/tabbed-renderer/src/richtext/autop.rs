//! Paragraph wrapping for editor content.

use std::sync::LazyLock;

use regex::Regex;

/// Block-level elements that are never wrapped in `<p>`.
const BLOCKS: &str = "table|thead|tfoot|caption|col|colgroup|tbody|tr|td|th|div|dl|dd|dt|ul|ol|li|pre|form|map|area|blockquote|address|math|style|p|h[1-6]|hr|fieldset|legend|section|article|aside|hgroup|header|footer|nav|figure|figcaption|details|menu|summary";

static BLOCK_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(<(?:{BLOCKS})[\s/>])")).unwrap());
static BLOCK_CLOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(</(?:{BLOCKS})>)")).unwrap());
static BLOCK_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"</?(?:{BLOCKS})(?:\s[^>]*)?/?>")).unwrap());
static P_BEFORE_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"<p>\s*(</?(?:{BLOCKS})(?:\s[^>]*)?/?>)")).unwrap()
});
static P_AFTER_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(</?(?:{BLOCKS})(?:\s[^>]*)?/?>)\s*</p>")).unwrap()
});
static EMPTY_P_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<p>\s*</p>\n?").unwrap());
static PARAGRAPH_BREAK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").unwrap());

/// Wrap blank-line separated text in `<p>` elements.
///
/// Single newlines inside a text paragraph become `<br />`. Block-level
/// elements are split onto their own paragraphs and left unwrapped, so
/// already-rendered markup passes through intact.
pub(crate) fn autop(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let text = BLOCK_OPEN_RE.replace_all(&text, "\n\n$1");
    let text = BLOCK_CLOSE_RE.replace_all(&text, "$1\n\n");

    let mut out = String::with_capacity(text.len() + 64);
    for chunk in PARAGRAPH_BREAK_RE.split(&text) {
        let chunk = chunk.trim();
        if chunk.is_empty() {
            continue;
        }
        out.push_str("<p>");
        if BLOCK_TAG_RE.is_match(chunk) {
            out.push_str(chunk);
        } else {
            out.push_str(&chunk.replace('\n', "<br />\n"));
        }
        out.push_str("</p>\n");
    }

    let out = P_BEFORE_BLOCK_RE.replace_all(&out, "$1");
    let out = P_AFTER_BLOCK_RE.replace_all(&out, "$1");
    EMPTY_P_RE.replace_all(&out, "").into_owned()
}
