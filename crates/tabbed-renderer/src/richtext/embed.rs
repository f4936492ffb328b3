//! Embed resolution for bare URLs and `[embed]` shortcodes.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::shortcode::ShortcodeArgs;
use crate::escape::escape_html;

/// URL alone on its own line.
static LINE_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?im)^(\s*)(https?://[^\s<>"]+)(\s*)$"#).unwrap());
/// URL alone inside a paragraph.
static PARAGRAPH_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(<p(?: [^>]*)?>\s*)(https?://[^\s<>"]+)(\s*</p>)"#).unwrap()
});
static EMBED_SHORTCODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[embed([^\]]*)\](.*?)\[/embed\]").unwrap());
static YOUTUBE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^https?://(?:(?:www\.|m\.)?youtube\.com/watch\?(?:[^#\s]*&)?v=|youtu\.be/)([A-Za-z0-9_-]{6,})",
    )
    .unwrap()
});
static VIMEO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://(?:www\.)?vimeo\.com/(\d+)").unwrap());

/// Largest player width or height, in pixels.
pub const MAX_EMBED_SIZE: u32 = 4096;

/// Requested embed dimensions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EmbedSize {
    /// Maximum width in pixels.
    pub width: Option<u32>,
    /// Maximum height in pixels.
    pub height: Option<u32>,
}

impl EmbedSize {
    fn from_args(args: &ShortcodeArgs) -> Self {
        Self {
            width: args.get("width").and_then(|w| w.parse().ok()),
            height: args.get("height").and_then(|h| h.parse().ok()),
        }
    }
}

/// Turns a URL into embed HTML.
pub trait EmbedResolver: Send + Sync {
    /// Embed HTML for `url`, or `None` if the URL is not embeddable.
    fn embed(&self, url: &str, size: EmbedSize) -> Option<String>;
}

/// Resolver that embeds nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoEmbeds;

impl EmbedResolver for NoEmbeds {
    fn embed(&self, _url: &str, _size: EmbedSize) -> Option<String> {
        None
    }
}

/// Resolver for YouTube and Vimeo video URLs.
///
/// Produces a 16:9 `<iframe>` player when no height is requested. Both
/// dimensions are clamped to [`MAX_EMBED_SIZE`].
#[derive(Clone, Copy, Debug)]
pub struct VideoEmbeds {
    default_width: u32,
}

impl VideoEmbeds {
    /// Create a resolver with the given default player width.
    #[must_use]
    pub fn new(default_width: u32) -> Self {
        Self { default_width }
    }
}

impl Default for VideoEmbeds {
    fn default() -> Self {
        Self::new(640)
    }
}

impl EmbedResolver for VideoEmbeds {
    fn embed(&self, url: &str, size: EmbedSize) -> Option<String> {
        let src = if let Some(caps) = YOUTUBE_RE.captures(url) {
            format!("https://www.youtube.com/embed/{}", &caps[1])
        } else if let Some(caps) = VIMEO_RE.captures(url) {
            format!("https://player.vimeo.com/video/{}", &caps[1])
        } else {
            return None;
        };

        let width = size.width.unwrap_or(self.default_width).min(MAX_EMBED_SIZE);
        let height = size.height.unwrap_or(width * 9 / 16).min(MAX_EMBED_SIZE);
        Some(format!(
            r#"<iframe width="{width}" height="{height}" src="{src}" frameborder="0" allowfullscreen></iframe>"#
        ))
    }
}

/// Replace URLs that stand alone on a line or in a paragraph with embeds.
///
/// URLs the resolver does not recognize are left as they are.
pub(crate) fn autoembed(text: &str, resolver: &dyn EmbedResolver) -> String {
    if !text.contains("http://") && !text.contains("https://") {
        return text.to_owned();
    }

    let replace = |caps: &Captures<'_>| match resolver.embed(&caps[2], EmbedSize::default()) {
        Some(html) => format!("{}{html}{}", &caps[1], &caps[3]),
        None => caps[0].to_owned(),
    };

    let text = LINE_URL_RE.replace_all(text, replace);
    PARAGRAPH_URL_RE.replace_all(&text, replace).into_owned()
}

/// Run `[embed]url[/embed]` shortcodes.
///
/// Unrecognized URLs become plain links.
pub(crate) fn run_embed_shortcode(text: &str, resolver: &dyn EmbedResolver) -> String {
    if !text.contains("[embed") {
        return text.to_owned();
    }

    EMBED_SHORTCODE_RE
        .replace_all(text, |caps: &Captures<'_>| {
            let url = caps[2].trim();
            if url.is_empty() {
                return String::new();
            }
            let size = EmbedSize::from_args(&ShortcodeArgs::parse(&caps[1]));
            resolver.embed(url, size).unwrap_or_else(|| {
                let url = escape_html(url);
                format!(r#"<a href="{url}">{url}</a>"#)
            })
        })
        .into_owned()
}
