//! Rich-text post-processing for tab content.
//!
//! Editor content is stored as loosely formatted HTML. Before it goes into a
//! tab panel it runs through a fixed sequence of steps:
//!
//! 1. paragraph wrapping (blank lines → `<p>`, single newlines → `<br />`)
//! 2. shortcode expansion ([`ShortcodeRegistry`])
//! 3. auto-embedding of URLs on their own line or paragraph
//! 4. `[embed]url[/embed]` shortcodes
//!
//! Steps 3 and 4 use an [`EmbedResolver`].

mod autop;
mod embed;
mod shortcode;

pub use embed::{EmbedResolver, EmbedSize, MAX_EMBED_SIZE, NoEmbeds, VideoEmbeds};
pub use shortcode::{Shortcode, ShortcodeArgs, ShortcodeRegistry};

/// Turns raw rich text into display HTML.
///
/// Implemented for closures, which is handy for hosts that already have a
/// content filter chain:
///
/// ```
/// use tabbed_renderer::RichTextPipeline;
///
/// let upper = |raw: &str| raw.to_uppercase();
/// assert_eq!(upper.process("hi"), "HI");
/// ```
pub trait RichTextPipeline: Send + Sync {
    /// Process raw content into HTML.
    fn process(&self, raw: &str) -> String;
}

impl<F> RichTextPipeline for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn process(&self, raw: &str) -> String {
        self(raw)
    }
}

/// Built-in pipeline: paragraphs, shortcodes, auto-embeds, embed shortcodes.
///
/// ```
/// use tabbed_renderer::{ContentPipeline, RichTextPipeline};
///
/// let pipeline = ContentPipeline::new();
/// assert_eq!(
///     pipeline.process("Hello\n\nhttps://youtu.be/dQw4w9WgXcQ"),
///     "<p>Hello</p>\n<p><iframe width=\"640\" height=\"360\" src=\"https://www.youtube.com/embed/dQw4w9WgXcQ\" frameborder=\"0\" allowfullscreen></iframe></p>\n"
/// );
/// ```
pub struct ContentPipeline {
    shortcodes: ShortcodeRegistry,
    embeds: Box<dyn EmbedResolver>,
}

impl ContentPipeline {
    /// Create a pipeline with no shortcodes and [`VideoEmbeds`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            shortcodes: ShortcodeRegistry::new(),
            embeds: Box::new(VideoEmbeds::default()),
        }
    }

    /// Use the given shortcode registry.
    #[must_use]
    pub fn with_shortcodes(mut self, shortcodes: ShortcodeRegistry) -> Self {
        self.shortcodes = shortcodes;
        self
    }

    /// Use the given embed resolver.
    #[must_use]
    pub fn with_embeds(mut self, embeds: impl EmbedResolver + 'static) -> Self {
        self.embeds = Box::new(embeds);
        self
    }
}

impl Default for ContentPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl RichTextPipeline for ContentPipeline {
    fn process(&self, raw: &str) -> String {
        let html = autop::autop(raw);
        let html = self.shortcodes.expand(&html);
        let html = embed::autoembed(&html, self.embeds.as_ref());
        embed::run_embed_shortcode(&html, self.embeds.as_ref())
    }
}
