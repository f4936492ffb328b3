//! Bracket shortcode expansion.
//!
//! Supports `[name attr="value"]`, self-closing `[name /]` and enclosing
//! `[name]content[/name]` forms. Only registered names are expanded;
//! `[[name]]` escapes to the literal `[name]`.

use std::collections::HashMap;

/// Parsed shortcode attributes.
///
/// ```
/// use tabbed_renderer::ShortcodeArgs;
///
/// let args = ShortcodeArgs::parse(r#"video width=640 title="My clip" autoplay"#);
/// assert_eq!(args.get("width"), Some("640"));
/// assert_eq!(args.get("title"), Some("My clip"));
/// assert_eq!(args.positional, vec!["video", "autoplay"]);
/// ```
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ShortcodeArgs {
    /// Named attributes; keys are lower-cased.
    pub attrs: HashMap<String, String>,
    /// Values without a key, in order.
    pub positional: Vec<String>,
}

impl ShortcodeArgs {
    /// Parse the attribute part of an opening tag (without name and brackets).
    #[must_use]
    pub fn parse(attrs_str: &str) -> Self {
        let mut args = Self::default();
        let mut remaining = attrs_str.trim();

        while !remaining.is_empty() {
            if let Some((key, value, rest)) = parse_key_value(remaining) {
                args.attrs.insert(key.to_lowercase(), value.to_owned());
                remaining = rest.trim_start();
            } else if let Some((value, rest)) = parse_quoted(remaining) {
                args.positional.push(value.to_owned());
                remaining = rest.trim_start();
            } else {
                let end = remaining.find(char::is_whitespace).unwrap_or(remaining.len());
                args.positional.push(remaining[..end].to_owned());
                remaining = remaining[end..].trim_start();
            }
        }

        args
    }

    /// Get a named attribute.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }
}

/// Parse `key="value"`, `key='value'` or `key=value` at the start of `s`.
fn parse_key_value(s: &str) -> Option<(&str, &str, &str)> {
    let key_end = s.find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))?;
    let key = &s[..key_end];
    let after_key = s[key_end..].trim_start();
    let after_eq = after_key.strip_prefix('=')?.trim_start();

    if key.is_empty() {
        return None;
    }

    if let Some((value, rest)) = parse_quoted(after_eq) {
        Some((key, value, rest))
    } else {
        let end = after_eq.find(char::is_whitespace).unwrap_or(after_eq.len());
        Some((key, &after_eq[..end], &after_eq[end..]))
    }
}

/// Parse a `"..."` or `'...'` value at the start of `s`.
fn parse_quoted(s: &str) -> Option<(&str, &str)> {
    let quote = s.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let inner = &s[1..];
    let end = inner.find(quote)?;
    Some((&inner[..end], &inner[end + 1..]))
}

/// Handler for one shortcode name.
///
/// # Example
///
/// ```
/// use tabbed_renderer::{Shortcode, ShortcodeArgs, ShortcodeRegistry};
///
/// struct Year;
///
/// impl Shortcode for Year {
///     fn name(&self) -> &str { "year" }
///
///     fn render(&self, _args: &ShortcodeArgs, _content: Option<&str>) -> String {
///         "2024".to_owned()
///     }
/// }
///
/// let registry = ShortcodeRegistry::new().with_shortcode(Year);
/// assert_eq!(registry.expand("Copyright [year]"), "Copyright 2024");
/// ```
pub trait Shortcode: Send + Sync {
    /// Shortcode name matched against `[name ...]`.
    fn name(&self) -> &str;

    /// Produce the replacement HTML.
    ///
    /// `content` is the raw text between opening and closing tags for the
    /// enclosing form, `None` for the self-closing form.
    fn render(&self, args: &ShortcodeArgs, content: Option<&str>) -> String;
}

/// Registered shortcode handlers.
#[derive(Default)]
pub struct ShortcodeRegistry {
    handlers: HashMap<String, Box<dyn Shortcode>>,
}

/// Opening tag found in the text.
struct OpeningTag<'a> {
    name: &'a str,
    attrs: &'a str,
    self_closing: bool,
    /// Byte offset just past the closing `]`.
    end: usize,
}

impl ShortcodeRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler, replacing any previous one with the same name.
    #[must_use]
    pub fn with_shortcode(mut self, shortcode: impl Shortcode + 'static) -> Self {
        self.handlers
            .insert(shortcode.name().to_owned(), Box::new(shortcode));
        self
    }

    /// Whether a handler is registered for `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Expand all registered shortcodes in `text`.
    #[must_use]
    pub fn expand(&self, text: &str) -> String {
        if self.handlers.is_empty() || !text.contains('[') {
            return text.to_owned();
        }

        let mut out = String::with_capacity(text.len());
        let mut pos = 0;

        while let Some(offset) = text[pos..].find('[') {
            let start = pos + offset;
            out.push_str(&text[pos..start]);

            let escaped = text[start + 1..].starts_with('[');
            let tag_start = if escaped { start + 1 } else { start };

            let Some(tag) = parse_opening_tag(text, tag_start) else {
                out.push('[');
                pos = start + 1;
                continue;
            };
            let Some(handler) = self.handlers.get(tag.name) else {
                out.push('[');
                pos = start + 1;
                continue;
            };

            let (content, end) = if tag.self_closing {
                (None, tag.end)
            } else {
                let closing = format!("[/{}]", tag.name);
                match text[tag.end..].find(&closing) {
                    Some(i) => (
                        Some(&text[tag.end..tag.end + i]),
                        tag.end + i + closing.len(),
                    ),
                    None => (None, tag.end),
                }
            };

            if escaped {
                if text[end..].starts_with(']') {
                    out.push_str(&text[tag_start..end]);
                    pos = end + 1;
                } else {
                    out.push('[');
                    pos = start + 1;
                }
                continue;
            }

            let args = ShortcodeArgs::parse(tag.attrs);
            out.push_str(&handler.render(&args, content));
            pos = end;
        }

        out.push_str(&text[pos..]);
        out
    }
}

impl std::fmt::Debug for ShortcodeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("ShortcodeRegistry")
            .field("handlers", &names)
            .finish()
    }
}

/// Parse an opening tag starting at the `[` at `start`.
fn parse_opening_tag(text: &str, start: usize) -> Option<OpeningTag<'_>> {
    let after = &text[start + 1..];
    let name_len = after
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
        .unwrap_or(after.len());
    if name_len == 0 {
        return None;
    }
    let name = &after[..name_len];

    let rest = &after[name_len..];
    if !rest.starts_with(|c: char| c == ']' || c == '/' || c.is_whitespace()) {
        return None;
    }

    let close = rest.find(']')?;
    let inner = rest[..close].trim();
    let (attrs, self_closing) = match inner.strip_suffix('/') {
        Some(attrs) => (attrs.trim_end(), true),
        None => (inner, false),
    };

    Some(OpeningTag {
        name,
        attrs,
        self_closing,
        end: start + 1 + name_len + close + 1,
    })
}
