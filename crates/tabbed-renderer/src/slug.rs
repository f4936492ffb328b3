//! Deterministic identifiers for tabs.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::escape::strip_tags;

static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"&[^;\s]+;").unwrap());

/// Turn text into a lower-case, dash-joined, ASCII identifier.
///
/// Tags and HTML entities are removed, common Latin accents are folded to
/// their base letters, whitespace, `.` and `/` become dashes, and every other
/// character outside `[a-z0-9_-]` is dropped. Runs of dashes collapse and
/// leading/trailing dashes are trimmed.
///
/// ```
/// use tabbed_renderer::slugify;
///
/// assert_eq!(slugify("tab-Getting Started"), "tab-getting-started");
/// assert_eq!(slugify("child-tab-Café & Bar"), "child-tab-cafe-bar");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let stripped = strip_tags(text);
    let without_entities = ENTITY_RE.replace_all(&stripped, "");

    let mut slug = String::with_capacity(without_entities.len());
    for c in without_entities.chars().flat_map(char::to_lowercase) {
        match c {
            'a'..='z' | '0'..='9' | '_' => slug.push(c),
            '-' | '.' | '/' => push_dash(&mut slug),
            c if c.is_whitespace() => push_dash(&mut slug),
            c => {
                if let Some(folded) = fold_accent(c) {
                    slug.push_str(folded);
                }
            }
        }
    }

    slug.trim_matches('-').to_owned()
}

fn push_dash(slug: &mut String) {
    if !slug.is_empty() && !slug.ends_with('-') {
        slug.push('-');
    }
}

/// ASCII replacement for common lower-case Latin letters with diacritics.
fn fold_accent(c: char) -> Option<&'static str> {
    let folded = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ą' => "a",
        'æ' => "ae",
        'ç' | 'ć' | 'č' => "c",
        'ď' | 'đ' | 'ð' => "d",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ę' | 'ě' => "e",
        'ì' | 'í' | 'î' | 'ï' | 'ī' => "i",
        'ł' => "l",
        'ñ' | 'ń' | 'ň' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => "o",
        'œ' => "oe",
        'ř' => "r",
        'ß' => "ss",
        'ś' | 'š' | 'ş' => "s",
        'ť' | 'ţ' => "t",
        'þ' => "th",
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' => "u",
        'ý' | 'ÿ' => "y",
        'ź' | 'ż' | 'ž' => "z",
        _ => return None,
    };
    Some(folded)
}

/// Identifiers already handed out in a render pass.
///
/// The first claim of a slug gets it unchanged; later claims get `-2`, `-3`, …
#[derive(Debug, Default)]
pub(crate) struct SlugRegistry {
    used: HashSet<String>,
}

impl SlugRegistry {
    pub(crate) fn claim(&mut self, slug: String) -> String {
        if self.used.insert(slug.clone()) {
            return slug;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{slug}-{n}");
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}
