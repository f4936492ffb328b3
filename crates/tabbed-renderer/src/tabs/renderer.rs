//! Recursive tab group renderer.

use std::borrow::Cow;

use tabbed_config::Display;
use tabbed_fields::{FieldTree, FieldValue};

use super::RenderPass;
use crate::escape::{sanitize_html_class, sanitize_text};
use crate::richtext::RichTextPipeline;
use crate::slug::slugify;

/// Field holding the tab rows at every level.
const TABS_FIELD: &str = "tabs";
const TITLE_FIELD: &str = "title";
const CONTENT_FIELD: &str = "content";

/// Renders the `tabs` branch of a field tree as nested tab groups.
///
/// ```
/// use tabbed_config::Display;
/// use tabbed_fields::{FieldTree, FieldValue, MetaValue};
/// use tabbed_renderer::{AssetQueue, RenderPass, TabsRenderer};
///
/// let mut row = FieldTree::new();
/// row.insert("title", FieldValue::Scalar(Some(MetaValue::from("Intro"))));
/// let mut tree = FieldTree::new();
/// tree.insert("tabs", FieldValue::Rows(vec![row]));
///
/// let renderer = TabsRenderer::new(|raw: &str| raw.to_owned(), Display::After);
/// let mut assets = AssetQueue::new("/plugin", "1.0.0");
/// let html = renderer.render(&mut RenderPass::new(&mut assets), Some(&tree), false);
///
/// assert!(html.contains(r##"<a href="#tab-intro" id="label_tab-intro""##));
/// assert!(html.contains(r#"<div id="tab-intro" class="js-tabcontent">"#));
/// ```
#[derive(Debug)]
pub struct TabsRenderer<P> {
    pipeline: P,
    display: Display,
}

/// A row that survived title filtering, with its reserved id.
struct TitledTab<'t> {
    row: &'t FieldTree,
    title: Cow<'t, str>,
    id: String,
}

impl<P: RichTextPipeline> TabsRenderer<P> {
    /// Create a renderer for the given display placement.
    pub fn new(pipeline: P, display: Display) -> Self {
        Self { pipeline, display }
    }

    /// Display placement used in the top-level class list.
    #[must_use]
    pub fn display(&self) -> Display {
        self.display
    }

    /// Render the tab group stored under `tabs` in `tree`.
    ///
    /// Returns an empty string when there is no tree or no tab rows. Rows
    /// without a title are skipped in both the tab list and the panels.
    pub fn render(
        &self,
        pass: &mut RenderPass<'_>,
        tree: Option<&FieldTree>,
        nested: bool,
    ) -> String {
        let Some(rows) = tree
            .and_then(|tree| tree.rows(TABS_FIELD))
            .filter(|rows| !rows.is_empty())
        else {
            return String::new();
        };

        pass.enqueue_assets();

        let prefix = if nested { "child-tab-" } else { "tab-" };
        let tabs: Vec<TitledTab<'_>> = rows
            .iter()
            .filter_map(|row| {
                let title = tab_title(row)?;
                let id = pass.claim_id(slugify(&format!("{prefix}{title}")));
                Some(TitledTab { row, title, id })
            })
            .collect();

        let mut output = String::with_capacity(256 * tabs.len() + 128);

        if nested {
            output.push_str(r#"<div class="js-tabs js-tabs-nested">"#);
        } else {
            output.push_str(&format!(
                r#"<div class="js-tabs tabs-{}-content js-tabs-parent">"#,
                sanitize_html_class(self.display.as_str())
            ));
        }

        output.push_str(r#"<ul class="js-tablist">"#);
        for tab in &tabs {
            output.push_str(&format!(
                r##"<li class="js-tablist__item"><a href="#{id}" id="label_{id}" class="js-tablist__link">{title}</a></li>"##,
                id = tab.id,
                title = sanitize_text(&tab.title)
            ));
        }
        output.push_str("</ul>");

        for tab in &tabs {
            let mut content = tab
                .row
                .text(CONTENT_FIELD)
                .map(Cow::into_owned)
                .unwrap_or_default();
            content.push_str(&self.render(pass, Some(tab.row), true));

            output.push_str(&format!(
                r#"<div id="{}" class="js-tabcontent">{}</div>"#,
                tab.id,
                self.pipeline.process(&content)
            ));
        }

        output.push_str("</div>");

        tracing::debug!(
            rows = rows.len(),
            tabs = tabs.len(),
            nested,
            "Rendered tab group"
        );
        output
    }
}

/// Title of a row, or `None` when missing or empty.
fn tab_title(row: &FieldTree) -> Option<Cow<'_, str>> {
    match row.get(TITLE_FIELD)? {
        FieldValue::Scalar(Some(value)) if !value.is_empty() => value.as_text(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tabbed_fields::MetaValue;

    use super::*;
    use crate::assets::{AssetQueue, RecordingAssets};

    fn identity(raw: &str) -> String {
        raw.to_owned()
    }

    fn tab(title: &str, content: Option<&str>, children: Vec<FieldTree>) -> FieldTree {
        let mut row = FieldTree::new();
        row.insert(TITLE_FIELD, FieldValue::Scalar(Some(MetaValue::from(title))));
        row.insert(
            CONTENT_FIELD,
            FieldValue::Scalar(content.map(MetaValue::from)),
        );
        if !children.is_empty() {
            row.insert(TABS_FIELD, FieldValue::Rows(children));
        }
        row
    }

    fn tree(rows: Vec<FieldTree>) -> FieldTree {
        let mut tree = FieldTree::new();
        tree.insert(TABS_FIELD, FieldValue::Rows(rows));
        tree
    }

    fn render(tree: Option<&FieldTree>) -> (String, AssetQueue) {
        let renderer = TabsRenderer::new(identity, Display::After);
        let mut assets = AssetQueue::new("/p", "1");
        let html = renderer.render(&mut RenderPass::new(&mut assets), tree, false);
        (html, assets)
    }

    #[test]
    fn test_absent_tree() {
        let (html, assets) = render(None);
        assert_eq!(html, "");
        assert!(assets.is_empty());
    }

    #[test]
    fn test_no_tab_rows() {
        let (html, assets) = render(Some(&FieldTree::new()));
        assert_eq!(html, "");
        assert!(assets.is_empty());

        let (html, _) = render(Some(&tree(Vec::new())));
        assert_eq!(html, "");
    }

    #[test]
    fn test_top_level_markup() {
        let tree = tree(vec![tab("A", Some("hi"), Vec::new()), tab("B", None, Vec::new())]);
        let (html, assets) = render(Some(&tree));

        assert_eq!(
            html,
            concat!(
                r#"<div class="js-tabs tabs-after-content js-tabs-parent">"#,
                r#"<ul class="js-tablist">"#,
                r##"<li class="js-tablist__item"><a href="#tab-a" id="label_tab-a" class="js-tablist__link">A</a></li>"##,
                r##"<li class="js-tablist__item"><a href="#tab-b" id="label_tab-b" class="js-tablist__link">B</a></li>"##,
                "</ul>",
                r#"<div id="tab-a" class="js-tabcontent">hi</div>"#,
                r#"<div id="tab-b" class="js-tabcontent"></div>"#,
                "</div>"
            )
        );
        assert_eq!(
            assets.handles().collect::<Vec<_>>(),
            vec!["jquery-accessible-nested-tabs", "acftc-style"]
        );
    }

    #[test]
    fn test_before_display_class() {
        let renderer = TabsRenderer::new(identity, Display::Before);
        let mut assets = AssetQueue::new("/p", "1");
        let html = renderer.render(
            &mut RenderPass::new(&mut assets),
            Some(&tree(vec![tab("A", None, Vec::new())])),
            false,
        );
        assert!(html.starts_with(r#"<div class="js-tabs tabs-before-content js-tabs-parent">"#));
    }

    #[test]
    fn test_nested_group_inside_panel() {
        let tree = tree(vec![tab(
            "Parent",
            Some("top"),
            vec![tab("Sub", Some("inner"), Vec::new())],
        )]);
        let (html, _) = render(Some(&tree));

        assert!(html.contains(concat!(
            r#"<div id="tab-parent" class="js-tabcontent">top"#,
            r#"<div class="js-tabs js-tabs-nested"><ul class="js-tablist">"#,
            r##"<li class="js-tablist__item"><a href="#child-tab-sub" id="label_child-tab-sub" class="js-tablist__link">Sub</a></li>"##,
            r#"</ul><div id="child-tab-sub" class="js-tabcontent">inner</div></div>"#,
            "</div>"
        )));
    }

    #[test]
    fn test_nested_groups_enqueue_assets_once() {
        let tree = tree(vec![
            tab("One", None, vec![tab("Sub", None, vec![tab("Deep", None, Vec::new())])]),
            tab("Two", None, vec![tab("Other", None, Vec::new())]),
        ]);
        let renderer = TabsRenderer::new(identity, Display::After);
        let mut assets = RecordingAssets::default();
        let html = renderer.render(&mut RenderPass::new(&mut assets), Some(&tree), false);

        assert_eq!(html.matches("js-tabs-nested").count(), 3);
        assert_eq!(
            assets.calls,
            vec!["jquery-accessible-nested-tabs", "acftc-style"]
        );
    }

    #[test]
    fn test_untitled_rows_skipped_in_both_passes() {
        let tree = tree(vec![
            tab("", Some("lost"), Vec::new()),
            tab("0", Some("lost too"), Vec::new()),
            tab("Kept", Some("here"), Vec::new()),
        ]);
        let (html, _) = render(Some(&tree));

        assert_eq!(html.matches("js-tablist__item").count(), 1);
        assert_eq!(html.matches(r#"class="js-tabcontent""#).count(), 1);
        assert!(!html.contains("lost"));
    }

    #[test]
    fn test_duplicate_titles_get_unique_ids() {
        let tree = tree(vec![
            tab("Intro", None, Vec::new()),
            tab("Intro", None, Vec::new()),
        ]);
        let (html, _) = render(Some(&tree));

        assert!(html.contains(r##"href="#tab-intro""##));
        assert!(html.contains(r##"href="#tab-intro-2""##));
        assert!(html.contains(r#"<div id="tab-intro" "#));
        assert!(html.contains(r#"<div id="tab-intro-2" "#));
    }

    #[test]
    fn test_same_child_title_under_two_parents() {
        let tree = tree(vec![
            tab("One", None, vec![tab("Details", None, Vec::new())]),
            tab("Two", None, vec![tab("Details", None, Vec::new())]),
        ]);
        let (html, _) = render(Some(&tree));

        assert!(html.contains(r#"<div id="child-tab-details" "#));
        assert!(html.contains(r#"<div id="child-tab-details-2" "#));
    }

    #[test]
    fn test_title_escaped_and_slugged() {
        let tree = tree(vec![tab("<b>Q&A</b> \"time\"", None, Vec::new())]);
        let (html, _) = render(Some(&tree));

        assert!(html.contains(r#"class="js-tablist__link">Q&amp;A &quot;time&quot;</a>"#));
        assert!(html.contains(r##"href="#tab-qa-time""##));
    }

    #[test]
    fn test_numeric_title() {
        let mut row = FieldTree::new();
        row.insert(TITLE_FIELD, FieldValue::Scalar(Some(MetaValue::Number(2024))));
        let (html, _) = render(Some(&tree(vec![row])));
        assert!(html.contains(r##"href="#tab-2024""##));
    }

    #[test]
    fn test_pipeline_applied_to_content_and_children() {
        let renderer = TabsRenderer::new(|raw: &str| format!("[{raw}]"), Display::After);
        let mut assets = AssetQueue::new("/p", "1");
        let tree = tree(vec![tab("P", Some("x"), vec![tab("C", Some("y"), Vec::new())])]);
        let html = renderer.render(&mut RenderPass::new(&mut assets), Some(&tree), false);

        assert!(html.contains(r#"<div id="child-tab-c" class="js-tabcontent">[y]</div>"#));
        assert!(html.contains(r#"<div id="tab-p" class="js-tabcontent">[x<div class="js-tabs js-tabs-nested">"#));
    }
}
