//! Rendering trees produced by the resolver.

use pretty_assertions::assert_eq;
use tabbed_config::Display;
use tabbed_fields::{
    FieldTree, ItemId, MockMetaStore, Resolver, SchemaProvider, TabbedContentSchema,
};
use tabbed_renderer::{
    AssetQueue, AssetRef, AssetRegistry, ContentPipeline, RenderPass, TabsRenderer,
};

const ITEM: ItemId = ItemId(7);

/// Registry that keeps every `enqueue` call, repeats included.
#[derive(Default)]
struct RecordingAssets(Vec<&'static str>);

impl AssetRegistry for RecordingAssets {
    fn enqueue(&mut self, asset: &AssetRef) {
        self.0.push(asset.handle);
    }
}

fn resolve(store: &MockMetaStore) -> FieldTree {
    Resolver::new(store)
        .resolve(ITEM, TabbedContentSchema::new().fields())
        .into_tree()
}

fn render(tree: &FieldTree) -> (String, AssetQueue) {
    let renderer = TabsRenderer::new(ContentPipeline::new(), Display::After);
    let mut assets = AssetQueue::new("/plugin", "1.0.0");
    let html = renderer.render(&mut RenderPass::new(&mut assets), Some(tree), false);
    (html, assets)
}

/// Element ids of all panels, in document order.
fn panel_ids(html: &str) -> Vec<&str> {
    html.match_indices(r#"class="js-tabcontent""#)
        .filter_map(|(end, _)| {
            let head = &html[..end];
            let start = head.rfind(r#"<div id=""#)? + r#"<div id=""#.len();
            head[start..].split('"').next()
        })
        .collect()
}

/// Fragment targets of all tab links, in document order.
fn link_targets(html: &str) -> Vec<&str> {
    html.split(r##"<a href="#"##)
        .skip(1)
        .filter_map(|rest| rest.split('"').next())
        .collect()
}

#[test]
fn two_top_level_tabs() {
    let store = MockMetaStore::new()
        .with_meta(ITEM, "tabs", 2_i64)
        .with_meta(ITEM, "tabs_0_title", "A")
        .with_meta(ITEM, "tabs_0_content", "hi")
        .with_meta(ITEM, "tabs_1_title", "B");

    let (html, assets) = render(&resolve(&store));

    assert_eq!(link_targets(&html), vec!["tab-a", "tab-b"]);
    assert_eq!(panel_ids(&html), vec!["tab-a", "tab-b"]);
    assert!(html.contains("<div id=\"tab-a\" class=\"js-tabcontent\"><p>hi</p>\n</div>"));
    assert!(html.contains(r#"<div id="tab-b" class="js-tabcontent"></div>"#));
    assert_eq!(assets.handles().count(), 2);
}

#[test]
fn nested_child_tab() {
    let store = MockMetaStore::new()
        .with_meta(ITEM, "tabs", 1_i64)
        .with_meta(ITEM, "tabs_0_title", "Parent")
        .with_meta(ITEM, "tabs_0_tabs", 1_i64)
        .with_meta(ITEM, "tabs_0_tabs_0_title", "Sub");

    let (html, _) = render(&resolve(&store));

    assert!(html.contains(r#"<div class="js-tabs js-tabs-nested">"#));
    assert!(html.contains(r##"<a href="#child-tab-sub" id="label_child-tab-sub" class="js-tablist__link">Sub</a>"##));
    assert!(html.contains(r#"<div id="child-tab-sub" class="js-tabcontent">"#));
}

#[test]
fn no_tabs_renders_nothing() {
    for store in [
        MockMetaStore::new(),
        MockMetaStore::new().with_meta(ITEM, "tabs", 0_i64),
        MockMetaStore::new().with_meta(ITEM, "tabs", "0"),
    ] {
        let (html, assets) = render(&resolve(&store));
        assert_eq!(html, "");
        assert!(assets.is_empty());
    }
}

#[test]
fn duplicate_sibling_titles() {
    let store = MockMetaStore::new()
        .with_meta(ITEM, "tabs", 2_i64)
        .with_meta(ITEM, "tabs_0_title", "Intro")
        .with_meta(ITEM, "tabs_1_title", "Intro");

    let (html, _) = render(&resolve(&store));

    assert_eq!(link_targets(&html), vec!["tab-intro", "tab-intro-2"]);
    assert_eq!(panel_ids(&html), vec!["tab-intro", "tab-intro-2"]);
}

#[test]
fn links_and_panels_agree_at_every_depth() {
    let store = MockMetaStore::new()
        .with_meta(ITEM, "tabs", 3_i64)
        .with_meta(ITEM, "tabs_0_title", "Setup")
        .with_meta(ITEM, "tabs_0_tabs", 2_i64)
        .with_meta(ITEM, "tabs_0_tabs_0_title", "Linux")
        .with_meta(ITEM, "tabs_0_tabs_1_title", "")
        .with_meta(ITEM, "tabs_1_title", "")
        .with_meta(ITEM, "tabs_1_content", "orphan")
        .with_meta(ITEM, "tabs_2_title", "Usage")
        .with_meta(ITEM, "tabs_2_tabs", 1_i64)
        .with_meta(ITEM, "tabs_2_tabs_0_title", "Linux");

    let (html, _) = render(&resolve(&store));

    let mut links = link_targets(&html);
    let mut panels = panel_ids(&html);
    links.sort_unstable();
    panels.sort_unstable();
    assert_eq!(links, panels);
    assert_eq!(
        links,
        vec!["child-tab-linux", "child-tab-linux-2", "tab-setup", "tab-usage"]
    );
    assert!(!html.contains("orphan"));
}

#[test]
fn assets_enqueued_once_across_renders() {
    let store = MockMetaStore::new()
        .with_meta(ITEM, "tabs", 2_i64)
        .with_meta(ITEM, "tabs_0_title", "A")
        .with_meta(ITEM, "tabs_0_tabs", 1_i64)
        .with_meta(ITEM, "tabs_0_tabs_0_title", "Sub")
        .with_meta(ITEM, "tabs_1_title", "B");
    let tree = resolve(&store);

    let renderer = TabsRenderer::new(ContentPipeline::new(), Display::Before);
    let mut assets = RecordingAssets::default();
    let (first, second) = {
        let mut pass = RenderPass::new(&mut assets);
        let first = renderer.render(&mut pass, Some(&tree), false);
        let second = renderer.render(&mut pass, Some(&tree), false);
        assert!(pass.assets_enqueued());
        (first, second)
    };

    assert!(first.contains(r#"id="tab-a""#));
    assert!(second.contains(r#"id="tab-a-2""#));
    assert!(second.contains(r#"id="child-tab-sub-2""#));
    assert_eq!(assets.0, vec!["jquery-accessible-nested-tabs", "acftc-style"]);
}

#[test]
fn every_page_view_enqueues_its_assets() {
    let store = MockMetaStore::new()
        .with_meta(ITEM, "tabs", 1_i64)
        .with_meta(ITEM, "tabs_0_title", "A");
    let tree = resolve(&store);

    let renderer = TabsRenderer::new(ContentPipeline::new(), Display::After);
    let mut assets = RecordingAssets::default();
    for _ in 0..2 {
        renderer.render(&mut RenderPass::new(&mut assets), Some(&tree), false);
    }
    assert_eq!(assets.0.len(), 4);
}
