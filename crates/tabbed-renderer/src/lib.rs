//! Nested tab group rendering.
//!
//! Turns the `tabs` branch of a resolved [`FieldTree`](tabbed_fields::FieldTree)
//! into accessible tab markup:
//!
//! - [`TabsRenderer`] walks tab rows recursively and emits the tab list and
//!   panels for every group.
//! - [`RenderPass`] carries per-page state: asset enqueueing and the ids
//!   already handed out.
//! - [`RichTextPipeline`] post-processes panel content. [`ContentPipeline`]
//!   is the built-in paragraph, shortcode and embed chain.
//! - [`AssetRegistry`] receives the companion script and stylesheet;
//!   [`AssetQueue`] collects them and prints the tags.
//!
//! # Example
//!
//! ```
//! use tabbed_config::Display;
//! use tabbed_fields::{FieldTree, FieldValue, MetaValue};
//! use tabbed_renderer::{AssetQueue, ContentPipeline, RenderPass, TabsRenderer};
//!
//! let mut row = FieldTree::new();
//! row.insert("title", FieldValue::Scalar(Some(MetaValue::from("Overview"))));
//! row.insert("content", FieldValue::Scalar(Some(MetaValue::from("Hello"))));
//! let mut tree = FieldTree::new();
//! tree.insert("tabs", FieldValue::Rows(vec![row]));
//!
//! let renderer = TabsRenderer::new(ContentPipeline::new(), Display::After);
//! let mut assets = AssetQueue::new("/plugin", "1.0.0");
//! let html = renderer.render(&mut RenderPass::new(&mut assets), Some(&tree), false);
//!
//! assert!(html.contains(r#"<div id="tab-overview" class="js-tabcontent"><p>Hello</p>"#));
//! assert!(!assets.is_empty());
//! ```

mod assets;
mod escape;
mod richtext;
mod slug;
mod tabs;

pub use assets::{AssetKind, AssetQueue, AssetRef, AssetRegistry};
pub use escape::{escape_html, sanitize_html_class, sanitize_text, strip_tags};
pub use richtext::{
    ContentPipeline, EmbedResolver, EmbedSize, MAX_EMBED_SIZE, NoEmbeds, RichTextPipeline,
    Shortcode, ShortcodeArgs, ShortcodeRegistry, VideoEmbeds,
};
pub use slug::slugify;
pub use tabs::{RenderPass, TabsRenderer};
