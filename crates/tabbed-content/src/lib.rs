//! Nested tabbed content for content items.
//!
//! [`TabbedContent`] is the application context a host keeps for the life of
//! the process. It ties together:
//!
//! - [`Settings`] (enabled content types and display placement), from
//!   `tabbed.toml` or the host option table
//! - a [`SchemaProvider`] describing the tab fields
//! - a [`MetaStore`] with the items' flat field values
//! - a [`TabsRenderer`] with its rich-text pipeline
//!
//! Each page view gets its own render pass, so one context can serve
//! concurrent requests.
//!
//! # Example
//!
//! ```
//! use tabbed_config::{Settings, ThemeSupport};
//! use tabbed_content::TabbedContent;
//! use tabbed_fields::{ItemId, JsonMetaStore};
//! use tabbed_renderer::ContentPipeline;
//!
//! let store = JsonMetaStore::from_json_str(
//!     r#"{ "5": { "tabs": 1, "tabs_0_title": "Intro", "tabs_0_content": "Hi" } }"#,
//! )
//! .unwrap();
//! let content = TabbedContent::new(Settings::default(), store, ContentPipeline::new());
//!
//! // The theme has no entry hooks, so the widget filters the content.
//! assert!(content.placement("page", ThemeSupport::Other, false).is_some());
//!
//! let mut assets = content.asset_queue();
//! let html = content.display_filter(ItemId(5), "<p>Body</p>", &mut assets);
//! assert!(html.starts_with("<p>Body</p><div class=\"js-tabs tabs-after-content js-tabs-parent\">"));
//! ```

mod placement;

use tabbed_config::{
    AssetsConfig, Config, ConfigError, Display, Location, LocationOverrides, Locations,
    OptionStore, Settings, ThemeSupport,
};
use tabbed_fields::{ItemId, MetaStore, Resolver, SchemaProvider, TabbedContentSchema};
use tabbed_renderer::{AssetQueue, AssetRegistry, RenderPass, RichTextPipeline, TabsRenderer};

/// Application context for rendering tabbed content.
pub struct TabbedContent<S, P> {
    settings: Settings,
    overrides: LocationOverrides,
    assets: AssetsConfig,
    schema: Box<dyn SchemaProvider>,
    store: S,
    renderer: TabsRenderer<P>,
}

impl<S: MetaStore, P: RichTextPipeline> TabbedContent<S, P> {
    /// Create a context with the built-in tab schema.
    pub fn new(settings: Settings, store: S, pipeline: P) -> Self {
        let renderer = TabsRenderer::new(pipeline, settings.display);
        Self {
            settings,
            overrides: LocationOverrides::default(),
            assets: AssetsConfig::default(),
            schema: Box::new(TabbedContentSchema::new()),
            store,
            renderer,
        }
    }

    /// Create a context from loaded configuration.
    pub fn from_config(config: &Config, store: S, pipeline: P) -> Self {
        Self::new(config.display.clone(), store, pipeline)
            .with_location_overrides(config.locations_resolved.clone())
            .with_assets(config.assets.clone())
    }

    /// Create a context from the host option table.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` when the display option is invalid;
    /// the host should then render nothing.
    pub fn from_options<O: OptionStore + ?Sized>(
        options: &O,
        store: S,
        pipeline: P,
    ) -> Result<Self, ConfigError> {
        let settings = Settings::from_options(options).inspect_err(|e| {
            tracing::warn!(error = %e, "Invalid tabbed content options");
        })?;
        Ok(Self::new(settings, store, pipeline))
    }

    /// Use a different field schema.
    #[must_use]
    pub fn with_schema(mut self, schema: impl SchemaProvider + 'static) -> Self {
        self.schema = Box::new(schema);
        self
    }

    /// Replace entries of the theme location table.
    #[must_use]
    pub fn with_location_overrides(mut self, overrides: LocationOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Serve assets from a different base URL and version.
    #[must_use]
    pub fn with_assets(mut self, assets: AssetsConfig) -> Self {
        self.assets = assets;
        self
    }

    /// Empty asset queue for one page view, using the configured base URL and
    /// version.
    pub fn asset_queue(&self) -> AssetQueue {
        AssetQueue::from_config(&self.assets)
    }

    /// Active settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Display placement.
    pub fn display(&self) -> Display {
        self.settings.display
    }

    /// Location table for a theme family, with overrides applied.
    pub fn locations(&self, theme: ThemeSupport) -> Locations {
        Locations::for_theme(theme).with_overrides(&self.overrides)
    }

    /// Where to attach the widget for a page view, if anywhere.
    ///
    /// `None` when `post_type` is not enabled, or when the location is a
    /// content filter and the request is a feed.
    pub fn placement(
        &self,
        post_type: &str,
        theme: ThemeSupport,
        is_feed: bool,
    ) -> Option<Location> {
        placement::decide(&self.settings, theme, &self.overrides, post_type, is_feed)
    }

    /// Resolve and render the tabs of one content item.
    ///
    /// Returns an empty string when the item has no tabs.
    pub fn render_tabbed_content(&self, item: ItemId, assets: &mut dyn AssetRegistry) -> String {
        let resolution = Resolver::new(&self.store).resolve(item, self.schema.fields());
        if !resolution.issues.is_empty() {
            tracing::debug!(
                %item,
                issues = resolution.issues.len(),
                "Resolved tabbed content with issues"
            );
        }

        let mut pass = RenderPass::new(assets);
        self.renderer.render(&mut pass, Some(&resolution.tree), false)
    }

    /// Markup to print when a hook location fires.
    pub fn display_hook(&self, item: ItemId, assets: &mut dyn AssetRegistry) -> String {
        self.render_tabbed_content(item, assets)
    }

    /// Filter `content`, putting the markup before or after it.
    pub fn display_filter(
        &self,
        item: ItemId,
        content: &str,
        assets: &mut dyn AssetRegistry,
    ) -> String {
        let markup = self.render_tabbed_content(item, assets);
        match self.settings.display {
            Display::Before => format!("{markup}{content}"),
            Display::After => format!("{content}{markup}"),
        }
    }
}

impl<S, P> std::fmt::Debug for TabbedContent<S, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabbedContent")
            .field("settings", &self.settings)
            .field("overrides", &self.overrides)
            .field("assets", &self.assets)
            .field("fields", &self.schema.fields().len())
            .finish_non_exhaustive()
    }
}
