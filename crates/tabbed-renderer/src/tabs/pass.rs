//! Per-page render state.

use crate::assets::{AssetRef, AssetRegistry};
use crate::slug::SlugRegistry;

/// State shared by every tab group rendered into one page.
pub struct RenderPass<'a> {
    assets: &'a mut dyn AssetRegistry,
    assets_enqueued: bool,
    ids: SlugRegistry,
}

impl<'a> RenderPass<'a> {
    /// Start a pass that enqueues assets with `assets`.
    pub fn new(assets: &'a mut dyn AssetRegistry) -> Self {
        Self {
            assets,
            assets_enqueued: false,
            ids: SlugRegistry::default(),
        }
    }

    /// Whether the tab assets were enqueued in this pass.
    #[must_use]
    pub fn assets_enqueued(&self) -> bool {
        self.assets_enqueued
    }

    /// Enqueue the tab script and stylesheet, once per pass.
    pub fn enqueue_assets(&mut self) {
        if self.assets_enqueued {
            return;
        }
        self.assets.enqueue(&AssetRef::TABS_SCRIPT);
        self.assets.enqueue(&AssetRef::TABS_STYLE);
        self.assets_enqueued = true;
    }

    /// Reserve a unique element id based on `slug`.
    pub(crate) fn claim_id(&mut self, slug: String) -> String {
        self.ids.claim(slug)
    }
}

impl std::fmt::Debug for RenderPass<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderPass")
            .field("assets_enqueued", &self.assets_enqueued)
            .field("ids", &self.ids)
            .finish_non_exhaustive()
    }
}
