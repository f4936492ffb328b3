//! Companion script and stylesheet for the tab widget.
//!
//! The renderer only announces which assets a page needs through
//! [`AssetRegistry`]. [`AssetQueue`] is a ready-made registry that collects
//! them once per handle and prints the tags.

use tabbed_config::AssetsConfig;

use crate::escape::escape_html;

/// Kind of asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetKind {
    /// JavaScript file.
    Script {
        /// Print in the page footer instead of the head.
        in_footer: bool,
    },
    /// CSS file.
    Style,
}

/// A static asset known by handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AssetRef {
    /// Unique handle.
    pub handle: &'static str,
    /// Path relative to the asset base URL.
    pub path: &'static str,
    /// Fixed version, or `None` to use the registry's version.
    pub version: Option<&'static str>,
    /// Handles this asset depends on.
    pub deps: &'static [&'static str],
    /// Script or style.
    pub kind: AssetKind,
}

impl AssetRef {
    /// Accessible nested tabs script.
    pub const TABS_SCRIPT: Self = Self {
        handle: "jquery-accessible-nested-tabs",
        path: "assets/js/jquery-accessible-nested-tabs.js",
        version: Some("1.6.1"),
        deps: &["jquery"],
        kind: AssetKind::Script { in_footer: true },
    };

    /// Tab widget stylesheet.
    pub const TABS_STYLE: Self = Self {
        handle: "acftc-style",
        path: "assets/css/acftc-style.css",
        version: None,
        deps: &[],
        kind: AssetKind::Style,
    };
}

/// Receives the assets a rendered page needs.
pub trait AssetRegistry {
    /// Request an asset for the current page.
    fn enqueue(&mut self, asset: &AssetRef);
}

/// Collects enqueued assets in order, once per handle.
#[derive(Debug)]
pub struct AssetQueue {
    base_url: String,
    version: String,
    queued: Vec<AssetRef>,
}

impl AssetQueue {
    /// Create a queue serving assets under `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            version: version.into(),
            queued: Vec::new(),
        }
    }

    /// Create a queue from the `[assets]` configuration section.
    #[must_use]
    pub fn from_config(config: &AssetsConfig) -> Self {
        Self::new(config.base_url.as_str(), config.version.as_str())
    }

    /// Handles in enqueue order.
    pub fn handles(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.queued.iter().map(|asset| asset.handle)
    }

    /// Whether nothing has been enqueued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queued.is_empty()
    }

    /// Tags for the page head: styles and non-footer scripts.
    #[must_use]
    pub fn render_head(&self) -> String {
        let mut output = String::new();
        for asset in &self.queued {
            match asset.kind {
                AssetKind::Style => output.push_str(&format!(
                    "<link rel=\"stylesheet\" id=\"{}-css\" href=\"{}\" media=\"all\" />\n",
                    asset.handle,
                    self.url(asset)
                )),
                AssetKind::Script { in_footer: false } => self.push_script(&mut output, asset),
                AssetKind::Script { in_footer: true } => {}
            }
        }
        output
    }

    /// Tags for the page footer: footer scripts.
    #[must_use]
    pub fn render_footer(&self) -> String {
        let mut output = String::new();
        for asset in &self.queued {
            if asset.kind == (AssetKind::Script { in_footer: true }) {
                self.push_script(&mut output, asset);
            }
        }
        output
    }

    fn push_script(&self, output: &mut String, asset: &AssetRef) {
        output.push_str(&format!(
            "<script src=\"{}\" id=\"{}-js\"></script>\n",
            self.url(asset),
            asset.handle
        ));
    }

    fn url(&self, asset: &AssetRef) -> String {
        let version = asset.version.unwrap_or(self.version.as_str());
        let url = format!("{}/{}?ver={version}", self.base_url, asset.path);
        escape_html(&url).into_owned()
    }
}

impl AssetRegistry for AssetQueue {
    fn enqueue(&mut self, asset: &AssetRef) {
        if self.queued.iter().any(|queued| queued.handle == asset.handle) {
            return;
        }
        tracing::debug!(handle = asset.handle, "Enqueued asset");
        self.queued.push(*asset);
    }
}

/// Registry that records every `enqueue` call, repeats included.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingAssets {
    pub(crate) calls: Vec<&'static str>,
}

#[cfg(test)]
impl AssetRegistry for RecordingAssets {
    fn enqueue(&mut self, asset: &AssetRef) {
        self.calls.push(asset.handle);
    }
}
