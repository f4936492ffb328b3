//! Deciding where a page gets its tabs.

use tabbed_config::{Location, LocationOverrides, Locations, Settings, ThemeSupport};

/// Location to attach the widget to for one page view.
///
/// Returns `None` when the content type is not enabled, or when the location
/// is a content filter and the request is a feed.
pub fn decide(
    settings: &Settings,
    theme: ThemeSupport,
    overrides: &LocationOverrides,
    post_type: &str,
    is_feed: bool,
) -> Option<Location> {
    if !settings.is_enabled(post_type) {
        tracing::debug!(post_type, "Tabs not enabled for content type");
        return None;
    }

    let location = Locations::decide(theme, settings.display, overrides);
    if is_feed && matches!(location, Location::Filter { .. }) {
        tracing::debug!(filter = location.name(), "Skipping content filter for feed");
        return None;
    }

    tracing::debug!(
        post_type,
        display = %settings.display,
        location = location.name(),
        priority = location.priority(),
        "Placing tabs"
    );
    Some(location)
}
