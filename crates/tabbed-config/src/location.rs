//! Theme injection points for the rendered tabs.
//!
//! Each theme family exposes different extension points around the entry
//! content. [`Locations::for_theme`] gives the default table, and config
//! overrides can replace either entry.

use serde::Deserialize;

use crate::{ConfigError, Display};

/// Theme family the host is rendering with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeSupport {
    /// Genesis framework (`genesis_entry_content` action).
    Genesis,
    /// Theme supporting Theme Hook Alliance entry hooks.
    HookAlliance,
    /// Anything else; falls back to filtering the content.
    #[default]
    Other,
}

impl ThemeSupport {
    /// Detect the theme family from the active template name and whether the
    /// theme declares Theme Hook Alliance `entry` hooks.
    #[must_use]
    pub fn detect(template: &str, supports_hook_alliance_entry: bool) -> Self {
        if template == "genesis" {
            Self::Genesis
        } else if supports_hook_alliance_entry {
            Self::HookAlliance
        } else {
            Self::Other
        }
    }
}

/// A single injection point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Location {
    /// Action hook: the markup is printed when the hook fires.
    Hook {
        /// Hook name.
        name: String,
        /// Hook priority.
        priority: i32,
    },
    /// Content filter: the markup is concatenated to the filtered content.
    Filter {
        /// Filter name.
        name: String,
        /// Filter priority.
        priority: i32,
    },
}

impl Location {
    fn hook(name: &str, priority: i32) -> Self {
        Self::Hook {
            name: name.to_owned(),
            priority,
        }
    }

    fn filter(name: &str, priority: i32) -> Self {
        Self::Filter {
            name: name.to_owned(),
            priority,
        }
    }

    /// Hook or filter name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Hook { name, .. } | Self::Filter { name, .. } => name,
        }
    }

    /// Hook or filter priority.
    #[must_use]
    pub fn priority(&self) -> i32 {
        match self {
            Self::Hook { priority, .. } | Self::Filter { priority, .. } => *priority,
        }
    }
}

/// Injection points for both display placements.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Locations {
    /// Used when tabs display before the content.
    pub before: Location,
    /// Used when tabs display after the content.
    pub after: Location,
}

impl Locations {
    /// Default table for a theme family.
    #[must_use]
    pub fn for_theme(theme: ThemeSupport) -> Self {
        match theme {
            ThemeSupport::Genesis => Self {
                before: Location::hook("genesis_entry_content", 8),
                after: Location::hook("genesis_entry_content", 10),
            },
            ThemeSupport::HookAlliance => Self {
                before: Location::hook("tha_entry_top", 13),
                after: Location::hook("tha_entry_bottom", 8),
            },
            ThemeSupport::Other => Self {
                before: Location::filter("the_content", 9),
                after: Location::filter("the_content", 11),
            },
        }
    }

    /// Replace entries with configured overrides.
    #[must_use]
    pub fn with_overrides(mut self, overrides: &LocationOverrides) -> Self {
        if let Some(before) = &overrides.before {
            self.before = before.clone();
        }
        if let Some(after) = &overrides.after {
            self.after = after.clone();
        }
        self
    }

    /// Location for a display placement.
    #[must_use]
    pub fn get(&self, display: Display) -> &Location {
        match display {
            Display::Before => &self.before,
            Display::After => &self.after,
        }
    }

    /// Location for a theme family and display placement, with overrides
    /// applied.
    #[must_use]
    pub fn decide(
        theme: ThemeSupport,
        display: Display,
        overrides: &LocationOverrides,
    ) -> Location {
        let locations = Self::for_theme(theme).with_overrides(overrides);
        match display {
            Display::Before => locations.before,
            Display::After => locations.after,
        }
    }
}

/// Validated location overrides from the `[locations]` config section.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LocationOverrides {
    /// Override for the `before` placement.
    pub before: Option<Location>,
    /// Override for the `after` placement.
    pub after: Option<Location>,
}

/// Raw `[locations]` section as parsed from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct LocationsRaw {
    before: Option<LocationRaw>,
    after: Option<LocationRaw>,
}

#[derive(Debug, Deserialize)]
struct LocationRaw {
    hook: Option<String>,
    filter: Option<String>,
    priority: Option<i32>,
}

/// Priority used when an override omits one.
const DEFAULT_PRIORITY: i32 = 10;

impl LocationsRaw {
    pub(crate) fn resolve(&self) -> Result<LocationOverrides, ConfigError> {
        Ok(LocationOverrides {
            before: self
                .before
                .as_ref()
                .map(|raw| raw.resolve("locations.before"))
                .transpose()?,
            after: self
                .after
                .as_ref()
                .map(|raw| raw.resolve("locations.after"))
                .transpose()?,
        })
    }
}

impl LocationRaw {
    fn resolve(&self, field: &str) -> Result<Location, ConfigError> {
        let priority = self.priority.unwrap_or(DEFAULT_PRIORITY);
        match (&self.hook, &self.filter) {
            (Some(name), None) if !name.is_empty() => Ok(Location::hook(name, priority)),
            (None, Some(name)) if !name.is_empty() => Ok(Location::filter(name, priority)),
            (Some(_), Some(_)) => Err(ConfigError::Validation(format!(
                "{field} cannot set both hook and filter"
            ))),
            _ => Err(ConfigError::Validation(format!(
                "{field} requires a non-empty hook or filter"
            ))),
        }
    }
}
