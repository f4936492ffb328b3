//! Host option store access.
//!
//! The host keeps the admin-facing settings in a flat option table. This
//! module reads the two options the tabs widget cares about and turns them
//! into [`Settings`].

use std::collections::HashMap;
use std::hash::BuildHasher;

use serde::Deserialize;

use crate::{ConfigError, Display, Settings};

/// Option holding the content-item types the widget is enabled on.
pub const OPTION_POST_TYPES: &str = "options_acftc_post_types";

/// Option holding the display placement (`before` or `after`).
pub const OPTION_DISPLAY: &str = "options_acftc_display";

/// Raw value stored in the host option table.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// Single string value.
    Text(String),
    /// Multi-valued option (checkbox-style).
    List(Vec<String>),
}

/// Read access to the host option table.
pub trait OptionStore {
    /// Get an option by name, `None` when it was never saved.
    fn get_option(&self, name: &str) -> Option<OptionValue>;
}

impl<S: BuildHasher> OptionStore for HashMap<String, OptionValue, S> {
    fn get_option(&self, name: &str) -> Option<OptionValue> {
        self.get(name).cloned()
    }
}

impl Settings {
    /// Build settings from the host option table.
    ///
    /// A missing post-types option enables nothing; a missing display option
    /// defaults to [`Display::After`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the display option holds anything
    /// other than `before` or `after`.
    pub fn from_options<O: OptionStore + ?Sized>(options: &O) -> Result<Self, ConfigError> {
        let post_types = match options.get_option(OPTION_POST_TYPES) {
            Some(OptionValue::List(types)) => types.into_iter().filter(|t| !t.is_empty()).collect(),
            Some(OptionValue::Text(single)) if !single.is_empty() => vec![single],
            Some(OptionValue::Text(_)) | None => Vec::new(),
        };

        let display = match options.get_option(OPTION_DISPLAY) {
            Some(OptionValue::Text(value)) => value.parse()?,
            Some(OptionValue::List(_)) => {
                return Err(ConfigError::Validation(format!(
                    "{OPTION_DISPLAY} must be a single value"
                )));
            }
            None => Display::default(),
        };

        Ok(Self {
            post_types,
            display,
        })
    }
}
