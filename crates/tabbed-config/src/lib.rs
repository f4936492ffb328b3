//! Configuration for the tabbed content widget.
//!
//! Parses `tabbed.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories. The same
//! [`Settings`] can also be read from the host option table through
//! [`OptionStore`].
//!
//! ## Environment Variable Expansion
//!
//! `assets.base_url` supports environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

mod expand;
mod location;
mod options;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

pub use location::{Location, LocationOverrides, Locations, ThemeSupport};
pub use options::{OPTION_DISPLAY, OPTION_POST_TYPES, OptionStore, OptionValue};

use location::LocationsRaw;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "tabbed.toml";

/// Where the tabs are placed relative to the entry content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Display {
    /// Before the entry content.
    Before,
    /// After the entry content.
    #[default]
    After,
}

impl Display {
    /// Option/config spelling of the placement.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
        }
    }
}

impl fmt::Display for Display {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Display {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "before" => Ok(Self::Before),
            "after" => Ok(Self::After),
            other => Err(ConfigError::Validation(format!(
                "invalid display placement '{other}', expected 'before' or 'after'"
            ))),
        }
    }
}

/// Widget settings: which content types get tabs and where they go.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Content-item types the tabs are rendered on.
    pub post_types: Vec<String>,
    /// Display placement.
    #[serde(rename = "position")]
    pub display: Display,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            post_types: vec!["page".to_owned(), "post".to_owned()],
            display: Display::After,
        }
    }
}

impl Settings {
    /// Whether tabs are enabled for a content-item type.
    #[must_use]
    pub fn is_enabled(&self, post_type: &str) -> bool {
        self.post_types.iter().any(|t| t == post_type)
    }
}

/// Companion asset configuration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// URL prefix the `assets/` directory is served under.
    pub base_url: String,
    /// Version string appended to the stylesheet URL.
    pub version: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            base_url: "/wp-content/plugins/acf-tabbed-content".to_owned(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Display settings (`[display]` section).
    pub display: Settings,
    /// Asset settings.
    pub assets: AssetsConfig,
    /// Location overrides as parsed from TOML.
    locations: LocationsRaw,

    /// Resolved location overrides (set after loading).
    #[serde(skip)]
    pub locations_resolved: LocationOverrides,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`assets.base_url`").
        field: String,
        /// Error message.
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `tabbed.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::load_from_file(path);
        }

        match Self::discover_config() {
            Some(discovered) => Self::load_from_file(&discovered),
            None => {
                tracing::debug!("No {CONFIG_FILENAME} found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Parse, expand and validate configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing, expansion or validation fails.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        config.assets.base_url = expand::expand_env(&config.assets.base_url, "assets.base_url")?;
        config.locations_resolved = config.locations.resolve()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.assets.base_url, "assets.base_url")?;
        require_non_empty(&self.assets.version, "assets.version")?;
        if self.display.post_types.iter().any(String::is_empty) {
            return Err(ConfigError::Validation(
                "display.post_types cannot contain empty names".to_owned(),
            ));
        }
        Ok(())
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&content)?;
        config.config_path = Some(path.to_path_buf());
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.display.display, Display::After);
        assert_eq!(config.display.post_types, vec!["page", "post"]);
        assert_eq!(
            config.assets.base_url,
            "/wp-content/plugins/acf-tabbed-content"
        );
        assert_eq!(config.locations_resolved, LocationOverrides::default());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.display, Settings::default());
    }

    #[test]
    fn test_parse_display_section() {
        let toml = r#"
[display]
position = "before"
post_types = ["product"]
"#;
        let config = Config::parse(toml).unwrap();
        assert_eq!(config.display.display, Display::Before);
        assert!(config.display.is_enabled("product"));
        assert!(!config.display.is_enabled("post"));
    }

    #[test]
    fn test_parse_invalid_position() {
        let toml = r#"
[display]
position = "sidebar"
"#;
        let err = Config::parse(toml).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "got {err:?}");
    }

    #[test]
    fn test_parse_location_overrides() {
        let toml = r#"
[locations.before]
hook = "custom_entry_top"
priority = 3
"#;
        let config = Config::parse(toml).unwrap();
        assert_eq!(
            config.locations_resolved.before,
            Some(Location::Hook {
                name: "custom_entry_top".to_owned(),
                priority: 3,
            })
        );
        assert_eq!(config.locations_resolved.after, None);
    }

    #[test]
    fn test_location_without_target_rejected() {
        let toml = r"
[locations.after]
priority = 3
";
        let err = Config::parse(toml).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_empty_base_url_rejected() {
        let toml = r#"
[assets]
base_url = ""
"#;
        let err = Config::parse(toml).unwrap_err();
        assert!(err.to_string().contains("assets.base_url"));
    }

    #[test]
    fn test_display_from_str() {
        assert_eq!("before".parse::<Display>().unwrap(), Display::Before);
        assert_eq!("after".parse::<Display>().unwrap(), Display::After);
        assert!("Before".parse::<Display>().is_err());
        assert_eq!(Display::Before.to_string(), "before");
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tabbed.toml");
        std::fs::write(&path, "[display]\nposition = \"before\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.display.display, Display::Before);
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
