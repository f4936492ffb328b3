//! Field schema definitions.
//!
//! A schema is a static tree of [`FieldSchema`] nodes. Each node is a scalar
//! leaf, a repeater (a fixed sub-schema repeated N times) or a flexible
//! container (an ordered list of instances, each using one of several named
//! [`Layout`]s).
//!
//! Schemas deserialize from the field-group export format:
//!
//! ```
//! use tabbed_fields::{FieldKind, FieldSchema};
//!
//! let json = r#"[{
//!     "name": "tabs",
//!     "type": "repeater",
//!     "sub_fields": [{ "name": "title", "type": "text" }]
//! }]"#;
//! let schema: Vec<FieldSchema> = serde_json::from_str(json).unwrap();
//! assert!(matches!(schema[0].kind, FieldKind::Repeater { .. }));
//! ```

use indexmap::IndexMap;
use serde::Deserialize;

/// One field in a schema.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "RawField")]
pub struct FieldSchema {
    /// Storage key segment. Nodes with an empty name are skipped on resolve.
    pub name: String,
    /// Human-readable label for authoring screens.
    pub label: String,
    /// Field shape.
    pub kind: FieldKind,
}

/// Shape of a field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// Leaf value read as-is from the store.
    Scalar,
    /// Sub-schema repeated as many times as the stored count says.
    Repeater {
        /// Fields of each row.
        sub_fields: Vec<FieldSchema>,
    },
    /// Ordered list of instances, each tagged with a layout name.
    Flexible {
        /// Available layouts.
        layouts: Vec<Layout>,
    },
}

/// Named variant of a flexible container.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Layout {
    /// Tag stored for instances of this layout.
    pub name: String,
    /// Human-readable label.
    #[serde(default)]
    pub label: String,
    /// Fields of each instance.
    #[serde(default)]
    pub sub_fields: Vec<FieldSchema>,
}

impl FieldSchema {
    /// Create a scalar field.
    #[must_use]
    pub fn scalar(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: String::new(),
            kind: FieldKind::Scalar,
        }
    }

    /// Create a repeater field.
    #[must_use]
    pub fn repeater(name: impl Into<String>, sub_fields: Vec<FieldSchema>) -> Self {
        Self {
            name: name.into(),
            label: String::new(),
            kind: FieldKind::Repeater { sub_fields },
        }
    }

    /// Create a flexible container field.
    #[must_use]
    pub fn flexible(name: impl Into<String>, layouts: Vec<Layout>) -> Self {
        Self {
            name: name.into(),
            label: String::new(),
            kind: FieldKind::Flexible { layouts },
        }
    }

    /// Set the authoring label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

impl Layout {
    /// Create a layout.
    #[must_use]
    pub fn new(name: impl Into<String>, sub_fields: Vec<FieldSchema>) -> Self {
        Self {
            name: name.into(),
            label: String::new(),
            sub_fields,
        }
    }
}

/// Field as it appears in an export. `type` is only informational here:
/// the presence of `layouts` or `sub_fields` decides the shape.
#[derive(Deserialize)]
struct RawField {
    #[serde(default)]
    name: String,
    #[serde(default)]
    label: String,
    sub_fields: Option<Vec<FieldSchema>>,
    layouts: Option<RawLayouts>,
}

/// Exports carry layouts either as a list or keyed by layout key.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawLayouts {
    List(Vec<Layout>),
    Keyed(IndexMap<String, Layout>),
}

impl From<RawField> for FieldSchema {
    fn from(raw: RawField) -> Self {
        let kind = match (raw.layouts, raw.sub_fields) {
            (Some(RawLayouts::List(layouts)), _) => FieldKind::Flexible { layouts },
            (Some(RawLayouts::Keyed(layouts)), _) => FieldKind::Flexible {
                layouts: layouts.into_values().collect(),
            },
            (None, Some(sub_fields)) => FieldKind::Repeater { sub_fields },
            (None, None) => FieldKind::Scalar,
        };
        Self {
            name: raw.name,
            label: raw.label,
            kind,
        }
    }
}

/// Source of the field schema to resolve.
pub trait SchemaProvider: Send + Sync {
    /// Top-level fields, in declaration order.
    fn fields(&self) -> &[FieldSchema];
}

impl SchemaProvider for Vec<FieldSchema> {
    fn fields(&self) -> &[FieldSchema] {
        self
    }
}

/// Built-in schema for tabbed content.
///
/// A `tabs` repeater with `title` and `content`, plus a nested `tabs`
/// repeater ("Child Tabs") of `title` and `content`.
#[derive(Debug)]
pub struct TabbedContentSchema {
    fields: Vec<FieldSchema>,
}

impl TabbedContentSchema {
    /// Build the schema.
    #[must_use]
    pub fn new() -> Self {
        let child_tabs = FieldSchema::repeater(
            "tabs",
            vec![
                FieldSchema::scalar("title").with_label("Title"),
                FieldSchema::scalar("content").with_label("Content"),
            ],
        )
        .with_label("Child Tabs");

        let tabs = FieldSchema::repeater(
            "tabs",
            vec![
                FieldSchema::scalar("title").with_label("Title"),
                FieldSchema::scalar("content").with_label("Content"),
                child_tabs,
            ],
        )
        .with_label("Tabs");

        Self { fields: vec![tabs] }
    }
}

impl Default for TabbedContentSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaProvider for TabbedContentSchema {
    fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_tabbed_content_schema_shape() {
        let schema = TabbedContentSchema::new();
        let [tabs] = schema.fields() else {
            panic!("expected a single top-level field");
        };
        assert_eq!(tabs.name, "tabs");
        let FieldKind::Repeater { sub_fields } = &tabs.kind else {
            panic!("tabs should be a repeater");
        };
        let names: Vec<&str> = sub_fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["title", "content", "tabs"]);
        assert_eq!(sub_fields[2].label, "Child Tabs");
        assert!(matches!(
            &sub_fields[2].kind,
            FieldKind::Repeater { sub_fields } if sub_fields.len() == 2
        ));
    }

    #[test]
    fn test_deserialize_scalar_types() {
        let json = r#"[
            { "name": "title", "type": "text", "required": 1 },
            { "name": "content", "label": "Content", "type": "wysiwyg" }
        ]"#;
        let schema: Vec<FieldSchema> = serde_json::from_str(json).unwrap();
        assert_eq!(schema[0], FieldSchema::scalar("title"));
        assert_eq!(schema[1], FieldSchema::scalar("content").with_label("Content"));
    }

    #[test]
    fn test_deserialize_keyed_layouts() {
        let json = r#"{
            "name": "sections",
            "type": "flexible_content",
            "layouts": {
                "layout_1": { "name": "hero", "sub_fields": [{ "name": "heading" }] },
                "layout_2": { "name": "quote", "sub_fields": [{ "name": "text" }] }
            }
        }"#;
        let field: FieldSchema = serde_json::from_str(json).unwrap();
        assert_eq!(
            field,
            FieldSchema::flexible(
                "sections",
                vec![
                    Layout::new("hero", vec![FieldSchema::scalar("heading")]),
                    Layout::new("quote", vec![FieldSchema::scalar("text")]),
                ]
            )
        );
    }

    #[test]
    fn test_layouts_take_precedence_over_sub_fields() {
        let json = r#"{
            "name": "mixed",
            "sub_fields": [{ "name": "ignored" }],
            "layouts": [{ "name": "only" }]
        }"#;
        let field: FieldSchema = serde_json::from_str(json).unwrap();
        assert!(matches!(field.kind, FieldKind::Flexible { ref layouts } if layouts.len() == 1));
    }

    #[test]
    fn test_vec_is_schema_provider() {
        let fields = vec![FieldSchema::scalar("a")];
        assert_eq!(SchemaProvider::fields(&fields).len(), 1);
    }
}
