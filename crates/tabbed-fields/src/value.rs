//! Raw store values and the resolved field tree.

use std::borrow::Cow;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Raw value as kept in the meta store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    /// Integer value (repeater counts are usually stored this way).
    Number(i64),
    /// String value.
    Text(String),
    /// Ordered list of strings (flexible container layout tags).
    List(Vec<String>),
    /// Any other JSON value: floats, booleans, null, objects, mixed lists.
    ///
    /// Kept so one odd value does not make a whole document unreadable.
    /// It is never a valid count or layout list.
    Other(serde_json::Value),
}

impl MetaValue {
    /// Whether the value counts as empty: `""`, `"0"`, `0`, an empty list,
    /// `null`, `false` or `0.0`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Number(n) => *n == 0,
            Self::Text(s) => s.is_empty() || s == "0",
            Self::List(items) => items.is_empty(),
            Self::Other(value) => match value {
                serde_json::Value::Null => true,
                serde_json::Value::Bool(b) => !b,
                serde_json::Value::Number(n) => n.as_f64().is_none_or(|f| f.abs() < f64::EPSILON),
                serde_json::Value::String(s) => s.is_empty() || s == "0",
                serde_json::Value::Array(items) => items.is_empty(),
                serde_json::Value::Object(map) => map.is_empty(),
            },
        }
    }

    /// Text form of a scalar value.
    ///
    /// Lists, objects and `null` have no text form. `true` reads as `"1"`.
    #[must_use]
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Number(n) => Some(Cow::Owned(n.to_string())),
            Self::Text(s) => Some(Cow::Borrowed(s)),
            Self::List(_) => None,
            Self::Other(value) => match value {
                serde_json::Value::Number(n) => Some(Cow::Owned(n.to_string())),
                serde_json::Value::Bool(true) => Some(Cow::Borrowed("1")),
                serde_json::Value::Bool(false) => Some(Cow::Borrowed("")),
                serde_json::Value::String(s) => Some(Cow::Borrowed(s)),
                _ => None,
            },
        }
    }

    /// Interpret the value as a repeat count.
    ///
    /// Returns `None` for negative, fractional, non-numeric, list and other
    /// JSON values.
    #[must_use]
    pub fn as_count(&self) -> Option<usize> {
        match self {
            Self::Number(n) => usize::try_from(*n).ok(),
            Self::Text(s) => s.trim().parse().ok(),
            Self::List(_) | Self::Other(_) => None,
        }
    }
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for MetaValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for MetaValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<Vec<String>> for MetaValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<Vec<&str>> for MetaValue {
    fn from(value: Vec<&str>) -> Self {
        Self::List(value.into_iter().map(str::to_owned).collect())
    }
}

/// Resolved value of one field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Scalar leaf; `None` when the store has no value.
    Scalar(Option<MetaValue>),
    /// Repeater rows, in stored order.
    Rows(Vec<FieldTree>),
    /// Flexible container instances, in stored order.
    Layouts(Vec<LayoutInstance>),
}

/// One instance of a flexible container.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LayoutInstance {
    /// Layout tag this instance was stored with.
    #[serde(rename = "layoutType")]
    pub layout: String,
    /// Fields resolved from the layout's sub-schema.
    #[serde(flatten)]
    pub fields: FieldTree,
}

/// Resolved fields keyed by name, in schema declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldTree(IndexMap<String, FieldValue>);

impl FieldTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value, replacing an earlier one with the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        self.0.insert(name.into(), value);
    }

    /// Get a field value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    /// Whether a field is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Text of a scalar field. `None` when absent, not scalar, or unset.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<Cow<'_, str>> {
        match self.get(name)? {
            FieldValue::Scalar(Some(value)) => value.as_text(),
            _ => None,
        }
    }

    /// Rows of a repeater field.
    #[must_use]
    pub fn rows(&self, name: &str) -> Option<&[FieldTree]> {
        match self.get(name)? {
            FieldValue::Rows(rows) => Some(rows),
            _ => None,
        }
    }

    /// Instances of a flexible container field.
    #[must_use]
    pub fn layouts(&self, name: &str) -> Option<&[LayoutInstance]> {
        match self.get(name)? {
            FieldValue::Layouts(instances) => Some(instances),
            _ => None,
        }
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the tree has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}
